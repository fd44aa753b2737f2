//! Policy chunk store backed by Qdrant
//!
//! Each knowledge partition is one Qdrant collection, named by
//! `partition::knowledge_partition`. The copilot only reads: index
//! construction is an offline pipeline outside this repository.

use qdrant_client::{
    qdrant::{value::Kind, SearchPointsBuilder},
    Qdrant,
};

use crate::RagError;

/// Vector store configuration
#[derive(Debug, Clone)]
pub struct VectorStoreConfig {
    /// Qdrant endpoint
    pub endpoint: String,
    /// API key (optional)
    pub api_key: Option<String>,
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            endpoint: copilot_config::constants::endpoints::QDRANT_DEFAULT.to_string(),
            api_key: None,
        }
    }
}

/// Read-only search client over partitioned policy collections
pub struct PolicyVectorStore {
    client: Qdrant,
}

impl PolicyVectorStore {
    pub fn new(config: VectorStoreConfig) -> Result<Self, RagError> {
        let mut builder = Qdrant::from_url(&config.endpoint);
        if let Some(api_key) = config.api_key {
            builder = builder.api_key(api_key);
        }
        let client = builder
            .build()
            .map_err(|e| RagError::Connection(e.to_string()))?;
        Ok(Self { client })
    }

    /// Similarity search returning the text payload of the top chunks
    pub async fn search_chunks(
        &self,
        partition: &str,
        query_embedding: Vec<f32>,
        top_k: usize,
    ) -> Result<Vec<String>, RagError> {
        let results = self
            .client
            .search_points(
                SearchPointsBuilder::new(partition, query_embedding, top_k as u64)
                    .with_payload(true),
            )
            .await
            .map_err(|e| RagError::Search(e.to_string()))?;

        let chunks = results
            .result
            .into_iter()
            .filter_map(|point| {
                point.payload.into_iter().find_map(|(k, v)| {
                    if k == "text" {
                        if let Some(Kind::StringValue(s)) = v.kind {
                            let trimmed = s.trim().to_string();
                            if !trimmed.is_empty() {
                                return Some(trimmed);
                            }
                        }
                    }
                    None
                })
            })
            .collect();

        Ok(chunks)
    }
}
