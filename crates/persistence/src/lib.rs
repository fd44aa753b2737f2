//! ScyllaDB persistence layer for the live call copilot
//!
//! Holds the customer directory consulted during caller verification. The
//! copilot only reads rows during calls; `ScyllaCustomerStore::upsert` exists
//! for ingestion jobs and test setup.

pub mod client;
pub mod customers;
pub mod error;
pub mod schema;

pub use client::{ScyllaClient, ScyllaConfig};
pub use customers::ScyllaCustomerStore;
pub use error::PersistenceError;

/// Connect, ensure schema and hand back the customer directory
pub async fn init(config: ScyllaConfig) -> Result<ScyllaCustomerStore, PersistenceError> {
    let client = ScyllaClient::connect(config).await?;
    client.ensure_schema().await?;
    Ok(ScyllaCustomerStore::new(client))
}
