//! Customer directory backed by ScyllaDB
//!
//! Lookups are exact-match on the normalized 10-digit phone that keys the
//! customers table. A lookup receives the phone candidates heard on the call
//! in mention order and returns the first row that matches; later candidates
//! are not consulted once a match is found.

use async_trait::async_trait;

use copilot_core::{CustomerDirectory, CustomerRecord};

use crate::{PersistenceError, ScyllaClient};

/// ScyllaDB implementation of the customer directory
#[derive(Clone)]
pub struct ScyllaCustomerStore {
    client: ScyllaClient,
}

impl ScyllaCustomerStore {
    pub fn new(client: ScyllaClient) -> Self {
        Self { client }
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<CustomerRecord>, PersistenceError> {
        let query = format!(
            "SELECT phone, first_name, last_name, plan, contract_type, state
             FROM {}.customers WHERE phone = ?",
            self.client.keyspace()
        );

        let result = self
            .client
            .session()
            .query_unpaged(query, (phone,))
            .await?;

        if let Some(rows) = result.rows {
            if let Some(row) = rows.into_iter().next() {
                return Ok(Some(row_to_record(row)?));
            }
        }

        Ok(None)
    }

    /// Insert or replace a customer row; used by ingestion and tests
    pub async fn upsert(&self, record: &CustomerRecord) -> Result<(), PersistenceError> {
        let (first_name, last_name) = split_name(&record.name);
        let query = format!(
            "INSERT INTO {}.customers (phone, first_name, last_name, plan, contract_type, state)
             VALUES (?, ?, ?, ?, ?, ?)",
            self.client.keyspace()
        );

        self.client
            .session()
            .query_unpaged(
                query,
                (
                    &record.phone,
                    first_name,
                    last_name,
                    &record.plan,
                    &record.contract_type,
                    &record.state,
                ),
            )
            .await?;

        tracing::info!(phone = %record.phone, "Customer record upserted");
        Ok(())
    }
}

#[async_trait]
impl CustomerDirectory for ScyllaCustomerStore {
    async fn lookup_by_phone(
        &self,
        candidates: &[String],
    ) -> copilot_core::Result<Option<CustomerRecord>> {
        for candidate in candidates {
            if let Some(record) = self.find_by_phone(candidate).await? {
                tracing::info!(phone = %candidate, "Customer directory match");
                return Ok(Some(record));
            }
        }
        Ok(None)
    }
}

fn row_to_record(
    row: scylla::frame::response::result::Row,
) -> Result<CustomerRecord, PersistenceError> {
    let (phone, first_name, last_name, plan, contract_type, state): (
        String,
        Option<String>,
        Option<String>,
        Option<String>,
        Option<String>,
        Option<String>,
    ) = row
        .into_typed()
        .map_err(|e| PersistenceError::InvalidData(e.to_string()))?;

    Ok(CustomerRecord {
        phone,
        name: compose_name(first_name.as_deref(), last_name.as_deref()),
        plan: plan.unwrap_or_default(),
        contract_type: contract_type.unwrap_or_default(),
        state: state.unwrap_or_default(),
    })
}

/// Join stored first/last names, tolerating either being absent
fn compose_name(first: Option<&str>, last: Option<&str>) -> String {
    let first = first.unwrap_or("").trim();
    let last = last.unwrap_or("").trim();
    match (first.is_empty(), last.is_empty()) {
        (false, false) => format!("{first} {last}"),
        (false, true) => first.to_string(),
        (true, false) => last.to_string(),
        (true, true) => String::new(),
    }
}

fn split_name(name: &str) -> (String, String) {
    match name.trim().split_once(' ') {
        Some((first, last)) => (first.to_string(), last.trim().to_string()),
        None => (name.trim().to_string(), String::new()),
    }
}
