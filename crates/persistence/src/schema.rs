//! ScyllaDB schema creation

use scylla::Session;

use crate::error::PersistenceError;

/// Create the keyspace if it doesn't exist
pub async fn create_keyspace(
    session: &Session,
    keyspace: &str,
    replication_factor: u8,
) -> Result<(), PersistenceError> {
    let query = format!(
        "CREATE KEYSPACE IF NOT EXISTS {} WITH replication = {{'class': 'SimpleStrategy', 'replication_factor': {}}}",
        keyspace, replication_factor
    );

    session
        .query_unpaged(query, &[])
        .await
        .map_err(|e| PersistenceError::SchemaError(format!("Failed to create keyspace: {}", e)))?;

    Ok(())
}

/// Create all required tables
pub async fn create_tables(session: &Session, keyspace: &str) -> Result<(), PersistenceError> {
    // Customer directory, keyed by normalized 10-digit phone
    let customers_table = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {}.customers (
            phone TEXT,
            first_name TEXT,
            last_name TEXT,
            plan TEXT,
            contract_type TEXT,
            state TEXT,
            PRIMARY KEY (phone)
        )
    "#,
        keyspace
    );

    session
        .query_unpaged(customers_table, &[])
        .await
        .map_err(|e| {
            PersistenceError::SchemaError(format!("Failed to create customers table: {}", e))
        })?;

    tracing::info!("All tables created successfully");
    Ok(())
}
