//! SQLite pool construction.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

const MAX_CONNECTIONS: u32 = 5;

/// Open (creating if missing) the database at `db_path` with foreign keys
/// enforced on every connection.
pub async fn connect(db_path: &str) -> Result<SqlitePool, RepoError> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path))
        .map_err(|e| RepoError::database("connect", e))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
        .map_err(|e| RepoError::database("connect", e))?;

    tracing::debug!(path = %db_path, "SQLite pool opened");
    Ok(pool)
}
