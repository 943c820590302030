//! SQLite database implementations.

use sqlx::SqlitePool;
use std::sync::Arc;

mod connection;
mod query_helpers;
mod schema;

mod civilization_repo;
mod leader_repo;
mod tag_repo;

#[cfg(test)]
mod integration_tests;

pub use civilization_repo::SqliteCivilizationRepo;
pub use connection::connect;
pub use leader_repo::SqliteLeaderRepo;
pub use schema::ensure_schema;
pub use tag_repo::{SqliteFlawRepo, SqliteTraitRepo};

/// Create all SQLite repositories from a connection pool.
pub struct SqliteRepositories {
    pub civilization: Arc<SqliteCivilizationRepo>,
    pub leader: Arc<SqliteLeaderRepo>,
    pub traits: Arc<SqliteTraitRepo>,
    pub flaws: Arc<SqliteFlawRepo>,
}

impl SqliteRepositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            civilization: Arc::new(SqliteCivilizationRepo::new(pool.clone())),
            leader: Arc::new(SqliteLeaderRepo::new(pool.clone())),
            traits: Arc::new(SqliteTraitRepo::new(pool.clone())),
            flaws: Arc::new(SqliteFlawRepo::new(pool)),
        }
    }
}
