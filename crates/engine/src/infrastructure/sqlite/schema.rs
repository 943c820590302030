//! SQLite schema initialization - tables, unique constraints and join tables.

use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS civilization (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        description TEXT
    )
    "#,
    // No ON DELETE action: the configured delete policy decides what happens
    // to leaders before their civilization row goes away.
    r#"
    CREATE TABLE IF NOT EXISTS leader (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        description TEXT,
        civilization_id INTEGER REFERENCES civilization(id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_leader_civilization ON leader(civilization_id)",
    r#"
    CREATE TABLE IF NOT EXISTS trait (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS flaw (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS leader_traits (
        leader_id INTEGER NOT NULL REFERENCES leader(id) ON DELETE CASCADE,
        trait_id INTEGER NOT NULL REFERENCES trait(id) ON DELETE CASCADE,
        PRIMARY KEY (leader_id, trait_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS leader_flaws (
        leader_id INTEGER NOT NULL REFERENCES leader(id) ON DELETE CASCADE,
        flaw_id INTEGER NOT NULL REFERENCES flaw(id) ON DELETE CASCADE,
        PRIMARY KEY (leader_id, flaw_id)
    )
    "#,
];

/// Create every table and index if missing.
///
/// Called once on startup; idempotent.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("ensure_schema", e))?;
    }

    tracing::info!("SQLite schema initialized (tables and constraints ensured)");
    Ok(())
}
