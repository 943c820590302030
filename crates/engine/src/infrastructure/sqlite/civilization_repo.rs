//! SQLite civilization repository implementation.

use async_trait::async_trait;
use modmaker_domain::{
    Civilization, CivilizationColumn, CivilizationDeletePolicy, CivilizationId,
    CivilizationName, Description, ListQuery, NewCivilization, Page,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::query_helpers::{into_page, map_write_error, push_conditions, push_order_and_page};
use crate::infrastructure::ports::{CivilizationRepo, RepoError};

type CivilizationRow = (i64, String, Option<String>);

fn column_sql(column: CivilizationColumn) -> &'static str {
    match column {
        CivilizationColumn::Name => "c.name",
        CivilizationColumn::Description => "c.description",
    }
}

fn row_to_civilization(row: CivilizationRow) -> Result<Civilization, RepoError> {
    let (id, name, description) = row;
    let name = CivilizationName::new(name).map_err(|e| RepoError::database("decode", e))?;
    let description = description
        .map(Description::new)
        .transpose()
        .map_err(|e| RepoError::database("decode", e))?;
    Ok(Civilization::from_parts(
        CivilizationId::new(id),
        name,
        description,
    ))
}

/// Repository for Civilization operations.
pub struct SqliteCivilizationRepo {
    pool: SqlitePool,
}

impl SqliteCivilizationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CivilizationRepo for SqliteCivilizationRepo {
    async fn get(&self, id: CivilizationId) -> Result<Option<Civilization>, RepoError> {
        let row: Option<CivilizationRow> =
            sqlx::query_as("SELECT id, name, description FROM civilization WHERE id = ?")
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepoError::database("civilization.get", e))?;

        row.map(row_to_civilization).transpose()
    }

    async fn insert(&self, civilization: &NewCivilization) -> Result<Civilization, RepoError> {
        let result = sqlx::query("INSERT INTO civilization (name, description) VALUES (?, ?)")
            .bind(civilization.name.as_str())
            .bind(civilization.description.as_ref().map(Description::as_str))
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_write_error(
                    e,
                    "civilization.insert",
                    "Civilization",
                    civilization.name.as_str(),
                )
            })?;

        let id = CivilizationId::new(result.last_insert_rowid());
        tracing::debug!(civilization_id = %id, name = %civilization.name, "Civilization created");
        Ok(civilization.clone().into_civilization(id))
    }

    async fn update(&self, civilization: &Civilization) -> Result<(), RepoError> {
        let result = sqlx::query("UPDATE civilization SET name = ?, description = ? WHERE id = ?")
            .bind(civilization.name.as_str())
            .bind(civilization.description.as_ref().map(Description::as_str))
            .bind(civilization.id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_write_error(
                    e,
                    "civilization.update",
                    "Civilization",
                    civilization.name.as_str(),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Civilization", civilization.id));
        }
        Ok(())
    }

    async fn delete(
        &self,
        id: CivilizationId,
        policy: CivilizationDeletePolicy,
    ) -> Result<(), RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("civilization.delete", e))?;

        let name: Option<String> = sqlx::query_scalar("SELECT name FROM civilization WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| RepoError::database("civilization.delete", e))?;
        let Some(name) = name else {
            return Err(RepoError::not_found("Civilization", id));
        };

        let leader_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM leader WHERE civilization_id = ?")
                .bind(id.as_i64())
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| RepoError::database("civilization.delete", e))?;

        if leader_count > 0 {
            match policy {
                CivilizationDeletePolicy::Restrict => {
                    return Err(RepoError::constraint(format!(
                        "Civilization '{}' is still referenced by {} leader(s)",
                        name, leader_count
                    )));
                }
                CivilizationDeletePolicy::Cascade => {
                    sqlx::query("DELETE FROM leader WHERE civilization_id = ?")
                        .bind(id.as_i64())
                        .execute(&mut *tx)
                        .await
                        .map_err(|e| RepoError::database("civilization.delete", e))?;
                }
                CivilizationDeletePolicy::Detach => {
                    sqlx::query(
                        "UPDATE leader SET civilization_id = NULL WHERE civilization_id = ?",
                    )
                    .bind(id.as_i64())
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| RepoError::database("civilization.delete", e))?;
                }
            }
        }

        sqlx::query("DELETE FROM civilization WHERE id = ?")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("civilization.delete", e))?;

        tx.commit()
            .await
            .map_err(|e| RepoError::database("civilization.delete", e))?;

        tracing::debug!(
            civilization_id = %id,
            policy = %policy,
            affected_leaders = leader_count,
            "Civilization deleted"
        );
        Ok(())
    }

    async fn list(
        &self,
        query: &ListQuery<CivilizationColumn>,
    ) -> Result<Page<Civilization>, RepoError> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM civilization c");
        push_conditions(&mut count, query, column_sql);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("civilization.list", e))?;

        let mut select =
            QueryBuilder::<Sqlite>::new("SELECT c.id, c.name, c.description FROM civilization c");
        push_conditions(&mut select, query, column_sql);
        push_order_and_page(&mut select, query, column_sql, "c.id");
        let rows: Vec<CivilizationRow> = select
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("civilization.list", e))?;

        let items = rows
            .into_iter()
            .map(row_to_civilization)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(into_page(items, total, query))
    }
}
