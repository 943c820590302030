//! SQLite leader repository implementation.
//!
//! Leaders live in `leader`; their trait and flaw sets live in the
//! `leader_traits` / `leader_flaws` join tables, whose composite primary keys
//! make every association unique.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use modmaker_domain::{
    CivilizationId, Description, FlawId, Leader, LeaderColumn, LeaderId, LeaderName, ListQuery,
    NewLeader, Page, TraitId,
};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use super::query_helpers::{into_page, map_write_error, push_conditions, push_order_and_page};
use crate::infrastructure::ports::{LeaderRepo, RepoError};

type LeaderRow = (i64, String, Option<String>, Option<i64>);

const SELECT_LEADER: &str = "SELECT l.id, l.name, l.description, l.civilization_id \
     FROM leader l LEFT JOIN civilization c ON c.id = l.civilization_id";

/// One of the two association tables.
#[derive(Clone, Copy)]
struct JoinTable {
    table: &'static str,
    column: &'static str,
}

const TRAITS: JoinTable = JoinTable {
    table: "leader_traits",
    column: "trait_id",
};

const FLAWS: JoinTable = JoinTable {
    table: "leader_flaws",
    column: "flaw_id",
};

fn column_sql(column: LeaderColumn) -> &'static str {
    match column {
        LeaderColumn::Name => "l.name",
        LeaderColumn::Description => "l.description",
        LeaderColumn::Civilization => "c.name",
    }
}

/// Repository for Leader operations.
pub struct SqliteLeaderRepo {
    pool: SqlitePool,
}

impl SqliteLeaderRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch `leader_id -> linked ids` for the given leaders.
    async fn load_links(
        &self,
        join: JoinTable,
        leader_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<i64>>, RepoError> {
        let mut links: HashMap<i64, Vec<i64>> = HashMap::new();
        if leader_ids.is_empty() {
            return Ok(links);
        }

        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT leader_id, {} FROM {} WHERE leader_id IN (",
            join.column, join.table
        ));
        let mut separated = builder.separated(", ");
        for id in leader_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let rows: Vec<(i64, i64)> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("leader.load_links", e))?;

        for (leader_id, linked_id) in rows {
            links.entry(leader_id).or_default().push(linked_id);
        }
        Ok(links)
    }

    /// Turn rows into leaders with their trait and flaw sets attached.
    async fn hydrate(&self, rows: Vec<LeaderRow>) -> Result<Vec<Leader>, RepoError> {
        let ids: Vec<i64> = rows.iter().map(|row| row.0).collect();
        let mut traits = self.load_links(TRAITS, &ids).await?;
        let mut flaws = self.load_links(FLAWS, &ids).await?;

        rows.into_iter()
            .map(|(id, name, description, civilization_id)| -> Result<Leader, RepoError> {
                let name = LeaderName::new(name).map_err(|e| RepoError::database("decode", e))?;
                let description = description
                    .map(Description::new)
                    .transpose()
                    .map_err(|e| RepoError::database("decode", e))?;
                let trait_ids: BTreeSet<TraitId> = traits
                    .remove(&id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(TraitId::new)
                    .collect();
                let flaw_ids: BTreeSet<FlawId> = flaws
                    .remove(&id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(FlawId::new)
                    .collect();
                Ok(Leader::from_parts(
                    LeaderId::new(id),
                    name,
                    description,
                    civilization_id.map(CivilizationId::new),
                    trait_ids,
                    flaw_ids,
                ))
            })
            .collect()
    }

    async fn replace_links(
        conn: &mut SqliteConnection,
        join: JoinTable,
        leader: &LeaderName,
        leader_id: i64,
        linked: impl Iterator<Item = i64>,
    ) -> Result<(), RepoError> {
        sqlx::query(&format!("DELETE FROM {} WHERE leader_id = ?", join.table))
            .bind(leader_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| RepoError::database("leader.replace_links", e))?;

        let insert = format!(
            "INSERT OR IGNORE INTO {} (leader_id, {}) VALUES (?, ?)",
            join.table, join.column
        );
        for linked_id in linked {
            sqlx::query(&insert)
                .bind(leader_id)
                .bind(linked_id)
                .execute(&mut *conn)
                .await
                .map_err(|e| {
                    map_write_error(e, "leader.replace_links", "Leader", leader.as_str())
                })?;
        }
        Ok(())
    }

    async fn link(&self, join: JoinTable, id: LeaderId, linked_id: i64) -> Result<bool, RepoError> {
        let result = sqlx::query(&format!(
            "INSERT OR IGNORE INTO {} (leader_id, {}) VALUES (?, ?)",
            join.table, join.column
        ))
        .bind(id.as_i64())
        .bind(linked_id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "leader.link", "Leader", &id.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    async fn unlink(
        &self,
        join: JoinTable,
        id: LeaderId,
        linked_id: i64,
    ) -> Result<bool, RepoError> {
        let result = sqlx::query(&format!(
            "DELETE FROM {} WHERE leader_id = ? AND {} = ?",
            join.table, join.column
        ))
        .bind(id.as_i64())
        .bind(linked_id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("leader.unlink", e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl LeaderRepo for SqliteLeaderRepo {
    async fn get(&self, id: LeaderId) -> Result<Option<Leader>, RepoError> {
        let row: Option<LeaderRow> = sqlx::query_as(&format!("{} WHERE l.id = ?", SELECT_LEADER))
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("leader.get", e))?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn insert(&self, leader: &NewLeader) -> Result<Leader, RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("leader.insert", e))?;

        let result = sqlx::query(
            "INSERT INTO leader (name, description, civilization_id) VALUES (?, ?, ?)",
        )
        .bind(leader.name.as_str())
        .bind(leader.description.as_ref().map(Description::as_str))
        .bind(leader.civilization_id.map(|id| id.as_i64()))
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, "leader.insert", "Leader", leader.name.as_str()))?;
        let id = result.last_insert_rowid();

        Self::replace_links(
            &mut tx,
            TRAITS,
            &leader.name,
            id,
            leader.traits.iter().map(|t| t.as_i64()),
        )
        .await?;
        Self::replace_links(
            &mut tx,
            FLAWS,
            &leader.name,
            id,
            leader.flaws.iter().map(|f| f.as_i64()),
        )
        .await?;

        tx.commit()
            .await
            .map_err(|e| RepoError::database("leader.insert", e))?;

        let id = LeaderId::new(id);
        tracing::debug!(leader_id = %id, name = %leader.name, "Leader created");
        Ok(leader.clone().into_leader(id))
    }

    async fn update(&self, leader: &Leader) -> Result<(), RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("leader.update", e))?;

        let result = sqlx::query(
            "UPDATE leader SET name = ?, description = ?, civilization_id = ? WHERE id = ?",
        )
        .bind(leader.name.as_str())
        .bind(leader.description.as_ref().map(Description::as_str))
        .bind(leader.civilization_id.map(|id| id.as_i64()))
        .bind(leader.id.as_i64())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, "leader.update", "Leader", leader.name.as_str()))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Leader", leader.id));
        }

        let id = leader.id.as_i64();
        Self::replace_links(
            &mut tx,
            TRAITS,
            &leader.name,
            id,
            leader.traits.iter().map(|t| t.as_i64()),
        )
        .await?;
        Self::replace_links(
            &mut tx,
            FLAWS,
            &leader.name,
            id,
            leader.flaws.iter().map(|f| f.as_i64()),
        )
        .await?;

        tx.commit()
            .await
            .map_err(|e| RepoError::database("leader.update", e))?;
        Ok(())
    }

    async fn delete(&self, id: LeaderId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM leader WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("leader.delete", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Leader", id));
        }
        tracing::debug!(leader_id = %id, "Leader deleted");
        Ok(())
    }

    async fn list(&self, query: &ListQuery<LeaderColumn>) -> Result<Page<Leader>, RepoError> {
        let mut count = QueryBuilder::<Sqlite>::new(
            "SELECT COUNT(*) FROM leader l LEFT JOIN civilization c ON c.id = l.civilization_id",
        );
        push_conditions(&mut count, query, column_sql);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("leader.list", e))?;

        let mut select = QueryBuilder::<Sqlite>::new(SELECT_LEADER);
        push_conditions(&mut select, query, column_sql);
        push_order_and_page(&mut select, query, column_sql, "l.id");
        let rows: Vec<LeaderRow> = select
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("leader.list", e))?;

        let items = self.hydrate(rows).await?;
        Ok(into_page(items, total, query))
    }

    async fn list_in_civilization(
        &self,
        civilization_id: CivilizationId,
    ) -> Result<Vec<Leader>, RepoError> {
        let rows: Vec<LeaderRow> = sqlx::query_as(&format!(
            "{} WHERE l.civilization_id = ? ORDER BY l.name COLLATE NOCASE, l.id",
            SELECT_LEADER
        ))
        .bind(civilization_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("leader.list_in_civilization", e))?;

        self.hydrate(rows).await
    }

    async fn add_trait(&self, id: LeaderId, trait_id: TraitId) -> Result<bool, RepoError> {
        self.link(TRAITS, id, trait_id.as_i64()).await
    }

    async fn remove_trait(&self, id: LeaderId, trait_id: TraitId) -> Result<bool, RepoError> {
        self.unlink(TRAITS, id, trait_id.as_i64()).await
    }

    async fn add_flaw(&self, id: LeaderId, flaw_id: FlawId) -> Result<bool, RepoError> {
        self.link(FLAWS, id, flaw_id.as_i64()).await
    }

    async fn remove_flaw(&self, id: LeaderId, flaw_id: FlawId) -> Result<bool, RepoError> {
        self.unlink(FLAWS, id, flaw_id.as_i64()).await
    }
}
