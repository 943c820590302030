//! SQLite trait and flaw repositories.
//!
//! Both tables have the same shape (`id`, unique `name`), so the SQL lives in
//! one `TagTable` and the two repositories only convert rows.

use async_trait::async_trait;
use modmaker_domain::{
    Flaw, FlawId, FlawName, ListQuery, Page, TagColumn, Trait, TraitId, TraitName,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::query_helpers::{into_page, map_write_error, push_conditions, push_order_and_page};
use crate::infrastructure::ports::{FlawRepo, RepoError, TraitRepo};

type TagRow = (i64, String);

fn column_sql(column: TagColumn) -> &'static str {
    match column {
        TagColumn::Name => "t.name",
    }
}

struct TagTable {
    pool: SqlitePool,
    table: &'static str,
    entity_type: &'static str,
}

impl TagTable {
    async fn get(&self, id: i64) -> Result<Option<TagRow>, RepoError> {
        sqlx::query_as(&format!("SELECT id, name FROM {} WHERE id = ?", self.table))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("tag.get", e))
    }

    async fn get_many(&self, ids: &[i64]) -> Result<Vec<TagRow>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT id, name FROM {} WHERE id IN (",
            self.table
        ));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY name COLLATE NOCASE, id");

        builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("tag.get_many", e))
    }

    async fn insert(&self, name: &str) -> Result<i64, RepoError> {
        let result = sqlx::query(&format!("INSERT INTO {} (name) VALUES (?)", self.table))
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "tag.insert", self.entity_type, name))?;
        let id = result.last_insert_rowid();
        tracing::debug!(table = self.table, id, name, "Tag created");
        Ok(id)
    }

    async fn rename(&self, id: i64, name: &str) -> Result<(), RepoError> {
        let result = sqlx::query(&format!("UPDATE {} SET name = ? WHERE id = ?", self.table))
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "tag.rename", self.entity_type, name))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found(self.entity_type, id));
        }
        Ok(())
    }

    /// Join rows go with the tag through `ON DELETE CASCADE`.
    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = ?", self.table))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("tag.delete", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found(self.entity_type, id));
        }
        tracing::debug!(table = self.table, id, "Tag deleted");
        Ok(())
    }

    async fn list(&self, query: &ListQuery<TagColumn>) -> Result<(Vec<TagRow>, i64), RepoError> {
        let mut count =
            QueryBuilder::<Sqlite>::new(format!("SELECT COUNT(*) FROM {} t", self.table));
        push_conditions(&mut count, query, column_sql);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("tag.list", e))?;

        let mut select =
            QueryBuilder::<Sqlite>::new(format!("SELECT t.id, t.name FROM {} t", self.table));
        push_conditions(&mut select, query, column_sql);
        push_order_and_page(&mut select, query, column_sql, "t.id");
        let rows: Vec<TagRow> = select
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("tag.list", e))?;

        Ok((rows, total))
    }
}

fn row_to_trait((id, name): TagRow) -> Result<Trait, RepoError> {
    let name = TraitName::new(name).map_err(|e| RepoError::database("decode", e))?;
    Ok(Trait::new(TraitId::new(id), name))
}

fn row_to_flaw((id, name): TagRow) -> Result<Flaw, RepoError> {
    let name = FlawName::new(name).map_err(|e| RepoError::database("decode", e))?;
    Ok(Flaw::new(FlawId::new(id), name))
}

// =============================================================================
// Traits
// =============================================================================

/// Repository for Trait operations.
pub struct SqliteTraitRepo {
    table: TagTable,
}

impl SqliteTraitRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            table: TagTable {
                pool,
                table: "trait",
                entity_type: "Trait",
            },
        }
    }
}

#[async_trait]
impl TraitRepo for SqliteTraitRepo {
    async fn get(&self, id: TraitId) -> Result<Option<Trait>, RepoError> {
        self.table.get(id.as_i64()).await?.map(row_to_trait).transpose()
    }

    async fn get_many(&self, ids: &[TraitId]) -> Result<Vec<Trait>, RepoError> {
        let ids: Vec<i64> = ids.iter().map(|id| id.as_i64()).collect();
        self.table
            .get_many(&ids)
            .await?
            .into_iter()
            .map(row_to_trait)
            .collect()
    }

    async fn insert(&self, name: &TraitName) -> Result<Trait, RepoError> {
        let id = self.table.insert(name.as_str()).await?;
        Ok(Trait::new(TraitId::new(id), name.clone()))
    }

    async fn rename(&self, item: &Trait) -> Result<(), RepoError> {
        self.table.rename(item.id.as_i64(), item.name.as_str()).await
    }

    async fn delete(&self, id: TraitId) -> Result<(), RepoError> {
        self.table.delete(id.as_i64()).await
    }

    async fn list(&self, query: &ListQuery<TagColumn>) -> Result<Page<Trait>, RepoError> {
        let (rows, total) = self.table.list(query).await?;
        let items = rows
            .into_iter()
            .map(row_to_trait)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(into_page(items, total, query))
    }
}

// =============================================================================
// Flaws
// =============================================================================

/// Repository for Flaw operations.
pub struct SqliteFlawRepo {
    table: TagTable,
}

impl SqliteFlawRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            table: TagTable {
                pool,
                table: "flaw",
                entity_type: "Flaw",
            },
        }
    }
}

#[async_trait]
impl FlawRepo for SqliteFlawRepo {
    async fn get(&self, id: FlawId) -> Result<Option<Flaw>, RepoError> {
        self.table.get(id.as_i64()).await?.map(row_to_flaw).transpose()
    }

    async fn get_many(&self, ids: &[FlawId]) -> Result<Vec<Flaw>, RepoError> {
        let ids: Vec<i64> = ids.iter().map(|id| id.as_i64()).collect();
        self.table
            .get_many(&ids)
            .await?
            .into_iter()
            .map(row_to_flaw)
            .collect()
    }

    async fn insert(&self, name: &FlawName) -> Result<Flaw, RepoError> {
        let id = self.table.insert(name.as_str()).await?;
        Ok(Flaw::new(FlawId::new(id), name.clone()))
    }

    async fn rename(&self, item: &Flaw) -> Result<(), RepoError> {
        self.table.rename(item.id.as_i64(), item.name.as_str()).await
    }

    async fn delete(&self, id: FlawId) -> Result<(), RepoError> {
        self.table.delete(id.as_i64()).await
    }

    async fn list(&self, query: &ListQuery<TagColumn>) -> Result<Page<Flaw>, RepoError> {
        let (rows, total) = self.table.list(query).await?;
        let items = rows
            .into_iter()
            .map(row_to_flaw)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(into_page(items, total, query))
    }
}
