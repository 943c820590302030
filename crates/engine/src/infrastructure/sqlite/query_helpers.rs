//! Shared SQL building for list queries and error mapping.
//!
//! Column expressions come from per-repository `&'static str` tables; only
//! user-supplied values are ever bound.

use modmaker_domain::{FilterOp, ListColumn, ListQuery, Page, SortOrder};
use sqlx::{QueryBuilder, Sqlite};

use crate::infrastructure::ports::RepoError;

/// Append ` WHERE ...` for the query's search terms and column filters.
///
/// Each term must match at least one search column.
pub(super) fn push_conditions<C: ListColumn>(
    builder: &mut QueryBuilder<'_, Sqlite>,
    query: &ListQuery<C>,
    column_sql: fn(C) -> &'static str,
) {
    builder.push(" WHERE 1 = 1");

    for term in &query.search_terms {
        let pattern = like_pattern(term);
        builder.push(" AND (");
        for (i, column) in query.effective_search_columns().iter().enumerate() {
            if i > 0 {
                builder.push(" OR ");
            }
            builder
                .push(column_sql(*column))
                .push(" LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\'");
        }
        builder.push(")");
    }

    for filter in &query.filters {
        // NULL compares as empty text so negated filters keep rows without a value.
        builder
            .push(" AND COALESCE(")
            .push(column_sql(filter.column))
            .push(", '')");
        match filter.op {
            FilterOp::Equals => builder.push(" = ").push_bind(filter.value.clone()),
            FilterOp::NotEquals => builder.push(" <> ").push_bind(filter.value.clone()),
            FilterOp::Contains => builder
                .push(" LIKE ")
                .push_bind(like_pattern(&filter.value))
                .push(" ESCAPE '\\'"),
            FilterOp::NotContains => builder
                .push(" NOT LIKE ")
                .push_bind(like_pattern(&filter.value))
                .push(" ESCAPE '\\'"),
        };
    }
}

/// Append ` ORDER BY ... LIMIT ... OFFSET ...`. Rows are always tie-broken by
/// `id_sql` so paging is stable.
pub(super) fn push_order_and_page<C: ListColumn>(
    builder: &mut QueryBuilder<'_, Sqlite>,
    query: &ListQuery<C>,
    column_sql: fn(C) -> &'static str,
    id_sql: &'static str,
) {
    builder.push(" ORDER BY ");
    if let Some((column, order)) = query.sort {
        builder
            .push(column_sql(column))
            .push(" COLLATE NOCASE")
            .push(match order {
                SortOrder::Ascending => " ASC",
                SortOrder::Descending => " DESC",
            })
            .push(", ");
    }
    builder.push(id_sql);

    builder
        .push(" LIMIT ")
        .push_bind(i64::from(query.limit()))
        .push(" OFFSET ")
        .push_bind(i64::try_from(query.offset()).unwrap_or(i64::MAX));
}

/// `%term%` with LIKE wildcards in `term` escaped.
pub(super) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

pub(super) fn into_page<C, T>(items: Vec<T>, total: i64, query: &ListQuery<C>) -> Page<T> {
    Page {
        items,
        total: u64::try_from(total).unwrap_or_default(),
        page: query.page,
        page_size: query.page_size,
    }
}

/// Map a failed INSERT/UPDATE. Every unique column in the schema is `name`.
pub(super) fn map_write_error(
    err: sqlx::Error,
    operation: &'static str,
    entity_type: &'static str,
    name: &str,
) -> RepoError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return RepoError::unique(entity_type, "name", name);
        }
        if db.is_foreign_key_violation() {
            return RepoError::constraint(format!(
                "{} '{}' references a record that does not exist",
                entity_type, name
            ));
        }
    }
    RepoError::database(operation, err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use modmaker_domain::LeaderColumn;

    fn leader_sql(column: LeaderColumn) -> &'static str {
        match column {
            LeaderColumn::Name => "l.name",
            LeaderColumn::Description => "l.description",
            LeaderColumn::Civilization => "c.name",
        }
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
        assert_eq!(like_pattern("rome"), "%rome%");
    }

    #[test]
    fn builds_search_filter_and_order() {
        let query = ListQuery::new()
            .with_search("aug")
            .search_in([LeaderColumn::Name, LeaderColumn::Civilization])
            .with_filter(LeaderColumn::Civilization, FilterOp::Equals, "Rome")
            .sorted_by(LeaderColumn::Name, SortOrder::Descending);

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT l.id FROM leader l");
        push_conditions(&mut builder, &query, leader_sql);
        push_order_and_page(&mut builder, &query, leader_sql, "l.id");
        let sql = builder.sql();

        assert!(sql.contains("(l.name LIKE ? ESCAPE '\\' OR c.name LIKE ? ESCAPE '\\')"));
        assert!(sql.contains("AND COALESCE(c.name, '') = ?"));
        assert!(sql.contains("ORDER BY l.name COLLATE NOCASE DESC, l.id LIMIT ? OFFSET ?"));
    }

    #[test]
    fn each_search_word_gets_its_own_group() {
        let query = ListQuery::new()
            .with_search("augustus rome")
            .search_in([LeaderColumn::Name, LeaderColumn::Civilization]);

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM leader l");
        push_conditions(&mut builder, &query, leader_sql);
        let group = "(l.name LIKE ? ESCAPE '\\' OR c.name LIKE ? ESCAPE '\\')";

        assert_eq!(
            builder.sql(),
            format!("SELECT COUNT(*) FROM leader l WHERE 1 = 1 AND {group} AND {group}")
        );
    }
}
