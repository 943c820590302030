//! Listing vocabulary shared by every admin list: search, sort, column
//! filters and pagination.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Rows per page when a request does not say otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound on a requested page size.
pub const MAX_PAGE_SIZE: u32 = 500;

/// A column of an entity list that can be searched, sorted or filtered.
pub trait ListColumn: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Every column of the entity, in display order.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse_column(value: &str) -> Result<Self, DomainError> {
        let value = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|column| column.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| DomainError::parse(format!("Unknown column: {}", value)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CivilizationColumn {
    Name,
    Description,
}

impl ListColumn for CivilizationColumn {
    const ALL: &'static [Self] = &[Self::Name, Self::Description];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
        }
    }
}

/// Leader columns. `Civilization` compares on the civilization's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaderColumn {
    Name,
    Description,
    Civilization,
}

impl ListColumn for LeaderColumn {
    const ALL: &'static [Self] = &[Self::Name, Self::Description, Self::Civilization];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Civilization => "civilization",
        }
    }
}

/// Traits and flaws only carry a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagColumn {
    Name,
}

impl ListColumn for TagColumn {
    const ALL: &'static [Self] = &[Self::Name];

    fn as_str(&self) -> &'static str {
        "name"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(DomainError::parse(format!("Unknown sort order: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    Equals,
    NotEquals,
    Contains,
    NotContains,
}

impl FilterOp {
    pub const ALL: &'static [FilterOp] = &[
        Self::Equals,
        Self::NotEquals,
        Self::Contains,
        Self::NotContains,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
        }
    }
}

impl FromStr for FilterOp {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equals" | "eq" => Ok(Self::Equals),
            "not_equals" | "ne" => Ok(Self::NotEquals),
            "contains" | "like" => Ok(Self::Contains),
            "not_contains" | "not_like" => Ok(Self::NotContains),
            other => Err(DomainError::parse(format!(
                "Unknown filter operation: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter<C> {
    pub column: C,
    pub op: FilterOp,
    pub value: String,
}

/// A typed list request. Pages are zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<C> {
    /// Whitespace-separated search words. Every word must match at least one
    /// search column.
    pub search_terms: Vec<String>,
    /// Columns the search terms are matched against; empty means every column.
    pub search_columns: Vec<C>,
    pub sort: Option<(C, SortOrder)>,
    pub filters: Vec<ColumnFilter<C>>,
    pub page: u32,
    pub page_size: u32,
}

impl<C> Default for ListQuery<C> {
    fn default() -> Self {
        Self {
            search_terms: Vec::new(),
            search_columns: Vec::new(),
            sort: None,
            filters: Vec::new(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl<C> ListQuery<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits `search` on whitespace; a blank search matches everything.
    pub fn with_search(mut self, search: impl AsRef<str>) -> Self {
        self.search_terms = search
            .as_ref()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        self
    }

    pub fn search_in(mut self, columns: impl IntoIterator<Item = C>) -> Self {
        self.search_columns = columns.into_iter().collect();
        self
    }

    pub fn sorted_by(mut self, column: C, order: SortOrder) -> Self {
        self.sort = Some((column, order));
        self
    }

    pub fn with_filter(mut self, column: C, op: FilterOp, value: impl Into<String>) -> Self {
        self.filters.push(ColumnFilter {
            column,
            op,
            value: value.into(),
        });
        self
    }

    /// Page size is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn paged(mut self, page: u32, page_size: u32) -> Self {
        self.page = page;
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn limit(&self) -> u32 {
        self.page_size
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.page_size)
    }
}

impl<C: ListColumn> ListQuery<C> {
    pub fn effective_search_columns(&self) -> &[C] {
        if self.search_columns.is_empty() {
            C::ALL
        } else {
            &self.search_columns
        }
    }
}

/// One page of a list together with the unpaged total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn page_count(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.page_size))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}
