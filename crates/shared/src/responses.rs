//! Response types returned by the admin API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Error Body
// =============================================================================

/// Error classification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // === Client Errors (4xx) ===
    /// Request was malformed or invalid
    BadRequest,
    /// Requested resource not found
    NotFound,
    /// Operation conflicts with current state (duplicate name, restricted delete)
    Conflict,
    /// Request data failed validation
    ValidationError,

    // === Server Errors (5xx) ===
    /// Internal server error
    InternalError,
    /// The route exists but has no behavior yet
    NotImplemented,

    /// Unknown variant for forward compatibility
    #[serde(other)]
    Unknown,
}

/// JSON body of every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorData {
    pub code: ErrorCode,
    pub message: String,
}

// =============================================================================
// Entities
// =============================================================================

/// An entity reference rendered by its display name. Used for traits, flaws
/// and the civilization a leader belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRefData {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivilizationData {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderData {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub civilization: Option<NamedRefData>,
    /// Sorted by name
    #[serde(default)]
    pub traits: Vec<NamedRefData>,
    /// Sorted by name
    #[serde(default)]
    pub flaws: Vec<NamedRefData>,
}

/// One page of a list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageData<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub page_count: u64,
}

// =============================================================================
// Admin Views
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminData {
    pub title: String,
    pub views: Vec<ViewData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewData {
    pub name: String,
    pub category: String,
    pub endpoint: String,
    #[serde(flatten)]
    pub kind: ViewKindData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewKindData {
    Model {
        entity: String,
        sortable: Vec<String>,
        searchable: Vec<String>,
        filters: Vec<FilterData>,
    },
    Export,
    Files {
        root: String,
    },
}

/// A filterable column and the operations it accepts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterData {
    pub column: String,
    pub operations: Vec<String>,
}

// =============================================================================
// Resources
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEntryData {
    pub name: String,
    /// Relative to the resource root, `/`-separated
    pub path: String,
    pub is_dir: bool,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceListingData {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub entries: Vec<ResourceEntryData>,
}
