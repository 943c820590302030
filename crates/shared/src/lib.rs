//! civ-modmaker Shared - wire types for the admin API
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde and chrono
//! 2. **No business logic** - Pure data types and serialization
//! 3. **No domain IDs** - use raw `i64` keys in DTOs

pub mod requests;
pub mod responses;

pub use requests::{
    CreateCivilizationData, CreateLeaderData, RenameResourceData, TagData, UpdateCivilizationData,
    UpdateLeaderData,
};

pub use responses::{
    AdminData, CivilizationData, ErrorCode, ErrorData, FilterData, LeaderData, NamedRefData,
    PageData, ResourceEntryData, ResourceListingData, ViewData, ViewKindData,
};
