//! Value objects - validated names, list vocabulary and referential policy.

mod delete_policy;
mod list_query;
mod names;

pub use delete_policy::CivilizationDeletePolicy;
pub use list_query::{
    CivilizationColumn, ColumnFilter, FilterOp, LeaderColumn, ListColumn, ListQuery, Page,
    SortOrder, TagColumn, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use names::{CivilizationName, Description, FlawName, LeaderName, TraitName};
