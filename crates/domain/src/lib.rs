//! civ-modmaker domain: civilizations, leaders and the traits and flaws
//! attached to them, plus the vocabulary used to list them.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{Civilization, Flaw, Leader, NewCivilization, NewLeader, Trait};

pub use error::DomainError;

pub use ids::{CivilizationId, FlawId, LeaderId, TraitId};

pub use value_objects::{
    CivilizationColumn, CivilizationDeletePolicy, CivilizationName, ColumnFilter, Description,
    FilterOp, FlawName, LeaderColumn, LeaderName, ListColumn, ListQuery, Page, SortOrder,
    TagColumn, TraitName, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
