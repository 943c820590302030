//! Repository port traits for database access.

use async_trait::async_trait;
use modmaker_domain::{
    Civilization, CivilizationColumn, CivilizationDeletePolicy, CivilizationId, Flaw, FlawId,
    FlawName, Leader, LeaderColumn, LeaderId, ListQuery, NewCivilization, NewLeader, Page,
    TagColumn, Trait, TraitId, TraitName,
};

use super::error::RepoError;

// =============================================================================
// Database Ports (one per entity type)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CivilizationRepo: Send + Sync {
    async fn get(&self, id: CivilizationId) -> Result<Option<Civilization>, RepoError>;
    async fn insert(&self, civilization: &NewCivilization) -> Result<Civilization, RepoError>;
    async fn update(&self, civilization: &Civilization) -> Result<(), RepoError>;
    /// Removes the civilization, handling referencing leaders per `policy`.
    async fn delete(
        &self,
        id: CivilizationId,
        policy: CivilizationDeletePolicy,
    ) -> Result<(), RepoError>;
    async fn list(
        &self,
        query: &ListQuery<CivilizationColumn>,
    ) -> Result<Page<Civilization>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaderRepo: Send + Sync {
    async fn get(&self, id: LeaderId) -> Result<Option<Leader>, RepoError>;
    async fn insert(&self, leader: &NewLeader) -> Result<Leader, RepoError>;
    /// Saves scalar fields and replaces both association sets.
    async fn update(&self, leader: &Leader) -> Result<(), RepoError>;
    async fn delete(&self, id: LeaderId) -> Result<(), RepoError>;
    async fn list(&self, query: &ListQuery<LeaderColumn>) -> Result<Page<Leader>, RepoError>;
    async fn list_in_civilization(
        &self,
        civilization_id: CivilizationId,
    ) -> Result<Vec<Leader>, RepoError>;

    // Associations. Each returns whether the set changed.
    async fn add_trait(&self, id: LeaderId, trait_id: TraitId) -> Result<bool, RepoError>;
    async fn remove_trait(&self, id: LeaderId, trait_id: TraitId) -> Result<bool, RepoError>;
    async fn add_flaw(&self, id: LeaderId, flaw_id: FlawId) -> Result<bool, RepoError>;
    async fn remove_flaw(&self, id: LeaderId, flaw_id: FlawId) -> Result<bool, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TraitRepo: Send + Sync {
    async fn get(&self, id: TraitId) -> Result<Option<Trait>, RepoError>;
    /// Missing ids are skipped; results are ordered by name.
    async fn get_many(&self, ids: &[TraitId]) -> Result<Vec<Trait>, RepoError>;
    async fn insert(&self, name: &TraitName) -> Result<Trait, RepoError>;
    async fn rename(&self, item: &Trait) -> Result<(), RepoError>;
    /// Also drops the trait from every leader holding it.
    async fn delete(&self, id: TraitId) -> Result<(), RepoError>;
    async fn list(&self, query: &ListQuery<TagColumn>) -> Result<Page<Trait>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FlawRepo: Send + Sync {
    async fn get(&self, id: FlawId) -> Result<Option<Flaw>, RepoError>;
    /// Missing ids are skipped; results are ordered by name.
    async fn get_many(&self, ids: &[FlawId]) -> Result<Vec<Flaw>, RepoError>;
    async fn insert(&self, name: &FlawName) -> Result<Flaw, RepoError>;
    async fn rename(&self, item: &Flaw) -> Result<(), RepoError>;
    /// Also drops the flaw from every leader holding it.
    async fn delete(&self, id: FlawId) -> Result<(), RepoError>;
    async fn list(&self, query: &ListQuery<TagColumn>) -> Result<Page<Flaw>, RepoError>;
}
