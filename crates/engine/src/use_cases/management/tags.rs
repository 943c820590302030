//! Trait and Flaw CRUD operations.

use std::sync::Arc;

use modmaker_domain::{
    Flaw, FlawId, FlawName, ListQuery, Page, TagColumn, Trait, TraitId, TraitName,
};

use crate::infrastructure::ports::{FlawRepo, TraitRepo};

use super::ManagementError;

// =============================================================================
// Trait CRUD
// =============================================================================

pub struct TraitCrud {
    traits: Arc<dyn TraitRepo>,
}

impl TraitCrud {
    pub fn new(traits: Arc<dyn TraitRepo>) -> Self {
        Self { traits }
    }

    pub async fn list(&self, query: &ListQuery<TagColumn>) -> Result<Page<Trait>, ManagementError> {
        Ok(self.traits.list(query).await?)
    }

    pub async fn get(&self, id: TraitId) -> Result<Option<Trait>, ManagementError> {
        Ok(self.traits.get(id).await?)
    }

    pub async fn create(&self, name: String) -> Result<Trait, ManagementError> {
        let created = self.traits.insert(&TraitName::new(name)?).await?;
        tracing::info!(trait_id = %created.id, name = %created.name, "Trait created");
        Ok(created)
    }

    pub async fn rename(&self, id: TraitId, name: String) -> Result<Trait, ManagementError> {
        let name = TraitName::new(name)?;
        let mut item = self.traits.get(id).await?.ok_or(ManagementError::NotFound)?;
        item.name = name;
        self.traits.rename(&item).await?;
        Ok(item)
    }

    /// Leaders holding the trait lose it.
    pub async fn delete(&self, id: TraitId) -> Result<(), ManagementError> {
        self.traits.delete(id).await?;
        tracing::info!(trait_id = %id, "Trait deleted");
        Ok(())
    }
}

// =============================================================================
// Flaw CRUD
// =============================================================================

pub struct FlawCrud {
    flaws: Arc<dyn FlawRepo>,
}

impl FlawCrud {
    pub fn new(flaws: Arc<dyn FlawRepo>) -> Self {
        Self { flaws }
    }

    pub async fn list(&self, query: &ListQuery<TagColumn>) -> Result<Page<Flaw>, ManagementError> {
        Ok(self.flaws.list(query).await?)
    }

    pub async fn get(&self, id: FlawId) -> Result<Option<Flaw>, ManagementError> {
        Ok(self.flaws.get(id).await?)
    }

    pub async fn create(&self, name: String) -> Result<Flaw, ManagementError> {
        let created = self.flaws.insert(&FlawName::new(name)?).await?;
        tracing::info!(flaw_id = %created.id, name = %created.name, "Flaw created");
        Ok(created)
    }

    pub async fn rename(&self, id: FlawId, name: String) -> Result<Flaw, ManagementError> {
        let name = FlawName::new(name)?;
        let mut item = self.flaws.get(id).await?.ok_or(ManagementError::NotFound)?;
        item.name = name;
        self.flaws.rename(&item).await?;
        Ok(item)
    }

    /// Leaders holding the flaw lose it.
    pub async fn delete(&self, id: FlawId) -> Result<(), ManagementError> {
        self.flaws.delete(id).await?;
        tracing::info!(flaw_id = %id, "Flaw deleted");
        Ok(())
    }
}
