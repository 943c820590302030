//! Civilization CRUD operations.

use std::sync::Arc;

use modmaker_domain::{
    Civilization, CivilizationColumn, CivilizationDeletePolicy, CivilizationId, CivilizationName,
    Description, Leader, ListQuery, NewCivilization, Page,
};

use crate::infrastructure::ports::{CivilizationRepo, LeaderRepo};

use super::ManagementError;

pub struct CivilizationCrud {
    civilizations: Arc<dyn CivilizationRepo>,
    leaders: Arc<dyn LeaderRepo>,
    delete_policy: CivilizationDeletePolicy,
}

impl CivilizationCrud {
    pub fn new(
        civilizations: Arc<dyn CivilizationRepo>,
        leaders: Arc<dyn LeaderRepo>,
        delete_policy: CivilizationDeletePolicy,
    ) -> Self {
        Self {
            civilizations,
            leaders,
            delete_policy,
        }
    }

    pub async fn list(
        &self,
        query: &ListQuery<CivilizationColumn>,
    ) -> Result<Page<Civilization>, ManagementError> {
        Ok(self.civilizations.list(query).await?)
    }

    pub async fn get(&self, id: CivilizationId) -> Result<Option<Civilization>, ManagementError> {
        Ok(self.civilizations.get(id).await?)
    }

    /// Leaders that belong to the civilization, ordered by name.
    pub async fn leaders(&self, id: CivilizationId) -> Result<Vec<Leader>, ManagementError> {
        self.civilizations
            .get(id)
            .await?
            .ok_or(ManagementError::NotFound)?;
        Ok(self.leaders.list_in_civilization(id).await?)
    }

    pub async fn create(
        &self,
        name: String,
        description: Option<String>,
    ) -> Result<Civilization, ManagementError> {
        let mut civilization = NewCivilization::new(CivilizationName::new(name)?);
        if let Some(description) = Description::optional(description)? {
            civilization = civilization.with_description(description);
        }

        let created = self.civilizations.insert(&civilization).await?;
        tracing::info!(civilization_id = %created.id, name = %created.name, "Civilization created");
        Ok(created)
    }

    /// Absent fields are kept; a blank description clears it.
    pub async fn update(
        &self,
        id: CivilizationId,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Civilization, ManagementError> {
        let mut civilization = self
            .civilizations
            .get(id)
            .await?
            .ok_or(ManagementError::NotFound)?;

        if let Some(name) = name {
            civilization.name = CivilizationName::new(name)?;
        }
        if let Some(description) = description {
            civilization.description = Description::optional(Some(description))?;
        }

        self.civilizations.update(&civilization).await?;
        Ok(civilization)
    }

    /// Applies the configured policy to leaders that still reference it.
    pub async fn delete(&self, id: CivilizationId) -> Result<(), ManagementError> {
        self.civilizations.delete(id, self.delete_policy).await?;
        tracing::info!(civilization_id = %id, policy = %self.delete_policy, "Civilization deleted");
        Ok(())
    }
}
