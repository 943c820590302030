//! Management use cases for CRUD-style operations.
//!
//! These use cases keep HTTP handlers thin while coordinating the repositories.

mod civilization;
mod leader;
mod tags;

use modmaker_domain::DomainError;

use crate::infrastructure::ports::RepoError;
use crate::use_cases::validation::ValidationError;

pub use civilization::CivilizationCrud;
pub use leader::{LeaderChanges, LeaderCrud, LeaderView};
pub use tags::{FlawCrud, TraitCrud};

/// Shared error type for management use cases.
#[derive(Debug, thiserror::Error)]
pub enum ManagementError {
    #[error("Not found")]
    NotFound,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Duplicate name or a delete blocked by references.
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Repository error: {0}")]
    Repo(RepoError),
}

impl From<RepoError> for ManagementError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { .. } => Self::NotFound,
            RepoError::UniqueViolation { .. } => Self::Conflict(err.to_string()),
            RepoError::ConstraintViolation(message) => Self::Conflict(message),
            RepoError::Database { .. } => Self::Repo(err),
        }
    }
}

impl From<DomainError> for ManagementError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(message) => Self::InvalidInput(message),
            other => Self::InvalidInput(other.to_string()),
        }
    }
}

impl From<ValidationError> for ManagementError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

/// Container for management use cases.
pub struct ManagementUseCases {
    pub civilization: CivilizationCrud,
    pub leader: LeaderCrud,
    pub traits: TraitCrud,
    pub flaws: FlawCrud,
}

impl ManagementUseCases {
    pub fn new(
        civilization: CivilizationCrud,
        leader: LeaderCrud,
        traits: TraitCrud,
        flaws: FlawCrud,
    ) -> Self {
        Self {
            civilization,
            leader,
            traits,
            flaws,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_errors_are_classified() {
        assert!(matches!(
            ManagementError::from(RepoError::not_found("Leader", 3)),
            ManagementError::NotFound
        ));

        let err = ManagementError::from(RepoError::unique("Civilization", "name", "Rome"));
        match err {
            ManagementError::Conflict(message) => {
                assert_eq!(message, "Civilization with name 'Rome' already exists")
            }
            other => panic!("unexpected: {other:?}"),
        }

        assert!(matches!(
            ManagementError::from(RepoError::constraint("still referenced")),
            ManagementError::Conflict(_)
        ));
        assert!(matches!(
            ManagementError::from(RepoError::database("leader.list", "disk I/O error")),
            ManagementError::Repo(_)
        ));
    }

    #[test]
    fn validation_message_is_kept_verbatim() {
        let err = ManagementError::from(DomainError::validation("Leader name cannot be empty"));
        assert_eq!(err.to_string(), "Invalid input: Leader name cannot be empty");
    }
}
