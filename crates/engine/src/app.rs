//! Application state and composition.

use std::sync::Arc;

use modmaker_domain::CivilizationDeletePolicy;

use crate::admin::AdminRegistry;
use crate::infrastructure::{
    ports::{CivilizationRepo, FlawRepo, LeaderRepo, TraitRepo},
    resources::ResourceStore,
    sqlite::SqliteRepositories,
};
use crate::use_cases::management::{
    CivilizationCrud, FlawCrud, LeaderCrud, ManagementUseCases, TraitCrud,
};

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
    pub admin: AdminRegistry,
    pub resources: ResourceStore,
}

/// Repository ports the use cases are built from.
pub struct Repositories {
    pub civilization: Arc<dyn CivilizationRepo>,
    pub leader: Arc<dyn LeaderRepo>,
    pub traits: Arc<dyn TraitRepo>,
    pub flaws: Arc<dyn FlawRepo>,
}

impl From<SqliteRepositories> for Repositories {
    fn from(repos: SqliteRepositories) -> Self {
        Self {
            civilization: repos.civilization,
            leader: repos.leader,
            traits: repos.traits,
            flaws: repos.flaws,
        }
    }
}

/// Container for all use cases.
pub struct UseCases {
    pub management: ManagementUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        repositories: Repositories,
        admin: AdminRegistry,
        resources: ResourceStore,
        delete_policy: CivilizationDeletePolicy,
    ) -> Self {
        let management = ManagementUseCases::new(
            CivilizationCrud::new(
                repositories.civilization.clone(),
                repositories.leader.clone(),
                delete_policy,
            ),
            LeaderCrud::new(
                repositories.leader.clone(),
                repositories.civilization.clone(),
                repositories.traits.clone(),
                repositories.flaws.clone(),
            ),
            TraitCrud::new(repositories.traits.clone()),
            FlawCrud::new(repositories.flaws.clone()),
        );

        Self {
            use_cases: UseCases { management },
            admin,
            resources,
        }
    }
}
