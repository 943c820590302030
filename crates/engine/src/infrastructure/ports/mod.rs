//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for database access (could swap SQLite -> Postgres) and so use
//! cases can be tested against mocks.

mod error;
mod repos;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{CivilizationRepo, FlawRepo, LeaderRepo, TraitRepo};

// =============================================================================
// Test-Only Mock Repositories (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockCivilizationRepo, MockFlawRepo, MockLeaderRepo, MockTraitRepo};

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;
