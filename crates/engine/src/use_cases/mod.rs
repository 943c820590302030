//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across repositories to fulfill user stories.

pub mod management;
pub mod validation;

pub use management::ManagementUseCases;
