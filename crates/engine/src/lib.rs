//! civ-modmaker Engine library.
//!
//! Admin API server over the civilization/leader data.
//!
//! ## Structure
//!
//! - `use_cases/` - CRUD orchestration over the repository ports
//! - `infrastructure/` - Ports, SQLite adapters, resource store, configuration
//! - `admin` - Admin view registry and list-request validation
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod admin;
pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
