//! API layer - HTTP entry points.

pub mod http;

mod civilizations;
mod leaders;
mod list_params;
mod resources;
mod tags;


pub use http::ApiError;
