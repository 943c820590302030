//! Domain entities

mod civilization;
mod leader;
mod tags;

pub use civilization::{Civilization, NewCivilization};
pub use leader::{Leader, NewLeader};
pub use tags::{Flaw, Trait};
