//! Trait and Flaw - reusable named tags shared by many leaders

use std::fmt;

use crate::ids::{FlawId, TraitId};
use crate::value_objects::{FlawName, TraitName};

/// A named leader characteristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trait {
    pub id: TraitId,
    pub name: TraitName,
}

impl Trait {
    pub fn new(id: TraitId, name: TraitName) -> Self {
        Self { id, name }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A named leader weakness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flaw {
    pub id: FlawId,
    pub name: FlawName,
}

impl Flaw {
    pub fn new(id: FlawId, name: FlawName) -> Self {
        Self { id, name }
    }
}

impl fmt::Display for Flaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
