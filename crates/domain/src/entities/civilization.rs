//! Civilization entity - top-level grouping that leaders belong to

use std::fmt;

use crate::ids::CivilizationId;
use crate::value_objects::{CivilizationName, Description};

/// A playable civilization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Civilization {
    pub id: CivilizationId,
    /// Globally unique
    pub name: CivilizationName,
    pub description: Option<Description>,
}

impl Civilization {
    pub fn from_parts(
        id: CivilizationId,
        name: CivilizationName,
        description: Option<Description>,
    ) -> Self {
        Self {
            id,
            name,
            description,
        }
    }
}

impl fmt::Display for Civilization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A civilization that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCivilization {
    pub name: CivilizationName,
    pub description: Option<Description>,
}

impl NewCivilization {
    pub fn new(name: CivilizationName) -> Self {
        Self {
            name,
            description: None,
        }
    }

    pub fn with_description(mut self, description: Description) -> Self {
        self.description = Some(description);
        self
    }

    /// Attach the key assigned by the store.
    pub fn into_civilization(self, id: CivilizationId) -> Civilization {
        Civilization::from_parts(id, self.name, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_name() {
        let civ = NewCivilization::new(CivilizationName::new("Rome").unwrap())
            .with_description(Description::new("The Roman Empire").unwrap())
            .into_civilization(CivilizationId::new(1));
        assert_eq!(civ.to_string(), "Rome");
        assert_eq!(
            civ.description.as_ref().map(Description::as_str),
            Some("The Roman Empire")
        );
    }
}
