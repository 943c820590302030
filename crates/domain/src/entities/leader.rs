//! Leader entity - a named ruler with an optional civilization and
//! sets of traits and flaws
//!
//! Traits and flaws are held as id sets, so associating the same trait twice
//! is a no-op rather than a duplicate row.

use std::collections::BTreeSet;
use std::fmt;

use crate::ids::{CivilizationId, FlawId, LeaderId, TraitId};
use crate::value_objects::{Description, LeaderName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leader {
    pub id: LeaderId,
    /// Globally unique
    pub name: LeaderName,
    pub description: Option<Description>,
    /// A leader belongs to at most one civilization
    pub civilization_id: Option<CivilizationId>,
    pub traits: BTreeSet<TraitId>,
    pub flaws: BTreeSet<FlawId>,
}

impl Leader {
    pub fn from_parts(
        id: LeaderId,
        name: LeaderName,
        description: Option<Description>,
        civilization_id: Option<CivilizationId>,
        traits: BTreeSet<TraitId>,
        flaws: BTreeSet<FlawId>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            civilization_id,
            traits,
            flaws,
        }
    }

    /// Returns `true` if the trait was not already held.
    pub fn add_trait(&mut self, trait_id: TraitId) -> bool {
        self.traits.insert(trait_id)
    }

    /// Returns `true` if the trait was held.
    pub fn remove_trait(&mut self, trait_id: TraitId) -> bool {
        self.traits.remove(&trait_id)
    }

    /// Returns `true` if the flaw was not already held.
    pub fn add_flaw(&mut self, flaw_id: FlawId) -> bool {
        self.flaws.insert(flaw_id)
    }

    /// Returns `true` if the flaw was held.
    pub fn remove_flaw(&mut self, flaw_id: FlawId) -> bool {
        self.flaws.remove(&flaw_id)
    }
}

impl fmt::Display for Leader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A leader that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLeader {
    pub name: LeaderName,
    pub description: Option<Description>,
    pub civilization_id: Option<CivilizationId>,
    pub traits: BTreeSet<TraitId>,
    pub flaws: BTreeSet<FlawId>,
}

impl NewLeader {
    pub fn new(name: LeaderName) -> Self {
        Self {
            name,
            description: None,
            civilization_id: None,
            traits: BTreeSet::new(),
            flaws: BTreeSet::new(),
        }
    }

    pub fn with_description(mut self, description: Description) -> Self {
        self.description = Some(description);
        self
    }

    pub fn in_civilization(mut self, civilization_id: CivilizationId) -> Self {
        self.civilization_id = Some(civilization_id);
        self
    }

    pub fn with_traits(mut self, traits: impl IntoIterator<Item = TraitId>) -> Self {
        self.traits.extend(traits);
        self
    }

    pub fn with_flaws(mut self, flaws: impl IntoIterator<Item = FlawId>) -> Self {
        self.flaws.extend(flaws);
        self
    }

    /// Attach the key assigned by the store.
    pub fn into_leader(self, id: LeaderId) -> Leader {
        Leader::from_parts(
            id,
            self.name,
            self.description,
            self.civilization_id,
            self.traits,
            self.flaws,
        )
    }
}
