//! What happens to leaders when their civilization is deleted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Referential policy applied when deleting a civilization that leaders still
/// point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CivilizationDeletePolicy {
    /// Refuse the delete while any leader references the civilization.
    #[default]
    Restrict,
    /// Delete the referencing leaders together with the civilization.
    Cascade,
    /// Keep the leaders and clear their civilization reference.
    Detach,
}

impl CivilizationDeletePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Restrict => "restrict",
            Self::Cascade => "cascade",
            Self::Detach => "detach",
        }
    }
}

impl fmt::Display for CivilizationDeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CivilizationDeletePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "restrict" => Ok(Self::Restrict),
            "cascade" => Ok(Self::Cascade),
            "detach" | "set_null" => Ok(Self::Detach),
            other => Err(DomainError::parse(format!(
                "Unknown civilization delete policy: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_restrict() {
        assert_eq!(
            CivilizationDeletePolicy::default(),
            CivilizationDeletePolicy::Restrict
        );
    }

    #[test]
    fn parses_known_policies() {
        assert_eq!(
            "Cascade".parse::<CivilizationDeletePolicy>().unwrap(),
            CivilizationDeletePolicy::Cascade
        );
        assert_eq!(
            "set_null".parse::<CivilizationDeletePolicy>().unwrap(),
            CivilizationDeletePolicy::Detach
        );
        assert!("orphan".parse::<CivilizationDeletePolicy>().is_err());
    }
}
