//! Validated name newtypes for domain entities
//!
//! These newtypes ensure that names are valid by construction:
//! - Non-empty (except Description)
//! - Within the column width of the entity they name
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for description fields
const MAX_DESCRIPTION_LENGTH: usize = 5000;

macro_rules! define_name {
    ($(#[$meta:meta])* $name:ident, $label:literal, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Maximum length in characters.
            pub const MAX_LENGTH: usize = $max;

            /// Create a new validated name.
            ///
            /// # Errors
            ///
            /// Returns `DomainError::Validation` if the name is empty after
            /// trimming or longer than `MAX_LENGTH` characters.
            pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
                let name = name.into();
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::validation(concat!($label, " cannot be empty")));
                }
                if trimmed.chars().count() > Self::MAX_LENGTH {
                    return Err(DomainError::validation(format!(
                        concat!($label, " cannot exceed {} characters"),
                        Self::MAX_LENGTH
                    )));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = DomainError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(name: $name) -> String {
                name.0
            }
        }
    };
}

define_name!(
    /// A validated civilization name (non-empty, <=80 chars, trimmed)
    CivilizationName,
    "Civilization name",
    80
);

define_name!(
    /// A validated leader name (non-empty, <=120 chars, trimmed)
    LeaderName,
    "Leader name",
    120
);

define_name!(
    /// A validated trait name (non-empty, <=64 chars, trimmed)
    TraitName,
    "Trait name",
    64
);

define_name!(
    /// A validated flaw name (non-empty, <=64 chars, trimmed)
    FlawName,
    "Flaw name",
    64
);

// ============================================================================
// Description
// ============================================================================

/// A validated description (<=5000 chars, empty is valid)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    /// Create a new validated description.
    ///
    /// Empty strings are valid for descriptions.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the description exceeds 5000 characters.
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(DomainError::validation(format!(
                "Description cannot exceed {} characters",
                MAX_DESCRIPTION_LENGTH
            )));
        }
        Ok(Self(text))
    }

    /// Validates optional input, mapping blank text to `None`.
    pub fn optional(text: Option<String>) -> Result<Option<Self>, DomainError> {
        match text {
            Some(text) if text.trim().is_empty() => Ok(None),
            Some(text) => Self::new(text).map(Some),
            None => Ok(None),
        }
    }

    /// Returns the description as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Description {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Description> for String {
    fn from(description: Description) -> String {
        description.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod civilization_name {
        use super::*;

        #[test]
        fn valid_name() {
            let name = CivilizationName::new("Rome").unwrap();
            assert_eq!(name.as_str(), "Rome");
            assert_eq!(name.to_string(), "Rome");
        }

        #[test]
        fn empty_name_rejected() {
            let err = CivilizationName::new("").unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
            assert!(err.to_string().contains("Civilization name cannot be empty"));
        }

        #[test]
        fn whitespace_only_rejected() {
            assert!(CivilizationName::new("   ").is_err());
        }

        #[test]
        fn name_is_trimmed() {
            let name = CivilizationName::new("  Babylon  ").unwrap();
            assert_eq!(name.as_str(), "Babylon");
        }

        #[test]
        fn length_limit_counts_characters() {
            assert!(CivilizationName::new("é".repeat(80)).is_ok());
            let err = CivilizationName::new("a".repeat(81)).unwrap_err();
            assert!(err.to_string().contains("cannot exceed 80 characters"));
        }
    }

    mod leader_name {
        use super::*;

        #[test]
        fn allows_up_to_120_characters() {
            assert!(LeaderName::new("a".repeat(120)).is_ok());
            assert!(LeaderName::new("a".repeat(121)).is_err());
        }

        #[test]
        fn deserialization_validates() {
            let ok: LeaderName = serde_json::from_str("\" Augustus \"").unwrap();
            assert_eq!(ok.as_str(), "Augustus");
            assert!(serde_json::from_str::<LeaderName>("\"\"").is_err());
        }
    }

    mod tag_names {
        use super::*;

        #[test]
        fn trait_and_flaw_limits() {
            assert!(TraitName::new("a".repeat(64)).is_ok());
            assert!(TraitName::new("a".repeat(65)).is_err());
            let err = FlawName::new(" ").unwrap_err();
            assert!(err.to_string().contains("Flaw name"));
        }
    }

    mod description {
        use super::*;

        #[test]
        fn empty_is_valid() {
            assert!(Description::new("").is_ok());
        }

        #[test]
        fn optional_maps_blank_to_none() {
            assert_eq!(Description::optional(Some("  ".into())).unwrap(), None);
            assert_eq!(Description::optional(None).unwrap(), None);
            let some = Description::optional(Some("The Roman Empire".into())).unwrap();
            assert_eq!(some.map(String::from).as_deref(), Some("The Roman Empire"));
        }

        #[test]
        fn too_long_rejected() {
            assert!(Description::new("x".repeat(5001)).is_err());
        }
    }
}
