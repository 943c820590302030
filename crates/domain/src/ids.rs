use std::fmt;

use serde::{Deserialize, Serialize};

/// Surrogate keys are assigned by the store on insert, so ids are plain
/// integers rather than client-generated values.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(CivilizationId);
define_id!(LeaderId);
define_id!(TraitId);
define_id!(FlawId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_bare_integer() {
        let id = LeaderId::from(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(i64::from(id), 42);
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&CivilizationId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
