//! Request payloads accepted by the admin API

use serde::{Deserialize, Deserializer, Serialize};

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// =============================================================================
// Civilization
// =============================================================================

/// Data for creating a civilization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCivilizationData {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Data for updating a civilization. Absent fields are left unchanged;
/// `description: null` or a blank description clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCivilizationData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
}

// =============================================================================
// Leader
// =============================================================================

/// Data for creating a leader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLeaderData {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub civilization_id: Option<i64>,
    #[serde(default)]
    pub traits: Vec<i64>,
    #[serde(default)]
    pub flaws: Vec<i64>,
}

/// Data for updating a leader.
///
/// `civilization_id: null` detaches the leader; omitting it keeps the current
/// civilization. `description: null` or a blank description clears it.
/// `traits`/`flaws`, when present, replace the whole set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLeaderData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub civilization_id: Option<Option<i64>>,
    #[serde(default)]
    pub traits: Option<Vec<i64>>,
    #[serde(default)]
    pub flaws: Option<Vec<i64>>,
}

// =============================================================================
// Trait / Flaw
// =============================================================================

/// Data for creating or renaming a trait or flaw
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagData {
    pub name: String,
}

// =============================================================================
// Resources
// =============================================================================

/// Rename (or move) a resource entry; both paths are relative to the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameResourceData {
    pub from: String,
    pub to: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_leader_distinguishes_null_from_absent() {
        let absent: UpdateLeaderData = serde_json::from_str(r#"{"name":"Caesar"}"#).unwrap();
        assert_eq!(absent.civilization_id, None);

        let cleared: UpdateLeaderData =
            serde_json::from_str(r#"{"civilization_id":null}"#).unwrap();
        assert_eq!(cleared.civilization_id, Some(None));

        let moved: UpdateLeaderData = serde_json::from_str(r#"{"civilization_id":3}"#).unwrap();
        assert_eq!(moved.civilization_id, Some(Some(3)));
    }

    #[test]
    fn update_civilization_null_description_clears() {
        let absent: UpdateCivilizationData = serde_json::from_str(r#"{"name":"Rome"}"#).unwrap();
        assert_eq!(absent.description, None);

        let cleared: UpdateCivilizationData =
            serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));
    }

    #[test]
    fn create_leader_defaults_empty_sets() {
        let data: CreateLeaderData = serde_json::from_str(r#"{"name":"Augustus"}"#).unwrap();
        assert!(data.traits.is_empty());
        assert!(data.flaws.is_empty());
        assert_eq!(data.civilization_id, None);
    }
}
