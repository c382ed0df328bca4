use serde::{Deserialize, Serialize};

/// Tunables for the lifecycle engine and generated content.
///
/// The three age thresholds must be strictly increasing; ages at or above
/// `adult_max_age` classify as Elder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// First age that is no longer Child.
    pub child_max_age: u32,
    /// First age that is no longer Teen.
    pub teen_max_age: u32,
    /// First age that is no longer Adult.
    pub adult_max_age: u32,
    /// Named speaker for generated ceremony scripts.
    pub officiant: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            child_max_age: 13,
            teen_max_age: 20,
            adult_max_age: 65,
            officiant: "Lewis".to_string(),
        }
    }
}

impl EngineConfig {
    /// Thresholds are usable only when strictly increasing.
    pub fn thresholds_monotonic(&self) -> bool {
        self.child_max_age < self.teen_max_age && self.teen_max_age < self.adult_max_age
    }
}
