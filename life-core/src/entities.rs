use serde::{Deserialize, Serialize};

use crate::types::{CopingStyle, LifeStage, MentalStage, RiskLevel};

// ============================================================================
// Health - Condition labels; cardinality feeds the stress model
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub conditions: Vec<String>,
    pub injuries: Vec<String>,
    pub chronic: Vec<String>,
}

// ============================================================================
// Psyche - Stress state and the traits that shape how it moves
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Psyche {
    /// Current stress, always held in [0, 100].
    pub stress: i32,
    /// Buffer against positive stress deltas, 0-100.
    pub resilience: i32,
    pub coping_style: CopingStyle,
    pub stage: MentalStage,
}

impl Default for Psyche {
    fn default() -> Self {
        Self {
            stress: 0,
            resilience: 0,
            coping_style: CopingStyle::Avoidance,
            stage: MentalStage::Stable,
        }
    }
}

// ============================================================================
// Relationships - Social ties; carried for the host and future mechanics
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationships {
    pub likes: Vec<String>,
    pub loves: Vec<String>,
    pub hates: Vec<String>,
    pub partner: Option<String>,
    pub children: Vec<String>,
}

// ============================================================================
// Occupation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupation {
    pub current: String,
    pub inherited: bool,
}

impl Default for Occupation {
    fn default() -> Self {
        Self {
            current: "Unemployed".to_string(),
            inherited: false,
        }
    }
}

// ============================================================================
// Risk profile - Behavioral risk ordinals; isolation feeds the stress model
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub substance_use: bool,
    pub impulsivity: RiskLevel,
    pub isolation: RiskLevel,
}

impl Default for RiskProfile {
    fn default() -> Self {
        Self {
            substance_use: false,
            impulsivity: RiskLevel::Low,
            isolation: RiskLevel::Low,
        }
    }
}

// ============================================================================
// Character - One record per stable string identity
// ============================================================================

/// A simulated villager. Owned by the population snapshot and mutated only
/// by the lifecycle and psychology engines (plus the administrative ops).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub identity: String,
    pub birth_year: i32,
    /// Age in simulated years; strictly increases while alive.
    pub age: u32,
    pub life_stage: LifeStage,
    pub alive: bool,
    /// General constitution, 0-100. Persisted for the host; the yearly
    /// engines do not read it yet.
    pub vitality: i32,
    pub health: Health,
    pub psyche: Psyche,
    pub relationships: Relationships,
    pub occupation: Occupation,
    pub risk_profile: RiskProfile,
    /// Free-text cause, set only on death.
    pub cause_of_death: Option<String>,
    /// Absolute simulated day of death; `None` while alive.
    pub death_date: Option<u32>,
}

impl Character {
    /// Create a living character at the given age. The birth year is
    /// back-dated from a year-1 start; the life stage starts as Adult and is
    /// reclassified against the engine config by the caller.
    pub fn new(identity: impl Into<String>, age: u32) -> Self {
        Self {
            identity: identity.into(),
            birth_year: 1 - age as i32,
            age,
            life_stage: LifeStage::Adult,
            alive: true,
            vitality: 100,
            health: Health::default(),
            psyche: Psyche::default(),
            relationships: Relationships::default(),
            occupation: Occupation::default(),
            risk_profile: RiskProfile::default(),
            cause_of_death: None,
            death_date: None,
        }
    }

    pub fn with_life_stage(mut self, stage: LifeStage) -> Self {
        self.life_stage = stage;
        self
    }

    pub fn with_vitality(mut self, vitality: i32) -> Self {
        self.vitality = vitality.clamp(0, 100);
        self
    }

    pub fn with_stress(mut self, stress: i32) -> Self {
        self.psyche.stress = stress.clamp(0, 100);
        self
    }

    pub fn with_resilience(mut self, resilience: i32) -> Self {
        self.psyche.resilience = resilience.clamp(0, 100);
        self
    }

    pub fn with_coping_style(mut self, style: CopingStyle) -> Self {
        self.psyche.coping_style = style;
        self
    }

    pub fn with_isolation(mut self, isolation: RiskLevel) -> Self {
        self.risk_profile.isolation = isolation;
        self
    }

    pub fn with_chronic(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.health.chronic = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_conditions(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.health.conditions = labels.into_iter().map(Into::into).collect();
        self
    }

    /// The `alive == false` iff `stage == Deceased` invariant.
    pub fn stage_consistent(&self) -> bool {
        self.alive != (self.life_stage == LifeStage::Deceased)
    }
}
