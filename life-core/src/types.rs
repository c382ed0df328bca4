use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

// ============================================================================
// Life stage - Age classification driving portraits, dialogue, and stress
// ============================================================================

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum LifeStage {
    Child,
    Teen,
    Adult,
    Elder,
    Deceased,
}

// ============================================================================
// Mental stage - Stress classification, ordered from healthy to crisis
// ============================================================================

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum MentalStage {
    Stable,
    Withdrawal,
    Dysfunction,
    Instability,
    Crisis,
}

// ============================================================================
// Coping style - How a character's yearly stress delta is adjusted
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum CopingStyle {
    Avoidance,
    Confrontation,
    SupportSeeking,
    SelfDestruction,
}

// ============================================================================
// Risk level - 4-point ordinal used by the risk profile
// ============================================================================

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Extreme,
}

// ============================================================================
// Simulation events - Observable transition notices from the yearly pass
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimEvent {
    /// A living character crossed a life-stage threshold.
    StageChanged {
        identity: String,
        from: LifeStage,
        to: LifeStage,
    },
    /// A character died during the yearly death roll (or an administrative
    /// kill); the identity is now in the pending-funeral queue.
    Died {
        identity: String,
        age: u32,
        cause: String,
    },
    /// A character's mental stage moved after the yearly stress update.
    PsycheShifted {
        identity: String,
        from: MentalStage,
        to: MentalStage,
        stress: i32,
    },
}
