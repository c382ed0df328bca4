use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::entities::Character;
use crate::error::CoreError;
use crate::types::{CopingStyle, LifeStage, MentalStage, SimEvent};

// ============================================================================
// Population state - The single mutable aggregate for one world session
// ============================================================================

/// Everything the simulation persists between sessions.
///
/// Characters are keyed by their stable string identity in a `BTreeMap` so
/// every pass over the population walks the same order; the shared random
/// stream is consumed in that order, which is what makes a fixed seed fix
/// every outcome. Engines borrow this for the duration of one tick signal
/// and hold nothing across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationState {
    pub characters: BTreeMap<String, Character>,
    /// Simulated calendar year, starting at 1.
    pub current_year: u32,
    /// Last absolute day reported by the host's day-start signal.
    pub current_day: u32,
    /// Age of the controlling player analog; advances with the population.
    pub player_age: u32,
    /// Identities awaiting an acknowledged funeral, oldest enqueued first.
    /// Never contains duplicates; only the head is Active.
    pub pending_funerals: Vec<String>,
}

impl PopulationState {
    pub fn new() -> Self {
        Self {
            characters: BTreeMap::new(),
            current_year: 1,
            current_day: 0,
            player_age: 20,
            pending_funerals: Vec::new(),
        }
    }

    // === Persistence ===

    /// Decode a snapshot previously produced by [`to_json`](Self::to_json).
    pub fn try_load(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// MissingCollaboratorData signal: a session loaded with zero records
    /// needs the host's one-time population bootstrap before ticking.
    pub fn bootstrap_required(&self) -> bool {
        self.characters.is_empty()
    }

    /// The same signal as an error, for adapters that fail fast instead of
    /// bootstrapping inline.
    pub fn ensure_populated(&self) -> Result<(), CoreError> {
        if self.bootstrap_required() {
            Err(CoreError::EmptyPopulation)
        } else {
            Ok(())
        }
    }

    // === Character management ===

    /// Insert a character, replacing any record under the same identity.
    pub fn insert_character(&mut self, character: Character) {
        self.characters.insert(character.identity.clone(), character);
    }

    pub fn get_character(&self, identity: &str) -> Option<&Character> {
        self.characters.get(identity)
    }

    pub fn get_character_mut(&mut self, identity: &str) -> Option<&mut Character> {
        self.characters.get_mut(identity)
    }

    pub fn living_count(&self) -> usize {
        self.characters.values().filter(|c| c.alive).count()
    }

    // === Pending-funeral queue ===

    /// Append to the queue unless already present. Returns whether the
    /// queue changed; the duplicate case is a guard, not an error.
    pub fn enqueue_funeral(&mut self, identity: &str) -> bool {
        if self.pending_funerals.iter().any(|id| id == identity) {
            return false;
        }
        self.pending_funerals.push(identity.to_string());
        true
    }

    pub fn remove_pending_funeral(&mut self, identity: &str) -> bool {
        let before = self.pending_funerals.len();
        self.pending_funerals.retain(|id| id != identity);
        self.pending_funerals.len() != before
    }

    /// The sole Active funeral: the head of the FIFO queue.
    pub fn active_funeral(&self) -> Option<&str> {
        self.pending_funerals.first().map(String::as_str)
    }
}

impl Default for PopulationState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Host-facing reports - Read models handed across the WASM boundary
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct CharacterReport {
    pub identity: String,
    pub age: u32,
    pub life_stage: LifeStage,
    pub alive: bool,
    pub vitality: i32,
    pub stress: i32,
    pub mental_stage: MentalStage,
    pub coping_style: CopingStyle,
    pub cause_of_death: Option<String>,
    pub death_date: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct PopulationReport {
    pub current_year: u32,
    pub current_day: u32,
    pub player_age: u32,
    pub pending_funerals: Vec<String>,
    pub characters: Vec<CharacterReport>,
}

/// Outcome of one yearly advancement, in emission order.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct YearReport {
    pub year: u32,
    pub events: Vec<SimEvent>,
}

impl PopulationState {
    pub fn population_report(&self) -> PopulationReport {
        PopulationReport {
            current_year: self.current_year,
            current_day: self.current_day,
            player_age: self.player_age,
            pending_funerals: self.pending_funerals.clone(),
            characters: self
                .characters
                .values()
                .map(|c| CharacterReport {
                    identity: c.identity.clone(),
                    age: c.age,
                    life_stage: c.life_stage,
                    alive: c.alive,
                    vitality: c.vitality,
                    stress: c.psyche.stress,
                    mental_stage: c.psyche.stage,
                    coping_style: c.psyche.coping_style,
                    cause_of_death: c.cause_of_death.clone(),
                    death_date: c.death_date,
                })
                .collect(),
        }
    }
}
