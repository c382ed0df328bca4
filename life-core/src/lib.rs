//! Life-simulation core for the Hearthvale village mod.
//!
//! Advances a population of characters through aging, probabilistic death,
//! and a yearly stress model, and schedules one funeral ceremony at a time
//! for the host to present. The engine is pure data-in/data-out: the host
//! adapter delivers calendar signals (year boundary, day start, day end),
//! persists the snapshot between ticks, and reports which generated events
//! the player has seen.

use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

mod calendar;
mod config;
mod entities;
mod error;
mod funeral;
mod lifecycle;
mod psychology;
mod state;
mod types;

#[cfg(feature = "instrument")]
pub use instrument;

pub use calendar::{CalendarDate, DAYS_PER_SEASON, DAYS_PER_YEAR, SEASONS_PER_YEAR, Season};
pub use config::EngineConfig;
pub use entities::{Character, Health, Occupation, Psyche, Relationships, RiskProfile};
pub use error::CoreError;
pub use funeral::{
    CeremonyScript, DayContent, EVENT_ID_BASE, FUNERAL_OFFSET_DAYS, FuneralStatus, MailEntry,
    ScriptDirective, ceremony_script, funeral_event_id, funeral_status, process_day_end,
    process_day_start, stable_hash,
};
pub use lifecycle::{
    advance_year, death_probability, kill_character, life_stage_for_age, revive_character,
};
pub use psychology::{advance_yearly_psychology, mental_stage_for_stress};
pub use state::{CharacterReport, PopulationReport, PopulationState, YearReport};
pub use types::{CopingStyle, LifeStage, MentalStage, RiskLevel, SimEvent};

// ============================================================================
// WASM API - Engine
// ============================================================================

/// Host-facing adapter: owns the population snapshot, the config, and the
/// seeded random stream between host signals, and forwards each signal into
/// the core synchronously.
#[wasm_bindgen]
pub struct Engine {
    state: PopulationState,
    config: EngineConfig,
    rng: StdRng,
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Self {
        // Better panic messages in browser console
        console_error_panic_hook::set_once();

        Self {
            state: PopulationState::new(),
            config: EngineConfig::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create an engine with a JSON config; malformed config falls back to
    /// defaults.
    #[wasm_bindgen]
    pub fn with_config(seed: u64, config_json: &str) -> Self {
        let mut engine = Self::new(seed);
        engine.config = serde_json::from_str(config_json).unwrap_or_default();
        engine
    }

    /// Restore an engine from a snapshot produced by [`save`](Self::save).
    #[wasm_bindgen]
    pub fn load(seed: u64, snapshot_json: &str) -> Result<Engine, JsError> {
        let mut engine = Self::new(seed);
        engine.state = PopulationState::try_load(snapshot_json)?;
        Ok(engine)
    }

    /// Serialize the snapshot for the host's durable storage. Round-trips
    /// exactly through [`load`](Self::load).
    #[wasm_bindgen]
    pub fn save(&self) -> String {
        self.state.to_json()
    }

    /// True when the snapshot holds no character records and the host must
    /// run its one-time population bootstrap.
    #[wasm_bindgen]
    pub fn bootstrap_required(&self) -> bool {
        self.state.bootstrap_required()
    }

    /// Seed one character record (bootstrap). The life stage is classified
    /// from the age immediately.
    #[wasm_bindgen]
    pub fn add_character(&mut self, identity: &str, age: u32) {
        let stage = lifecycle::life_stage_for_age(age, &self.config);
        self.state
            .insert_character(Character::new(identity, age).with_life_stage(stage));
    }

    /// Consume the host's year-boundary signal: one yearly advancement for
    /// the whole population.
    #[wasm_bindgen]
    pub fn on_year_boundary(&mut self) -> YearReport {
        let events = lifecycle::advance_year(&mut self.state, &self.config, &mut self.rng);
        YearReport {
            year: self.state.current_year,
            events,
        }
    }

    /// Consume the host's day-start signal: updates the calendar cursor and
    /// returns the content the host should stage for the Active funeral.
    #[wasm_bindgen]
    pub fn on_day_start(&mut self, day: u32) -> DayContent {
        funeral::process_day_start(&mut self.state, &self.config, day)
    }

    /// Consume the host's day-end signal. `is_acknowledged` is the host's
    /// oracle mapping an event identifier to whether the player has seen
    /// it. Returns the retired identity, if any funeral completed.
    #[wasm_bindgen]
    pub fn on_day_end(&mut self, is_acknowledged: &js_sys::Function) -> Option<String> {
        funeral::process_day_end(&mut self.state, |event_id| {
            is_acknowledged
                .call1(&JsValue::NULL, &JsValue::from(event_id))
                .ok()
                .and_then(|value| value.as_bool())
                .unwrap_or(false)
        })
    }

    /// Administrative: force a character dead and queue the funeral.
    #[wasm_bindgen]
    pub fn kill_character(&mut self, identity: &str, cause: &str) -> Result<(), JsError> {
        lifecycle::kill_character(&mut self.state, identity, cause)?;
        Ok(())
    }

    /// Administrative: revive a character and drop any pending funeral.
    #[wasm_bindgen]
    pub fn revive_character(&mut self, identity: &str) -> Result<(), JsError> {
        lifecycle::revive_character(&mut self.state, identity, &self.config)?;
        Ok(())
    }

    /// Read model of the whole population for presentation (portrait
    /// selection by life stage, debug overlays).
    #[wasm_bindgen]
    pub fn population_report(&self) -> PopulationReport {
        self.state.population_report()
    }

    #[wasm_bindgen]
    pub fn current_year(&self) -> u32 {
        self.state.current_year
    }
}

// Native-host access to the owned snapshot; the WASM boundary uses
// save()/population_report() instead.
impl Engine {
    pub fn state(&self) -> &PopulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PopulationState {
        &mut self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

// ============================================================================
// Tests
// ============================================================================
