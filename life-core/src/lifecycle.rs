//! Yearly lifecycle advancement: aging, life-stage reclassification, the
//! old-age death roll, and delegation to the psychology pass.
//!
//! One call to [`advance_year`] consumes one host year-boundary signal. It
//! walks living characters in stable key order so the shared random stream
//! is spent identically for a given seed, making every outcome reproducible.

use rand::Rng;

use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::psychology;
use crate::state::PopulationState;
use crate::types::{LifeStage, SimEvent};

/// Probability of dying of old age this year, by age band.
///
/// - age >= 100 → 0.50
/// - age >= 90  → 0.20
/// - age >= 80  → 0.05
/// - age >= 70  → 0.01
/// - below 70   → exactly 0 (no roll is made at all)
pub fn death_probability(age: u32) -> f64 {
    if age >= 100 {
        0.50
    } else if age >= 90 {
        0.20
    } else if age >= 80 {
        0.05
    } else if age >= 70 {
        0.01
    } else {
        0.0
    }
}

/// Life stage for a living character: a pure, total function of age and the
/// configured thresholds.
pub fn life_stage_for_age(age: u32, config: &EngineConfig) -> LifeStage {
    if age < config.child_max_age {
        LifeStage::Child
    } else if age < config.teen_max_age {
        LifeStage::Teen
    } else if age < config.adult_max_age {
        LifeStage::Adult
    } else {
        LifeStage::Elder
    }
}

/// Advance the whole population by one simulated year.
///
/// For every living character: age +1, life-stage reclassification, the
/// death roll, and (for survivors) the yearly psychology pass. The dead are
/// enqueued for a funeral. Also advances the calendar year and the player
/// analog's age. Returns the transition notices in emission order.
pub fn advance_year<R: Rng>(
    state: &mut PopulationState,
    config: &EngineConfig,
    rng: &mut R,
) -> Vec<SimEvent> {
    state.current_year += 1;
    state.player_age += 1;

    let mut events = Vec::new();
    let current_day = state.current_day;

    // Key order is the RNG consumption order; collect up front so the queue
    // can be touched while iterating.
    let identities: Vec<String> = state.characters.keys().cloned().collect();

    for identity in identities {
        let mut died = false;

        if let Some(character) = state.characters.get_mut(&identity) {
            if !character.alive {
                continue;
            }

            character.age += 1;

            let old_stage = character.life_stage;
            let new_stage = life_stage_for_age(character.age, config);
            if new_stage != old_stage {
                character.life_stage = new_stage;

                #[cfg(feature = "instrument")]
                tracing::info!(
                    target: "stage",
                    identity = identity.as_str(),
                    age = character.age,
                    from = ?old_stage,
                    to = ?new_stage,
                );

                events.push(SimEvent::StageChanged {
                    identity: identity.clone(),
                    from: old_stage,
                    to: new_stage,
                });
            }

            let chance = death_probability(character.age);
            if chance > 0.0 && rng.random::<f64>() < chance {
                character.alive = false;
                character.life_stage = LifeStage::Deceased;
                character.cause_of_death = Some("Old Age".to_string());
                character.death_date = Some(current_day);
                died = true;

                #[cfg(feature = "instrument")]
                tracing::info!(
                    target: "death",
                    identity = identity.as_str(),
                    age = character.age,
                    cause = "Old Age",
                );

                events.push(SimEvent::Died {
                    identity: identity.clone(),
                    age: character.age,
                    cause: "Old Age".to_string(),
                });
            } else if let Some(event) = psychology::advance_yearly_psychology(character, rng) {
                events.push(event);
            }
        }

        if died {
            state.enqueue_funeral(&identity);
        }
    }

    events
}

// ============================================================================
// Administrative control
// ============================================================================

/// Force a character dead, bypassing the death roll, and queue the funeral.
pub fn kill_character(
    state: &mut PopulationState,
    identity: &str,
    cause: &str,
) -> Result<(), CoreError> {
    let current_day = state.current_day;

    let character = state
        .characters
        .get_mut(identity)
        .ok_or_else(|| CoreError::not_found(identity))?;

    character.alive = false;
    character.life_stage = LifeStage::Deceased;
    character.cause_of_death = Some(cause.to_string());
    character.death_date = Some(current_day);

    #[cfg(feature = "instrument")]
    tracing::info!(target: "death", identity = identity, age = character.age, cause = cause);

    state.enqueue_funeral(identity);
    Ok(())
}

/// Bring a character back: clear the death record, drop any pending
/// funeral, and restore a life stage consistent with their current age.
pub fn revive_character(
    state: &mut PopulationState,
    identity: &str,
    config: &EngineConfig,
) -> Result<(), CoreError> {
    let character = state
        .characters
        .get_mut(identity)
        .ok_or_else(|| CoreError::not_found(identity))?;

    character.alive = true;
    character.cause_of_death = None;
    character.death_date = None;
    character.life_stage = life_stage_for_age(character.age, config);

    state.remove_pending_funeral(identity);
    Ok(())
}
