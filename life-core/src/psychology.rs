//! Yearly psychological-stress model.
//!
//! Pure given the supplied random source: one call computes a stress delta
//! from life circumstances, dampens it through resilience and coping style,
//! clamps the result into [0, 100], and reclassifies the mental stage.
//! This pass cannot fail and always leaves stress in range.

use rand::Rng;

use crate::entities::Character;
use crate::types::{CopingStyle, LifeStage, MentalStage, RiskLevel, SimEvent};

/// Mental stage as a pure function of stress.
///
/// - < 30  → Stable
/// - < 50  → Withdrawal
/// - < 70  → Dysfunction
/// - < 90  → Instability
/// - >= 90 → Crisis
pub fn mental_stage_for_stress(stress: i32) -> MentalStage {
    if stress < 30 {
        MentalStage::Stable
    } else if stress < 50 {
        MentalStage::Withdrawal
    } else if stress < 70 {
        MentalStage::Dysfunction
    } else if stress < 90 {
        MentalStage::Instability
    } else {
        MentalStage::Crisis
    }
}

/// Raw yearly stress delta before coping is applied.
///
/// Adds up life-stage pressure, health burden, isolation, and a uniform
/// variance in [-10, 20) standing in for unseen daily struggles. The
/// asymmetric range is intentional and preserved as-is.
fn stress_factors<R: Rng>(character: &Character, rng: &mut R) -> i32 {
    let mut delta = 0i32;

    match character.life_stage {
        LifeStage::Adult => delta += 5,
        LifeStage::Elder => delta += 10,
        _ => {}
    }

    delta += character.health.chronic.len() as i32 * 10;
    delta += character.health.conditions.len() as i32 * 5;

    match character.risk_profile.isolation {
        RiskLevel::High => delta += 15,
        RiskLevel::Extreme => delta += 25,
        _ => {}
    }

    delta + rng.random_range(-10..20)
}

/// Dampen positive deltas by resilience, then apply the coping-style shift.
///
/// Resilience 100 halves a positive delta; resilience 0 leaves it untouched;
/// negative deltas are never amplified. Avoidance and Confrontation apply no
/// shift yet (reserved for differentiation once relationships matter).
fn apply_coping(character: &Character, mut delta: i32) -> i32 {
    if delta > 0 {
        let reduction = f64::from(character.psyche.resilience) / 200.0;
        delta = (f64::from(delta) * (1.0 - reduction)) as i32;
    }

    match character.psyche.coping_style {
        CopingStyle::SelfDestruction => delta += 5,
        CopingStyle::SupportSeeking => delta -= 5,
        CopingStyle::Avoidance | CopingStyle::Confrontation => {}
    }

    delta
}

/// Run one yearly psychology update for a living character.
///
/// Returns a transition notice when the mental stage changed.
pub fn advance_yearly_psychology<R: Rng>(
    character: &mut Character,
    rng: &mut R,
) -> Option<SimEvent> {
    let delta = apply_coping(character, stress_factors(character, rng));

    character.psyche.stress = (character.psyche.stress + delta).clamp(0, 100);

    let old_stage = character.psyche.stage;
    let new_stage = mental_stage_for_stress(character.psyche.stress);
    if new_stage == old_stage {
        return None;
    }
    character.psyche.stage = new_stage;

    #[cfg(feature = "instrument")]
    tracing::info!(
        target: "psyche",
        identity = character.identity.as_str(),
        stress = character.psyche.stress,
        from = ?old_stage,
        to = ?new_stage,
    );

    Some(SimEvent::PsycheShifted {
        identity: character.identity.clone(),
        from: old_stage,
        to: new_stage,
        stress: character.psyche.stress,
    })
}
