//! Scenario tests for the funeral pipeline: death to acknowledged ceremony,
//! driven through the same signal sequence a host adapter would deliver.

use life_core::{
    Character, EngineConfig, FuneralStatus, LifeStage, PopulationState, funeral_event_id,
    funeral_status, kill_character, process_day_end, process_day_start, revive_character,
};

fn village_with_losses(day_of_death: u32) -> PopulationState {
    let mut state = PopulationState::new();
    for (identity, age) in [("Abigail", 99u32), ("Evelyn", 94), ("Penny", 34)] {
        state.insert_character(Character::new(identity, age));
    }
    state.current_day = day_of_death;
    kill_character(&mut state, "Abigail", "Old Age").unwrap();
    kill_character(&mut state, "Evelyn", "Old Age").unwrap();
    state
}

/// Step one simulated day: day start (content out), then day end against
/// the host's seen-set.
fn step_day(
    state: &mut PopulationState,
    config: &EngineConfig,
    day: u32,
    seen: &[u32],
) -> (life_core::DayContent, Option<String>) {
    let content = process_day_start(state, config, day);
    let retired = process_day_end(state, |id| seen.contains(&id));
    (content, retired)
}

#[test]
fn funerals_run_one_at_a_time_in_fifo_order() {
    let config = EngineConfig::default();
    let mut state = village_with_losses(10);

    assert_eq!(funeral_status(&state, "Abigail"), FuneralStatus::Active);
    assert_eq!(funeral_status(&state, "Evelyn"), FuneralStatus::Pending);

    let abigail_event = funeral_event_id("Abigail");
    let evelyn_event = funeral_event_id("Evelyn");

    // Days pass with nothing acknowledged; Abigail's funeral stays active
    // and Evelyn's never produces content.
    for day in 11..=20 {
        let (content, retired) = step_day(&mut state, &config, day, &[]);
        assert!(retired.is_none());
        assert!(content.mail_catalog.iter().all(|m| m.key.ends_with("Abigail")));
        if day >= 17 {
            assert_eq!(
                content.ceremony.as_ref().map(|c| c.event_id),
                Some(abigail_event)
            );
        } else {
            assert!(content.ceremony.is_none());
        }
    }

    // The player sees Abigail's ceremony; Evelyn is promoted the same day.
    let (_, retired) = step_day(&mut state, &config, 21, &[abigail_event]);
    assert_eq!(retired.as_deref(), Some("Abigail"));
    assert_eq!(funeral_status(&state, "Evelyn"), FuneralStatus::Active);
    assert_eq!(funeral_status(&state, "Abigail"), FuneralStatus::NotQueued);

    // Evelyn's ceremony (death day 10 + 7, already past) is available at
    // once and retires once seen.
    let (content, _) = step_day(&mut state, &config, 22, &[]);
    assert_eq!(
        content.ceremony.as_ref().map(|c| c.event_id),
        Some(evelyn_event)
    );
    let (_, retired) = step_day(&mut state, &config, 23, &[abigail_event, evelyn_event]);
    assert_eq!(retired.as_deref(), Some("Evelyn"));
    assert!(state.pending_funerals.is_empty());

    // With the queue drained, days carry no funeral content.
    let (content, retired) = step_day(&mut state, &config, 24, &[abigail_event]);
    assert!(content.mail_catalog.is_empty());
    assert!(retired.is_none());
}

#[test]
fn correspondence_follows_the_active_funeral() {
    let config = EngineConfig::default();
    let mut state = village_with_losses(10);

    let (content, _) = step_day(&mut state, &config, 11, &[]);
    let keys: Vec<_> = content.mail_catalog.iter().map(|m| m.key.clone()).collect();
    assert_eq!(
        keys,
        vec![
            "Hearthvale_Death_Abigail".to_string(),
            "Hearthvale_Memorial_Abigail".to_string(),
        ]
    );
    assert_eq!(content.deliver_today, keys);

    // Ceremony day 17 = Spring 18, Year 1 in the memorial body.
    let memorial = &content.mail_catalog[1];
    assert!(memorial.text.contains("Spring 18, Year 1"), "{}", memorial.text);

    // Once Abigail retires, the catalog switches to Evelyn's letters.
    let (_, _) = step_day(&mut state, &config, 17, &[funeral_event_id("Abigail")]);
    let (content, _) = step_day(&mut state, &config, 18, &[funeral_event_id("Abigail")]);
    assert!(content.mail_catalog.iter().all(|m| m.key.ends_with("Evelyn")));
}

#[test]
fn revival_cancels_a_pending_ceremony() {
    let config = EngineConfig::default();
    let mut state = village_with_losses(10);

    // Evelyn is revived while waiting behind Abigail.
    revive_character(&mut state, "Evelyn", &config).unwrap();
    assert_eq!(funeral_status(&state, "Evelyn"), FuneralStatus::NotQueued);
    assert_eq!(state.characters["Evelyn"].life_stage, LifeStage::Elder);

    // Abigail's funeral proceeds; the queue then drains to empty rather
    // than promoting the revived character.
    let (_, retired) = step_day(&mut state, &config, 17, &[funeral_event_id("Abigail")]);
    assert_eq!(retired.as_deref(), Some("Abigail"));
    assert!(state.pending_funerals.is_empty());
}

#[test]
fn acknowledgment_is_checked_against_the_derived_identifier_only() {
    let config = EngineConfig::default();
    let mut state = village_with_losses(10);

    // Near-miss identifiers never retire the funeral.
    let real = funeral_event_id("Abigail");
    let (_, retired) = step_day(&mut state, &config, 17, &[real - 1, real + 1, 7_000_000]);
    assert!(retired.is_none());

    let (_, retired) = step_day(&mut state, &config, 18, &[real]);
    assert_eq!(retired.as_deref(), Some("Abigail"));
}
