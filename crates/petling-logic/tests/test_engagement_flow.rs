//! Integration tests for the full engagement flow.
//!
//! Exercises: hatch → decay resolution → command application →
//! leveling → view projection, the same sequence the server runs per
//! request.
//!
//! All tests are pure logic — no SpacetimeDB, no transport.

use petling_logic::commands::{apply, PetCommand, PetError};
use petling_logic::leveling::xp_required;
use petling_logic::pet::{resolve, Mood, PetState, PetView, Species};
use petling_logic::tuning::{MICROS_PER_HOUR, SATISFIED_THRESHOLD};

// ── Helpers ────────────────────────────────────────────────────────────

/// A pet hatched at t=0 whose owner has been away for `hours`.
fn neglected_for(hours: i64) -> (PetState, i64) {
    (PetState::hatch(0), hours * MICROS_PER_HOUR)
}

// ── Full-day ownership story ───────────────────────────────────────────

#[test]
fn first_day_of_ownership() {
    let (pet, _) = neglected_for(0);

    // Morning: feed the freshly hatched pet.
    let fed = apply(&pet, &PetCommand::Feed, 0).unwrap();
    assert_eq!(fed.pet.hunger, 100);
    assert_eq!(fed.pet.xp, 10);

    // Noon, four hours later: stats have drifted down 20 points each.
    let noon = 4 * MICROS_PER_HOUR;
    let resolved = resolve(&fed.pet, noon);
    assert_eq!(resolved.pet.hunger, 80);
    assert_eq!(resolved.pet.happiness, 50);

    // Play at noon, then check the view the client would render.
    let played = apply(&resolved.pet, &PetCommand::Play, noon).unwrap();
    assert_eq!(played.pet.happiness, 75);
    assert_eq!(played.pet.xp, 25);

    let view = PetView::project(&played.pet, noon);
    assert_eq!(view.mood, "happy");
    assert_eq!(view.level, 1);
    assert_eq!(view.xp_progress_percent, 25);
}

#[test]
fn a_week_of_neglect_then_recovery() {
    let (pet, week_later) = neglected_for(168);

    // Both stats bottom out; the pet is sad but alive.
    let view = PetView::project(&pet, week_later);
    assert_eq!(view.hunger, 0);
    assert_eq!(view.happiness, 0);
    assert_eq!(view.mood, "sad");

    // One feed and one play start the climb back.
    let fed = apply(&pet, &PetCommand::Feed, week_later).unwrap();
    let played = apply(&fed.pet, &PetCommand::Play, week_later).unwrap();
    assert_eq!(played.pet.hunger, 30);
    assert_eq!(played.pet.happiness, 25);
    assert_eq!(
        Mood::from_stats(played.pet.hunger, played.pet.happiness),
        Mood::Sad
    );
    assert_eq!(played.pet.xp, 25);
}

// ── Decay and action interleaving ──────────────────────────────────────

#[test]
fn resolution_between_actions_matches_direct_application() {
    // Acting at hour 6 must see the same stats whether or not a read
    // resolved (and would have persisted) decay at hour 3.
    let (pet, _) = neglected_for(0);

    let with_read = {
        let midway = resolve(&pet, 3 * MICROS_PER_HOUR).pet;
        apply(&midway, &PetCommand::Feed, 6 * MICROS_PER_HOUR).unwrap()
    };
    let without_read = apply(&pet, &PetCommand::Feed, 6 * MICROS_PER_HOUR).unwrap();

    assert_eq!(with_read.pet.hunger, without_read.pet.hunger);
    assert_eq!(with_read.pet.happiness, without_read.pet.happiness);
}

#[test]
fn feeding_resets_only_the_hunger_clock() {
    let (pet, _) = neglected_for(0);
    let fed = apply(&pet, &PetCommand::Feed, 2 * MICROS_PER_HOUR).unwrap();
    assert_eq!(fed.pet.last_fed_at_micros, 2 * MICROS_PER_HOUR);

    // Two hours on, hunger decays from its fresh anchor while
    // happiness keeps decaying from its own, older one.
    let later = resolve(&fed.pet, 4 * MICROS_PER_HOUR).pet;
    assert_eq!(later.hunger, 80);
    assert_eq!(later.happiness, 50);
}

#[test]
fn satisfied_pet_rejects_until_decay_reopens_the_window() {
    let (pet, _) = neglected_for(0);
    let fed = apply(&pet, &PetCommand::Feed, 0).unwrap();
    assert_eq!(fed.pet.hunger, 100);

    // Immediately after: above the threshold, rejected.
    let err = apply(&fed.pet, &PetCommand::Feed, 1).unwrap_err();
    assert_eq!(err, PetError::AlreadySatisfied { stat: "hunger" });

    // Two hours later hunger is 90, below 95: accepted again.
    let two_h = 2 * MICROS_PER_HOUR;
    assert!(resolve(&fed.pet, two_h).pet.hunger < SATISFIED_THRESHOLD);
    let refed = apply(&fed.pet, &PetCommand::Feed, two_h).unwrap();
    assert_eq!(refed.pet.hunger, 100);
}

// ── Leveling across many actions ───────────────────────────────────────

#[test]
fn grinding_to_level_three() {
    // Alternate feed and play with enough spacing that every action
    // lands. XP per round trip: 10 + 15 = 25.
    let (mut pet, _) = neglected_for(0);
    let mut now = 0;
    let mut level_ups = 0;

    for _ in 0..16 {
        now += 8 * MICROS_PER_HOUR;
        let fed = apply(&pet, &PetCommand::Feed, now).unwrap();
        level_ups += fed.levels_gained;
        let played = apply(&fed.pet, &PetCommand::Play, now).unwrap();
        level_ups += played.levels_gained;
        pet = played.pet;
    }

    // 16 rounds × 25 XP = 400 XP total: past level 2 (100) and level 3
    // (further 200), holding the remainder.
    assert_eq!(pet.level, 3);
    assert_eq!(pet.xp, 100);
    assert_eq!(level_ups, 2);
    assert!(pet.xp < xp_required(pet.level));
}

// ── Command round-trip from the wire ───────────────────────────────────

#[test]
fn wire_parse_to_outcome() {
    let (pet, _) = neglected_for(0);

    let cmd = PetCommand::parse("retype", None, Some("Dragon".to_string())).unwrap();
    let out = apply(&pet, &cmd, 0).unwrap();
    assert_eq!(out.pet.species, Species::Dragon);

    let view = PetView::project(&out.pet, 0);
    assert_eq!(view.species, "Dragon");
    assert_eq!(view.display_glyph, "🐲");
}

#[test]
fn unknown_wire_action_never_touches_state() {
    let err = PetCommand::parse("hug", None, None).unwrap_err();
    assert_eq!(
        err,
        PetError::UnknownAction {
            action: "hug".to_string()
        }
    );
}
