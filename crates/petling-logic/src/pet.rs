//! Pet state, species, mood classification, and resolved views.
//!
//! A [`PetState`] is the plain-data mirror of the persisted record:
//! two decaying stats with their anchor timestamps, plus name, species,
//! XP, and level. [`resolve`] brings a state up to the present moment,
//! and [`PetView`] is the derived, client-facing projection.
//!
//! # Resolution
//!
//! Stored stats are only as fresh as the last write. [`resolve`] applies
//! the decay law to both stats and, when whole points were lost,
//! advances each anchor by exactly the time those points represent.
//! Fractional progress toward the next point is therefore never lost,
//! no matter how often a pet is read.
//!
//! ```
//! use petling_logic::pet::{resolve, PetState};
//! use petling_logic::tuning::MICROS_PER_HOUR;
//!
//! let mut pet = PetState::hatch(0);
//! pet.hunger = 50;
//! let resolved = resolve(&pet, 3 * MICROS_PER_HOUR);
//! assert_eq!(resolved.pet.hunger, 35);
//! assert!(resolved.changed);
//! ```

use serde::{Deserialize, Serialize};

use crate::decay;
use crate::leveling;
use crate::tuning::{
    HATCH_HAPPINESS, HATCH_HUNGER, HATCH_NAME, MOOD_HAPPY_MIN_AVG, MOOD_NEUTRAL_MIN_AVG, STAT_MIN,
};

/// All pet species. Flavor only; no species affects the engagement math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Cat,
    Dog,
    Dragon,
    Owl,
    Penguin,
}

impl Species {
    /// All species in wire-id order.
    pub const ALL: [Species; 5] = [
        Species::Cat,
        Species::Dog,
        Species::Dragon,
        Species::Owl,
        Species::Penguin,
    ];

    /// Stable wire id, as stored in the database.
    pub fn as_u8(self) -> u8 {
        match self {
            Species::Cat => 0,
            Species::Dog => 1,
            Species::Dragon => 2,
            Species::Owl => 3,
            Species::Penguin => 4,
        }
    }

    pub fn from_u8(raw: u8) -> Option<Species> {
        match raw {
            0 => Some(Species::Cat),
            1 => Some(Species::Dog),
            2 => Some(Species::Dragon),
            3 => Some(Species::Owl),
            4 => Some(Species::Penguin),
            _ => None,
        }
    }

    /// Parse a client-supplied species token, case-insensitively.
    pub fn parse(token: &str) -> Option<Species> {
        match token.trim().to_ascii_lowercase().as_str() {
            "cat" => Some(Species::Cat),
            "dog" => Some(Species::Dog),
            "dragon" => Some(Species::Dragon),
            "owl" => Some(Species::Owl),
            "penguin" => Some(Species::Penguin),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Species::Cat => "Cat",
            Species::Dog => "Dog",
            Species::Dragon => "Dragon",
            Species::Owl => "Owl",
            Species::Penguin => "Penguin",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Species::Cat => "🐱",
            Species::Dog => "🐶",
            Species::Dragon => "🐲",
            Species::Owl => "🦉",
            Species::Penguin => "🐧",
        }
    }
}

/// Derived well-being classification. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    /// Average stat below 30.
    Sad,
    /// Average stat 30..60.
    Neutral,
    /// Average stat 60 and above.
    Happy,
}

impl Mood {
    /// Classify from the two current (decayed) stats.
    ///
    /// Compares the stat sum against doubled thresholds, so an odd sum
    /// keeps its half point instead of truncating at the boundary.
    pub fn from_stats(hunger: i32, happiness: i32) -> Self {
        let sum = hunger + happiness;
        if sum >= 2 * MOOD_HAPPY_MIN_AVG {
            Self::Happy
        } else if sum >= 2 * MOOD_NEUTRAL_MIN_AVG {
            Self::Neutral
        } else {
            Self::Sad
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sad => "sad",
            Self::Neutral => "neutral",
            Self::Happy => "happy",
        }
    }
}

/// Plain-data mirror of one persisted pet record.
///
/// Timestamps are microseconds since the Unix epoch so the logic stays
/// independent of any host time type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetState {
    pub id: u64,
    pub name: String,
    pub species: Species,
    /// Fullness gauge: 100 just fed, 0 starving.
    pub hunger: i32,
    pub happiness: i32,
    /// Decay anchor for hunger. Only ever advances.
    pub last_fed_at_micros: i64,
    /// Decay anchor for happiness. Only ever advances.
    pub last_played_at_micros: i64,
    pub xp: u32,
    pub level: u32,
}

impl PetState {
    /// A freshly hatched pet, anchored at `now_micros`. The id is
    /// assigned by the store on insert.
    pub fn hatch(now_micros: i64) -> PetState {
        PetState {
            id: 0,
            name: HATCH_NAME.to_string(),
            species: Species::Cat,
            hunger: HATCH_HUNGER,
            happiness: HATCH_HAPPINESS,
            last_fed_at_micros: now_micros,
            last_played_at_micros: now_micros,
            xp: 0,
            level: 1,
        }
    }
}

/// A pet state brought up to the present moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPet {
    pub pet: PetState,
    /// Whether either stat lost points, i.e. whether the caller should
    /// persist the resolved state.
    pub changed: bool,
}

/// Apply the decay law to both stats as of `now_micros`.
///
/// When a stat loses whole points its anchor advances by exactly the
/// time those points took to accrue, leaving the sub-point remainder
/// anchored for the next read. A stat already at the floor stays put.
pub fn resolve(pet: &PetState, now_micros: i64) -> ResolvedPet {
    let mut resolved = pet.clone();

    let hunger_points = decay::decay_points(pet.last_fed_at_micros, now_micros);
    if hunger_points > 0 && pet.hunger > STAT_MIN {
        resolved.hunger = pet.hunger.saturating_sub(hunger_points).max(STAT_MIN);
        resolved.last_fed_at_micros = pet
            .last_fed_at_micros
            .saturating_add(decay::micros_consumed(hunger_points));
    }

    let happiness_points = decay::decay_points(pet.last_played_at_micros, now_micros);
    if happiness_points > 0 && pet.happiness > STAT_MIN {
        resolved.happiness = pet.happiness.saturating_sub(happiness_points).max(STAT_MIN);
        resolved.last_played_at_micros = pet
            .last_played_at_micros
            .saturating_add(decay::micros_consumed(happiness_points));
    }

    let changed = resolved.hunger != pet.hunger || resolved.happiness != pet.happiness;
    ResolvedPet {
        pet: resolved,
        changed,
    }
}

/// Client-facing projection: fully decayed stats plus derived fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetView {
    pub id: u64,
    pub name: String,
    pub species: String,
    pub display_glyph: String,
    pub hunger: i32,
    pub happiness: i32,
    pub xp: u32,
    pub level: u32,
    pub xp_required: u32,
    pub xp_progress_percent: u32,
    pub mood: String,
    pub last_fed_at_micros: i64,
    pub last_played_at_micros: i64,
}

impl PetView {
    /// Project a state as of `now_micros`. Resolves decay itself, so a
    /// view can never expose raw stale stats.
    pub fn project(pet: &PetState, now_micros: i64) -> PetView {
        let resolved = resolve(pet, now_micros).pet;
        let mood = Mood::from_stats(resolved.hunger, resolved.happiness);
        PetView {
            id: resolved.id,
            name: resolved.name.clone(),
            species: resolved.species.label().to_string(),
            display_glyph: resolved.species.glyph().to_string(),
            hunger: resolved.hunger,
            happiness: resolved.happiness,
            xp: resolved.xp,
            level: resolved.level,
            xp_required: leveling::xp_required(resolved.level),
            xp_progress_percent: leveling::xp_progress_percent(resolved.level, resolved.xp),
            mood: mood.label().to_string(),
            last_fed_at_micros: resolved.last_fed_at_micros,
            last_played_at_micros: resolved.last_played_at_micros,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::MICROS_PER_HOUR;

    fn pet() -> PetState {
        PetState {
            id: 7,
            name: "Ziggy".to_string(),
            species: Species::Dog,
            hunger: 50,
            happiness: 50,
            last_fed_at_micros: 0,
            last_played_at_micros: 0,
            xp: 0,
            level: 1,
        }
    }

    // --- Species ---

    #[test]
    fn species_u8_round_trip() {
        for s in Species::ALL {
            assert_eq!(Species::from_u8(s.as_u8()), Some(s));
        }
        assert_eq!(Species::from_u8(5), None);
    }

    #[test]
    fn species_parse_case_insensitive() {
        assert_eq!(Species::parse("dragon"), Some(Species::Dragon));
        assert_eq!(Species::parse("DRAGON"), Some(Species::Dragon));
        assert_eq!(Species::parse("  Owl  "), Some(Species::Owl));
        assert_eq!(Species::parse("unicorn"), None);
        assert_eq!(Species::parse(""), None);
    }

    #[test]
    fn species_have_labels_and_glyphs() {
        for s in Species::ALL {
            assert!(!s.label().is_empty());
            assert!(!s.glyph().is_empty());
            assert_eq!(Species::parse(s.label()), Some(s));
        }
    }

    // --- Mood ---

    #[test]
    fn mood_tiers() {
        assert_eq!(Mood::from_stats(0, 0), Mood::Sad);
        assert_eq!(Mood::from_stats(29, 29), Mood::Sad);
        assert_eq!(Mood::from_stats(30, 30), Mood::Neutral);
        assert_eq!(Mood::from_stats(59, 59), Mood::Neutral);
        assert_eq!(Mood::from_stats(60, 60), Mood::Happy);
        assert_eq!(Mood::from_stats(100, 100), Mood::Happy);
    }

    #[test]
    fn mood_boundary_averages_are_inclusive() {
        // Average exactly 30 is neutral, exactly 60 is happy.
        assert_eq!(Mood::from_stats(20, 40), Mood::Neutral);
        assert_eq!(Mood::from_stats(50, 70), Mood::Happy);
        // Average 29.5 rounds nothing away: still below 30.
        assert_eq!(Mood::from_stats(29, 30), Mood::Sad);
        // Average 59.5 is still below 60.
        assert_eq!(Mood::from_stats(59, 60), Mood::Neutral);
    }

    #[test]
    fn mood_uses_both_stats() {
        assert_eq!(Mood::from_stats(100, 20), Mood::Happy);
        assert_eq!(Mood::from_stats(0, 59), Mood::Sad);
    }

    // --- Hatching ---

    #[test]
    fn hatch_satisfies_bounds() {
        let p = PetState::hatch(42);
        assert!(p.hunger >= 0 && p.hunger <= 100);
        assert!(p.happiness >= 0 && p.happiness <= 100);
        assert_eq!(p.level, 1);
        assert_eq!(p.xp, 0);
        assert_eq!(p.last_fed_at_micros, 42);
        assert_eq!(p.last_played_at_micros, 42);
        assert!(!p.name.is_empty());
    }

    // --- Resolution ---

    #[test]
    fn resolve_three_hours_later() {
        let resolved = resolve(&pet(), 3 * MICROS_PER_HOUR);
        assert_eq!(resolved.pet.hunger, 35);
        assert_eq!(resolved.pet.happiness, 35);
        assert!(resolved.changed);
    }

    #[test]
    fn resolve_fresh_pet_is_unchanged() {
        let resolved = resolve(&pet(), 0);
        assert_eq!(resolved.pet, pet());
        assert!(!resolved.changed);
    }

    #[test]
    fn resolve_sub_point_elapsed_is_unchanged() {
        // 5 minutes accrues no whole point; anchors must not move, or
        // frequent reads would discard the fraction forever.
        let five_min = 5 * 60 * 1_000_000;
        let resolved = resolve(&pet(), five_min);
        assert!(!resolved.changed);
        assert_eq!(resolved.pet.last_fed_at_micros, 0);
    }

    #[test]
    fn frequent_reads_equal_one_big_read() {
        // Read every 25 minutes for 5 hours; total decay must match a
        // single read at the 5 hour mark.
        let mut walked = pet();
        let step = 25 * 60 * 1_000_000i64;
        let mut now = 0;
        while now < 5 * MICROS_PER_HOUR {
            now += step;
            walked = resolve(&walked, now).pet;
        }
        let walked_final = resolve(&walked, 5 * MICROS_PER_HOUR).pet;

        let direct = resolve(&pet(), 5 * MICROS_PER_HOUR).pet;
        assert_eq!(walked_final.hunger, direct.hunger);
        assert_eq!(walked_final.happiness, direct.happiness);
    }

    #[test]
    fn resolve_anchors_only_advance() {
        let resolved = resolve(&pet(), 3 * MICROS_PER_HOUR);
        assert!(resolved.pet.last_fed_at_micros >= 0);
        assert!(resolved.pet.last_fed_at_micros <= 3 * MICROS_PER_HOUR);

        // Clock skew: now before the anchor leaves everything alone.
        let skewed = resolve(&resolved.pet, 0);
        assert_eq!(skewed.pet, resolved.pet);
        assert!(!skewed.changed);
    }

    #[test]
    fn resolve_floors_at_zero() {
        let mut starving = pet();
        starving.hunger = 3;
        let resolved = resolve(&starving, 24 * MICROS_PER_HOUR);
        assert_eq!(resolved.pet.hunger, 0);

        // Already at the floor: nothing changes, no write needed.
        let again = resolve(&resolved.pet, 48 * MICROS_PER_HOUR);
        assert_eq!(again.pet.hunger, 0);
    }

    #[test]
    fn resolve_stats_stay_in_bounds() {
        for hours in 0..30 {
            let r = resolve(&pet(), hours * MICROS_PER_HOUR);
            assert!(r.pet.hunger >= 0 && r.pet.hunger <= 100);
            assert!(r.pet.happiness >= 0 && r.pet.happiness <= 100);
        }
    }

    // --- Views ---

    #[test]
    fn view_projects_decayed_stats() {
        let view = PetView::project(&pet(), 3 * MICROS_PER_HOUR);
        assert_eq!(view.hunger, 35);
        assert_eq!(view.happiness, 35);
        assert_eq!(view.mood, "neutral");
        assert_eq!(view.species, "Dog");
        assert_eq!(view.display_glyph, "🐶");
        assert_eq!(view.xp_required, 100);
        assert_eq!(view.xp_progress_percent, 0);
    }

    #[test]
    fn view_progress_fields() {
        let mut p = pet();
        p.level = 2;
        p.xp = 50;
        let view = PetView::project(&p, 0);
        assert_eq!(view.xp_required, 200);
        assert_eq!(view.xp_progress_percent, 25);
    }

    #[test]
    fn view_serializes_with_derived_fields() {
        let view = PetView::project(&pet(), 0);
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"mood\":\"neutral\""));
        assert!(json.contains("\"xp_required\":100"));
        assert!(json.contains("\"display_glyph\""));
    }
}
