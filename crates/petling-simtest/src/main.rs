//! Petling Headless Engagement Harness
//!
//! Validates pure engagement logic and data without SpacetimeDB.
//! Drives the same resolve/apply sequence the server runs per request,
//! against an in-memory store with a synthetic clock — no DB, no
//! networking.
//!
//! Usage:
//!   cargo run -p petling-simtest
//!   cargo run -p petling-simtest -- --verbose

use petling_logic::commands::{apply, ActionOutcome, PetCommand, PetError};
use petling_logic::decay;
use petling_logic::leveling;
use petling_logic::pet::{resolve, Mood, PetState, PetView, Species};
use petling_logic::tuning::{JOURNAL_KEEP, MICROS_PER_HOUR, SATISFIED_THRESHOLD};
use serde::Deserialize;

// ── Species manifest (same JSON the server seeds from) ──────────────────
const MANIFEST_JSON: &str = include_str!("../../../data/species_manifest.json");

#[derive(Debug, Deserialize)]
struct SpeciesSpec {
    species: String,
    glyph: String,
    blurb: String,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Petling Engagement Harness ===\n");

    let mut results = Vec::new();

    // 1. Species manifest validation
    results.extend(validate_species_manifest(verbose));

    // 2. Decay law sweep
    results.extend(validate_decay_laws(verbose));

    // 3. Leveling curve and carry resolution
    results.extend(validate_leveling(verbose));

    // 4. Store round-trip (hatch, act, journal, prune)
    results.extend(validate_engagement_store(verbose));

    // 5. View projection
    results.extend(validate_view_projection(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Species Manifest ─────────────────────────────────────────────────

fn validate_species_manifest(verbose: bool) -> Vec<TestResult> {
    println!("--- Species Manifest ---");
    let mut results = Vec::new();

    let manifest: Vec<SpeciesSpec> = match serde_json::from_str(MANIFEST_JSON) {
        Ok(m) => m,
        Err(e) => {
            results.push(TestResult {
                name: "manifest_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    // Exactly one entry per compiled species
    results.push(TestResult {
        name: "manifest_entry_count".into(),
        passed: manifest.len() == Species::ALL.len(),
        detail: format!(
            "{} entries for {} species",
            manifest.len(),
            Species::ALL.len()
        ),
    });

    // Every entry names a known species
    let unknown: Vec<_> = manifest
        .iter()
        .filter(|s| Species::parse(&s.species).is_none())
        .map(|s| s.species.as_str())
        .collect();
    results.push(TestResult {
        name: "manifest_known_species".into(),
        passed: unknown.is_empty(),
        detail: if unknown.is_empty() {
            "all entries name known species".into()
        } else {
            format!("unknown species: {}", unknown.join(", "))
        },
    });

    // Every compiled species is covered
    let missing: Vec<_> = Species::ALL
        .iter()
        .filter(|sp| {
            !manifest
                .iter()
                .any(|s| Species::parse(&s.species) == Some(**sp))
        })
        .map(|sp| sp.label())
        .collect();
    results.push(TestResult {
        name: "manifest_covers_all_species".into(),
        passed: missing.is_empty(),
        detail: if missing.is_empty() {
            "every compiled species has an entry".into()
        } else {
            format!("missing: {}", missing.join(", "))
        },
    });

    // Manifest glyphs agree with the compiled glyphs clients render
    let glyph_mismatch: Vec<_> = manifest
        .iter()
        .filter_map(|s| {
            let sp = Species::parse(&s.species)?;
            (s.glyph != sp.glyph()).then(|| s.species.as_str())
        })
        .collect();
    results.push(TestResult {
        name: "manifest_glyphs_match".into(),
        passed: glyph_mismatch.is_empty(),
        detail: if glyph_mismatch.is_empty() {
            "manifest glyphs match compiled glyphs".into()
        } else {
            format!("glyph drift for: {}", glyph_mismatch.join(", "))
        },
    });

    // Blurbs present
    let blank_blurbs = manifest.iter().filter(|s| s.blurb.trim().is_empty()).count();
    results.push(TestResult {
        name: "manifest_blurbs_present".into(),
        passed: blank_blurbs == 0,
        detail: format!("{} blank blurbs", blank_blurbs),
    });

    if verbose {
        println!("  Species roster:");
        for s in &manifest {
            println!("    {} {}: {}", s.glyph, s.species, s.blurb);
        }
    }

    results
}

// ── 2. Decay Laws ───────────────────────────────────────────────────────

fn validate_decay_laws(_verbose: bool) -> Vec<TestResult> {
    println!("--- Decay Laws ---");
    let mut results = Vec::new();

    // Monotonic, bounded sweep over a month of hours
    let mut monotonic = true;
    let mut bounded = true;
    let mut prev = 100;
    for hour in 0..720 {
        let v = decay::decayed_value(100, 0, hour * MICROS_PER_HOUR);
        if v > prev {
            monotonic = false;
        }
        if !(0..=100).contains(&v) {
            bounded = false;
        }
        prev = v;
    }
    results.push(TestResult {
        name: "decay_monotonic_bounded".into(),
        passed: monotonic && bounded,
        detail: "720h sweep stays non-increasing within [0, 100]".into(),
    });

    // Exact rate: 5 points per hour
    let after_3h = decay::decayed_value(50, 0, 3 * MICROS_PER_HOUR);
    results.push(TestResult {
        name: "decay_rate_5_per_hour".into(),
        passed: after_3h == 35,
        detail: format!("50 after 3h → {} (want 35)", after_3h),
    });

    // Fractional hours floor to whole points
    let after_90m = decay::decay_points(0, MICROS_PER_HOUR + MICROS_PER_HOUR / 2);
    results.push(TestResult {
        name: "decay_fraction_floors".into(),
        passed: after_90m == 7,
        detail: format!("90 minutes → {} points (want 7)", after_90m),
    });

    // Clock skew never feeds the pet
    let skewed = decay::decayed_value(40, 10 * MICROS_PER_HOUR, 0);
    results.push(TestResult {
        name: "decay_negative_elapsed_inert".into(),
        passed: skewed == 40,
        detail: format!("future anchor leaves value at {} (want 40)", skewed),
    });

    // Evaluation frequency must not change the outcome: walk the same
    // 12 hours in steps of various sizes and compare against one jump.
    let mut split_consistent = true;
    let horizon = 12 * MICROS_PER_HOUR;
    let direct = {
        let pet = hatchling();
        resolve(&pet, horizon).pet
    };
    for step_minutes in [7, 25, 60, 97, 240] {
        let mut pet = hatchling();
        let step = step_minutes * 60 * 1_000_000i64;
        let mut now = 0;
        while now < horizon {
            now = (now + step).min(horizon);
            pet = resolve(&pet, now).pet;
        }
        if pet.hunger != direct.hunger || pet.happiness != direct.happiness {
            split_consistent = false;
        }
    }
    results.push(TestResult {
        name: "decay_split_invariant".into(),
        passed: split_consistent,
        detail: "12h of decay identical across 5 evaluation cadences".into(),
    });

    results
}

// ── 3. Leveling ─────────────────────────────────────────────────────────

fn validate_leveling(_verbose: bool) -> Vec<TestResult> {
    println!("--- Leveling ---");
    let mut results = Vec::new();

    // Linear curve
    let curve_ok = (1..=50).all(|lvl| leveling::xp_required(lvl) == lvl * 100);
    results.push(TestResult {
        name: "leveling_linear_curve".into(),
        passed: curve_ok,
        detail: "xp_required(n) == n * 100 for levels 1..=50".into(),
    });

    // Carry sweep: for a grid of gains, resolved xp must sit below the
    // requirement and no XP may be created or destroyed.
    let mut carry_ok = true;
    for gained in (0..=2000).step_by(37) {
        let p = leveling::apply_xp(1, 0, gained);
        if p.xp >= leveling::xp_required(p.level) {
            carry_ok = false;
        }
        let consumed: u32 = (1..p.level).map(leveling::xp_required).sum();
        if consumed + p.xp != gained {
            carry_ok = false;
        }
    }
    results.push(TestResult {
        name: "leveling_carry_conserves_xp".into(),
        passed: carry_ok,
        detail: "gains 0..=2000 resolve with no stale overflow or lost XP".into(),
    });

    // The two-level jump called out in the acceptance notes
    let double = leveling::apply_xp(1, 0, 350);
    results.push(TestResult {
        name: "leveling_double_carry".into(),
        passed: double.level == 3 && double.xp == 50 && double.levels_gained == 2,
        detail: format!(
            "350 XP from fresh → level {} xp {} ({} ups)",
            double.level, double.xp, double.levels_gained
        ),
    });

    results
}

// ── 4. Engagement Store Round-Trip ──────────────────────────────────────

/// In-memory stand-in for the server's pet row and journal, driving the
/// same resolve/apply glue the reducers run.
struct MemStore {
    pet: Option<PetState>,
    journal: Vec<JournalLine>,
}

#[allow(dead_code)]
struct JournalLine {
    message: String,
    xp_gained: u32,
    levels_gained: u32,
}

impl MemStore {
    fn new() -> MemStore {
        MemStore {
            pet: None,
            journal: Vec::new(),
        }
    }

    /// The Get operation: hatch on first read, else resolve and persist
    /// when decay moved a stat.
    fn refresh(&mut self, now: i64) -> PetState {
        match &self.pet {
            Some(pet) => {
                let resolved = resolve(pet, now);
                if resolved.changed {
                    self.pet = Some(resolved.pet.clone());
                }
                resolved.pet
            }
            None => {
                let hatched = PetState::hatch(now);
                self.pet = Some(hatched.clone());
                hatched
            }
        }
    }

    /// The action operation: no hatching here, rejections leave the
    /// store untouched.
    fn act(&mut self, command: &PetCommand, now: i64) -> Result<ActionOutcome, PetError> {
        let Some(pet) = &self.pet else {
            return Err(PetError::NotFound);
        };
        let outcome = apply(pet, command, now)?;
        self.pet = Some(outcome.pet.clone());
        self.journal.push(JournalLine {
            message: outcome.message.clone(),
            xp_gained: outcome.xp_gained,
            levels_gained: outcome.levels_gained,
        });
        if self.journal.len() > JOURNAL_KEEP {
            let excess = self.journal.len() - JOURNAL_KEEP;
            self.journal.drain(..excess);
        }
        Ok(outcome)
    }
}

fn hatchling() -> PetState {
    PetState::hatch(0)
}

fn validate_engagement_store(verbose: bool) -> Vec<TestResult> {
    println!("--- Engagement Store ---");
    let mut results = Vec::new();

    // Acting before any read is a defensive NotFound, not a hatch
    let mut store = MemStore::new();
    let premature = store.act(&PetCommand::Feed, 0);
    results.push(TestResult {
        name: "store_no_action_before_first_read".into(),
        passed: premature == Err(PetError::NotFound) && store.pet.is_none(),
        detail: "feed before first read → NotFound, nothing hatched".into(),
    });

    // First read hatches within bounds
    let hatched = store.refresh(0);
    results.push(TestResult {
        name: "store_lazy_hatch".into(),
        passed: store.pet.is_some()
            && (0..=100).contains(&hatched.hunger)
            && (0..=100).contains(&hatched.happiness)
            && hatched.level == 1
            && hatched.xp == 0,
        detail: format!(
            "hatched \"{}\" hunger={} happiness={}",
            hatched.name, hatched.hunger, hatched.happiness
        ),
    });

    // Literal acceptance: hunger 50, fed 3h ago, Get resolves to 35
    {
        let mut s = MemStore::new();
        s.refresh(0);
        if let Some(p) = s.pet.as_mut() {
            p.hunger = 50;
        }
        let read = s.refresh(3 * MICROS_PER_HOUR);
        results.push(TestResult {
            name: "store_decay_on_read".into(),
            passed: read.hunger == 35 && s.pet.as_ref().map(|p| p.hunger) == Some(35),
            detail: format!("hunger 50 after 3h → {} (persisted)", read.hunger),
        });
    }

    // Literal acceptance: happiness 97, play rejected, nothing written
    {
        let mut s = MemStore::new();
        s.refresh(0);
        if let Some(p) = s.pet.as_mut() {
            p.happiness = 97;
        }
        let before = s.pet.clone();
        let rejected = s.act(&PetCommand::Play, 0);
        results.push(TestResult {
            name: "store_rejection_mutates_nothing".into(),
            passed: rejected == Err(PetError::AlreadySatisfied { stat: "happiness" })
                && s.pet == before
                && s.journal.is_empty(),
            detail: "play at happiness 97 → AlreadySatisfied, store untouched".into(),
        });
    }

    // Literal acceptance: level 1 at 95 XP, feed carries into level 2
    {
        let mut s = MemStore::new();
        s.refresh(0);
        if let Some(p) = s.pet.as_mut() {
            p.xp = 95;
            p.hunger = 40;
        }
        let outcome = s.act(&PetCommand::Feed, 0);
        let ok = match &outcome {
            Ok(o) => {
                o.pet.level == 2
                    && o.pet.xp == 5
                    && o.levels_gained == 1
                    && o.message.contains("level 2")
            }
            Err(_) => false,
        };
        results.push(TestResult {
            name: "store_levelup_carry".into(),
            passed: ok,
            detail: "feed at level 1 / 95 XP → level 2, 5 XP, notice in message".into(),
        });
    }

    // A scripted week: interleaved reads and actions, invariants after
    // every operation.
    {
        let mut s = MemStore::new();
        let mut now = 0;
        s.refresh(now);
        let mut violations = 0;
        let script: &[(&str, PetCommand)] = &[
            ("feed", PetCommand::Feed),
            ("play", PetCommand::Play),
            (
                "rename",
                PetCommand::Rename {
                    name: "Waffles".into(),
                },
            ),
            (
                "retype",
                PetCommand::Retype {
                    species: Species::Penguin,
                },
            ),
        ];
        for day in 0..7 {
            for (i, (_, cmd)) in script.iter().enumerate() {
                now = (day * 24 + (i as i64) * 5) * MICROS_PER_HOUR;
                let _ = s.act(cmd, now);
                let read = s.refresh(now);
                if !(0..=100).contains(&read.hunger)
                    || !(0..=100).contains(&read.happiness)
                    || read.xp >= leveling::xp_required(read.level)
                {
                    violations += 1;
                }
            }
        }
        results.push(TestResult {
            name: "store_week_invariants".into(),
            passed: violations == 0,
            detail: format!("{} invariant violations over a scripted week", violations),
        });
        if verbose {
            if let Some(p) = &s.pet {
                println!(
                    "  After a week: \"{}\" the {} — level {} ({} XP), hunger {}, happiness {}",
                    p.name,
                    p.species.label(),
                    p.level,
                    p.xp,
                    p.hunger,
                    p.happiness
                );
            }
        }
    }

    // Journal retention: 30 successful feeds keep only the newest rows
    {
        let mut s = MemStore::new();
        let mut now = 0;
        s.refresh(now);
        let mut successes = 0;
        for _ in 0..30 {
            now += 8 * MICROS_PER_HOUR;
            if s.act(&PetCommand::Feed, now).is_ok() {
                successes += 1;
            }
        }
        results.push(TestResult {
            name: "store_journal_pruned".into(),
            passed: successes == 30 && s.journal.len() == JOURNAL_KEEP,
            detail: format!(
                "{} successes retained as {} journal rows (keep {})",
                successes,
                s.journal.len(),
                JOURNAL_KEEP
            ),
        });
    }

    // Satisfied threshold honored through the store path
    {
        let mut s = MemStore::new();
        s.refresh(0);
        if let Some(p) = s.pet.as_mut() {
            p.hunger = SATISFIED_THRESHOLD;
        }
        let rejected = s.act(&PetCommand::Feed, 0);
        results.push(TestResult {
            name: "store_threshold_is_inclusive".into(),
            passed: rejected == Err(PetError::AlreadySatisfied { stat: "hunger" }),
            detail: format!("feed at hunger {} rejected", SATISFIED_THRESHOLD),
        });
    }

    results
}

// ── 5. View Projection ──────────────────────────────────────────────────

fn validate_view_projection(_verbose: bool) -> Vec<TestResult> {
    println!("--- View Projection ---");
    let mut results = Vec::new();

    // Views carry every derived field the client renders
    let view = PetView::project(&hatchling(), 0);
    let json = match serde_json::to_string(&view) {
        Ok(j) => j,
        Err(e) => {
            results.push(TestResult {
                name: "view_serializes".into(),
                passed: false,
                detail: format!("serialize error: {}", e),
            });
            return results;
        }
    };
    let fields = [
        "id",
        "name",
        "species",
        "display_glyph",
        "hunger",
        "happiness",
        "xp",
        "level",
        "xp_required",
        "xp_progress_percent",
        "mood",
        "last_fed_at_micros",
        "last_played_at_micros",
    ];
    let missing: Vec<_> = fields
        .iter()
        .filter(|f| !json.contains(&format!("\"{}\"", f)))
        .collect();
    results.push(TestResult {
        name: "view_field_set".into(),
        passed: missing.is_empty(),
        detail: if missing.is_empty() {
            format!("all {} fields present", fields.len())
        } else {
            format!("missing fields: {:?}", missing)
        },
    });

    // Mood tiers across the full stat plane
    let mut mood_ok = true;
    for hunger in (0..=100).step_by(10) {
        for happiness in (0..=100).step_by(10) {
            let sum = hunger + happiness;
            let want = if sum >= 120 {
                Mood::Happy
            } else if sum >= 60 {
                Mood::Neutral
            } else {
                Mood::Sad
            };
            if Mood::from_stats(hunger, happiness) != want {
                mood_ok = false;
            }
        }
    }
    results.push(TestResult {
        name: "view_mood_tiers".into(),
        passed: mood_ok,
        detail: "mood classification correct across an 11x11 stat grid".into(),
    });

    // A just-fed, just-played pet reads happy; a neglected one reads sad
    let fresh = PetView::project(&hatchling(), 0);
    let neglected = PetView::project(&hatchling(), 200 * MICROS_PER_HOUR);
    results.push(TestResult {
        name: "view_mood_endpoints".into(),
        passed: fresh.mood == "happy" && neglected.mood == "sad",
        detail: format!(
            "fresh → {}, neglected 200h → {}",
            fresh.mood, neglected.mood
        ),
    });

    results
}
