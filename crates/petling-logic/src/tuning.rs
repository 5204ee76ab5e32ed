//! Gameplay constants — decay rate, action deltas, XP rewards, curves.
//!
//! Every tunable number in the engagement engine lives here so the
//! decay and leveling laws stay verifiable in one place. Both the
//! SpacetimeDB server and the native simtest use these.

/// Microseconds per hour, the unit all decay math runs in.
pub const MICROS_PER_HOUR: i64 = 3_600_000_000;

/// Points a stat loses per elapsed hour since its anchor.
pub const DECAY_PER_HOUR: i32 = 5;

/// Lower stat bound.
pub const STAT_MIN: i32 = 0;

/// Upper stat bound.
pub const STAT_MAX: i32 = 100;

/// Feed/Play are rejected when the target stat is at or above this.
pub const SATISFIED_THRESHOLD: i32 = 95;

/// How much one feeding raises hunger (fullness), before the cap.
pub const FEED_HUNGER_DELTA: i32 = 30;

/// How much one play session raises happiness, before the cap.
pub const PLAY_HAPPINESS_DELTA: i32 = 25;

/// XP granted per successful feed.
pub const FEED_XP: u32 = 10;

/// XP granted per successful play.
pub const PLAY_XP: u32 = 15;

/// Linear leveling curve: level N needs `N * this` XP to advance.
pub const XP_PER_LEVEL_STEP: u32 = 100;

/// Maximum pet name length in characters, after trimming.
pub const NAME_MAX_CHARS: usize = 20;

/// Average stat value at or above which the pet counts as neutral.
pub const MOOD_NEUTRAL_MIN_AVG: i32 = 30;

/// Average stat value at or above which the pet counts as happy.
pub const MOOD_HAPPY_MIN_AVG: i32 = 60;

/// Hunger a freshly hatched pet starts with.
pub const HATCH_HUNGER: i32 = 70;

/// Happiness a freshly hatched pet starts with.
pub const HATCH_HAPPINESS: i32 = 70;

/// Name a freshly hatched pet starts with.
pub const HATCH_NAME: &str = "Pip";

/// Journal rows retained per owner; older entries are pruned.
pub const JOURNAL_KEEP: usize = 20;
