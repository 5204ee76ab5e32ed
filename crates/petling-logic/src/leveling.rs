//! XP thresholds and level-carry resolution.
//!
//! The leveling curve is linear: level N needs `N * 100` XP to reach
//! level N+1, counted from the start of the level (not cumulative).
//! A single XP gain can cross several thresholds at once; carry
//! resolution subtracts each level's own requirement in turn until the
//! remainder sits below the current requirement.

use crate::tuning::XP_PER_LEVEL_STEP;

/// XP needed to advance out of `level`.
pub fn xp_required(level: u32) -> u32 {
    level.saturating_mul(XP_PER_LEVEL_STEP)
}

/// Percent of the current level's requirement already earned, capped
/// at 100.
pub fn xp_progress_percent(level: u32, xp: u32) -> u32 {
    let required = xp_required(level);
    if required == 0 {
        return 100;
    }
    ((xp as u64 * 100) / required as u64).min(100) as u32
}

/// Level and XP after applying a gain, with every crossed threshold
/// resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: u32,
    pub xp: u32,
    /// Thresholds crossed by this gain (0 = no level-up).
    pub levels_gained: u32,
}

/// Apply an XP gain and resolve level-ups.
///
/// Each crossing subtracts the requirement of the level being left, so
/// a gain spanning two thresholds pays each level's own cost rather
/// than a single flat amount. The returned `xp` always sits strictly
/// below `xp_required(level)`.
pub fn apply_xp(mut level: u32, mut xp: u32, gained: u32) -> LevelProgress {
    xp = xp.saturating_add(gained);
    let mut levels_gained = 0;
    while xp >= xp_required(level) {
        xp -= xp_required(level);
        level = level.saturating_add(1);
        levels_gained += 1;
    }
    LevelProgress {
        level,
        xp,
        levels_gained,
    }
}
