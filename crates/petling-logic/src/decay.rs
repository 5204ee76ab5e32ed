//! Lazy linear stat decay.
//!
//! Stats are never ticked by a scheduler. Instead, each stat carries an
//! anchor timestamp (last feed or last play) and is decayed on demand
//! from the elapsed wall-clock time since that anchor. The same law
//! applies to hunger and happiness; only the anchors differ.
//!
//! ```
//! use petling_logic::decay::decayed_value;
//! use petling_logic::tuning::MICROS_PER_HOUR;
//!
//! // 3 hours since last feed: 50 - 3 * 5 = 35.
//! assert_eq!(decayed_value(50, 0, 3 * MICROS_PER_HOUR), 35);
//! ```

use crate::tuning::{DECAY_PER_HOUR, MICROS_PER_HOUR, STAT_MIN};

/// Whole points of decay accrued between `anchor_micros` and `now_micros`.
///
/// Fractional hours contribute fractionally and the total is floored,
/// so 90 minutes at 5/hour yields 7 points, not 8. Negative elapsed
/// time (host clock moved backwards) accrues nothing.
pub fn decay_points(anchor_micros: i64, now_micros: i64) -> i32 {
    let elapsed = now_micros.saturating_sub(anchor_micros);
    if elapsed <= 0 {
        return 0;
    }
    // i128 keeps the product exact for any representable timestamp pair.
    let points = (elapsed as i128) * (DECAY_PER_HOUR as i128) / (MICROS_PER_HOUR as i128);
    points.min(i32::MAX as i128) as i32
}

/// Present value of a stat whose last-known value was `value` at
/// `anchor_micros`. Never rises above `value`, never falls below zero.
pub fn decayed_value(value: i32, anchor_micros: i64, now_micros: i64) -> i32 {
    let points = decay_points(anchor_micros, now_micros);
    value.saturating_sub(points).max(STAT_MIN)
}

/// Exact time `points` whole points of decay take to accrue.
///
/// Advancing an anchor by this after consuming `points` keeps the
/// sub-point remainder in place, so decay accumulates identically
/// whether a stat is evaluated once or a hundred times over the same
/// span.
pub fn micros_consumed(points: i32) -> i64 {
    ((points as i128) * (MICROS_PER_HOUR as i128) / (DECAY_PER_HOUR as i128)) as i64
}
