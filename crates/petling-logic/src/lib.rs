//! Pure engagement logic for Petling.
//!
//! This crate contains all pet-engine logic that is independent of any
//! database or runtime. Functions take plain data and return results,
//! making them unit-testable and portable across SpacetimeDB (WASM)
//! modules and native harness binaries.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`commands`] | Tagged-union pet commands and the pure action reducer |
//! | [`decay`] | Lazy linear stat decay anchored on last-interaction time |
//! | [`leveling`] | XP thresholds and multi-level carry resolution |
//! | [`pet`] | Pet state, species, mood classification, resolved views |
//! | [`tuning`] | Gameplay constants (decay rate, deltas, curves) |

pub mod commands;
pub mod decay;
pub mod leveling;
pub mod pet;
pub mod tuning;
