//! SpacetimeDB table definitions for the pet engagement engine.
//!
//! One pet row per owner holds exactly the persisted fields; everything
//! derived (mood, xp_required, progress) is computed per request in
//! petling-logic and never stored.

use spacetimedb::{table, Identity, Timestamp};

// ============================================================================
// PETS
// ============================================================================

/// A pet, one per owner. Stats may be stale between reads; reducers
/// always resolve decay before acting on them.
#[table(name = pet, public)]
#[derive(Clone)]
pub struct Pet {
    #[primary_key]
    #[auto_inc]
    pub id: u64,
    /// Owning subject. Unique: enforces the one-pet-per-owner rule.
    #[unique]
    pub owner: Identity,
    pub name: String,
    pub species: u8,            // species_ids::*
    pub hunger: i32,            // 0-100, decays from last_fed_at
    pub happiness: i32,         // 0-100, decays from last_played_at
    pub last_fed_at: Timestamp,
    pub last_played_at: Timestamp,
    pub xp: u32,
    pub level: u32,
}

// ============================================================================
// OWNERS
// ============================================================================

/// Registered owner account with its externally assigned role.
#[table(name = owner_profile, public)]
#[derive(Clone)]
pub struct OwnerProfile {
    #[primary_key]
    pub owner: Identity,
    pub display_name: String,
    pub role: u8,               // roles::*
    pub registered_at: Timestamp,
}

/// Connected client session.
#[table(name = connected_client, public)]
pub struct ConnectedClient {
    #[primary_key]
    pub identity: Identity,
    pub connected_at: Timestamp,
}

// ============================================================================
// JOURNAL & FLAVOR
// ============================================================================

/// One row per successful action; how action outcomes reach subscribed
/// clients. Pruned to the newest rows per owner.
#[table(name = pet_journal, public)]
#[derive(Clone)]
pub struct PetJournal {
    #[primary_key]
    #[auto_inc]
    pub id: u64,
    #[index(btree)]
    pub owner: Identity,
    pub action: u8,             // journal_actions::*
    pub message: String,
    pub xp_gained: u32,
    pub levels_gained: u32,
    pub at: Timestamp,
}

/// Read-only species flavor, seeded from the manifest at module init.
#[table(name = species_catalog, public)]
pub struct SpeciesCatalog {
    #[primary_key]
    pub species: u8,            // species_ids::*
    pub label: String,
    pub glyph: String,
    pub blurb: String,
}

// ============================================================================
// ENUM CONSTANTS
// ============================================================================

pub mod roles {
    /// The designated pet-owning role.
    pub const KEEPER: u8 = 0;
    /// Read-only dashboard role; cannot keep a pet.
    pub const OBSERVER: u8 = 1;

    pub fn is_known(role: u8) -> bool {
        matches!(role, KEEPER | OBSERVER)
    }
}

pub mod journal_actions {
    pub const FEED: u8 = 0;
    pub const PLAY: u8 = 1;
    pub const RENAME: u8 = 2;
    pub const RETYPE: u8 = 3;
}
