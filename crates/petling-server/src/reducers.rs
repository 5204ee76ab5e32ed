//! Client-facing reducers: owner registration, pet reads, pet actions.
//!
//! Each reducer runs as one transaction, so the read-decay-act-persist
//! sequence is atomic per call and any `Err` return rolls back every
//! write it made. Reducers only glue tables to petling-logic; all
//! engagement rules live there.

use crate::tables::*;
use petling_logic::commands::{apply, PetCommand, PetError};
use petling_logic::pet::{resolve, PetState, Species};
use petling_logic::tuning::JOURNAL_KEEP;
use serde::Deserialize;
use spacetimedb::{reducer, Identity, ReducerContext, Table, Timestamp};

// ── Species manifest (same JSON the simtest validates) ──────────────────
const SPECIES_MANIFEST: &str = include_str!("../../../data/species_manifest.json");

#[derive(Debug, Deserialize)]
struct SpeciesSpec {
    species: String,
    glyph: String,
    blurb: String,
}

// ============================================================================
// LIFECYCLE REDUCERS
// ============================================================================

/// Seed the species catalog from the manifest when the module is first
/// published. A manifest that does not cover every compiled species is
/// a deployment error.
#[reducer(init)]
pub fn init(ctx: &ReducerContext) -> Result<(), String> {
    let specs: Vec<SpeciesSpec> = serde_json::from_str(SPECIES_MANIFEST)
        .map_err(|e| format!("species manifest is invalid: {}", e))?;

    for species in Species::ALL {
        let spec = specs
            .iter()
            .find(|s| Species::parse(&s.species) == Some(species))
            .ok_or_else(|| format!("species manifest is missing {}", species.label()))?;
        ctx.db.species_catalog().insert(SpeciesCatalog {
            species: species.as_u8(),
            label: species.label().to_string(),
            glyph: spec.glyph.clone(),
            blurb: spec.blurb.clone(),
        });
    }

    log::info!("Seeded species catalog with {} entries", Species::ALL.len());
    Ok(())
}

/// Called when a client connects
#[reducer(client_connected)]
pub fn client_connected(ctx: &ReducerContext) {
    log::info!("Client connected: {:?}", ctx.sender);
    ctx.db.connected_client().insert(ConnectedClient {
        identity: ctx.sender,
        connected_at: ctx.timestamp,
    });
}

/// Called when a client disconnects
#[reducer(client_disconnected)]
pub fn client_disconnected(ctx: &ReducerContext) {
    log::info!("Client disconnected: {:?}", ctx.sender);
    if let Some(client) = ctx.db.connected_client().identity().find(ctx.sender) {
        ctx.db.connected_client().identity().delete(client.identity);
    }
}

// ============================================================================
// OWNER REDUCERS
// ============================================================================

/// Record the caller's owner profile and role. Registering again
/// updates the existing profile.
#[reducer]
pub fn register_owner(ctx: &ReducerContext, display_name: String, role: u8) -> Result<(), String> {
    let display_name = display_name.trim().to_string();
    if display_name.is_empty() {
        return Err("display name cannot be empty".to_string());
    }
    if !roles::is_known(role) {
        return Err(format!("unknown role {}", role));
    }

    match ctx.db.owner_profile().owner().find(ctx.sender) {
        Some(mut profile) => {
            profile.display_name = display_name;
            profile.role = role;
            ctx.db.owner_profile().owner().update(profile);
            log::info!("Owner profile updated: {:?} (role {})", ctx.sender, role);
        }
        None => {
            ctx.db.owner_profile().insert(OwnerProfile {
                owner: ctx.sender,
                display_name,
                role,
                registered_at: ctx.timestamp,
            });
            log::info!("Owner registered: {:?} (role {})", ctx.sender, role);
        }
    }
    Ok(())
}

// ============================================================================
// PET REDUCERS
// ============================================================================

/// Bring the caller's pet up to the present moment; the Get operation.
///
/// Hatches a pet on first read. When decay moved either stat, the
/// reconciled snapshot is persisted; subscribed clients then see the
/// fresh row.
#[reducer]
pub fn refresh_pet(ctx: &ReducerContext) -> Result<(), String> {
    require_keeper(ctx).map_err(|e| e.to_string())?;
    let now = ctx.timestamp.to_micros_since_unix_epoch();

    match ctx.db.pet().owner().find(ctx.sender) {
        Some(row) => {
            let resolved = resolve(&to_state(&row), now);
            if resolved.changed {
                let mut row = row;
                sync_row(&mut row, &resolved.pet);
                ctx.db.pet().id().update(row);
            }
        }
        None => {
            let hatched = ctx.db.pet().insert(new_row(ctx.sender, &PetState::hatch(now)));
            log::info!("Hatched pet {} for {:?}", hatched.id, ctx.sender);
        }
    }
    Ok(())
}

/// Apply one engagement action to the caller's pet.
///
/// `action` is one of "feed", "play", "rename", "retype"; `name` and
/// `species` carry the rename/retype parameters. Rejections come back
/// as `Err` with the user-facing message and leave no trace in the
/// store.
#[reducer]
pub fn pet_action(
    ctx: &ReducerContext,
    action: String,
    name: Option<String>,
    species: Option<String>,
) -> Result<(), String> {
    require_keeper(ctx).map_err(|e| e.to_string())?;
    let command = PetCommand::parse(&action, name, species).map_err(|e| e.to_string())?;
    let now = ctx.timestamp.to_micros_since_unix_epoch();

    let Some(row) = ctx.db.pet().owner().find(ctx.sender) else {
        return Err(PetError::NotFound.to_string());
    };

    let outcome = apply(&to_state(&row), &command, now).map_err(|e| e.to_string())?;

    let mut row = row;
    sync_row(&mut row, &outcome.pet);
    let pet_id = row.id;
    ctx.db.pet().id().update(row);

    record_journal(ctx, &command, &outcome.message, outcome.xp_gained, outcome.levels_gained);
    log::info!("Pet {} {}: {}", pet_id, action.trim().to_ascii_lowercase(), outcome.message);
    Ok(())
}

// ============================================================================
// HELPERS
// ============================================================================

/// Reject callers without a profile or whose role cannot keep a pet.
fn require_keeper(ctx: &ReducerContext) -> Result<(), PetError> {
    let Some(profile) = ctx.db.owner_profile().owner().find(ctx.sender) else {
        return Err(PetError::Unauthorized);
    };
    if profile.role != roles::KEEPER {
        return Err(PetError::Forbidden);
    }
    Ok(())
}

fn to_state(row: &Pet) -> PetState {
    let species = Species::from_u8(row.species).unwrap_or_else(|| {
        log::warn!(
            "Pet {} has unknown species {}; treating as Cat",
            row.id,
            row.species
        );
        Species::Cat
    });
    PetState {
        id: row.id,
        name: row.name.clone(),
        species,
        hunger: row.hunger,
        happiness: row.happiness,
        last_fed_at_micros: row.last_fed_at.to_micros_since_unix_epoch(),
        last_played_at_micros: row.last_played_at.to_micros_since_unix_epoch(),
        xp: row.xp,
        level: row.level,
    }
}

fn sync_row(row: &mut Pet, state: &PetState) {
    row.name = state.name.clone();
    row.species = state.species.as_u8();
    row.hunger = state.hunger;
    row.happiness = state.happiness;
    row.last_fed_at = Timestamp::from_micros_since_unix_epoch(state.last_fed_at_micros);
    row.last_played_at = Timestamp::from_micros_since_unix_epoch(state.last_played_at_micros);
    row.xp = state.xp;
    row.level = state.level;
}

fn new_row(owner: Identity, state: &PetState) -> Pet {
    Pet {
        id: 0,
        owner,
        name: state.name.clone(),
        species: state.species.as_u8(),
        hunger: state.hunger,
        happiness: state.happiness,
        last_fed_at: Timestamp::from_micros_since_unix_epoch(state.last_fed_at_micros),
        last_played_at: Timestamp::from_micros_since_unix_epoch(state.last_played_at_micros),
        xp: state.xp,
        level: state.level,
    }
}

/// Append a journal row for a successful action, then prune the
/// owner's oldest entries beyond the retention window.
fn record_journal(
    ctx: &ReducerContext,
    command: &PetCommand,
    message: &str,
    xp_gained: u32,
    levels_gained: u32,
) {
    let action = match command {
        PetCommand::Feed => journal_actions::FEED,
        PetCommand::Play => journal_actions::PLAY,
        PetCommand::Rename { .. } => journal_actions::RENAME,
        PetCommand::Retype { .. } => journal_actions::RETYPE,
    };
    ctx.db.pet_journal().insert(PetJournal {
        id: 0,
        owner: ctx.sender,
        action,
        message: message.to_string(),
        xp_gained,
        levels_gained,
        at: ctx.timestamp,
    });

    let mut entries: Vec<PetJournal> = ctx.db.pet_journal().owner().filter(ctx.sender).collect();
    if entries.len() > JOURNAL_KEEP {
        // auto_inc ids grow with insertion order; lowest ids are oldest.
        entries.sort_by_key(|e| e.id);
        let excess = entries.len() - JOURNAL_KEEP;
        for stale in entries.into_iter().take(excess) {
            ctx.db.pet_journal().id().delete(stale.id);
        }
    }
}
