//! Tagged-union pet commands and the pure action reducer.
//!
//! The four actions (feed, play, rename, retype) are modeled as one
//! [`PetCommand`] type applied by a single pure function:
//! `(state, command, now) -> Result<outcome, error>`. Preconditions are
//! always judged against the decay-resolved state, never against what
//! happens to be stored, and a rejected command leaves the state
//! untouched.
//!
//! ```
//! use petling_logic::commands::{apply, PetCommand};
//! use petling_logic::pet::PetState;
//!
//! let pet = PetState::hatch(0);
//! let fed = apply(&pet, &PetCommand::Feed, 0).unwrap();
//! assert_eq!(fed.pet.hunger, 100);
//! assert_eq!(fed.xp_gained, 10);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::leveling;
use crate::pet::{resolve, PetState, Species};
use crate::tuning::{
    FEED_HUNGER_DELTA, FEED_XP, NAME_MAX_CHARS, PLAY_HAPPINESS_DELTA, PLAY_XP,
    SATISFIED_THRESHOLD, STAT_MAX,
};

/// A validated engagement command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PetCommand {
    Feed,
    Play,
    Rename { name: String },
    Retype { species: Species },
}

impl PetCommand {
    /// Parse a wire action identifier plus its optional parameters.
    ///
    /// The identifier is matched case-insensitively; anything outside
    /// the four known actions is an [`PetError::UnknownAction`] before
    /// any pet state is consulted. Rename carries its raw name through
    /// so length validation happens with the other preconditions in
    /// [`apply`].
    pub fn parse(
        action: &str,
        name: Option<String>,
        species: Option<String>,
    ) -> Result<PetCommand, PetError> {
        match action.trim().to_ascii_lowercase().as_str() {
            "feed" => Ok(PetCommand::Feed),
            "play" => Ok(PetCommand::Play),
            "rename" => {
                let name = name.ok_or_else(|| PetError::InvalidInput {
                    reason: "rename needs a name".to_string(),
                })?;
                Ok(PetCommand::Rename { name })
            }
            "retype" => {
                let token = species.ok_or_else(|| PetError::InvalidInput {
                    reason: "retype needs a species".to_string(),
                })?;
                let species = Species::parse(&token).ok_or_else(|| PetError::InvalidInput {
                    reason: format!("unrecognized species \"{}\"", token.trim()),
                })?;
                Ok(PetCommand::Retype { species })
            }
            other => Err(PetError::UnknownAction {
                action: other.to_string(),
            }),
        }
    }
}

/// Every way an engagement request can be rejected.
///
/// All of these are user-facing rejections, not faults; the message is
/// what the client sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PetError {
    /// Caller has no registered owner profile.
    #[error("unauthorized: register an owner profile first")]
    Unauthorized,
    /// Caller's role is not allowed to keep a pet.
    #[error("forbidden: this role cannot keep a pet")]
    Forbidden,
    /// Action requested before any read has hatched a pet.
    #[error("no pet exists for this owner yet")]
    NotFound,
    /// Feed/Play precondition not met; wait for the stat to decay.
    #[error("{stat} is already satisfied")]
    AlreadySatisfied { stat: &'static str },
    /// Malformed rename/retype parameters.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
    /// Unrecognized wire action identifier.
    #[error("unknown action \"{action}\"")]
    UnknownAction { action: String },
}

/// Result of a successfully applied command: the state to persist plus
/// the user-facing message and rewards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Decayed-then-acted state, ready to persist in one write.
    pub pet: PetState,
    pub message: String,
    pub xp_gained: u32,
    pub levels_gained: u32,
}

/// Apply one command to a pet as of `now_micros`.
///
/// Decay is resolved first, so preconditions see current values: a pet
/// stored at hunger 96 but fed hours ago can still be fed now. On
/// success the outcome carries the full net state (decay plus action);
/// on rejection the input state is untouched.
pub fn apply(
    pet: &PetState,
    command: &PetCommand,
    now_micros: i64,
) -> Result<ActionOutcome, PetError> {
    let mut pet = resolve(pet, now_micros).pet;

    let (mut message, xp_gained) = match command {
        PetCommand::Feed => {
            if pet.hunger >= SATISFIED_THRESHOLD {
                return Err(PetError::AlreadySatisfied { stat: "hunger" });
            }
            pet.hunger = (pet.hunger + FEED_HUNGER_DELTA).min(STAT_MAX);
            pet.last_fed_at_micros = pet.last_fed_at_micros.max(now_micros);
            (format!("{} gobbles up the treat!", pet.name), FEED_XP)
        }
        PetCommand::Play => {
            if pet.happiness >= SATISFIED_THRESHOLD {
                return Err(PetError::AlreadySatisfied { stat: "happiness" });
            }
            pet.happiness = (pet.happiness + PLAY_HAPPINESS_DELTA).min(STAT_MAX);
            pet.last_played_at_micros = pet.last_played_at_micros.max(now_micros);
            (format!("{} had a wonderful time playing!", pet.name), PLAY_XP)
        }
        PetCommand::Rename { name } => {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(PetError::InvalidInput {
                    reason: "name cannot be empty".to_string(),
                });
            }
            if trimmed.chars().count() > NAME_MAX_CHARS {
                return Err(PetError::InvalidInput {
                    reason: format!("name cannot exceed {} characters", NAME_MAX_CHARS),
                });
            }
            let old = std::mem::replace(&mut pet.name, trimmed.to_string());
            (format!("{} answers to {} now.", old, pet.name), 0)
        }
        PetCommand::Retype { species } => {
            pet.species = *species;
            (
                format!(
                    "{} shimmers and becomes a {} {}",
                    pet.name,
                    species.label(),
                    species.glyph()
                ),
                0,
            )
        }
    };

    let mut levels_gained = 0;
    if xp_gained > 0 {
        let progress = leveling::apply_xp(pet.level, pet.xp, xp_gained);
        levels_gained = progress.levels_gained;
        pet.level = progress.level;
        pet.xp = progress.xp;
        if levels_gained > 0 {
            message.push_str(&format!(" {} reached level {}!", pet.name, pet.level));
        }
    }

    Ok(ActionOutcome {
        pet,
        message,
        xp_gained,
        levels_gained,
    })
}
