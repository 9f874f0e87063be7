//! Error types.
//!
//! Nothing here is fatal to the engine: a rejected action leaves player and
//! world state untouched and is reported through the log sink.

use crate::cards::CardId;

/// Severity classification for rejections, mirrored onto the log sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// The action's preconditions were not met.
    Validation,
    /// State or content was inconsistent and could not be recovered.
    Integrity,
}

/// Why an action was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("the turn has already ended")]
    TurnEnded,

    #[error("no card at {0}")]
    NoCardAtSource(String),

    #[error("{0} cannot be used this way")]
    NotUsable(String),

    #[error("{0} must be equipped to take effect")]
    MustEquip(String),

    #[error("there is no threat to attack")]
    NoLiveThreat,

    #[error("{0} has already been used this turn")]
    AlreadyUsedThisTurn(String),

    #[error("no {0} weapon to pair with this technique")]
    NoQualifyingWeapon(&'static str),

    #[error("a trap cannot be set while a hostile threat is present")]
    TrapWhileHostile,

    #[error("cannot rest by a campfire while a hostile threat is present")]
    CampfireWhileHostile,

    #[error("nothing to cure")]
    NothingToCure,

    #[error("no cards left to draw")]
    NothingToDraw,

    #[error("the event deck is empty")]
    EventDeckEmpty,

    #[error("an item has already been equipped this turn")]
    AlreadyEquippedThisTurn,

    #[error("no free equip slot")]
    NoFreeSlot,

    #[error("{0} cannot be equipped")]
    NotEquippable(String),

    #[error("only provisions can be stored")]
    NotAProvision,

    #[error("no equipped satchel has room")]
    NoSatchelSpace,

    #[error("hand is full")]
    HandFull,

    #[error("trading is blocked by a hostile threat")]
    TradeBlocked,

    #[error("not enough gold: need {needed}, have {available}")]
    InsufficientGold { needed: i64, available: i64 },

    #[error("{0} has no valid price")]
    InvalidPrice(String),

    #[error("{0} cannot be sold")]
    NotSellable(String),

    #[error("there is no item to take")]
    NoItemToTake,

    #[error("an event action has already been taken this turn")]
    EventActionTaken,

    #[error("need {needed} provisions, have {available}")]
    NotEnoughProvisions { needed: usize, available: usize },

    #[error("the objective has already been attempted this turn")]
    ObjectiveAlreadyAttempted,

    #[error("there is nobody to interact with")]
    NoInteractionTarget,

    #[error("{0} cannot be approached that way")]
    WrongInteraction(String),

    #[error("{0} is already pacified")]
    AlreadyPacified(String),

    #[error("{0} still blocks the trail")]
    EncounterInProgress(String),
}

impl ActionError {
    #[must_use]
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidPrice(_) | Self::EventDeckEmpty => ErrorSeverity::Integrity,
            _ => ErrorSeverity::Validation,
        }
    }
}

/// Errors loading card content.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("card id {0} is registered twice")]
    DuplicateId(CardId),

    #[error("malformed card data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors restoring persisted state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PersistError {
    #[error("saved card id {0} is not in the catalog")]
    UnknownCard(CardId),
}
