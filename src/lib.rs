//! # frontier-engine
//!
//! Card effect and combat resolution for a frontier survival card game.
//!
//! ## Design Principles
//!
//! 1. **Snapshots In, Snapshots Out**: every action takes the current player
//!    and world state and returns a complete new pair. A rejected action
//!    returns its inputs untouched.
//!
//! 2. **Content Is Data**: cards, characters and tuning come from a
//!    `CardCatalog` and an `EngineConfig`. The engine never hardcodes a card.
//!
//! 3. **Injected Randomness**: every draw, shuffle and skill check goes
//!    through a seeded `GameRng`, so a run replays exactly from its seed.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, which makes
//!   copy-on-entry resolution cheap.
//!
//! - **Presentation Out of Band**: log lines, animations, sounds and modal
//!   requests are emitted through an `EffectSink`; the engine holds no UI
//!   state.
//!
//! ## Modules
//!
//! - `core`: slot ids, player and world state, actions, RNG, configuration, errors
//! - `cards`: card templates, catalog, classification, NG+ scaling, persistence shape
//! - `effects`: effect vocabulary and the modifier calculator
//! - `deck`: event and store deck construction
//! - `threats`: hostility, combat consequences, traps and trophies
//! - `rules`: action resolution, turn boundaries and the run session

pub mod cards;
pub mod core;
pub mod deck;
pub mod effects;
pub mod rules;
pub mod threats;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionError, ActiveEvent, CardSource, Character, EncounterStatus, EngineConfig, GameRng,
    GameRngState, InteractionKind, ModalKind, PlayerState, SlotId, WorldState,
};

pub use crate::cards::{get_scaled_card, Card, CardCatalog, CardId, CardType, SubType};

pub use crate::effects::{
    calculate_attack_power, calculate_heal_amount, Effect, UpgradeKind, WeaponClass,
};

pub use crate::deck::{build_event_deck, build_store_deck};

pub use crate::threats::{create_trophy_or_bounty_card, is_event_considered_hostile};

pub use crate::rules::{
    begin_turn, end_turn, resolve, reveal_next_event, EffectSink, NullSink, Outcome, RecordingSink,
    Resolution, ResolveContext, RunSession, Severity,
};
