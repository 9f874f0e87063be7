//! Core engine types: slot ids, players, world state, actions, RNG,
//! configuration and errors.
//!
//! Everything here is plain data. Rules live in `rules`; these types only
//! enforce their own local invariants (hand size, satchel ownership).

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, CardSource, InteractionKind, ModalKind};
pub use config::{EngineConfig, HOSTILE_HEALTH_THRESHOLD};
pub use entity::{SlotAllocator, SlotId};
pub use error::{ActionError, CatalogError, ErrorSeverity, PersistError};
pub use player::{Character, EquippedItem, Hand, PlayerState, RunStats, TurnFlags};
pub use rng::{GameRng, GameRngState};
pub use state::{ActiveEvent, EncounterStatus, WorldState};
