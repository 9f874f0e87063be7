//! Action resolution.
//!
//! The orchestrator hands each player action, together with the current
//! player and world snapshots, to [`resolve`]. The result is a complete new
//! pair of snapshots plus either an [`Outcome`] or the [`ActionError`] that
//! rejected the action. Side effects the presentation layer cares about
//! (log lines, animations, sounds, gold flashes, modal requests) go through
//! an [`EffectSink`].
//!
//! [`ActionError`]: crate::core::ActionError

mod context;
mod encounter;
mod engine;
mod equipment;
mod items;
mod session;
mod trade;
mod turn;

pub use context::{EffectSink, NullSink, RecordingSink, ResolveContext, Severity};
pub use encounter::{attempt_objective, interact_with_threat, show_modal, take_event_item};
pub use engine::{resolve, Outcome, Resolution};
pub use equipment::{discard_equipped, equip_item, store_provision};
pub use items::use_item;
pub use session::RunSession;
pub use trade::{buy_item, sale_price, sell_from_satchel, sell_item};
pub use turn::{begin_turn, end_turn, reveal_next_event};
