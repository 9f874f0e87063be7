//! Threat lifecycle: hostility, combat consequences and spoils.
//!
//! ```text
//! None -> Revealed -> Hostile | NonHostile | Pacified
//!      -> Defeated | Fled | Cured | TakenAsItem -> None
//! ```

mod encounter;
mod hostility;
mod trophy;

pub use encounter::{
    base_event_card, resolve_defeat, spring_trap, steal_gold, stow_spoil, strike_active_threat,
    Strike, TrapOutcome,
};
pub use hostility::is_event_considered_hostile;
pub use trophy::{create_trophy_or_bounty_card, FALLBACK_BOUNTY};
