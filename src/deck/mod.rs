//! Deck construction for a run.
//!
//! Decks hold base, unscaled event cards; NG+ scaling happens at reveal.
//! Store decks hold priced instances, scaled for the level they were built
//! at.

mod event;
mod store;

pub use event::{build_event_deck, interleave};
pub use store::build_store_deck;
