//! Card system: templates, catalog, classification, scaling and the
//! persisted card shape.
//!
//! ## Key Types
//!
//! - `CardId`: identifier of a catalog template
//! - `Card`: template or instance (instances carry run-time overrides)
//! - `CardCatalog`: read-only id lookup supplied by content
//! - `SerializedCard`: bare id or full card, as saved decks store them
//!
//! ## Scaling
//!
//! `get_scaled_card` and `apply_difficulty_bonus` return `Cow<Card>` and
//! borrow the input whenever nothing changes.

pub mod classify;
pub mod definition;
pub mod persist;
pub mod registry;
pub mod scaling;

pub use definition::{Card, CardId, CardType, SubType};
pub use persist::{
    decode_card, encode_card, migrate_legacy_satchels, LegacyLoadout, SerializedCard, WorldSnapshot,
};
pub use registry::CardCatalog;
pub use scaling::{
    apply_difficulty_bonus, get_scaled_card, is_theme_milestone, scaled_price, BaseStats,
    ScaleStamp,
};
