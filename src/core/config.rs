//! Engine configuration.
//!
//! Balance knobs and content hooks the engine reads but never changes:
//! - Hand and equip row sizes
//! - Event deck quotas
//! - Boss, apex predator and pest ids
//!
//! Defaults reproduce the standard game; `from_json` loads overrides.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Threats at or below this health are exempt from blocking trade.
pub const HOSTILE_HEALTH_THRESHOLD: i64 = 6;

/// Complete engine configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of hand slots.
    pub hand_size: usize,

    /// Maximum number of equipped items.
    pub equip_slots: usize,

    /// Flat attack bonus for a weapon used from an equip slot.
    pub equip_bonus: i64,

    /// Target length of a freshly built event deck.
    pub event_deck_size: usize,

    /// Maximum threats drawn into an event deck.
    pub threat_quota: usize,

    /// Maximum illness/environmental cards drawn into an event deck.
    pub hazard_quota: usize,

    /// Upper bound of the random valuable count (inclusive).
    pub max_valuables: usize,

    /// Provisions discarded by an objective attempt.
    pub objective_cost: usize,

    /// Damage dealt when a lingering illness id cannot be resolved.
    pub linger_fallback_damage: i64,

    /// Flat bonus added to threat and hazard stats on reveal.
    pub difficulty_bonus: i64,

    /// Cards shown in the store display.
    pub store_display_size: usize,

    /// End-of-run boss revealed after a successful objective attempt.
    pub boss_id: Option<CardId>,

    /// Ids counted as apex predator kills in the run statistics.
    pub apex_predator_ids: FxHashSet<CardId>,

    /// Ids counted as pest kills in the run statistics.
    pub pest_ids: FxHashSet<CardId>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hand_size: 6,
            equip_slots: 3,
            equip_bonus: 1,
            event_deck_size: 20,
            threat_quota: 15,
            hazard_quota: 2,
            max_valuables: 3,
            objective_cost: 5,
            linger_fallback_damage: 2,
            difficulty_bonus: 0,
            store_display_size: 4,
            boss_id: None,
            apex_predator_ids: FxHashSet::default(),
            pest_ids: FxHashSet::default(),
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    #[must_use]
    pub fn with_equip_slots(mut self, slots: usize) -> Self {
        self.equip_slots = slots;
        self
    }

    #[must_use]
    pub fn with_difficulty_bonus(mut self, bonus: i64) -> Self {
        self.difficulty_bonus = bonus;
        self
    }

    #[must_use]
    pub fn with_boss(mut self, id: impl Into<String>) -> Self {
        self.boss_id = Some(CardId::new(id));
        self
    }

    #[must_use]
    pub fn with_apex_predator(mut self, id: impl Into<String>) -> Self {
        self.apex_predator_ids.insert(CardId::new(id));
        self
    }

    #[must_use]
    pub fn with_pest(mut self, id: impl Into<String>) -> Self {
        self.pest_ids.insert(CardId::new(id));
        self
    }

    /// Is `id` the configured end-of-run boss?
    #[must_use]
    pub fn is_boss(&self, id: &CardId) -> bool {
        self.boss_id.as_ref() == Some(id)
    }
}
