//! Card templates and instances.
//!
//! A `Card` is a value: the catalog holds templates, and every card that
//! lives in a deck, hand, or slot is an owned copy that may carry run-time
//! overrides (scaling stamp, stored satchel contents, illness countdown).
//! Instances never point back into the catalog.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use super::scaling::ScaleStamp;
use crate::effects::Effect;

/// Unique identifier of a card template.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CardId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Top-level card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Event,
    Item,
    Provision,
    Action,
    #[serde(rename = "Player Upgrade")]
    PlayerUpgrade,
    Trophy,
    #[serde(rename = "Objective Proof")]
    ObjectiveProof,
}

/// Card sub-type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubType {
    Animal,
    Human,
    Illness,
    Environmental,
    Objective,
    Storage,
}

/// A card template or instance.
///
/// ## Example
///
/// ```
/// use frontier_engine::cards::{Card, CardType, SubType};
/// use frontier_engine::effects::Effect;
///
/// let wolf = Card::new("wolf", "Wolf", CardType::Event)
///     .with_sub_type(SubType::Animal)
///     .with_health(7)
///     .with_effect(Effect::damage(2));
///
/// assert!(wolf.is_threat());
/// assert_eq!(wolf.threat_damage(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,

    pub name: String,

    #[serde(rename = "type")]
    pub card_type: CardType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<SubType>,

    /// Current health. Threats only; never negative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<i64>,

    /// Bounty for threats, face value for trophies and valuables.
    #[serde(default)]
    pub gold_value: i64,

    /// Store price. Zero means the card is not sold in the store.
    #[serde(default)]
    pub buy_cost: i64,

    #[serde(default)]
    pub sell_value: i64,

    /// Provision capacity of a storage item.
    #[serde(default)]
    pub capacity: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,

    /// Secondary effect fired once on pickup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immediate_effect: Option<Effect>,

    // === Instance overrides ===
    /// Satchel contents retained while the container is off the equip row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stored: Option<Vec<Card>>,

    /// Pre-scaling stats when NG+ scaling has been applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaling: Option<ScaleStamp>,

    /// Days left on an illness afflicting the player.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_days: Option<u32>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub immediate_spent: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cheat: bool,
}

impl Card {
    /// Create a bare card template.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            card_type,
            sub_type: None,
            health: None,
            gold_value: 0,
            buy_cost: 0,
            sell_value: 0,
            capacity: 0,
            effect: None,
            immediate_effect: None,
            stored: None,
            scaling: None,
            remaining_days: None,
            immediate_spent: false,
            cheat: false,
        }
    }

    #[must_use]
    pub fn with_sub_type(mut self, sub_type: SubType) -> Self {
        self.sub_type = Some(sub_type);
        self
    }

    #[must_use]
    pub fn with_health(mut self, health: i64) -> Self {
        self.health = Some(health.max(0));
        self
    }

    #[must_use]
    pub fn with_gold_value(mut self, gold: i64) -> Self {
        self.gold_value = gold;
        self
    }

    #[must_use]
    pub fn with_buy_cost(mut self, cost: i64) -> Self {
        self.buy_cost = cost;
        self
    }

    #[must_use]
    pub fn with_sell_value(mut self, value: i64) -> Self {
        self.sell_value = value;
        self
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }

    #[must_use]
    pub fn with_immediate_effect(mut self, effect: Effect) -> Self {
        self.immediate_effect = Some(effect);
        self
    }

    // === Classification ===

    #[must_use]
    pub fn is_event(&self) -> bool {
        self.card_type == CardType::Event
    }

    /// An Event with sub-type animal or human.
    #[must_use]
    pub fn is_threat(&self) -> bool {
        self.is_event() && matches!(self.sub_type, Some(SubType::Animal | SubType::Human))
    }

    #[must_use]
    pub fn is_animal(&self) -> bool {
        self.is_event() && self.sub_type == Some(SubType::Animal)
    }

    #[must_use]
    pub fn is_human(&self) -> bool {
        self.is_event() && self.sub_type == Some(SubType::Human)
    }

    #[must_use]
    pub fn is_illness(&self) -> bool {
        self.sub_type == Some(SubType::Illness)
    }

    #[must_use]
    pub fn is_environmental(&self) -> bool {
        self.is_event() && self.sub_type == Some(SubType::Environmental)
    }

    #[must_use]
    pub fn is_objective(&self) -> bool {
        self.sub_type == Some(SubType::Objective)
    }

    #[must_use]
    pub fn is_storage(&self) -> bool {
        self.sub_type == Some(SubType::Storage) && self.capacity > 0
    }

    #[must_use]
    pub fn is_provision(&self) -> bool {
        self.card_type == CardType::Provision
    }

    /// Trophies and objective proofs leave circulation when sold.
    #[must_use]
    pub fn is_spoil(&self) -> bool {
        matches!(self.card_type, CardType::Trophy | CardType::ObjectiveProof)
    }

    /// Can this card sit in an equip slot?
    #[must_use]
    pub fn is_equippable(&self) -> bool {
        if self.is_storage() {
            return true;
        }
        match &self.effect {
            Some(effect) if effect.is_weapon() => true,
            Some(effect) => effect.persistent_upgrade().is_some(),
            None => false,
        }
    }

    /// Current health, zero for cards without health.
    #[must_use]
    pub fn current_health(&self) -> i64 {
        self.health.unwrap_or(0)
    }

    /// Damage this card deals as a threat or hazard.
    #[must_use]
    pub fn threat_damage(&self) -> i64 {
        match &self.effect {
            Some(Effect::Damage { amount }) => *amount,
            _ => 0,
        }
    }

    /// Reduce health by `amount`, clamping at zero. Returns the damage dealt.
    pub fn take_damage(&mut self, amount: i64) -> i64 {
        let current = self.current_health();
        let dealt = amount.clamp(0, current);
        self.health = Some(current - dealt);
        dealt
    }

    /// Strip instance overrides, leaving the template shape.
    #[must_use]
    pub fn normalized(&self) -> Card {
        let mut card = self.clone();
        if let Some(stamp) = card.scaling.take() {
            stamp.base.restore_into(&mut card);
        }
        card.stored = None;
        card.remaining_days = None;
        card.immediate_spent = false;
        card
    }
}
