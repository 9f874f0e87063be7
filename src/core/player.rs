//! Player state: hand, equip row, satchels, piles and run statistics.
//!
//! ## Hand
//!
//! A fixed-length row of optional slots backed by `im::Vector`, so copies
//! are O(1) and handlers can work on a private copy of the player.
//!
//! ## Equip row and satchels
//!
//! Equipped items carry a stable `SlotId`. Satchel contents live in an
//! ordered map keyed by that id. Only storage items own a satchel entry.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::action::CardSource;
use super::config::EngineConfig;
use super::entity::{SlotAllocator, SlotId};
use crate::cards::{Card, CardCatalog, CardId};
use crate::effects::{Effect, UpgradeKind};

/// Fixed-size hand of optional card slots.
///
/// ```
/// use frontier_engine::cards::{Card, CardType};
/// use frontier_engine::core::Hand;
///
/// let hand = Hand::new(3);
/// let with_jerky = hand.replaced(1, Card::new("jerky", "Jerky", CardType::Provision));
///
/// assert!(hand.get(1).is_none());
/// assert_eq!(with_jerky.get(1).unwrap().name, "Jerky");
/// assert_eq!(with_jerky.cleared(1), hand);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    slots: Vector<Option<Card>>,
}

impl Hand {
    /// Create an empty hand with `size` slots.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            slots: std::iter::repeat(None).take(size).collect(),
        }
    }

    /// Build a hand from explicit slots.
    pub fn from_slots(slots: impl IntoIterator<Item = Option<Card>>) -> Self {
        Self {
            slots: slots.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// A copy with `card` in slot `index`. Out-of-range indices are ignored.
    #[must_use]
    pub fn replaced(&self, index: usize, card: Card) -> Hand {
        let mut next = self.clone();
        if index < next.slots.len() {
            next.slots.set(index, Some(card));
        }
        next
    }

    /// A copy with slot `index` emptied.
    #[must_use]
    pub fn cleared(&self, index: usize) -> Hand {
        let mut next = self.clone();
        if index < next.slots.len() {
            next.slots.set(index, None);
        }
        next
    }

    /// Remove and return the card in slot `index`.
    pub fn take(&mut self, index: usize) -> Option<Card> {
        if index >= self.slots.len() {
            return None;
        }
        self.slots.set(index, None)
    }

    /// Put `card` in the first empty slot, handing it back if the hand is full.
    ///
    /// # Errors
    ///
    /// Returns the card unchanged when no slot is free.
    pub fn place(&mut self, card: Card) -> Result<usize, Card> {
        match self.first_empty() {
            Some(index) => {
                self.slots.set(index, Some(card));
                Ok(index)
            }
            None => Err(card),
        }
    }

    #[must_use]
    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.first_empty().is_none()
    }

    /// Occupied slots with their indices.
    pub fn occupied(&self) -> impl DoubleEndedIterator<Item = (usize, &Card)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|card| (i, card)))
    }

    /// Cards in hand, in slot order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.slots.iter().flatten()
    }
}

/// An item on the equip row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedItem {
    pub slot: SlotId,
    pub card: Card,
}

/// Per-run statistics counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunStats {
    pub kills: u32,
    pub apex_kills: u32,
    pub pests_killed: u32,
    pub humans_defeated: u32,
    pub bosses_defeated: u32,
    pub damage_dealt: i64,
    pub damage_taken: i64,
    pub gold_earned: i64,
    pub gold_spent: i64,
    pub gold_found: i64,
    pub gold_stolen: i64,
    pub items_bought: u32,
    pub items_sold: u32,
    pub threats_pacified: u32,
    pub humans_talked_down: u32,
    pub interactions_failed: u32,
    pub illnesses_contracted: u32,
    pub illnesses_cured: u32,
    pub traps_set: u32,
    pub trap_catches: u32,
    pub objectives_attempted: u32,
    pub cards_drawn: u32,
}

/// Flags reset at the start of every turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnFlags {
    pub turn_ended: bool,
    pub equipped_this_turn: bool,
    pub event_action_taken: bool,
    pub objective_attempted: bool,
    /// Weapons that have already attacked this turn.
    pub weapons_used: Vector<CardSource>,
}

/// Character archetype supplying starting stats.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub health: i64,
    pub gold: i64,
    /// Chance that talking a human down fails.
    pub talk_failure_chance: f64,
    /// Chance that calming an animal fails.
    pub pet_failure_chance: f64,
    /// Starting item reserved for this character.
    #[serde(default)]
    pub unique_item: Option<CardId>,
}

/// Complete player record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub character: String,
    pub gold: i64,
    pub health: i64,
    pub max_health: i64,
    pub hand: Hand,
    pub equipped: Vector<EquippedItem>,
    pub satchels: OrdMap<SlotId, Vector<Card>>,
    pub deck: Vector<Card>,
    pub discard: Vector<Card>,
    pub active_trap: Option<Card>,
    pub illnesses: Vector<Card>,
    pub ng_plus_level: u32,
    pub stats: RunStats,
    pub talk_failure_chance: f64,
    pub pet_failure_chance: f64,
    #[serde(default)]
    pub turn: TurnFlags,
    #[serde(default)]
    pub slot_ids: SlotAllocator,
}

impl PlayerState {
    /// Fresh player for a character. The unique item, when it resolves in
    /// the catalog, starts in the first hand slot.
    #[must_use]
    pub fn new(character: &Character, config: &EngineConfig, catalog: &CardCatalog) -> Self {
        let mut hand = Hand::new(config.hand_size);
        if let Some(item) = character
            .unique_item
            .as_ref()
            .and_then(|id| catalog.get(id.as_str()))
        {
            // A zero-slot hand simply cannot hold the starter.
            let _ = hand.place(item.clone());
        }

        Self {
            character: character.name.clone(),
            gold: character.gold,
            health: character.health,
            max_health: character.health,
            hand,
            equipped: Vector::new(),
            satchels: OrdMap::new(),
            deck: Vector::new(),
            discard: Vector::new(),
            active_trap: None,
            illnesses: Vector::new(),
            ng_plus_level: 0,
            stats: RunStats::default(),
            talk_failure_chance: character.talk_failure_chance.clamp(0.0, 1.0),
            pet_failure_chance: character.pet_failure_chance.clamp(0.0, 1.0),
            turn: TurnFlags::default(),
            slot_ids: SlotAllocator::default(),
        }
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Heal up to max health. Returns the amount actually restored.
    pub fn heal(&mut self, amount: i64) -> i64 {
        let before = self.health;
        self.health = (self.health + amount.max(0)).min(self.max_health).max(before);
        self.health - before
    }

    /// Apply incoming damage after equipped damage negation. Returns the
    /// damage actually taken.
    pub fn take_damage(&mut self, amount: i64) -> i64 {
        let negation = self.equipped_bonus(UpgradeKind::DamageNegation);
        let incoming = (amount - negation).clamp(0, self.health.max(0));
        self.health -= incoming;
        self.stats.damage_taken += incoming;
        incoming
    }

    /// Sum of equipped persistent upgrades of `kind`.
    #[must_use]
    pub fn equipped_bonus(&self, kind: UpgradeKind) -> i64 {
        self.equipped
            .iter()
            .filter_map(|item| item.card.effect.as_ref()?.persistent_upgrade())
            .filter(|(k, _)| *k == kind)
            .map(|(_, amount)| amount)
            .sum()
    }

    /// Sum of persistent upgrades of `kind` held in hand.
    #[must_use]
    pub fn held_bonus(&self, kind: UpgradeKind) -> i64 {
        self.hand
            .cards()
            .filter_map(|card| card.effect.as_ref()?.persistent_upgrade())
            .filter(|(k, _)| *k == kind)
            .map(|(_, amount)| amount)
            .sum()
    }

    /// Every card in hand or on the equip row, with its source.
    pub fn carried(&self) -> impl Iterator<Item = (CardSource, &Card)> + '_ {
        let held = self.hand.occupied().map(|(i, card)| (CardSource::Hand(i), card));
        let worn = self
            .equipped
            .iter()
            .map(|item| (CardSource::Equipped(item.slot), &item.card));
        held.chain(worn)
    }

    #[must_use]
    pub fn equipped_index(&self, slot: SlotId) -> Option<usize> {
        self.equipped.iter().position(|item| item.slot == slot)
    }

    #[must_use]
    pub fn equipped_card(&self, slot: SlotId) -> Option<&Card> {
        self.equipped
            .iter()
            .find(|item| item.slot == slot)
            .map(|item| &item.card)
    }

    /// Card at `source`, if present.
    #[must_use]
    pub fn card_at(&self, source: CardSource) -> Option<&Card> {
        match source {
            CardSource::Hand(index) => self.hand.get(index),
            CardSource::Equipped(slot) => self.equipped_card(slot),
            CardSource::Satchel { slot, index } => self.satchels.get(&slot)?.get(index),
        }
    }

    /// Remove the card at a hand or satchel source. Equipped items go
    /// through `unequip` so their stat effects are reversed.
    pub fn take_loose_card(&mut self, source: CardSource) -> Option<Card> {
        match source {
            CardSource::Hand(index) => self.hand.take(index),
            CardSource::Satchel { slot, index } => {
                let contents = self.satchels.get_mut(&slot)?;
                if index < contents.len() {
                    Some(contents.remove(index))
                } else {
                    None
                }
            }
            CardSource::Equipped(_) => None,
        }
    }

    /// Free satchel capacity on an equipped storage item.
    #[must_use]
    pub fn satchel_room(&self, slot: SlotId) -> Option<usize> {
        let container = self.equipped_card(slot).filter(|card| card.is_storage())?;
        let used = self.satchels.get(&slot).map_or(0, Vector::len);
        Some(container.capacity.saturating_sub(used))
    }

    #[must_use]
    pub fn has_illness(&self, name: &str) -> bool {
        self.illnesses.iter().any(|illness| illness.name == name)
    }

    /// Adjust max health, scaling current health pro rata.
    pub fn adjust_max_health(&mut self, delta: i64) {
        let old_max = self.max_health.max(1);
        let new_max = (self.max_health + delta).max(1);
        let was_alive = self.health > 0;
        let scaled = (self.health * new_max + old_max / 2) / old_max;
        self.health = if was_alive { scaled.clamp(1, new_max) } else { 0 };
        self.max_health = new_max;
    }

    /// Put a card on the equip row, applying on-equip upgrades and
    /// rehydrating any stored satchel contents.
    pub fn equip(&mut self, mut card: Card) -> SlotId {
        self.reserve_slot_ids();
        let slot = self.slot_ids.next_id();

        if let Some((kind, amount)) = card.effect.as_ref().and_then(Effect::persistent_upgrade) {
            if kind.adjusts_on_equip() {
                self.adjust_max_health(amount);
            }
        }

        if card.is_storage() {
            let contents: Vector<Card> =
                card.stored.take().unwrap_or_default().into_iter().collect();
            self.satchels.insert(slot, contents);
        }

        self.equipped.push_back(EquippedItem { slot, card });
        slot
    }

    /// Move the slot allocator past every id already on the equip row or
    /// keying a satchel. Saves written without the allocator load it at 0.
    pub fn reserve_slot_ids(&mut self) {
        let used = self
            .equipped
            .iter()
            .map(|item| item.slot)
            .chain(self.satchels.keys().copied())
            .max();
        if let Some(used) = used {
            self.slot_ids.reserve_past(used);
        }
    }

    /// Take an item off the equip row, reversing on-equip upgrades.
    /// Returns the card and whatever its satchel held.
    pub fn unequip(&mut self, slot: SlotId) -> Option<(Card, Vector<Card>)> {
        let index = self.equipped_index(slot)?;
        let item = self.equipped.remove(index);

        let upgrade = item.card.effect.as_ref().and_then(Effect::persistent_upgrade);
        if let Some((kind, amount)) = upgrade {
            if kind.adjusts_on_equip() {
                self.adjust_max_health(-amount);
            }
        }

        let contents = self.satchels.remove(&slot).unwrap_or_default();
        Some((item.card, contents))
    }

    /// Satchel invariants: every key belongs to an equipped storage item and
    /// no satchel holds more than its container's capacity.
    #[must_use]
    pub fn satchels_aligned(&self) -> bool {
        self.satchels.iter().all(|(slot, contents)| {
            self.equipped_card(*slot)
                .is_some_and(|card| card.is_storage() && contents.len() <= card.capacity)
        })
    }
}
