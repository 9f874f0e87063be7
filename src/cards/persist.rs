//! Persisted card and world shapes.
//!
//! Saved decks store each card either as a bare catalog id or as a full
//! card object when the instance has diverged from its template (scaled,
//! remixed, cheat cards). Both forms load; unmodified cards are always
//! written back in the id form.
//!
//! ```
//! use frontier_engine::cards::{
//!     decode_card, encode_card, Card, CardCatalog, CardType, SerializedCard,
//! };
//!
//! let catalog = CardCatalog::from_cards([Card::new("rope", "Rope", CardType::Item)]).unwrap();
//! let rope = catalog.get("rope").unwrap().clone();
//!
//! let entry = encode_card(&rope, &catalog);
//! assert!(matches!(entry, SerializedCard::Id(_)));
//! assert_eq!(decode_card(&entry, &catalog).unwrap(), rope);
//! ```

use std::collections::BTreeMap;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::definition::{Card, CardId};
use super::registry::CardCatalog;
use crate::core::error::PersistError;
use crate::core::player::{EquippedItem, PlayerState};
use crate::core::state::{ActiveEvent, WorldState};

/// One saved deck entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SerializedCard {
    Id(CardId),
    Full(Box<Card>),
}

/// Pick the minimal form for `card`.
#[must_use]
pub fn encode_card(card: &Card, catalog: &CardCatalog) -> SerializedCard {
    if catalog.base_of(card) == Some(card) {
        SerializedCard::Id(card.id.clone())
    } else {
        SerializedCard::Full(Box::new(card.clone()))
    }
}

/// Load a saved entry.
///
/// # Errors
///
/// Returns `PersistError::UnknownCard` when an id entry has no template.
pub fn decode_card(entry: &SerializedCard, catalog: &CardCatalog) -> Result<Card, PersistError> {
    match entry {
        SerializedCard::Id(id) => catalog
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| PersistError::UnknownCard(id.clone())),
        SerializedCard::Full(card) => Ok(card.as_ref().clone()),
    }
}

fn encode_pile(pile: &Vector<Card>, catalog: &CardCatalog) -> Vec<SerializedCard> {
    pile.iter().map(|card| encode_card(card, catalog)).collect()
}

fn decode_pile(
    pile: &[SerializedCard],
    catalog: &CardCatalog,
) -> Result<Vector<Card>, PersistError> {
    pile.iter().map(|entry| decode_card(entry, catalog)).collect()
}

/// Saved form of `WorldState`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorldSnapshot {
    pub event_deck: Vec<SerializedCard>,
    pub event_discard_pile: Vec<SerializedCard>,
    pub active_event: Option<ActiveEvent>,
    pub store_item_deck: Vec<SerializedCard>,
    pub store_display_items: Vec<SerializedCard>,
    /// Read from older saves only; restored to the back of the store deck.
    #[serde(skip_serializing)]
    pub store_item_discard_pile: Vec<SerializedCard>,
    pub active_objectives: Vec<SerializedCard>,
    pub boss_fight_active: bool,
    pub force_boss_reveal_next_turn: bool,
}

impl WorldSnapshot {
    #[must_use]
    pub fn capture(world: &WorldState, catalog: &CardCatalog) -> Self {
        Self {
            event_deck: encode_pile(&world.event_deck, catalog),
            event_discard_pile: encode_pile(&world.event_discard, catalog),
            active_event: world.active_event.clone(),
            store_item_deck: encode_pile(&world.store_deck, catalog),
            store_display_items: encode_pile(&world.store_display, catalog),
            store_item_discard_pile: Vec::new(),
            active_objectives: encode_pile(&world.active_objectives, catalog),
            boss_fight_active: world.boss_fight_active,
            force_boss_reveal_next_turn: world.force_boss_reveal_next_turn,
        }
    }

    /// Rebuild the world.
    ///
    /// # Errors
    ///
    /// Fails on the first id entry missing from the catalog.
    pub fn restore(&self, catalog: &CardCatalog) -> Result<WorldState, PersistError> {
        let mut store_deck = decode_pile(&self.store_item_deck, catalog)?;
        store_deck.append(decode_pile(&self.store_item_discard_pile, catalog)?);

        Ok(WorldState {
            event_deck: decode_pile(&self.event_deck, catalog)?,
            event_discard: decode_pile(&self.event_discard_pile, catalog)?,
            active_event: self.active_event.clone(),
            store_deck,
            store_display: decode_pile(&self.store_display_items, catalog)?,
            active_objectives: decode_pile(&self.active_objectives, catalog)?,
            boss_fight_active: self.boss_fight_active,
            force_boss_reveal_next_turn: self.force_boss_reveal_next_turn,
        })
    }
}

/// Equip row and satchels as older saves stored them: a plain card list
/// and satchel contents keyed by equip-row position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegacyLoadout {
    pub equipped_items: Vec<Card>,
    pub satchels: BTreeMap<usize, Vec<Card>>,
}

/// Replace the player's equip row and satchels with a legacy loadout,
/// assigning fresh slot ids.
///
/// Stats are taken as already reflecting the equipped upgrades, so no
/// max-health adjustment happens. Contents under an index that does not
/// hold a storage item, or beyond a container's capacity, go to the
/// player's discard pile. Returns how many cards were spilled that way.
pub fn migrate_legacy_satchels(player: &mut PlayerState, legacy: LegacyLoadout) -> usize {
    let LegacyLoadout {
        equipped_items,
        mut satchels,
    } = legacy;

    player.reserve_slot_ids();
    player.equipped = Vector::new();
    player.satchels.clear();
    let mut spilled = 0;

    for (index, card) in equipped_items.into_iter().enumerate() {
        let slot = player.slot_ids.next_id();
        let contents = satchels.remove(&index).unwrap_or_default();

        if card.is_storage() {
            let mut kept: Vector<Card> = Vector::new();
            for stored in contents {
                if kept.len() < card.capacity {
                    kept.push_back(stored);
                } else {
                    player.discard.push_back(stored);
                    spilled += 1;
                }
            }
            player.satchels.insert(slot, kept);
        } else {
            spilled += contents.len();
            player.discard.extend(contents);
        }

        player.equipped.push_back(EquippedItem { slot, card });
    }

    for (index, orphaned) in satchels {
        tracing::warn!(index, count = orphaned.len(), "satchel entry has no equipped item");
        spilled += orphaned.len();
        player.discard.extend(orphaned);
    }

    spilled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardType, SubType};
    use crate::core::{Character, EngineConfig};

    fn catalog() -> CardCatalog {
        CardCatalog::from_cards([
            Card::new("wolf", "Wolf", CardType::Event)
                .with_sub_type(SubType::Animal)
                .with_health(7),
            Card::new("jerky", "Jerky", CardType::Provision),
        ])
        .unwrap()
    }

    fn player() -> PlayerState {
        let character = Character {
            name: "Drifter".into(),
            health: 10,
            gold: 0,
            talk_failure_chance: 0.5,
            pet_failure_chance: 0.5,
            unique_item: None,
        };
        PlayerState::new(&character, &EngineConfig::default(), &catalog())
    }

    #[test]
    fn test_modified_card_uses_full_form() {
        let catalog = catalog();
        let mut wolf = catalog.get("wolf").unwrap().clone();
        wolf.take_damage(2);

        let entry = encode_card(&wolf, &catalog);
        assert!(matches!(entry, SerializedCard::Full(_)));
        assert_eq!(decode_card(&entry, &catalog).unwrap().current_health(), 5);
    }

    #[test]
    fn test_both_forms_parse() {
        let json = r#"["jerky", {"id":"wolf","name":"Dire Wolf","type":"Event","health":12}]"#;
        let entries: Vec<SerializedCard> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0], SerializedCard::Id(CardId::new("jerky")));
        let dire = decode_card(&entries[1], &catalog()).unwrap();
        assert_eq!(dire.name, "Dire Wolf");
    }

    #[test]
    fn test_unknown_id_is_an_error() {
        let err = decode_card(&SerializedCard::Id(CardId::new("ghost")), &catalog()).unwrap_err();
        assert_eq!(err, PersistError::UnknownCard(CardId::new("ghost")));
    }

    #[test]
    fn test_world_snapshot_roundtrip() {
        let catalog = catalog();
        let mut world = WorldState::new();
        world.event_deck.push_back(catalog.get("wolf").unwrap().clone());
        world.event_discard.push_back(catalog.get("jerky").unwrap().clone());
        world.force_boss_reveal_next_turn = true;

        let snapshot = WorldSnapshot::capture(&world, &catalog);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains(r#""eventDeck":["wolf"]"#));

        let back: WorldSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.restore(&catalog).unwrap(), world);
    }

    #[test]
    fn test_old_store_discard_pile_rejoins_store_deck() {
        let catalog = catalog();
        let json = r#"{"storeItemDeck":["wolf"],"storeItemDiscardPile":["jerky"]}"#;
        let snapshot: WorldSnapshot = serde_json::from_str(json).unwrap();

        let world = snapshot.restore(&catalog).unwrap();
        let ids: Vec<&str> = world.store_deck.iter().map(|card| card.id.as_str()).collect();
        assert_eq!(ids, ["wolf", "jerky"]);

        let json = serde_json::to_string(&WorldSnapshot::capture(&world, &catalog)).unwrap();
        assert!(!json.contains("storeItemDiscardPile"));
    }

    #[test]
    fn test_legacy_satchels_migrate() {
        let mut p = player();
        let bag = Card::new("satchel", "Satchel", CardType::Item)
            .with_sub_type(SubType::Storage)
            .with_capacity(1);
        let knife = Card::new("knife", "Knife", CardType::Item);
        let jerky = Card::new("jerky", "Jerky", CardType::Provision);

        let legacy: LegacyLoadout = serde_json::from_value(serde_json::json!({
            "equippedItems": [knife, bag],
            "satchels": {"1": [jerky, jerky], "0": [jerky], "5": [jerky]}
        }))
        .unwrap();

        let spilled = migrate_legacy_satchels(&mut p, legacy);
        assert_eq!(spilled, 3);
        assert_eq!(p.equipped.len(), 2);
        assert_eq!(p.discard.len(), 3);
        assert!(p.satchels_aligned());

        let bag_slot = p.equipped[1].slot;
        assert_eq!(p.satchels.get(&bag_slot).unwrap().len(), 1);
    }
}
