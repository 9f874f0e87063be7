//! Player actions: the inbound surface of the engine.
//!
//! An orchestrator turns input into an `Action` and hands it to the
//! resolver together with the current player and world snapshots.
//!
//! ## Example
//!
//! ```
//! use frontier_engine::core::{Action, CardSource, InteractionKind};
//!
//! let shoot = Action::UseItem { source: CardSource::Hand(2) };
//! let talk = Action::InteractWithThreat { kind: InteractionKind::Talk };
//!
//! assert_eq!(shoot.name(), "use_item");
//! assert_eq!(talk.name(), "interact_with_threat");
//! ```

use serde::{Deserialize, Serialize};

use super::entity::SlotId;

/// Where a card is taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSource {
    Hand(usize),
    Equipped(SlotId),
    Satchel { slot: SlotId, index: usize },
}

impl std::fmt::Display for CardSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hand(index) => write!(f, "hand slot {index}"),
            Self::Equipped(slot) => write!(f, "equipped {slot}"),
            Self::Satchel { slot, index } => write!(f, "satchel {slot} item {index}"),
        }
    }
}

/// How the player approaches a threat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// Talk a human down.
    Talk,
    /// Calm an animal.
    Pet,
}

/// Screens the orchestrator may be asked to open.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalKind {
    Store,
    Satchel(SlotId),
    Deck,
    Discard,
    Illnesses,
    /// Cards revealed by a scout effect.
    ScoutReport(Vec<String>),
}

/// A player action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    UseItem { source: CardSource },
    EquipItem { hand_index: usize },
    StoreProvision { hand_index: usize, slot: Option<SlotId> },
    BuyItem { display_index: usize },
    SellItem { source: CardSource },
    SellFromSatchel { slot: SlotId, index: usize },
    TakeEventItem,
    DiscardEquipped { slot: SlotId },
    AttemptObjective,
    InteractWithThreat { kind: InteractionKind },
    ShowModal { modal: ModalKind },
}

impl Action {
    /// Stable action name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UseItem { .. } => "use_item",
            Self::EquipItem { .. } => "equip_item",
            Self::StoreProvision { .. } => "store_provision",
            Self::BuyItem { .. } => "buy_item",
            Self::SellItem { .. } => "sell_item",
            Self::SellFromSatchel { .. } => "sell_from_satchel",
            Self::TakeEventItem => "take_event_item",
            Self::DiscardEquipped { .. } => "discard_equipped",
            Self::AttemptObjective => "attempt_objective",
            Self::InteractWithThreat { .. } => "interact_with_threat",
            Self::ShowModal { .. } => "show_modal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_display() {
        assert_eq!(CardSource::Hand(3).to_string(), "hand slot 3");
        assert_eq!(CardSource::Equipped(SlotId(2)).to_string(), "equipped slot#2");
        assert_eq!(
            CardSource::Satchel { slot: SlotId(1), index: 0 }.to_string(),
            "satchel slot#1 item 0"
        );
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::StoreProvision {
            hand_index: 1,
            slot: Some(SlotId(4)),
        };
        let json = serde_json::to_string(&action).unwrap();
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);

        let take: Action = serde_json::from_str(r#"{"action":"take_event_item"}"#).unwrap();
        assert_eq!(take, Action::TakeEventItem);
    }
}
