//! World state: event and store decks plus the active encounter.
//!
//! ## Encounter state machine
//!
//! ```text
//! None -> Revealed -> Hostile | NonHostile | Pacified
//!      -> Defeated | Fled | Cured | TakenAsItem -> None
//! ```
//!
//! A pacified boss returns to `Hostile` when attacked. A pacified animal
//! stays pacified for the rest of the encounter.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::threats::is_event_considered_hostile;

/// Status of the active event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterStatus {
    Hostile,
    NonHostile,
    Pacified,
}

/// The revealed, unresolved event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEvent {
    pub card: Card,
    pub status: EncounterStatus,
    #[serde(default)]
    pub is_boss: bool,
    /// Gold this threat took from the player on reveal.
    #[serde(default)]
    pub stolen_gold: i64,
}

impl ActiveEvent {
    /// Reveal a card, classifying it on the spot.
    #[must_use]
    pub fn reveal(card: Card, is_boss: bool) -> Self {
        let status = if is_event_considered_hostile(&card) {
            EncounterStatus::Hostile
        } else {
            EncounterStatus::NonHostile
        };
        Self {
            card,
            status,
            is_boss,
            stolen_gold: 0,
        }
    }

    /// Re-run classification after the card changed. Pacified stays put.
    pub fn refresh_status(&mut self) {
        if self.status == EncounterStatus::Pacified {
            return;
        }
        self.status = if is_event_considered_hostile(&self.card) {
            EncounterStatus::Hostile
        } else {
            EncounterStatus::NonHostile
        };
    }

    /// An attack on a pacified boss ends the truce.
    pub fn break_truce(&mut self) -> bool {
        if self.is_boss && self.status == EncounterStatus::Pacified {
            self.status = EncounterStatus::Hostile;
            return true;
        }
        false
    }

    /// A threat that can still be fought.
    #[must_use]
    pub fn is_live_threat(&self) -> bool {
        self.card.is_threat() && self.card.current_health() > 0
    }

    #[must_use]
    pub fn blocks_trade(&self) -> bool {
        if self.status != EncounterStatus::Hostile {
            return false;
        }
        !self.card.is_threat() || self.card.current_health() > 0
    }
}

/// Shared world record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldState {
    /// Base, unscaled cards; the front is the top.
    pub event_deck: Vector<Card>,
    pub event_discard: Vector<Card>,
    pub active_event: Option<ActiveEvent>,
    /// Sold items return to the back.
    pub store_deck: Vector<Card>,
    pub store_display: Vector<Card>,
    /// At most two objectives are active at once.
    pub active_objectives: Vector<Card>,
    pub boss_fight_active: bool,
    pub force_boss_reveal_next_turn: bool,
}

impl WorldState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Is store trading currently blocked?
    #[must_use]
    pub fn trading_blocked(&self) -> bool {
        self.active_event.as_ref().is_some_and(ActiveEvent::blocks_trade)
    }

    /// The active event if it is a threat that can still be fought.
    #[must_use]
    pub fn live_threat(&self) -> Option<&ActiveEvent> {
        self.active_event.as_ref().filter(|event| event.is_live_threat())
    }

    /// Top the store display up from the store deck.
    pub fn refill_store_display(&mut self, size: usize) {
        while self.store_display.len() < size {
            match self.store_deck.pop_front() {
                Some(card) => self.store_display.push_back(card),
                None => break,
            }
        }
    }
}
