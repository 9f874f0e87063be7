//! Action dispatch.
//!
//! `resolve` hands an action to its handler on private copies of the player
//! and world. Handlers return `Result<Outcome, ActionError>`; on `Err` the
//! copies are dropped, the random stream is rewound and the rejection is
//! logged, so a rejected action never leaves partial state behind.
//!
//! ## Example
//!
//! ```
//! use frontier_engine::cards::CardCatalog;
//! use frontier_engine::core::{
//!     Action, ActionError, Character, EngineConfig, GameRng, PlayerState, WorldState,
//! };
//! use frontier_engine::rules::{resolve, NullSink, ResolveContext};
//!
//! let catalog = CardCatalog::new();
//! let config = EngineConfig::default();
//! let character = Character {
//!     name: "Drifter".into(),
//!     health: 10,
//!     gold: 3,
//!     talk_failure_chance: 0.4,
//!     pet_failure_chance: 0.4,
//!     unique_item: None,
//! };
//! let player = PlayerState::new(&character, &config, &catalog);
//! let world = WorldState::new();
//! let mut rng = GameRng::new(42);
//! let mut sink = NullSink;
//! let mut ctx = ResolveContext::new(&catalog, &config, &mut rng, &mut sink);
//!
//! let resolution = resolve(&Action::AttemptObjective, &player, &world, &mut ctx);
//! assert!(matches!(resolution.rejected, Some(ActionError::NotEnoughProvisions { .. })));
//! assert_eq!(resolution.player, player);
//! ```

use serde::{Deserialize, Serialize};

use super::context::{ResolveContext, Severity};
use super::{encounter, equipment, items, trade};
use crate::core::{Action, ActionError, PlayerState, SlotId, WorldState};
use crate::effects::UpgradeKind;

/// What a successful action did, for the orchestrator to present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Attacked { target: String, dealt: i64, defeated: bool },
    Healed { amount: i64, cured: Vec<String> },
    Cured { illnesses: Vec<String> },
    TrapSet { replaced: bool },
    Rested { amount: i64 },
    GoldFound { amount: i64 },
    Drew { count: usize },
    Scouted { cards: Vec<String> },
    Upgraded { kind: UpgradeKind, amount: i64 },
    Equipped { slot: SlotId },
    Stored { slot: SlotId },
    Unequipped { card: String },
    Bought { card: String, price: i64 },
    Sold { card: String, price: i64 },
    TookItem { card: String },
    ObjectiveAttempted { discarded: usize },
    Pacified { target: String },
    Fled { target: String, returned_gold: i64 },
    InteractionFailed { target: String, damage: i64, illness: Option<String> },
    ModalShown,
    Revealed { card: String, hostile: bool },
    TurnBegan { illness_damage: i64, recovered: Vec<String> },
}

/// Result of resolving one action.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub player: PlayerState,
    pub world: WorldState,
    pub outcome: Option<Outcome>,
    pub rejected: Option<ActionError>,
}

impl Resolution {
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        self.rejected.is_some()
    }
}

/// Run `handler` on copies of the state, rolling everything back on error.
pub(crate) fn transact<F>(
    label: &str,
    player: &PlayerState,
    world: &WorldState,
    ctx: &mut ResolveContext<'_>,
    handler: F,
) -> Resolution
where
    F: FnOnce(
        &mut PlayerState,
        &mut WorldState,
        &mut ResolveContext<'_>,
    ) -> Result<Outcome, ActionError>,
{
    let mut next_player = player.clone();
    let mut next_world = world.clone();
    let rewind = ctx.rng.clone();

    match handler(&mut next_player, &mut next_world, ctx) {
        Ok(outcome) => {
            tracing::debug!(action = label, ?outcome, "resolved");
            Resolution {
                player: next_player,
                world: next_world,
                outcome: Some(outcome),
                rejected: None,
            }
        }
        Err(err) => {
            *ctx.rng = rewind;
            tracing::warn!(action = label, severity = ?err.severity(), "rejected: {err}");
            ctx.sink.log(&err.to_string(), Severity::Warning);
            Resolution {
                player: player.clone(),
                world: world.clone(),
                outcome: None,
                rejected: Some(err),
            }
        }
    }
}

fn dispatch(
    action: &Action,
    player: &mut PlayerState,
    world: &mut WorldState,
    ctx: &mut ResolveContext<'_>,
) -> Result<Outcome, ActionError> {
    if player.turn.turn_ended {
        return Err(ActionError::TurnEnded);
    }

    match action {
        Action::UseItem { source } => items::use_item(player, world, *source, ctx),
        Action::EquipItem { hand_index } => equipment::equip_item(player, *hand_index, ctx),
        Action::StoreProvision { hand_index, slot } => {
            equipment::store_provision(player, *hand_index, *slot, ctx)
        }
        Action::DiscardEquipped { slot } => equipment::discard_equipped(player, *slot, ctx),
        Action::BuyItem { display_index } => trade::buy_item(player, world, *display_index, ctx),
        Action::SellItem { source } => trade::sell_item(player, world, *source, ctx),
        Action::SellFromSatchel { slot, index } => {
            trade::sell_from_satchel(player, world, *slot, *index, ctx)
        }
        Action::TakeEventItem => encounter::take_event_item(player, world, ctx),
        Action::AttemptObjective => encounter::attempt_objective(player, world, ctx),
        Action::InteractWithThreat { kind } => {
            encounter::interact_with_threat(player, world, *kind, ctx)
        }
        Action::ShowModal { modal } => encounter::show_modal(player, modal, ctx),
    }
}

/// Resolve a player action against the current snapshots.
#[must_use]
pub fn resolve(
    action: &Action,
    player: &PlayerState,
    world: &WorldState,
    ctx: &mut ResolveContext<'_>,
) -> Resolution {
    transact(action.name(), player, world, ctx, |p, w, c| dispatch(action, p, w, c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardCatalog, CardType};
    use crate::core::{CardSource, Character, EngineConfig, GameRng};
    use crate::rules::RecordingSink;

    fn player() -> PlayerState {
        let character = Character {
            name: "Drifter".into(),
            health: 10,
            gold: 3,
            talk_failure_chance: 0.4,
            pet_failure_chance: 0.4,
            unique_item: None,
        };
        PlayerState::new(&character, &EngineConfig::default(), &CardCatalog::new())
    }

    #[test]
    fn test_turn_ended_rejects_everything() {
        let catalog = CardCatalog::new();
        let config = EngineConfig::default();
        let mut rng = GameRng::new(1);
        let mut sink = RecordingSink::new();
        let mut ctx = ResolveContext::new(&catalog, &config, &mut rng, &mut sink);

        let mut p = player();
        p.hand = p.hand.replaced(0, Card::new("jerky", "Jerky", CardType::Provision));
        p.turn.turn_ended = true;

        let resolution = resolve(
            &Action::UseItem {
                source: CardSource::Hand(0),
            },
            &p,
            &WorldState::new(),
            &mut ctx,
        );
        assert_eq!(resolution.rejected, Some(ActionError::TurnEnded));
        assert_eq!(resolution.player, p);
        assert!(sink.logged(Severity::Warning, "turn has already ended"));
    }

    #[test]
    fn test_rejection_rewinds_rng() {
        let catalog = CardCatalog::new();
        let config = EngineConfig::default();
        let mut rng = GameRng::new(5);
        let mut sink = RecordingSink::new();
        let before = rng.state();

        {
            let mut ctx = ResolveContext::new(&catalog, &config, &mut rng, &mut sink);
            let resolution = transact("probe", &player(), &WorldState::new(), &mut ctx, |_, _, c| {
                c.rng.roll();
                Err(ActionError::NoLiveThreat)
            });
            assert!(resolution.is_rejected());
        }

        assert_eq!(rng.state(), before);
    }
}
