//! Handlers for the active event: pick-ups, objectives, talking and petting.

use super::context::ResolveContext;
use super::engine::Outcome;
use super::items::fire_immediate;
use super::turn::contract_illness;
use crate::cards::get_scaled_card;
use crate::core::{
    ActionError, EncounterStatus, InteractionKind, ModalKind, PlayerState, WorldState,
};
use crate::effects::Effect;
use crate::threats::base_event_card;

/// Pick up a non-event active card. One event action per turn.
pub fn take_event_item(
    player: &mut PlayerState,
    world: &mut WorldState,
    ctx: &mut ResolveContext<'_>,
) -> Result<Outcome, ActionError> {
    if !world.active_event.as_ref().is_some_and(|event| !event.card.is_event()) {
        return Err(ActionError::NoItemToTake);
    }
    if player.turn.event_action_taken {
        return Err(ActionError::EventActionTaken);
    }
    if player.hand.is_full() {
        return Err(ActionError::HandFull);
    }

    let mut card = world
        .active_event
        .take()
        .map(|event| event.card)
        .ok_or(ActionError::NoItemToTake)?;
    player.turn.event_action_taken = true;
    let name = card.name.clone();
    ctx.info(&format!("Picked up {name}"));

    fire_immediate(player, world, &mut card, ctx);
    if let Err(card) = player.hand.place(card) {
        player.discard.push_back(card);
    }
    Ok(Outcome::TookItem { card: name })
}

/// Spend provisions to force the boss out next turn.
///
/// Provisions are taken from the end of the hand backwards.
pub fn attempt_objective(
    player: &mut PlayerState,
    world: &mut WorldState,
    ctx: &mut ResolveContext<'_>,
) -> Result<Outcome, ActionError> {
    if player.turn.objective_attempted {
        return Err(ActionError::ObjectiveAlreadyAttempted);
    }
    let cost = ctx.config.objective_cost;
    let slots: Vec<usize> = player
        .hand
        .occupied()
        .rev()
        .filter(|(_, card)| card.is_provision())
        .map(|(index, _)| index)
        .take(cost)
        .collect();
    if slots.len() < cost {
        let available = player.hand.cards().filter(|card| card.is_provision()).count();
        return Err(ActionError::NotEnoughProvisions { needed: cost, available });
    }

    for index in slots {
        if let Some(card) = player.hand.take(index) {
            player.discard.push_back(card);
        }
    }
    world.force_boss_reveal_next_turn = true;
    player.turn.objective_attempted = true;
    player.turn.event_action_taken = true;
    player.stats.objectives_attempted += 1;

    ctx.sink.play_sound("objective");
    ctx.info("You set out after the objective. Something stirs on the horizon.");
    Ok(Outcome::ObjectiveAttempted { discarded: cost })
}

/// Talk a human down or calm an animal.
///
/// The player's stored failure chance decides: a roll below it fails.
pub fn interact_with_threat(
    player: &mut PlayerState,
    world: &mut WorldState,
    kind: InteractionKind,
    ctx: &mut ResolveContext<'_>,
) -> Result<Outcome, ActionError> {
    let event = world.live_threat().ok_or(ActionError::NoInteractionTarget)?;
    let target = event.card.name.clone();
    let failure_chance = match kind {
        InteractionKind::Talk if event.card.is_human() => player.talk_failure_chance,
        InteractionKind::Pet if event.card.is_animal() => player.pet_failure_chance,
        _ => return Err(ActionError::WrongInteraction(target)),
    };
    if event.status == EncounterStatus::Pacified {
        return Err(ActionError::AlreadyPacified(target));
    }
    if player.turn.event_action_taken {
        return Err(ActionError::EventActionTaken);
    }
    player.turn.event_action_taken = true;

    if ctx.rng.roll() < failure_chance {
        return Ok(interaction_failed(player, world, target, ctx));
    }

    let Some(mut event) = world.active_event.take() else {
        return Err(ActionError::NoInteractionTarget);
    };
    let is_boss = event.is_boss || ctx.config.is_boss(&event.card.id);

    if event.card.is_animal() || is_boss {
        event.status = EncounterStatus::Pacified;
        world.active_event = Some(event);
        player.stats.threats_pacified += 1;
        ctx.sink.animate("pacify", &target);
        ctx.info(&format!("{target} calms down"));
        return Ok(Outcome::Pacified { target });
    }

    let returned_gold = event.stolen_gold;
    if returned_gold > 0 {
        player.gold += returned_gold;
        player.stats.gold_stolen -= returned_gold;
        ctx.sink.flash_gold(returned_gold);
    }
    world.event_discard.push_back(base_event_card(&event.card, ctx));
    player.stats.humans_talked_down += 1;
    ctx.info(&format!("{target} leaves without a fight"));
    Ok(Outcome::Fled { target, returned_gold })
}

fn interaction_failed(
    player: &mut PlayerState,
    world: &mut WorldState,
    target: String,
    ctx: &mut ResolveContext<'_>,
) -> Outcome {
    player.stats.interactions_failed += 1;
    let effect = world.active_event.as_ref().and_then(|event| event.card.effect.clone());

    if let Some(Effect::ApplyIllnessOnLinger { illness_id }) = effect {
        return match ctx.catalog.get(illness_id.as_str()) {
            Some(illness) => {
                let illness = get_scaled_card(illness, player.ng_plus_level).into_owned();
                let name = illness.name.clone();
                contract_illness(player, world, illness, ctx);
                Outcome::InteractionFailed {
                    target,
                    damage: 0,
                    illness: Some(name),
                }
            }
            None => {
                ctx.error(&format!("unknown illness id {illness_id} on {target}"));
                let damage = player.take_damage(ctx.config.linger_fallback_damage);
                Outcome::InteractionFailed {
                    target,
                    damage,
                    illness: None,
                }
            }
        };
    }

    let attack = world
        .active_event
        .as_ref()
        .map_or(0, |event| event.card.threat_damage());
    let damage = player.take_damage(attack);
    ctx.sink.animate("attacked", &target);
    ctx.info(&format!("{target} lashed out for {damage} damage"));
    Outcome::InteractionFailed {
        target,
        damage,
        illness: None,
    }
}

/// Ask the orchestrator to open a screen. No state changes.
pub fn show_modal(
    player: &PlayerState,
    modal: &ModalKind,
    ctx: &mut ResolveContext<'_>,
) -> Result<Outcome, ActionError> {
    if let ModalKind::Satchel(slot) = modal {
        if player.satchel_room(*slot).is_none() {
            return Err(ActionError::NoCardAtSource(slot.to_string()));
        }
    }
    ctx.sink.request_modal(modal);
    Ok(Outcome::ModalShown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardCatalog, CardType, SubType};
    use crate::core::{ActiveEvent, Character, EngineConfig, GameRng};
    use crate::rules::{RecordingSink, Severity};

    fn player(talk: f64, pet: f64) -> PlayerState {
        let character = Character {
            name: "Diplomat".into(),
            health: 10,
            gold: 2,
            talk_failure_chance: talk,
            pet_failure_chance: pet,
            unique_item: None,
        };
        PlayerState::new(&character, &EngineConfig::default(), &CardCatalog::new())
    }

    fn jerky() -> Card {
        Card::new("jerky", "Jerky", CardType::Provision)
    }

    #[test]
    fn test_take_event_item() {
        let catalog = CardCatalog::new();
        let config = EngineConfig::default();
        let mut rng = GameRng::new(1);
        let mut sink = RecordingSink::new();
        let mut ctx = ResolveContext::new(&catalog, &config, &mut rng, &mut sink);

        let mut p = player(0.0, 0.0);
        let mut world = WorldState::new();
        assert_eq!(take_event_item(&mut p, &mut world, &mut ctx), Err(ActionError::NoItemToTake));

        let nugget = Card::new("gold_nugget", "Gold Nugget", CardType::Item)
            .with_immediate_effect(Effect::Gold { amount: 3 });
        world.active_event = Some(ActiveEvent::reveal(nugget, false));
        take_event_item(&mut p, &mut world, &mut ctx).unwrap();
        assert!(world.active_event.is_none());
        assert_eq!(p.gold, 5);
        assert!(p.hand.get(0).unwrap().immediate_spent);
    }

    #[test]
    fn test_objective_takes_provisions_from_the_end() {
        let catalog = CardCatalog::new();
        let config = EngineConfig::default().with_hand_size(7);
        let mut rng = GameRng::new(1);
        let mut sink = RecordingSink::new();
        let mut ctx = ResolveContext::new(&catalog, &config, &mut rng, &mut sink);

        let mut p = PlayerState::new(
            &Character {
                name: "Diplomat".into(),
                health: 10,
                gold: 0,
                talk_failure_chance: 0.0,
                pet_failure_chance: 0.0,
                unique_item: None,
            },
            &config,
            &catalog,
        );
        for i in 0..6 {
            p.hand = p.hand.replaced(i, jerky());
        }
        p.hand = p.hand.replaced(6, Card::new("rope", "Rope", CardType::Item));
        let mut world = WorldState::new();

        attempt_objective(&mut p, &mut world, &mut ctx).unwrap();
        assert!(p.hand.get(0).is_some());
        assert!((1..6).all(|i| p.hand.get(i).is_none()));
        assert!(p.hand.get(6).is_some());
        assert_eq!(p.discard.len(), 5);
        assert!(world.force_boss_reveal_next_turn);
        assert_eq!(
            attempt_objective(&mut p, &mut world, &mut ctx),
            Err(ActionError::ObjectiveAlreadyAttempted)
        );
    }

    #[test]
    fn test_objective_needs_provisions() {
        let catalog = CardCatalog::new();
        let config = EngineConfig::default();
        let mut rng = GameRng::new(1);
        let mut sink = RecordingSink::new();
        let mut ctx = ResolveContext::new(&catalog, &config, &mut rng, &mut sink);

        let mut p = player(0.0, 0.0);
        for i in 0..4 {
            p.hand = p.hand.replaced(i, jerky());
        }
        assert_eq!(
            attempt_objective(&mut p, &mut WorldState::new(), &mut ctx),
            Err(ActionError::NotEnoughProvisions { needed: 5, available: 4 })
        );
    }

    #[test]
    fn test_talk_down_returns_stolen_gold() {
        let catalog = CardCatalog::new();
        let config = EngineConfig::default();
        let mut rng = GameRng::new(1);
        let mut sink = RecordingSink::new();
        let mut ctx = ResolveContext::new(&catalog, &config, &mut rng, &mut sink);

        let mut p = player(0.0, 1.0);
        let mut world = WorldState::new();
        let thief = Card::new("pickpocket", "Pickpocket", CardType::Event)
            .with_sub_type(SubType::Human)
            .with_health(4);
        let mut event = ActiveEvent::reveal(thief, false);
        event.stolen_gold = 3;
        world.active_event = Some(event);

        assert_eq!(
            interact_with_threat(&mut p, &mut world, InteractionKind::Pet, &mut ctx),
            Err(ActionError::WrongInteraction("Pickpocket".into()))
        );
        let outcome =
            interact_with_threat(&mut p, &mut world, InteractionKind::Talk, &mut ctx).unwrap();
        assert_eq!(
            outcome,
            Outcome::Fled {
                target: "Pickpocket".into(),
                returned_gold: 3
            }
        );
        assert_eq!(p.gold, 5);
        assert!(world.active_event.is_none());
        assert_eq!(world.event_discard.len(), 1);
    }

    #[test]
    fn test_pacified_boss_stays() {
        let catalog = CardCatalog::new();
        let config = EngineConfig::default();
        let mut rng = GameRng::new(1);
        let mut sink = RecordingSink::new();
        let mut ctx = ResolveContext::new(&catalog, &config, &mut rng, &mut sink);

        let mut p = player(0.0, 0.0);
        let mut world = WorldState::new();
        let boss = Card::new("warlord", "Warlord", CardType::Event)
            .with_sub_type(SubType::Human)
            .with_health(20);
        world.active_event = Some(ActiveEvent::reveal(boss, true));

        interact_with_threat(&mut p, &mut world, InteractionKind::Talk, &mut ctx).unwrap();
        let event = world.active_event.as_ref().unwrap();
        assert_eq!(event.status, EncounterStatus::Pacified);
        assert!(!world.trading_blocked());
    }

    #[test]
    fn test_failed_pet_with_unknown_illness_falls_back() {
        let catalog = CardCatalog::new();
        let config = EngineConfig::default();
        let mut rng = GameRng::new(1);
        let mut sink = RecordingSink::new();

        let mut p = player(0.0, 1.0);
        let mut world = WorldState::new();
        let bat = Card::new("bat", "Bat", CardType::Event)
            .with_sub_type(SubType::Animal)
            .with_health(2)
            .with_effect(Effect::ApplyIllnessOnLinger {
                illness_id: "rabies".into(),
            });
        world.active_event = Some(ActiveEvent::reveal(bat, false));

        {
            let mut ctx = ResolveContext::new(&catalog, &config, &mut rng, &mut sink);
            let outcome =
                interact_with_threat(&mut p, &mut world, InteractionKind::Pet, &mut ctx).unwrap();
            assert_eq!(
                outcome,
                Outcome::InteractionFailed {
                    target: "Bat".into(),
                    damage: 2,
                    illness: None
                }
            );
        }
        assert_eq!(p.health, 8);
        assert!(sink.logged(Severity::Error, "rabies"));
    }

    #[test]
    fn test_failed_pet_applies_lingering_illness() {
        let catalog = CardCatalog::from_cards([Card::new("rabies", "Rabies", CardType::Event)
            .with_sub_type(SubType::Illness)
            .with_effect(Effect::Illness {
                damage_per_day: 1,
                days: 3,
            })])
        .unwrap();
        let config = EngineConfig::default();
        let mut rng = GameRng::new(1);
        let mut sink = RecordingSink::new();
        let mut ctx = ResolveContext::new(&catalog, &config, &mut rng, &mut sink);

        let mut p = player(0.0, 1.0);
        let mut world = WorldState::new();
        let bat = Card::new("bat", "Bat", CardType::Event)
            .with_sub_type(SubType::Animal)
            .with_health(2)
            .with_effect(Effect::ApplyIllnessOnLinger {
                illness_id: "rabies".into(),
            });
        world.active_event = Some(ActiveEvent::reveal(bat, false));

        interact_with_threat(&mut p, &mut world, InteractionKind::Pet, &mut ctx).unwrap();
        assert!(p.has_illness("Rabies"));
        assert_eq!(p.illnesses[0].remaining_days, Some(3));
    }
}
