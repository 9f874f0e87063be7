//! Turn boundaries and event reveal.
//!
//! A day runs `begin_turn` -> `reveal_next_event` -> player actions ->
//! `end_turn`. Reveal and turn start go through the same copy-and-commit
//! path as player actions, so a rejected reveal changes nothing.

use im::Vector;

use super::context::ResolveContext;
use super::engine::{transact, Outcome, Resolution};
use super::equipment::discard_equipped;
use crate::cards::{apply_difficulty_bonus, get_scaled_card, Card};
use crate::core::{ActionError, ActiveEvent, EncounterStatus, PlayerState, TurnFlags, WorldState};
use crate::effects::Effect;
use crate::threats::{base_event_card, spring_trap, steal_gold, TrapOutcome};

/// Add an illness to the player unless one with the same name is already
/// running, in which case the card is discarded. Returns whether it took.
pub(crate) fn contract_illness(
    player: &mut PlayerState,
    world: &mut WorldState,
    mut illness: Card,
    ctx: &mut ResolveContext<'_>,
) -> bool {
    if player.has_illness(&illness.name) {
        ctx.info(&format!("Already suffering from {}", illness.name));
        world.event_discard.push_back(base_event_card(&illness, ctx));
        return false;
    }

    let days = match illness.effect {
        Some(Effect::Illness { days, .. }) => Some(days),
        _ => None,
    };
    illness.remaining_days = days;
    ctx.sink.animate("illness", &illness.name);
    ctx.warn(&format!("You have contracted {}", illness.name));
    player.illnesses.push_back(illness);
    player.stats.illnesses_contracted += 1;
    true
}

fn forced_boss(world: &mut WorldState, ctx: &mut ResolveContext<'_>) -> Option<Card> {
    if !std::mem::take(&mut world.force_boss_reveal_next_turn) {
        return None;
    }
    let (config, catalog) = (ctx.config, ctx.catalog);
    let Some(id) = config.boss_id.as_ref() else {
        tracing::debug!("boss reveal requested but no boss is configured");
        return None;
    };
    match catalog.get(id.as_str()) {
        Some(boss) => Some(boss.clone()),
        None => {
            let message = format!("boss card {id} is missing from the catalog");
            ctx.error(&message);
            None
        }
    }
}

fn draw_event(world: &mut WorldState, ctx: &mut ResolveContext<'_>) -> Result<Card, ActionError> {
    if world.event_deck.is_empty() {
        if world.event_discard.is_empty() {
            return Err(ActionError::EventDeckEmpty);
        }
        let mut recycled: Vec<Card> =
            std::mem::take(&mut world.event_discard).into_iter().collect();
        ctx.rng.shuffle(&mut recycled);
        world.event_deck = recycled.into_iter().collect();
        ctx.info("The trail loops back. Old events are shuffled in again.");
    }
    world.event_deck.pop_front().ok_or(ActionError::EventDeckEmpty)
}

fn hazard_strikes(
    player: &mut PlayerState,
    card: &Card,
    ctx: &mut ResolveContext<'_>,
) -> Result<(), ActionError> {
    match &card.effect {
        Some(Effect::Damage { amount }) => {
            let taken = player.take_damage(*amount);
            ctx.info(&format!("{} dealt {taken} damage", card.name));
        }
        Some(Effect::DamagePercent { percent }) => {
            let amount = (player.max_health * (*percent).max(0) + 99) / 100;
            let taken = player.take_damage(amount);
            ctx.info(&format!("{} dealt {taken} damage", card.name));
        }
        Some(Effect::DiscardEquipped) => {
            if player.equipped.is_empty() {
                ctx.info(&format!("{} found nothing to take", card.name));
            } else {
                let index = ctx.rng.gen_index(player.equipped.len());
                let slot = player.equipped[index].slot;
                discard_equipped(player, slot, ctx)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn reveal(
    player: &mut PlayerState,
    world: &mut WorldState,
    ctx: &mut ResolveContext<'_>,
) -> Result<Outcome, ActionError> {
    if let Some(event) = world.live_threat() {
        return Err(ActionError::EncounterInProgress(event.card.name.clone()));
    }
    if let Some(leftover) = world.active_event.take() {
        world.event_discard.push_back(base_event_card(&leftover.card, ctx));
    }

    let (drawn, is_boss) = match forced_boss(world, ctx) {
        Some(boss) => (boss, true),
        None => (draw_event(world, ctx)?, false),
    };
    let scaled = get_scaled_card(&drawn, player.ng_plus_level);
    let card = apply_difficulty_bonus(&scaled, ctx.config.difficulty_bonus).into_owned();
    let name = card.name.clone();
    ctx.sink.animate("reveal", &name);

    if card.is_event() && card.is_illness() {
        contract_illness(player, world, card, ctx);
        return Ok(Outcome::Revealed { card: name, hostile: false });
    }

    if card.is_environmental() {
        hazard_strikes(player, &card, ctx)?;
    }

    let is_threat = card.is_threat();
    world.active_event = Some(ActiveEvent::reveal(card, is_boss));

    if is_boss {
        world.boss_fight_active = true;
        ctx.sink.play_sound("boss");
        ctx.warn(&format!("{name} blocks the trail"));
    } else if is_threat {
        ctx.info(&format!("A {name} appears"));
    }

    if is_threat {
        steal_gold(player, world, ctx);
        if let TrapOutcome::Caught = spring_trap(player, world, ctx) {
            return Ok(Outcome::Revealed { card: name, hostile: false });
        }
    }

    let hostile = world
        .active_event
        .as_ref()
        .is_some_and(|event| event.status == EncounterStatus::Hostile);
    Ok(Outcome::Revealed { card: name, hostile })
}

fn begin(
    player: &mut PlayerState,
    world: &mut WorldState,
    ctx: &mut ResolveContext<'_>,
) -> Result<Outcome, ActionError> {
    player.turn = TurnFlags::default();

    let mut illness_damage = 0;
    let mut recovered = Vec::new();
    let mut running = Vector::new();
    for mut illness in std::mem::take(&mut player.illnesses) {
        let (per_day, days) = match illness.effect {
            Some(Effect::Illness { damage_per_day, days }) => (damage_per_day, days),
            _ => (0, 0),
        };

        // Illness damage ignores damage negation.
        let dealt = per_day.clamp(0, player.health.max(0));
        player.health -= dealt;
        player.stats.damage_taken += dealt;
        illness_damage += dealt;

        let remaining = illness.remaining_days.unwrap_or(days).saturating_sub(1);
        if remaining == 0 {
            ctx.info(&format!("{} has run its course", illness.name));
            recovered.push(illness.name.clone());
            world.event_discard.push_back(base_event_card(&illness, ctx));
        } else {
            illness.remaining_days = Some(remaining);
            running.push_back(illness);
        }
    }
    player.illnesses = running;

    let retire = world.active_event.as_ref().is_some_and(|event| {
        !event.is_live_threat() || (event.status == EncounterStatus::Pacified && !event.is_boss)
    });
    if retire {
        if let Some(event) = world.active_event.take() {
            tracing::debug!(card = %event.card.id, "retiring active event");
            world.event_discard.push_back(base_event_card(&event.card, ctx));
        }
    }

    Ok(Outcome::TurnBegan {
        illness_damage,
        recovered,
    })
}

/// Reveal the next event: the boss when an objective forced it, otherwise
/// the top of the event deck.
#[must_use]
pub fn reveal_next_event(
    player: &PlayerState,
    world: &WorldState,
    ctx: &mut ResolveContext<'_>,
) -> Resolution {
    transact("reveal_next_event", player, world, ctx, reveal)
}

/// Start a new day: reset per-turn flags, tick illnesses and retire the
/// previous day's non-threat event.
#[must_use]
pub fn begin_turn(
    player: &PlayerState,
    world: &WorldState,
    ctx: &mut ResolveContext<'_>,
) -> Resolution {
    transact("begin_turn", player, world, ctx, begin)
}

/// Close the turn. Further actions are rejected until `begin_turn`.
#[must_use]
pub fn end_turn(player: &PlayerState) -> PlayerState {
    let mut next = player.clone();
    next.turn.turn_ended = true;
    next
}
