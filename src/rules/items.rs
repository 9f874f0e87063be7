//! Using a card from the hand, the equip row or a satchel.
//!
//! ## Routing
//!
//! - Weapons strike the live threat and stay where they are; each weapon
//!   swings once per turn.
//! - Consumable attacks (`damage`, `poison`, `fire_arrow`, `trick_shot`,
//!   `bladed_technique`) strike and are discarded.
//! - Traps are set rather than discarded; setting one replaces the old trap.
//!   The trap's immediate effect fires as it is set.
//! - Draw and cure effects do their own bookkeeping before the card is
//!   discarded.
//!
//! A card's `immediate_effect` fires once, after the primary effect.

use im::Vector;

use super::context::ResolveContext;
use super::engine::Outcome;
use crate::cards::Card;
use crate::core::{ActionError, CardSource, ModalKind, PlayerState, WorldState};
use crate::effects::{
    calculate_attack_power, calculate_heal_amount, strongest_weapon_of_class, AttackContext,
    AttackOptions, Effect, UpgradeKind, WeaponClass,
};
use crate::threats::{base_event_card, strike_active_threat};

/// Remove a spent card from wherever it sits.
pub(crate) fn take_from_source(player: &mut PlayerState, source: CardSource) -> Option<Card> {
    match source {
        CardSource::Equipped(slot) => player.unequip(slot).map(|(card, _)| card),
        _ => player.take_loose_card(source),
    }
}

/// Move cards from the draw pile into free hand slots, recycling the
/// discard pile once. Returns how many were drawn.
pub(crate) fn draw_cards(
    player: &mut PlayerState,
    count: usize,
    ctx: &mut ResolveContext<'_>,
) -> usize {
    let mut drawn = 0;
    while drawn < count && !player.hand.is_full() {
        if player.deck.is_empty() {
            if player.discard.is_empty() {
                break;
            }
            let mut recycled: Vec<Card> = std::mem::take(&mut player.discard).into_iter().collect();
            ctx.rng.shuffle(&mut recycled);
            player.deck = recycled.into_iter().collect();
            ctx.info("Shuffled your discard pile into your deck");
        }
        let Some(card) = player.deck.pop_front() else {
            break;
        };
        if let Err(card) = player.hand.place(card) {
            player.deck.push_front(card);
            break;
        }
        drawn += 1;
    }
    player.stats.cards_drawn += drawn as u32;
    drawn
}

/// Remove illnesses matching `name` (all when `None`) and retire them.
pub(crate) fn cure_illnesses(
    player: &mut PlayerState,
    world: &mut WorldState,
    name: Option<&str>,
    ctx: &mut ResolveContext<'_>,
) -> Vec<String> {
    let (cured, kept): (Vector<Card>, Vector<Card>) = std::mem::take(&mut player.illnesses)
        .into_iter()
        .partition(|illness| name.map_or(true, |n| illness.name == n));
    player.illnesses = kept;

    let names: Vec<String> = cured.iter().map(|illness| illness.name.clone()).collect();
    for illness in &cured {
        world.event_discard.push_back(base_event_card(illness, ctx));
    }
    player.stats.illnesses_cured += names.len() as u32;
    if !names.is_empty() {
        ctx.info(&format!("Cured {}", names.join(", ")));
    }
    names
}

fn require_live_threat(world: &WorldState) -> Result<(), ActionError> {
    match world.live_threat() {
        Some(_) => Ok(()),
        None => Err(ActionError::NoLiveThreat),
    }
}

fn strike(
    player: &mut PlayerState,
    world: &mut WorldState,
    power: i64,
    ctx: &mut ResolveContext<'_>,
) -> Outcome {
    let target = world
        .active_event
        .as_ref()
        .map(|event| event.card.name.clone())
        .unwrap_or_default();
    let result = strike_active_threat(player, world, power, ctx);
    Outcome::Attacked {
        target,
        dealt: result.dealt,
        defeated: result.defeated,
    }
}

/// Technique attacks ride on the strongest weapon of their class.
fn technique(
    player: &mut PlayerState,
    world: &mut WorldState,
    source: CardSource,
    class: WeaponClass,
    bonus: i64,
    ctx: &mut ResolveContext<'_>,
) -> Result<Outcome, ActionError> {
    require_live_threat(world)?;
    let target = world.live_threat().map(|event| event.card.clone());
    let options = AttackOptions::from_config(ctx.config);
    let (_, power) = strongest_weapon_of_class(player, class, target.as_ref(), options)
        .ok_or(ActionError::NoQualifyingWeapon(class.label()))?;

    let card = take_from_source(player, source)
        .ok_or_else(|| ActionError::NoCardAtSource(source.to_string()))?;
    player.discard.push_back(card);
    Ok(strike(player, world, power + bonus, ctx))
}

/// Apply a secondary effect. Effects with nothing to act on are skipped.
pub(crate) fn apply_immediate_effect(
    player: &mut PlayerState,
    world: &mut WorldState,
    effect: &Effect,
    ctx: &mut ResolveContext<'_>,
) {
    match effect {
        Effect::Heal { amount, cures_illness } => {
            let healed = player.heal(*amount);
            ctx.info(&format!("Recovered {healed} health"));
            if *cures_illness {
                cure_illnesses(player, world, None, ctx);
            }
        }
        Effect::Cure { illness } => {
            cure_illnesses(player, world, illness.as_deref(), ctx);
        }
        Effect::Gold { amount } => {
            player.gold += amount;
            player.stats.gold_found += amount;
            ctx.sink.flash_gold(*amount);
        }
        Effect::Draw { count } => {
            draw_cards(player, *count, ctx);
        }
        Effect::Upgrade {
            kind: UpgradeKind::MaxHealth,
            amount,
            persistent: false,
        } => player.adjust_max_health(*amount),
        Effect::Damage { amount } if world.live_threat().is_some() => {
            strike_active_threat(player, world, *amount, ctx);
        }
        other => tracing::debug!(effect = other.kind_name(), "immediate effect has no target"),
    }
}

/// Fire the card's immediate effect if it has not fired yet, marking the
/// instance spent.
pub(crate) fn fire_immediate(
    player: &mut PlayerState,
    world: &mut WorldState,
    card: &mut Card,
    ctx: &mut ResolveContext<'_>,
) {
    if card.immediate_spent {
        return;
    }
    if let Some(effect) = card.immediate_effect.clone() {
        card.immediate_spent = true;
        apply_immediate_effect(player, world, &effect, ctx);
    }
}

/// Run the immediate effect of whichever card ended up at `source`, or of
/// the card just moved to the discard pile.
fn follow_up(
    player: &mut PlayerState,
    world: &mut WorldState,
    source: CardSource,
    played: &Card,
    ctx: &mut ResolveContext<'_>,
) {
    if played.immediate_spent || played.immediate_effect.is_none() {
        return;
    }

    let in_place = player.card_at(source).is_some_and(|card| card == played);
    let mut card = played.clone();
    fire_immediate(player, world, &mut card, ctx);

    if in_place {
        match source {
            CardSource::Hand(index) => player.hand = player.hand.replaced(index, card),
            CardSource::Equipped(slot) => {
                if let Some(index) = player.equipped_index(slot) {
                    player.equipped[index].card = card;
                }
            }
            CardSource::Satchel { slot, index } => {
                if let Some(contents) = player.satchels.get_mut(&slot) {
                    if index < contents.len() {
                        contents.set(index, card);
                    }
                }
            }
        }
    } else if let Some(pos) = player.discard.iter().rposition(|c| c == played) {
        player.discard.set(pos, card);
    }
}

fn use_primary(
    player: &mut PlayerState,
    world: &mut WorldState,
    source: CardSource,
    card: &Card,
    effect: &Effect,
    ctx: &mut ResolveContext<'_>,
) -> Result<Outcome, ActionError> {
    let missing = || ActionError::NoCardAtSource(source.to_string());

    match effect {
        Effect::Weapon { .. } | Effect::ConditionalWeapon { .. } => {
            require_live_threat(world)?;
            if player.turn.weapons_used.contains(&source) {
                return Err(ActionError::AlreadyUsedThisTurn(card.name.clone()));
            }
            let target = world.live_threat().map(|event| event.card.clone());
            let power = calculate_attack_power(
                card,
                player,
                AttackContext::of(source),
                target.as_ref(),
                AttackOptions::from_config(ctx.config),
            );
            player.turn.weapons_used.push_back(source);
            ctx.sink.play_sound(card.name.as_str());
            Ok(strike(player, world, power, ctx))
        }

        Effect::Damage { amount } | Effect::Poison { amount } => {
            require_live_threat(world)?;
            let spent = take_from_source(player, source).ok_or_else(missing)?;
            player.discard.push_back(spent);
            Ok(strike(player, world, *amount, ctx))
        }
        Effect::FireArrow { bonus } => {
            technique(player, world, source, WeaponClass::Bow, *bonus, ctx)
        }
        Effect::TrickShot { bonus } => {
            technique(player, world, source, WeaponClass::Firearm, *bonus, ctx)
        }
        Effect::BladedTechnique { bonus } => {
            technique(player, world, source, WeaponClass::Bladed, *bonus, ctx)
        }

        Effect::Heal { cures_illness, .. } => {
            let amount = calculate_heal_amount(card, player);
            let spent = take_from_source(player, source).ok_or_else(missing)?;
            let healed = player.heal(amount);
            let cured = if *cures_illness {
                cure_illnesses(player, world, None, ctx)
            } else {
                Vec::new()
            };
            player.discard.push_back(spent);
            ctx.sink.animate("heal", &card.name);
            ctx.info(&format!("{} restored {healed} health", card.name));
            Ok(Outcome::Healed { amount: healed, cured })
        }

        Effect::Cure { illness } => {
            let matches = |i: &Card| illness.as_deref().map_or(true, |n| i.name == n);
            if !player.illnesses.iter().any(matches) {
                return Err(ActionError::NothingToCure);
            }
            let spent = take_from_source(player, source).ok_or_else(missing)?;
            let illnesses = cure_illnesses(player, world, illness.as_deref(), ctx);
            player.discard.push_back(spent);
            Ok(Outcome::Cured { illnesses })
        }

        Effect::Trap { .. } => {
            if world.trading_blocked() {
                return Err(ActionError::TrapWhileHostile);
            }
            let mut trap = take_from_source(player, source).ok_or_else(missing)?;
            fire_immediate(player, world, &mut trap, ctx);
            let replaced = match player.active_trap.replace(trap) {
                Some(old) => {
                    player.discard.push_back(old);
                    true
                }
                None => false,
            };
            player.stats.traps_set += 1;
            ctx.sink.play_sound("trap_set");
            ctx.info(&format!("Set {}", card.name));
            Ok(Outcome::TrapSet { replaced })
        }

        Effect::Campfire { amount } => {
            if world.trading_blocked() {
                return Err(ActionError::CampfireWhileHostile);
            }
            let spent = take_from_source(player, source).ok_or_else(missing)?;
            let healed = player.heal(*amount);
            player.discard.push_back(spent);
            ctx.sink.animate("campfire", &card.name);
            Ok(Outcome::Rested { amount: healed })
        }

        Effect::Gold { amount } => {
            let spent = take_from_source(player, source).ok_or_else(missing)?;
            player.gold += amount;
            player.stats.gold_found += amount;
            player.discard.push_back(spent);
            ctx.sink.flash_gold(*amount);
            Ok(Outcome::GoldFound { amount: *amount })
        }

        Effect::Draw { count } => {
            let spent = take_from_source(player, source).ok_or_else(missing)?;
            let drawn = draw_cards(player, *count, ctx);
            if drawn == 0 {
                return Err(ActionError::NothingToDraw);
            }
            player.discard.push_back(spent);
            Ok(Outcome::Drew { count: drawn })
        }

        Effect::Scout { count } => {
            let cards: Vec<String> = world
                .event_deck
                .iter()
                .take(*count)
                .map(|c| c.name.clone())
                .collect();
            let spent = take_from_source(player, source).ok_or_else(missing)?;
            player.discard.push_back(spent);
            ctx.sink.request_modal(&ModalKind::ScoutReport(cards.clone()));
            Ok(Outcome::Scouted { cards })
        }

        Effect::Upgrade {
            kind: UpgradeKind::MaxHealth,
            amount,
            persistent: false,
        } => {
            let spent = take_from_source(player, source).ok_or_else(missing)?;
            player.adjust_max_health(*amount);
            player.discard.push_back(spent);
            Ok(Outcome::Upgraded {
                kind: UpgradeKind::MaxHealth,
                amount: *amount,
            })
        }
        Effect::Upgrade { persistent: true, .. } => {
            if matches!(source, CardSource::Equipped(_)) {
                Err(ActionError::NotUsable(card.name.clone()))
            } else {
                Err(ActionError::MustEquip(card.name.clone()))
            }
        }

        Effect::Upgrade { .. }
        | Effect::DamagePercent { .. }
        | Effect::RandomGoldSteal { .. }
        | Effect::DiscardEquipped
        | Effect::ApplyIllnessOnLinger { .. }
        | Effect::Illness { .. } => Err(ActionError::NotUsable(card.name.clone())),
    }
}

/// Use the card at `source`.
pub fn use_item(
    player: &mut PlayerState,
    world: &mut WorldState,
    source: CardSource,
    ctx: &mut ResolveContext<'_>,
) -> Result<Outcome, ActionError> {
    let card = player
        .card_at(source)
        .cloned()
        .ok_or_else(|| ActionError::NoCardAtSource(source.to_string()))?;
    let effect = card
        .effect
        .clone()
        .ok_or_else(|| ActionError::NotUsable(card.name.clone()))?;

    let outcome = use_primary(player, world, source, &card, &effect, ctx)?;
    tracing::debug!(card = %card.id, effect = effect.kind_name(), "used");

    // A set trap fires its immediate effect on the way to the trap slot.
    if !matches!(effect, Effect::Trap { .. }) {
        follow_up(player, world, source, &card, ctx);
    }
    Ok(outcome)
}
