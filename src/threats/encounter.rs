//! Damage, defeat, traps and gold theft for the active threat.

use crate::cards::Card;
use crate::core::{PlayerState, WorldState};
use crate::effects::Effect;
use crate::rules::ResolveContext;

use super::trophy::create_trophy_or_bounty_card;

/// Result of hitting the active threat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Strike {
    pub dealt: i64,
    pub defeated: bool,
    pub truce_broken: bool,
}

/// What an active trap did to a freshly revealed threat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrapOutcome {
    /// No trap set, or the threat is not an animal.
    Idle,
    Caught,
    Broke { dealt: i64 },
}

/// The template a retired event card returns to the event discard as.
pub fn base_event_card(card: &Card, ctx: &ResolveContext<'_>) -> Card {
    ctx.catalog
        .base_of(card)
        .cloned()
        .unwrap_or_else(|| card.normalized())
}

/// Put a spoil in the first free hand slot, else on the discard pile.
pub fn stow_spoil(player: &mut PlayerState, card: Card) {
    if let Err(card) = player.hand.place(card) {
        player.discard.push_back(card);
    }
}

/// Deal `amount` to the active threat. Health clamps at zero and reaching
/// zero runs defeat processing once.
pub fn strike_active_threat(
    player: &mut PlayerState,
    world: &mut WorldState,
    amount: i64,
    ctx: &mut ResolveContext<'_>,
) -> Strike {
    let Some(event) = world.active_event.as_mut().filter(|e| e.is_live_threat()) else {
        return Strike::default();
    };

    let truce_broken = event.break_truce();
    let dealt = event.card.take_damage(amount);
    let name = event.card.name.clone();
    let remaining = event.card.current_health();
    player.stats.damage_dealt += dealt;

    if truce_broken {
        ctx.warn(&format!("{name} is hostile again"));
    }
    ctx.sink.animate("hit", &name);
    ctx.info(&format!("Dealt {dealt} damage to {name} ({remaining} left)"));

    if remaining > 0 {
        event.refresh_status();
        return Strike {
            dealt,
            defeated: false,
            truce_broken,
        };
    }

    resolve_defeat(player, world, ctx);
    Strike {
        dealt,
        defeated: true,
        truce_broken,
    }
}

/// Retire the active threat as defeated. Returns the spoil produced, if any.
pub fn resolve_defeat(
    player: &mut PlayerState,
    world: &mut WorldState,
    ctx: &mut ResolveContext<'_>,
) -> Option<Card> {
    let event = world.active_event.take()?;
    let card = event.card;

    player.stats.kills += 1;
    if card.is_human() {
        player.stats.humans_defeated += 1;
    }
    if ctx.config.apex_predator_ids.contains(&card.id) {
        player.stats.apex_kills += 1;
    }
    if ctx.config.pest_ids.contains(&card.id) {
        player.stats.pests_killed += 1;
    }

    ctx.sink.animate("defeat", &card.name);
    ctx.sink.play_sound("victory");

    if event.is_boss || ctx.config.is_boss(&card.id) {
        player.stats.bosses_defeated += 1;
        world.boss_fight_active = false;
        ctx.info(&format!("{} has fallen. The frontier is quiet again.", card.name));
        world.event_discard.push_back(base_event_card(&card, ctx));
        return None;
    }

    let spoil = create_trophy_or_bounty_card(Some(&card));
    ctx.info(&format!("Defeated {} and claimed {}", card.name, spoil.name));
    world.event_discard.push_back(base_event_card(&card, ctx));
    stow_spoil(player, spoil.clone());
    Some(spoil)
}

/// Take gold from the player when a thief is revealed. Returns the amount.
pub fn steal_gold(
    player: &mut PlayerState,
    world: &mut WorldState,
    ctx: &mut ResolveContext<'_>,
) -> i64 {
    let Some(event) = world.active_event.as_mut() else {
        return 0;
    };
    let range = [&event.card.effect, &event.card.immediate_effect]
        .into_iter()
        .find_map(|effect| match effect {
            Some(Effect::RandomGoldSteal { min, max }) => Some((*min, *max)),
            _ => None,
        });
    let Some((min, max)) = range else {
        return 0;
    };

    let rolled = ctx.rng.gen_range_inclusive(min.max(0)..=max.max(0));
    let stolen = rolled.min(player.gold);
    if stolen <= 0 {
        return 0;
    }

    player.gold -= stolen;
    player.stats.gold_stolen += stolen;
    event.stolen_gold += stolen;
    ctx.sink.flash_gold(-stolen);
    let name = event.card.name.clone();
    ctx.warn(&format!("{name} stole {stolen} gold"));
    stolen
}

/// Resolve the player's set trap against the active threat. Only animals
/// spring traps; either way a sprung trap goes to the discard pile.
pub fn spring_trap(
    player: &mut PlayerState,
    world: &mut WorldState,
    ctx: &mut ResolveContext<'_>,
) -> TrapOutcome {
    let target = world
        .active_event
        .as_mut()
        .filter(|e| e.card.is_animal() && e.is_live_threat());
    let Some(event) = target else {
        return TrapOutcome::Idle;
    };
    let Some(trap) = player.active_trap.take() else {
        return TrapOutcome::Idle;
    };
    let strength = match trap.effect {
        Some(Effect::Trap { strength }) => strength,
        _ => 0,
    };
    let name = event.card.name.clone();
    player.discard.push_back(trap);

    if event.card.current_health() <= strength {
        let health = event.card.current_health();
        event.card.take_damage(health);
        player.stats.trap_catches += 1;
        ctx.sink.play_sound("trap_snap");
        ctx.info(&format!("Your trap caught the {name}"));
        resolve_defeat(player, world, ctx);
        return TrapOutcome::Caught;
    }

    let dealt = event.card.take_damage(strength);
    player.stats.damage_dealt += dealt;
    event.refresh_status();
    ctx.sink.animate("trap_break", &name);
    ctx.info(&format!("The {name} broke free of your trap, taking {dealt} damage"));
    TrapOutcome::Broke { dealt }
}
