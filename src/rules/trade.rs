//! Store trading.
//!
//! Trading is closed while a hostile threat is active. Gold moves by exactly
//! the quoted price and the run statistics track it to the coin.
//!
//! Sold cards either return to the bottom of the store deck as their
//! catalog template, or leave circulation (trophies, proofs, valuables).

use super::context::ResolveContext;
use super::engine::Outcome;
use super::items::{fire_immediate, take_from_source};
use crate::cards::{classify, get_scaled_card, Card};
use crate::core::{ActionError, CardSource, PlayerState, SlotId, WorldState};
use crate::effects::UpgradeKind;

/// Price to buy `card`, recovering a broken price from the catalog.
fn purchase_price(
    card: &Card,
    player: &PlayerState,
    ctx: &mut ResolveContext<'_>,
) -> Result<i64, ActionError> {
    if card.buy_cost > 0 {
        return Ok(card.buy_cost);
    }

    let recovered = ctx
        .catalog
        .base_of(card)
        .map(|base| get_scaled_card(base, player.ng_plus_level).buy_cost)
        .filter(|cost| *cost > 0);
    match recovered {
        Some(cost) => {
            ctx.warn(&format!("{} had price {}; repriced to {cost}", card.name, card.buy_cost));
            Ok(cost)
        }
        None => Err(ActionError::InvalidPrice(card.name.clone())),
    }
}

/// What the player receives for selling `card`.
#[must_use]
pub fn sale_price(card: &Card, player: &PlayerState) -> i64 {
    if classify::is_valuable(card) {
        let bonus = player.equipped_bonus(UpgradeKind::ValuableSellBonus)
            + player.held_bonus(UpgradeKind::ValuableSellBonus);
        return card.sell_value.max(card.gold_value) + bonus;
    }
    card.sell_value
}

/// Buy the card at `display_index` from the store display.
pub fn buy_item(
    player: &mut PlayerState,
    world: &mut WorldState,
    display_index: usize,
    ctx: &mut ResolveContext<'_>,
) -> Result<Outcome, ActionError> {
    if world.trading_blocked() {
        return Err(ActionError::TradeBlocked);
    }
    let card = world
        .store_display
        .get(display_index)
        .cloned()
        .ok_or_else(|| ActionError::NoCardAtSource(format!("store slot {display_index}")))?;

    let price = purchase_price(&card, player, ctx)?;
    if player.gold < price {
        return Err(ActionError::InsufficientGold {
            needed: price,
            available: player.gold,
        });
    }
    if player.hand.is_full() {
        return Err(ActionError::HandFull);
    }

    let mut card = world.store_display.remove(display_index);
    player.gold -= price;
    player.stats.gold_spent += price;
    player.stats.items_bought += 1;
    ctx.sink.flash_gold(-price);
    ctx.info(&format!("Bought {} for {price} gold", card.name));

    world.refill_store_display(ctx.config.store_display_size);
    let name = card.name.clone();
    fire_immediate(player, world, &mut card, ctx);
    if let Err(card) = player.hand.place(card) {
        player.discard.push_back(card);
    }

    Ok(Outcome::Bought { card: name, price })
}

/// Sell the card at `source`.
pub fn sell_item(
    player: &mut PlayerState,
    world: &mut WorldState,
    source: CardSource,
    ctx: &mut ResolveContext<'_>,
) -> Result<Outcome, ActionError> {
    if world.trading_blocked() {
        return Err(ActionError::TradeBlocked);
    }
    let card = player
        .card_at(source)
        .cloned()
        .ok_or_else(|| ActionError::NoCardAtSource(source.to_string()))?;
    let price = sale_price(&card, player);
    if price <= 0 {
        return Err(ActionError::NotSellable(card.name.clone()));
    }

    let sold = match source {
        CardSource::Equipped(slot) => {
            let (sold, contents) = player
                .unequip(slot)
                .ok_or_else(|| ActionError::NoCardAtSource(source.to_string()))?;
            if !contents.is_empty() {
                let names: Vec<&str> = contents.iter().map(|c| c.name.as_str()).collect();
                ctx.warn(&format!("Discarded satchel contents: {}", names.join(", ")));
                player.discard.extend(contents.iter().cloned());
            }
            sold
        }
        _ => take_from_source(player, source)
            .ok_or_else(|| ActionError::NoCardAtSource(source.to_string()))?,
    };

    player.gold += price;
    player.stats.gold_earned += price;
    player.stats.items_sold += 1;
    ctx.sink.flash_gold(price);
    ctx.info(&format!("Sold {} for {price} gold", sold.name));

    if !sold.is_spoil() && !classify::is_valuable(&sold) {
        let returned = match ctx.catalog.base_of(&sold) {
            Some(base) => get_scaled_card(base, player.ng_plus_level).into_owned(),
            None => sold.normalized(),
        };
        world.store_deck.push_back(returned);
    }

    Ok(Outcome::Sold {
        card: sold.name,
        price,
    })
}

/// Sell one provision straight out of a satchel.
pub fn sell_from_satchel(
    player: &mut PlayerState,
    world: &mut WorldState,
    slot: SlotId,
    index: usize,
    ctx: &mut ResolveContext<'_>,
) -> Result<Outcome, ActionError> {
    sell_item(player, world, CardSource::Satchel { slot, index }, ctx)
}
