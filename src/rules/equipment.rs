//! Equip row and satchel handlers.

use super::context::ResolveContext;
use super::engine::Outcome;
use crate::core::{ActionError, CardSource, PlayerState, SlotId};

/// Move a card from the hand onto the equip row. One equip per turn.
pub fn equip_item(
    player: &mut PlayerState,
    hand_index: usize,
    ctx: &mut ResolveContext<'_>,
) -> Result<Outcome, ActionError> {
    let card = player
        .hand
        .get(hand_index)
        .ok_or_else(|| ActionError::NoCardAtSource(CardSource::Hand(hand_index).to_string()))?;
    if player.turn.equipped_this_turn {
        return Err(ActionError::AlreadyEquippedThisTurn);
    }
    if !card.is_equippable() {
        return Err(ActionError::NotEquippable(card.name.clone()));
    }
    if player.equipped.len() >= ctx.config.equip_slots {
        return Err(ActionError::NoFreeSlot);
    }

    let card = player
        .hand
        .take(hand_index)
        .ok_or_else(|| ActionError::NoCardAtSource(CardSource::Hand(hand_index).to_string()))?;
    let name = card.name.clone();
    let slot = player.equip(card);
    player.turn.equipped_this_turn = true;

    ctx.sink.animate("equip", &name);
    ctx.info(&format!("Equipped {name}"));
    Ok(Outcome::Equipped { slot })
}

/// Move a provision from the hand into a satchel with room, preferring
/// `slot` when given.
pub fn store_provision(
    player: &mut PlayerState,
    hand_index: usize,
    slot: Option<SlotId>,
    ctx: &mut ResolveContext<'_>,
) -> Result<Outcome, ActionError> {
    let card = player
        .hand
        .get(hand_index)
        .ok_or_else(|| ActionError::NoCardAtSource(CardSource::Hand(hand_index).to_string()))?;
    if !card.is_provision() {
        return Err(ActionError::NotAProvision);
    }

    let has_room = |s: SlotId| player.satchel_room(s).is_some_and(|room| room > 0);
    let target = match slot {
        Some(s) if has_room(s) => Some(s),
        Some(_) => None,
        None => player.equipped.iter().map(|item| item.slot).find(|s| has_room(*s)),
    }
    .ok_or(ActionError::NoSatchelSpace)?;

    let card = player
        .hand
        .take(hand_index)
        .ok_or_else(|| ActionError::NoCardAtSource(CardSource::Hand(hand_index).to_string()))?;
    let name = card.name.clone();
    match player.satchels.get_mut(&target) {
        Some(contents) => contents.push_back(card),
        None => {
            player.satchels.insert(target, im::vector![card]);
        }
    }

    ctx.info(&format!("Stored {name}"));
    Ok(Outcome::Stored { slot: target })
}

/// Discard an equipped item. A storage item keeps a snapshot of its
/// contents, possibly empty, so re-equipping restores them.
pub fn discard_equipped(
    player: &mut PlayerState,
    slot: SlotId,
    ctx: &mut ResolveContext<'_>,
) -> Result<Outcome, ActionError> {
    let (mut card, contents) = player
        .unequip(slot)
        .ok_or_else(|| ActionError::NoCardAtSource(CardSource::Equipped(slot).to_string()))?;

    if card.is_storage() {
        card.stored = Some(contents.into_iter().collect());
    }
    let name = card.name.clone();
    player.discard.push_back(card);

    ctx.info(&format!("Discarded {name}"));
    Ok(Outcome::Unequipped { card: name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardCatalog, CardType, SubType};
    use crate::core::{Character, EngineConfig, GameRng};
    use crate::effects::{Effect, UpgradeKind};
    use crate::rules::NullSink;

    fn player() -> PlayerState {
        let character = Character {
            name: "Packer".into(),
            health: 10,
            gold: 0,
            talk_failure_chance: 0.5,
            pet_failure_chance: 0.5,
            unique_item: None,
        };
        PlayerState::new(&character, &EngineConfig::default(), &CardCatalog::new())
    }

    fn satchel(capacity: usize) -> Card {
        Card::new("satchel", "Satchel", CardType::Item)
            .with_sub_type(SubType::Storage)
            .with_capacity(capacity)
    }

    fn jerky() -> Card {
        Card::new("jerky", "Jerky", CardType::Provision).with_effect(Effect::heal(2))
    }

    #[test]
    fn test_equip_rules() {
        let catalog = CardCatalog::new();
        let config = EngineConfig::default().with_equip_slots(1);
        let mut rng = GameRng::new(1);
        let mut sink = NullSink;
        let mut ctx = ResolveContext::new(&catalog, &config, &mut rng, &mut sink);

        let mut p = player();
        p.hand = p.hand.replaced(0, jerky());
        p.hand = p.hand.replaced(1, satchel(2));
        let knife = Card::new("knife", "Knife", CardType::Item).with_effect(Effect::weapon(2));
        p.hand = p.hand.replaced(2, knife);

        assert_eq!(
            equip_item(&mut p, 0, &mut ctx),
            Err(ActionError::NotEquippable("Jerky".into()))
        );
        assert!(matches!(equip_item(&mut p, 1, &mut ctx), Ok(Outcome::Equipped { .. })));
        assert_eq!(equip_item(&mut p, 2, &mut ctx), Err(ActionError::AlreadyEquippedThisTurn));

        p.turn.equipped_this_turn = false;
        assert_eq!(equip_item(&mut p, 2, &mut ctx), Err(ActionError::NoFreeSlot));
        assert!(matches!(equip_item(&mut p, 4, &mut ctx), Err(ActionError::NoCardAtSource(_))));
    }

    #[test]
    fn test_store_respects_capacity() {
        let catalog = CardCatalog::new();
        let config = EngineConfig::default();
        let mut rng = GameRng::new(1);
        let mut sink = NullSink;
        let mut ctx = ResolveContext::new(&catalog, &config, &mut rng, &mut sink);

        let mut p = player();
        let bag = p.equip(satchel(1));
        p.hand = p.hand.replaced(0, jerky());
        p.hand = p.hand.replaced(1, jerky());

        assert_eq!(store_provision(&mut p, 0, None, &mut ctx), Ok(Outcome::Stored { slot: bag }));
        assert_eq!(
            store_provision(&mut p, 1, Some(bag), &mut ctx),
            Err(ActionError::NoSatchelSpace)
        );
        assert_eq!(p.satchels.get(&bag).unwrap().len(), 1);
        assert!(p.hand.get(1).is_some());
    }

    #[test]
    fn test_discard_keeps_snapshot_and_reverses_upgrades() {
        let catalog = CardCatalog::new();
        let config = EngineConfig::default();
        let mut rng = GameRng::new(1);
        let mut sink = NullSink;
        let mut ctx = ResolveContext::new(&catalog, &config, &mut rng, &mut sink);

        let mut p = player();
        let bag = p.equip(satchel(2));
        let vest = p.equip(
            Card::new("vest", "Vest", CardType::PlayerUpgrade)
                .with_effect(Effect::upgrade(UpgradeKind::MaxHealth, 4)),
        );
        assert_eq!(p.max_health, 14);

        discard_equipped(&mut p, vest, &mut ctx).unwrap();
        assert_eq!(p.max_health, 10);

        discard_equipped(&mut p, bag, &mut ctx).unwrap();
        let discarded = p.discard.back().unwrap();
        assert_eq!(discarded.stored, Some(vec![]));
        assert!(p.satchels.is_empty());
        assert!(p.satchels_aligned());
    }
}
