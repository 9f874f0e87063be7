//! Deck construction and scaling tests.
//!
//! These tests verify run setup across NG+ levels:
//! - Event deck quotas, exclusions and milestone ordering
//! - Scaling that borrows when nothing changes and never compounds
//! - Replays from a fixed seed

mod common;

use std::borrow::Cow;

use common::{character, jerky, wolf, Harness};
use frontier_engine::cards::{
    apply_difficulty_bonus, get_scaled_card, Card, CardCatalog, CardId, CardType, SubType,
};
use frontier_engine::core::{Action, CardSource, EngineConfig, GameRng, PlayerState};
use frontier_engine::deck::{build_event_deck, build_store_deck};
use frontier_engine::effects::Effect;
use frontier_engine::rules::{begin_turn, resolve, reveal_next_event, RunSession};
use proptest::prelude::*;
use rustc_hash::FxHashSet;

fn pool() -> Vec<Card> {
    let mut cards = Vec::new();
    for i in 0..24i64 {
        cards.push(
            Card::new(format!("cougar_{i}"), format!("Cougar {i}"), CardType::Event)
                .with_sub_type(if i % 3 == 0 { SubType::Human } else { SubType::Animal })
                .with_health(2 + (i * 5) % 13)
                .with_effect(Effect::damage(1 + i % 4)),
        );
    }
    for i in 0..3 {
        cards.push(
            Card::new(format!("fever_{i}"), "Fever", CardType::Event)
                .with_sub_type(SubType::Illness)
                .with_effect(Effect::Illness {
                    damage_per_day: 1,
                    days: 2,
                }),
        );
    }
    cards.push(
        Card::new("flash_flood", "Flash Flood", CardType::Event)
            .with_sub_type(SubType::Environmental)
            .with_effect(Effect::damage(3)),
    );
    for i in 0..4 {
        let nugget = Card::new(format!("gold_nugget_{i}"), "Gold Nugget", CardType::Item);
        cards.push(nugget.with_gold_value(6));
    }
    for i in 0..8 {
        cards.push(
            Card::new(format!("jerky_{i}"), "Jerky", CardType::Provision)
                .with_effect(Effect::heal(2))
                .with_buy_cost(3),
        );
    }
    cards.push(
        Card::new("lost_claim", "Lost Claim", CardType::Event).with_sub_type(SubType::Objective),
    );
    cards.push(Card::new("family_bible", "Family Bible", CardType::Item).with_buy_cost(9));
    cards
}

fn reserved() -> FxHashSet<CardId> {
    [CardId::new("family_bible")].into_iter().collect()
}

/// Quotas hold and excluded cards stay out.
#[test]
fn test_event_deck_quotas() {
    for seed in 0..10 {
        let mut rng = GameRng::new(seed);
        let deck = build_event_deck(&pool(), 3, &EngineConfig::default(), &reserved(), &mut rng);

        assert_eq!(deck.len(), 20, "seed {seed}");
        assert_eq!(deck.iter().filter(|c| c.is_threat()).count(), 15);
        let hazards = deck
            .iter()
            .filter(|c| c.is_illness() || c.is_environmental())
            .count();
        assert_eq!(hazards, 2);
        let valuables = deck.iter().filter(|c| c.id.as_str().starts_with("gold_nugget")).count();
        assert!(valuables <= 3);
        assert!(deck.iter().all(|c| !c.is_objective()));
        assert!(deck.iter().all(|c| c.id.as_str() != "family_bible"));
    }
}

/// Threats are spread through the deck rather than bunched at one end.
#[test]
fn test_threats_spread_through_deck() {
    let mut front_loaded = 0;
    for seed in 0..40 {
        let mut rng = GameRng::new(seed);
        let deck = build_event_deck(&pool(), 1, &EngineConfig::default(), &reserved(), &mut rng);
        if deck.iter().take(15).all(Card::is_threat) {
            front_loaded += 1;
        }
    }
    assert!(front_loaded < 5, "{front_loaded} of 40 decks had every threat up front");
}

/// Theme milestones ramp threats from easiest to hardest.
#[test]
fn test_milestone_threat_order() {
    for level in [0, 10, 20] {
        let mut rng = GameRng::new(u64::from(level) + 1);
        let config = EngineConfig::default();
        let deck = build_event_deck(&pool(), level, &config, &reserved(), &mut rng);
        let healths: Vec<i64> =
            deck.iter().filter(|c| c.is_threat()).map(Card::current_health).collect();
        assert!(healths.windows(2).all(|w| w[0] <= w[1]), "level {level}: {healths:?}");
    }
}

/// Store stock is priced for the level and skips events and reserved cards.
#[test]
fn test_store_deck_pricing() {
    let mut rng = GameRng::new(5);
    let stock = build_store_deck(&pool(), 5, &reserved(), &mut rng);
    assert_eq!(stock.len(), 8);
    assert!(stock.iter().all(|c| c.buy_cost == 5));
}

/// Level zero borrows, and rescaling a scaled card is a no-op.
#[test]
fn test_scaling_is_idempotent() {
    let base = wolf(7);
    let same = get_scaled_card(&base, 0);
    assert!(matches!(same, Cow::Borrowed(_)));
    assert!(std::ptr::eq(same.as_ref(), &base));

    let once = get_scaled_card(&base, 4).into_owned();
    let twice = get_scaled_card(&once, 4);
    assert!(std::ptr::eq(twice.as_ref(), &once));
    assert_eq!(once.health, Some(11));
    assert_eq!(once.threat_damage(), 6);

    // Rescaling to a different level starts from the base stats.
    let other = get_scaled_card(&once, 2);
    assert_eq!(other.health, Some(9));
}

/// The difficulty bonus leaves store prices alone.
#[test]
fn test_difficulty_bonus_skips_prices() {
    let priced = jerky().with_buy_cost(4);
    assert!(matches!(apply_difficulty_bonus(&priced, 3), Cow::Borrowed(_)));
    let wolf7 = wolf(7);
    let tougher = apply_difficulty_bonus(&wolf7, 3);
    assert_eq!(tougher.health, Some(10));
}

/// Same seed, same catalog, same choices: same run.
#[test]
fn test_run_replays_from_seed() {
    let catalog = CardCatalog::from_cards(pool()).unwrap();
    let play = || {
        let mut session = RunSession::new(catalog.clone(), EngineConfig::default(), 99);
        let mut world = session.new_run_decks(2, &reserved());
        let mut player = PlayerState::new(&character(15, 5), &session.config, &session.catalog);
        let mut sink = frontier_engine::rules::NullSink;
        for _ in 0..6 {
            let started = session.begin_turn(&player, &world, &mut sink);
            let revealed = session.reveal(&started.player, &started.world, &mut sink);
            let talked = session.apply(
                &Action::InteractWithThreat {
                    kind: frontier_engine::core::InteractionKind::Talk,
                },
                &revealed.player,
                &revealed.world,
                &mut sink,
            );
            player = talked.player;
            world = talked.world;
        }
        (player, world, session.rng_state())
    };
    assert_eq!(play(), play());
}

/// Resolving against a cloned stream gives the same result as the original.
#[test]
fn test_resolution_is_deterministic() {
    let mut harness = Harness::new(CardCatalog::from_cards(pool()).unwrap());
    let mut world = frontier_engine::core::WorldState::new();
    world.event_deck = pool().into_iter().filter(Card::is_threat).take(3).collect();
    let mut player = PlayerState::new(&character(10, 0), &harness.config, &harness.catalog);
    player.hand = player
        .hand
        .replaced(0, Card::new("knife", "Knife", CardType::Item).with_effect(Effect::weapon(2)));

    let fork = harness.rng.clone();
    let run = |harness: &mut Harness| {
        let started = begin_turn(&player, &world, &mut harness.ctx());
        let revealed = reveal_next_event(&started.player, &started.world, &mut harness.ctx());
        resolve(
            &Action::UseItem {
                source: CardSource::Hand(0),
            },
            &revealed.player,
            &revealed.world,
            &mut harness.ctx(),
        )
    };
    let first = run(&mut harness);
    harness.rng = fork;
    let second = run(&mut harness);
    assert_eq!(first, second);
}

proptest! {
    /// Scaling twice at one level matches scaling once.
    #[test]
    fn prop_scaling_not_cumulative(
        health in 1i64..30,
        damage in 0i64..8,
        cost in 0i64..30,
        level in 0u32..35,
    ) {
        let card = Card::new("boar", "Boar", CardType::Event)
            .with_sub_type(SubType::Animal)
            .with_health(health)
            .with_buy_cost(cost)
            .with_effect(Effect::damage(damage));
        let once = get_scaled_card(&card, level).into_owned();
        let twice = get_scaled_card(&once, level).into_owned();
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.health, Some(health + i64::from(level % 10)));
    }
}
