//! Shared fixtures for integration tests.

#![allow(dead_code)]

use frontier_engine::cards::{Card, CardCatalog, CardType, SubType};
use frontier_engine::core::{ActiveEvent, Character, EngineConfig, GameRng, PlayerState, WorldState};
use frontier_engine::effects::{Effect, UpgradeKind, WeaponClass};
use frontier_engine::rules::{RecordingSink, ResolveContext};

/// Catalog, config, RNG and sink for one test.
pub struct Harness {
    pub catalog: CardCatalog,
    pub config: EngineConfig,
    pub rng: GameRng,
    pub sink: RecordingSink,
}

impl Harness {
    pub fn new(catalog: CardCatalog) -> Self {
        Self::with_config(catalog, EngineConfig::default())
    }

    pub fn with_config(catalog: CardCatalog, config: EngineConfig) -> Self {
        Self {
            catalog,
            config,
            rng: GameRng::new(42),
            sink: RecordingSink::new(),
        }
    }

    pub fn ctx(&mut self) -> ResolveContext<'_> {
        ResolveContext::new(&self.catalog, &self.config, &mut self.rng, &mut self.sink)
    }
}

pub fn character(health: i64, gold: i64) -> Character {
    Character {
        name: "Wanderer".into(),
        health,
        gold,
        talk_failure_chance: 0.3,
        pet_failure_chance: 0.3,
        unique_item: None,
    }
}

pub fn player(health: i64, gold: i64) -> PlayerState {
    PlayerState::new(&character(health, gold), &EngineConfig::default(), &CardCatalog::new())
}

pub fn wolf(health: i64) -> Card {
    Card::new("wolf", "Wolf", CardType::Event)
        .with_sub_type(SubType::Animal)
        .with_health(health)
        .with_gold_value(4)
        .with_effect(Effect::damage(2))
}

pub fn bandit(health: i64) -> Card {
    Card::new("bandit", "Bandit", CardType::Event)
        .with_sub_type(SubType::Human)
        .with_health(health)
        .with_gold_value(6)
        .with_effect(Effect::damage(3))
}

pub fn bow(id: &str, attack: i64) -> Card {
    Card::new(id, "Bow", CardType::Item).with_effect(Effect::Weapon {
        attack,
        class: Some(WeaponClass::Bow),
        hunting_bonus: 0,
    })
}

pub fn upgrade(id: &str, kind: UpgradeKind, amount: i64) -> Card {
    Card::new(id, id, CardType::PlayerUpgrade).with_effect(Effect::upgrade(kind, amount))
}

pub fn snare(strength: i64) -> Card {
    Card::new("snare", "Snare", CardType::Item).with_effect(Effect::Trap { strength })
}

pub fn jerky() -> Card {
    Card::new("jerky", "Jerky", CardType::Provision).with_effect(Effect::heal(2))
}

pub fn satchel(capacity: usize) -> Card {
    Card::new("satchel", "Satchel", CardType::Item)
        .with_sub_type(SubType::Storage)
        .with_capacity(capacity)
        .with_buy_cost(5)
        .with_sell_value(2)
}

pub fn world_facing(threat: Card) -> WorldState {
    let mut world = WorldState::new();
    world.active_event = Some(ActiveEvent::reveal(threat, false));
    world
}
