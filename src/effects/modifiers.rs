//! Derived combat statistics.
//!
//! ## Attack precedence
//!
//! 1. Base attack, plus a conditional partner bonus, plus the hunting bonus
//!    against an animal
//! 2. Equipped context only: flat equip bonus and equipped class boosts
//! 3. Class multipliers from equipped upgrades, summed into one factor
//!    `1 + sum` and applied once (two +2 upgrades multiply by 5)
//! 4. Class boosts held in hand
//!
//! `get_attack_power_breakdown` lists the same steps and always sums to
//! `calculate_attack_power`.

use smallvec::SmallVec;

use super::effect::{Effect, UpgradeKind, WeaponClass};
use crate::cards::{classify, Card};
use crate::core::{CardSource, EngineConfig, PlayerState};

/// Where the weapon is being swung from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttackContext {
    Equipped,
    Hand,
}

impl AttackContext {
    #[must_use]
    pub const fn of(source: CardSource) -> Self {
        match source {
            CardSource::Equipped(_) => Self::Equipped,
            _ => Self::Hand,
        }
    }
}

/// Knobs for attack evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackOptions {
    /// Skip bow multipliers.
    pub ignore_quiver: bool,
    /// Skip firearm multipliers.
    pub ignore_bandolier: bool,
    /// Flat bonus for a weapon used from an equip slot.
    pub equip_bonus: i64,
}

impl Default for AttackOptions {
    fn default() -> Self {
        Self {
            ignore_quiver: false,
            ignore_bandolier: false,
            equip_bonus: 1,
        }
    }
}

impl AttackOptions {
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            equip_bonus: config.equip_bonus,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn without_quiver(mut self) -> Self {
        self.ignore_quiver = true;
        self
    }

    #[must_use]
    pub fn without_bandolier(mut self) -> Self {
        self.ignore_bandolier = true;
        self
    }

    fn suppresses(&self, class: WeaponClass) -> bool {
        match class {
            WeaponClass::Bow => self.ignore_quiver,
            WeaponClass::Firearm => self.ignore_bandolier,
            WeaponClass::Bladed => false,
        }
    }
}

/// One labelled step of an attack computation.
pub type BreakdownEntry = (&'static str, i64);

/// Ordered attack breakdown. Most weapons produce at most six steps.
pub type AttackBreakdown = SmallVec<[BreakdownEntry; 6]>;

/// Does the player carry another weapon of `class` besides `card`?
fn has_partner(card: &Card, player: &PlayerState, class: WeaponClass) -> bool {
    let matching = player
        .carried()
        .filter(|(_, other)| classify::is_weapon_of_class(other, class))
        .count();
    let own = classify::is_weapon_of_class(card, class) && player.carried().any(|(_, c)| c == card);
    matching > usize::from(own)
}

/// Compute the attack power of a weapon card, step by step.
///
/// Returns an empty breakdown for non-weapons.
#[must_use]
pub fn get_attack_power_breakdown(
    card: &Card,
    player: &PlayerState,
    context: AttackContext,
    active_event: Option<&Card>,
    options: AttackOptions,
) -> AttackBreakdown {
    let mut steps = AttackBreakdown::new();

    let hunting_bonus = match &card.effect {
        Some(Effect::Weapon {
            attack,
            hunting_bonus,
            ..
        }) => {
            steps.push(("base attack", *attack));
            *hunting_bonus
        }
        Some(Effect::ConditionalWeapon {
            attack,
            bonus_attack,
            condition,
            ..
        }) => {
            steps.push(("base attack", *attack));
            if has_partner(card, player, condition.class()) {
                steps.push(("partner weapon", *bonus_attack));
            }
            0
        }
        _ => return steps,
    };

    if hunting_bonus != 0 && active_event.is_some_and(Card::is_animal) {
        steps.push(("hunting bonus", hunting_bonus));
    }

    let class = classify::weapon_class(card);

    if context == AttackContext::Equipped {
        steps.push(("equip bonus", options.equip_bonus));
        if let Some(class) = class {
            let boost = player.equipped_bonus(class.boost());
            if boost != 0 {
                steps.push(("equipped boost", boost));
            }
        }
    }

    if let Some(class) = class {
        if !options.suppresses(class) {
            // Each upgrade adds its amount to one factor: +2 alone is x3, two
            // +2 upgrades are x5. The step records only the added part.
            let extra = player.equipped_bonus(class.multiplier());
            if extra != 0 {
                let before: i64 = steps.iter().map(|(_, amount)| amount).sum();
                steps.push(("multiplier", before * extra));
            }
        }

        let held = player.held_bonus(class.boost());
        if held != 0 {
            steps.push(("held boost", held));
        }
    }

    steps
}

/// Attack power of a weapon card. Never negative; zero for non-weapons.
///
/// ```
/// use frontier_engine::cards::{Card, CardCatalog, CardType};
/// use frontier_engine::core::{Character, EngineConfig, PlayerState};
/// use frontier_engine::effects::{calculate_attack_power, AttackContext, AttackOptions, Effect};
///
/// let character = Character {
///     name: "Ranger".into(),
///     health: 10,
///     gold: 0,
///     talk_failure_chance: 0.5,
///     pet_failure_chance: 0.5,
///     unique_item: None,
/// };
/// let player = PlayerState::new(&character, &EngineConfig::default(), &CardCatalog::new());
/// let knife = Card::new("knife", "Knife", CardType::Item).with_effect(Effect::weapon(2));
///
/// let options = AttackOptions::default();
/// let held = calculate_attack_power(&knife, &player, AttackContext::Hand, None, options);
/// let worn = calculate_attack_power(&knife, &player, AttackContext::Equipped, None, options);
/// assert_eq!((held, worn), (2, 3));
/// ```
#[must_use]
pub fn calculate_attack_power(
    card: &Card,
    player: &PlayerState,
    context: AttackContext,
    active_event: Option<&Card>,
    options: AttackOptions,
) -> i64 {
    get_attack_power_breakdown(card, player, context, active_event, options)
        .iter()
        .map(|(_, amount)| amount)
        .sum::<i64>()
        .max(0)
}

/// Strongest weapon of `class` the player carries, with its power.
#[must_use]
pub fn strongest_weapon_of_class(
    player: &PlayerState,
    class: WeaponClass,
    active_event: Option<&Card>,
    options: AttackOptions,
) -> Option<(CardSource, i64)> {
    player
        .carried()
        .filter(|(_, card)| classify::is_weapon_of_class(card, class))
        .map(|(source, card)| {
            let context = AttackContext::of(source);
            let power = calculate_attack_power(card, player, context, active_event, options);
            (source, power)
        })
        .max_by_key(|(_, power)| *power)
}

/// Healing a provision restores, including equipped heal boosts.
#[must_use]
pub fn calculate_heal_amount(card: &Card, player: &PlayerState) -> i64 {
    let Some(Effect::Heal { amount, .. }) = &card.effect else {
        return 0;
    };

    let mut total = *amount + player.equipped_bonus(UpgradeKind::ProvisionHealBoost);
    if classify::is_herbal(card) {
        total += player.equipped_bonus(UpgradeKind::HerbBoost);
    }
    total.max(0)
}
