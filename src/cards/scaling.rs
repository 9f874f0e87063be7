//! NG+ scaling and the global difficulty knob.
//!
//! Threat stats grow by `level % 10` so every theme milestone (a level that
//! is an exact multiple of 10) resets them. Store prices grow with the full
//! level: `ceil(cost * (1 + 0.1 * level))`.
//!
//! Scaling records the pre-scaling stats on the instance, which makes it
//! non-cumulative: rescaling an already-scaled card starts from the stamp.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::definition::Card;
use crate::effects::Effect;

/// NG+ levels per theme. Threat scaling resets at every multiple.
pub const THEME_CYCLE: u32 = 10;

/// Is this level a theme milestone?
#[must_use]
pub const fn is_theme_milestone(ng_plus_level: u32) -> bool {
    ng_plus_level % THEME_CYCLE == 0
}

/// Additive increment applied to threat stats at this level.
#[must_use]
pub fn threat_increment(ng_plus_level: u32) -> i64 {
    i64::from(ng_plus_level % THEME_CYCLE)
}

/// Store price at this level, rounded up. Non-positive costs pass through.
#[must_use]
pub fn scaled_price(cost: i64, ng_plus_level: u32) -> i64 {
    if cost <= 0 {
        return cost;
    }
    let factor = 10 + i64::from(ng_plus_level);
    (cost * factor + 9) / 10
}

/// The stats scaling touches, captured before it is applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<i64>,
    pub gold_value: i64,
    pub buy_cost: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
}

impl BaseStats {
    fn capture(card: &Card) -> Self {
        Self {
            health: card.health,
            gold_value: card.gold_value,
            buy_cost: card.buy_cost,
            effect: card.effect.clone(),
        }
    }

    /// Write these stats back onto `card`.
    pub fn restore_into(&self, card: &mut Card) {
        card.health = self.health;
        card.gold_value = self.gold_value;
        card.buy_cost = self.buy_cost;
        card.effect = self.effect.clone();
    }
}

/// Marker left on a scaled instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleStamp {
    pub level: u32,
    pub base: BaseStats,
}

fn unscaled(card: &Card) -> Cow<'_, Card> {
    match &card.scaling {
        None => Cow::Borrowed(card),
        Some(stamp) => {
            let mut base = card.clone();
            stamp.base.restore_into(&mut base);
            base.scaling = None;
            Cow::Owned(base)
        }
    }
}

/// Produce the NG+-adjusted version of `card`.
///
/// Returns `Cow::Borrowed(card)` whenever nothing changes, including level 0
/// for an unscaled card and a repeat call at the level the card already
/// carries.
#[must_use]
pub fn get_scaled_card(card: &Card, ng_plus_level: u32) -> Cow<'_, Card> {
    if card.scaling.as_ref().is_some_and(|s| s.level == ng_plus_level) {
        return Cow::Borrowed(card);
    }

    let base = unscaled(card);
    let increment = threat_increment(ng_plus_level);
    let scale_threat = base.is_threat() && increment > 0;
    let scale_price = base.buy_cost > 0 && ng_plus_level > 0;

    if !scale_threat && !scale_price {
        return base;
    }

    let mut scaled = base.into_owned();
    let stamp = BaseStats::capture(&scaled);

    if scale_threat {
        if let Some(health) = scaled.health.as_mut() {
            *health += increment;
        }
        scaled.gold_value += increment;
        if let Some(Effect::Damage { amount }) = scaled.effect.as_mut() {
            *amount += increment;
        }
    }
    if scale_price {
        scaled.buy_cost = scaled_price(scaled.buy_cost, ng_plus_level);
    }

    scaled.scaling = Some(ScaleStamp {
        level: ng_plus_level,
        base: stamp,
    });
    Cow::Owned(scaled)
}

/// Apply the flat difficulty bonus to threats and damaging hazards.
///
/// Store prices are untouched, so the multiplicative NG+ price scaling can be
/// applied before or after this without interaction.
#[must_use]
pub fn apply_difficulty_bonus(card: &Card, bonus: i64) -> Cow<'_, Card> {
    if bonus == 0 {
        return Cow::Borrowed(card);
    }

    if card.is_threat() {
        let mut boosted = card.clone();
        if let Some(health) = boosted.health.as_mut() {
            *health = (*health + bonus).max(0);
        }
        boosted.gold_value = (boosted.gold_value + bonus).max(0);
        if let Some(Effect::Damage { amount }) = boosted.effect.as_mut() {
            *amount = (*amount + bonus).max(0);
        }
        return Cow::Owned(boosted);
    }

    if card.is_environmental() {
        if let Some(Effect::Damage { amount }) = &card.effect {
            let mut boosted = card.clone();
            boosted.effect = Some(Effect::Damage {
                amount: (amount + bonus).max(0),
            });
            return Cow::Owned(boosted);
        }
    }

    Cow::Borrowed(card)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardType, SubType};

    fn cougar() -> Card {
        Card::new("cougar", "Cougar", CardType::Event)
            .with_sub_type(SubType::Animal)
            .with_health(6)
            .with_gold_value(4)
            .with_effect(Effect::damage(3))
    }

    #[test]
    fn test_level_zero_is_same_reference() {
        let card = cougar();
        let scaled = get_scaled_card(&card, 0);
        assert!(matches!(scaled, Cow::Borrowed(_)));
        assert!(std::ptr::eq(scaled.as_ref(), &card));
    }

    #[test]
    fn test_threat_scaling() {
        let scaled = get_scaled_card(&cougar(), 3).into_owned();
        assert_eq!(scaled.health, Some(9));
        assert_eq!(scaled.gold_value, 7);
        assert_eq!(scaled.threat_damage(), 6);
    }

    #[test]
    fn test_threat_scaling_resets_at_milestone() {
        let card = cougar();
        let at_ten = get_scaled_card(&card, 10);
        assert!(matches!(at_ten, Cow::Borrowed(_)));
        assert_eq!(get_scaled_card(&card, 12).health, Some(8));
    }

    #[test]
    fn test_price_scaling_rounds_up() {
        assert_eq!(scaled_price(5, 1), 6); // 5.5
        assert_eq!(scaled_price(10, 3), 13);
        assert_eq!(scaled_price(10, 0), 10);
        assert_eq!(scaled_price(0, 7), 0);

        let rope = Card::new("rope", "Rope", CardType::Item).with_buy_cost(5);
        assert_eq!(get_scaled_card(&rope, 15).buy_cost, 13); // 12.5
    }

    #[test]
    fn test_scaling_not_cumulative() {
        let card = cougar();
        let once = get_scaled_card(&card, 4).into_owned();
        let twice = get_scaled_card(&once, 4);
        assert!(matches!(twice, Cow::Borrowed(_)));
        assert_eq!(twice.health, once.health);

        let rescaled = get_scaled_card(&once, 2).into_owned();
        assert_eq!(rescaled.health, Some(8));
        assert_eq!(rescaled.threat_damage(), 5);

        let back_to_base = get_scaled_card(&once, 0).into_owned();
        assert_eq!(back_to_base, card);
    }

    #[test]
    fn test_difficulty_bonus() {
        let card = cougar();
        let hard = apply_difficulty_bonus(&card, 2).into_owned();
        assert_eq!(hard.health, Some(8));
        assert_eq!(hard.threat_damage(), 5);
        assert_eq!(hard.gold_value, 6);

        let storm = Card::new("storm", "Storm", CardType::Event)
            .with_sub_type(SubType::Environmental)
            .with_effect(Effect::damage(2));
        assert_eq!(apply_difficulty_bonus(&storm, 1).threat_damage(), 3);

        let rope = Card::new("rope", "Rope", CardType::Item).with_buy_cost(5);
        assert!(matches!(apply_difficulty_bonus(&rope, 3), Cow::Borrowed(_)));
    }

    #[test]
    fn test_bonus_and_scaling_commute_on_threat_stats() {
        let card = cougar();
        let a = apply_difficulty_bonus(&get_scaled_card(&card, 5), 2).into_owned();
        let b = get_scaled_card(&apply_difficulty_bonus(&card, 2), 5).into_owned();
        assert_eq!(a.health, b.health);
        assert_eq!(a.threat_damage(), b.threat_damage());
        assert_eq!(a.gold_value, b.gold_value);
    }
}
