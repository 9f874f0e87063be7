//! Trade-blocking classification of revealed events.

use crate::cards::{classify, Card, SubType};
use crate::core::config::HOSTILE_HEALTH_THRESHOLD;
use crate::effects::Effect;

/// Does this revealed event block store trading?
///
/// - Non-events and illnesses never do.
/// - Environmental events do only when they deal damage, percent damage, or
///   force an equipment discard.
/// - Skittish animals never do on reveal.
/// - Gold thieves and venomous creatures always do, whatever their health.
/// - Any other threat does when its health exceeds 6.
#[must_use]
pub fn is_event_considered_hostile(card: &Card) -> bool {
    if !card.is_event() {
        return false;
    }

    match card.sub_type {
        Some(SubType::Illness) => false,
        Some(SubType::Environmental) => matches!(
            card.effect,
            Some(Effect::Damage { .. } | Effect::DamagePercent { .. } | Effect::DiscardEquipped)
        ),
        Some(SubType::Animal | SubType::Human) => {
            if classify::is_skittish(card) {
                return false;
            }
            if classify::steals_gold(card) || classify::is_always_hostile(card) {
                return true;
            }
            card.current_health() > HOSTILE_HEALTH_THRESHOLD
        }
        _ => false,
    }
}
