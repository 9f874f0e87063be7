//! Event deck construction.
//!
//! Threat, hazard and valuable quotas are drawn from the pool, the rest is
//! filled with pickups, and threats are spread through the deck with a
//! proportional random interleave. At theme milestones threats ramp up by
//! health instead of being shuffled.

use im::Vector;
use rustc_hash::FxHashSet;

use crate::cards::{classify, get_scaled_card, is_theme_milestone, Card, CardId};
use crate::core::{EngineConfig, GameRng};

enum Category {
    Threat,
    Hazard,
    Valuable,
    Filler,
}

fn categorize(card: &Card) -> Category {
    if card.is_threat() {
        Category::Threat
    } else if card.is_event() && (card.is_illness() || card.is_environmental()) {
        Category::Hazard
    } else if classify::is_valuable(card) {
        Category::Valuable
    } else {
        Category::Filler
    }
}

/// Shuffle `cards` and keep the first `count`.
fn draw(mut cards: Vec<Card>, count: usize, rng: &mut GameRng) -> Vec<Card> {
    rng.shuffle(&mut cards);
    cards.truncate(count);
    cards
}

/// Merge two piles with a Bernoulli step: each position takes a threat with
/// probability `threats_left / (threats_left + others_left)`. Once either
/// pile runs out the other is appended in order.
pub fn interleave(threats: Vec<Card>, others: Vec<Card>, rng: &mut GameRng) -> Vector<Card> {
    let mut deck = Vector::new();
    let mut threats = threats.into_iter();
    let mut others = others.into_iter();
    let (mut threats_left, mut others_left) = (threats.len(), others.len());

    while threats_left > 0 && others_left > 0 {
        let p = threats_left as f64 / (threats_left + others_left) as f64;
        let next = if rng.gen_bool(p) {
            threats_left -= 1;
            threats.next()
        } else {
            others_left -= 1;
            others.next()
        };
        deck.extend(next);
    }

    deck.extend(threats);
    deck.extend(others);
    deck
}

/// Build the event deck for a run.
///
/// Objectives, the configured boss and `reserved` ids (character starting
/// items) never enter the deck. Threats, hazards and valuables are drawn up
/// to their quotas, generic cards fill the rest up to the target size.
/// At a theme milestone threats are ordered easiest first; otherwise their
/// order is random.
pub fn build_event_deck(
    pool: &[Card],
    ng_plus_level: u32,
    config: &EngineConfig,
    reserved: &FxHashSet<CardId>,
    rng: &mut GameRng,
) -> Vector<Card> {
    let mut threats = Vec::new();
    let mut hazards = Vec::new();
    let mut valuables = Vec::new();
    let mut filler = Vec::new();

    for card in pool {
        let excluded = card.is_objective()
            || card.is_spoil()
            || reserved.contains(&card.id)
            || config.is_boss(&card.id);
        if excluded {
            continue;
        }
        match categorize(card) {
            Category::Threat => threats.push(card.clone()),
            Category::Hazard => hazards.push(card.clone()),
            Category::Valuable => valuables.push(card.clone()),
            Category::Filler => filler.push(card.clone()),
        }
    }

    let target = config.event_deck_size;
    let mut threats = draw(threats, config.threat_quota.min(target), rng);

    let room = target - threats.len();
    let mut others = draw(hazards, config.hazard_quota.min(room), rng);

    let room = target - threats.len() - others.len();
    let wanted = rng.gen_range_inclusive(0..=config.max_valuables as i64) as usize;
    others.extend(draw(valuables, wanted.min(room), rng));

    let room = target - threats.len() - others.len();
    others.extend(draw(filler, room, rng));

    if is_theme_milestone(ng_plus_level) {
        threats.sort_by_key(|card| get_scaled_card(card, ng_plus_level).current_health());
    }
    rng.shuffle(&mut others);

    tracing::debug!(
        threats = threats.len(),
        others = others.len(),
        ng_plus_level,
        "built event deck"
    );
    interleave(threats, others, rng)
}
