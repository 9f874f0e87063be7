//! Proof-of-defeat cards.

use crate::cards::{Card, CardType};

/// Sell value of a bounty whose threat carried none.
pub const FALLBACK_BOUNTY: i64 = 5;

/// Trophy names by threat-name substring, most specific first.
const TROPHY_NAMES: &[(&str, &str)] = &[
    ("wolf pack", "Wolf Pelts"),
    ("bison", "Bison Hide"),
    ("buffalo", "Buffalo Hide"),
    ("grizzly", "Grizzly Claws"),
    ("bear", "Bear Pelt"),
    ("elk", "Elk Antlers"),
    ("moose", "Moose Antlers"),
    ("deer", "Deer Hide"),
    ("cougar", "Cougar Pelt"),
    ("mountain lion", "Lion Pelt"),
    ("snake", "Snake Skin"),
    ("alligator", "Gator Hide"),
    ("boar", "Boar Tusks"),
    ("coyote", "Coyote Pelt"),
    ("wolf", "Wolf Pelt"),
    ("eagle", "Eagle Feathers"),
];

fn trophy_name(threat_name: &str) -> String {
    let lower = threat_name.to_lowercase();
    TROPHY_NAMES
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map_or_else(|| format!("{threat_name} Pelt"), |(_, name)| (*name).to_string())
}

/// Turn a defeated threat into a sellable card.
///
/// Humans yield an objective proof worth their bounty (or the fallback),
/// anything else a trophy worth the threat's bounty. A missing or nameless
/// threat yields a worthless proof.
///
/// ```
/// use frontier_engine::cards::{Card, CardType, SubType};
/// use frontier_engine::threats::create_trophy_or_bounty_card;
///
/// let pack = Card::new("wolf_pack", "Wolf Pack", CardType::Event)
///     .with_sub_type(SubType::Animal)
///     .with_gold_value(4);
/// let trophy = create_trophy_or_bounty_card(Some(&pack));
///
/// assert_eq!(trophy.name, "Wolf Pelts");
/// assert_eq!(trophy.card_type, CardType::Trophy);
/// assert_eq!(trophy.sell_value, 4);
/// ```
#[must_use]
pub fn create_trophy_or_bounty_card(threat: Option<&Card>) -> Card {
    let Some(threat) = threat.filter(|t| !t.name.trim().is_empty()) else {
        return Card::new("proof_unknown", "Unclaimed Bounty", CardType::ObjectiveProof);
    };

    let bounty = threat.gold_value.max(0);
    if threat.is_human() {
        let value = if bounty > 0 { bounty } else { FALLBACK_BOUNTY };
        return Card::new(
            format!("proof_{}", threat.id),
            format!("{} Bounty", threat.name),
            CardType::ObjectiveProof,
        )
        .with_gold_value(value)
        .with_sell_value(value);
    }

    Card::new(
        format!("trophy_{}", threat.id),
        trophy_name(&threat.name),
        CardType::Trophy,
    )
    .with_gold_value(bounty)
    .with_sell_value(bounty)
}
