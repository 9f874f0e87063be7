//! Id-based content classification.
//!
//! Content ids follow `<kind>_<theme variant>` conventions across the five
//! theme palettes, so several rules match on id prefixes.

use super::definition::{Card, CardType};
use crate::effects::{Effect, WeaponClass};

const FIREARM_PREFIXES: &[&str] = &[
    "rifle", "revolver", "pistol", "shotgun", "carbine", "musket", "derringer", "blaster",
];

const BOW_PREFIXES: &[&str] = &["bow", "longbow", "shortbow", "crossbow", "recurve"];

const BLADED_PREFIXES: &[&str] = &[
    "knife", "bowie", "sword", "saber", "sabre", "machete", "tomahawk", "bayonet", "dagger",
    "cutlass",
];

const HERBAL_PREFIXES: &[&str] = &["herb", "sage", "yarrow", "willow_bark", "ginseng", "echinacea"];

const VALUABLE_PREFIXES: &[&str] =
    &["gold_nugget", "jewelry", "gemstone", "pocket_watch", "silver_locket"];

/// Snakes and other creatures that block trading regardless of health.
const ALWAYS_HOSTILE_PREFIXES: &[&str] = &[
    "rattlesnake", "copperhead", "cottonmouth", "coral_snake", "cobra", "viper", "scorpion",
];

/// Skittish animals that never block trading on reveal.
pub const SKITTISH_ANIMAL_IDS: &[&str] = &[
    // frontier
    "rabbit",
    "jackrabbit",
    "squirrel",
    "prairie_dog",
    // tundra
    "arctic_hare",
    "lemming",
    "ptarmigan",
    // bayou
    "muskrat",
    "bullfrog",
    "opossum",
    // canyon
    "kangaroo_rat",
    "chipmunk",
    "pika",
    // rainforest
    "capybara",
    "agouti",
    "tree_frog",
];

fn has_prefix(id: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| id.starts_with(prefix))
}

/// Weapon class of a card: the effect's explicit class first, then the id.
#[must_use]
pub fn weapon_class(card: &Card) -> Option<WeaponClass> {
    let explicit = match &card.effect {
        Some(Effect::Weapon { class, .. } | Effect::ConditionalWeapon { class, .. }) => *class,
        _ => None,
    };
    if explicit.is_some() {
        return explicit;
    }

    let id = card.id.as_str();
    // Bladed first so "bowie" is not mistaken for a bow.
    if has_prefix(id, BLADED_PREFIXES) {
        Some(WeaponClass::Bladed)
    } else if has_prefix(id, FIREARM_PREFIXES) {
        Some(WeaponClass::Firearm)
    } else if has_prefix(id, BOW_PREFIXES) {
        Some(WeaponClass::Bow)
    } else {
        None
    }
}

/// A weapon card (weapon or conditional weapon) of the given class.
#[must_use]
pub fn is_weapon_of_class(card: &Card, class: WeaponClass) -> bool {
    card.effect.as_ref().is_some_and(Effect::is_weapon) && weapon_class(card) == Some(class)
}

#[must_use]
pub fn is_herbal(card: &Card) -> bool {
    has_prefix(card.id.as_str(), HERBAL_PREFIXES)
}

/// Gold nuggets, jewelry and the like: sold for face value, never recycled.
#[must_use]
pub fn is_valuable(card: &Card) -> bool {
    card.card_type == CardType::Item && has_prefix(card.id.as_str(), VALUABLE_PREFIXES)
}

#[must_use]
pub fn is_always_hostile(card: &Card) -> bool {
    has_prefix(card.id.as_str(), ALWAYS_HOSTILE_PREFIXES)
}

#[must_use]
pub fn is_skittish(card: &Card) -> bool {
    SKITTISH_ANIMAL_IDS.contains(&card.id.as_str())
}

/// Threat steals gold when revealed.
#[must_use]
pub fn steals_gold(card: &Card) -> bool {
    matches!(card.effect, Some(Effect::RandomGoldSteal { .. }))
        || matches!(card.immediate_effect, Some(Effect::RandomGoldSteal { .. }))
}
