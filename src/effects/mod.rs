//! Effect descriptors and the modifier calculator.
//!
//! - `Effect`: closed sum type of everything a card can do
//! - `UpgradeKind`, `WeaponClass`, `WeaponCondition`: the vocabulary
//!   upgrades and weapons share
//! - `calculate_attack_power`, `calculate_heal_amount`: derived stats from
//!   the player's hand and equip row
//!
//! Effects are data; the action resolver in `rules` gives them meaning.

mod effect;
mod modifiers;

pub use effect::{Effect, UpgradeKind, WeaponClass, WeaponCondition};
pub use modifiers::{
    calculate_attack_power, calculate_heal_amount, get_attack_power_breakdown,
    strongest_weapon_of_class, AttackBreakdown, AttackContext, AttackOptions, BreakdownEntry,
};
