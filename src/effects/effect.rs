//! Effect descriptors.
//!
//! Every card carries at most one primary `Effect` and at most one
//! `immediate_effect`. Effects are a closed sum type so the action
//! resolver's branching is exhaustive; content files tag them with a
//! snake_case `type` field.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Class of a weapon, used to match upgrade bonuses to weapons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponClass {
    Firearm,
    Bow,
    Bladed,
}

impl WeaponClass {
    /// Additive boost that applies to this class while the weapon is equipped.
    #[must_use]
    pub const fn boost(self) -> UpgradeKind {
        match self {
            Self::Firearm => UpgradeKind::FirearmBoost,
            Self::Bow => UpgradeKind::BowBoost,
            Self::Bladed => UpgradeKind::KnifeBoost,
        }
    }

    /// Multiplier upgrade that applies to this class.
    #[must_use]
    pub const fn multiplier(self) -> UpgradeKind {
        match self {
            Self::Firearm => UpgradeKind::FirearmMultiplier,
            Self::Bow => UpgradeKind::BowMultiplier,
            Self::Bladed => UpgradeKind::BladedMultiplier,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Firearm => "firearm",
            Self::Bow => "bow",
            Self::Bladed => "bladed",
        }
    }
}

/// Partner requirement for a `ConditionalWeapon` bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponCondition {
    /// Another firearm must be held or equipped.
    IsFirearm,
    /// Another knife or sword must be held or equipped.
    IsKnife,
}

impl WeaponCondition {
    #[must_use]
    pub const fn class(self) -> WeaponClass {
        match self {
            Self::IsFirearm => WeaponClass::Firearm,
            Self::IsKnife => WeaponClass::Bladed,
        }
    }
}

/// Kind of persistent player upgrade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    FirearmBoost,
    BowBoost,
    KnifeBoost,
    FirearmMultiplier,
    BowMultiplier,
    BladedMultiplier,
    ProvisionHealBoost,
    HerbBoost,
    MaxHealth,
    DamageNegation,
    /// Treasure map: extra gold when selling valuables.
    ValuableSellBonus,
}

impl UpgradeKind {
    /// Upgrades that change player stats the moment they are equipped.
    #[must_use]
    pub const fn adjusts_on_equip(self) -> bool {
        matches!(self, Self::MaxHealth)
    }
}

fn persistent_default() -> bool {
    true
}

/// A card effect.
///
/// ## Combat
///
/// `Weapon`, `ConditionalWeapon`, `Damage`, `Poison`, `FireArrow`,
/// `TrickShot` and `BladedTechnique` all need a live threat to target.
///
/// ## Threat and hazard effects
///
/// `Damage` on a threat card is the damage it deals when an interaction
/// fails. `RandomGoldSteal`, `DiscardEquipped`, `DamagePercent`,
/// `ApplyIllnessOnLinger` and `Illness` only ever appear on events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    Weapon {
        attack: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        class: Option<WeaponClass>,
        /// Extra damage against animal threats.
        #[serde(default)]
        hunting_bonus: i64,
    },
    ConditionalWeapon {
        attack: i64,
        bonus_attack: i64,
        condition: WeaponCondition,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        class: Option<WeaponClass>,
    },
    Heal {
        amount: i64,
        #[serde(default)]
        cures_illness: bool,
    },
    /// Cures the named illness, or every illness when `illness` is absent.
    Cure {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        illness: Option<String>,
    },
    Trap {
        strength: i64,
    },
    Campfire {
        amount: i64,
    },
    Gold {
        amount: i64,
    },
    Draw {
        count: usize,
    },
    Scout {
        count: usize,
    },
    Upgrade {
        kind: UpgradeKind,
        amount: i64,
        #[serde(default = "persistent_default")]
        persistent: bool,
    },
    Damage {
        amount: i64,
    },
    DamagePercent {
        percent: i64,
    },
    Poison {
        amount: i64,
    },
    FireArrow {
        bonus: i64,
    },
    TrickShot {
        bonus: i64,
    },
    BladedTechnique {
        bonus: i64,
    },
    RandomGoldSteal {
        min: i64,
        max: i64,
    },
    DiscardEquipped,
    ApplyIllnessOnLinger {
        illness_id: CardId,
    },
    Illness {
        damage_per_day: i64,
        days: u32,
    },
}

impl Effect {
    /// Create a weapon effect with no explicit class.
    pub fn weapon(attack: i64) -> Self {
        Self::Weapon {
            attack,
            class: None,
            hunting_bonus: 0,
        }
    }

    /// Create a heal effect.
    pub fn heal(amount: i64) -> Self {
        Self::Heal {
            amount,
            cures_illness: false,
        }
    }

    /// Create a persistent upgrade effect.
    pub fn upgrade(kind: UpgradeKind, amount: i64) -> Self {
        Self::Upgrade {
            kind,
            amount,
            persistent: true,
        }
    }

    /// Create a damage effect.
    pub fn damage(amount: i64) -> Self {
        Self::Damage { amount }
    }

    /// Does this effect attack the active threat when used?
    #[must_use]
    pub fn targets_threat(&self) -> bool {
        matches!(
            self,
            Self::Weapon { .. }
                | Self::ConditionalWeapon { .. }
                | Self::Damage { .. }
                | Self::Poison { .. }
                | Self::FireArrow { .. }
                | Self::TrickShot { .. }
                | Self::BladedTechnique { .. }
        )
    }

    /// Is this a reusable weapon (as opposed to a consumable attack)?
    #[must_use]
    pub fn is_weapon(&self) -> bool {
        matches!(self, Self::Weapon { .. } | Self::ConditionalWeapon { .. })
    }

    /// The upgrade kind and amount, if this is a persistent upgrade.
    #[must_use]
    pub fn persistent_upgrade(&self) -> Option<(UpgradeKind, i64)> {
        match self {
            Self::Upgrade {
                kind,
                amount,
                persistent: true,
            } => Some((*kind, *amount)),
            _ => None,
        }
    }

    /// Short name for log lines.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Weapon { .. } => "weapon",
            Self::ConditionalWeapon { .. } => "conditional_weapon",
            Self::Heal { .. } => "heal",
            Self::Cure { .. } => "cures",
            Self::Trap { .. } => "trap",
            Self::Campfire { .. } => "campfire",
            Self::Gold { .. } => "gold",
            Self::Draw { .. } => "draw",
            Self::Scout { .. } => "scout",
            Self::Upgrade { .. } => "upgrade",
            Self::Damage { .. } => "damage",
            Self::DamagePercent { .. } => "damage_percent",
            Self::Poison { .. } => "poison",
            Self::FireArrow { .. } => "fire_arrow",
            Self::TrickShot { .. } => "trick_shot",
            Self::BladedTechnique { .. } => "bladed_technique",
            Self::RandomGoldSteal { .. } => "random_gold_steal",
            Self::DiscardEquipped => "discard_equipped",
            Self::ApplyIllnessOnLinger { .. } => "apply_illness_on_linger",
            Self::Illness { .. } => "illness",
        }
    }
}
