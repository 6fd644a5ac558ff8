//! Tags: the named numeric attributes every entity carries.
//!
//! ## State Values (i64 only)
//!
//! Every tag is an `i64`. Boolean mechanics (taunt, charge, frozen) use
//! 0/1 and read as true when non-zero. Missing tags read as 0.
//!
//! Definitions carry the base tags; enchantments carry [`TagModifier`]s
//! that the attribute overlay folds over the base value.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Named attribute of an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameTag {
    // === Stats ===
    Cost,
    Atk,
    MaxHealth,
    Armor,
    Spellpower,
    HeropowerDamage,
    Overload,
    /// Damage can never push health below this value.
    MinHealth,

    // === Keywords ===
    Taunt,
    Charge,
    DivineShield,
    Windfury,
    Stealthed,
    Enrage,
    Poisonous,
    Frozen,
    Immune,
    Combo,
    Battlecry,
    HasDeathrattle,
    HasInspire,
    Aura,

    // === Restrictions ===
    CantAttack,
    CantPlay,
    CantBeTargetedByAbilities,
    CantBeTargetedByHeroPowers,
    CantBeTargetedByOpponents,
    AlwaysWinsBrawls,
}

impl GameTag {
    /// Tags reset to their default by silence.
    pub const SILENCEABLE: [GameTag; 15] = [
        GameTag::AlwaysWinsBrawls,
        GameTag::Aura,
        GameTag::CantAttack,
        GameTag::CantBeTargetedByAbilities,
        GameTag::CantBeTargetedByHeroPowers,
        GameTag::Charge,
        GameTag::DivineShield,
        GameTag::Enrage,
        GameTag::Frozen,
        GameTag::HasDeathrattle,
        GameTag::HasInspire,
        GameTag::Poisonous,
        GameTag::Stealthed,
        GameTag::Taunt,
        GameTag::Windfury,
    ];

    #[must_use]
    pub fn is_silenceable(self) -> bool {
        Self::SILENCEABLE.contains(&self)
    }
}

/// Base tag values of a card or entity.
pub type Tags = FxHashMap<GameTag, i64>;

/// Creature type, used by race-restricted targeting and powered-up checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    #[default]
    Invalid,
    Beast,
    Demon,
    Dragon,
    Mech,
    Murloc,
    Pirate,
    Totem,
}

/// How a modifier combines with the value beneath it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagOp {
    Add(i64),
    Set(i64),
}

impl TagOp {
    #[must_use]
    pub fn apply(self, value: i64) -> i64 {
        match self {
            TagOp::Add(delta) => value + delta,
            TagOp::Set(v) => v,
        }
    }
}

/// One tag adjustment contributed by an enchantment or an enrage slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagModifier {
    pub tag: GameTag,
    pub op: TagOp,
}

impl TagModifier {
    #[must_use]
    pub const fn add(tag: GameTag, delta: i64) -> Self {
        Self { tag, op: TagOp::Add(delta) }
    }

    #[must_use]
    pub const fn set(tag: GameTag, value: i64) -> Self {
        Self { tag, op: TagOp::Set(value) }
    }

    /// Boolean keyword grant.
    #[must_use]
    pub const fn grant(tag: GameTag) -> Self {
        Self::set(tag, 1)
    }
}

/// Fold every modifier for `tag` over `value`, in order.
#[must_use]
pub fn fold_modifiers(modifiers: &[TagModifier], tag: GameTag, value: i64) -> i64 {
    modifiers
        .iter()
        .filter(|m| m.tag == tag)
        .fold(value, |acc, m| m.op.apply(acc))
}
