//! Attribute overlay: effective tag values.
//!
//! ```text
//! base tag
//!   → entity's own buffs, in application order
//!   → aura-maintained buffs, in application order
//!   → enrage slot (enraged minions only)
//!   → equipped weapon attack (heroes, on their own turn)
//! ```
//!
//! Values are recomputed on every read. Nothing here is cached, so buffs
//! and auras can change between reads without notifying anyone.

use super::attributes::{fold_modifiers, GameTag, Race};
use super::instance::{EnchantmentState, Entity};
use crate::core::{EntityId, GameState, PlayerId};
use crate::zones::Zone;

fn apply_buff(buff: &EnchantmentState, tag: GameTag, value: i64) -> i64 {
    let value = match (buff.swapped, tag) {
        (Some((atk, _)), GameTag::Atk) => atk,
        (Some((_, health)), GameTag::MaxHealth) => health,
        _ => value,
    };
    fold_modifiers(&buff.modifiers, tag, value)
}

impl GameState {
    /// Effective value of `tag` on `id`. Unknown entities read as 0.
    #[must_use]
    pub fn attribute(&self, id: EntityId, tag: GameTag) -> i64 {
        let Some(entity) = self.entity(id) else {
            return 0;
        };
        let mut value = entity.base(tag);

        for from_aura in [false, true] {
            for buff in &entity.buffs {
                let Some(state) = self.entity(*buff).and_then(Entity::enchantment) else {
                    continue;
                };
                if state.aura_source.is_some() == from_aura {
                    value = apply_buff(state, tag, value);
                }
            }
        }

        if tag != GameTag::Enrage && self.is_enraged(id) {
            if let Some(definition) = self.registry().get(entity.card_id) {
                value = fold_modifiers(&definition.enrage, tag, value);
            }
        }

        if tag == GameTag::Atk && entity.is_hero() {
            if let Some(weapon) = self.player(entity.controller).weapon {
                if !self.is_exhausted(weapon) {
                    value += self.attribute(weapon, GameTag::Atk);
                }
            }
        }

        value
    }

    /// Boolean view of a tag.
    #[must_use]
    pub fn has(&self, id: EntityId, tag: GameTag) -> bool {
        self.attribute(id, tag) != 0
    }

    #[must_use]
    pub fn atk(&self, id: EntityId) -> i64 {
        self.attribute(id, GameTag::Atk)
    }

    #[must_use]
    pub fn max_health(&self, id: EntityId) -> i64 {
        self.attribute(id, GameTag::MaxHealth)
    }

    /// `max(0, max_health - damage)`. Weapons report durability.
    #[must_use]
    pub fn health(&self, id: EntityId) -> i64 {
        let damage = self.entity(id).map_or(0, |e| e.damage);
        (self.max_health(id) - damage).max(0)
    }

    /// Effective mana cost, never negative.
    #[must_use]
    pub fn cost(&self, id: EntityId) -> i64 {
        self.attribute(id, GameTag::Cost).max(0)
    }

    #[must_use]
    pub fn race(&self, id: EntityId) -> Race {
        self.entity(id)
            .and_then(|e| self.registry().get(e.card_id))
            .map_or(Race::Invalid, |d| d.race)
    }

    #[must_use]
    pub fn is_damaged(&self, id: EntityId) -> bool {
        self.entity(id).is_some_and(|e| e.damage > 0)
    }

    /// Minion with the enrage keyword that has taken damage.
    ///
    /// Enrage is a single slot: several sources granting the keyword still
    /// apply the minion's enrage tags once.
    #[must_use]
    pub fn is_enraged(&self, id: EntityId) -> bool {
        self.entity(id).is_some_and(|e| e.is_minion() && e.damage > 0)
            && self.has(id, GameTag::Enrage)
    }

    /// Flagged for destruction, or a live entity at 0 health in play.
    #[must_use]
    pub fn to_be_destroyed(&self, id: EntityId) -> bool {
        let Some(entity) = self.entity(id) else {
            return false;
        };
        entity.zone == Zone::Play
            && entity.kind.is_live()
            && (entity.to_be_destroyed || self.health(id) == 0)
    }

    #[must_use]
    pub fn is_dead(&self, id: EntityId) -> bool {
        self.zone_of(id) == Some(Zone::Graveyard) || self.to_be_destroyed(id)
    }

    /// Set accumulated damage, clamped to `[0, max_health - min_health]`
    /// when a minimum-health modifier is active.
    pub(crate) fn set_damage(&mut self, id: EntityId, amount: i64) {
        let mut amount = amount.max(0);
        let min_health = self.attribute(id, GameTag::MinHealth);
        if min_health > 0 {
            amount = amount.min((self.max_health(id) - min_health).max(0));
        }
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.damage = amount;
        }
    }

    /// Bonus added to damage dealt by `player`'s spells.
    #[must_use]
    pub fn spell_damage(&self, player: PlayerId) -> i64 {
        self.player(player)
            .field
            .iter()
            .map(|m| self.attribute(*m, GameTag::Spellpower))
            .sum()
    }

    /// Bonus added to damage dealt by `player`'s hero power.
    #[must_use]
    pub fn hero_power_damage(&self, player: PlayerId) -> i64 {
        let state = self.player(player);
        state
            .field
            .iter()
            .chain(state.hero.iter())
            .map(|e| self.attribute(*e, GameTag::HeropowerDamage))
            .sum()
    }
}
