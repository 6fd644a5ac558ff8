//! Legality predicates.
//!
//! Pure queries over the current board. Nothing is cached; every call
//! re-reads attributes through the overlay, so auras and buffs are always
//! reflected.

use crate::cards::{CardDefinition, CardKind, GameTag, PlayReq, PowerUp};
use crate::core::{EntityId, GameState, PlayerId};
use crate::zones::Zone;

impl GameState {
    // === Characters ===

    /// Attacks allowed per turn.
    #[must_use]
    pub fn max_attacks(&self, id: EntityId) -> u32 {
        if self.has(id, GameTag::Windfury) {
            2
        } else {
            1
        }
    }

    /// Used up for this turn.
    ///
    /// Characters are exhausted once they spent their attacks, hero powers
    /// once used, and weapons whenever it is not their controller's turn.
    #[must_use]
    pub fn is_exhausted(&self, id: EntityId) -> bool {
        let Some(entity) = self.entity(id) else {
            return true;
        };
        match entity.kind {
            CardKind::HeroPower { exhausted } => exhausted,
            CardKind::Weapon => entity.controller != self.current_player(),
            CardKind::Hero | CardKind::Minion => entity.num_attacks >= self.max_attacks(id),
            _ => false,
        }
    }

    /// A minion that entered play this turn and lacks charge.
    #[must_use]
    pub fn is_asleep(&self, id: EntityId) -> bool {
        self.entity(id)
            .is_some_and(|e| e.is_minion() && e.turns_in_play == 0)
            && !self.has(id, GameTag::Charge)
    }

    /// Can be chosen as an attack target at all.
    #[must_use]
    pub fn attackable(&self, id: EntityId) -> bool {
        self.entity(id)
            .is_some_and(|e| e.kind.is_character() && e.zone == Zone::Play)
            && !self.has(id, GameTag::Stealthed)
            && !self.has(id, GameTag::Immune)
    }

    /// Legal defenders for `attacker`. If any attackable enemy has taunt,
    /// only taunts qualify.
    #[must_use]
    pub fn attack_targets(&self, attacker: EntityId) -> Vec<EntityId> {
        let Some(controller) = self.controller(attacker) else {
            return Vec::new();
        };
        let candidates: Vec<EntityId> = self
            .characters()
            .into_iter()
            .filter(|c| self.controller(*c) != Some(controller) && self.attackable(*c))
            .collect();
        let taunts: Vec<EntityId> = candidates
            .iter()
            .copied()
            .filter(|c| self.has(*c, GameTag::Taunt))
            .collect();
        if taunts.is_empty() {
            candidates
        } else {
            taunts
        }
    }

    /// Whether `attacker` may attack now, and `target` if given.
    #[must_use]
    pub fn can_attack(&self, attacker: EntityId, target: Option<EntityId>) -> bool {
        let Some(entity) = self.entity(attacker) else {
            return false;
        };
        let ready = entity.kind.is_character()
            && entity.zone == Zone::Play
            && entity.controller == self.current_player()
            && self.atk(attacker) > 0
            && !self.has(attacker, GameTag::Frozen)
            && !self.has(attacker, GameTag::CantAttack)
            && !self.is_asleep(attacker)
            && !self.is_exhausted(attacker);
        ready && target.is_none_or(|t| self.attack_targets(attacker).contains(&t))
    }

    // === Cards ===

    /// Whether `card` may be played from hand right now.
    #[must_use]
    pub fn is_playable(&self, card: EntityId) -> bool {
        let Some(entity) = self.entity(card) else {
            return false;
        };
        let Ok(definition) = self.definition(card) else {
            return false;
        };
        let player = entity.controller;
        let state = self.player(player);

        if entity.zone != Zone::Hand
            || player != self.current_player()
            || state.mana() < self.cost(card)
            || self.has(card, GameTag::CantPlay)
        {
            return false;
        }
        match entity.kind {
            CardKind::Minion if self.minion_slots(player) == 0 => return false,
            CardKind::Secret
                if state
                    .secrets
                    .iter()
                    .any(|s| self.entity(*s).is_some_and(|e| e.card_id == entity.card_id)) =>
            {
                return false
            }
            _ => {}
        }
        self.requirements_met(card, definition, player)
    }

    /// Whether `power` can be activated now.
    #[must_use]
    pub fn is_usable(&self, power: EntityId) -> bool {
        let Some(entity) = self.entity(power) else {
            return false;
        };
        let Ok(definition) = self.definition(power) else {
            return false;
        };
        let player = entity.controller;
        matches!(entity.kind, CardKind::HeroPower { exhausted: false })
            && entity.zone == Zone::Play
            && player == self.current_player()
            && self.player(player).mana() >= self.cost(power)
            && self.requirements_met(power, definition, player)
    }

    fn requirements_met(&self, card: EntityId, definition: &CardDefinition, player: PlayerId) -> bool {
        let state = self.player(player);
        let enemy_minions: usize = self
            .players()
            .filter(|(p, _)| *p != player)
            .map(|(_, s)| s.field.len())
            .sum();

        definition.requirements.iter().all(|req| match req {
            PlayReq::TargetToPlay => !self.play_targets(card).is_empty(),
            PlayReq::NumMinionSlots(n) => self.minion_slots(player) >= *n,
            PlayReq::MinimumEnemyMinions(n) => enemy_minions >= *n,
            PlayReq::MinimumTotalMinions(n) => self.minion_count() >= *n,
            PlayReq::EntireEntourageNotInPlay => !definition.entourage.iter().all(|card| {
                state
                    .field
                    .iter()
                    .any(|m| self.entity(*m).is_some_and(|e| e.card_id == *card))
            }),
            PlayReq::WeaponEquipped => state.weapon.is_some(),
            PlayReq::FriendlyMinionDiedThisGame => state
                .graveyard
                .iter()
                .any(|g| self.entity(*g).is_some_and(|e| e.is_minion())),
            _ => true,
        })
    }

    /// Whether playing `card` now takes a target.
    #[must_use]
    pub fn has_target(&self, card: EntityId) -> bool {
        let Ok(definition) = self.definition(card) else {
            return false;
        };
        let combo = self
            .controller(card)
            .is_some_and(|p| self.player(p).combo);
        definition.requirements.iter().any(|req| match req {
            PlayReq::TargetToPlay => true,
            PlayReq::TargetIfAvailable => !self.play_targets(card).is_empty(),
            PlayReq::TargetForCombo => combo,
            _ => false,
        })
    }

    /// Characters `card` may target.
    #[must_use]
    pub fn play_targets(&self, card: EntityId) -> Vec<EntityId> {
        self.characters()
            .into_iter()
            .filter(|t| self.is_valid_target(card, *t))
            .collect()
    }

    /// Whether `target` passes `card`'s targeting requirements.
    #[must_use]
    pub fn is_valid_target(&self, card: EntityId, target: EntityId) -> bool {
        let (Some(source), Some(entity)) = (self.entity(card), self.entity(target)) else {
            return false;
        };
        let Ok(definition) = self.definition(card) else {
            return false;
        };
        if !entity.kind.is_character() || entity.zone != Zone::Play {
            return false;
        }

        let enemy = entity.controller != source.controller;
        if enemy
            && (self.has(target, GameTag::Stealthed)
                || self.has(target, GameTag::CantBeTargetedByOpponents))
        {
            return false;
        }
        match source.kind {
            CardKind::Spell | CardKind::Secret
                if self.has(target, GameTag::CantBeTargetedByAbilities) =>
            {
                return false
            }
            CardKind::HeroPower { .. }
                if self.has(target, GameTag::CantBeTargetedByAbilities)
                    || self.has(target, GameTag::CantBeTargetedByHeroPowers) =>
            {
                return false
            }
            _ => {}
        }

        definition.requirements.iter().all(|req| match req {
            PlayReq::MinionTarget => entity.is_minion(),
            PlayReq::HeroTarget => entity.is_hero(),
            PlayReq::FriendlyTarget => !enemy,
            PlayReq::EnemyTarget => enemy,
            PlayReq::DamagedTarget => entity.damage > 0,
            PlayReq::UndamagedTarget => entity.damage == 0,
            PlayReq::NonSelfTarget => target != card,
            PlayReq::TargetMaxAttack(n) => self.atk(target) <= *n,
            PlayReq::TargetMinAttack(n) => self.atk(target) >= *n,
            PlayReq::TargetWithRace(race) => self.race(target) == *race,
            _ => true,
        })
    }

    /// Whether the card's powered-up condition currently holds.
    #[must_use]
    pub fn powered_up(&self, card: EntityId) -> bool {
        let (Some(entity), Ok(definition)) = (self.entity(card), self.definition(card)) else {
            return false;
        };
        let state = self.player(entity.controller);
        match definition.powered_up {
            Some(PowerUp::FieldRace(race)) => state.field.iter().any(|m| self.race(*m) == race),
            Some(PowerUp::HoldingRace(race)) => state
                .hand
                .iter()
                .any(|c| *c != card && self.race(*c) == race),
            Some(PowerUp::Combo) => state.combo,
            None => false,
        }
    }
}
