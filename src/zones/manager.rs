//! Zone transitions.
//!
//! [`GameState::set_zone`] is the only way an entity changes zone. It
//! dispatches to a per-kind [`ZoneHandler`]; the shared flow lives in the
//! trait's default `transition`:
//!
//! 1. the handler may redirect the requested zone (secrets never enter PLAY)
//! 2. self-transitions are rejected
//! 3. `before_move` runs (weapon and hero power replacement)
//! 4. the old container drops the id, the new one appends it
//! 5. shared hooks: auras spawn on entering PLAY and are marked for teardown
//!    on leaving it; buffs are cleared unless the entity dies or is set aside
//! 6. `after_move` runs (slot installation, field bookkeeping)

use std::sync::Arc;

use crate::cards::CardKind;
use crate::core::{EntityId, GameState, IllegalOperation, PlayerId, RulesError};

use super::Zone;

/// Per-kind zone transition behavior.
pub trait ZoneHandler: Sync {
    /// Zone actually entered when `requested` is asked for.
    fn redirect(&self, requested: Zone) -> Zone {
        requested
    }

    fn before_move(
        &self,
        _state: &mut GameState,
        _id: EntityId,
        _from: Zone,
        _to: Zone,
    ) -> Result<(), RulesError> {
        Ok(())
    }

    fn after_move(
        &self,
        _state: &mut GameState,
        _id: EntityId,
        _from: Zone,
        _to: Zone,
    ) -> Result<(), RulesError> {
        Ok(())
    }

    /// Move `id` towards `requested`, returning the zone entered.
    fn transition(
        &self,
        state: &mut GameState,
        id: EntityId,
        requested: Zone,
    ) -> Result<Zone, RulesError> {
        let to = self.redirect(requested);
        let from = state.get(id)?.zone;
        if from == to {
            return Err(IllegalOperation::ZoneSelfTransition(id, to).into());
        }

        self.before_move(state, id, from, to)?;
        state.move_between_containers(id, from, to)?;
        state.shared_zone_hooks(id, from, to)?;
        self.after_move(state, id, from, to)?;

        tracing::debug!(%id, %from, %to, "zone transition");
        Ok(to)
    }
}

struct HeroZones;
struct MinionZones;
struct SpellZones;
struct SecretZones;
struct WeaponZones;
struct HeroPowerZones;
struct EnchantmentZones;

fn handler_for(kind: &CardKind) -> &'static dyn ZoneHandler {
    match kind {
        CardKind::Hero => &HeroZones,
        CardKind::Minion => &MinionZones,
        CardKind::Spell => &SpellZones,
        CardKind::Secret => &SecretZones,
        CardKind::Weapon => &WeaponZones,
        CardKind::HeroPower { .. } => &HeroPowerZones,
        CardKind::Enchantment(_) => &EnchantmentZones,
    }
}

impl ZoneHandler for SpellZones {}

impl ZoneHandler for SecretZones {
    fn redirect(&self, requested: Zone) -> Zone {
        match requested {
            Zone::Play => Zone::Secret,
            other => other,
        }
    }
}

impl ZoneHandler for MinionZones {
    fn after_move(
        &self,
        state: &mut GameState,
        id: EntityId,
        from: Zone,
        to: Zone,
    ) -> Result<(), RulesError> {
        let minion = state.get_mut(id)?;
        if from == Zone::Play {
            minion.damage = 0;
        }
        if to == Zone::Play {
            minion.turns_in_play = 0;
            minion.num_attacks = 0;
        }
        Ok(())
    }
}

impl ZoneHandler for HeroZones {
    fn after_move(
        &self,
        state: &mut GameState,
        id: EntityId,
        _from: Zone,
        to: Zone,
    ) -> Result<(), RulesError> {
        if to != Zone::Play {
            return Ok(());
        }
        let controller = state.get(id)?.controller;
        state.players[controller].hero = Some(id);

        let power = state.definition(id)?.hero_power;
        if let Some(power) = power {
            let power = state.create(controller, power, Some(id))?;
            state.set_zone(power, Zone::Play)?;
        }
        Ok(())
    }
}

impl ZoneHandler for WeaponZones {
    fn before_move(
        &self,
        state: &mut GameState,
        id: EntityId,
        _from: Zone,
        to: Zone,
    ) -> Result<(), RulesError> {
        if to != Zone::Play {
            return Ok(());
        }
        let controller = state.get(id)?.controller;
        if let Some(old) = state.players[controller].weapon.take() {
            tracing::debug!(%old, replacement = %id, "replacing equipped weapon");
            state.get_mut(old)?.to_be_destroyed = true;
        }
        Ok(())
    }

    fn after_move(
        &self,
        state: &mut GameState,
        id: EntityId,
        from: Zone,
        to: Zone,
    ) -> Result<(), RulesError> {
        let controller = state.get(id)?.controller;
        let slot = &mut state.players[controller].weapon;
        if to == Zone::Play {
            *slot = Some(id);
        } else if from == Zone::Play && *slot == Some(id) {
            *slot = None;
        }
        Ok(())
    }
}

impl ZoneHandler for HeroPowerZones {
    fn before_move(
        &self,
        state: &mut GameState,
        id: EntityId,
        _from: Zone,
        to: Zone,
    ) -> Result<(), RulesError> {
        if to != Zone::Play {
            return Ok(());
        }
        let controller = state.get(id)?.controller;
        if let Some(old) = state.players[controller].hero_power.take() {
            if old != id && state.zone_of(old) == Some(Zone::Play) {
                state.set_zone(old, Zone::Graveyard)?;
            }
        }
        Ok(())
    }

    fn after_move(
        &self,
        state: &mut GameState,
        id: EntityId,
        from: Zone,
        to: Zone,
    ) -> Result<(), RulesError> {
        let power = state.get_mut(id)?;
        let controller = power.controller;
        if to == Zone::Play {
            power.kind = CardKind::HeroPower { exhausted: false };
            state.players[controller].hero_power = Some(id);
        } else if from == Zone::Play && state.players[controller].hero_power == Some(id) {
            state.players[controller].hero_power = None;
        }
        Ok(())
    }
}

impl ZoneHandler for EnchantmentZones {
    fn after_move(
        &self,
        state: &mut GameState,
        id: EntityId,
        _from: Zone,
        to: Zone,
    ) -> Result<(), RulesError> {
        let (owner, aura) = match state.get(id)?.enchantment() {
            Some(buff) => (buff.owner, buff.aura_source),
            None => return Ok(()),
        };
        let Some(owner) = owner else {
            return Ok(());
        };

        match to {
            Zone::Play => {
                state.get_mut(owner)?.buffs.push(id);
            }
            Zone::RemovedFromGame => {
                state.get_mut(owner)?.buffs.retain(|b| *b != id);
                if let Some(aura) = aura {
                    state.auras.forget_buff(aura, id);
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl GameState {
    /// Move an entity to `zone`, running every transition hook.
    ///
    /// Returns the zone actually entered, which differs from the request
    /// when a secret is sent to PLAY.
    pub(crate) fn set_zone(&mut self, id: EntityId, zone: Zone) -> Result<Zone, RulesError> {
        let handler = handler_for(&self.get(id)?.kind);
        handler.transition(self, id, zone)
    }

    fn move_between_containers(
        &mut self,
        id: EntityId,
        from: Zone,
        to: Zone,
    ) -> Result<(), RulesError> {
        let entity = self.get(id)?;
        let controller = entity.controller;
        let kind = entity.kind.clone();

        let player = &mut self.players[controller];
        if let Some(container) = from.container(player, &kind) {
            if let Some(index) = container.index_of(&id) {
                container.remove(index);
            }
        }
        if let Some(container) = to.container(player, &kind) {
            container.push_back(id);
        }

        let entity = self.get_mut(id)?;
        entity.zone = to;
        if from == Zone::Play {
            entity.to_be_destroyed = false;
        }
        Ok(())
    }

    fn shared_zone_hooks(&mut self, id: EntityId, from: Zone, to: Zone) -> Result<(), RulesError> {
        if to == Zone::Play {
            let registry = Arc::clone(self.registry());
            let rules = registry.lookup(self.get(id)?.card_id)?.scripts.auras.clone();
            for rule in rules {
                self.summon_aura(id, rule)?;
            }
        } else if from == Zone::Play {
            self.mark_auras_for_teardown(id)?;
            if !matches!(to, Zone::Graveyard | Zone::SetAside) {
                self.clear_buffs(id)?;
            }
        }
        Ok(())
    }

    /// Move a minion already on the field to `index` (clamped).
    pub(crate) fn place_on_field(&mut self, id: EntityId, index: usize) -> Result<(), RulesError> {
        let controller = self.get(id)?.controller;
        let field = &mut self.players[controller].field;
        if let Some(current) = field.index_of(&id) {
            field.remove(current);
            let index = index.min(field.len());
            field.insert(index, id);
        }
        Ok(())
    }

    /// Hand a card to another player, keeping its zone.
    pub(crate) fn change_controller(
        &mut self,
        id: EntityId,
        controller: PlayerId,
    ) -> Result<(), RulesError> {
        let (zone, damage) = {
            let entity = self.get(id)?;
            (entity.zone, entity.damage)
        };
        if zone != Zone::SetAside {
            self.set_zone(id, Zone::SetAside)?;
        }
        self.get_mut(id)?.controller = controller;
        if zone != Zone::SetAside {
            self.set_zone(id, zone)?;
        }
        self.get_mut(id)?.damage = damage;
        Ok(())
    }
}
