//! Buff lifecycle: attach, destroy, clear, expire.

use std::sync::Arc;

use super::AuraId;
use crate::cards::{CardId, CardKind, GameTag, TagOp};
use crate::core::{AuthoringError, EntityId, GameState, RulesError};
use crate::effects::ResolverContext;
use crate::zones::Zone;

impl GameState {
    /// Attach a new copy of the enchantment `card` to `target`.
    ///
    /// Swap buffs snapshot the target's current attack and health. Swaps
    /// and buffs that set max health reset the target's damage. The
    /// card's `apply` script runs last, with the buff as source and its
    /// owner as target.
    pub fn apply_buff(
        &mut self,
        source: EntityId,
        target: EntityId,
        card: CardId,
    ) -> Result<EntityId, RulesError> {
        let buff = self.attach_buff(source, target, card, None)?;

        let registry = Arc::clone(self.registry());
        if let Some(apply) = &registry.lookup(card)?.scripts.apply {
            let context = ResolverContext::new(buff).with_target(Some(target));
            self.queue_with_context(apply, context)?;
        }
        Ok(buff)
    }

    pub(crate) fn attach_buff(
        &mut self,
        source: EntityId,
        target: EntityId,
        card: CardId,
        aura: Option<AuraId>,
    ) -> Result<EntityId, RulesError> {
        let controller = self
            .player_of(source)
            .unwrap_or(self.get(target)?.controller);
        let registry = Arc::clone(self.registry());
        let definition = registry.lookup(card)?;
        if !matches!(CardKind::for_definition(definition), CardKind::Enchantment(_)) {
            return Err(AuthoringError::NotAnEnchantment(card).into());
        }

        let swapped = definition
            .attack_health_swap
            .then(|| (self.health(target), self.atk(target)));
        let sets_health = definition
            .modifiers
            .iter()
            .any(|m| m.tag == GameTag::MaxHealth && matches!(m.op, TagOp::Set(_)));

        let buff = self.create(controller, card, Some(source))?;
        if let Some(state) = self.get_mut(buff)?.enchantment_mut() {
            state.owner = Some(target);
            state.aura_source = aura;
            state.swapped = swapped;
        }
        if swapped.is_some() || sets_health {
            self.get_mut(target)?.damage = 0;
        }
        self.set_zone(buff, Zone::Play)?;
        tracing::debug!(%buff, %target, %source, "buff attached");
        Ok(buff)
    }

    /// Run the buff's `destroy` script and remove it from the game.
    pub(crate) fn destroy_buff(&mut self, buff: EntityId) -> Result<(), RulesError> {
        let (zone, owner) = {
            let entity = self.get(buff)?;
            (entity.zone, entity.enchantment().and_then(|e| e.owner))
        };
        if zone == Zone::RemovedFromGame {
            return Ok(());
        }

        let registry = Arc::clone(self.registry());
        if let Some(destroy) = &registry.lookup(self.get(buff)?.card_id)?.scripts.destroy {
            let context = ResolverContext::new(buff).with_target(owner);
            self.queue_with_context(destroy, context)?;
        }
        self.set_zone(buff, Zone::RemovedFromGame)?;
        Ok(())
    }

    /// Destroy every buff attached to `id`.
    pub(crate) fn clear_buffs(&mut self, id: EntityId) -> Result<(), RulesError> {
        let buffs = self.get(id)?.buffs.clone();
        for buff in buffs {
            self.destroy_buff(buff)?;
        }
        Ok(())
    }

    /// Remove buffs that only last until the end of the turn.
    pub fn expire_one_turn_effects(&mut self) -> Result<(), RulesError> {
        self.resolve_block(|state| {
            let mut expiring: Vec<EntityId> = state
                .entities()
                .filter(|e| e.zone == Zone::Play && e.enchantment().is_some())
                .filter(|e| state.registry().get(e.card_id).is_some_and(|d| d.one_turn))
                .map(|e| e.id)
                .collect();
            expiring.sort();
            for buff in expiring {
                state.destroy_buff(buff)?;
            }
            Ok(())
        })
    }
}
