//! Batched death processing.
//!
//! Destroying something in play only flags it. The batch collects every
//! flagged (or 0-health) live entity at once, moves them all to the
//! graveyard, then runs their deathrattles and death triggers. Everything
//! that fires sees the whole batch through the event's `batch` field.
//! New deaths caused by those reactions form the next batch.

use std::sync::Arc;

use crate::cards::GameTag;
use crate::core::{EntityId, GameState, RulesError};
use crate::effects::{Action, ResolverContext};
use crate::triggers::GameEvent;
use crate::zones::Zone;

impl GameState {
    /// Run death batches until nothing is left dying.
    ///
    /// Returns every entity moved to the graveyard.
    pub fn process_deaths(&mut self) -> Result<Vec<EntityId>, RulesError> {
        self.resolve_block(|state| state.run_death_batches())
    }

    pub(crate) fn run_death_batches(&mut self) -> Result<Vec<EntityId>, RulesError> {
        let mut buried = Vec::new();
        loop {
            let batch: Vec<EntityId> = self
                .live_entities()
                .into_iter()
                .filter(|id| self.to_be_destroyed(*id))
                .collect();
            if batch.is_empty() {
                return Ok(buried);
            }
            tracing::debug!(count = batch.len(), "death batch");

            let deathrattles = self.collect_deathrattles(&batch)?;
            let current = self.current_player();
            for id in &batch {
                let minion = self.get(*id)?.is_minion();
                self.set_zone(*id, Zone::Graveyard)?;
                if minion {
                    self.player_mut(current).minions_killed_this_turn += 1;
                }
            }
            self.refresh_auras()?;

            for (owner, actions) in deathrattles {
                let controller = self.get(owner)?.controller;
                let event = GameEvent::death(owner, controller, &batch);
                let ctx = ResolverContext::new(owner).with_event(event);
                self.queue_with_context(&actions, ctx)?;
            }
            for id in &batch {
                let controller = self.get(*id)?.controller;
                self.broadcast(&GameEvent::death(*id, controller, &batch))?;
            }
            buried.extend(batch);
        }
    }

    /// Deathrattles of the dying and of the buffs they carry, read before
    /// anything moves.
    fn collect_deathrattles(
        &self,
        batch: &[EntityId],
    ) -> Result<Vec<(EntityId, Vec<Action>)>, RulesError> {
        let registry = Arc::clone(self.registry());
        let mut found = Vec::new();
        for id in batch {
            let entity = self.get(*id)?;
            if self.has(*id, GameTag::HasDeathrattle) {
                if let Some(actions) = &registry.lookup(entity.card_id)?.scripts.deathrattle {
                    found.push((*id, actions.clone()));
                }
            }
            for buff in &entity.buffs {
                let card = self.get(*buff)?.card_id;
                if let Some(actions) = &registry.lookup(card)?.scripts.deathrattle {
                    found.push((*id, actions.clone()));
                }
            }
        }
        Ok(found)
    }
}
