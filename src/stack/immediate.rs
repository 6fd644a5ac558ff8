//! Recursive-immediate resolution.
//!
//! Actions resolve in order. Anything an action provokes (events, the
//! triggers they fire, nested scripts) resolves to completion before the
//! next action starts. There is no response window.
//!
//! ## Blocks
//!
//! Every entry point runs inside [`GameState::resolve_block`]. Blocks nest;
//! when the outermost one finishes the board settles: auras refresh and
//! the death batch runs until nothing else is dying.

use crate::core::{AuthoringError, EntityId, GameState, RulesError};
use crate::effects::{Action, ActionResult, ResolverContext};
use crate::triggers::GameEvent;

impl GameState {
    /// Run `f` as one resolution block.
    ///
    /// Fails with [`AuthoringError::RecursionLimit`] when blocks nest
    /// deeper than the configured `max_depth`, which only happens when
    /// card scripts trigger each other forever.
    pub fn resolve_block<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, RulesError>,
    ) -> Result<T, RulesError> {
        if self.depth >= self.config().max_depth {
            return Err(AuthoringError::RecursionLimit(self.depth).into());
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        let value = result?;

        if self.depth == 0 {
            self.depth += 1;
            let settled = self.settle();
            self.depth -= 1;
            settled?;
        }
        Ok(value)
    }

    fn settle(&mut self) -> Result<(), RulesError> {
        self.refresh_auras()?;
        self.run_death_batches()?;
        Ok(())
    }

    /// Resolve `actions` on behalf of `source`.
    ///
    /// Returns one result list per action, in order.
    pub fn queue_actions(
        &mut self,
        source: EntityId,
        actions: &[Action],
    ) -> Result<Vec<ActionResult>, RulesError> {
        self.queue_with_context(actions, ResolverContext::new(source))
    }

    /// Resolve `actions` with a full context (target, event, choice).
    pub fn queue_with_context(
        &mut self,
        actions: &[Action],
        ctx: ResolverContext,
    ) -> Result<Vec<ActionResult>, RulesError> {
        self.resolve_block(|state| {
            let mut results = Vec::with_capacity(actions.len());
            for action in actions {
                results.push(state.resolve_action(action, &ctx)?);
                state.refresh_auras()?;
            }
            Ok(results)
        })
    }

    /// Raise an event and resolve every trigger it matches.
    pub(crate) fn broadcast(&mut self, event: &GameEvent) -> Result<(), RulesError> {
        for matched in self.find_triggers(event) {
            tracing::trace!(owner = %matched.owner, trigger = %matched.trigger.name, "trigger fired");
            let ctx = ResolverContext::new(matched.owner).with_event(event.clone());
            self.queue_with_context(&matched.trigger.actions, ctx)?;
        }
        Ok(())
    }

    /// Raise an event from outside the pipeline, such as a turn boundary.
    pub fn broadcast_event(&mut self, event: &GameEvent) -> Result<(), RulesError> {
        self.resolve_block(|state| state.broadcast(event))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::{CardDefinition, CardId, CardRegistry};
    use crate::core::{PlayerId, RulesConfig, ScriptedDecisions};
    use crate::effects::Selector;
    use crate::triggers::{EventKind, Trigger, TriggerCondition};
    use crate::zones::Zone;

    const HERO: CardId = CardId::new(1);
    const WISP: CardId = CardId::new(2);
    const ECHO: CardId = CardId::new(3);
    const LOOP: CardId = CardId::new(4);
    const COUNTER: CardId = CardId::new(5);

    fn registry() -> Arc<CardRegistry> {
        Arc::new(
            CardRegistry::new()
                .with_card(CardDefinition::hero(HERO, "Hero", 30))
                .with_card(CardDefinition::minion(WISP, "Wisp", 0, 1, 1))
                // Whenever a minion is summoned, deal 1 damage to the enemy hero.
                .with_card(CardDefinition::minion(ECHO, "Knife Juggler", 2, 3, 2).with_trigger(
                    Trigger::new("juggle", EventKind::Summon)
                        .with_condition(TriggerCondition::SourceIsSelf.negate())
                        .with_action(Action::damage(Selector::EnemyHero, 1)),
                ))
                // Summons a copy of itself whenever anything is summoned.
                .with_card(CardDefinition::minion(LOOP, "Loop", 1, 1, 1).with_trigger(
                    Trigger::new("loop", EventKind::Summon)
                        .with_action(Action::summon(Selector::Opponent, LOOP)),
                ))
                // Draw when a minion takes damage.
                .with_card(CardDefinition::minion(COUNTER, "Armorsmith", 2, 1, 4).with_trigger(
                    Trigger::new("armor", EventKind::Damage).with_action(Action::GainArmor {
                        targets: Selector::FriendlyHero,
                        amount: crate::effects::Amount::Fixed(1),
                    }),
                )),
        )
    }

    #[test]
    fn test_results_per_action() {
        let mut state = GameState::seeded(registry(), 1).unwrap();
        let hero = state.new_card(PlayerId::new(0), HERO, Zone::Play).unwrap();

        let results = state
            .queue_actions(
                hero,
                &[
                    Action::summon(Selector::Controller, WISP),
                    Action::damage(Selector::FriendlyMinions, 5),
                    Action::Deaths,
                ],
            )
            .unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].len(), 1);
        assert_eq!(results[1].as_slice(), results[0].as_slice());
        assert_eq!(results[2].as_slice(), results[0].as_slice());
    }

    #[test]
    fn test_reactions_finish_before_next_action() {
        let mut state = GameState::seeded(registry(), 1).unwrap();
        let p0 = PlayerId::new(0);
        let hero = state.new_card(p0, HERO, Zone::Play).unwrap();
        let enemy = state.new_card(PlayerId::new(1), HERO, Zone::Play).unwrap();
        state.new_card(p0, ECHO, Zone::Play).unwrap();

        // The juggler's damage lands between the two summons, so the
        // second action sees it.
        let results = state
            .queue_actions(
                hero,
                &[
                    Action::summon(Selector::Controller, WISP),
                    Action::heal(Selector::EnemyHero, 10),
                ],
            )
            .unwrap();
        assert_eq!(results[1].as_slice(), &[enemy]);
        assert_eq!(state.health(enemy), 30);
    }

    #[test]
    fn test_runaway_triggers_hit_recursion_limit() {
        let config = RulesConfig {
            max_depth: 32,
            max_minions: 64,
            ..RulesConfig::default()
        };
        let mut state = GameState::new(registry(), config, Box::new(ScriptedDecisions::new([]))).unwrap();
        let err = state.new_card(PlayerId::new(0), LOOP, Zone::Hand).and_then(|card| {
            state.queue_actions(card, &[Action::summon(Selector::Controller, LOOP)])
        });
        assert_eq!(err.unwrap_err(), AuthoringError::RecursionLimit(32).into());
    }

    #[test]
    fn test_broadcast_event_fires_triggers() {
        let mut state = GameState::seeded(registry(), 1).unwrap();
        let p0 = PlayerId::new(0);
        let hero = state.new_card(p0, HERO, Zone::Play).unwrap();
        let smith = state.new_card(p0, COUNTER, Zone::Play).unwrap();

        state.broadcast_event(&GameEvent::damage(None, smith, 1)).unwrap();
        assert_eq!(state.entity(hero).unwrap().base(crate::cards::GameTag::Armor), 1);
    }
}
