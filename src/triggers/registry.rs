//! Trigger lookup.
//!
//! Triggers are not registered anywhere: an entity's active set is derived
//! from its definition and current zone every time an event is checked.
//!
//! | zone      | active set                                             |
//! |-----------|--------------------------------------------------------|
//! | HAND      | the card's in-hand triggers                            |
//! | PLAY      | the card's triggers, unless silenced; poisonous extra  |
//! | SECRET    | the card's triggers, only on an opponent's turn        |
//! | elsewhere | none                                                   |

use serde::{Deserialize, Serialize};

use super::condition::{ConditionContext, TriggerCondition};
use super::event::{EventKind, GameEvent};
use crate::cards::{CardKind, GameTag};
use crate::core::{EntityId, GameState};
use crate::effects::{Action, EntityFilter, Selector};
use crate::zones::Zone;

/// An event-bound reaction declared by a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    /// Human-readable name (for debugging).
    pub name: String,
    pub on: EventKind,
    pub condition: TriggerCondition,
    pub actions: Vec<Action>,
}

impl Trigger {
    pub fn new(name: impl Into<String>, on: EventKind) -> Self {
        Self {
            name: name.into(),
            on,
            condition: TriggerCondition::Always,
            actions: Vec::new(),
        }
    }

    /// Set the condition (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: TriggerCondition) -> Self {
        self.condition = condition;
        self
    }

    /// Add an action (builder pattern).
    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// The reaction every poisonous character carries.
    #[must_use]
    pub fn poisonous() -> Self {
        Self::new("poisonous", EventKind::Damage)
            .with_condition(
                TriggerCondition::SourceIsSelf
                    .and(TriggerCondition::TargetMatches(EntityFilter::Minion)),
            )
            .with_action(Action::destroy(Selector::EventTarget))
    }
}

/// A trigger that matched an event, with the entity that owns it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggerMatch {
    pub owner: EntityId,
    pub trigger: Trigger,
}

impl GameState {
    /// Triggers `id` currently listens with.
    #[must_use]
    pub fn active_triggers(&self, id: EntityId) -> Vec<Trigger> {
        let Some(entity) = self.entity(id) else {
            return Vec::new();
        };
        let Some(definition) = self.registry().get(entity.card_id) else {
            return Vec::new();
        };

        match entity.zone {
            Zone::Hand => definition.scripts.in_hand.clone(),
            Zone::Secret if entity.controller == self.current_player() => Vec::new(),
            Zone::Play | Zone::Secret if !entity.events_severed => {
                let mut triggers = definition.scripts.events.clone();
                if entity.kind.is_character() && self.has(id, GameTag::Poisonous) {
                    triggers.push(Trigger::poisonous());
                }
                triggers
            }
            _ => Vec::new(),
        }
    }

    /// Every active trigger that matches `event`.
    ///
    /// Owners are visited starting with the current player: hero, hero
    /// power, weapon, field, secrets, the buffs on each of those, then
    /// hand. Within an owner, triggers keep declaration order.
    #[must_use]
    pub fn find_triggers(&self, event: &GameEvent) -> Vec<TriggerMatch> {
        let mut found = Vec::new();
        for owner in self.trigger_owners() {
            for trigger in self.active_triggers(owner) {
                if trigger.on != event.kind {
                    continue;
                }
                let ctx = ConditionContext { event, owner };
                if self.evaluate(&trigger.condition, ctx) {
                    tracing::trace!(%owner, trigger = %trigger.name, kind = ?event.kind, "trigger matched");
                    found.push(TriggerMatch { owner, trigger });
                }
            }
        }
        found
    }

    fn trigger_owners(&self) -> Vec<EntityId> {
        let count = self.player_count();
        let mut player = self.current_player();
        let mut owners = Vec::new();

        for _ in 0..count {
            let state = self.player(player);

            let mut board: Vec<EntityId> = state
                .hero
                .into_iter()
                .chain(state.hero_power)
                .chain(state.weapon)
                .collect();
            board.extend(state.field.iter().copied());
            board.extend(state.secrets.iter().copied());

            let buffs: Vec<EntityId> = board
                .iter()
                .filter_map(|id| self.entity(*id))
                .flat_map(|e| e.buffs.iter().copied())
                .filter(|b| {
                    self.entity(*b)
                        .is_some_and(|e| matches!(e.kind, CardKind::Enchantment(_)))
                })
                .collect();

            owners.extend(board);
            owners.extend(buffs);
            owners.extend(state.hand.iter().copied());
            player = player.next(count);
        }
        owners
    }
}
