//! Trigger conditions.
//!
//! Conditions filter events beyond their kind. They are evaluated from
//! the point of view of the entity that owns the trigger: `SourceIsSelf`
//! means "this entity caused the event", `ForController` means "the
//! event's player controls this entity".

use serde::{Deserialize, Serialize};

use super::event::GameEvent;
use crate::core::{EntityId, GameState};
use crate::effects::EntityFilter;

/// A predicate over an event, relative to the trigger's owner.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerCondition {
    #[default]
    Always,
    Never,

    // === Entity Filters ===
    SourceIsSelf,
    TargetIsSelf,
    /// Source passes the filter, as seen by the owner.
    SourceMatches(EntityFilter),
    /// Target passes the filter, as seen by the owner.
    TargetMatches(EntityFilter),

    // === Player Filters ===
    /// The event's player controls the owner.
    ForController,
    /// The event's player is not the owner's controller.
    ForOpponent,

    // === Value Filters ===
    AmountAtLeast(i64),

    // === Combinators ===
    All(Vec<TriggerCondition>),
    Any(Vec<TriggerCondition>),
    Not(Box<TriggerCondition>),
}

impl TriggerCondition {
    /// Create an AND condition.
    pub fn all(conditions: impl IntoIterator<Item = TriggerCondition>) -> Self {
        Self::All(conditions.into_iter().collect())
    }

    /// Create an OR condition.
    pub fn any(conditions: impl IntoIterator<Item = TriggerCondition>) -> Self {
        Self::Any(conditions.into_iter().collect())
    }

    /// Negate this condition.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Add another condition with AND.
    #[must_use]
    pub fn and(self, other: TriggerCondition) -> Self {
        match self {
            Self::All(mut conditions) => {
                conditions.push(other);
                Self::All(conditions)
            }
            Self::Always => other,
            _ => Self::All(vec![self, other]),
        }
    }
}

/// The event being matched and the entity whose trigger is asking.
#[derive(Clone, Copy, Debug)]
pub struct ConditionContext<'a> {
    pub event: &'a GameEvent,
    pub owner: EntityId,
}

impl GameState {
    /// Evaluate a condition against an event.
    #[must_use]
    pub fn evaluate(&self, condition: &TriggerCondition, ctx: ConditionContext<'_>) -> bool {
        let event = ctx.event;
        match condition {
            TriggerCondition::Always => true,
            TriggerCondition::Never => false,

            TriggerCondition::SourceIsSelf => event.source == Some(ctx.owner),
            TriggerCondition::TargetIsSelf => event.target == Some(ctx.owner),
            TriggerCondition::SourceMatches(filter) => event
                .source
                .is_some_and(|s| self.matches(s, filter, ctx.owner)),
            TriggerCondition::TargetMatches(filter) => event
                .target
                .is_some_and(|t| self.matches(t, filter, ctx.owner)),

            TriggerCondition::ForController => {
                event.player.is_some() && event.player == self.player_of(ctx.owner)
            }
            TriggerCondition::ForOpponent => {
                event.player.is_some() && event.player != self.player_of(ctx.owner)
            }

            TriggerCondition::AmountAtLeast(min) => event.amount >= *min,

            TriggerCondition::All(conditions) => conditions.iter().all(|c| self.evaluate(c, ctx)),
            TriggerCondition::Any(conditions) => conditions.iter().any(|c| self.evaluate(c, ctx)),
            TriggerCondition::Not(inner) => !self.evaluate(inner, ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::{CardDefinition, CardId, CardRegistry};
    use crate::core::PlayerId;
    use crate::triggers::EventKind;
    use crate::zones::Zone;

    fn state() -> (GameState, EntityId, EntityId) {
        let registry = CardRegistry::new().with_card(CardDefinition::minion(CardId::new(1), "Wisp", 0, 1, 1));
        let mut state = GameState::seeded(Arc::new(registry), 5).unwrap();
        let mine = state.new_card(PlayerId::new(0), CardId::new(1), Zone::Play).unwrap();
        let theirs = state.new_card(PlayerId::new(1), CardId::new(1), Zone::Play).unwrap();
        (state, mine, theirs)
    }

    #[test]
    fn test_self_conditions() {
        let (state, mine, theirs) = state();
        let event = GameEvent::damage(Some(mine), theirs, 2);

        let ctx = ConditionContext { event: &event, owner: mine };
        assert!(state.evaluate(&TriggerCondition::SourceIsSelf, ctx));
        assert!(!state.evaluate(&TriggerCondition::TargetIsSelf, ctx));
        assert!(state.evaluate(&TriggerCondition::TargetMatches(EntityFilter::Enemy), ctx));
    }

    #[test]
    fn test_player_conditions_are_relative() {
        let (state, mine, theirs) = state();
        let event = GameEvent::new(EventKind::TurnEnd).with_player(PlayerId::new(0));

        let for_me = ConditionContext { event: &event, owner: mine };
        let for_them = ConditionContext { event: &event, owner: theirs };
        assert!(state.evaluate(&TriggerCondition::ForController, for_me));
        assert!(state.evaluate(&TriggerCondition::ForOpponent, for_them));
        assert!(!state.evaluate(&TriggerCondition::ForController, for_them));
    }

    #[test]
    fn test_combinators() {
        let (state, mine, theirs) = state();
        let event = GameEvent::damage(Some(theirs), mine, 3);
        let ctx = ConditionContext { event: &event, owner: mine };

        let big_hit = TriggerCondition::TargetIsSelf.and(TriggerCondition::AmountAtLeast(3));
        assert!(state.evaluate(&big_hit, ctx));
        assert!(!state.evaluate(&big_hit.clone().negate(), ctx));
        assert!(state.evaluate(
            &TriggerCondition::any([TriggerCondition::Never, TriggerCondition::Always]),
            ctx
        ));
        assert_eq!(TriggerCondition::Always.and(TriggerCondition::Never), TriggerCondition::Never);
    }
}
