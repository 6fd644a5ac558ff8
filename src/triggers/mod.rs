//! Event-driven reactions.
//!
//! Cards declare [`Trigger`]s: an [`EventKind`], a [`TriggerCondition`]
//! evaluated relative to the owning entity, and a list of actions. When
//! the pipeline raises a [`GameEvent`], every active trigger on the board
//! is checked and each match resolves immediately, before the action that
//! raised the event continues.
//!
//! ## Example
//!
//! ```
//! use ccg_rules::effects::{Action, EntityFilter, Selector};
//! use ccg_rules::triggers::{EventKind, Trigger, TriggerCondition};
//!
//! // "Whenever a friendly minion dies, draw a card."
//! let trigger = Trigger::new("cult master", EventKind::Death)
//!     .with_condition(TriggerCondition::TargetMatches(EntityFilter::All(vec![
//!         EntityFilter::Minion,
//!         EntityFilter::Friendly,
//!     ])))
//!     .with_action(Action::draw(Selector::Controller, 1));
//! assert_eq!(trigger.actions.len(), 1);
//! ```

mod condition;
mod event;
mod registry;

pub use condition::{ConditionContext, TriggerCondition};
pub use event::{EventKind, GameEvent};
pub use registry::{Trigger, TriggerMatch};
