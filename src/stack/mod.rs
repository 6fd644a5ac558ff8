//! The resolution pipeline.
//!
//! Hearthstone-style immediate resolution: effects happen as they are
//! queued, reactions nest inside the action that provoked them, and deaths
//! are collected into batches once the outermost block finishes.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use ccg_rules::cards::{CardDefinition, CardId, CardRegistry};
//! use ccg_rules::core::{GameState, PlayerId};
//! use ccg_rules::effects::{Action, Selector};
//! use ccg_rules::zones::Zone;
//!
//! let registry = CardRegistry::new()
//!     .with_card(CardDefinition::minion(CardId::new(1), "Wisp", 0, 1, 1));
//! let mut state = GameState::seeded(Arc::new(registry), 42).unwrap();
//! let wisp = state.new_card(PlayerId::new(0), CardId::new(1), Zone::Play).unwrap();
//!
//! // The wisp is flagged by the damage and buried when the block settles.
//! state.queue_actions(wisp, &[Action::damage(Selector::SelfEntity, 1)]).unwrap();
//! assert_eq!(state.zone_of(wisp), Some(Zone::Graveyard));
//! ```

mod deaths;
mod immediate;
