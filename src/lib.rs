//! # rust-ccg-rules
//!
//! The effect-resolution core of a two-player collectible card game in the
//! classic "heroes, minions, spells" format.
//!
//! ## Design Principles
//!
//! 1. **Scripts Are Data**: cards declare their behaviour as lists of
//!    [`Action`]s with late-bound [`Selector`]s. The resolver interprets
//!    them; no card carries code.
//!
//! 2. **Derived Attributes**: an entity stores base tags only. Buffs and
//!    auras are enchantment entities folded over the base on every read,
//!    so silence and aura loss never have to "undo" anything.
//!
//! 3. **Recursive-Immediate Resolution**: an action runs to completion,
//!    and every trigger it fires resolves inside it, before the next
//!    action starts. Deaths are batched at the end of the outermost block.
//!
//! ## Architecture
//!
//! - **Entity Arena**: every card lives in one `FxHashMap` keyed by
//!   [`EntityId`]; zones are per-player ordered `im::Vector`s of ids.
//!
//! - **Zone Handlers**: entering or leaving a zone runs per-kind hooks
//!   (hero powers install, weapons replace, auras tear down).
//!
//! - **Decision Source**: every random pick goes through a
//!   [`DecisionSource`], seeded or scripted.
//!
//! ## Modules
//!
//! - `core`: ids, players, board state, errors, configuration, RNG
//! - `cards`: tags, definitions, entities and the attribute overlay
//! - `zones`: the zone state machine
//! - `auras`: buffs and aura membership
//! - `effects`: actions, selectors and the resolver
//! - `triggers`: events, conditions and trigger lookup
//! - `stack`: the resolution pipeline and death batches
//! - `rules`: legality checks and checked commands
//! - `games`: the duel harness and a demo card set
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use ccg_rules::{Action, CardDefinition, CardId, CardRegistry, GameState, PlayerId, Selector, Zone};
//!
//! let registry = CardRegistry::new()
//!     .with_card(CardDefinition::hero(CardId::new(1), "Jaina", 30))
//!     .with_card(
//!         CardDefinition::spell(CardId::new(2), "Flamestrike", 7)
//!             .with_play(vec![Action::damage(Selector::EnemyMinions, 4)]),
//!     )
//!     .with_card(CardDefinition::minion(CardId::new(3), "Yeti", 4, 4, 5));
//! let mut state = GameState::seeded(Arc::new(registry), 42).unwrap();
//!
//! let me = PlayerId::new(0);
//! state.new_card(me, CardId::new(1), Zone::Play).unwrap();
//! let yeti = state.new_card(PlayerId::new(1), CardId::new(3), Zone::Play).unwrap();
//! let flamestrike = state.new_card(me, CardId::new(2), Zone::Hand).unwrap();
//!
//! state.player_mut(me).set_max_mana(7, 10);
//! state.play(flamestrike, None, None).unwrap();
//! assert_eq!(state.health(yeti), 1);
//! ```

pub mod auras;
pub mod cards;
pub mod core;
pub mod effects;
pub mod games;
pub mod rules;
pub mod stack;
pub mod triggers;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    AuthoringError, DecisionPoint, DecisionSource, EntityId, GameRng, GameState,
    IllegalOperation, PlayerId, PlayerMap, PlayerState, RulesConfig, RulesError,
    ScriptedDecisions,
};

pub use crate::cards::{
    CardDefinition, CardId, CardKind, CardRegistry, CardType, Entity, GameTag, PlayReq, Race,
    TagModifier,
};

pub use crate::zones::Zone;

pub use crate::auras::{Aura, AuraId, AuraRule};

pub use crate::effects::{Action, ActionResult, Amount, EntityFilter, ResolverContext, Selector};

pub use crate::triggers::{EventKind, GameEvent, Trigger, TriggerCondition};
