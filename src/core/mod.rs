//! Core types: entity ids, players, board state, errors, configuration
//! and the decision source.

pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::RulesConfig;
pub use entity::EntityId;
pub use error::{AuthoringError, IllegalOperation, RulesError};
pub use player::{PlayerId, PlayerMap, PlayerState};
pub use rng::{shuffle, DecisionPoint, DecisionSource, GameRng, GameRngState, ScriptedDecisions};
pub use state::GameState;
