//! Two-player duel harness.
//!
//! A thin turn driver over [`GameState`](crate::core::GameState):
//! - Each player gets a hero (which installs its hero power) and a
//!   shuffled deck
//! - The first player opens with 3 cards, the second with 4
//! - `begin_turn` grows mana, unlocks overload, wakes characters and draws
//! - `end_turn` fires end-of-turn triggers, expires one-turn buffs and
//!   thaws characters that sat out their turn
//!
//! Win detection and mulligans are left to the caller.
//!
//! [`cards`] holds a small classic card set for demos and tests.

pub mod cards;
mod game;

pub use game::{Duel, DuelBuilder};
