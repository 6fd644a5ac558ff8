//! Game harnesses built on the rules core.
//!
//! - [`duel`]: two heroes, two shuffled decks, and a turn driver that
//!   handles mana, draws and start/end-of-turn bookkeeping

pub mod duel;
