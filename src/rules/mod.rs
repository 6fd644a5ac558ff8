//! Legality and the checked commands built on it.
//!
//! - [`legality`]: pure predicates (`is_playable`, `can_attack`,
//!   `attack_targets`, `play_targets`, `is_usable`, ...)
//! - [`commands`]: `play`, `attack` and `use_hero_power`, which refuse
//!   illegal requests before anything resolves

pub mod commands;
pub mod legality;
