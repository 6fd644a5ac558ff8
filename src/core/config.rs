//! Rules configuration.
//!
//! Board limits the rules enforce. Defaults match the standard
//! two-player constructed format.

use serde::{Deserialize, Serialize};

use super::error::AuthoringError;

/// Limits enforced by the rules.
///
/// ```
/// use ccg_rules::core::RulesConfig;
///
/// let config = RulesConfig::default().with_max_hand_size(8);
/// assert_eq!(config.max_hand_size, 8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    pub player_count: usize,
    /// Cards beyond this are discarded when drawn or given.
    pub max_hand_size: usize,
    /// Maximum minions per field.
    pub max_minions: usize,
    /// Cap on permanent mana crystals.
    pub max_resources: i64,
    /// Drawing from an empty deck deals escalating damage.
    pub fatigue_enabled: bool,
    /// Actions may nest at most this deep before resolution aborts.
    pub max_depth: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            max_hand_size: 10,
            max_minions: 7,
            max_resources: 10,
            fatigue_enabled: true,
            max_depth: 128,
        }
    }
}

impl RulesConfig {
    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    #[must_use]
    pub fn with_max_minions(mut self, count: usize) -> Self {
        self.max_minions = count;
        self
    }

    #[must_use]
    pub fn with_max_resources(mut self, amount: i64) -> Self {
        self.max_resources = amount;
        self
    }

    #[must_use]
    pub fn without_fatigue(mut self) -> Self {
        self.fatigue_enabled = false;
        self
    }

    /// Reject configurations the rules cannot run with.
    pub fn validate(&self) -> Result<(), AuthoringError> {
        if !(1..=255).contains(&self.player_count) {
            return Err(AuthoringError::InvalidConfig(format!(
                "player_count must be in 1..=255, got {}",
                self.player_count
            )));
        }
        if self.max_resources < 0 {
            return Err(AuthoringError::InvalidConfig(
                "max_resources must not be negative".to_string(),
            ));
        }
        if self.max_depth == 0 {
            return Err(AuthoringError::InvalidConfig(
                "max_depth must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
