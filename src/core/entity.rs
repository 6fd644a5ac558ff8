//! Entity identification.
//!
//! Every object on the board (player, hero, minion, spell, enchantment)
//! has a unique `EntityId`.
//!
//! ## ID Layout
//!
//! - `0..player_count`: Reserved for the player entities themselves
//! - `player_count..`: Cards created during the game, in allocation order
//!
//! ```
//! use ccg_rules::core::{EntityId, PlayerId};
//!
//! let first = EntityId::player(PlayerId::new(0));
//! assert!(first.is_player(2));
//! assert_eq!(first.as_player(2), Some(PlayerId::new(0)));
//!
//! let card = EntityId(7);
//! assert!(!card.is_player(2));
//! ```

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Unique identifier for any entity in a game.
///
/// Ordering follows allocation order, which the rules use as a stable
/// tie-breaker when no board position applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The entity representing a player.
    #[must_use]
    pub const fn player(id: PlayerId) -> Self {
        Self(id.0 as u32)
    }

    /// First id handed out to cards in a game with `player_count` players.
    #[must_use]
    pub const fn first_card(player_count: usize) -> u32 {
        player_count as u32
    }

    #[must_use]
    pub const fn is_player(self, player_count: usize) -> bool {
        self.0 < player_count as u32
    }

    /// Convert back to a `PlayerId` if this id names a player entity.
    #[must_use]
    pub const fn as_player(self, player_count: usize) -> Option<PlayerId> {
        if self.is_player(player_count) {
            Some(PlayerId(self.0 as u8))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
