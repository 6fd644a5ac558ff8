//! Zones: where an entity is.
//!
//! Every entity occupies exactly one [`Zone`]. Most zones map to one
//! ordered container per player (`hand`, `deck`, `field`, `graveyard`,
//! `secrets`); the rest (set-aside cards, equipped heroes/weapons/powers,
//! attached enchantments, removed cards) have no container.
//!
//! All movement goes through `GameState::set_zone` in [`manager`], which
//! keeps containers and the entity's zone field in step.

pub mod manager;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardKind;
use crate::core::{EntityId, PlayerState};

pub use manager::ZoneHandler;

/// The fixed set of zones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Not yet placed; every entity starts here.
    #[default]
    Invalid,
    Deck,
    Hand,
    Play,
    Graveyard,
    Secret,
    SetAside,
    Discard,
    RemovedFromGame,
}

impl Zone {
    /// The player container that owns entities of `kind` in this zone.
    pub(crate) fn container<'a>(
        self,
        player: &'a mut PlayerState,
        kind: &CardKind,
    ) -> Option<&'a mut Vector<EntityId>> {
        match self {
            Zone::Hand => Some(&mut player.hand),
            Zone::Deck => Some(&mut player.deck),
            Zone::Graveyard => Some(&mut player.graveyard),
            Zone::Secret => Some(&mut player.secrets),
            Zone::Play if matches!(kind, CardKind::Minion) => Some(&mut player.field),
            _ => None,
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Invalid => "INVALID",
            Zone::Deck => "DECK",
            Zone::Hand => "HAND",
            Zone::Play => "PLAY",
            Zone::Graveyard => "GRAVEYARD",
            Zone::Secret => "SECRET",
            Zone::SetAside => "SETASIDE",
            Zone::Discard => "DISCARD",
            Zone::RemovedFromGame => "REMOVEDFROMGAME",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    #[test]
    fn test_only_minions_use_the_field() {
        let mut player = PlayerState::new(PlayerId::new(0));
        assert!(Zone::Play.container(&mut player, &CardKind::Minion).is_some());
        assert!(Zone::Play.container(&mut player, &CardKind::Weapon).is_none());
        assert!(Zone::Play.container(&mut player, &CardKind::Hero).is_none());
    }

    #[test]
    fn test_containerless_zones() {
        let mut player = PlayerState::new(PlayerId::new(0));
        for zone in [Zone::Invalid, Zone::SetAside, Zone::Discard, Zone::RemovedFromGame] {
            assert!(zone.container(&mut player, &CardKind::Minion).is_none());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Zone::RemovedFromGame.to_string(), "REMOVEDFROMGAME");
        assert_eq!(Zone::default(), Zone::Invalid);
    }
}
