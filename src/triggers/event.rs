//! Game events.
//!
//! Events are facts raised by the pipeline after a mutation happened.
//! They carry the entities involved so trigger conditions and reaction
//! selectors (`EventSource`, `EventTarget`, `DeathBatch`) can read them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EntityId, PlayerId};

/// What kind of occurrence an event reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// `source` dealt `amount` damage to `target`.
    Damage,
    /// `source` restored `amount` health to `target`.
    Heal,
    /// `target` moved to the graveyard as part of `batch`.
    Death,
    /// `player` played `source`, optionally at `target`.
    Play,
    /// `source` entered a field.
    Summon,
    /// `player` drew `target`.
    Draw,
    /// `target` was discarded from hand.
    Discard,
    /// `source` attacked `target`.
    Attack,
    TurnBegin,
    TurnEnd,
    /// `player` used hero power `source`.
    HeroPower,
    /// Secret `source` was revealed.
    Reveal,
    /// `target` was silenced.
    Silence,
}

/// An event with contextual data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub kind: EventKind,
    pub source: Option<EntityId>,
    pub target: Option<EntityId>,
    pub player: Option<PlayerId>,
    pub amount: i64,
    /// Every entity that died in the same death batch.
    pub batch: SmallVec<[EntityId; 8]>,
}

impl GameEvent {
    #[must_use]
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            source: None,
            target: None,
            player: None,
            amount: 0,
            batch: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    #[must_use]
    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    #[must_use]
    pub fn with_batch(mut self, batch: &[EntityId]) -> Self {
        self.batch = SmallVec::from_slice(batch);
        self
    }

    /// `target` died alongside every entity in `batch`.
    #[must_use]
    pub fn death(target: EntityId, controller: PlayerId, batch: &[EntityId]) -> Self {
        Self::new(EventKind::Death)
            .with_target(target)
            .with_player(controller)
            .with_batch(batch)
    }

    #[must_use]
    pub fn damage(source: Option<EntityId>, target: EntityId, amount: i64) -> Self {
        Self {
            source,
            ..Self::new(EventKind::Damage).with_target(target).with_amount(amount)
        }
    }

    #[must_use]
    pub fn turn_begin(player: PlayerId) -> Self {
        Self::new(EventKind::TurnBegin).with_player(player)
    }

    #[must_use]
    pub fn turn_end(player: PlayerId) -> Self {
        Self::new(EventKind::TurnEnd).with_player(player)
    }
}
