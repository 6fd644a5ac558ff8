//! Error types for rule resolution.
//!
//! Two families, kept apart so callers can tell them apart:
//!
//! - [`IllegalOperation`]: a caller asked for something the rules forbid
//!   (playing an unplayable card, a zone self-transition). The board is
//!   left as it was before the request.
//! - [`AuthoringError`]: a card definition is broken (missing script,
//!   unknown card id). These indicate data bugs, not player mistakes.

use crate::cards::CardId;
use crate::core::EntityId;
use crate::zones::Zone;

/// A rules violation raised by a caller's request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IllegalOperation {
    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),

    #[error("{0} is already in {1:?}")]
    ZoneSelfTransition(EntityId, Zone),

    #[error("{0} is not in hand")]
    NotInHand(EntityId),

    #[error("{0} is not playable")]
    NotPlayable(EntityId),

    #[error("{0} requires a target")]
    TargetRequired(EntityId),

    #[error("{card} does not take a target")]
    UnexpectedTarget { card: EntityId },

    #[error("{target} is not a valid target for {card}")]
    InvalidTarget { card: EntityId, target: EntityId },

    #[error("{card} has no choice {index}")]
    InvalidChoice { card: EntityId, index: usize },

    #[error("{attacker} cannot attack {defender}")]
    CannotAttack { attacker: EntityId, defender: EntityId },

    #[error("{0} is not usable")]
    NotUsable(EntityId),
}

/// A defect in card data or configuration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthoringError {
    #[error("unknown card {0}")]
    UnknownCard(CardId),

    #[error("{0} registered twice")]
    DuplicateCard(CardId),

    #[error("{0} is not an enchantment")]
    NotAnEnchantment(CardId),

    #[error("{card} has no {slot} script")]
    MissingScript { card: CardId, slot: &'static str },

    #[error("aura on {0} uses a random selector")]
    RandomAuraSelector(CardId),

    #[error("resolution nested deeper than {0} actions")]
    RecursionLimit(u32),

    #[error("invalid rules configuration: {0}")]
    InvalidConfig(String),
}

/// Any failure surfaced by the resolution pipeline.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error(transparent)]
    Illegal(#[from] IllegalOperation),

    #[error(transparent)]
    Authoring(#[from] AuthoringError),
}

impl RulesError {
    /// Whether this error points at broken card data rather than a bad request.
    #[must_use]
    pub fn is_authoring(&self) -> bool {
        matches!(self, Self::Authoring(_))
    }
}
