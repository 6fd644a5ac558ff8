//! Card registry for definition lookup.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId};
use crate::core::AuthoringError;

/// Every card definition a game can instantiate.
///
/// ```
/// use ccg_rules::cards::{CardDefinition, CardId, CardRegistry};
///
/// let registry = CardRegistry::new()
///     .with_card(CardDefinition::minion(CardId::new(1), "Wisp", 0, 1, 1));
///
/// assert_eq!(registry.get(CardId::new(1)).map(|c| c.name.as_str()), Some("Wisp"));
/// assert!(registry.lookup(CardId::new(2)).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition. Ids must be unique.
    pub fn register(&mut self, card: CardDefinition) -> Result<(), AuthoringError> {
        if self.cards.contains_key(&card.id) {
            return Err(AuthoringError::DuplicateCard(card.id));
        }
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Register a definition (builder pattern). A duplicate id replaces
    /// the earlier definition.
    #[must_use]
    pub fn with_card(mut self, card: CardDefinition) -> Self {
        self.cards.insert(card.id, card);
        self
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Like [`get`](Self::get), but a missing card is an authoring error.
    pub fn lookup(&self, id: CardId) -> Result<&CardDefinition, AuthoringError> {
        self.cards.get(&id).ok_or(AuthoringError::UnknownCard(id))
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }
}
