//! The board: every entity, every player, and the decision source.
//!
//! `GameState` owns all mutable game data. Entities live in an arena keyed
//! by [`EntityId`]; per-player containers (hand, deck, field, ...) hold ids
//! in order. The pipeline (`queue_actions`, `play`, `attack`, ...) is the
//! only path that mutates entities; read access is public.
//!
//! ## Entity Registry
//!
//! Ids are handed out by [`GameState::alloc_entity`] in increasing order
//! after the reserved player ids. Entities are never deallocated: cards in
//! GRAVEYARD or REMOVEDFROMGAME stay in the arena, inert.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::config::RulesConfig;
use super::entity::EntityId;
use super::error::{IllegalOperation, RulesError};
use super::player::{PlayerId, PlayerMap, PlayerState};
use super::rng::{DecisionPoint, DecisionSource, GameRng};
use crate::auras::AuraTable;
use crate::cards::{CardDefinition, CardId, CardKind, CardRegistry, Entity};
use crate::zones::Zone;

/// Complete board state.
#[derive(Debug)]
pub struct GameState {
    config: RulesConfig,
    registry: Arc<CardRegistry>,
    pub(crate) entities: FxHashMap<EntityId, Entity>,
    pub(crate) players: PlayerMap<PlayerState>,
    pub(crate) auras: AuraTable,
    current_player: PlayerId,
    turn: u32,
    decisions: Box<dyn DecisionSource>,
    next_entity_id: u32,
    /// Nesting depth of the resolution pipeline; 0 when idle.
    pub(crate) depth: u32,
}

impl GameState {
    /// Create an empty board.
    pub fn new(
        registry: Arc<CardRegistry>,
        config: RulesConfig,
        decisions: Box<dyn DecisionSource>,
    ) -> Result<Self, RulesError> {
        config.validate()?;
        let players = PlayerMap::new(config.player_count, PlayerState::new);
        let next_entity_id = EntityId::first_card(config.player_count);

        Ok(Self {
            config,
            registry,
            entities: FxHashMap::default(),
            players,
            auras: AuraTable::default(),
            current_player: PlayerId::new(0),
            turn: 0,
            decisions,
            next_entity_id,
            depth: 0,
        })
    }

    /// Default rules with a seeded [`GameRng`].
    pub fn seeded(registry: Arc<CardRegistry>, seed: u64) -> Result<Self, RulesError> {
        Self::new(registry, RulesConfig::default(), Box::new(GameRng::new(seed)))
    }

    // === Configuration ===

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<CardRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    #[must_use]
    pub fn max_minions(&self) -> usize {
        self.config.max_minions
    }

    // === Turn bookkeeping ===

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn set_current_player(&mut self, player: PlayerId) {
        self.current_player = player;
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Advance the turn counter and return the new turn number.
    pub fn next_turn(&mut self) -> u32 {
        self.turn += 1;
        self.turn
    }

    /// The seat acting after `player`.
    #[must_use]
    pub fn opponent(&self, player: PlayerId) -> PlayerId {
        player.next(self.config.player_count)
    }

    // === Players ===

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    /// Player bookkeeping for the turn loop (mana, counters).
    ///
    /// Containers and slots are owned by zone transitions; editing them
    /// here desynchronizes entity zones.
    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    pub fn players(&self) -> impl Iterator<Item = (PlayerId, &PlayerState)> {
        self.players.iter()
    }

    // === Entities ===

    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub(crate) fn get(&self, id: EntityId) -> Result<&Entity, RulesError> {
        self.entities
            .get(&id)
            .ok_or_else(|| IllegalOperation::UnknownEntity(id).into())
    }

    pub(crate) fn get_mut(&mut self, id: EntityId) -> Result<&mut Entity, RulesError> {
        self.entities
            .get_mut(&id)
            .ok_or_else(|| IllegalOperation::UnknownEntity(id).into())
    }

    /// Definition of the card an entity was created from.
    pub fn definition(&self, id: EntityId) -> Result<&CardDefinition, RulesError> {
        let card_id = self.get(id)?.card_id;
        Ok(self.registry.lookup(card_id)?)
    }

    #[must_use]
    pub fn zone_of(&self, id: EntityId) -> Option<Zone> {
        self.entity(id).map(|e| e.zone)
    }

    #[must_use]
    pub fn controller(&self, id: EntityId) -> Option<PlayerId> {
        self.entity(id).map(|e| e.controller)
    }

    /// The player an id refers to: the player entity itself, or the
    /// controller of a card.
    #[must_use]
    pub fn player_of(&self, id: EntityId) -> Option<PlayerId> {
        id.as_player(self.config.player_count)
            .or_else(|| self.controller(id))
    }

    /// Allocate the next entity id.
    pub fn alloc_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    /// Construct a card for `controller` and register it, outside any zone.
    pub(crate) fn create(
        &mut self,
        controller: PlayerId,
        card_id: CardId,
        creator: Option<EntityId>,
    ) -> Result<EntityId, RulesError> {
        let registry = Arc::clone(&self.registry);
        let definition = registry.lookup(card_id)?;
        let id = self.alloc_entity();
        let mut entity = Entity::new(id, definition, controller);
        entity.creator = creator;
        self.entities.insert(id, entity);
        tracing::trace!(%id, card = %definition.name, %controller, "created entity");
        Ok(id)
    }

    /// Create a card for `controller` and move it into `zone`.
    ///
    /// This is the setup entry point for decks, heroes and test boards.
    /// Entering PLAY runs the same transition hooks as any other move.
    pub fn new_card(
        &mut self,
        controller: PlayerId,
        card_id: CardId,
        zone: Zone,
    ) -> Result<EntityId, RulesError> {
        self.resolve_block(|state| {
            let id = state.create(controller, card_id, None)?;
            if zone != Zone::Invalid {
                state.set_zone(id, zone)?;
            }
            Ok(id)
        })
    }

    /// Ask the decision source for an index in `0..candidates`.
    ///
    /// Out-of-range answers are clamped to the last candidate.
    pub(crate) fn pick(&mut self, point: DecisionPoint, candidates: usize) -> usize {
        let pick = self.decisions.pick(point, candidates);
        if pick >= candidates {
            tracing::warn!(?point, pick, candidates, "decision out of range, clamped");
        }
        pick.min(candidates.saturating_sub(1))
    }

    pub(crate) fn decisions_mut(&mut self) -> &mut dyn DecisionSource {
        self.decisions.as_mut()
    }

    // === Board queries ===

    /// Hero of a player, if one is installed.
    #[must_use]
    pub fn hero(&self, player: PlayerId) -> Option<EntityId> {
        self.players[player].hero
    }

    /// Every character in play: each player's hero, then their field.
    #[must_use]
    pub fn characters(&self) -> Vec<EntityId> {
        let mut characters = Vec::new();
        for (_, player) in self.players.iter() {
            if let Some(hero) = player.hero {
                if self.zone_of(hero) == Some(Zone::Play) {
                    characters.push(hero);
                }
            }
            characters.extend(player.field.iter().copied());
        }
        characters
    }

    /// Total minions on every field.
    #[must_use]
    pub fn minion_count(&self) -> usize {
        self.players.iter().map(|(_, p)| p.field.len()).sum()
    }

    /// Free field slots for a player.
    #[must_use]
    pub fn minion_slots(&self, player: PlayerId) -> usize {
        self.config
            .max_minions
            .saturating_sub(self.players[player].field.len())
    }

    /// Entities that can die, in death-processing order: per player the
    /// field, then the hero, then any weapons in play.
    #[must_use]
    pub fn live_entities(&self) -> Vec<EntityId> {
        let mut live = Vec::new();
        for (player_id, player) in self.players.iter() {
            live.extend(player.field.iter().copied());
            if let Some(hero) = player.hero {
                if self.zone_of(hero) == Some(Zone::Play) {
                    live.push(hero);
                }
            }
            let mut weapons: Vec<EntityId> = self
                .entities
                .values()
                .filter(|e| {
                    e.controller == player_id
                        && e.zone == Zone::Play
                        && matches!(e.kind, CardKind::Weapon)
                })
                .map(|e| e.id)
                .collect();
            weapons.sort();
            live.extend(weapons);
        }
        live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, GameTag};

    fn registry() -> Arc<CardRegistry> {
        Arc::new(
            CardRegistry::new()
                .with_card(CardDefinition::minion(CardId::new(1), "Wisp", 0, 1, 1))
                .with_card(CardDefinition::hero(CardId::new(2), "Jaina", 30)),
        )
    }

    #[derive(Debug)]
    struct Overshoot;

    impl DecisionSource for Overshoot {
        fn pick(&mut self, _point: DecisionPoint, candidates: usize) -> usize {
            candidates + 5
        }
    }

    #[test]
    fn test_out_of_range_decisions_are_clamped() {
        let mut state =
            GameState::new(registry(), RulesConfig::default(), Box::new(Overshoot)).unwrap();
        assert_eq!(state.pick(DecisionPoint::RandomTarget, 3), 2);
        assert_eq!(state.pick(DecisionPoint::RandomCard, 1), 0);
    }

    #[test]
    fn test_ids_start_after_players() {
        let mut state = GameState::seeded(registry(), 1).unwrap();
        assert_eq!(state.alloc_entity(), EntityId(2));
        assert_eq!(state.alloc_entity(), EntityId(3));
    }

    #[test]
    fn test_new_card_enters_zone() {
        let mut state = GameState::seeded(registry(), 1).unwrap();
        let p0 = PlayerId::new(0);
        let wisp = state.new_card(p0, CardId::new(1), Zone::Hand).unwrap();

        assert_eq!(state.zone_of(wisp), Some(Zone::Hand));
        assert_eq!(state.player(p0).hand.len(), 1);
        assert_eq!(state.controller(wisp), Some(p0));
        assert_eq!(state.entity(wisp).unwrap().base(GameTag::Atk), 1);
    }

    #[test]
    fn test_unknown_card_is_authoring_error() {
        let mut state = GameState::seeded(registry(), 1).unwrap();
        let err = state
            .new_card(PlayerId::new(0), CardId::new(99), Zone::Hand)
            .unwrap_err();
        assert!(err.is_authoring());
    }

    #[test]
    fn test_characters_and_counts() {
        let mut state = GameState::seeded(registry(), 1).unwrap();
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);
        let hero = state.new_card(p0, CardId::new(2), Zone::Play).unwrap();
        let a = state.new_card(p0, CardId::new(1), Zone::Play).unwrap();
        let b = state.new_card(p1, CardId::new(1), Zone::Play).unwrap();

        assert_eq!(state.characters(), vec![hero, a, b]);
        assert_eq!(state.minion_count(), 2);
        assert_eq!(state.minion_slots(p0), 6);
        assert_eq!(state.hero(p0), Some(hero));
        assert_eq!(state.player_of(EntityId(1)), Some(p1));
        assert_eq!(state.player_of(a), Some(p0));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RulesConfig {
            max_depth: 0,
            ..RulesConfig::default()
        };
        let result = GameState::new(registry(), config, Box::new(GameRng::new(0)));
        assert!(matches!(result, Err(RulesError::Authoring(_))));
    }
}
