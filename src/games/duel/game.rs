//! Duel setup and the turn driver.

use std::sync::Arc;

use super::cards;
use crate::cards::{CardId, CardKind, CardRegistry, GameTag};
use crate::core::{
    shuffle, AuthoringError, DecisionSource, EntityId, GameRng, GameState, PlayerId, RulesConfig,
    RulesError,
};
use crate::triggers::GameEvent;
use crate::zones::Zone;

/// Opening hand of the first and second player.
const OPENING_HANDS: [usize; 2] = [3, 4];

/// Builder for a [`Duel`].
///
/// ```
/// use ccg_rules::core::PlayerId;
/// use ccg_rules::games::duel::{cards, DuelBuilder};
///
/// let duel = DuelBuilder::demo()
///     .deck(PlayerId::new(0), [cards::WISP; 10])
///     .deck(PlayerId::new(1), [cards::WISP; 10])
///     .seed(3)
///     .build()
///     .unwrap();
/// assert_eq!(duel.state().player(PlayerId::new(0)).hand.len(), 4);
/// ```
pub struct DuelBuilder {
    registry: Arc<CardRegistry>,
    config: RulesConfig,
    heroes: [CardId; 2],
    decks: [Vec<CardId>; 2],
    seed: u64,
    decisions: Option<Box<dyn DecisionSource>>,
}

impl DuelBuilder {
    #[must_use]
    pub fn new(registry: Arc<CardRegistry>, heroes: [CardId; 2]) -> Self {
        Self {
            registry,
            config: RulesConfig::default(),
            heroes,
            decks: [Vec::new(), Vec::new()],
            seed: 0,
            decisions: None,
        }
    }

    /// Jaina against Garrosh with the demo card set.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(Arc::new(cards::registry()), [cards::JAINA, cards::GARROSH])
    }

    #[must_use]
    pub fn config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    /// Deck list for a seat, shuffled when the duel is built.
    #[must_use]
    pub fn deck(mut self, player: PlayerId, cards: impl IntoIterator<Item = CardId>) -> Self {
        self.decks[player.index()] = cards.into_iter().collect();
        self
    }

    /// Seed for the default [`GameRng`].
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the seeded RNG, e.g. with scripted picks.
    #[must_use]
    pub fn decisions(mut self, decisions: Box<dyn DecisionSource>) -> Self {
        self.decisions = Some(decisions);
        self
    }

    /// Install heroes, shuffle decks, deal opening hands and begin the
    /// first player's first turn.
    pub fn build(self) -> Result<Duel, RulesError> {
        if self.config.player_count != 2 {
            return Err(AuthoringError::InvalidConfig(format!(
                "a duel needs 2 players, got {}",
                self.config.player_count
            ))
            .into());
        }
        let decisions: Box<dyn DecisionSource> = match self.decisions {
            Some(decisions) => decisions,
            None => Box::new(GameRng::new(self.seed)),
        };
        let mut state = GameState::new(self.registry, self.config, decisions)?;

        for (seat, (hero, deck)) in self.heroes.into_iter().zip(self.decks).enumerate() {
            let player = PlayerId::new(seat as u8);
            state.new_card(player, hero, Zone::Play)?;
            for card in deck {
                state.new_card(player, card, Zone::Deck)?;
            }
            let mut order = state.player(player).deck.clone();
            shuffle(state.decisions_mut(), &mut order);
            state.player_mut(player).deck = order;
        }

        for (seat, count) in OPENING_HANDS.into_iter().enumerate() {
            let player = PlayerId::new(seat as u8);
            state.resolve_block(|s| {
                for _ in 0..count {
                    s.draw(player)?;
                }
                Ok(())
            })?;
        }
        tracing::debug!(seed = self.seed, "duel started");

        let mut duel = Duel { state };
        duel.begin_turn()?;
        Ok(duel)
    }
}

/// A two-player game in progress.
#[derive(Debug)]
pub struct Duel {
    state: GameState,
}

impl Duel {
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable board access for playing cards, attacking and test setup.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player()
    }

    /// Start the current player's turn.
    ///
    /// Grows a mana crystal, locks last turn's overload, resets per-turn
    /// counters, refreshes the hero power, wakes characters, draws a card
    /// and fires turn-begin triggers.
    pub fn begin_turn(&mut self) -> Result<(), RulesError> {
        let state = &mut self.state;
        let player = state.current_player();
        let turn = state.next_turn();
        let max_resources = state.config().max_resources;

        let bookkeeping = state.player_mut(player);
        let crystals = bookkeeping.max_mana + 1;
        bookkeeping.set_max_mana(crystals, max_resources);
        bookkeeping.used_mana = 0;
        bookkeeping.overload_locked = bookkeeping.overloaded;
        bookkeeping.overloaded = 0;
        bookkeeping.combo = false;
        bookkeeping.cards_played_this_turn = 0;
        bookkeeping.cards_drawn_this_turn = 0;
        bookkeeping.minions_killed_this_turn = 0;
        let power = bookkeeping.hero_power;
        tracing::debug!(%player, turn, mana = bookkeeping.mana(), "turn begins");

        if let Some(power) = power {
            if let CardKind::HeroPower { exhausted } = &mut state.get_mut(power)?.kind {
                *exhausted = false;
            }
        }
        for id in friendly_characters(state, player) {
            let character = state.get_mut(id)?;
            character.turns_in_play += 1;
            character.num_attacks = 0;
        }

        state.resolve_block(|s| {
            s.draw(player)?;
            s.broadcast(&GameEvent::turn_begin(player))
        })
    }

    /// End the current player's turn and pass to the opponent.
    ///
    /// A frozen character thaws once its controller ends a turn in which
    /// it did not attack.
    pub fn end_turn(&mut self) -> Result<(), RulesError> {
        let state = &mut self.state;
        let player = state.current_player();
        state.broadcast_event(&GameEvent::turn_end(player))?;
        state.expire_one_turn_effects()?;

        for id in friendly_characters(state, player) {
            let character = state.get_mut(id)?;
            if character.base(GameTag::Frozen) != 0 && character.num_attacks == 0 {
                character.set_base(GameTag::Frozen, 0);
                tracing::debug!(%id, "thawed");
            }
        }

        state.player_mut(player).temp_mana = 0;
        let next = state.opponent(player);
        state.set_current_player(next);
        Ok(())
    }

    /// End this turn and begin the next one.
    pub fn pass_turn(&mut self) -> Result<(), RulesError> {
        self.end_turn()?;
        self.begin_turn()
    }
}

fn friendly_characters(state: &GameState, player: PlayerId) -> Vec<EntityId> {
    state
        .characters()
        .into_iter()
        .filter(|id| state.controller(*id) == Some(player))
        .collect()
}
