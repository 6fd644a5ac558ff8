//! Players and per-player bookkeeping.
//!
//! ## PlayerId
//!
//! Type-safe seat index. Seats are 0-based and turn order follows them.
//!
//! ## PlayerMap
//!
//! `Vec`-backed storage indexed by `PlayerId`.
//!
//! ## PlayerState
//!
//! The per-player containers (hand, deck, field, graveyard, secrets), the
//! equipment slots and the resource counters. Containers are `im::Vector`
//! so board snapshots stay cheap to clone.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::EntityId;

/// Seat identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// The 0-based seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that acts after this one.
    ///
    /// ```
    /// use ccg_rules::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).next(2), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(1).next(2), PlayerId::new(0));
    /// ```
    #[must_use]
    pub const fn next(self, player_count: usize) -> Self {
        Self(((self.0 as usize + 1) % player_count) as u8)
    }

    /// Iterate over every seat for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player storage with O(1) access.
///
/// ```
/// use ccg_rules::core::{PlayerId, PlayerMap};
///
/// let mut life: PlayerMap<i64> = PlayerMap::new(2, |_| 30);
/// life[PlayerId::new(1)] -= 6;
/// assert_eq!(life[PlayerId::new(1)], 24);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build one entry per seat from a factory.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Everything the rules track per player.
///
/// Ordered containers hold entity ids; the top of the deck is the back of
/// `deck`. Slots (`hero`, `hero_power`, `weapon`) are maintained by zone
/// transitions and never written directly by card scripts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,

    pub hand: Vector<EntityId>,
    pub deck: Vector<EntityId>,
    pub field: Vector<EntityId>,
    pub graveyard: Vector<EntityId>,
    pub secrets: Vector<EntityId>,

    pub hero: Option<EntityId>,
    pub hero_power: Option<EntityId>,
    pub weapon: Option<EntityId>,

    // === Resources ===
    pub max_mana: i64,
    pub used_mana: i64,
    pub temp_mana: i64,
    /// Overload accrued this turn, locked at the start of the next.
    pub overloaded: i64,
    pub overload_locked: i64,

    // === Drawing ===
    pub fatigue_counter: i64,
    pub cant_draw: bool,
    pub cant_fatigue: bool,

    // === Per-turn counters ===
    pub combo: bool,
    pub cards_played_this_turn: u32,
    pub cards_drawn_this_turn: u32,
    pub minions_killed_this_turn: u32,
    pub last_card_played: Option<EntityId>,
    pub times_hero_power_used_this_game: u32,
}

impl PlayerState {
    /// Fresh bookkeeping for a seat.
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            name: format!("Player {}", id.0 + 1),
            hand: Vector::new(),
            deck: Vector::new(),
            field: Vector::new(),
            graveyard: Vector::new(),
            secrets: Vector::new(),
            hero: None,
            hero_power: None,
            weapon: None,
            max_mana: 0,
            used_mana: 0,
            temp_mana: 0,
            overloaded: 0,
            overload_locked: 0,
            fatigue_counter: 0,
            cant_draw: false,
            cant_fatigue: false,
            combo: false,
            cards_played_this_turn: 0,
            cards_drawn_this_turn: 0,
            minions_killed_this_turn: 0,
            last_card_played: None,
            times_hero_power_used_this_game: 0,
        }
    }

    /// Set a display name (builder pattern).
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Mana available right now.
    ///
    /// Spent and locked crystals come out of the permanent pool only;
    /// temporary mana always adds on top.
    #[must_use]
    pub fn mana(&self) -> i64 {
        (self.max_mana - self.used_mana - self.overload_locked).max(0) + self.temp_mana
    }

    /// Set the crystal count, clamped to `[0, max_resources]`.
    pub fn set_max_mana(&mut self, amount: i64, max_resources: i64) {
        self.max_mana = amount.clamp(0, max_resources);
    }

    /// Spend mana, consuming temporary mana first.
    pub fn pay(&mut self, cost: i64) {
        let mut cost = cost.max(0);
        if self.temp_mana > 0 {
            let from_temp = self.temp_mana.min(cost);
            self.temp_mana -= from_temp;
            cost -= from_temp;
        }
        self.used_mana += cost;
    }
}
