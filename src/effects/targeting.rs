//! Selectors: which entities an action touches.
//!
//! A [`Selector`] is resolved late, against the entity running the script
//! (its *source*), the play target, and the triggering event if any.
//! "Friendly" and "enemy" are always relative to the source's controller.
//!
//! ## Examples
//!
//! ```
//! use ccg_rules::effects::{EntityFilter, Selector};
//!
//! // A random damaged enemy minion.
//! let sel = Selector::EnemyMinions
//!     .filtered(EntityFilter::Damaged)
//!     .random(1);
//! assert!(sel.is_random());
//! ```

use serde::{Deserialize, Serialize};

use super::resolver::ResolverContext;
use crate::cards::{CardId, GameTag, Race};
use crate::core::{DecisionPoint, EntityId, GameState, PlayerId, RulesError};
use crate::zones::Zone;

/// Late-bound entity selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    // === Context ===
    /// The entity running the script.
    SelfEntity,
    /// The play or hero power target.
    Target,
    /// Source of the triggering event.
    EventSource,
    /// Target of the triggering event.
    EventTarget,
    /// Every entity moved to the graveyard in the triggering death batch.
    DeathBatch,
    Entity(EntityId),

    // === Players ===
    Controller,
    Opponent,

    // === Board ===
    FriendlyHero,
    EnemyHero,
    FriendlyMinions,
    EnemyMinions,
    AllMinions,
    FriendlyCharacters,
    EnemyCharacters,
    AllCharacters,
    /// Minions directly left and right of the source.
    AdjacentMinions,
    FriendlyWeapon,
    EnemyWeapon,
    FriendlySecrets,
    EnemySecrets,

    // === Hidden zones ===
    FriendlyHand,
    EnemyHand,
    FriendlyDeck,
    EnemyDeck,

    // === Combinators ===
    Filtered(Box<Selector>, EntityFilter),
    /// Up to `n` distinct living picks from the inner selection.
    Random(Box<Selector>, usize),
}

impl Selector {
    /// Restrict this selection (builder pattern).
    #[must_use]
    pub fn filtered(self, filter: EntityFilter) -> Self {
        Self::Filtered(Box::new(self), filter)
    }

    /// Pick `count` at random from this selection (builder pattern).
    #[must_use]
    pub fn random(self, count: usize) -> Self {
        Self::Random(Box::new(self), count)
    }

    /// Whether resolving this selector consults the decision source.
    #[must_use]
    pub fn is_random(&self) -> bool {
        match self {
            Self::Random(..) => true,
            Self::Filtered(inner, _) => inner.is_random(),
            _ => false,
        }
    }
}

/// Predicate over a single entity, relative to a perspective entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityFilter {
    Minion,
    Hero,
    Character,
    Friendly,
    Enemy,
    NotSelf,
    Damaged,
    Undamaged,
    Alive,
    Race(Race),
    Card(CardId),
    AttackAtLeast(i64),
    AttackAtMost(i64),
    Has(GameTag),
    Lacks(GameTag),
    All(Vec<EntityFilter>),
    Any(Vec<EntityFilter>),
    Not(Box<EntityFilter>),
}

impl GameState {
    /// Whether `id` passes `filter` as seen from `perspective`.
    #[must_use]
    pub fn matches(&self, id: EntityId, filter: &EntityFilter, perspective: EntityId) -> bool {
        let Some(entity) = self.entity(id) else {
            return false;
        };
        let friendly = self.player_of(perspective) == Some(entity.controller);

        match filter {
            EntityFilter::Minion => entity.is_minion(),
            EntityFilter::Hero => entity.is_hero(),
            EntityFilter::Character => entity.kind.is_character(),
            EntityFilter::Friendly => friendly,
            EntityFilter::Enemy => !friendly,
            EntityFilter::NotSelf => id != perspective,
            EntityFilter::Damaged => entity.damage > 0,
            EntityFilter::Undamaged => entity.damage == 0,
            EntityFilter::Alive => !self.is_dead(id),
            EntityFilter::Race(race) => self.race(id) == *race,
            EntityFilter::Card(card) => entity.card_id == *card,
            EntityFilter::AttackAtLeast(n) => self.atk(id) >= *n,
            EntityFilter::AttackAtMost(n) => self.atk(id) <= *n,
            EntityFilter::Has(tag) => self.has(id, *tag),
            EntityFilter::Lacks(tag) => !self.has(id, *tag),
            EntityFilter::All(filters) => filters.iter().all(|f| self.matches(id, f, perspective)),
            EntityFilter::Any(filters) => filters.iter().any(|f| self.matches(id, f, perspective)),
            EntityFilter::Not(inner) => !self.matches(id, inner, perspective),
        }
    }

    /// Minions directly beside `id` on its controller's field.
    #[must_use]
    pub fn adjacent_minions(&self, id: EntityId) -> Vec<EntityId> {
        let Some(controller) = self.controller(id) else {
            return Vec::new();
        };
        let field = &self.player(controller).field;
        let Some(index) = field.index_of(&id) else {
            return Vec::new();
        };
        let mut adjacent = Vec::with_capacity(2);
        if index > 0 {
            adjacent.push(field[index - 1]);
        }
        if let Some(right) = field.get(index + 1) {
            adjacent.push(*right);
        }
        adjacent
    }

    /// Resolve a selector. Random selectors consult the decision source.
    pub(crate) fn select(
        &mut self,
        selector: &Selector,
        context: &ResolverContext,
    ) -> Result<Vec<EntityId>, RulesError> {
        match selector {
            Selector::Filtered(inner, filter) => {
                let pool = self.select(inner, context)?;
                Ok(pool
                    .into_iter()
                    .filter(|id| self.matches(*id, filter, context.source))
                    .collect())
            }
            Selector::Random(inner, count) => {
                let mut pool: Vec<EntityId> = self
                    .select(inner, context)?
                    .into_iter()
                    .filter(|id| !self.is_dead(*id))
                    .collect();
                let mut picked = Vec::with_capacity(*count);
                while picked.len() < *count && !pool.is_empty() {
                    let index = self.pick(DecisionPoint::RandomTarget, pool.len());
                    picked.push(pool.remove(index));
                }
                Ok(picked)
            }
            other => Ok(self.select_board(other, context)),
        }
    }

    fn select_board(&self, selector: &Selector, context: &ResolverContext) -> Vec<EntityId> {
        let me = context.controller(self);
        let enemies: Vec<PlayerId> = PlayerId::all(self.player_count())
            .filter(|p| *p != me)
            .collect();
        let in_play = |id: &EntityId| self.zone_of(*id) == Some(Zone::Play);

        let heroes = |players: &[PlayerId]| -> Vec<EntityId> {
            players
                .iter()
                .filter_map(|p| self.player(*p).hero)
                .filter(in_play)
                .collect()
        };
        let minions = |players: &[PlayerId]| -> Vec<EntityId> {
            players
                .iter()
                .flat_map(|p| self.player(*p).field.iter().copied())
                .collect()
        };
        let characters = |players: &[PlayerId]| -> Vec<EntityId> {
            let mut all = heroes(players);
            all.extend(minions(players));
            all
        };

        match selector {
            Selector::SelfEntity => vec![context.source],
            Selector::Target => context.target.into_iter().collect(),
            Selector::EventSource => context.event.as_ref().and_then(|e| e.source).into_iter().collect(),
            Selector::EventTarget => context.event.as_ref().and_then(|e| e.target).into_iter().collect(),
            Selector::DeathBatch => context
                .event
                .as_ref()
                .map(|e| e.batch.to_vec())
                .unwrap_or_default(),
            Selector::Entity(id) => vec![*id],

            Selector::Controller => vec![EntityId::player(me)],
            Selector::Opponent => enemies.iter().map(|p| EntityId::player(*p)).collect(),

            Selector::FriendlyHero => heroes(&[me]),
            Selector::EnemyHero => heroes(&enemies),
            Selector::FriendlyMinions => minions(&[me]),
            Selector::EnemyMinions => minions(&enemies),
            Selector::AllMinions => minions(&PlayerId::all(self.player_count()).collect::<Vec<_>>()),
            Selector::FriendlyCharacters => characters(&[me]),
            Selector::EnemyCharacters => characters(&enemies),
            Selector::AllCharacters => self.characters(),
            Selector::AdjacentMinions => self.adjacent_minions(context.source),
            Selector::FriendlyWeapon => self.player(me).weapon.into_iter().collect(),
            Selector::EnemyWeapon => enemies.iter().filter_map(|p| self.player(*p).weapon).collect(),
            Selector::FriendlySecrets => self.player(me).secrets.iter().copied().collect(),
            Selector::EnemySecrets => enemies
                .iter()
                .flat_map(|p| self.player(*p).secrets.iter().copied())
                .collect(),

            Selector::FriendlyHand => self.player(me).hand.iter().copied().collect(),
            Selector::EnemyHand => enemies
                .iter()
                .flat_map(|p| self.player(*p).hand.iter().copied())
                .collect(),
            Selector::FriendlyDeck => self.player(me).deck.iter().copied().collect(),
            Selector::EnemyDeck => enemies
                .iter()
                .flat_map(|p| self.player(*p).deck.iter().copied())
                .collect(),

            Selector::Filtered(..) | Selector::Random(..) => Vec::new(),
        }
    }
}
