//! Action definitions.
//!
//! Actions are immutable instructions. Card scripts are lists of them;
//! the pipeline resolves each one against the board as it stands at that
//! moment, so selectors and amounts are late-bound.
//!
//! ## Families
//!
//! - Character effects: `Damage`, `Heal`, `Destroy`, `SetCurrentHealth`,
//!   `Silence`, `Freeze`, `GainArmor`
//! - Buffs: `Buff` attaches an enchantment card to each target
//! - Card movement: `Give`, `Summon`, `Draw`, `Discard`, `Mill`,
//!   `Shuffle`, `Bounce`, `Morph`, `Steal`, `Reveal`
//! - Flow: `Play`, `Attack`, `Deaths`, `Repeat`

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::targeting::Selector;
use crate::cards::CardId;
use crate::core::EntityId;

/// Entities an action touched or produced.
pub type ActionResult = SmallVec<[EntityId; 4]>;

/// A number resolved at the time its action runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Amount {
    Fixed(i64),
    /// Size of a selection.
    Count(Box<Selector>),
    /// The `amount` carried by the triggering event.
    EventAmount,
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self::Fixed(value)
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Self::Fixed(i64::from(value))
    }
}

/// One effect to resolve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    // === Characters ===
    Damage { targets: Selector, amount: Amount },
    Heal { targets: Selector, amount: Amount },
    /// Flag live entities for the next death batch.
    Destroy { targets: Selector },
    SetCurrentHealth { targets: Selector, amount: Amount },
    Silence { targets: Selector },
    Freeze { targets: Selector },
    /// Heroes, or the heroes of selected players.
    GainArmor { targets: Selector, amount: Amount },

    // === Buffs ===
    Buff { targets: Selector, buff: CardId },

    // === Cards ===
    /// Create a card in each selected player's hand.
    Give { player: Selector, card: CardId },
    /// Create a card in play for each selected player.
    Summon { player: Selector, card: CardId },
    /// Summon a random card from the source's entourage that the player
    /// does not already have in play.
    SummonEntourage { player: Selector },
    Draw { player: Selector, count: Amount },
    /// Hand cards to the discard pile.
    Discard { targets: Selector },
    /// Top cards of the deck to the discard pile.
    Mill { player: Selector, count: Amount },
    /// Create a card at a random position in each selected player's deck.
    Shuffle { player: Selector, card: CardId },
    Bounce { targets: Selector },
    /// Replace each target in place with a fresh copy of `into`.
    Morph { targets: Selector, into: CardId },
    /// Take control of each target for the script's controller.
    Steal { targets: Selector },
    /// Trigger each selected secret.
    Reveal { targets: Selector },
    /// Grow permanent mana crystals.
    GainMana { player: Selector, amount: Amount },

    // === Flow ===
    Play {
        card: EntityId,
        target: Option<EntityId>,
        choose: Option<usize>,
    },
    Attack { attacker: EntityId, defender: EntityId },
    /// Run the death batch now.
    Deaths,
    Repeat { times: Amount, actions: Vec<Action> },
}

impl Action {
    #[must_use]
    pub fn damage(targets: Selector, amount: impl Into<Amount>) -> Self {
        Self::Damage { targets, amount: amount.into() }
    }

    #[must_use]
    pub fn heal(targets: Selector, amount: impl Into<Amount>) -> Self {
        Self::Heal { targets, amount: amount.into() }
    }

    #[must_use]
    pub fn destroy(targets: Selector) -> Self {
        Self::Destroy { targets }
    }

    #[must_use]
    pub fn buff(targets: Selector, buff: CardId) -> Self {
        Self::Buff { targets, buff }
    }

    #[must_use]
    pub fn give(player: Selector, card: CardId) -> Self {
        Self::Give { player, card }
    }

    #[must_use]
    pub fn summon(player: Selector, card: CardId) -> Self {
        Self::Summon { player, card }
    }

    #[must_use]
    pub fn draw(player: Selector, count: impl Into<Amount>) -> Self {
        Self::Draw { player, count: count.into() }
    }

    #[must_use]
    pub fn silence(targets: Selector) -> Self {
        Self::Silence { targets }
    }

    #[must_use]
    pub fn morph(targets: Selector, into: CardId) -> Self {
        Self::Morph { targets, into }
    }

    /// Repeat this action `times` times (builder pattern).
    #[must_use]
    pub fn times(self, times: impl Into<Amount>) -> Self {
        Self::Repeat {
            times: times.into(),
            actions: vec![self],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let action = Action::damage(Selector::EnemyHero, 3);
        assert_eq!(
            action,
            Action::Damage {
                targets: Selector::EnemyHero,
                amount: Amount::Fixed(3),
            }
        );
    }

    #[test]
    fn test_times_wraps_in_repeat() {
        let missiles = Action::damage(Selector::EnemyCharacters.random(1), 1).times(3);
        match missiles {
            Action::Repeat { times, actions } => {
                assert_eq!(times, Amount::Fixed(3));
                assert_eq!(actions.len(), 1);
            }
            other => panic!("expected repeat, got {other:?}"),
        }
    }

    #[test]
    fn test_script_is_data() {
        let script = vec![
            Action::draw(Selector::Controller, Amount::Count(Box::new(Selector::EnemyMinions))),
            Action::Deaths,
        ];
        let json = serde_json::to_string(&script).unwrap();
        let back: Vec<Action> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, script);
    }
}
