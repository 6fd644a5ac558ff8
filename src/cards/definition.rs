//! Card definitions - static card data.
//!
//! `CardDefinition` holds what never changes about a card: its base tags,
//! play requirements and the script slots the pipeline interprets. Board
//! state (damage, zone, buffs) lives on [`Entity`](super::Entity).
//!
//! ## Script Slots
//!
//! Each slot is an optional list of [`Action`]s. Selectors and amounts
//! inside the list are resolved late, against the acting entity and the
//! play target, so one list serves every copy of the card.
//!
//! | Slot          | Runs when                                          |
//! |---------------|----------------------------------------------------|
//! | `play`        | the card is played from hand                       |
//! | `combo`       | played with Combo after another card this turn     |
//! | `deathrattle` | the entity dies                                    |
//! | `activate`    | a hero power is used                               |
//! | `inspire`     | a friendly hero power is used                      |
//! | `apply`       | an enchantment attaches (target = its owner)       |
//! | `destroy`     | an enchantment is removed                          |
//!
//! `events` and `in_hand` hold triggers; `auras` hold aura rules.

use serde::{Deserialize, Serialize};

use super::attributes::{GameTag, Race, TagModifier, Tags};
use crate::auras::AuraRule;
use crate::effects::Action;
use crate::triggers::Trigger;

/// Unique identifier for a card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Closed set of card types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Hero,
    Minion,
    Spell,
    Weapon,
    HeroPower,
    Enchantment,
}

/// Play requirement attached to a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayReq {
    // === Target presence ===
    /// A target must be chosen; unplayable when none exist.
    TargetToPlay,
    /// Takes a target when one exists.
    TargetIfAvailable,
    /// Takes a target only when played as a combo.
    TargetForCombo,

    // === Target filters ===
    MinionTarget,
    HeroTarget,
    FriendlyTarget,
    EnemyTarget,
    DamagedTarget,
    UndamagedTarget,
    NonSelfTarget,
    TargetMaxAttack(i64),
    TargetMinAttack(i64),
    TargetWithRace(Race),

    // === Board preconditions ===
    NumMinionSlots(usize),
    MinimumEnemyMinions(usize),
    MinimumTotalMinions(usize),
    EntireEntourageNotInPlay,
    WeaponEquipped,
    FriendlyMinionDiedThisGame,
}

/// Extra condition that lights a card up as "powered up".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUp {
    /// Controller has a minion of this race in play.
    FieldRace(Race),
    /// Controller holds another card of this race.
    HoldingRace(Race),
    /// Controller already played a card this turn.
    Combo,
}

/// Script slots, see the module docs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scripts {
    pub play: Option<Vec<Action>>,
    pub combo: Option<Vec<Action>>,
    pub deathrattle: Option<Vec<Action>>,
    pub activate: Option<Vec<Action>>,
    pub inspire: Option<Vec<Action>>,
    pub apply: Option<Vec<Action>>,
    pub destroy: Option<Vec<Action>>,
    pub events: Vec<Trigger>,
    pub in_hand: Vec<Trigger>,
    pub auras: Vec<AuraRule>,
}

/// Static card definition.
///
/// ```
/// use ccg_rules::cards::{CardDefinition, CardId, GameTag};
///
/// let yeti = CardDefinition::minion(CardId::new(1), "Chillwind Yeti", 4, 4, 5);
/// assert_eq!(yeti.tag(GameTag::Atk), 4);
/// assert_eq!(yeti.tag(GameTag::Taunt), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    pub card_type: CardType,
    /// Spells only: the card becomes a secret instead of resolving.
    pub secret: bool,
    pub race: Race,
    pub tags: Tags,

    pub requirements: Vec<PlayReq>,
    pub entourage: Vec<CardId>,
    /// Choose One options, each a card whose `play` script runs.
    pub choose_cards: Vec<CardId>,
    /// Heroes only: power summoned when the hero enters play.
    pub hero_power: Option<CardId>,
    pub powered_up: Option<PowerUp>,

    // === Enchantments ===
    pub modifiers: Vec<TagModifier>,
    pub attack_health_swap: bool,
    /// Removed at the end of the turn it was applied.
    pub one_turn: bool,

    /// Minions only: tags granted while enraged and damaged.
    pub enrage: Vec<TagModifier>,

    pub scripts: Scripts,
}

impl CardDefinition {
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id,
            name: name.into(),
            card_type,
            secret: false,
            race: Race::Invalid,
            tags: Tags::default(),
            requirements: Vec::new(),
            entourage: Vec::new(),
            choose_cards: Vec::new(),
            hero_power: None,
            powered_up: None,
            modifiers: Vec::new(),
            attack_health_swap: false,
            one_turn: false,
            enrage: Vec::new(),
            scripts: Scripts::default(),
        }
    }

    #[must_use]
    pub fn minion(id: CardId, name: impl Into<String>, cost: i64, atk: i64, health: i64) -> Self {
        Self::new(id, name, CardType::Minion)
            .with_tag(GameTag::Cost, cost)
            .with_tag(GameTag::Atk, atk)
            .with_tag(GameTag::MaxHealth, health)
    }

    #[must_use]
    pub fn spell(id: CardId, name: impl Into<String>, cost: i64) -> Self {
        Self::new(id, name, CardType::Spell).with_tag(GameTag::Cost, cost)
    }

    /// Durability is stored as `MaxHealth`.
    #[must_use]
    pub fn weapon(id: CardId, name: impl Into<String>, cost: i64, atk: i64, durability: i64) -> Self {
        Self::new(id, name, CardType::Weapon)
            .with_tag(GameTag::Cost, cost)
            .with_tag(GameTag::Atk, atk)
            .with_tag(GameTag::MaxHealth, durability)
    }

    #[must_use]
    pub fn hero(id: CardId, name: impl Into<String>, health: i64) -> Self {
        Self::new(id, name, CardType::Hero).with_tag(GameTag::MaxHealth, health)
    }

    #[must_use]
    pub fn hero_power(id: CardId, name: impl Into<String>, cost: i64) -> Self {
        Self::new(id, name, CardType::HeroPower).with_tag(GameTag::Cost, cost)
    }

    #[must_use]
    pub fn enchantment(id: CardId, name: impl Into<String>) -> Self {
        Self::new(id, name, CardType::Enchantment)
    }

    /// Base value of a tag, 0 when absent.
    #[must_use]
    pub fn tag(&self, tag: GameTag) -> i64 {
        self.tags.get(&tag).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn has_requirement(&self, requirement: PlayReq) -> bool {
        self.requirements.contains(&requirement)
    }

    // === Builders ===

    #[must_use]
    pub fn with_tag(mut self, tag: GameTag, value: i64) -> Self {
        self.tags.insert(tag, value);
        self
    }

    /// Set a boolean keyword.
    #[must_use]
    pub fn with_keyword(self, tag: GameTag) -> Self {
        self.with_tag(tag, 1)
    }

    #[must_use]
    pub fn with_race(mut self, race: Race) -> Self {
        self.race = race;
        self
    }

    #[must_use]
    pub fn as_secret(mut self) -> Self {
        self.secret = true;
        self
    }

    #[must_use]
    pub fn with_requirement(mut self, requirement: PlayReq) -> Self {
        self.requirements.push(requirement);
        self
    }

    #[must_use]
    pub fn with_entourage(mut self, cards: impl IntoIterator<Item = CardId>) -> Self {
        self.entourage.extend(cards);
        self
    }

    #[must_use]
    pub fn with_choices(mut self, cards: impl IntoIterator<Item = CardId>) -> Self {
        self.choose_cards.extend(cards);
        self
    }

    #[must_use]
    pub fn with_hero_power(mut self, power: CardId) -> Self {
        self.hero_power = Some(power);
        self
    }

    #[must_use]
    pub fn with_powered_up(mut self, condition: PowerUp) -> Self {
        self.powered_up = Some(condition);
        self
    }

    #[must_use]
    pub fn with_modifier(mut self, modifier: TagModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    #[must_use]
    pub fn swapping_attack_and_health(mut self) -> Self {
        self.attack_health_swap = true;
        self
    }

    #[must_use]
    pub fn for_one_turn(mut self) -> Self {
        self.one_turn = true;
        self
    }

    /// Tags granted while enraged. Also sets the `Enrage` keyword.
    #[must_use]
    pub fn with_enrage(mut self, modifier: TagModifier) -> Self {
        self.enrage.push(modifier);
        self.with_keyword(GameTag::Enrage)
    }

    #[must_use]
    pub fn with_play(mut self, actions: Vec<Action>) -> Self {
        self.scripts.play = Some(actions);
        self
    }

    #[must_use]
    pub fn with_combo(mut self, actions: Vec<Action>) -> Self {
        self.scripts.combo = Some(actions);
        self.with_keyword(GameTag::Combo)
    }

    /// Sets `HasDeathrattle` alongside the script.
    #[must_use]
    pub fn with_deathrattle(mut self, actions: Vec<Action>) -> Self {
        self.scripts.deathrattle = Some(actions);
        self.with_keyword(GameTag::HasDeathrattle)
    }

    #[must_use]
    pub fn with_activate(mut self, actions: Vec<Action>) -> Self {
        self.scripts.activate = Some(actions);
        self
    }

    /// Sets `HasInspire` alongside the script.
    #[must_use]
    pub fn with_inspire(mut self, actions: Vec<Action>) -> Self {
        self.scripts.inspire = Some(actions);
        self.with_keyword(GameTag::HasInspire)
    }

    #[must_use]
    pub fn with_apply(mut self, actions: Vec<Action>) -> Self {
        self.scripts.apply = Some(actions);
        self
    }

    #[must_use]
    pub fn with_destroy(mut self, actions: Vec<Action>) -> Self {
        self.scripts.destroy = Some(actions);
        self
    }

    #[must_use]
    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.scripts.events.push(trigger);
        self
    }

    #[must_use]
    pub fn with_hand_trigger(mut self, trigger: Trigger) -> Self {
        self.scripts.in_hand.push(trigger);
        self
    }

    /// Sets the `Aura` keyword alongside the rule.
    #[must_use]
    pub fn with_aura(mut self, rule: AuraRule) -> Self {
        self.scripts.auras.push(rule);
        self.with_keyword(GameTag::Aura)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{Amount, Selector};

    #[test]
    fn test_minion_builder() {
        let card = CardDefinition::minion(CardId::new(7), "Goldshire Footman", 1, 1, 2)
            .with_keyword(GameTag::Taunt);

        assert_eq!(card.card_type, CardType::Minion);
        assert_eq!(card.tag(GameTag::Cost), 1);
        assert_eq!(card.tag(GameTag::MaxHealth), 2);
        assert_eq!(card.tag(GameTag::Taunt), 1);
    }

    #[test]
    fn test_script_builders_set_keywords() {
        let card = CardDefinition::minion(CardId::new(8), "Loot Hoarder", 2, 2, 1)
            .with_deathrattle(vec![Action::draw(Selector::Controller, Amount::Fixed(1))]);

        assert_eq!(card.tag(GameTag::HasDeathrattle), 1);
        assert!(card.scripts.deathrattle.is_some());
        assert!(card.scripts.inspire.is_none());
    }

    #[test]
    fn test_requirements() {
        let card = CardDefinition::spell(CardId::new(9), "Fireball", 4)
            .with_requirement(PlayReq::TargetToPlay);

        assert!(card.has_requirement(PlayReq::TargetToPlay));
        assert!(!card.has_requirement(PlayReq::MinionTarget));
    }

    #[test]
    fn test_definition_serialization() {
        let card = CardDefinition::weapon(CardId::new(10), "Fiery War Axe", 2, 3, 2);
        let json = serde_json::to_string(&card).unwrap();
        let restored: CardDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(card, restored);
    }
}
