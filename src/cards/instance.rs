//! Entities - cards instantiated on a board.
//!
//! An [`Entity`] is one copy of a card during a game. The shared fields
//! (controller, zone, base tags, buffs, damage) live directly on the
//! struct; what only some card types need lives in the [`CardKind`]
//! payload.
//!
//! ## State Values (i64 only)
//!
//! Base tags are the per-entity copy of the definition's tags. Silence,
//! freeze and divine-shield loss write here; buffs never do. Read the
//! effective value through `GameState::attribute`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::attributes::{GameTag, TagModifier, Tags};
use super::definition::{CardDefinition, CardId, CardType};
use crate::auras::AuraId;
use crate::core::{EntityId, PlayerId};
use crate::zones::Zone;

/// Variant-specific state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    Hero,
    Minion,
    Spell,
    Secret,
    HeroPower { exhausted: bool },
    Weapon,
    Enchantment(EnchantmentState),
}

impl CardKind {
    /// The payload a freshly created copy of `definition` starts with.
    #[must_use]
    pub fn for_definition(definition: &CardDefinition) -> Self {
        match definition.card_type {
            CardType::Hero => CardKind::Hero,
            CardType::Minion => CardKind::Minion,
            CardType::Spell if definition.secret => CardKind::Secret,
            CardType::Spell => CardKind::Spell,
            CardType::Weapon => CardKind::Weapon,
            CardType::HeroPower => CardKind::HeroPower { exhausted: false },
            CardType::Enchantment => CardKind::Enchantment(EnchantmentState {
                modifiers: definition.modifiers.clone(),
                ..EnchantmentState::default()
            }),
        }
    }

    /// Heroes and minions.
    #[must_use]
    pub fn is_character(&self) -> bool {
        matches!(self, CardKind::Hero | CardKind::Minion)
    }

    /// Kinds that can die and pass through the death batch.
    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self, CardKind::Hero | CardKind::Minion | CardKind::Weapon)
    }
}

/// Buff bookkeeping carried by enchantment entities.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnchantmentState {
    /// The entity the buff is attached to.
    pub owner: Option<EntityId>,
    /// Set when the buff is maintained by an aura.
    pub aura_source: Option<AuraId>,
    /// Copied from the definition at creation so instances can override it.
    pub modifiers: Vec<TagModifier>,
    /// (attack, health) the owner shows under a swap buff: its health and
    /// attack at the moment the buff applied.
    pub swapped: Option<(i64, i64)>,
}

/// One card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub card_id: CardId,
    pub kind: CardKind,
    pub controller: PlayerId,
    pub zone: Zone,
    pub tags: Tags,

    /// Attached enchantments in application order.
    pub buffs: SmallVec<[EntityId; 4]>,
    /// Auras this entity hosts while in play.
    pub auras: SmallVec<[AuraId; 2]>,

    pub damage: i64,
    pub to_be_destroyed: bool,
    pub silenced: bool,
    /// Event triggers were stripped by silence.
    pub events_severed: bool,
    pub turns_in_play: u32,
    pub num_attacks: u32,
    /// Entity whose script created this one.
    pub creator: Option<EntityId>,
}

impl Entity {
    /// Instantiate `definition` outside of any zone.
    #[must_use]
    pub fn new(id: EntityId, definition: &CardDefinition, controller: PlayerId) -> Self {
        Self {
            id,
            card_id: definition.id,
            kind: CardKind::for_definition(definition),
            controller,
            zone: Zone::Invalid,
            tags: definition.tags.clone(),
            buffs: SmallVec::new(),
            auras: SmallVec::new(),
            damage: 0,
            to_be_destroyed: false,
            silenced: false,
            events_severed: false,
            turns_in_play: 0,
            num_attacks: 0,
            creator: None,
        }
    }

    /// Record the creating entity (builder pattern).
    #[must_use]
    pub fn with_creator(mut self, creator: EntityId) -> Self {
        self.creator = Some(creator);
        self
    }

    /// Base value of a tag, ignoring buffs.
    #[must_use]
    pub fn base(&self, tag: GameTag) -> i64 {
        self.tags.get(&tag).copied().unwrap_or(0)
    }

    pub fn set_base(&mut self, tag: GameTag, value: i64) {
        if value == 0 {
            self.tags.remove(&tag);
        } else {
            self.tags.insert(tag, value);
        }
    }

    #[must_use]
    pub fn is_minion(&self) -> bool {
        matches!(self.kind, CardKind::Minion)
    }

    #[must_use]
    pub fn is_hero(&self) -> bool {
        matches!(self.kind, CardKind::Hero)
    }

    #[must_use]
    pub fn enchantment(&self) -> Option<&EnchantmentState> {
        match &self.kind {
            CardKind::Enchantment(state) => Some(state),
            _ => None,
        }
    }

    pub fn enchantment_mut(&mut self) -> Option<&mut EnchantmentState> {
        match &mut self.kind {
            CardKind::Enchantment(state) => Some(state),
            _ => None,
        }
    }
}
