//! Auras and buffs: continuous attribute modifiers.
//!
//! A **buff** is an enchantment entity attached to an owner; the attribute
//! overlay folds its modifiers over the owner's base tags. An **aura** is
//! a rule hosted by an entity in play ("other friendly minions") plus the
//! buff card it maintains on every entity that currently matches.
//!
//! ## Membership
//!
//! [`GameState::refresh_auras`] re-evaluates every aura after each action
//! and during death processing:
//!
//! - targets that newly match receive a fresh aura-sourced buff
//! - targets that stop matching lose theirs
//! - an aura whose source left play or was silenced is torn down with
//!   every buff it produced
//!
//! The source's own scripts never rerun during a refresh.

pub mod buff;

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{AuthoringError, EntityId, GameState, RulesError};
use crate::effects::{ResolverContext, Selector};
use crate::zones::Zone;

/// Refresh passes before membership is considered settled.
const MAX_REFRESH_PASSES: usize = 8;

/// Unique identifier for a live aura.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AuraId(pub u32);

impl std::fmt::Display for AuraId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Aura({})", self.0)
    }
}

/// Declarative aura: who qualifies, and which buff they get.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuraRule {
    pub targets: Selector,
    pub buff: CardId,
}

impl AuraRule {
    #[must_use]
    pub fn new(targets: Selector, buff: CardId) -> Self {
        Self { targets, buff }
    }
}

/// An aura hosted by an entity in play.
#[derive(Clone, Debug, PartialEq)]
pub struct Aura {
    pub id: AuraId,
    pub source: EntityId,
    pub rule: AuraRule,
    /// (target, buff) pairs currently maintained, in application order.
    pub buffs: Vec<(EntityId, EntityId)>,
    pub to_be_destroyed: bool,
}

/// Every live aura in a game.
#[derive(Clone, Debug, Default)]
pub struct AuraTable {
    auras: Vec<Aura>,
    next_id: u32,
}

impl AuraTable {
    fn insert(&mut self, source: EntityId, rule: AuraRule) -> AuraId {
        let id = AuraId(self.next_id);
        self.next_id += 1;
        self.auras.push(Aura {
            id,
            source,
            rule,
            buffs: Vec::new(),
            to_be_destroyed: false,
        });
        id
    }

    #[must_use]
    pub fn get(&self, id: AuraId) -> Option<&Aura> {
        self.auras.iter().find(|a| a.id == id)
    }

    fn get_mut(&mut self, id: AuraId) -> Option<&mut Aura> {
        self.auras.iter_mut().find(|a| a.id == id)
    }

    fn remove(&mut self, id: AuraId) -> Option<Aura> {
        let index = self.auras.iter().position(|a| a.id == id)?;
        Some(self.auras.remove(index))
    }

    /// Drop a buff from an aura's tracked set.
    pub(crate) fn forget_buff(&mut self, id: AuraId, buff: EntityId) {
        if let Some(aura) = self.get_mut(id) {
            aura.buffs.retain(|(_, b)| *b != buff);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Aura> {
        self.auras.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.auras.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.auras.is_empty()
    }
}

impl GameState {
    /// Live auras.
    #[must_use]
    pub fn auras(&self) -> &AuraTable {
        &self.auras
    }

    /// Host `rule` on `source` and apply it to the current board.
    pub(crate) fn summon_aura(
        &mut self,
        source: EntityId,
        rule: AuraRule,
    ) -> Result<AuraId, RulesError> {
        if rule.targets.is_random() {
            let card = self.get(source)?.card_id;
            return Err(AuthoringError::RandomAuraSelector(card).into());
        }
        let id = self.auras.insert(source, rule);
        self.get_mut(source)?.auras.push(id);
        tracing::debug!(%source, aura = %id, "aura summoned");
        self.refresh_aura(id)?;
        Ok(id)
    }

    /// Flag every aura hosted by `source` for teardown at the next refresh.
    pub(crate) fn mark_auras_for_teardown(&mut self, source: EntityId) -> Result<(), RulesError> {
        let hosted: Vec<AuraId> = self.get_mut(source)?.auras.drain(..).collect();
        for id in hosted {
            if let Some(aura) = self.auras.get_mut(id) {
                aura.to_be_destroyed = true;
            }
        }
        Ok(())
    }

    /// Bring every aura's buffs in line with the board.
    pub fn refresh_auras(&mut self) -> Result<(), RulesError> {
        for _ in 0..MAX_REFRESH_PASSES {
            let ids: Vec<AuraId> = self.auras.iter().map(|a| a.id).collect();
            let mut changed = false;
            for id in ids {
                changed |= self.refresh_aura(id)?;
            }
            if !changed {
                break;
            }
        }
        Ok(())
    }

    /// Refresh one aura. Returns whether any buff was added or removed.
    fn refresh_aura(&mut self, id: AuraId) -> Result<bool, RulesError> {
        let Some(aura) = self.auras.get(id) else {
            return Ok(false);
        };
        let source = aura.source;
        let doomed = aura.to_be_destroyed || self.zone_of(source) != Some(Zone::Play);

        if doomed {
            let torn = self.auras.remove(id).map(|a| a.buffs).unwrap_or_default();
            if let Some(host) = self.entities.get_mut(&source) {
                host.auras.retain(|a| *a != id);
            }
            tracing::debug!(%source, aura = %id, buffs = torn.len(), "aura torn down");
            for (_, buff) in torn {
                self.destroy_buff(buff)?;
            }
            return Ok(true);
        }

        let rule = aura.rule.clone();
        let current = aura.buffs.clone();
        let targets: Vec<EntityId> = self
            .select(&rule.targets, &ResolverContext::new(source))?
            .into_iter()
            .filter(|t| self.zone_of(*t) == Some(Zone::Play))
            .collect();

        let mut changed = false;
        for (target, buff) in &current {
            let attached = self.zone_of(*buff) == Some(Zone::Play);
            if !targets.contains(target) || !attached {
                self.auras.forget_buff(id, *buff);
                if attached {
                    self.destroy_buff(*buff)?;
                }
                changed = true;
            }
        }
        for target in targets {
            let tracked = self
                .auras
                .get(id)
                .is_some_and(|a| a.buffs.iter().any(|(t, _)| *t == target));
            if !tracked {
                let buff = self.attach_buff(source, target, rule.buff, Some(id))?;
                if let Some(aura) = self.auras.get_mut(id) {
                    aura.buffs.push((target, buff));
                }
                changed = true;
            }
        }
        Ok(changed)
    }
}
