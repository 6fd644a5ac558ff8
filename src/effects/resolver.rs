//! Action resolution.
//!
//! [`GameState::resolve_action`] executes one [`Action`] against the
//! board. Resolution is immediate: every event an action raises is
//! broadcast on the spot, and the reactions it provokes finish before the
//! action returns.
//!
//! ## Policy branches
//!
//! Some preconditions failing is not an error:
//!
//! - drawing from an empty deck deals fatigue damage instead
//! - a card drawn or given into a full hand is discarded
//! - a minion bounced into a full hand is destroyed
//! - summons onto a full field are skipped, steals onto one destroy

use std::sync::Arc;

use super::action::{Action, ActionResult, Amount};
use super::targeting::Selector;
use crate::cards::{CardId, CardKind, CardType, GameTag};
use crate::core::{DecisionPoint, EntityId, GameState, PlayerId, RulesError};
use crate::triggers::{EventKind, GameEvent};
use crate::zones::Zone;

/// Who is running a script, and against what.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverContext {
    /// The entity the script belongs to.
    pub source: EntityId,
    /// Play or hero power target.
    pub target: Option<EntityId>,
    /// The event that fired the script, for triggers and deathrattles.
    pub event: Option<GameEvent>,
    /// Choose One option picked when the card was played.
    pub choose: Option<usize>,
}

impl ResolverContext {
    #[must_use]
    pub fn new(source: EntityId) -> Self {
        Self {
            source,
            target: None,
            event: None,
            choose: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: Option<EntityId>) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_event(mut self, event: GameEvent) -> Self {
        self.event = Some(event);
        self
    }

    #[must_use]
    pub fn with_choice(mut self, choose: Option<usize>) -> Self {
        self.choose = choose;
        self
    }

    /// Controller of the source. Falls back to the current player for
    /// sources that no longer exist.
    #[must_use]
    pub fn controller(&self, state: &GameState) -> PlayerId {
        state
            .player_of(self.source)
            .unwrap_or_else(|| state.current_player())
    }
}

impl GameState {
    fn amount(&mut self, amount: &Amount, ctx: &ResolverContext) -> Result<i64, RulesError> {
        Ok(match amount {
            Amount::Fixed(n) => *n,
            Amount::Count(selector) => self.select(selector, ctx)?.len() as i64,
            Amount::EventAmount => ctx.event.as_ref().map_or(0, |e| e.amount),
        })
    }

    fn select_players(
        &mut self,
        selector: &Selector,
        ctx: &ResolverContext,
    ) -> Result<Vec<PlayerId>, RulesError> {
        let mut players: Vec<PlayerId> = self
            .select(selector, ctx)?
            .into_iter()
            .filter_map(|id| self.player_of(id))
            .collect();
        players.dedup();
        Ok(players)
    }

    /// Resolve a single action.
    pub(crate) fn resolve_action(
        &mut self,
        action: &Action,
        ctx: &ResolverContext,
    ) -> Result<ActionResult, RulesError> {
        let mut result = ActionResult::new();

        match action {
            Action::Damage { targets, amount } => {
                let mut amount = self.amount(amount, ctx)?;
                let controller = ctx.controller(self);
                match self.entity(ctx.source).map(|e| &e.kind) {
                    Some(CardKind::Spell | CardKind::Secret) => amount += self.spell_damage(controller),
                    Some(CardKind::HeroPower { .. }) => amount += self.hero_power_damage(controller),
                    _ => {}
                }
                for target in self.select(targets, ctx)? {
                    if self.hit(Some(ctx.source), target, amount)? > 0 {
                        result.push(target);
                    }
                }
            }

            Action::Heal { targets, amount } => {
                let amount = self.amount(amount, ctx)?;
                for target in self.select(targets, ctx)? {
                    if self.heal(Some(ctx.source), target, amount)? > 0 {
                        result.push(target);
                    }
                }
            }

            Action::Destroy { targets } => {
                for target in self.select(targets, ctx)? {
                    self.destroy(target)?;
                    result.push(target);
                }
            }

            Action::SetCurrentHealth { targets, amount } => {
                let amount = self.amount(amount, ctx)?;
                for target in self.select(targets, ctx)? {
                    let damage = self.max_health(target) - amount;
                    self.set_damage(target, damage);
                    result.push(target);
                }
            }

            Action::Silence { targets } => {
                for target in self.select(targets, ctx)? {
                    self.silence(target)?;
                    result.push(target);
                }
            }

            Action::Freeze { targets } => {
                for target in self.select(targets, ctx)? {
                    self.get_mut(target)?.set_base(GameTag::Frozen, 1);
                    result.push(target);
                }
            }

            Action::GainArmor { targets, amount } => {
                let amount = self.amount(amount, ctx)?;
                for target in self.select(targets, ctx)? {
                    let hero = match target.as_player(self.player_count()) {
                        Some(player) => self.hero(player),
                        None => Some(target),
                    };
                    if let Some(hero) = hero {
                        let entity = self.get_mut(hero)?;
                        let armor = entity.base(GameTag::Armor);
                        entity.set_base(GameTag::Armor, armor + amount);
                        result.push(hero);
                    }
                }
            }

            Action::Buff { targets, buff } => {
                for target in self.select(targets, ctx)? {
                    result.push(self.apply_buff(ctx.source, target, *buff)?);
                }
            }

            Action::Give { player, card } => {
                for player in self.select_players(player, ctx)? {
                    if let Some(given) = self.give(player, *card, ctx.source)? {
                        result.push(given);
                    }
                }
            }

            Action::Summon { player, card } => {
                for player in self.select_players(player, ctx)? {
                    if let Some(summoned) = self.summon(player, *card, ctx.source)? {
                        result.push(summoned);
                    }
                }
            }

            Action::SummonEntourage { player } => {
                let registry = Arc::clone(self.registry());
                let entourage = &registry.lookup(self.get(ctx.source)?.card_id)?.entourage;
                for player in self.select_players(player, ctx)? {
                    let missing: Vec<CardId> = entourage
                        .iter()
                        .copied()
                        .filter(|card| {
                            !self
                                .player(player)
                                .field
                                .iter()
                                .any(|m| self.entity(*m).is_some_and(|e| e.card_id == *card))
                        })
                        .collect();
                    if missing.is_empty() {
                        continue;
                    }
                    let index = self.pick(DecisionPoint::RandomCard, missing.len());
                    if let Some(summoned) = self.summon(player, missing[index], ctx.source)? {
                        result.push(summoned);
                    }
                }
            }

            Action::Draw { player, count } => {
                let count = self.amount(count, ctx)?;
                for player in self.select_players(player, ctx)? {
                    for _ in 0..count {
                        if let Some(drawn) = self.draw(player)? {
                            result.push(drawn);
                        }
                    }
                }
            }

            Action::Discard { targets } => {
                for target in self.select(targets, ctx)? {
                    if self.zone_of(target) == Some(Zone::Hand) {
                        self.discard(target)?;
                        result.push(target);
                    }
                }
            }

            Action::Mill { player, count } => {
                let count = self.amount(count, ctx)?;
                for player in self.select_players(player, ctx)? {
                    for _ in 0..count {
                        let Some(top) = self.player(player).deck.back().copied() else {
                            break;
                        };
                        self.set_zone(top, Zone::Discard)?;
                        result.push(top);
                    }
                }
            }

            Action::Shuffle { player, card } => {
                for player in self.select_players(player, ctx)? {
                    let id = self.create(player, *card, Some(ctx.source))?;
                    self.set_zone(id, Zone::Deck)?;
                    let len = self.player(player).deck.len();
                    let position = self.pick(DecisionPoint::DeckPosition, len);
                    let deck = &mut self.player_mut(player).deck;
                    if let Some(index) = deck.index_of(&id) {
                        deck.remove(index);
                        deck.insert(position.min(deck.len()), id);
                    }
                    result.push(id);
                }
            }

            Action::Bounce { targets } => {
                for target in self.select(targets, ctx)? {
                    if self.zone_of(target) != Some(Zone::Play) {
                        continue;
                    }
                    let controller = self.get(target)?.controller;
                    if self.player(controller).hand.len() >= self.config().max_hand_size {
                        tracing::debug!(%target, "hand full, bounce destroys");
                        self.destroy(target)?;
                    } else {
                        self.set_zone(target, Zone::Hand)?;
                    }
                    result.push(target);
                }
            }

            Action::Morph { targets, into } => {
                for target in self.select(targets, ctx)? {
                    if let Some(morphed) = self.morph(target, *into)? {
                        result.push(morphed);
                    }
                }
            }

            Action::Steal { targets } => {
                let thief = ctx.controller(self);
                for target in self.select(targets, ctx)? {
                    if self.zone_of(target) != Some(Zone::Play) || self.controller(target) == Some(thief) {
                        continue;
                    }
                    if self.minion_slots(thief) == 0 {
                        self.destroy(target)?;
                    } else {
                        self.change_controller(target, thief)?;
                    }
                    result.push(target);
                }
            }

            Action::Reveal { targets } => {
                for target in self.select(targets, ctx)? {
                    if self.zone_of(target) != Some(Zone::Secret) {
                        continue;
                    }
                    let controller = self.get(target)?.controller;
                    self.set_zone(target, Zone::Graveyard)?;
                    let event = GameEvent::new(EventKind::Reveal)
                        .with_source(target)
                        .with_player(controller);
                    self.broadcast(&event)?;
                    result.push(target);
                }
            }

            Action::GainMana { player, amount } => {
                let amount = self.amount(amount, ctx)?;
                let cap = self.config().max_resources;
                for player in self.select_players(player, ctx)? {
                    let state = self.player_mut(player);
                    state.set_max_mana(state.max_mana + amount, cap);
                    result.push(EntityId::player(player));
                }
            }

            Action::Play { card, target, choose } => {
                self.play_card(*card, *target, *choose)?;
                result.push(*card);
            }

            Action::Attack { attacker, defender } => {
                self.combat(*attacker, *defender)?;
                result.push(*attacker);
            }

            Action::Deaths => {
                result.extend(self.process_deaths()?);
            }

            Action::Repeat { times, actions } => {
                let times = self.amount(times, ctx)?;
                for _ in 0..times {
                    for nested in self.queue_with_context(actions, ctx.clone())? {
                        result.extend(nested);
                    }
                }
            }
        }

        Ok(result)
    }

    /// Deal `amount` damage. Returns the damage actually taken.
    pub(crate) fn hit(
        &mut self,
        source: Option<EntityId>,
        target: EntityId,
        amount: i64,
    ) -> Result<i64, RulesError> {
        if amount <= 0 || self.zone_of(target) != Some(Zone::Play) {
            return Ok(0);
        }
        if self.has(target, GameTag::DivineShield) {
            self.get_mut(target)?.set_base(GameTag::DivineShield, 0);
            tracing::debug!(%target, "divine shield absorbed hit");
            return Ok(0);
        }
        if self.has(target, GameTag::Immune) {
            return Ok(0);
        }

        let mut amount = amount;
        let entity = self.get_mut(target)?;
        if entity.is_hero() {
            let armor = entity.base(GameTag::Armor);
            let absorbed = armor.min(amount);
            entity.set_base(GameTag::Armor, armor - absorbed);
            amount -= absorbed;
        }
        let damage = entity.damage;
        self.set_damage(target, damage + amount);
        tracing::debug!(%target, amount, "damage dealt");

        if let Some(source) = source {
            if self.entity(source).is_some_and(|e| e.kind.is_character())
                && self.has(source, GameTag::Stealthed)
            {
                self.get_mut(source)?.set_base(GameTag::Stealthed, 0);
            }
        }
        self.broadcast(&GameEvent::damage(source, target, amount))?;
        Ok(amount)
    }

    /// Restore up to `amount` health. Returns the health restored.
    pub(crate) fn heal(
        &mut self,
        source: Option<EntityId>,
        target: EntityId,
        amount: i64,
    ) -> Result<i64, RulesError> {
        let damage = self.get(target)?.damage;
        let healed = amount.min(damage).max(0);
        if healed == 0 {
            return Ok(0);
        }
        self.set_damage(target, damage - healed);
        let mut event = GameEvent::new(EventKind::Heal)
            .with_target(target)
            .with_amount(healed);
        event.source = source;
        self.broadcast(&event)?;
        Ok(healed)
    }

    /// Flag a live entity for the next death batch; anything else leaves
    /// its zone at once.
    pub(crate) fn destroy(&mut self, id: EntityId) -> Result<(), RulesError> {
        let entity = self.get(id)?;
        let buff = matches!(entity.kind, CardKind::Enchantment(_));
        let live = entity.kind.is_live();
        match entity.zone {
            _ if buff => self.destroy_buff(id)?,
            Zone::Play if live => {
                self.get_mut(id)?.to_be_destroyed = true;
                tracing::debug!(%id, "marked for death");
            }
            Zone::Graveyard | Zone::RemovedFromGame => {}
            _ => {
                self.set_zone(id, Zone::Graveyard)?;
            }
        }
        Ok(())
    }

    /// Strip buffs, silenceable mechanics and triggers from `id`.
    pub fn silence(&mut self, id: EntityId) -> Result<(), RulesError> {
        self.resolve_block(|state| {
            state.mark_auras_for_teardown(id)?;
            state.clear_buffs(id)?;
            let entity = state.get_mut(id)?;
            for tag in GameTag::SILENCEABLE {
                entity.set_base(tag, 0);
            }
            entity.events_severed = true;
            entity.silenced = true;
            tracing::debug!(%id, "silenced");
            state.broadcast(&GameEvent::new(EventKind::Silence).with_target(id))
        })
    }

    fn give(
        &mut self,
        player: PlayerId,
        card: CardId,
        creator: EntityId,
    ) -> Result<Option<EntityId>, RulesError> {
        let id = self.create(player, card, Some(creator))?;
        if self.player(player).hand.len() >= self.config().max_hand_size {
            tracing::debug!(%id, %player, "hand full, given card discarded");
            self.set_zone(id, Zone::Discard)?;
            return Ok(None);
        }
        self.set_zone(id, Zone::Hand)?;
        Ok(Some(id))
    }

    fn summon(
        &mut self,
        player: PlayerId,
        card: CardId,
        creator: EntityId,
    ) -> Result<Option<EntityId>, RulesError> {
        let registry = Arc::clone(self.registry());
        let minion = registry.lookup(card)?.card_type == CardType::Minion;
        if minion && self.minion_slots(player) == 0 {
            tracing::debug!(%player, %card, "field full, summon skipped");
            return Ok(None);
        }
        let id = self.create(player, card, Some(creator))?;
        self.set_zone(id, Zone::Play)?;
        if minion {
            let event = GameEvent::new(EventKind::Summon)
                .with_source(id)
                .with_player(player);
            self.broadcast(&event)?;
        }
        Ok(Some(id))
    }

    /// Draw the top card of `player`'s deck.
    pub(crate) fn draw(&mut self, player: PlayerId) -> Result<Option<EntityId>, RulesError> {
        let state = self.player(player);
        if state.cant_draw {
            return Ok(None);
        }
        let Some(card) = state.deck.back().copied() else {
            self.fatigue(player)?;
            return Ok(None);
        };

        if state.hand.len() >= self.config().max_hand_size {
            tracing::debug!(%card, %player, "hand full, drawn card discarded");
            self.set_zone(card, Zone::Discard)?;
            return Ok(None);
        }

        self.set_zone(card, Zone::Hand)?;
        self.player_mut(player).cards_drawn_this_turn += 1;
        tracing::debug!(%card, %player, "drew card");
        let event = GameEvent::new(EventKind::Draw)
            .with_target(card)
            .with_player(player);
        self.broadcast(&event)?;
        Ok(Some(card))
    }

    fn fatigue(&mut self, player: PlayerId) -> Result<(), RulesError> {
        let state = self.player(player);
        if !self.config().fatigue_enabled || state.cant_fatigue {
            return Ok(());
        }
        let Some(hero) = state.hero else {
            return Ok(());
        };
        let state = self.player_mut(player);
        state.fatigue_counter += 1;
        let damage = state.fatigue_counter;
        tracing::debug!(%player, damage, "fatigue");
        self.hit(None, hero, damage)?;
        Ok(())
    }

    fn discard(&mut self, card: EntityId) -> Result<(), RulesError> {
        let controller = self.get(card)?.controller;
        self.set_zone(card, Zone::Discard)?;
        let event = GameEvent::new(EventKind::Discard)
            .with_target(card)
            .with_player(controller);
        self.broadcast(&event)
    }

    /// Replace a minion in place. The old entity is set aside.
    fn morph(&mut self, target: EntityId, into: CardId) -> Result<Option<EntityId>, RulesError> {
        if self.zone_of(target) != Some(Zone::Play) {
            return Ok(None);
        }
        let controller = self.get(target)?.controller;
        let position = self.player(controller).field.index_of(&target);

        let id = self.create(controller, into, Some(target))?;
        self.set_zone(target, Zone::SetAside)?;
        self.set_zone(id, Zone::Play)?;
        if let Some(position) = position {
            self.place_on_field(id, position)?;
        }
        tracing::debug!(%target, into = %id, "morphed");
        Ok(Some(id))
    }

    /// Resolve a card from hand: pay, enter play, run its script, settle
    /// the deaths it caused and update the play counters.
    fn play_card(
        &mut self,
        card: EntityId,
        target: Option<EntityId>,
        choose: Option<usize>,
    ) -> Result<(), RulesError> {
        let player = self.get(card)?.controller;
        let cost = self.cost(card);
        let overload = self.attribute(card, GameTag::Overload);
        self.player_mut(player).pay(cost);

        let zone = self.set_zone(card, Zone::Play)?;
        tracing::debug!(%card, %player, ?zone, "card played");

        let mut event = GameEvent::new(EventKind::Play)
            .with_source(card)
            .with_player(player);
        event.target = target;
        self.broadcast(&event)?;
        if self.get(card)?.is_minion() {
            let summoned = GameEvent::new(EventKind::Summon)
                .with_source(card)
                .with_player(player);
            self.broadcast(&summoned)?;
        }

        let registry = Arc::clone(self.registry());
        let definition = registry.lookup(self.get(card)?.card_id)?;
        let combo = self.has(card, GameTag::Combo) && self.player(player).combo;
        let script = match (combo, &definition.scripts.combo, &definition.scripts.play, choose) {
            (true, Some(actions), _, _) => Some(actions),
            (_, _, Some(actions), _) => Some(actions),
            (_, _, None, Some(index)) => match definition.choose_cards.get(index) {
                Some(chosen) => registry.lookup(*chosen)?.scripts.play.as_ref(),
                None => None,
            },
            _ => None,
        };
        if let Some(actions) = script {
            let ctx = ResolverContext::new(card)
                .with_target(target)
                .with_choice(choose);
            self.queue_with_context(actions, ctx)?;
        }
        self.process_deaths()?;

        let state = self.player_mut(player);
        state.overloaded += overload;
        state.combo = true;
        state.last_card_played = Some(card);
        state.cards_played_this_turn += 1;

        if matches!(self.get(card)?.kind, CardKind::Spell) && self.zone_of(card) == Some(Zone::Play) {
            self.set_zone(card, Zone::Graveyard)?;
        }
        Ok(())
    }

    /// Exchange blows. Both sides hit at once; deaths wait for the batch.
    fn combat(&mut self, attacker: EntityId, defender: EntityId) -> Result<(), RulesError> {
        let player = self.get(attacker)?.controller;
        let event = GameEvent::new(EventKind::Attack)
            .with_source(attacker)
            .with_target(defender)
            .with_player(player);
        self.broadcast(&event)?;
        self.get_mut(attacker)?.num_attacks += 1;

        let gone = |s: &Self, id| s.is_dead(id) || s.zone_of(id) != Some(Zone::Play);
        if gone(self, attacker) || gone(self, defender) {
            tracing::debug!(%attacker, %defender, "attack fizzled");
            return Ok(());
        }

        let dealt = self.atk(attacker);
        let returned = self.atk(defender);
        tracing::debug!(%attacker, %defender, dealt, returned, "combat");
        self.hit(Some(attacker), defender, dealt)?;
        self.hit(Some(defender), attacker, returned)?;

        if self.get(attacker)?.is_hero() {
            if let Some(weapon) = self.player(player).weapon {
                let worn = self.get(weapon)?.damage + 1;
                self.set_damage(weapon, worn);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardRegistry, PlayReq};
    use crate::core::{RulesConfig, ScriptedDecisions};

    const HERO: CardId = CardId::new(1);
    const YETI: CardId = CardId::new(2);
    const WISP: CardId = CardId::new(3);
    const SHIELDED: CardId = CardId::new(4);
    const BOLT: CardId = CardId::new(5);
    const WIZARD: CardId = CardId::new(6);
    const SHEEP: CardId = CardId::new(7);
    const COIN: CardId = CardId::new(8);
    const COMPANION: CardId = CardId::new(9);

    fn registry() -> CardRegistry {
        CardRegistry::new()
            .with_card(CardDefinition::hero(HERO, "Hero", 30))
            .with_card(CardDefinition::minion(YETI, "Yeti", 4, 4, 5))
            .with_card(CardDefinition::minion(WISP, "Wisp", 0, 1, 1))
            .with_card(
                CardDefinition::minion(SHIELDED, "Squire", 1, 1, 1)
                    .with_keyword(GameTag::DivineShield),
            )
            .with_card(
                CardDefinition::spell(BOLT, "Bolt", 1)
                    .with_requirement(PlayReq::TargetToPlay)
                    .with_play(vec![Action::damage(Selector::Target, 3)]),
            )
            .with_card(
                CardDefinition::minion(WIZARD, "Wizard", 2, 2, 2).with_tag(GameTag::Spellpower, 1),
            )
            .with_card(CardDefinition::minion(SHEEP, "Sheep", 1, 1, 1))
            .with_card(CardDefinition::spell(COIN, "Coin", 0))
    }

    fn state() -> GameState {
        GameState::seeded(Arc::new(registry()), 21).unwrap()
    }

    fn heroes(state: &mut GameState) -> (EntityId, EntityId) {
        (
            state.new_card(PlayerId::new(0), HERO, Zone::Play).unwrap(),
            state.new_card(PlayerId::new(1), HERO, Zone::Play).unwrap(),
        )
    }

    #[test]
    fn test_divine_shield_absorbs_one_hit() {
        let mut state = state();
        let squire = state.new_card(PlayerId::new(1), SHIELDED, Zone::Play).unwrap();

        state.queue_actions(squire, &[Action::damage(Selector::SelfEntity, 10)]).unwrap();
        assert_eq!(state.health(squire), 1);
        assert!(!state.has(squire, GameTag::DivineShield));

        state.queue_actions(squire, &[Action::damage(Selector::SelfEntity, 1)]).unwrap();
        assert_eq!(state.zone_of(squire), Some(Zone::Graveyard));
    }

    #[test]
    fn test_armor_absorbs_first() {
        let mut state = state();
        let (hero, _) = heroes(&mut state);
        state
            .queue_actions(hero, &[Action::GainArmor { targets: Selector::FriendlyHero, amount: Amount::Fixed(3) }])
            .unwrap();

        state.queue_actions(hero, &[Action::damage(Selector::FriendlyHero, 5)]).unwrap();
        assert_eq!(state.entity(hero).unwrap().base(GameTag::Armor), 0);
        assert_eq!(state.health(hero), 28);
    }

    #[test]
    fn test_spell_damage_bonus() {
        let mut state = state();
        let p0 = PlayerId::new(0);
        state.new_card(p0, WIZARD, Zone::Play).unwrap();
        let bolt = state.new_card(p0, BOLT, Zone::Hand).unwrap();
        let yeti = state.new_card(PlayerId::new(1), YETI, Zone::Play).unwrap();
        state.player_mut(p0).set_max_mana(1, 10);

        state.play(bolt, Some(yeti), None).unwrap();
        assert_eq!(state.health(yeti), 1);
        assert_eq!(state.zone_of(bolt), Some(Zone::Graveyard));
    }

    #[test]
    fn test_heal_never_overheals() {
        let mut state = state();
        let yeti = state.new_card(PlayerId::new(0), YETI, Zone::Play).unwrap();
        state.set_damage(yeti, 2);

        let healed = state.queue_actions(yeti, &[Action::heal(Selector::SelfEntity, 8)]).unwrap();
        assert_eq!(healed[0].as_slice(), &[yeti]);
        assert_eq!(state.health(yeti), 5);
    }

    #[test]
    fn test_fatigue_escalates() {
        let mut state = state();
        let (hero, _) = heroes(&mut state);

        for _ in 0..3 {
            state.queue_actions(hero, &[Action::draw(Selector::Controller, 1)]).unwrap();
        }
        assert_eq!(state.player(PlayerId::new(0)).fatigue_counter, 3);
        assert_eq!(state.health(hero), 30 - 1 - 2 - 3);
    }

    #[test]
    fn test_overdraw_discards() {
        let registry = Arc::new(registry());
        let config = RulesConfig::default().with_max_hand_size(2);
        let mut state = GameState::new(registry, config, Box::new(ScriptedDecisions::new([]))).unwrap();
        let p0 = PlayerId::new(0);
        let (hero, _) = heroes(&mut state);
        for _ in 0..2 {
            state.new_card(p0, WISP, Zone::Hand).unwrap();
        }
        let top = state.new_card(p0, YETI, Zone::Deck).unwrap();

        let drawn = state.queue_actions(hero, &[Action::draw(Selector::Controller, 1)]).unwrap();
        assert!(drawn[0].is_empty());
        assert_eq!(state.zone_of(top), Some(Zone::Discard));
        assert!(state.player(p0).graveyard.is_empty());
        assert_eq!(state.player(p0).hand.len(), 2);
    }

    #[test]
    fn test_morph_keeps_position() {
        let mut state = state();
        let p0 = PlayerId::new(0);
        let left = state.new_card(p0, WISP, Zone::Play).unwrap();
        let yeti = state.new_card(p0, YETI, Zone::Play).unwrap();
        let right = state.new_card(p0, WISP, Zone::Play).unwrap();

        let result = state.queue_actions(left, &[Action::morph(Selector::Entity(yeti), SHEEP)]).unwrap();
        let sheep = result[0][0];
        let field: Vec<EntityId> = state.player(p0).field.iter().copied().collect();
        assert_eq!(field, vec![left, sheep, right]);
        assert_eq!(state.zone_of(yeti), Some(Zone::SetAside));
    }

    #[test]
    fn test_bounce_with_full_hand_destroys() {
        let registry = Arc::new(registry());
        let config = RulesConfig::default().with_max_hand_size(1);
        let mut state = GameState::new(registry, config, Box::new(ScriptedDecisions::new([]))).unwrap();
        let p0 = PlayerId::new(0);
        let yeti = state.new_card(p0, YETI, Zone::Play).unwrap();
        let wisp = state.new_card(p0, WISP, Zone::Play).unwrap();

        state.queue_actions(yeti, &[Action::Bounce { targets: Selector::SelfEntity }]).unwrap();
        assert_eq!(state.zone_of(yeti), Some(Zone::Hand));

        state.queue_actions(wisp, &[Action::Bounce { targets: Selector::SelfEntity }]).unwrap();
        assert_eq!(state.zone_of(wisp), Some(Zone::Graveyard));
    }

    #[test]
    fn test_steal_takes_control() {
        let mut state = state();
        let p0 = PlayerId::new(0);
        let (hero, _) = heroes(&mut state);
        let yeti = state.new_card(PlayerId::new(1), YETI, Zone::Play).unwrap();
        state.set_damage(yeti, 2);

        state.queue_actions(hero, &[Action::Steal { targets: Selector::EnemyMinions }]).unwrap();
        assert_eq!(state.controller(yeti), Some(p0));
        assert_eq!(state.player(p0).field.iter().copied().collect::<Vec<_>>(), vec![yeti]);
        assert_eq!(state.health(yeti), 3);
    }

    #[test]
    fn test_repeat_collects_nested_results() {
        let mut state = state();
        let p0 = PlayerId::new(0);
        let (hero, _) = heroes(&mut state);
        let results = state
            .queue_actions(hero, &[Action::summon(Selector::Controller, WISP).times(3)])
            .unwrap();
        assert_eq!(results[0].len(), 3);
        assert_eq!(state.player(p0).field.len(), 3);
    }

    #[test]
    fn test_entourage_skips_cards_in_play() {
        let registry = registry().with_card(
            CardDefinition::spell(COMPANION, "Companion", 3)
                .with_entourage([YETI, WISP, SHEEP])
                .with_requirement(PlayReq::EntireEntourageNotInPlay),
        );
        let decisions = ScriptedDecisions::new([1, 0]);
        let mut state =
            GameState::new(Arc::new(registry), RulesConfig::default(), Box::new(decisions)).unwrap();
        let p0 = PlayerId::new(0);
        heroes(&mut state);
        state.new_card(p0, WISP, Zone::Play).unwrap();
        let companion = state.new_card(p0, COMPANION, Zone::Hand).unwrap();

        let first = state
            .queue_actions(companion, &[Action::SummonEntourage { player: Selector::Controller }])
            .unwrap();
        assert_eq!(state.entity(first[0][0]).unwrap().card_id, SHEEP);
        state.player_mut(p0).set_max_mana(3, 10);
        assert!(state.is_playable(companion));

        let second = state
            .queue_actions(companion, &[Action::SummonEntourage { player: Selector::Controller }])
            .unwrap();
        assert_eq!(state.entity(second[0][0]).unwrap().card_id, YETI);

        assert!(!state.is_playable(companion));
    }

    #[test]
    fn test_summon_skipped_on_full_field() {
        let registry = Arc::new(registry());
        let config = RulesConfig::default().with_max_minions(1);
        let mut state = GameState::new(registry, config, Box::new(ScriptedDecisions::new([]))).unwrap();
        let (hero, _) = heroes(&mut state);
        let results = state
            .queue_actions(hero, &[Action::summon(Selector::Controller, WISP).times(2)])
            .unwrap();
        assert_eq!(results[0].len(), 1);
    }

    #[test]
    fn test_give_to_full_hand_discards() {
        let registry = Arc::new(registry());
        let config = RulesConfig::default().with_max_hand_size(0);
        let mut state = GameState::new(registry, config, Box::new(ScriptedDecisions::new([]))).unwrap();
        let (hero, _) = heroes(&mut state);
        let results = state.queue_actions(hero, &[Action::give(Selector::Controller, COIN)]).unwrap();
        assert!(results[0].is_empty());
        assert!(state.player(PlayerId::new(0)).graveyard.is_empty());
        let coin = state.entities().find(|e| e.card_id == COIN).map(|e| e.id).unwrap();
        assert_eq!(state.zone_of(coin), Some(Zone::Discard));
    }

    #[test]
    fn test_shuffle_uses_deck_position_decision() {
        let registry = Arc::new(registry());
        let mut state =
            GameState::new(registry, RulesConfig::default(), Box::new(ScriptedDecisions::new([0])))
                .unwrap();
        let p0 = PlayerId::new(0);
        let (hero, _) = heroes(&mut state);
        state.new_card(p0, WISP, Zone::Deck).unwrap();
        state.new_card(p0, WISP, Zone::Deck).unwrap();

        let results = state
            .queue_actions(hero, &[Action::Shuffle { player: Selector::Controller, card: YETI }])
            .unwrap();
        assert_eq!(state.player(p0).deck.front().copied(), Some(results[0][0]));
    }
}
