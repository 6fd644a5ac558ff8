//! Checked entry points for the turn loop.
//!
//! Each command validates legality first and fails with an
//! [`IllegalOperation`] without touching the board, then resolves as one
//! block so the deaths it causes are batched when it returns.

use std::sync::Arc;

use crate::cards::{CardKind, GameTag};
use crate::core::{AuthoringError, EntityId, GameState, IllegalOperation, RulesError};
use crate::effects::{Action, ResolverContext};
use crate::triggers::{EventKind, GameEvent};
use crate::zones::Zone;

impl GameState {
    /// Play `card` from hand.
    ///
    /// `choose` selects a Choose One option and is required exactly when
    /// the card has options.
    pub fn play(
        &mut self,
        card: EntityId,
        target: Option<EntityId>,
        choose: Option<usize>,
    ) -> Result<(), RulesError> {
        if self.get(card)?.zone != Zone::Hand {
            return Err(IllegalOperation::NotInHand(card).into());
        }
        if !self.is_playable(card) {
            return Err(IllegalOperation::NotPlayable(card).into());
        }
        self.check_target(card, target)?;

        let options = self.definition(card)?.choose_cards.len();
        match choose {
            Some(index) if index >= options => {
                return Err(IllegalOperation::InvalidChoice { card, index }.into())
            }
            None if options > 0 => {
                return Err(IllegalOperation::InvalidChoice { card, index: 0 }.into())
            }
            _ => {}
        }

        let action = Action::Play { card, target, choose };
        self.resolve_block(|state| {
            state.resolve_action(&action, &ResolverContext::new(card))?;
            Ok(())
        })
    }

    /// Attack `defender` with `attacker`.
    pub fn attack(&mut self, attacker: EntityId, defender: EntityId) -> Result<(), RulesError> {
        if !self.can_attack(attacker, Some(defender)) {
            return Err(IllegalOperation::CannotAttack { attacker, defender }.into());
        }
        let action = Action::Attack { attacker, defender };
        self.resolve_block(|state| {
            state.resolve_action(&action, &ResolverContext::new(attacker))?;
            Ok(())
        })
    }

    /// Activate a hero power.
    ///
    /// Resolves the power's `activate` script, then the `inspire` script of
    /// every friendly minion with inspire. A power without `activate`, or
    /// an inspire minion without `inspire`, is an authoring error.
    pub fn use_hero_power(
        &mut self,
        power: EntityId,
        target: Option<EntityId>,
    ) -> Result<(), RulesError> {
        if !self.is_usable(power) {
            return Err(IllegalOperation::NotUsable(power).into());
        }
        self.check_target(power, target)?;

        self.resolve_block(|state| {
            let player = state.get(power)?.controller;
            let cost = state.cost(power);
            let registry = Arc::clone(state.registry());
            let card = state.get(power)?.card_id;
            let activate = registry
                .lookup(card)?
                .scripts
                .activate
                .as_ref()
                .ok_or(AuthoringError::MissingScript { card, slot: "activate" })?;
            tracing::debug!(%power, %player, "hero power used");

            let ctx = ResolverContext::new(power).with_target(target);
            state.queue_with_context(activate, ctx)?;

            let inspired: Vec<EntityId> = state
                .player(player)
                .field
                .iter()
                .copied()
                .filter(|m| state.has(*m, GameTag::HasInspire))
                .collect();
            for minion in inspired {
                let card = state.get(minion)?.card_id;
                let inspire = registry
                    .lookup(card)?
                    .scripts
                    .inspire
                    .as_ref()
                    .ok_or(AuthoringError::MissingScript { card, slot: "inspire" })?;
                state.queue_with_context(inspire, ResolverContext::new(minion))?;
            }

            if let CardKind::HeroPower { exhausted } = &mut state.get_mut(power)?.kind {
                *exhausted = true;
            }
            let player_state = state.player_mut(player);
            player_state.times_hero_power_used_this_game += 1;
            player_state.pay(cost);

            let event = GameEvent::new(EventKind::HeroPower)
                .with_source(power)
                .with_player(player);
            state.broadcast(&event)
        })
    }

    fn check_target(&self, card: EntityId, target: Option<EntityId>) -> Result<(), RulesError> {
        match target {
            None if self.has_target(card) => Err(IllegalOperation::TargetRequired(card).into()),
            Some(_) if !self.takes_target(card) => {
                Err(IllegalOperation::UnexpectedTarget { card }.into())
            }
            Some(target) if !self.is_valid_target(card, target) => {
                Err(IllegalOperation::InvalidTarget { card, target }.into())
            }
            _ => Ok(()),
        }
    }

    /// Whether the card declares any targeting requirement at all.
    fn takes_target(&self, card: EntityId) -> bool {
        use crate::cards::PlayReq;
        self.definition(card).is_ok_and(|d| {
            d.requirements.iter().any(|r| {
                matches!(
                    r,
                    PlayReq::TargetToPlay | PlayReq::TargetIfAvailable | PlayReq::TargetForCombo
                )
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, CardRegistry, PlayReq};
    use crate::core::PlayerId;
    use crate::effects::{Amount, Selector};

    const HERO: CardId = CardId::new(1);
    const FIREBLAST: CardId = CardId::new(2);
    const YETI: CardId = CardId::new(3);
    const SPELL: CardId = CardId::new(4);
    const MENDER: CardId = CardId::new(5);
    const BROKEN: CardId = CardId::new(6);
    const DRUID: CardId = CardId::new(7);
    const ROAR: CardId = CardId::new(8);
    const GROWTH: CardId = CardId::new(9);
    const BLADE: CardId = CardId::new(10);
    const SILENT: CardId = CardId::new(11);
    const WRATH: CardId = CardId::new(12);

    fn registry() -> CardRegistry {
        CardRegistry::new()
            .with_card(CardDefinition::hero(HERO, "Jaina", 30).with_hero_power(FIREBLAST))
            .with_card(
                CardDefinition::hero_power(FIREBLAST, "Fireblast", 2)
                    .with_requirement(PlayReq::TargetToPlay)
                    .with_activate(vec![Action::damage(Selector::Target, 1)]),
            )
            .with_card(CardDefinition::minion(YETI, "Yeti", 4, 4, 5))
            .with_card(CardDefinition::spell(SPELL, "Arcane Intellect", 3).with_play(vec![
                Action::draw(Selector::Controller, 2),
            ]))
            .with_card(
                CardDefinition::minion(MENDER, "Mender", 2, 1, 3)
                    .with_inspire(vec![Action::heal(Selector::FriendlyHero, 2)]),
            )
            .with_card(CardDefinition::minion(BROKEN, "Broken", 2, 1, 3).with_keyword(GameTag::HasInspire))
            .with_card(
                CardDefinition::spell(DRUID, "Power of the Wild", 2).with_choices([ROAR, GROWTH]),
            )
            .with_card(
                CardDefinition::spell(ROAR, "Roar", 0)
                    .with_play(vec![Action::summon(Selector::Controller, YETI)]),
            )
            .with_card(
                CardDefinition::spell(GROWTH, "Growth", 0)
                    .with_play(vec![Action::GainMana { player: Selector::Controller, amount: Amount::Fixed(1) }]),
            )
            .with_card(
                CardDefinition::minion(BLADE, "SI:7 Agent", 3, 3, 3)
                    .with_requirement(PlayReq::TargetForCombo)
                    .with_combo(vec![Action::damage(Selector::Target, 2)]),
            )
            .with_card(CardDefinition::hero_power(SILENT, "Nothing", 0))
            .with_card(
                CardDefinition::spell(WRATH, "Wrath", 2)
                    .with_choices([ROAR, GROWTH])
                    .with_play(vec![Action::damage(Selector::EnemyHero, 3)]),
            )
    }

    fn state() -> (GameState, EntityId, EntityId) {
        let mut state = GameState::seeded(Arc::new(registry()), 3).unwrap();
        let mine = state.new_card(PlayerId::new(0), HERO, Zone::Play).unwrap();
        let theirs = state.new_card(PlayerId::new(1), HERO, Zone::Play).unwrap();
        state.player_mut(PlayerId::new(0)).set_max_mana(10, 10);
        (state, mine, theirs)
    }

    #[test]
    fn test_play_from_hand_pays_and_resolves() {
        let (mut state, _, _) = state();
        let p0 = PlayerId::new(0);
        for _ in 0..3 {
            state.new_card(p0, YETI, Zone::Deck).unwrap();
        }
        let spell = state.new_card(p0, SPELL, Zone::Hand).unwrap();

        state.play(spell, None, None).unwrap();
        assert_eq!(state.player(p0).hand.len(), 2);
        assert_eq!(state.player(p0).mana(), 7);
        assert_eq!(state.zone_of(spell), Some(Zone::Graveyard));
        assert!(state.player(p0).combo);
        assert_eq!(state.player(p0).last_card_played, Some(spell));
    }

    #[test]
    fn test_illegal_plays_are_rejected() {
        let (mut state, _, _) = state();
        let p0 = PlayerId::new(0);
        let yeti = state.new_card(p0, YETI, Zone::Play).unwrap();
        assert_eq!(
            state.play(yeti, None, None).unwrap_err(),
            IllegalOperation::NotInHand(yeti).into()
        );

        let other = state.new_card(p0, YETI, Zone::Hand).unwrap();
        assert_eq!(
            state.play(other, Some(yeti), None).unwrap_err(),
            IllegalOperation::UnexpectedTarget { card: other }.into()
        );

        state.player_mut(p0).set_max_mana(1, 10);
        assert_eq!(
            state.play(other, None, None).unwrap_err(),
            IllegalOperation::NotPlayable(other).into()
        );
    }

    #[test]
    fn test_hero_power_and_inspire() {
        let (mut state, mine, theirs) = state();
        let p0 = PlayerId::new(0);
        let power = state.player(p0).hero_power.unwrap();
        state.new_card(p0, MENDER, Zone::Play).unwrap();
        state.set_damage(mine, 5);

        assert_eq!(
            state.use_hero_power(power, None).unwrap_err(),
            IllegalOperation::TargetRequired(power).into()
        );
        state.use_hero_power(power, Some(theirs)).unwrap();
        assert_eq!(state.health(theirs), 29);
        assert_eq!(state.health(mine), 27);
        assert!(state.is_exhausted(power));
        assert_eq!(state.player(p0).times_hero_power_used_this_game, 1);
        assert_eq!(state.player(p0).mana(), 8);

        assert_eq!(
            state.use_hero_power(power, Some(theirs)).unwrap_err(),
            IllegalOperation::NotUsable(power).into()
        );
    }

    #[test]
    fn test_missing_inspire_script_is_authoring_error() {
        let (mut state, _, theirs) = state();
        let p0 = PlayerId::new(0);
        let power = state.player(p0).hero_power.unwrap();
        state.new_card(p0, BROKEN, Zone::Play).unwrap();

        let err = state.use_hero_power(power, Some(theirs)).unwrap_err();
        assert_eq!(err, AuthoringError::MissingScript { card: BROKEN, slot: "inspire" }.into());
        assert!(err.is_authoring());
    }

    #[test]
    fn test_missing_activate_script_is_authoring_error() {
        let (mut state, _, _) = state();
        let p0 = PlayerId::new(0);
        let power = state.new_card(p0, SILENT, Zone::Play).unwrap();
        let err = state.use_hero_power(power, None).unwrap_err();
        assert_eq!(err, AuthoringError::MissingScript { card: SILENT, slot: "activate" }.into());
    }

    #[test]
    fn test_choose_one() {
        let (mut state, _, _) = state();
        let p0 = PlayerId::new(0);
        let first = state.new_card(p0, DRUID, Zone::Hand).unwrap();
        let second = state.new_card(p0, DRUID, Zone::Hand).unwrap();

        assert_eq!(
            state.play(first, None, None).unwrap_err(),
            IllegalOperation::InvalidChoice { card: first, index: 0 }.into()
        );
        assert_eq!(
            state.play(first, None, Some(2)).unwrap_err(),
            IllegalOperation::InvalidChoice { card: first, index: 2 }.into()
        );

        state.play(first, None, Some(0)).unwrap();
        assert_eq!(state.player(p0).field.len(), 1);

        state.player_mut(p0).set_max_mana(9, 10);
        state.play(second, None, Some(1)).unwrap();
        assert_eq!(state.player(p0).max_mana, 10);
    }

    #[test]
    fn test_own_play_script_beats_choice() {
        let (mut state, _, theirs) = state();
        let p0 = PlayerId::new(0);
        let wrath = state.new_card(p0, WRATH, Zone::Hand).unwrap();

        state.play(wrath, None, Some(0)).unwrap();
        assert_eq!(state.health(theirs), 27);
        assert!(state.player(p0).field.is_empty());
    }

    #[test]
    fn test_combo_script_needs_prior_card() {
        let (mut state, _, theirs) = state();
        let p0 = PlayerId::new(0);
        let agent = state.new_card(p0, BLADE, Zone::Hand).unwrap();
        let second = state.new_card(p0, BLADE, Zone::Hand).unwrap();

        assert!(!state.has_target(agent));
        state.play(agent, None, None).unwrap();
        assert_eq!(state.health(theirs), 30);

        assert!(state.has_target(second));
        state.play(second, Some(theirs), None).unwrap();
        assert_eq!(state.health(theirs), 28);
    }

    #[test]
    fn test_attack_exchanges_damage() {
        let (mut state, _, _) = state();
        let p0 = PlayerId::new(0);
        let yeti = state.new_card(p0, YETI, Zone::Play).unwrap();
        let enemy = state.new_card(PlayerId::new(1), YETI, Zone::Play).unwrap();

        assert!(state.attack(yeti, enemy).is_err());
        state.get_mut(yeti).unwrap().turns_in_play = 1;
        state.attack(yeti, enemy).unwrap();
        assert_eq!(state.health(yeti), 1);
        assert_eq!(state.health(enemy), 1);
        assert_eq!(
            state.attack(yeti, enemy).unwrap_err(),
            IllegalOperation::CannotAttack { attacker: yeti, defender: enemy }.into()
        );
    }
}
