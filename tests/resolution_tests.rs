//! Resolution pipeline tests.
//!
//! These drive the rules through the public entry points with the demo
//! card set: damage and divine shield, batched deaths, silence, drawing,
//! live aura membership and equipment replacement.

use std::sync::Arc;

use ccg_rules::auras::AuraRule;
use ccg_rules::cards::{CardDefinition, CardId, CardRegistry, GameTag};
use ccg_rules::core::{EntityId, GameState, PlayerId, RulesConfig, ScriptedDecisions};
use ccg_rules::effects::{Action, Amount, EntityFilter, Selector};
use ccg_rules::games::duel::cards::*;
use ccg_rules::zones::Zone;

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

const BANNER: CardId = CardId::new(1000);
const MOURNER: CardId = CardId::new(1001);

/// Demo cards plus two test-only minions:
/// - Banner: aura "+1 attack to other friendly minions", battlecry gives a Wisp
/// - Mourner: deathrattle gains armor equal to the size of its death batch
fn registry() -> CardRegistry {
    ccg_rules::games::duel::cards::registry()
        .with_card(
            CardDefinition::minion(BANNER, "Banner Carrier", 3, 2, 2)
                .with_aura(AuraRule::new(
                    Selector::FriendlyMinions.filtered(EntityFilter::NotSelf),
                    RAID_LEADER_AURA,
                ))
                .with_play(vec![Action::give(Selector::Controller, WISP)]),
        )
        .with_card(
            CardDefinition::minion(MOURNER, "Mourner", 2, 1, 2).with_deathrattle(vec![
                Action::GainArmor {
                    targets: Selector::FriendlyHero,
                    amount: Amount::Count(Box::new(Selector::DeathBatch)),
                },
            ]),
        )
}

/// Two heroes in play, player 0 to act with 10 mana.
fn board() -> (GameState, EntityId, EntityId) {
    let mut state = GameState::seeded(Arc::new(registry()), 42).unwrap();
    let jaina = state.new_card(P0, JAINA, Zone::Play).unwrap();
    let garrosh = state.new_card(P1, GARROSH, Zone::Play).unwrap();
    state.player_mut(P0).set_max_mana(10, 10);
    (state, jaina, garrosh)
}

// =============================================================================
// Damage
// =============================================================================

/// Divine shield absorbs exactly one hit of any size.
#[test]
fn test_divine_shield_absorbs_one_hit() {
    let (mut state, jaina, _) = board();
    let squire = state.new_card(P1, ARGENT_SQUIRE, Zone::Play).unwrap();

    state
        .queue_actions(jaina, &[Action::damage(Selector::Entity(squire), 10)])
        .unwrap();
    assert_eq!(state.zone_of(squire), Some(Zone::Play));
    assert_eq!(state.health(squire), 1);
    assert!(!state.has(squire, GameTag::DivineShield));

    state
        .queue_actions(jaina, &[Action::damage(Selector::Entity(squire), 1)])
        .unwrap();
    assert_eq!(state.zone_of(squire), Some(Zone::Graveyard));
}

/// Spell damage from the field adds to spells, not to minions.
#[test]
fn test_spell_damage_boosts_spells() {
    let (mut state, _, garrosh) = board();
    state.new_card(P0, KOBOLD_GEOMANCER, Zone::Play).unwrap();
    let fireball = state.new_card(P0, FIREBALL, Zone::Hand).unwrap();

    state.play(fireball, Some(garrosh), None).unwrap();
    assert_eq!(state.health(garrosh), 23);
    assert_eq!(state.zone_of(fireball), Some(Zone::Graveyard));
}

/// Enrage bonuses apply only while damaged.
#[test]
fn test_enrage_follows_damage() {
    let (mut state, jaina, _) = board();
    let berserker = state.new_card(P1, AMANI_BERSERKER, Zone::Play).unwrap();
    assert_eq!(state.atk(berserker), 2);

    state
        .queue_actions(jaina, &[Action::damage(Selector::Entity(berserker), 1)])
        .unwrap();
    assert_eq!(state.atk(berserker), 5);

    state
        .queue_actions(jaina, &[Action::heal(Selector::Entity(berserker), 5)])
        .unwrap();
    assert_eq!(state.atk(berserker), 2);
    assert_eq!(state.health(berserker), 3);
}

// =============================================================================
// Deaths
// =============================================================================

/// Both victims of one spell die in the same batch.
#[test]
fn test_simultaneous_deaths_are_batched() {
    let (mut state, _, garrosh) = board();
    let a = state.new_card(P1, MOURNER, Zone::Play).unwrap();
    let b = state.new_card(P1, MOURNER, Zone::Play).unwrap();
    let flamestrike = state.new_card(P0, FLAMESTRIKE, Zone::Hand).unwrap();

    state.play(flamestrike, None, None).unwrap();
    assert_eq!(state.zone_of(a), Some(Zone::Graveyard));
    assert_eq!(state.zone_of(b), Some(Zone::Graveyard));
    // Each deathrattle saw a batch of two.
    assert_eq!(state.attribute(garrosh, GameTag::Armor), 4);
    assert_eq!(state.player(P0).minions_killed_this_turn, 2);
}

/// Deathrattles resolve after the batch is buried.
#[test]
fn test_deathrattles_draw_after_the_batch() {
    let (mut state, jaina, _) = board();
    for _ in 0..2 {
        state.new_card(P1, CHILLWIND_YETI, Zone::Deck).unwrap();
    }
    let h1 = state.new_card(P1, LOOT_HOARDER, Zone::Play).unwrap();
    let h2 = state.new_card(P1, LOOT_HOARDER, Zone::Play).unwrap();

    let buried = state.process_deaths().unwrap();
    assert!(buried.is_empty());

    state
        .queue_actions(jaina, &[Action::damage(Selector::EnemyMinions, 1)])
        .unwrap();
    assert_eq!(state.zone_of(h1), Some(Zone::Graveyard));
    assert_eq!(state.zone_of(h2), Some(Zone::Graveyard));
    assert_eq!(state.player(P1).hand.len(), 2);
    assert!(state.player(P1).deck.is_empty());
}

/// A secret reacts to an attack before combat; a dead attacker fizzles.
#[test]
fn test_secret_fires_on_the_opponents_turn() {
    let (mut state, jaina, garrosh) = board();
    let trap = state.new_card(P0, EXPLOSIVE_TRAP, Zone::Play).unwrap();
    assert_eq!(state.zone_of(trap), Some(Zone::Secret));

    state.set_current_player(P1);
    let wolfrider = state.new_card(P1, WOLFRIDER, Zone::Play).unwrap();
    state.attack(wolfrider, jaina).unwrap();

    assert_eq!(state.zone_of(trap), Some(Zone::Graveyard));
    assert_eq!(state.zone_of(wolfrider), Some(Zone::Graveyard));
    assert_eq!(state.health(garrosh), 28);
    assert_eq!(state.health(jaina), 30);
}

// =============================================================================
// Silence
// =============================================================================

/// Silence strips buffs, keywords and triggers but leaves the minion in play.
#[test]
fn test_silence_clears_everything_but_the_body() {
    let (mut state, jaina, _) = board();
    let juggler = state.new_card(P1, KNIFE_JUGGLER, Zone::Play).unwrap();
    let senjin = state.new_card(P1, SENJIN_SHIELDMASTA, Zone::Play).unwrap();
    state
        .queue_actions(jaina, &[Action::buff(Selector::Entity(juggler), KINGS_BUFF)])
        .unwrap();
    assert_eq!(state.atk(juggler), 6);
    assert_eq!(state.active_triggers(juggler).len(), 1);

    let owl = state.new_card(P0, IRONBEAK_OWL, Zone::Hand).unwrap();
    state.play(owl, Some(juggler), None).unwrap();
    assert_eq!(state.zone_of(juggler), Some(Zone::Play));
    assert_eq!(state.atk(juggler), 2);
    assert_eq!(state.health(juggler), 2);
    assert!(state.entity(juggler).unwrap().buffs.is_empty());
    assert!(state.active_triggers(juggler).is_empty());

    state
        .queue_actions(jaina, &[Action::silence(Selector::Entity(senjin))])
        .unwrap();
    assert!(!state.has(senjin, GameTag::Taunt));
}

// =============================================================================
// Drawing
// =============================================================================

/// Overdraw burns the card; an empty deck deals 1, 2, 3... fatigue.
#[test]
fn test_overdraw_and_fatigue() {
    let (mut state, jaina, _) = board();
    for _ in 0..10 {
        state.new_card(P0, WISP, Zone::Hand).unwrap();
    }
    let yeti = state.new_card(P0, CHILLWIND_YETI, Zone::Deck).unwrap();

    state.queue_actions(jaina, &[Action::draw(Selector::Controller, 1)]).unwrap();
    assert_eq!(state.zone_of(yeti), Some(Zone::Discard));
    assert!(state.player(P0).graveyard.is_empty());
    assert_eq!(state.player(P0).hand.len(), 10);

    state.queue_actions(jaina, &[Action::draw(Selector::Controller, 3)]).unwrap();
    assert_eq!(state.health(jaina), 24);
    assert_eq!(state.player(P0).fatigue_counter, 3);
}

// =============================================================================
// Auras
// =============================================================================

/// Newcomers join an aura without rerunning its source's scripts, and the
/// aura's buffs vanish with the source.
#[test]
fn test_aura_membership_is_live() {
    let (mut state, jaina, _) = board();
    let first = state.new_card(P0, WISP, Zone::Play).unwrap();
    let banner = state.new_card(P0, BANNER, Zone::Hand).unwrap();

    state.play(banner, None, None).unwrap();
    assert_eq!(state.player(P0).hand.len(), 1);
    assert_eq!(state.atk(first), 2);
    assert_eq!(state.atk(banner), 2);

    let result = state
        .queue_actions(jaina, &[Action::summon(Selector::Controller, WISP)])
        .unwrap();
    let second = result[0][0];
    assert_eq!(state.atk(second), 2);
    assert_eq!(state.player(P0).hand.len(), 1);
    assert_eq!(state.auras().len(), 1);

    state
        .queue_actions(jaina, &[Action::destroy(Selector::Entity(banner))])
        .unwrap();
    assert_eq!(state.zone_of(banner), Some(Zone::Graveyard));
    for wisp in [first, second] {
        assert_eq!(state.atk(wisp), 1);
        assert!(state.entity(wisp).unwrap().buffs.is_empty());
    }
}

/// Polymorph keeps the field position; the old minion is set aside.
#[test]
fn test_polymorph_in_place() {
    let (mut state, _, _) = board();
    let left = state.new_card(P1, WISP, Zone::Play).unwrap();
    let yeti = state.new_card(P1, CHILLWIND_YETI, Zone::Play).unwrap();
    let right = state.new_card(P1, WISP, Zone::Play).unwrap();
    let polymorph = state.new_card(P0, POLYMORPH, Zone::Hand).unwrap();

    state.play(polymorph, Some(yeti), None).unwrap();
    let field = &state.player(P1).field;
    assert_eq!(field.len(), 3);
    assert_eq!(field[0], left);
    assert_eq!(field[2], right);
    assert_eq!(state.entity(field[1]).unwrap().card_id, SHEEP);
    assert_eq!(state.zone_of(yeti), Some(Zone::SetAside));
}

// =============================================================================
// Equipment
// =============================================================================

/// A new weapon destroys the old one and takes the slot.
#[test]
fn test_weapon_replacement() {
    let (mut state, jaina, garrosh) = board();
    let old = state.new_card(P0, FIERY_WAR_AXE, Zone::Play).unwrap();
    assert_eq!(state.player(P0).weapon, Some(old));

    let new = state.new_card(P0, FIERY_WAR_AXE, Zone::Play).unwrap();
    assert_eq!(state.zone_of(old), Some(Zone::Graveyard));
    assert_eq!(state.player(P0).weapon, Some(new));

    assert_eq!(state.atk(jaina), 3);
    state.attack(jaina, garrosh).unwrap();
    assert_eq!(state.health(garrosh), 27);
    assert_eq!(state.health(new), 1);
}

/// Each summon provokes a juggle before the next action resolves.
#[test]
fn test_reactions_resolve_before_the_next_action() {
    let mut state = GameState::new(
        Arc::new(registry()),
        RulesConfig::default(),
        Box::new(ScriptedDecisions::new([0, 0])),
    )
    .unwrap();
    let jaina = state.new_card(P0, JAINA, Zone::Play).unwrap();
    let garrosh = state.new_card(P1, GARROSH, Zone::Play).unwrap();
    state.new_card(P0, KNIFE_JUGGLER, Zone::Play).unwrap();

    // The heal only has something to undo if the first juggle already hit.
    let results = state
        .queue_actions(
            jaina,
            &[
                Action::summon(Selector::Controller, WISP),
                Action::heal(Selector::Entity(garrosh), 1),
                Action::summon(Selector::Controller, WISP),
            ],
        )
        .unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[1].len(), 1);
    assert_eq!(state.health(garrosh), 29);
    assert_eq!(state.player(P0).field.len(), 3);
}
