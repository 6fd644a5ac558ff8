//! A small classic card set.
//!
//! Enough content for demo games: spell damage, divine shield, enrage,
//! auras, deathrattles, targeted battlecries, secrets, weapons, overload
//! and freeze all appear at least once.

use crate::auras::AuraRule;
use crate::cards::{CardDefinition, CardId, CardRegistry, GameTag, PlayReq, TagModifier};
use crate::effects::{Action, Amount, EntityFilter, Selector};
use crate::triggers::{EventKind, Trigger, TriggerCondition};

// === Heroes ===
pub const JAINA: CardId = CardId::new(1);
pub const FIREBLAST: CardId = CardId::new(2);
pub const GARROSH: CardId = CardId::new(3);
pub const ARMOR_UP: CardId = CardId::new(4);

// === Minions ===
pub const WISP: CardId = CardId::new(100);
pub const ARGENT_SQUIRE: CardId = CardId::new(101);
pub const ABUSIVE_SERGEANT: CardId = CardId::new(102);
pub const AMANI_BERSERKER: CardId = CardId::new(103);
pub const KNIFE_JUGGLER: CardId = CardId::new(104);
pub const LOOT_HOARDER: CardId = CardId::new(105);
pub const KOBOLD_GEOMANCER: CardId = CardId::new(106);
pub const RAID_LEADER: CardId = CardId::new(107);
pub const WOLFRIDER: CardId = CardId::new(108);
pub const SHATTERED_SUN_CLERIC: CardId = CardId::new(109);
pub const IRONBEAK_OWL: CardId = CardId::new(110);
pub const CHILLWIND_YETI: CardId = CardId::new(111);
pub const SENJIN_SHIELDMASTA: CardId = CardId::new(112);
pub const SHEEP: CardId = CardId::new(113);

// === Spells ===
pub const ARCANE_MISSILES: CardId = CardId::new(200);
pub const LIGHTNING_BOLT: CardId = CardId::new(201);
pub const FROSTBOLT: CardId = CardId::new(202);
pub const EXPLOSIVE_TRAP: CardId = CardId::new(203);
pub const ARCANE_INTELLECT: CardId = CardId::new(204);
pub const FIREBALL: CardId = CardId::new(205);
pub const POLYMORPH: CardId = CardId::new(206);
pub const BLESSING_OF_KINGS: CardId = CardId::new(207);
pub const FLAMESTRIKE: CardId = CardId::new(208);

// === Weapons ===
pub const FIERY_WAR_AXE: CardId = CardId::new(300);

// === Enchantments ===
pub const ABUSIVE_BUFF: CardId = CardId::new(400);
pub const RAID_LEADER_AURA: CardId = CardId::new(401);
pub const CLERIC_BUFF: CardId = CardId::new(402);
pub const KINGS_BUFF: CardId = CardId::new(403);

/// Every card in the set.
#[must_use]
pub fn registry() -> CardRegistry {
    CardRegistry::new()
        .with_card(CardDefinition::hero(JAINA, "Jaina Proudmoore", 30).with_hero_power(FIREBLAST))
        .with_card(
            CardDefinition::hero_power(FIREBLAST, "Fireblast", 2)
                .with_requirement(PlayReq::TargetToPlay)
                .with_activate(vec![Action::damage(Selector::Target, 1)]),
        )
        .with_card(CardDefinition::hero(GARROSH, "Garrosh Hellscream", 30).with_hero_power(ARMOR_UP))
        .with_card(CardDefinition::hero_power(ARMOR_UP, "Armor Up!", 2).with_activate(vec![
            Action::GainArmor { targets: Selector::FriendlyHero, amount: Amount::Fixed(2) },
        ]))
        // Minions
        .with_card(CardDefinition::minion(WISP, "Wisp", 0, 1, 1))
        .with_card(
            CardDefinition::minion(ARGENT_SQUIRE, "Argent Squire", 1, 1, 1)
                .with_keyword(GameTag::DivineShield),
        )
        .with_card(
            CardDefinition::minion(ABUSIVE_SERGEANT, "Abusive Sergeant", 1, 1, 1)
                .with_keyword(GameTag::Battlecry)
                .with_requirement(PlayReq::TargetIfAvailable)
                .with_requirement(PlayReq::MinionTarget)
                .with_play(vec![Action::buff(Selector::Target, ABUSIVE_BUFF)]),
        )
        .with_card(
            CardDefinition::minion(AMANI_BERSERKER, "Amani Berserker", 2, 2, 3)
                .with_enrage(TagModifier::add(GameTag::Atk, 3)),
        )
        .with_card(
            CardDefinition::minion(KNIFE_JUGGLER, "Knife Juggler", 2, 2, 2).with_trigger(
                Trigger::new("juggle", EventKind::Summon)
                    .with_condition(
                        TriggerCondition::ForController
                            .and(TriggerCondition::SourceMatches(EntityFilter::NotSelf)),
                    )
                    .with_action(Action::damage(Selector::EnemyCharacters.random(1), 1)),
            ),
        )
        .with_card(
            CardDefinition::minion(LOOT_HOARDER, "Loot Hoarder", 2, 2, 1)
                .with_deathrattle(vec![Action::draw(Selector::Controller, 1)]),
        )
        .with_card(
            CardDefinition::minion(KOBOLD_GEOMANCER, "Kobold Geomancer", 2, 2, 2)
                .with_tag(GameTag::Spellpower, 1),
        )
        .with_card(
            CardDefinition::minion(RAID_LEADER, "Raid Leader", 3, 2, 2).with_aura(AuraRule::new(
                Selector::FriendlyMinions.filtered(EntityFilter::NotSelf),
                RAID_LEADER_AURA,
            )),
        )
        .with_card(
            CardDefinition::minion(WOLFRIDER, "Wolfrider", 3, 3, 1).with_keyword(GameTag::Charge),
        )
        .with_card(
            CardDefinition::minion(SHATTERED_SUN_CLERIC, "Shattered Sun Cleric", 3, 3, 2)
                .with_keyword(GameTag::Battlecry)
                .with_requirement(PlayReq::TargetIfAvailable)
                .with_requirement(PlayReq::MinionTarget)
                .with_requirement(PlayReq::FriendlyTarget)
                .with_play(vec![Action::buff(Selector::Target, CLERIC_BUFF)]),
        )
        .with_card(
            CardDefinition::minion(IRONBEAK_OWL, "Ironbeak Owl", 3, 2, 1)
                .with_keyword(GameTag::Battlecry)
                .with_requirement(PlayReq::TargetIfAvailable)
                .with_requirement(PlayReq::MinionTarget)
                .with_play(vec![Action::silence(Selector::Target)]),
        )
        .with_card(CardDefinition::minion(CHILLWIND_YETI, "Chillwind Yeti", 4, 4, 5))
        .with_card(
            CardDefinition::minion(SENJIN_SHIELDMASTA, "Sen'jin Shieldmasta", 4, 3, 5)
                .with_keyword(GameTag::Taunt),
        )
        .with_card(CardDefinition::minion(SHEEP, "Sheep", 1, 1, 1))
        // Spells
        .with_card(
            CardDefinition::spell(ARCANE_MISSILES, "Arcane Missiles", 1)
                .with_play(vec![Action::damage(Selector::EnemyCharacters.random(1), 1).times(3)]),
        )
        .with_card(
            CardDefinition::spell(LIGHTNING_BOLT, "Lightning Bolt", 1)
                .with_tag(GameTag::Overload, 1)
                .with_requirement(PlayReq::TargetToPlay)
                .with_play(vec![Action::damage(Selector::Target, 3)]),
        )
        .with_card(
            CardDefinition::spell(FROSTBOLT, "Frostbolt", 2)
                .with_requirement(PlayReq::TargetToPlay)
                .with_play(vec![
                    Action::damage(Selector::Target, 3),
                    Action::Freeze { targets: Selector::Target },
                ]),
        )
        .with_card(
            CardDefinition::spell(EXPLOSIVE_TRAP, "Explosive Trap", 2)
                .as_secret()
                .with_trigger(
                    Trigger::new("explosive trap", EventKind::Attack)
                        .with_condition(TriggerCondition::TargetMatches(EntityFilter::All(vec![
                            EntityFilter::Hero,
                            EntityFilter::Friendly,
                        ])))
                        .with_action(Action::Reveal { targets: Selector::SelfEntity })
                        .with_action(Action::damage(Selector::EnemyCharacters, 2)),
                ),
        )
        .with_card(
            CardDefinition::spell(ARCANE_INTELLECT, "Arcane Intellect", 3)
                .with_play(vec![Action::draw(Selector::Controller, 2)]),
        )
        .with_card(
            CardDefinition::spell(FIREBALL, "Fireball", 4)
                .with_requirement(PlayReq::TargetToPlay)
                .with_play(vec![Action::damage(Selector::Target, 6)]),
        )
        .with_card(
            CardDefinition::spell(POLYMORPH, "Polymorph", 4)
                .with_requirement(PlayReq::TargetToPlay)
                .with_requirement(PlayReq::MinionTarget)
                .with_play(vec![Action::morph(Selector::Target, SHEEP)]),
        )
        .with_card(
            CardDefinition::spell(BLESSING_OF_KINGS, "Blessing of Kings", 4)
                .with_requirement(PlayReq::TargetToPlay)
                .with_requirement(PlayReq::MinionTarget)
                .with_play(vec![Action::buff(Selector::Target, KINGS_BUFF)]),
        )
        .with_card(
            CardDefinition::spell(FLAMESTRIKE, "Flamestrike", 7)
                .with_play(vec![Action::damage(Selector::EnemyMinions, 4)]),
        )
        .with_card(CardDefinition::weapon(FIERY_WAR_AXE, "Fiery War Axe", 2, 3, 2))
        // Enchantments
        .with_card(
            CardDefinition::enchantment(ABUSIVE_BUFF, "Inspired")
                .with_modifier(TagModifier::add(GameTag::Atk, 2))
                .for_one_turn(),
        )
        .with_card(
            CardDefinition::enchantment(RAID_LEADER_AURA, "Raid Leader")
                .with_modifier(TagModifier::add(GameTag::Atk, 1)),
        )
        .with_card(
            CardDefinition::enchantment(CLERIC_BUFF, "Hand of the Sun")
                .with_modifier(TagModifier::add(GameTag::Atk, 1))
                .with_modifier(TagModifier::add(GameTag::MaxHealth, 1)),
        )
        .with_card(
            CardDefinition::enchantment(KINGS_BUFF, "Blessing of Kings")
                .with_modifier(TagModifier::add(GameTag::Atk, 4))
                .with_modifier(TagModifier::add(GameTag::MaxHealth, 4)),
        )
}
