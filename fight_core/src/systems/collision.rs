use glam::Vec2;

use crate::components::{BlockStance, FighterInstance};
use crate::config::Config;
use crate::params::Params;
use crate::resources::{FrameEvents, GameEvent};
use crate::roster::{AttackCategory, MoveKind};

/// Result of one attacker's hitbox against one defender
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    None,
    Hit {
        kind: MoveKind,
        damage: u32,
        /// Horizontal velocity given to the defender
        knockback: f32,
        /// Defender was still reeling from an earlier hit
        extends_combo: bool,
        position: Vec2,
    },
    Blocked {
        kind: MoveKind,
        pushback: f32,
        position: Vec2,
    },
}

/// Resolve an attack from snapshots. Pure: nothing is mutated.
pub fn resolve_attack(attacker: &FighterInstance, defender: &FighterInstance, config: &Config) -> HitOutcome {
    let Some(attack) = attacker.attack.as_ref() else {
        return HitOutcome::None;
    };
    if !attack.is_active() || (config.single_hit_per_attack && attack.connected) {
        return HitOutcome::None;
    }
    if defender.invincibility_frames > 0 {
        return HitOutcome::None;
    }

    let Some(hitbox) = attacker.attack_hitbox() else {
        return HitOutcome::None;
    };
    if !hitbox.overlaps(&defender.body()) {
        return HitOutcome::None;
    }

    let position = defender.pos - Vec2::new(0.0, Params::HIT_EFFECT_RISE);
    let height = attack.definition.attack_height(config.low_attack_offset_y);
    let blocked = match defender.block {
        BlockStance::None => false,
        BlockStance::High => height == AttackCategory::High,
        BlockStance::Low => height == AttackCategory::Low,
        BlockStance::Back => true,
    };

    let facing = attacker.facing.sign();
    if blocked {
        HitOutcome::Blocked {
            kind: attack.kind,
            pushback: facing * config.block_pushback,
            position,
        }
    } else {
        let damage = attack.definition.damage;
        HitOutcome::Hit {
            kind: attack.kind,
            damage,
            knockback: facing * damage as f32 / 2.0,
            extends_combo: defender.hitstun_frames > 0,
            position,
        }
    }
}

/// Apply a resolved outcome to both fighters and record the event.
pub fn apply_outcome(
    outcome: HitOutcome,
    attacker: &mut FighterInstance,
    defender: &mut FighterInstance,
    config: &Config,
    events: &mut FrameEvents,
) {
    match outcome {
        HitOutcome::None => {}
        HitOutcome::Hit {
            kind,
            damage,
            knockback,
            extends_combo,
            position,
        } => {
            if let Some(attack) = attacker.attack.as_mut() {
                attack.connected = true;
            }
            attacker.combo = if extends_combo { attacker.combo + 1 } else { 1 };

            let lost = defender.apply_damage(damage);
            defender.hitstun_frames = config.hitstun_frames;
            defender.invincibility_frames = config.hit_invincibility_frames;
            defender.vel.x = knockback;
            defender.block = BlockStance::None;
            defender.refresh_state();

            tracing::debug!(
                "{:?} hit {:?} with {} for {} (health {})",
                attacker.slot,
                defender.slot,
                kind,
                lost,
                defender.health
            );
            events.push(GameEvent::HitLanded {
                attacker: attacker.slot,
                defender: defender.slot,
                kind,
                damage,
                combo: attacker.combo,
                position,
            });
        }
        HitOutcome::Blocked {
            kind,
            pushback,
            position,
        } => {
            if let Some(attack) = attacker.attack.as_mut() {
                attack.connected = true;
                attack.recovery_frames += config.block_recovery_penalty;
            }
            defender.vel.x += pushback;
            defender.blockstun_frames = config.blockstun_frames;
            defender.refresh_state();

            tracing::debug!("{:?} blocked {} from {:?}", defender.slot, kind, attacker.slot);
            events.push(GameEvent::AttackBlocked {
                attacker: attacker.slot,
                defender: defender.slot,
                kind,
                position,
            });
        }
    }
}

/// Resolve both directions from the same post-movement snapshots, then apply.
pub fn resolve_collisions(fighters: &mut [FighterInstance; 2], config: &Config, events: &mut FrameEvents) {
    let first = resolve_attack(&fighters[0], &fighters[1], config);
    let second = resolve_attack(&fighters[1], &fighters[0], config);

    let [one, two] = fighters;
    apply_outcome(first, one, two, config, events);
    apply_outcome(second, two, one, config, events);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{AttackInProgress, CombatState, Facing, PlayerSlot};
    use crate::roster::Roster;
    use crate::stage::Stage;

    fn pair(one_id: &str, two_id: &str, gap: f32) -> (Roster, [FighterInstance; 2]) {
        let roster = Roster::builtin();
        let config = Config::new();
        let stage = Stage::new();
        let one = FighterInstance::spawn(
            roster.archetype_by_id(one_id).unwrap(),
            PlayerSlot::One,
            &config,
            &stage,
        );
        let mut two = FighterInstance::spawn(
            roster.archetype_by_id(two_id).unwrap(),
            PlayerSlot::Two,
            &config,
            &stage,
        );
        two.pos.x = one.pos.x + gap;
        (roster, [one, two])
    }

    fn active_attack(roster: &Roster, fighter: &mut FighterInstance, id: &str, kind: MoveKind) {
        let def = *roster.archetype_by_id(id).unwrap().move_def(kind).unwrap();
        let mut attack = AttackInProgress::new(kind, def);
        attack.elapsed_frames = def.startup_frames;
        fighter.attack = Some(attack);
    }

    #[test]
    fn test_light_punch_hits_open_defender() {
        let (roster, [mut one, mut two]) = pair("razor", "blaze", 50.0);
        active_attack(&roster, &mut one, "razor", MoveKind::LightPunch);
        let config = Config::new();

        let outcome = resolve_attack(&one, &two, &config);
        assert!(matches!(outcome, HitOutcome::Hit { damage: 8, .. }));

        let mut events = FrameEvents::new();
        apply_outcome(outcome, &mut one, &mut two, &config, &mut events);
        assert_eq!(two.health, 92);
        assert_eq!(two.hitstun_frames, 15);
        assert_eq!(two.vel.x, 4.0, "Knockback is damage / 2 in the attacker's facing");
        assert_eq!(one.combo, 1);
        assert_eq!(
            events.as_slice(),
            &[GameEvent::HitLanded {
                attacker: PlayerSlot::One,
                defender: PlayerSlot::Two,
                kind: MoveKind::LightPunch,
                damage: 8,
                combo: 1,
                position: Vec2::new(250.0, 400.0),
            }]
        );
    }

    #[test]
    fn test_startup_frames_do_not_hit() {
        let (roster, [mut one, two]) = pair("razor", "blaze", 50.0);
        active_attack(&roster, &mut one, "razor", MoveKind::LightPunch);
        if let Some(attack) = one.attack.as_mut() {
            attack.elapsed_frames = 2;
        }
        assert_eq!(resolve_attack(&one, &two, &Config::new()), HitOutcome::None);
    }

    #[test]
    fn test_out_of_range_misses() {
        let (roster, [mut one, two]) = pair("razor", "blaze", 120.0);
        active_attack(&roster, &mut one, "razor", MoveKind::LightPunch);
        assert_eq!(resolve_attack(&one, &two, &Config::new()), HitOutcome::None);
    }

    #[test]
    fn test_high_block_stops_high_attack() {
        let (roster, [mut one, mut two]) = pair("razor", "blaze", 50.0);
        active_attack(&roster, &mut one, "razor", MoveKind::LightPunch);
        two.block = BlockStance::High;
        let config = Config::new();

        let outcome = resolve_attack(&one, &two, &config);
        assert!(matches!(outcome, HitOutcome::Blocked { .. }));

        let mut events = FrameEvents::new();
        apply_outcome(outcome, &mut one, &mut two, &config, &mut events);
        assert_eq!(two.health, 100);
        assert_eq!(two.vel.x, 2.0);
        assert_eq!(one.attack.unwrap().recovery_frames, 8 + 3);
        assert!(events.any(|e| matches!(e, GameEvent::AttackBlocked { .. })));
    }

    #[test]
    fn test_high_block_loses_to_kick() {
        let (roster, [mut one, mut two]) = pair("razor", "blaze", 50.0);
        active_attack(&roster, &mut one, "razor", MoveKind::Kick);
        two.block = BlockStance::High;
        assert!(matches!(
            resolve_attack(&one, &two, &Config::new()),
            HitOutcome::Hit { damage: 12, .. }
        ));

        two.block = BlockStance::Low;
        assert!(matches!(
            resolve_attack(&one, &two, &Config::new()),
            HitOutcome::Blocked { .. }
        ));
    }

    #[test]
    fn test_back_block_stops_everything() {
        let (roster, [mut one, mut two]) = pair("razor", "blaze", 50.0);
        two.block = BlockStance::Back;
        for kind in [MoveKind::LightPunch, MoveKind::Kick] {
            active_attack(&roster, &mut one, "razor", kind);
            assert!(matches!(
                resolve_attack(&one, &two, &Config::new()),
                HitOutcome::Blocked { .. }
            ));
        }
    }

    #[test]
    fn test_invincible_defender_is_skipped() {
        let (roster, [mut one, mut two]) = pair("razor", "blaze", 50.0);
        active_attack(&roster, &mut one, "razor", MoveKind::LightPunch);
        two.invincibility_frames = 1;
        assert_eq!(resolve_attack(&one, &two, &Config::new()), HitOutcome::None);
    }

    #[test]
    fn test_attack_connects_once() {
        let (roster, [mut one, mut two]) = pair("razor", "blaze", 50.0);
        active_attack(&roster, &mut one, "razor", MoveKind::LightPunch);
        let config = Config::new();
        let mut events = FrameEvents::new();

        let outcome = resolve_attack(&one, &two, &config);
        apply_outcome(outcome, &mut one, &mut two, &config, &mut events);
        assert_eq!(resolve_attack(&one, &two, &config), HitOutcome::None);

        let multi = Config {
            single_hit_per_attack: false,
            ..Config::new()
        };
        assert!(matches!(resolve_attack(&one, &two, &multi), HitOutcome::Hit { .. }));
    }

    #[test]
    fn test_combo_extends_during_hitstun() {
        let (roster, [mut one, mut two]) = pair("razor", "blaze", 50.0);
        let config = Config::new();
        let mut events = FrameEvents::new();

        active_attack(&roster, &mut one, "razor", MoveKind::LightPunch);
        let outcome = resolve_attack(&one, &two, &config);
        apply_outcome(outcome, &mut one, &mut two, &config, &mut events);

        active_attack(&roster, &mut one, "razor", MoveKind::HeavyPunch);
        let outcome = resolve_attack(&one, &two, &config);
        apply_outcome(outcome, &mut one, &mut two, &config, &mut events);
        assert_eq!(one.combo, 2);
        assert_eq!(two.health, 100 - 8 - 15);
    }

    #[test]
    fn test_left_facing_attacker_hits_left() {
        let (roster, [mut one, mut two]) = pair("razor", "blaze", 50.0);
        active_attack(&roster, &mut two, "blaze", MoveKind::LightPunch);
        assert_eq!(two.facing, Facing::Left);
        let outcome = resolve_attack(&two, &one, &Config::new());
        assert!(matches!(outcome, HitOutcome::Hit { knockback, .. } if knockback == -5.0));

        one.pos.x = two.pos.x + 50.0;
        assert_eq!(resolve_attack(&two, &one, &Config::new()), HitOutcome::None);
    }

    #[test]
    fn test_simultaneous_hits_both_land() {
        let (roster, mut fighters) = pair("razor", "blaze", 50.0);
        active_attack(&roster, &mut fighters[0], "razor", MoveKind::LightPunch);
        active_attack(&roster, &mut fighters[1], "blaze", MoveKind::LightPunch);
        let mut events = FrameEvents::new();
        resolve_collisions(&mut fighters, &Config::new(), &mut events);
        assert_eq!(fighters[0].health, 90);
        assert_eq!(fighters[1].health, 92);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_hit_grants_invincibility_window() {
        let (roster, [mut one, mut two]) = pair("razor", "blaze", 50.0);
        let config = Config {
            hit_invincibility_frames: 5,
            ..Config::new()
        };
        let mut events = FrameEvents::new();

        active_attack(&roster, &mut one, "razor", MoveKind::LightPunch);
        let outcome = resolve_attack(&one, &two, &config);
        apply_outcome(outcome, &mut one, &mut two, &config, &mut events);
        assert_eq!(two.health, 92);
        assert_eq!(two.invincibility_frames, 5);

        active_attack(&roster, &mut one, "razor", MoveKind::HeavyPunch);
        for _ in 0..4 {
            crate::systems::tick_timers(&mut two);
            assert_eq!(resolve_attack(&one, &two, &config), HitOutcome::None);
        }
        assert_eq!(two.invincibility_frames, 1);

        crate::systems::tick_timers(&mut two);
        assert!(
            matches!(resolve_attack(&one, &two, &config), HitOutcome::Hit { damage: 15, .. }),
            "Hittable again once the window closes"
        );
    }

    #[test]
    fn test_block_applies_blockstun() {
        let (roster, [mut one, mut two]) = pair("razor", "blaze", 50.0);
        active_attack(&roster, &mut one, "razor", MoveKind::LightPunch);
        two.block = BlockStance::High;
        let config = Config {
            blockstun_frames: 4,
            ..Config::new()
        };

        let outcome = resolve_attack(&one, &two, &config);
        let mut events = FrameEvents::new();
        apply_outcome(outcome, &mut one, &mut two, &config, &mut events);
        assert_eq!(two.blockstun_frames, 4);
        assert_eq!(two.hitstun_frames, 0, "Blocking never causes hitstun");
        assert!(!two.can_act());
        assert_eq!(two.state, CombatState::Blocking);
    }
}
