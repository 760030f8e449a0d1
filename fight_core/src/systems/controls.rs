use crate::components::{AttackInProgress, BlockStance, Facing, FighterInstance};
use crate::config::Config;
use crate::input::Buttons;
use crate::roster::{FighterArchetype, MoveDefinition, MoveKind};

/// Map held buttons to movement, blocking, jumping and attacks.
///
/// `opponent` is the opponent as it was at the start of the frame.
pub fn apply_controls(
    fighter: &mut FighterInstance,
    buttons: Buttons,
    opponent: &FighterInstance,
    archetype: &FighterArchetype,
    config: &Config,
) {
    fighter.walking = false;

    if !fighter.can_act() {
        fighter.refresh_state();
        return;
    }

    fighter.block = BlockStance::None;
    let dir = buttons.horizontal();

    if buttons.contains(Buttons::DOWN) {
        fighter.block = BlockStance::Low;
    } else if dir != 0 {
        walk(fighter, dir, opponent, config);
    } else if (opponent.pos.x - fighter.pos.x).abs() < config.auto_block_range
        && opponent.is_attacking()
    {
        fighter.block = BlockStance::High;
    }

    if buttons.contains(Buttons::UP) && fighter.on_ground {
        fighter.vel.y = config.jump_velocity;
        fighter.on_ground = false;
    }

    if buttons.intersects(Buttons::ATTACKS) {
        let kind = if fighter.on_ground {
            buttons.ground_attack()
        } else {
            Some(MoveKind::JumpPunch)
        };
        if let Some(kind) = kind {
            start_attack(fighter, archetype, kind);
        }
    }

    fighter.refresh_state();
}

fn walk(fighter: &mut FighterInstance, dir: i8, opponent: &FighterInstance, config: &Config) {
    let dir = dir as f32;
    fighter.vel.x = dir * config.walk_speed;
    fighter.walking = true;

    // Moving away while still facing the opponent
    let dx = opponent.pos.x - fighter.pos.x;
    let retreating = dir * dx < 0.0 && fighter.facing.sign() * dx > 0.0;
    if retreating {
        fighter.block = BlockStance::Back;
    } else {
        fighter.facing = Facing::from_sign(dir);
    }
}

/// Begin an attack if the archetype has the move. Returns whether it started.
pub fn start_attack(fighter: &mut FighterInstance, archetype: &FighterArchetype, kind: MoveKind) -> bool {
    if fighter.attack.is_some() {
        return false;
    }
    let Some(definition) = archetype.move_def(kind) else {
        tracing::debug!("{} has no {} move, ignoring", archetype.id, kind);
        return false;
    };

    tracing::debug!("{:?} starts {}", fighter.slot, kind);
    commit_attack(fighter, kind, *definition);
    true
}

pub(crate) fn commit_attack(fighter: &mut FighterInstance, kind: MoveKind, definition: MoveDefinition) {
    fighter.attack = Some(AttackInProgress::new(kind, definition));
    fighter.block = BlockStance::None;
    fighter.refresh_state();
}
