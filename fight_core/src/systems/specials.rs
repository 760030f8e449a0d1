use crate::components::FighterInstance;
use crate::config::Config;
use crate::input::Buttons;
use crate::resources::{FrameEvents, GameEvent};
use crate::roster::{FighterArchetype, MoveKind};
use crate::systems::controls::commit_attack;

/// Buffer this frame's buttons and start a special move when a motion completes.
///
/// Motions are buffered even while the fighter cannot act, but only a grounded
/// fighter that is free to act can start one. The attack press must land on
/// this frame. Returns whether a special started.
pub fn read_motions(
    fighter: &mut FighterInstance,
    buttons: Buttons,
    archetype: &FighterArchetype,
    config: &Config,
    now_ms: f64,
    events: &mut FrameEvents,
) -> bool {
    let pressed = fighter.inputs.record(buttons, now_ms);
    if !pressed || !fighter.can_act() || !fighter.on_ground {
        return false;
    }

    let Some(special) = archetype.special_for(
        &fighter.inputs,
        fighter.facing,
        now_ms,
        config.motion_window_ms as f64,
    ) else {
        return false;
    };

    tracing::debug!("{:?} starts special {}", fighter.slot, special.name);
    commit_attack(fighter, MoveKind::Special, special.definition);
    fighter.inputs.consume();
    events.push(GameEvent::SpecialStarted {
        fighter: fighter.slot,
        name: special.name.clone(),
    });
    true
}
