use crate::components::{DisplayState, FighterInstance};
use crate::params::Params;

/// Walking is only shown above this horizontal speed
const WALK_DISPLAY_SPEED: f32 = 1.0;

/// Derive the renderer label and advance the animation frame.
///
/// `dt_ms` is the already-clamped wall-clock delta.
pub fn animate(fighter: &mut FighterInstance, dt_ms: f32) {
    let display = if fighter.is_attacking() {
        DisplayState::Attacking
    } else if !fighter.on_ground {
        DisplayState::Jumping
    } else if fighter.vel.x.abs() > WALK_DISPLAY_SPEED {
        DisplayState::Walking
    } else if fighter.is_blocking() {
        DisplayState::Blocking
    } else {
        DisplayState::Idle
    };

    if display != fighter.display {
        fighter.display = display;
        fighter.animation_frame = 0;
        fighter.animation_timer_ms = 0.0;
    }

    fighter.animation_timer_ms += dt_ms;
    while fighter.animation_timer_ms >= Params::ANIMATION_FRAME_MS {
        fighter.animation_timer_ms -= Params::ANIMATION_FRAME_MS;
        fighter.animation_frame = fighter.animation_frame.wrapping_add(1);
    }
}
