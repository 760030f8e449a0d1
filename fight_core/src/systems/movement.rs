use crate::components::FighterInstance;
use crate::config::Config;
use crate::stage::Stage;

/// Integrate one frame of fighter physics
pub fn move_fighter(fighter: &mut FighterInstance, config: &Config, stage: &Stage) {
    if !fighter.on_ground {
        fighter.vel.y += config.gravity;
    }

    fighter.pos += fighter.vel;

    // Land
    if fighter.pos.y >= stage.ground_y {
        fighter.pos.y = stage.ground_y;
        fighter.vel.y = 0.0;
        fighter.on_ground = true;
    }

    fighter.pos.x = stage.clamp_x(fighter.pos.x);

    if !fighter.walking {
        fighter.vel.x *= config.friction;
    }

    fighter.refresh_state();
}
