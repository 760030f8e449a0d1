use crate::components::FighterInstance;

/// Decay stun and invincibility counters and progress the current attack.
///
/// A finished attack is cleared here, before input is read, so the fighter
/// can act again on the very frame its recovery runs out.
pub fn tick_timers(fighter: &mut FighterInstance) {
    fighter.hitstun_frames = fighter.hitstun_frames.saturating_sub(1);
    fighter.blockstun_frames = fighter.blockstun_frames.saturating_sub(1);
    fighter.invincibility_frames = fighter.invincibility_frames.saturating_sub(1);

    if let Some(attack) = fighter.attack.as_mut() {
        attack.elapsed_frames += 1;
        if attack.is_finished() {
            fighter.attack = None;
        }
    }
    fighter.refresh_state();
}
