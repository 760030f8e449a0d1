pub mod components;
pub mod config;
pub mod director;
pub mod error;
pub mod game;
pub mod input;
pub mod params;
pub mod resources;
pub mod roster;
pub mod stage;
pub mod systems;

pub use components::*;
pub use config::*;
pub use director::*;
pub use error::*;
pub use game::*;
pub use input::*;
pub use params::*;
pub use resources::*;
pub use roster::*;
pub use stage::*;

use systems::*;

/// Run one deterministic combat frame for both fighters
pub fn step(
    fighters: &mut [FighterInstance; 2],
    archetypes: &[FighterArchetype; 2],
    input: &InputSnapshot,
    config: &Config,
    stage: &Stage,
    time: &Time,
    events: &mut FrameEvents,
) {
    // Both fighters read the opponent as it was before this frame
    let before = fighters.clone();

    for slot in PlayerSlot::ALL {
        let i = slot.index();
        let fighter = &mut fighters[i];

        // 1-2. Timers and attack progression
        tick_timers(fighter);

        // Input buffer; a completed motion starts a special move
        read_motions(
            fighter,
            input.get(slot),
            &archetypes[i],
            config,
            time.now_ms,
            events,
        );

        // 3-4. Gated input
        apply_controls(
            fighter,
            input.get(slot),
            &before[slot.opponent().index()],
            &archetypes[i],
            config,
        );

        // 5. Physics
        move_fighter(fighter, config, stage);
    }

    // Hit resolution on post-movement positions
    resolve_collisions(fighters, config, events);

    // 6. Presentation labels
    for fighter in fighters.iter_mut() {
        animate(fighter, time.dt_ms);
    }
}
