use rand::Rng;

use crate::components::{FighterInstance, PlayerSlot};
use crate::input::Buttons;
use crate::params::Params;
use crate::resources::GameRng;

/// What the CPU is currently committed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuAction {
    Idle,
    Approach,
    Retreat,
    Block,
    /// Pressed for a single frame.
    Attack(Buttons),
    /// Pressed for a single frame.
    Jump,
}

/// Simple arcade opponent driving one slot
#[derive(Debug)]
pub struct CpuController {
    pub slot: PlayerSlot,
    action: CpuAction,
    decision_timer_ms: f32,
    rng: GameRng,
}

impl CpuController {
    pub fn new(slot: PlayerSlot, rng: GameRng) -> Self {
        Self {
            slot,
            action: CpuAction::Idle,
            decision_timer_ms: 0.0,
            rng,
        }
    }

    pub fn action(&self) -> CpuAction {
        self.action
    }

    /// Buttons to hold this frame.
    pub fn update(&mut self, me: &FighterInstance, opponent: &FighterInstance, dt_ms: f32) -> Buttons {
        self.decision_timer_ms -= dt_ms;
        if self.decision_timer_ms <= 0.0 {
            self.decide(me, opponent);
        }

        let toward = if opponent.pos.x < me.pos.x {
            Buttons::LEFT
        } else {
            Buttons::RIGHT
        };
        let away = if toward == Buttons::LEFT {
            Buttons::RIGHT
        } else {
            Buttons::LEFT
        };

        match self.action {
            CpuAction::Idle => Buttons::empty(),
            CpuAction::Approach => toward,
            CpuAction::Retreat => away,
            CpuAction::Block => Buttons::DOWN,
            CpuAction::Attack(button) => {
                self.action = CpuAction::Idle;
                button
            }
            CpuAction::Jump => {
                self.action = CpuAction::Idle;
                Buttons::UP | toward
            }
        }
    }

    fn decide(&mut self, me: &FighterInstance, opponent: &FighterInstance) {
        let distance = (opponent.pos.x - me.pos.x).abs();
        let rng = &mut self.rng.0;

        self.action = if distance > Params::CPU_APPROACH_RANGE {
            CpuAction::Approach
        } else if distance < Params::CPU_CLOSE_RANGE {
            if rng.gen_bool(Params::CPU_ATTACK_CHANCE) {
                let button = match rng.gen_range(0..3) {
                    0 => Buttons::LIGHT_PUNCH,
                    1 => Buttons::HEAVY_PUNCH,
                    _ => Buttons::KICK,
                };
                CpuAction::Attack(button)
            } else if rng.gen_bool(Params::CPU_BLOCK_CHANCE) {
                CpuAction::Block
            } else {
                CpuAction::Retreat
            }
        } else if rng.gen_bool(Params::CPU_JUMP_CHANCE) {
            CpuAction::Jump
        } else {
            CpuAction::Idle
        };

        self.decision_timer_ms =
            Params::CPU_DECISION_MIN_MS + rng.gen::<f32>() * Params::CPU_DECISION_SPREAD_MS;
        tracing::trace!("cpu {:?} decided {:?} at distance {}", self.slot, self.action, distance);
    }
}
