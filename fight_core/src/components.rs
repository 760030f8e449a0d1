use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::input::InputHistory;
use crate::params::Params;
use crate::roster::{FighterArchetype, MoveDefinition, MoveKind};
use crate::stage::{Aabb, Stage};

/// Player slot - slot one starts on the left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    /// Player number as shown to users (1 or 2)
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(PlayerSlot::One),
            2 => Some(PlayerSlot::Two),
            _ => None,
        }
    }
}

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn from_sign(sign: f32) -> Self {
        if sign < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

/// Primary combat state; timers live in separate counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatState {
    #[default]
    Idle,
    Walking,
    Jumping,
    Attacking,
    Blocking,
    HitStun,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockStance {
    #[default]
    None,
    High,
    Low,
    /// Walking away from the opponent; blocks everything.
    Back,
}

/// Label handed to the renderer; no mechanical effect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayState {
    #[default]
    Idle,
    Walking,
    Jumping,
    Blocking,
    Attacking,
}

/// An attack that has been started and not yet recovered from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackInProgress {
    pub kind: MoveKind,
    pub definition: MoveDefinition,
    pub elapsed_frames: u32,
    pub startup_frames: u32,
    /// Grows when the attack is blocked.
    pub recovery_frames: u32,
    /// Set once the attack has hit or been blocked.
    pub connected: bool,
}

impl AttackInProgress {
    pub fn new(kind: MoveKind, definition: MoveDefinition) -> Self {
        Self {
            kind,
            definition,
            elapsed_frames: 0,
            startup_frames: definition.startup_frames,
            recovery_frames: definition.recovery_frames,
            connected: false,
        }
    }

    pub fn total_frames(&self) -> u32 {
        self.startup_frames + self.recovery_frames
    }

    /// Hitbox is live from the end of startup through recovery.
    pub fn is_active(&self) -> bool {
        self.elapsed_frames >= self.startup_frames && self.elapsed_frames < self.total_frames()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_frames >= self.total_frames()
    }
}

/// One combatant for the duration of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterInstance {
    pub archetype_id: String,
    pub slot: PlayerSlot,
    pub pos: Vec2, // feet position, y grows downward
    pub vel: Vec2,
    pub facing: Facing,
    pub on_ground: bool,
    pub health: u32,
    pub max_health: u32,
    pub state: CombatState,
    pub attack: Option<AttackInProgress>,
    pub hitstun_frames: u32,
    /// Locked in guard after blocking; independent of hitstun.
    pub blockstun_frames: u32,
    pub invincibility_frames: u32,
    pub block: BlockStance,
    pub walking: bool, // actively walking this frame (suppresses friction)
    pub combo: u32,
    pub display: DisplayState,
    pub animation_frame: u32,
    pub animation_timer_ms: f32,
    /// Recent input changes, read for special-move motions
    pub inputs: InputHistory,
}

impl FighterInstance {
    pub fn spawn(archetype: &FighterArchetype, slot: PlayerSlot, config: &Config, stage: &Stage) -> Self {
        Self {
            archetype_id: archetype.id.clone(),
            slot,
            pos: stage.spawn(slot),
            vel: Vec2::ZERO,
            facing: stage.spawn_facing(slot),
            on_ground: true,
            health: config.max_health,
            max_health: config.max_health,
            state: CombatState::Idle,
            attack: None,
            hitstun_frames: 0,
            blockstun_frames: 0,
            invincibility_frames: 0,
            block: BlockStance::None,
            walking: false,
            combo: 0,
            display: DisplayState::Idle,
            animation_frame: 0,
            animation_timer_ms: 0.0,
            inputs: InputHistory::new(),
        }
    }

    /// Back to spawn with full health and no combat state
    pub fn reset_for_round(&mut self, stage: &Stage) {
        self.pos = stage.spawn(self.slot);
        self.vel = Vec2::ZERO;
        self.facing = stage.spawn_facing(self.slot);
        self.on_ground = true;
        self.health = self.max_health;
        self.state = CombatState::Idle;
        self.attack = None;
        self.hitstun_frames = 0;
        self.blockstun_frames = 0;
        self.invincibility_frames = 0;
        self.block = BlockStance::None;
        self.walking = false;
        self.combo = 0;
        self.display = DisplayState::Idle;
        self.animation_frame = 0;
        self.animation_timer_ms = 0.0;
        self.inputs.clear();
    }

    pub fn is_attacking(&self) -> bool {
        self.attack.is_some()
    }

    pub fn is_blocking(&self) -> bool {
        self.block != BlockStance::None
    }

    pub fn is_knocked_out(&self) -> bool {
        self.health == 0
    }

    /// New input is accepted only when not stunned and not committed to an attack.
    pub fn can_act(&self) -> bool {
        self.hitstun_frames == 0 && self.blockstun_frames == 0 && self.attack.is_none()
    }

    /// Hurtbox: body rectangle standing on the feet position
    pub fn body(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.pos.x - Params::BODY_WIDTH / 2.0, self.pos.y - Params::BODY_HEIGHT),
            Vec2::new(self.pos.x + Params::BODY_WIDTH / 2.0, self.pos.y),
        )
    }

    /// World-space hitbox of the current attack, mirrored by facing
    pub fn attack_hitbox(&self) -> Option<Aabb> {
        let hitbox = self.attack.as_ref()?.definition.hitbox;
        let near_x = self.pos.x + self.facing.sign() * hitbox.offset_x;
        let min_x = match self.facing {
            Facing::Right => near_x,
            Facing::Left => near_x - hitbox.width,
        };
        Some(Aabb::from_min_size(
            Vec2::new(min_x, self.pos.y + hitbox.offset_y),
            Vec2::new(hitbox.width, hitbox.height),
        ))
    }

    /// Subtract damage, clamped at zero. Returns the health actually lost.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.health);
        self.health -= lost;
        lost
    }

    /// Recompute the primary state from the counters and flags.
    pub fn refresh_state(&mut self) {
        self.state = if self.hitstun_frames > 0 {
            CombatState::HitStun
        } else if self.attack.is_some() {
            CombatState::Attacking
        } else if self.is_blocking() {
            CombatState::Blocking
        } else if !self.on_ground {
            CombatState::Jumping
        } else if self.walking {
            CombatState::Walking
        } else {
            CombatState::Idle
        };
    }
}
