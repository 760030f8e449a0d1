/// Combat tuning parameters
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Stage (y grows downward, fighters stand on GROUND_Y)
    pub const GROUND_Y: f32 = 450.0;
    pub const STAGE_MIN_X: f32 = 50.0;
    pub const STAGE_MAX_X: f32 = 1150.0;
    pub const SPAWN_X_ONE: f32 = 200.0;
    pub const SPAWN_X_TWO: f32 = 1000.0;

    // Fighter body
    pub const BODY_WIDTH: f32 = 60.0;
    pub const BODY_HEIGHT: f32 = 100.0;
    pub const MAX_HEALTH: u32 = 100;

    // Movement (per frame)
    pub const WALK_SPEED: f32 = 3.0;
    pub const JUMP_VELOCITY: f32 = -15.0;
    pub const GRAVITY: f32 = 0.8;
    pub const FRICTION: f32 = 0.85;

    // Combat
    pub const HITSTUN_FRAMES: u32 = 15;
    pub const BLOCK_PUSHBACK: f32 = 2.0;
    pub const BLOCK_RECOVERY_PENALTY: u32 = 3;
    pub const AUTO_BLOCK_RANGE: f32 = 100.0;
    pub const LOW_ATTACK_OFFSET_Y: f32 = -10.0;
    pub const HIT_EFFECT_RISE: f32 = 50.0;

    // Rounds
    pub const MAX_ROUNDS: u32 = 3;
    pub const ROUND_TIME: u32 = 99;
    pub const SUDDEN_DEATH_TIME: u32 = 30;
    pub const ROUND_TIMER_PERIOD_MS: u32 = 1000;

    // Presentation clocks
    pub const ANIMATION_FRAME_MS: f32 = 100.0;
    pub const MAX_FRAME_DELTA_MS: f32 = 250.0;
    pub const INPUT_HISTORY_LEN: usize = 10;
    pub const MOTION_WINDOW_MS: f32 = 500.0;

    // CPU opponent
    pub const CPU_APPROACH_RANGE: f32 = 150.0;
    pub const CPU_CLOSE_RANGE: f32 = 80.0;
    pub const CPU_DECISION_MIN_MS: f32 = 500.0;
    pub const CPU_DECISION_SPREAD_MS: f32 = 1000.0;
    pub const CPU_ATTACK_CHANCE: f64 = 0.4;
    pub const CPU_BLOCK_CHANCE: f64 = 0.6;
    pub const CPU_JUMP_CHANCE: f64 = 0.3;
}
