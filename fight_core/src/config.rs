use crate::error::ConfigurationError;
use crate::params::Params;

/// Match configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_health: u32,
    pub walk_speed: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub friction: f32,
    pub hitstun_frames: u32,
    pub block_pushback: f32,
    pub block_recovery_penalty: u32,
    pub auto_block_range: f32,
    pub low_attack_offset_y: f32,
    /// Frames of invincibility granted to a fighter after taking a hit.
    pub hit_invincibility_frames: u32,
    /// Frames a fighter stays locked in its guard after blocking.
    pub blockstun_frames: u32,
    /// A special-move motion must be completed within this many milliseconds.
    pub motion_window_ms: f32,
    /// An attack may connect (hit or be blocked) only once.
    pub single_hit_per_attack: bool,
    pub max_rounds: u32,
    pub round_time: u32,
    pub sudden_death_time: u32,
    /// Frozen frames between a round reset and the fight resuming.
    pub pre_round_frames: u32,
    /// Frozen frames after a round ends before the next one is set up.
    pub round_over_frames: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_health: Params::MAX_HEALTH,
            walk_speed: Params::WALK_SPEED,
            jump_velocity: Params::JUMP_VELOCITY,
            gravity: Params::GRAVITY,
            friction: Params::FRICTION,
            hitstun_frames: Params::HITSTUN_FRAMES,
            block_pushback: Params::BLOCK_PUSHBACK,
            block_recovery_penalty: Params::BLOCK_RECOVERY_PENALTY,
            auto_block_range: Params::AUTO_BLOCK_RANGE,
            low_attack_offset_y: Params::LOW_ATTACK_OFFSET_Y,
            hit_invincibility_frames: 0,
            blockstun_frames: 0,
            motion_window_ms: Params::MOTION_WINDOW_MS,
            single_hit_per_attack: true,
            max_rounds: Params::MAX_ROUNDS,
            round_time: Params::ROUND_TIME,
            sudden_death_time: Params::SUDDEN_DEATH_TIME,
            pre_round_frames: 0,
            round_over_frames: 0,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Round wins needed to take the match: ceil(max_rounds / 2)
    pub fn wins_needed(&self) -> u32 {
        self.max_rounds.div_ceil(2)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.max_rounds == 0 {
            return Err(ConfigurationError::InvalidConfig("max_rounds must be at least 1"));
        }
        if self.round_time == 0 || self.sudden_death_time == 0 {
            return Err(ConfigurationError::InvalidConfig("round timers must be non-zero"));
        }
        if self.max_health == 0 {
            return Err(ConfigurationError::InvalidConfig("max_health must be non-zero"));
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(ConfigurationError::InvalidConfig("friction must be within (0, 1]"));
        }
        if !(self.motion_window_ms > 0.0) {
            return Err(ConfigurationError::InvalidConfig("motion_window_ms must be positive"));
        }
        if self.gravity < 0.0 {
            return Err(ConfigurationError::InvalidConfig("gravity must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_wins_needed() {
        let mut config = Config::new();
        assert_eq!(config.wins_needed(), 2, "Best of three needs two wins");
        config.max_rounds = 5;
        assert_eq!(config.wins_needed(), 3);
        config.max_rounds = 1;
        assert_eq!(config.wins_needed(), 1);
        config.max_rounds = 4;
        assert_eq!(config.wins_needed(), 2);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::new().validate().is_ok());
    }

    #[test]
    fn test_config_rejects_zero_rounds() {
        let config = Config {
            max_rounds: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_rejects_bad_friction() {
        let config = Config {
            friction: 1.5,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "max_rounds": 5 }"#).unwrap();
        assert_eq!(config.max_rounds, 5);
        assert_eq!(config.round_time, Params::ROUND_TIME);
        assert!(config.single_hit_per_attack);
        assert_eq!(config.blockstun_frames, 0);
    }

    #[test]
    fn test_config_rejects_empty_motion_window() {
        let config = Config {
            motion_window_ms: 0.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
