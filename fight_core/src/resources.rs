use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::PlayerSlot;
use crate::params::Params;
use crate::roster::MoveKind;

/// Frame timing handed in by the host
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt_ms: f32,  // Wall-clock delta for this frame
    pub now_ms: f64, // Total elapsed time
}

impl Time {
    pub fn new(dt_ms: f32, now_ms: f64) -> Self {
        Self { dt_ms, now_ms }
    }

    /// Advance by a host delta, clamped to prevent large jumps
    pub fn advance(&mut self, delta_ms: f32) {
        self.dt_ms = delta_ms.clamp(0.0, Params::MAX_FRAME_DELTA_MS);
        self.now_ms += self.dt_ms as f64;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self {
            dt_ms: 1000.0 / 60.0,
            now_ms: 0.0,
        }
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    /// Seed from the OS. Browser hosts need the `wasm` feature.
    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::from_entropy())
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

impl std::fmt::Debug for GameRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GameRng")
    }
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEndReason {
    Knockout,
    Timeout,
    /// Both fighters dropped to zero on the same frame.
    DoubleKnockout,
}

/// Outcome notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted {
        round: u32,
    },
    SpecialStarted {
        fighter: PlayerSlot,
        name: String,
    },
    HitLanded {
        attacker: PlayerSlot,
        defender: PlayerSlot,
        kind: MoveKind,
        damage: u32,
        combo: u32,
        position: Vec2,
    },
    AttackBlocked {
        attacker: PlayerSlot,
        defender: PlayerSlot,
        kind: MoveKind,
        position: Vec2,
    },
    Knockout {
        winner: PlayerSlot,
        loser: PlayerSlot,
    },
    SuddenDeath {
        round: u32,
        round_timer: u32,
    },
    RoundEnded {
        round: u32,
        winner: Option<PlayerSlot>,
        reason: RoundEndReason,
    },
    MatchEnded {
        winner: PlayerSlot,
    },
}

/// Events that occurred during one call into the core
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameEvents {
    events: Vec<GameEvent>,
}

impl FrameEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, other: FrameEvents) {
        self.events.extend(other.events);
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn contains(&self, event: &GameEvent) -> bool {
        self.events.contains(event)
    }

    pub fn any(&self, pred: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.iter().any(pred)
    }
}

impl IntoIterator for FrameEvents {
    type Item = GameEvent;
    type IntoIter = std::vec::IntoIter<GameEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

/// Host-owned periodic callback driving `Match::advance_round_timer`.
///
/// The core never schedules anything itself: it arms the clock when a round
/// goes live and disarms it when the round stops, so a host interval is never
/// left running twice.
pub trait RoundClock {
    fn arm(&mut self, period_ms: u32);
    fn disarm(&mut self);
}

/// Clock for hosts that drive the round timer manually
#[derive(Debug, Clone, Copy, Default)]
pub struct NullClock;

impl RoundClock for NullClock {
    fn arm(&mut self, _period_ms: u32) {}
    fn disarm(&mut self) {}
}

/// Turns frame deltas into whole-second ticks
#[derive(Debug, Clone, Copy)]
pub struct SecondTicker {
    period_ms: f32,
    accumulator_ms: f32,
}

impl SecondTicker {
    /// `None` unless `period_ms` is a positive, finite duration.
    pub fn new(period_ms: f32) -> Option<Self> {
        if !(period_ms.is_finite() && period_ms > 0.0) {
            return None;
        }
        Some(Self {
            period_ms,
            accumulator_ms: 0.0,
        })
    }

    /// Add frame time. Returns the number of ticks that elapsed.
    pub fn accumulate(&mut self, delta_ms: f32) -> u32 {
        self.accumulator_ms += delta_ms.max(0.0);
        let ticks = (self.accumulator_ms / self.period_ms) as u32;
        self.accumulator_ms -= ticks as f32 * self.period_ms;
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
    }
}

impl Default for SecondTicker {
    fn default() -> Self {
        Self {
            period_ms: Params::ROUND_TIMER_PERIOD_MS as f32,
            accumulator_ms: 0.0,
        }
    }
}
