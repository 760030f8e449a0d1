//! Round/match state machine.
//!
//! Manages phase transitions and the round-win bookkeeping. The [`Match`]
//! handle drives it from frames and round timer ticks.
//!
//! [`Match`]: crate::game::Match

use serde::{Deserialize, Serialize};

use crate::components::PlayerSlot;
use crate::config::Config;

/// Match phases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    PreRound,
    InRound,
    RoundOver,
    MatchOver,
}

/// Actions that trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorAction {
    BeginRound,
    EndRound,
    NextRound,
    DecideMatch,
    Rematch,
}

impl MatchPhase {
    /// Next phase for an action, or `None` if the action is not valid here.
    pub fn next(self, action: DirectorAction) -> Option<MatchPhase> {
        use DirectorAction as A;
        use MatchPhase as P;

        match (self, action) {
            (P::PreRound, A::BeginRound) => Some(P::InRound),
            (P::InRound, A::EndRound) => Some(P::RoundOver),
            (P::RoundOver, A::NextRound) => Some(P::PreRound),
            (P::RoundOver, A::DecideMatch) => Some(P::MatchOver),
            (P::MatchOver, A::Rematch) => Some(P::PreRound),
            _ => None,
        }
    }

    pub fn can(self, action: DirectorAction) -> bool {
        self.next(action).is_some()
    }
}

/// Round and score state of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub current_round: u32,
    pub rounds_won: [u32; 2],
    pub max_rounds: u32,
    pub wins_needed: u32,
    /// Seconds left in the round
    pub round_timer: u32,
    pub phase: MatchPhase,
    pub winner: Option<PlayerSlot>,
    /// Frames spent in the current phase
    pub phase_frames: u32,
}

impl MatchState {
    pub fn new(config: &Config) -> Self {
        Self {
            current_round: 1,
            rounds_won: [0, 0],
            max_rounds: config.max_rounds,
            wins_needed: config.wins_needed(),
            round_timer: config.round_time,
            phase: MatchPhase::PreRound,
            winner: None,
            phase_frames: 0,
        }
    }

    pub fn wins(&self, slot: PlayerSlot) -> u32 {
        self.rounds_won[slot.index()]
    }

    /// Record a round result. Returns the match winner once the threshold is reached.
    pub fn award_round(&mut self, winner: Option<PlayerSlot>) -> Option<PlayerSlot> {
        let winner = winner?;
        self.rounds_won[winner.index()] += 1;
        (self.wins(winner) >= self.wins_needed).then_some(winner)
    }

    /// Apply a transition. Returns false (and leaves the phase alone) if invalid.
    pub fn transition(&mut self, action: DirectorAction) -> bool {
        match self.phase.next(action) {
            Some(next) => {
                tracing::debug!("phase {:?} -> {:?} ({:?})", self.phase, next, action);
                self.phase = next;
                self.phase_frames = 0;
                true
            }
            None => {
                tracing::warn!("ignoring {:?} during {:?}", action, self.phase);
                false
            }
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == MatchPhase::MatchOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_cycle() {
        let mut state = MatchState::new(&Config::new());
        assert_eq!(state.phase, MatchPhase::PreRound);
        assert!(state.transition(DirectorAction::BeginRound));
        assert_eq!(state.phase, MatchPhase::InRound);
        assert!(state.transition(DirectorAction::EndRound));
        assert_eq!(state.phase, MatchPhase::RoundOver);
        assert!(state.transition(DirectorAction::NextRound));
        assert_eq!(state.phase, MatchPhase::PreRound);
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(!MatchPhase::PreRound.can(DirectorAction::EndRound));
        assert!(!MatchPhase::InRound.can(DirectorAction::DecideMatch));
        assert!(!MatchPhase::InRound.can(DirectorAction::Rematch));
        assert!(!MatchPhase::MatchOver.can(DirectorAction::BeginRound));

        let mut state = MatchState::new(&Config::new());
        state.phase_frames = 7;
        assert!(!state.transition(DirectorAction::Rematch));
        assert_eq!(state.phase, MatchPhase::PreRound);
        assert_eq!(state.phase_frames, 7, "Rejected transitions change nothing");
    }

    #[test]
    fn test_award_round_reaches_threshold() {
        let mut state = MatchState::new(&Config::new());
        assert_eq!(state.wins_needed, 2);
        assert_eq!(state.award_round(Some(PlayerSlot::One)), None);
        assert_eq!(state.award_round(None), None, "Draws award nothing");
        assert_eq!(state.award_round(Some(PlayerSlot::Two)), None);
        assert_eq!(state.award_round(Some(PlayerSlot::One)), Some(PlayerSlot::One));
        assert_eq!(state.rounds_won, [2, 1]);
    }
}
