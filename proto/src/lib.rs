//! Host bridge messages for the fighting core
//!
//! Uses postcard for compact binary serialization between a presentation
//! host (canvas renderer, input layer) and a running [`Match`].

use fight_core::{
    Buttons, CombatState, DisplayState, Facing, FighterInstance, FrameEvents, GameEvent, InputSnapshot,
    Match, MatchPhase, MatchState, PlayerSlot,
};
use postcard::{from_bytes, to_allocvec};

// ============================================================================
// Host -> Core
// ============================================================================

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum HostCommand {
    /// Replace the held buttons for one player (raw `Buttons` bits)
    SetButtons { slot: PlayerSlot, bits: u8 },

    /// The host's 1 Hz round clock fired
    RoundTimerTick,

    Pause,
    Resume,

    /// Start over once the match is decided
    Rematch,
}

impl HostCommand {
    /// Apply to a match. Button changes only update `input`; the next frame picks them up.
    pub fn apply(&self, game: &mut Match, input: &mut InputSnapshot) -> FrameEvents {
        match self {
            HostCommand::SetButtons { slot, bits } => {
                let buttons = Buttons::from_bits_truncate(*bits);
                if buttons.bits() != *bits {
                    tracing::trace!("dropping unknown button bits {:#04x}", bits & !buttons.bits());
                }
                input.set(*slot, buttons);
                FrameEvents::new()
            }
            HostCommand::RoundTimerTick => game.advance_round_timer(),
            HostCommand::Pause => {
                game.pause();
                FrameEvents::new()
            }
            HostCommand::Resume => {
                game.resume();
                FrameEvents::new()
            }
            HostCommand::Rematch => {
                game.rematch();
                FrameEvents::new()
            }
        }
    }
}

// ============================================================================
// Core -> Host
// ============================================================================

/// What the renderer needs to draw one fighter
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FighterView {
    pub archetype_id: String,
    pub x: f32,
    pub y: f32,
    pub facing: Facing,
    pub health: u32,
    pub max_health: u32,
    pub state: CombatState,
    pub display: DisplayState,
    pub animation_frame: u32,
    pub combo: u32,
}

impl From<&FighterInstance> for FighterView {
    fn from(fighter: &FighterInstance) -> Self {
        Self {
            archetype_id: fighter.archetype_id.clone(),
            x: fighter.pos.x,
            y: fighter.pos.y,
            facing: fighter.facing,
            health: fighter.health,
            max_health: fighter.max_health,
            state: fighter.state,
            display: fighter.display,
            animation_frame: fighter.animation_frame,
            combo: fighter.combo,
        }
    }
}

/// Scoreboard view
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MatchView {
    pub round: u32,
    pub rounds_won: [u32; 2],
    pub round_timer: u32,
    pub phase: MatchPhase,
    pub winner: Option<PlayerSlot>,
}

impl From<&MatchState> for MatchView {
    fn from(state: &MatchState) -> Self {
        Self {
            round: state.current_round,
            rounds_won: state.rounds_won,
            round_timer: state.round_timer,
            phase: state.phase,
            winner: state.winner,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CoreUpdate {
    /// State after a frame or timer tick, with the events it produced
    Frame {
        frame: u64,
        fighters: [FighterView; 2],
        state: MatchView,
        events: Vec<GameEvent>,
    },
}

impl CoreUpdate {
    pub fn frame(game: &Match, events: FrameEvents) -> Self {
        let [one, two] = game.fighters();
        CoreUpdate::Frame {
            frame: game.frame(),
            fighters: [FighterView::from(one), FighterView::from(two)],
            state: MatchView::from(game.state()),
            events: events.into_iter().collect(),
        }
    }
}

// ============================================================================
// Serialization Helpers
// ============================================================================

impl HostCommand {
    /// Serialize command to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize command from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}

impl CoreUpdate {
    /// Serialize update to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize update from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fight_core::Roster;

    fn new_match() -> Match {
        Match::start_match(&Roster::builtin(), "razor", "mystic").expect("Builtin fighters exist")
    }

    #[test]
    fn test_host_command_serialization() {
        let msg = HostCommand::SetButtons {
            slot: PlayerSlot::Two,
            bits: (Buttons::LEFT | Buttons::KICK).bits(),
        };
        let bytes = msg.to_bytes().expect("Serialization should succeed");
        let decoded = HostCommand::from_bytes(&bytes).expect("Deserialization should succeed");
        assert_eq!(msg, decoded);
    }

    #[test]
    fn test_core_update_carries_events() {
        let mut game = new_match();
        let events = game.advance_frame(&InputSnapshot::new(), 16.0);
        let update = CoreUpdate::frame(&game, events);

        let bytes = update.to_bytes().expect("Serialization should succeed");
        let decoded = CoreUpdate::from_bytes(&bytes).expect("Deserialization should succeed");
        let CoreUpdate::Frame {
            frame,
            fighters,
            state,
            events,
        } = decoded;
        assert_eq!(frame, 1);
        assert_eq!(fighters[0].archetype_id, "razor");
        assert_eq!(fighters[1].x, 1000.0);
        assert_eq!(state.phase, MatchPhase::InRound);
        assert_eq!(events, vec![GameEvent::RoundStarted { round: 1 }]);
    }

    #[test]
    fn test_set_buttons_updates_input_only() {
        let mut game = new_match();
        let mut input = InputSnapshot::new();
        let events = HostCommand::SetButtons {
            slot: PlayerSlot::One,
            bits: Buttons::RIGHT.bits(),
        }
        .apply(&mut game, &mut input);
        assert!(events.is_empty());
        assert_eq!(input.get(PlayerSlot::One), Buttons::RIGHT);
        assert_eq!(game.frame(), 0);

        game.advance_frame(&input, 16.0);
        assert!(game.fighter(PlayerSlot::One).pos.x > 200.0);
    }

    #[test]
    fn test_unknown_button_bits_are_dropped() {
        let mut game = new_match();
        let mut input = InputSnapshot::new();
        HostCommand::SetButtons {
            slot: PlayerSlot::Two,
            bits: 0xFF,
        }
        .apply(&mut game, &mut input);
        assert_eq!(input.get(PlayerSlot::Two), Buttons::all());
    }

    #[test]
    fn test_pause_and_timer_commands() {
        let mut game = new_match();
        let mut input = InputSnapshot::new();
        game.advance_frame(&input, 16.0);

        HostCommand::RoundTimerTick.apply(&mut game, &mut input);
        assert_eq!(game.state().round_timer, 98);

        HostCommand::Pause.apply(&mut game, &mut input);
        HostCommand::RoundTimerTick.apply(&mut game, &mut input);
        assert_eq!(game.state().round_timer, 98);

        HostCommand::Resume.apply(&mut game, &mut input);
        assert!(!game.is_paused());

        HostCommand::Rematch.apply(&mut game, &mut input);
        assert_eq!(game.state().phase, MatchPhase::InRound, "Rematch needs a finished match");
    }
}
