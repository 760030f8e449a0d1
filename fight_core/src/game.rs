use crate::components::{FighterInstance, PlayerSlot};
use crate::config::Config;
use crate::director::{DirectorAction, MatchPhase, MatchState};
use crate::error::ConfigurationError;
use crate::input::InputSnapshot;
use crate::params::Params;
use crate::resources::{FrameEvents, GameEvent, NullClock, RoundClock, RoundEndReason, Time};
use crate::roster::{FighterArchetype, Roster};
use crate::stage::Stage;

/// A running match between two fighters
pub struct Match {
    config: Config,
    stage: Stage,
    archetypes: [FighterArchetype; 2],
    fighters: [FighterInstance; 2],
    state: MatchState,
    time: Time,
    frame: u64,
    paused: bool,
    clock: Box<dyn RoundClock>,
    clock_armed: bool,
}

impl Match {
    /// Set up a match with the default config and no round clock.
    pub fn start_match(roster: &Roster, one: &str, two: &str) -> Result<Self, ConfigurationError> {
        Self::start(roster, one, two, Config::default(), Box::new(NullClock))
    }

    /// Validate everything up front; nothing is created on failure.
    pub fn start(
        roster: &Roster,
        one: &str,
        two: &str,
        config: Config,
        clock: Box<dyn RoundClock>,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let archetypes = [
            roster.archetype_by_id(one)?.clone(),
            roster.archetype_by_id(two)?.clone(),
        ];
        for archetype in &archetypes {
            archetype.check_required_moves()?;
        }

        let stage = Stage::new();
        let fighters = [
            FighterInstance::spawn(&archetypes[0], PlayerSlot::One, &config, &stage),
            FighterInstance::spawn(&archetypes[1], PlayerSlot::Two, &config, &stage),
        ];
        tracing::info!("match start: {} vs {}", one, two);

        Ok(Self {
            state: MatchState::new(&config),
            config,
            stage,
            archetypes,
            fighters,
            time: Time::new(0.0, 0.0),
            frame: 0,
            paused: false,
            clock,
            clock_armed: false,
        })
    }

    pub fn fighters(&self) -> &[FighterInstance; 2] {
        &self.fighters
    }

    pub fn fighter(&self, slot: PlayerSlot) -> &FighterInstance {
        &self.fighters[slot.index()]
    }

    pub fn archetype(&self, slot: PlayerSlot) -> &FighterArchetype {
        &self.archetypes[slot.index()]
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    /// Frames advanced so far (paused frames are not counted)
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance one display frame.
    pub fn advance_frame(&mut self, input: &InputSnapshot, delta_ms: f32) -> FrameEvents {
        let mut events = FrameEvents::new();
        if self.paused {
            return events;
        }

        self.time.advance(delta_ms);
        self.frame += 1;

        match self.state.phase {
            MatchPhase::PreRound => {
                if self.state.phase_frames >= self.config.pre_round_frames {
                    self.begin_round(&mut events);
                    self.simulate(input, &mut events);
                } else {
                    self.state.phase_frames += 1;
                }
            }
            MatchPhase::InRound => self.simulate(input, &mut events),
            MatchPhase::RoundOver => {
                if self.state.phase_frames >= self.config.round_over_frames {
                    self.next_round();
                } else {
                    self.state.phase_frames += 1;
                }
            }
            MatchPhase::MatchOver => {}
        }

        events
    }

    /// One tick of the 1 Hz round countdown.
    pub fn advance_round_timer(&mut self) -> FrameEvents {
        let mut events = FrameEvents::new();
        if self.paused || self.state.phase != MatchPhase::InRound {
            return events;
        }

        self.state.round_timer = self.state.round_timer.saturating_sub(1);
        if self.state.round_timer > 0 {
            return events;
        }

        let [one, two] = [self.fighters[0].health, self.fighters[1].health];
        if one == two {
            self.state.round_timer = self.config.sudden_death_time;
            tracing::info!("round {} tied on time, sudden death", self.state.current_round);
            events.push(GameEvent::SuddenDeath {
                round: self.state.current_round,
                round_timer: self.state.round_timer,
            });
        } else {
            let winner = if one > two {
                PlayerSlot::One
            } else {
                PlayerSlot::Two
            };
            self.end_round(Some(winner), RoundEndReason::Timeout, &mut events);
        }
        events
    }

    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.disarm_clock();
        tracing::info!("match paused");
    }

    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        if self.state.phase == MatchPhase::InRound {
            self.arm_clock();
        }
        tracing::info!("match resumed");
    }

    /// Start over from round one with the same fighters. Only valid once the match is over.
    pub fn rematch(&mut self) -> bool {
        if !self.state.phase.can(DirectorAction::Rematch) {
            tracing::debug!("rematch ignored during {:?}", self.state.phase);
            return false;
        }
        self.state = MatchState::new(&self.config);
        for fighter in &mut self.fighters {
            fighter.reset_for_round(&self.stage);
        }
        tracing::info!("rematch");
        true
    }

    fn simulate(&mut self, input: &InputSnapshot, events: &mut FrameEvents) {
        crate::step(
            &mut self.fighters,
            &self.archetypes,
            input,
            &self.config,
            &self.stage,
            &self.time,
            events,
        );
        self.check_knockouts(events);
    }

    fn begin_round(&mut self, events: &mut FrameEvents) {
        for fighter in &mut self.fighters {
            fighter.reset_for_round(&self.stage);
        }
        self.state.round_timer = self.config.round_time;
        if !self.state.transition(DirectorAction::BeginRound) {
            return;
        }
        self.arm_clock();
        tracing::info!("round {} start", self.state.current_round);
        events.push(GameEvent::RoundStarted {
            round: self.state.current_round,
        });
    }

    fn next_round(&mut self) {
        if !self.state.transition(DirectorAction::NextRound) {
            return;
        }
        self.state.current_round += 1;
        for fighter in &mut self.fighters {
            fighter.reset_for_round(&self.stage);
        }
    }

    fn check_knockouts(&mut self, events: &mut FrameEvents) {
        let knocked_out = [
            self.fighters[0].is_knocked_out(),
            self.fighters[1].is_knocked_out(),
        ];
        match knocked_out {
            [false, false] => {}
            [true, true] => self.end_round(None, RoundEndReason::DoubleKnockout, events),
            [one_down, _] => {
                let loser = if one_down {
                    PlayerSlot::One
                } else {
                    PlayerSlot::Two
                };
                let winner = loser.opponent();
                events.push(GameEvent::Knockout { winner, loser });
                self.end_round(Some(winner), RoundEndReason::Knockout, events);
            }
        }
    }

    fn end_round(&mut self, winner: Option<PlayerSlot>, reason: RoundEndReason, events: &mut FrameEvents) {
        if !self.state.transition(DirectorAction::EndRound) {
            return;
        }
        self.disarm_clock();

        let round = self.state.current_round;
        let match_winner = self.state.award_round(winner);
        tracing::info!(
            "round {} over: {:?} ({:?}), score {:?}",
            round,
            winner,
            reason,
            self.state.rounds_won
        );
        events.push(GameEvent::RoundEnded {
            round,
            winner,
            reason,
        });

        if let Some(winner) = match_winner {
            if self.state.transition(DirectorAction::DecideMatch) {
                self.state.winner = Some(winner);
                tracing::info!("match over: {:?} wins", winner);
                events.push(GameEvent::MatchEnded { winner });
            }
        }
    }

    fn arm_clock(&mut self) {
        if !self.clock_armed {
            self.clock.arm(Params::ROUND_TIMER_PERIOD_MS);
            self.clock_armed = true;
        }
    }

    fn disarm_clock(&mut self) {
        if self.clock_armed {
            self.clock.disarm();
            self.clock_armed = false;
        }
    }
}

impl Drop for Match {
    fn drop(&mut self) {
        self.disarm_clock();
    }
}

impl std::fmt::Debug for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Match")
            .field("fighters", &self.fighters)
            .field("state", &self.state)
            .field("frame", &self.frame)
            .field("paused", &self.paused)
            .finish_non_exhaustive()
    }
}
