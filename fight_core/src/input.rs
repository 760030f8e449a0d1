//! Logical buttons and keyboard mapping.
//!
//! The host feeds raw key codes into a [`Keyboard`]; the combat core only ever
//! sees the resulting [`InputSnapshot`]. Codes with no binding are dropped.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::components::{Facing, PlayerSlot};
use crate::error::InvalidInput;
use crate::params::Params;
use crate::roster::MoveKind;

bitflags::bitflags! {
    /// Buttons currently held by one player
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Buttons: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
        const LIGHT_PUNCH = 1 << 4;
        const HEAVY_PUNCH = 1 << 5;
        const KICK = 1 << 6;

        const DIRECTIONS = Self::LEFT.bits() | Self::RIGHT.bits() | Self::UP.bits() | Self::DOWN.bits();
        const ATTACKS = Self::LIGHT_PUNCH.bits() | Self::HEAVY_PUNCH.bits() | Self::KICK.bits();
    }
}

impl Buttons {
    /// -1 for left, 1 for right, 0 for neither. Right wins when both are held.
    pub fn horizontal(self) -> i8 {
        if self.contains(Buttons::RIGHT) {
            1
        } else if self.contains(Buttons::LEFT) {
            -1
        } else {
            0
        }
    }

    /// Grounded attack for the held attack buttons, in light > heavy > kick order.
    pub fn ground_attack(self) -> Option<MoveKind> {
        if self.contains(Buttons::LIGHT_PUNCH) {
            Some(MoveKind::LightPunch)
        } else if self.contains(Buttons::HEAVY_PUNCH) {
            Some(MoveKind::HeavyPunch)
        } else if self.contains(Buttons::KICK) {
            Some(MoveKind::Kick)
        } else {
            None
        }
    }
}

/// Held buttons for both players on one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub buttons: [Buttons; 2],
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(one: Buttons, two: Buttons) -> Self {
        Self { buttons: [one, two] }
    }

    pub fn get(&self, slot: PlayerSlot) -> Buttons {
        self.buttons[slot.index()]
    }

    pub fn set(&mut self, slot: PlayerSlot, buttons: Buttons) {
        self.buttons[slot.index()] = buttons;
    }
}

/// Key code -> (slot, button) table
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<String, (PlayerSlot, Buttons)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        let layouts = [
            (
                PlayerSlot::One,
                ["KeyA", "KeyD", "KeyW", "KeyS", "KeyJ", "KeyK", "KeyL"],
            ),
            (
                PlayerSlot::Two,
                [
                    "ArrowLeft",
                    "ArrowRight",
                    "ArrowUp",
                    "ArrowDown",
                    "Digit1",
                    "Digit2",
                    "Digit3",
                ],
            ),
        ];
        let order = [
            Buttons::LEFT,
            Buttons::RIGHT,
            Buttons::UP,
            Buttons::DOWN,
            Buttons::LIGHT_PUNCH,
            Buttons::HEAVY_PUNCH,
            Buttons::KICK,
        ];
        for (slot, codes) in layouts {
            for (code, button) in codes.into_iter().zip(order) {
                bindings.bind(code, slot, button);
            }
        }
        bindings
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn bind(&mut self, code: &str, slot: PlayerSlot, button: Buttons) {
        self.map.insert(code.to_string(), (slot, button));
    }

    pub fn resolve(&self, code: &str) -> Result<(PlayerSlot, Buttons), InvalidInput> {
        self.map
            .get(code)
            .copied()
            .ok_or_else(|| InvalidInput(code.to_string()))
    }
}

/// One step of a special-move motion. Horizontal steps are relative to facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MotionInput {
    Up,
    Down,
    Forward,
    Back,
    UpForward,
    UpBack,
    DownForward,
    DownBack,
    Punch,
    Kick,
}

impl MotionInput {
    /// Read a recorded entry as seen by a fighter facing `facing`.
    pub fn read(buttons: Buttons, facing: Facing) -> Option<Self> {
        if buttons.intersects(Buttons::LIGHT_PUNCH | Buttons::HEAVY_PUNCH) {
            return Some(MotionInput::Punch);
        }
        if buttons.contains(Buttons::KICK) {
            return Some(MotionInput::Kick);
        }

        let forward = buttons.horizontal() as f32 * facing.sign();
        let down = buttons.contains(Buttons::DOWN);
        let up = !down && buttons.contains(Buttons::UP);
        let step = match (up, down) {
            (_, true) if forward > 0.0 => MotionInput::DownForward,
            (_, true) if forward < 0.0 => MotionInput::DownBack,
            (_, true) => MotionInput::Down,
            (true, _) if forward > 0.0 => MotionInput::UpForward,
            (true, _) if forward < 0.0 => MotionInput::UpBack,
            (true, _) => MotionInput::Up,
            _ if forward > 0.0 => MotionInput::Forward,
            _ if forward < 0.0 => MotionInput::Back,
            _ => return None,
        };
        Some(step)
    }

    pub fn is_attack(self) -> bool {
        matches!(self, MotionInput::Punch | MotionInput::Kick)
    }
}

/// A recorded input change: a new direction set or a single attack press
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyPress {
    pub button: Buttons,
    pub time_ms: f64,
}

/// Recent input changes for one player, oldest first.
///
/// Directions are recorded whenever the held direction set changes to a new
/// non-neutral value, so releasing down while holding right records right.
/// Attack buttons are recorded on press only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputHistory {
    held: Buttons,
    entries: VecDeque<KeyPress>,
}

impl InputHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the buttons now held. Returns true if an attack was newly pressed.
    pub fn record(&mut self, held: Buttons, time_ms: f64) -> bool {
        let directions = held & Buttons::DIRECTIONS;
        if !directions.is_empty() && directions != self.held & Buttons::DIRECTIONS {
            self.push(directions, time_ms);
        }

        let pressed = held & !self.held;
        let mut attacked = false;
        for attack in [Buttons::LIGHT_PUNCH, Buttons::HEAVY_PUNCH, Buttons::KICK] {
            if pressed.contains(attack) {
                self.push(attack, time_ms);
                attacked = true;
            }
        }
        self.held = held;
        attacked
    }

    fn push(&mut self, button: Buttons, time_ms: f64) {
        self.entries.push_back(KeyPress { button, time_ms });
        if self.entries.len() > Params::INPUT_HISTORY_LEN {
            self.entries.pop_front();
        }
    }

    /// Whether the newest entries spell `motion` for a fighter facing
    /// `facing`, every step no older than `window_ms`.
    pub fn ends_with(&self, motion: &[MotionInput], facing: Facing, now_ms: f64, window_ms: f64) -> bool {
        if motion.is_empty() || motion.len() > self.entries.len() {
            return false;
        }
        let tail = self.entries.iter().skip(self.entries.len() - motion.len());
        tail.zip(motion).all(|(press, step)| {
            now_ms - press.time_ms <= window_ms && MotionInput::read(press.button, facing) == Some(*step)
        })
    }

    /// Forget recorded entries but keep tracking what is held.
    pub fn consume(&mut self) {
        self.entries.clear();
    }

    /// Forget everything, including held buttons.
    pub fn clear(&mut self) {
        self.held = Buttons::empty();
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyPress> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Held-key tracker fed by raw key events
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    bindings: KeyBindings,
    held: HashSet<String>,
    history: [InputHistory; 2],
}

impl Keyboard {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: HashSet::new(),
            history: Default::default(),
        }
    }

    pub fn key_down(&mut self, code: &str, time_ms: f64) {
        match self.bindings.resolve(code) {
            Ok((slot, _)) => {
                if self.held.insert(code.to_string()) {
                    self.record(slot, time_ms);
                }
            }
            Err(err) => tracing::trace!("ignoring key down: {}", err),
        }
    }

    pub fn key_up(&mut self, code: &str, time_ms: f64) {
        if !self.held.remove(code) {
            return;
        }
        if let Ok((slot, _)) = self.bindings.resolve(code) {
            self.record(slot, time_ms);
        }
    }

    fn record(&mut self, slot: PlayerSlot, time_ms: f64) {
        let held = self.snapshot().get(slot);
        self.history[slot.index()].record(held, time_ms);
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
        for history in &mut self.history {
            history.clear();
        }
    }

    pub fn snapshot(&self) -> InputSnapshot {
        let mut snapshot = InputSnapshot::new();
        for code in &self.held {
            if let Ok((slot, button)) = self.bindings.resolve(code) {
                snapshot.buttons[slot.index()] |= button;
            }
        }
        snapshot
    }

    /// Recent input changes for a player.
    pub fn history(&self, slot: PlayerSlot) -> &InputHistory {
        &self.history[slot.index()]
    }
}
