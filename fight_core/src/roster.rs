//! Fighter roster: immutable archetype table.
//!
//! The roster is built once (either the built-in table or a JSON document) and
//! only read afterwards. Move geometry uses the fighter's feet as origin with y
//! growing downward, so hitbox offsets are negative.

use std::collections::BTreeMap;
use std::str::FromStr;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::components::Facing;
use crate::error::{ConfigurationError, RosterError};
use crate::input::{InputHistory, MotionInput};
use crate::params::Params;
use crate::resources::GameRng;

/// Attack kinds. The four basic moves live in an archetype's move table;
/// `Special` marks an attack started from a motion input.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum MoveKind {
    LightPunch,
    HeavyPunch,
    Kick,
    JumpPunch,
    Special,
}

impl MoveKind {
    /// Moves every archetype must define.
    pub const BASIC: [MoveKind; 4] = [
        MoveKind::LightPunch,
        MoveKind::HeavyPunch,
        MoveKind::Kick,
        MoveKind::JumpPunch,
    ];
}

/// Which block stance defeats an attack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttackCategory {
    #[default]
    High,
    Low,
}

/// Attack rectangle relative to the fighter origin, mirrored by facing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    #[serde(rename = "x")]
    pub offset_x: f32,
    #[serde(rename = "y")]
    pub offset_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Hitbox {
    pub const fn new(offset_x: f32, offset_y: f32, width: f32, height: f32) -> Self {
        Self {
            offset_x,
            offset_y,
            width,
            height,
        }
    }
}

/// One attack an archetype can perform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveDefinition {
    pub damage: u32,
    #[serde(rename = "startup")]
    pub startup_frames: u32,
    #[serde(rename = "recovery")]
    pub recovery_frames: u32,
    pub hitbox: Hitbox,
    #[serde(default)]
    pub category: AttackCategory,
}

impl MoveDefinition {
    /// Effective height class: explicitly low moves, or hitboxes sitting
    /// close to the ground, are low.
    pub fn attack_height(&self, low_offset_y: f32) -> AttackCategory {
        if self.category == AttackCategory::Low || self.hitbox.offset_y > low_offset_y {
            AttackCategory::Low
        } else {
            AttackCategory::High
        }
    }

    fn check(&self) -> Result<(), &'static str> {
        if self.startup_frames < 1 {
            return Err("startup must be at least 1 frame");
        }
        if self.recovery_frames < 1 {
            return Err("recovery must be at least 1 frame");
        }
        if self.hitbox.width <= 0.0 || self.hitbox.height <= 0.0 {
            return Err("hitbox must have a positive size");
        }
        Ok(())
    }
}

/// Flavor stats (1..=10), shown by the UI only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterStats {
    pub speed: u8,
    pub power: u8,
    pub defense: u8,
    pub technique: u8,
}

impl FighterStats {
    fn check(&self, archetype: &str) -> Result<(), RosterError> {
        let stats = [
            ("speed", self.speed),
            ("power", self.power),
            ("defense", self.defense),
            ("technique", self.technique),
        ];
        for (stat, value) in stats {
            if !(1..=10).contains(&value) {
                return Err(RosterError::StatOutOfRange {
                    archetype: archetype.to_string(),
                    stat,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Motion-input attack, e.g. down, down-forward, forward, punch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialMove {
    pub name: String,
    #[serde(rename = "input")]
    pub motion: Vec<MotionInput>,
    #[serde(rename = "move")]
    pub definition: MoveDefinition,
}

impl SpecialMove {
    fn check(&self) -> Result<(), &'static str> {
        match self.motion.last() {
            None => return Err("input must not be empty"),
            Some(last) if !last.is_attack() => return Err("input must end with punch or kick"),
            Some(_) => {}
        }
        if self.motion.len() > Params::INPUT_HISTORY_LEN {
            return Err("input is longer than the input history");
        }
        self.definition.check()
    }
}

/// Immutable fighter template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterArchetype {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub origin: String,
    pub stats: FighterStats,
    pub moves: BTreeMap<MoveKind, MoveDefinition>,
    #[serde(default, rename = "specialMoves")]
    pub special_moves: Vec<SpecialMove>,
}

impl FighterArchetype {
    pub fn move_def(&self, kind: MoveKind) -> Option<&MoveDefinition> {
        self.moves.get(&kind)
    }

    /// Lookup by wire name, e.g. `"heavyPunch"`. Unknown names yield `None`.
    pub fn move_named(&self, name: &str) -> Option<&MoveDefinition> {
        MoveKind::from_str(name)
            .ok()
            .and_then(|kind| self.move_def(kind))
    }

    /// Every archetype must define all four basic moves to enter a match.
    pub fn check_required_moves(&self) -> Result<(), ConfigurationError> {
        match MoveKind::BASIC.into_iter().find(|kind| !self.moves.contains_key(kind)) {
            Some(kind) => Err(ConfigurationError::MissingMove {
                archetype: self.id.clone(),
                kind,
            }),
            None => Ok(()),
        }
    }

    /// First special whose motion ends the input history, if any.
    pub fn special_for(
        &self,
        history: &InputHistory,
        facing: Facing,
        now_ms: f64,
        window_ms: f64,
    ) -> Option<&SpecialMove> {
        self.special_moves
            .iter()
            .find(|special| history.ends_with(&special.motion, facing, now_ms, window_ms))
    }

    fn check(&self) -> Result<(), RosterError> {
        self.stats.check(&self.id)?;
        for (kind, def) in &self.moves {
            let checked = if *kind == MoveKind::Special {
                Err("special moves belong in specialMoves")
            } else {
                def.check()
            };
            checked.map_err(|reason| RosterError::InvalidMove {
                archetype: self.id.clone(),
                kind: *kind,
                reason,
            })?;
        }
        for special in &self.special_moves {
            special.check().map_err(|reason| RosterError::InvalidSpecial {
                archetype: self.id.clone(),
                name: special.name.clone(),
                reason,
            })?;
        }
        Ok(())
    }

    fn with_specials(mut self, specials: Vec<SpecialMove>) -> Self {
        self.special_moves = specials;
        self
    }
}

#[derive(Debug, Deserialize)]
struct RosterDocument {
    fighters: Vec<FighterArchetype>,
}

/// Read-only table of archetypes.
#[derive(Debug, Clone)]
pub struct Roster {
    archetypes: Vec<FighterArchetype>,
}

impl Roster {
    /// Build a roster, validating every archetype.
    pub fn new(archetypes: Vec<FighterArchetype>) -> Result<Self, RosterError> {
        for (i, archetype) in archetypes.iter().enumerate() {
            archetype.check()?;
            if archetypes[..i].iter().any(|a| a.id == archetype.id) {
                return Err(RosterError::Duplicate(archetype.id.clone()));
            }
        }
        Ok(Self { archetypes })
    }

    /// Parse a `{ "fighters": [...] }` document.
    pub fn from_json(json: &str) -> Result<Self, RosterError> {
        let doc: RosterDocument = serde_json::from_str(json)?;
        Self::new(doc.fighters)
    }

    pub fn archetype_by_id(&self, id: &str) -> Result<&FighterArchetype, RosterError> {
        self.archetypes
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| RosterError::NotFound(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FighterArchetype> {
        self.archetypes.iter()
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    /// Pick an archetype at random, e.g. for a CPU opponent.
    pub fn random_archetype(&self, rng: &mut GameRng) -> Option<&FighterArchetype> {
        self.archetypes.choose(&mut rng.0)
    }

    /// The six stock fighters.
    pub fn builtin() -> Self {
        use MotionInput as M;

        Self {
            archetypes: vec![
                archetype(
                    "razor",
                    "Razor",
                    "Shadow Realm",
                    [9, 7, 6, 8],
                    [
                        (8, 3, 8, Hitbox::new(0.0, -20.0, 35.0, 15.0)),
                        (15, 8, 15, Hitbox::new(0.0, -25.0, 45.0, 20.0)),
                        (12, 5, 12, Hitbox::new(0.0, -15.0, 40.0, 25.0)),
                        (14, 6, 10, Hitbox::new(0.0, -30.0, 38.0, 18.0)),
                    ],
                )
                .with_specials(vec![
                    special(
                        "Shadow Wave",
                        &[M::Down, M::DownForward, M::Forward, M::Punch],
                        (25, 10, 20, Hitbox::new(0.0, -30.0, 120.0, 20.0)),
                    ),
                    special(
                        "Rising Blade",
                        &[M::Forward, M::Down, M::DownForward, M::Punch],
                        (30, 4, 25, Hitbox::new(0.0, -60.0, 40.0, 60.0)),
                    ),
                ]),
                archetype(
                    "blaze",
                    "Blaze",
                    "Fire Mountains",
                    [7, 9, 5, 6],
                    [
                        (10, 4, 10, Hitbox::new(0.0, -22.0, 38.0, 18.0)),
                        (18, 12, 18, Hitbox::new(0.0, -28.0, 50.0, 25.0)),
                        (13, 6, 14, Hitbox::new(0.0, -18.0, 42.0, 28.0)),
                        (16, 8, 12, Hitbox::new(0.0, -32.0, 45.0, 22.0)),
                    ],
                )
                .with_specials(vec![special(
                    "Flame Wheel",
                    &[M::Down, M::DownBack, M::Back, M::Kick],
                    (20, 8, 18, Hitbox::new(0.0, -40.0, 60.0, 30.0)),
                )]),
                archetype(
                    "frost",
                    "Frost",
                    "Ice Peaks",
                    [8, 6, 8, 9],
                    [
                        (7, 2, 7, Hitbox::new(0.0, -19.0, 32.0, 16.0)),
                        (14, 6, 13, Hitbox::new(0.0, -26.0, 48.0, 22.0)),
                        (11, 4, 9, Hitbox::new(0.0, -16.0, 36.0, 24.0)),
                        (13, 5, 11, Hitbox::new(0.0, -28.0, 40.0, 20.0)),
                    ],
                )
                .with_specials(vec![special(
                    "Ice Shard",
                    &[M::Back, M::Forward, M::Punch],
                    (20, 9, 18, Hitbox::new(0.0, -30.0, 110.0, 18.0)),
                )]),
                archetype(
                    "storm",
                    "Storm",
                    "Sky Temples",
                    [10, 7, 4, 7],
                    [
                        (9, 2, 6, Hitbox::new(0.0, -21.0, 33.0, 14.0)),
                        (16, 7, 14, Hitbox::new(0.0, -27.0, 47.0, 23.0)),
                        (12, 3, 10, Hitbox::new(0.0, -17.0, 39.0, 26.0)),
                        (15, 4, 9, Hitbox::new(0.0, -29.0, 41.0, 19.0)),
                    ],
                )
                .with_specials(vec![special(
                    "Cyclone Kick",
                    &[M::Down, M::Kick],
                    (25, 7, 16, Hitbox::new(0.0, -20.0, 55.0, 25.0)),
                )]),
                archetype(
                    "terra",
                    "Terra",
                    "Earth Core",
                    [5, 8, 10, 5],
                    [
                        (11, 5, 12, Hitbox::new(0.0, -23.0, 40.0, 20.0)),
                        (20, 15, 22, Hitbox::new(0.0, -30.0, 55.0, 28.0)),
                        (14, 8, 16, Hitbox::new(0.0, -19.0, 44.0, 30.0)),
                        (17, 10, 15, Hitbox::new(0.0, -33.0, 48.0, 26.0)),
                    ],
                )
                .with_specials(vec![special(
                    "Seismic Slam",
                    &[M::Down, M::Down, M::Punch],
                    (28, 12, 24, Hitbox::new(0.0, -10.0, 70.0, 10.0)),
                )]),
                archetype(
                    "mystic",
                    "Mystic",
                    "Astral Plane",
                    [8, 6, 7, 10],
                    [
                        (8, 2, 8, Hitbox::new(0.0, -18.0, 30.0, 12.0)),
                        (13, 5, 11, Hitbox::new(0.0, -24.0, 42.0, 18.0)),
                        (10, 3, 8, Hitbox::new(0.0, -14.0, 34.0, 22.0)),
                        (12, 4, 10, Hitbox::new(0.0, -26.0, 36.0, 16.0)),
                    ],
                )
                .with_specials(vec![special(
                    "Astral Bolt",
                    &[M::Down, M::DownForward, M::Forward, M::Punch],
                    (22, 8, 18, Hitbox::new(0.0, -32.0, 130.0, 16.0)),
                )]),
            ],
        }
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Moves are given as (damage, startup, recovery, hitbox) in
/// lightPunch, heavyPunch, kick, jumpPunch order. Kicks sweep low.
fn archetype(
    id: &str,
    name: &str,
    origin: &str,
    [speed, power, defense, technique]: [u8; 4],
    moves: [(u32, u32, u32, Hitbox); 4],
) -> FighterArchetype {
    let moves = MoveKind::BASIC
        .into_iter()
        .zip(moves)
        .map(|(kind, (damage, startup_frames, recovery_frames, hitbox))| {
            let category = if kind == MoveKind::Kick {
                AttackCategory::Low
            } else {
                AttackCategory::High
            };
            (
                kind,
                MoveDefinition {
                    damage,
                    startup_frames,
                    recovery_frames,
                    hitbox,
                    category,
                },
            )
        })
        .collect();

    FighterArchetype {
        id: id.to_string(),
        name: name.to_string(),
        origin: origin.to_string(),
        stats: FighterStats {
            speed,
            power,
            defense,
            technique,
        },
        moves,
        special_moves: Vec::new(),
    }
}

/// Special moves are given as (damage, startup, recovery, hitbox).
fn special(
    name: &str,
    motion: &[MotionInput],
    (damage, startup_frames, recovery_frames, hitbox): (u32, u32, u32, Hitbox),
) -> SpecialMove {
    SpecialMove {
        name: name.to_string(),
        motion: motion.to_vec(),
        definition: MoveDefinition {
            damage,
            startup_frames,
            recovery_frames,
            hitbox,
            category: AttackCategory::High,
        },
    }
}
