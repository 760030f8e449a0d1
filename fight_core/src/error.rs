//! Error types for the combat core.
//!
//! Only match setup can fail. Per-frame anomalies (a missing move, garbage
//! input) degrade to a no-op for that frame instead of surfacing here.

use crate::roster::MoveKind;

/// Errors raised while loading or querying the fighter roster.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// No archetype with the given id exists.
    #[error("fighter archetype '{0}' not found")]
    NotFound(String),

    /// Two archetypes share the same id.
    #[error("fighter archetype '{0}' is defined more than once")]
    Duplicate(String),

    /// A move definition breaks its frame/damage invariants.
    #[error("move '{kind}' of '{archetype}' is invalid: {reason}")]
    InvalidMove {
        archetype: String,
        kind: MoveKind,
        reason: &'static str,
    },

    #[error("special move '{name}' of '{archetype}' is invalid: {reason}")]
    InvalidSpecial {
        archetype: String,
        name: String,
        reason: &'static str,
    },

    /// A base stat is outside the 1..=10 range.
    #[error("stat '{stat}' of '{archetype}' must be within 1..=10, got {value}")]
    StatOutOfRange {
        archetype: String,
        stat: &'static str,
        value: u8,
    },

    /// The roster document could not be parsed.
    #[error("failed to parse roster: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fatal errors raised while setting up a match.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("unknown fighter archetype '{0}'")]
    UnknownArchetype(String),

    #[error("archetype '{archetype}' is missing required move '{kind}'")]
    MissingMove { archetype: String, kind: MoveKind },

    #[error("invalid match configuration: {0}")]
    InvalidConfig(&'static str),
}

impl From<RosterError> for ConfigurationError {
    fn from(err: RosterError) -> Self {
        match err {
            RosterError::NotFound(id) => ConfigurationError::UnknownArchetype(id),
            _ => ConfigurationError::InvalidConfig("roster data is invalid"),
        }
    }
}

/// An input code that has no binding. Dropped by the input layer.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unmapped input code '{0}'")]
pub struct InvalidInput(pub String);
