//! Error types shared by every part of the engine.

use std::fmt;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::game::{MatchStatus, Side};
use crate::core::geometry::Coord;
use crate::core::ship::ShipId;

/// Closed set of machine-readable failure codes.
///
/// The last four are reserved for collaborators (invites, rate limiting,
/// idempotent submission) and are never produced by the rules engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ErrorCode {
    InvalidLayout,
    AlreadyFired,
    NotYourTurn,
    MatchNotInProgress,
    OutOfBounds,
    BadLength,
    Orientation,
    Overlap,
    WrongComposition,
    Touching,
    FleetSize,
    RandomPlacementFailed,
    BadCoord,
    BoardExhausted,
    InviteConsumed,
    InviteExpired,
    RateLimit,
    IdempotentReplay,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidLayout => "INVALID_LAYOUT",
            ErrorCode::AlreadyFired => "ALREADY_FIRED",
            ErrorCode::NotYourTurn => "NOT_YOUR_TURN",
            ErrorCode::MatchNotInProgress => "MATCH_NOT_IN_PROGRESS",
            ErrorCode::OutOfBounds => "OUT_OF_BOUNDS",
            ErrorCode::BadLength => "BAD_LENGTH",
            ErrorCode::Orientation => "ORIENTATION",
            ErrorCode::Overlap => "OVERLAP",
            ErrorCode::WrongComposition => "WRONG_COMPOSITION",
            ErrorCode::Touching => "TOUCHING",
            ErrorCode::FleetSize => "FLEET_SIZE",
            ErrorCode::RandomPlacementFailed => "RANDOM_PLACEMENT_FAILED",
            ErrorCode::BadCoord => "BAD_COORD",
            ErrorCode::BoardExhausted => "BOARD_EXHAUSTED",
            ErrorCode::InviteConsumed => "INVITE_CONSUMED",
            ErrorCode::InviteExpired => "INVITE_EXPIRED",
            ErrorCode::RateLimit => "RATE_LIMIT",
            ErrorCode::IdempotentReplay => "IDEMPOTENT_REPLAY",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The first rule a proposed fleet breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FleetViolation {
    #[error("fleet has {found} ships, expected {expected}")]
    FleetSize { found: usize, expected: usize },
    #[error("ship {ship} has length {length}, expected 1 to 4")]
    BadLength { ship: ShipId, length: u8 },
    #[error("ship {ship} leaves the board")]
    OutOfBounds { ship: ShipId },
    #[error("ship {ship} overlaps another ship at {at}")]
    Overlap { ship: ShipId, at: Coord },
    #[error("fleet has {found} ships of length {length}, expected {expected}")]
    WrongComposition {
        length: u8,
        found: usize,
        expected: usize,
    },
    #[error("ship {ship} touches ship {other}")]
    Touching { ship: ShipId, other: ShipId },
}

impl FleetViolation {
    pub fn code(&self) -> ErrorCode {
        match self {
            FleetViolation::FleetSize { .. } => ErrorCode::FleetSize,
            FleetViolation::BadLength { .. } => ErrorCode::BadLength,
            FleetViolation::OutOfBounds { .. } => ErrorCode::OutOfBounds,
            FleetViolation::Overlap { .. } => ErrorCode::Overlap,
            FleetViolation::WrongComposition { .. } => ErrorCode::WrongComposition,
            FleetViolation::Touching { .. } => ErrorCode::Touching,
        }
    }
}

/// Every failure the engine reports. Branch on [`GameError::code`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid fleet layout: {0}")]
    InvalidLayout(#[from] FleetViolation),
    #[error("cell {0} was already fired at")]
    AlreadyFired(Coord),
    #[error("it is not {attempted}'s turn")]
    NotYourTurn { attempted: Side },
    #[error("match is {status}, not accepting this action")]
    MatchNotInProgress { status: MatchStatus },
    #[error("coordinate {0} is outside the board")]
    OutOfBounds(Coord),
    #[error("ship length {0} is not between 1 and 4")]
    BadLength(u8),
    #[error("unknown orientation {0:?}, expected H or V")]
    Orientation(String),
    #[error("malformed coordinate {0:?}")]
    BadCoord(String),
    #[error("random fleet placement failed after {attempts} attempts")]
    RandomPlacementFailed { attempts: usize },
    #[error("no unexplored cells remain")]
    BoardExhausted,
    #[error("idempotency key {key:?} was already used for a different move")]
    IdempotentReplay { key: String },
}

impl GameError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GameError::InvalidLayout(_) => ErrorCode::InvalidLayout,
            GameError::AlreadyFired(_) => ErrorCode::AlreadyFired,
            GameError::NotYourTurn { .. } => ErrorCode::NotYourTurn,
            GameError::MatchNotInProgress { .. } => ErrorCode::MatchNotInProgress,
            GameError::OutOfBounds(_) => ErrorCode::OutOfBounds,
            GameError::BadLength(_) => ErrorCode::BadLength,
            GameError::Orientation(_) => ErrorCode::Orientation,
            GameError::BadCoord(_) => ErrorCode::BadCoord,
            GameError::RandomPlacementFailed { .. } => ErrorCode::RandomPlacementFailed,
            GameError::BoardExhausted => ErrorCode::BoardExhausted,
            GameError::IdempotentReplay { .. } => ErrorCode::IdempotentReplay,
        }
    }

    /// Code of the violated placement rule, for `INVALID_LAYOUT` errors.
    pub fn reason(&self) -> Option<ErrorCode> {
        match self {
            GameError::InvalidLayout(violation) => Some(violation.code()),
            _ => None,
        }
    }
}
