//! Board dimensions, fleet composition and per-match rules.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: u8 = 10;

/// Number of ships every fleet must contain.
pub const FLEET_SIZE: usize = 10;

pub const MAX_SHIP_LENGTH: u8 = 4;

/// Required `(length, count)` pairs for a legal fleet.
pub const FLEET_COMPOSITION: [(u8, usize); 4] = [(1, 4), (2, 3), (3, 2), (4, 1)];

/// Total number of ship cells in a legal fleet.
pub const TOTAL_SHIP_CELLS: usize = 4 + 2 * 3 + 3 * 2 + 4;

/// How many whole-fleet attempts random placement makes before giving up.
pub const RANDOM_FLEET_ATTEMPTS: usize = 500;

/// Expected number of ships of `length` in a legal fleet.
pub fn expected_count(length: u8) -> usize {
    FLEET_COMPOSITION
        .iter()
        .find(|(len, _)| *len == length)
        .map(|(_, count)| *count)
        .unwrap_or(0)
}

/// Rules captured when a match is created. Never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rules {
    pub allow_touching: bool,
    pub repeat_turn_on_hit: bool,
    /// Declarative only; an external scheduler enforces it.
    pub turn_seconds: u32,
    /// Declarative only; an external scheduler enforces it.
    pub placement_seconds: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            allow_touching: false,
            repeat_turn_on_hit: true,
            turn_seconds: 45,
            placement_seconds: 60,
        }
    }
}

/// Per-field overrides applied on top of [`Rules::default`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesOverrides {
    pub allow_touching: Option<bool>,
    pub repeat_turn_on_hit: Option<bool>,
    pub turn_seconds: Option<u32>,
    pub placement_seconds: Option<u32>,
}

impl Rules {
    pub fn with_overrides(overrides: RulesOverrides) -> Self {
        let base = Self::default();
        Self {
            allow_touching: overrides.allow_touching.unwrap_or(base.allow_touching),
            repeat_turn_on_hit: overrides
                .repeat_turn_on_hit
                .unwrap_or(base.repeat_turn_on_hit),
            turn_seconds: overrides.turn_seconds.unwrap_or(base.turn_seconds),
            placement_seconds: overrides
                .placement_seconds
                .unwrap_or(base.placement_seconds),
        }
    }
}

impl From<RulesOverrides> for Rules {
    fn from(overrides: RulesOverrides) -> Self {
        Rules::with_overrides(overrides)
    }
}
