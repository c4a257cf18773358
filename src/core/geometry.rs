//! Grid coordinates, bounds checks and human-readable notation.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::common::GameError;
use crate::core::config::BOARD_SIZE;

const SIZE: i32 = BOARD_SIZE as i32;

/// A cell on the grid. Signed so that off-board input can be represented and
/// rejected rather than wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(&self) -> bool {
        in_bounds(*self)
    }

    /// Row-major index into a `BOARD_SIZE`×`BOARD_SIZE` grid, if on the board.
    pub fn index(&self) -> Option<usize> {
        if self.in_bounds() {
            Some(self.y as usize * BOARD_SIZE as usize + self.x as usize)
        } else {
            None
        }
    }

    pub fn from_index(idx: usize) -> Self {
        let n = BOARD_SIZE as usize;
        Self::new((idx % n) as i32, (idx / n) as i32)
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// In-bounds cells sharing an edge or a corner with this one.
    pub fn neighbors8(self) -> impl Iterator<Item = Coord> {
        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(move |(dx, dy)| self.offset(dx, dy))
            .filter(Coord::in_bounds)
    }

    /// In-bounds cells sharing an edge with this one, in N, E, S, W order.
    pub fn neighbors4(self) -> impl Iterator<Item = Coord> {
        [(0, -1), (1, 0), (0, 1), (-1, 0)]
            .into_iter()
            .map(move |(dx, dy)| self.offset(dx, dy))
            .filter(Coord::in_bounds)
    }

    pub fn to_human(&self) -> Result<String, GameError> {
        to_human(*self)
    }
}

/// Canonical `"x,y"` key, the same text `Display` produces.
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Coord {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || GameError::BadCoord(s.to_string());
        let (x, y) = s.split_once(',').ok_or_else(bad)?;
        let x = x.trim().parse().map_err(|_| bad())?;
        let y = y.trim().parse().map_err(|_| bad())?;
        Ok(Coord::new(x, y))
    }
}

pub fn in_bounds(coord: Coord) -> bool {
    (0..SIZE).contains(&coord.x) && (0..SIZE).contains(&coord.y)
}

pub fn coord_key(coord: Coord) -> String {
    coord.to_string()
}

/// Letter-number notation: columns `A`..`J`, rows `1`..`10`.
pub fn to_human(coord: Coord) -> Result<String, GameError> {
    if !coord.in_bounds() {
        return Err(GameError::OutOfBounds(coord));
    }
    let col = (b'A' + coord.x as u8) as char;
    Ok(format!("{}{}", col, coord.y + 1))
}

/// Parse `A1`..`J10`, case-insensitively. Anything else is `BAD_COORD`.
pub fn from_human(input: &str) -> Result<Coord, GameError> {
    let bad = || GameError::BadCoord(input.to_string());
    let mut chars = input.chars();
    let col = chars.next().ok_or_else(bad)?.to_ascii_uppercase();
    if !('A'..='J').contains(&col) {
        return Err(bad());
    }
    let row = match chars.as_str() {
        "10" => 10,
        digit if digit.len() == 1 => match digit.as_bytes()[0] {
            b @ b'1'..=b'9' => (b - b'0') as i32,
            _ => return Err(bad()),
        },
        _ => return Err(bad()),
    };
    Ok(Coord::new((col as u8 - b'A') as i32, row - 1))
}
