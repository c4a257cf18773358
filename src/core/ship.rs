//! Ship placements and the cells they cover.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::common::GameError;
use crate::core::config::MAX_SHIP_LENGTH;
use crate::core::geometry::{from_human, Coord};

/// Stable identifier of a ship for the lifetime of a match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ShipId(pub String);

impl ShipId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Conventional id for the `n`th (1-based) ship of `length`.
    pub fn numbered(length: u8, n: usize) -> Self {
        Self(format!("ship-{}-{}", length, n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShipId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl PartialEq<&str> for ShipId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl FromStr for Orientation {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h" | "horizontal" => Ok(Orientation::Horizontal),
            "v" | "vertical" => Ok(Orientation::Vertical),
            _ => Err(GameError::Orientation(s.to_string())),
        }
    }
}

/// A placed ship. `bow` is the minimum-coordinate end; the other cells are
/// derived from it and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ship {
    pub id: ShipId,
    pub bow: Coord,
    pub length: u8,
    pub horizontal: bool,
}

impl Ship {
    pub fn new(id: impl Into<ShipId>, bow: Coord, length: u8, orientation: Orientation) -> Self {
        Self {
            id: id.into(),
            bow,
            length,
            horizontal: orientation == Orientation::Horizontal,
        }
    }

    pub fn orientation(&self) -> Orientation {
        if self.horizontal {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    /// Cells from the bow outwards. No bounds checking.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.length as i32).map(move |i| {
            if self.horizontal {
                self.bow.offset(i, 0)
            } else {
                self.bow.offset(0, i)
            }
        })
    }

    pub fn occupies(&self, coord: Coord) -> bool {
        self.cells().any(|c| c == coord)
    }
}

impl From<String> for ShipId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

pub fn ship_cells(ship: &Ship) -> Vec<Coord> {
    ship.cells().collect()
}

/// Parse `"<coord> <H|V> <length>"`, e.g. `"B3 v 3"`, into a ship with `id`.
pub fn parse_placement(id: impl Into<ShipId>, input: &str) -> Result<Ship, GameError> {
    let mut parts = input.split_whitespace();
    let bow = from_human(parts.next().unwrap_or(""))?;
    let orientation: Orientation = parts.next().unwrap_or("").parse()?;
    let length_text = parts.next().unwrap_or("");
    let length: u8 = length_text
        .parse()
        .map_err(|_| GameError::BadLength(0))?;
    if !(1..=MAX_SHIP_LENGTH).contains(&length) {
        return Err(GameError::BadLength(length));
    }
    if parts.next().is_some() {
        return Err(GameError::BadCoord(input.to_string()));
    }
    Ok(Ship::new(id, bow, length, orientation))
}
