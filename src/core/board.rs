//! Private boards, fog-of-war views and the sink-time reveal.

use std::collections::{BTreeSet, HashMap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::bitboard::CoordSet;
use crate::core::config::BOARD_SIZE;
use crate::core::fleet::Fleet;
use crate::core::geometry::Coord;
use crate::core::ship::{Ship, ShipId};

const GRID: usize = BOARD_SIZE as usize;

/// One player's true layout plus the shots received on it.
///
/// Never sent whole to the opponent. A coordinate is in at most one of
/// `hits`/`misses`; a sunk ship has all of its cells in `hits`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Board {
    pub ships: Fleet,
    pub hits: CoordSet,
    pub misses: CoordSet,
    pub sunk_ship_ids: BTreeSet<ShipId>,
}

impl Board {
    pub fn new(fleet: Fleet) -> Self {
        Self {
            ships: fleet,
            ..Self::default()
        }
    }

    pub fn size(&self) -> u8 {
        BOARD_SIZE
    }

    pub fn has_ships(&self) -> bool {
        !self.ships.is_empty()
    }

    pub fn already_fired(&self, coord: Coord) -> bool {
        self.hits.contains(coord) || self.misses.contains(coord)
    }

    pub fn ship(&self, id: &ShipId) -> Option<&Ship> {
        self.ships.iter().find(|s| &s.id == id)
    }

    pub fn all_sunk(&self) -> bool {
        self.has_ships() && self.ships.iter().all(|s| self.sunk_ship_ids.contains(&s.id))
    }

    /// Ships not yet sunk.
    pub fn remaining_ships(&self) -> impl Iterator<Item = &Ship> + '_ {
        self.ships
            .iter()
            .filter(move |s| !self.sunk_ship_ids.contains(&s.id))
    }
}

pub fn make_board(fleet: Fleet) -> Board {
    Board::new(fleet)
}

/// Per-cell ship ownership, derived from a fleet once per placement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShipIndex {
    owners: HashMap<Coord, ShipId>,
}

impl ShipIndex {
    pub fn owner(&self, coord: Coord) -> Option<&ShipId> {
        self.owners.get(&coord)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

pub fn build_ship_index(fleet: &[Ship]) -> ShipIndex {
    let owners = fleet
        .iter()
        .flat_map(|ship| ship.cells().map(move |c| (c, ship.id.clone())))
        .collect();
    ShipIndex { owners }
}

/// What a player knows about one cell of the opponent's board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellMark {
    #[default]
    Unknown,
    Miss,
    Hit,
    Sunk,
}

impl CellMark {
    /// Marks only move forward: Unknown to Miss or Hit, Hit to Sunk.
    pub fn can_become(self, next: CellMark) -> bool {
        matches!(
            (self, next),
            (CellMark::Unknown, CellMark::Miss)
                | (CellMark::Unknown, CellMark::Hit)
                | (CellMark::Hit, CellMark::Sunk)
        )
    }
}

/// A player's view of the opponent's grid, indexed `[y][x]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fog {
    cells: [[CellMark; GRID]; GRID],
}

impl Fog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Off-board cells read as `Unknown`.
    pub fn get(&self, coord: Coord) -> CellMark {
        if coord.in_bounds() {
            self.cells[coord.y as usize][coord.x as usize]
        } else {
            CellMark::Unknown
        }
    }

    /// Apply `next` if it is a forward transition; returns whether it was.
    pub fn mark(&mut self, coord: Coord, next: CellMark) -> bool {
        if !coord.in_bounds() || !self.get(coord).can_become(next) {
            return false;
        }
        self.cells[coord.y as usize][coord.x as usize] = next;
        true
    }

    pub fn rows(&self) -> &[[CellMark; GRID]; GRID] {
        &self.cells
    }

    pub fn count(&self, mark: CellMark) -> usize {
        self.cells.iter().flatten().filter(|&&m| m == mark).count()
    }

    /// `Unknown` cells in row-major order.
    pub fn unknown_cells(&self) -> Vec<Coord> {
        (0..GRID * GRID)
            .map(Coord::from_index)
            .filter(|&c| self.get(c) == CellMark::Unknown)
            .collect()
    }
}

pub fn make_empty_fog() -> Fog {
    Fog::new()
}

pub fn is_ship_sunk(ship: &Ship, hits: &CoordSet) -> bool {
    ship.cells().all(|c| hits.contains(c))
}

/// In-bounds cells touching the ship, diagonals included, minus the ship's
/// own cells. Row-major order.
pub fn get_ship_adjacent_cells(ship: &Ship) -> Vec<Coord> {
    let mut own = CoordSet::new();
    let mut around = CoordSet::new();
    for cell in ship.cells().filter(Coord::in_bounds) {
        let _ = own.insert(cell);
        for n in cell.neighbors8() {
            let _ = around.insert(n);
        }
    }
    around.iter().filter(|&c| !own.contains(c)).collect()
}

/// Mark every cell around a sunk ship that is unexplored and not owned by
/// another ship as a miss, on the board and in the attacker's fog. Returns
/// the newly revealed cells.
pub fn reveal_adjacent_cells(
    ship: &Ship,
    board: &mut Board,
    fog: &mut Fog,
    index: &ShipIndex,
) -> Vec<Coord> {
    let mut revealed = Vec::new();
    for cell in get_ship_adjacent_cells(ship) {
        if board.already_fired(cell) || index.owner(cell).is_some() {
            continue;
        }
        if board.misses.insert(cell).unwrap_or(false) {
            fog.mark(cell, CellMark::Miss);
            revealed.push(cell);
        }
    }
    revealed
}
