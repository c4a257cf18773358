//! Match lifecycle: placement, turn order, move resolution and win detection.

use std::fmt;

use log::{debug, trace};
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::board::{is_ship_sunk, reveal_adjacent_cells, Board, CellMark, Fog, ShipIndex};
use crate::core::common::GameError;
use crate::core::config::{Rules, RulesOverrides};
use crate::core::fleet::{validate_fleet, Fleet};
use crate::core::geometry::Coord;
use crate::core::ship::ShipId;

/// The two seats of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => f.write_str("A"),
            Side::B => f.write_str("B"),
        }
    }
}

/// `Placing` → `InProgress` → `Finished`. `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MatchStatus {
    Placing,
    InProgress,
    Finished,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchStatus::Placing => "placing",
            MatchStatus::InProgress => "in progress",
            MatchStatus::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Discriminant of a [`MoveResult`], as fed back to the AI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveKind {
    Miss,
    Hit,
    Sunk,
    Win,
}

/// Outcome of one shot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind"))]
pub enum MoveResult {
    Miss {
        coord: Coord,
    },
    Hit {
        coord: Coord,
    },
    Sunk {
        coord: Coord,
        ship_id: ShipId,
        sunk_coords: Vec<Coord>,
        revealed_cells: Vec<Coord>,
    },
    Win {
        coord: Coord,
        ship_id: ShipId,
        sunk_coords: Vec<Coord>,
        revealed_cells: Vec<Coord>,
    },
}

impl MoveResult {
    pub fn kind(&self) -> MoveKind {
        match self {
            MoveResult::Miss { .. } => MoveKind::Miss,
            MoveResult::Hit { .. } => MoveKind::Hit,
            MoveResult::Sunk { .. } => MoveKind::Sunk,
            MoveResult::Win { .. } => MoveKind::Win,
        }
    }

    pub fn coord(&self) -> Coord {
        match self {
            MoveResult::Miss { coord }
            | MoveResult::Hit { coord }
            | MoveResult::Sunk { coord, .. }
            | MoveResult::Win { coord, .. } => *coord,
        }
    }

    /// Cells of the ship this shot sank, if any.
    pub fn sunk_coords(&self) -> Option<&[Coord]> {
        match self {
            MoveResult::Sunk { sunk_coords, .. } | MoveResult::Win { sunk_coords, .. } => {
                Some(sunk_coords)
            }
            _ => None,
        }
    }

    pub fn revealed_cells(&self) -> &[Coord] {
        match self {
            MoveResult::Sunk { revealed_cells, .. } | MoveResult::Win { revealed_cells, .. } => {
                revealed_cells
            }
            _ => &[],
        }
    }
}

/// The aggregate root of one match.
///
/// Callers must serialise access per match; nothing here locks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchState {
    pub id: String,
    pub status: MatchStatus,
    /// `None` only while placing.
    pub current_turn: Option<Side>,
    pub winner: Option<Side>,
    pub board_a: Board,
    pub board_b: Board,
    /// What A has learned about B's board.
    pub fog_for_a: Fog,
    /// What B has learned about A's board.
    pub fog_for_b: Fog,
    pub rules: Rules,
    /// Increments only when the turn actually passes.
    pub turn_no: u32,
}

/// The client-safe projection of a match for one player.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PublicMatchView {
    pub id: String,
    pub status: MatchStatus,
    pub current_turn: Option<Side>,
    pub winner: Option<Side>,
    pub fog: Fog,
    pub rules: Rules,
    pub turn_no: u32,
}

pub fn create_match(id: impl Into<String>, overrides: RulesOverrides) -> MatchState {
    MatchState::new(id, Rules::with_overrides(overrides))
}

impl MatchState {
    pub fn new(id: impl Into<String>, rules: Rules) -> Self {
        Self {
            id: id.into(),
            status: MatchStatus::Placing,
            current_turn: None,
            winner: None,
            board_a: Board::default(),
            board_b: Board::default(),
            fog_for_a: Fog::new(),
            fog_for_b: Fog::new(),
            rules,
            turn_no: 0,
        }
    }

    pub fn board(&self, side: Side) -> &Board {
        match side {
            Side::A => &self.board_a,
            Side::B => &self.board_b,
        }
    }

    /// The fog `side` holds about its opponent.
    pub fn fog(&self, side: Side) -> &Fog {
        match side {
            Side::A => &self.fog_for_a,
            Side::B => &self.fog_for_b,
        }
    }

    /// The fog the opponent of `side` holds about `side`'s board.
    pub fn opponent_fog(&self, side: Side) -> &Fog {
        self.fog(side.opponent())
    }

    /// Store a validated fleet for `player`. Starts the match, with a random
    /// first mover, once both sides have placed. Re-placing before the other
    /// side has placed overwrites the earlier fleet.
    pub fn place_fleet<R: Rng + ?Sized>(
        &mut self,
        player: Side,
        fleet: Fleet,
        rng: &mut R,
    ) -> Result<(), GameError> {
        if self.status != MatchStatus::Placing {
            return Err(GameError::MatchNotInProgress {
                status: self.status,
            });
        }
        validate_fleet(&fleet, self.rules.allow_touching)?;

        let board = Board::new(fleet);
        match player {
            Side::A => self.board_a = board,
            Side::B => self.board_b = board,
        }
        debug!("match {}: side {} placed its fleet", self.id, player);

        if self.board_a.has_ships() && self.board_b.has_ships() {
            let first = if rng.random_bool(0.5) { Side::A } else { Side::B };
            self.status = MatchStatus::InProgress;
            self.current_turn = Some(first);
            self.turn_no = 1;
            debug!("match {}: started, side {} moves first", self.id, first);
        }
        Ok(())
    }

    /// Fire at `coord` as `attacker`.
    ///
    /// `index_a`/`index_b` must be built from the current fleets of A and B.
    pub fn apply_move(
        &mut self,
        attacker: Side,
        coord: Coord,
        index_a: &ShipIndex,
        index_b: &ShipIndex,
    ) -> Result<MoveResult, GameError> {
        if self.status != MatchStatus::InProgress {
            return Err(GameError::MatchNotInProgress {
                status: self.status,
            });
        }
        if self.current_turn != Some(attacker) {
            return Err(GameError::NotYourTurn {
                attempted: attacker,
            });
        }
        if !coord.in_bounds() {
            return Err(GameError::OutOfBounds(coord));
        }

        let repeat_on_hit = self.rules.repeat_turn_on_hit;
        let (board, fog, index) = match attacker {
            Side::A => (&mut self.board_b, &mut self.fog_for_a, index_b),
            Side::B => (&mut self.board_a, &mut self.fog_for_b, index_a),
        };
        if board.already_fired(coord) {
            return Err(GameError::AlreadyFired(coord));
        }

        let Some(ship_id) = index.owner(coord) else {
            board.misses.insert(coord)?;
            fog.mark(coord, CellMark::Miss);
            trace!("match {}: {} fired at {} and missed", self.id, attacker, coord);
            self.pass_turn();
            return Ok(MoveResult::Miss { coord });
        };

        board.hits.insert(coord)?;
        fog.mark(coord, CellMark::Hit);

        let ship = match board.ship(ship_id) {
            Some(ship) if is_ship_sunk(ship, &board.hits) => ship.clone(),
            _ => {
                trace!("match {}: {} hit at {}", self.id, attacker, coord);
                if !repeat_on_hit {
                    self.pass_turn();
                }
                return Ok(MoveResult::Hit { coord });
            }
        };

        board.sunk_ship_ids.insert(ship.id.clone());
        let sunk_coords: Vec<Coord> = ship.cells().collect();
        for &cell in &sunk_coords {
            fog.mark(cell, CellMark::Sunk);
        }
        let revealed_cells = reveal_adjacent_cells(&ship, board, fog, index);

        if board.all_sunk() {
            self.status = MatchStatus::Finished;
            self.winner = Some(attacker);
            debug!(
                "match {}: {} sank {} and won on turn {}",
                self.id, attacker, ship.id, self.turn_no
            );
            return Ok(MoveResult::Win {
                coord,
                ship_id: ship.id,
                sunk_coords,
                revealed_cells,
            });
        }

        trace!("match {}: {} sank {}", self.id, attacker, ship.id);
        if !repeat_on_hit {
            self.pass_turn();
        }
        Ok(MoveResult::Sunk {
            coord,
            ship_id: ship.id,
            sunk_coords,
            revealed_cells,
        })
    }

    fn pass_turn(&mut self) {
        self.current_turn = self.current_turn.map(Side::opponent);
        self.turn_no += 1;
    }

    /// The only view of a match that may be handed to `player`'s client.
    pub fn public_state(&self, player: Side) -> PublicMatchView {
        PublicMatchView {
            id: self.id.clone(),
            status: self.status,
            current_turn: self.current_turn,
            winner: self.winner,
            fog: self.fog(player).clone(),
            rules: self.rules,
            turn_no: self.turn_no,
        }
    }
}

pub fn place_fleet<R: Rng + ?Sized>(
    state: &mut MatchState,
    player: Side,
    fleet: Fleet,
    rng: &mut R,
) -> Result<(), GameError> {
    state.place_fleet(player, fleet, rng)
}

pub fn apply_move(
    attacker: Side,
    coord: Coord,
    state: &mut MatchState,
    index_a: &ShipIndex,
    index_b: &ShipIndex,
) -> Result<MoveResult, GameError> {
    state.apply_move(attacker, coord, index_a, index_b)
}

pub fn get_public_state(state: &MatchState, player: Side) -> PublicMatchView {
    state.public_state(player)
}
