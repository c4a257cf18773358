//! Core naval combat rules engine.
//!
//! Pure, synchronous game logic over in-memory state: fleet validation, the
//! match state machine, move resolution and the computer opponent. Nothing
//! here performs I/O or locking; callers own persistence, transport and
//! per-match mutual exclusion.

pub mod ai;
pub mod bitboard;
pub mod board;
pub mod common;
pub mod config;
pub mod fleet;
pub mod game;
pub mod geometry;
pub mod ship;

// Re-export commonly used types
pub use ai::{
    create_ai_state, get_ai_move, get_ai_state_debug_info, get_line_targets, update_ai_state,
    AiLevel, AiState, Probabilities,
};
pub use bitboard::{BitBoard, CoordSet};
pub use board::{
    build_ship_index, get_ship_adjacent_cells, is_ship_sunk, make_board, make_empty_fog,
    reveal_adjacent_cells, Board, CellMark, Fog, ShipIndex,
};
pub use common::{ErrorCode, FleetViolation, GameError};
pub use config::*;
pub use fleet::{create_default_fleet, random_fleet, random_fleet_seeded, validate_fleet, Fleet};
pub use game::{
    apply_move, create_match, get_public_state, place_fleet, MatchState, MatchStatus, MoveKind,
    MoveResult, PublicMatchView, Side,
};
pub use geometry::{coord_key, from_human, in_bounds, to_human, Coord};
pub use ship::{parse_placement, ship_cells, Orientation, Ship, ShipId};
