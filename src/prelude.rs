//! Commonly used types and utilities for ease of import.

pub use crate::core::{
    apply_move, build_ship_index, create_ai_state, create_match, create_default_fleet,
    get_ai_move, random_fleet, update_ai_state, validate_fleet, AiLevel, Coord, GameError,
    MatchState, MoveKind, MoveResult, RulesOverrides, Side,
};
pub use crate::{AiPlayer, MatchStore, Player};
