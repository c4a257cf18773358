//! Player trait and implementations
//!
//! A Player is one seat's decision-maker. The match itself lives in
//! [`crate::core::MatchState`]; players only see their own fog view and the
//! results of their own shots.

use rand::rngs::SmallRng;

use crate::core::{Coord, Fleet, Fog, GameError, MoveResult, Rules};

/// Interface implemented by different player types.
pub trait Player: Send {
    /// Produce a fleet legal under `rules`.
    fn place_fleet(&mut self, rng: &mut SmallRng, rules: &Rules) -> Result<Fleet, GameError>;

    /// Choose the next target given what this player knows of the opponent.
    fn select_target(&mut self, rng: &mut SmallRng, fog: &Fog) -> Result<Coord, GameError>;

    /// Inform the player of the result of its last shot.
    fn handle_move_result(&mut self, _result: &MoveResult) {}
}

pub mod ai;
pub use ai::AiPlayer;
