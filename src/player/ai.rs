use rand::rngs::SmallRng;

use crate::core::{
    create_ai_state, get_ai_move, random_fleet, update_ai_state, AiLevel, AiState, Coord, Fleet,
    Fog, GameError, MoveResult, Rules,
};

use super::Player;

/// Computer player driven by [`AiState`].
pub struct AiPlayer {
    state: AiState,
}

impl AiPlayer {
    pub fn new(level: AiLevel) -> Self {
        Self {
            state: create_ai_state(level),
        }
    }

    pub fn state(&self) -> &AiState {
        &self.state
    }
}

impl Player for AiPlayer {
    fn place_fleet(&mut self, rng: &mut SmallRng, rules: &Rules) -> Result<Fleet, GameError> {
        random_fleet(rng, rules.allow_touching)
    }

    fn select_target(&mut self, rng: &mut SmallRng, fog: &Fog) -> Result<Coord, GameError> {
        get_ai_move(fog, &mut self.state, rng)
    }

    fn handle_move_result(&mut self, result: &MoveResult) {
        update_ai_state(
            &mut self.state,
            result.coord(),
            result.kind(),
            result.sunk_coords(),
        );
    }
}
