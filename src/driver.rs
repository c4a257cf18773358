//! Self-play loop: two [`Player`]s taking turns through the public core API.

use log::debug;
use rand::rngs::SmallRng;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::core::{
    build_ship_index, AiLevel, GameError, MatchState, MatchStatus, MoveKind, Rules, Side,
};
use crate::player::{AiPlayer, Player};

/// What happened in a completed match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MatchSummary {
    pub id: String,
    pub winner: Side,
    pub turn_no: u32,
    pub shots_a: usize,
    pub shots_b: usize,
    /// Ships A sank.
    pub ships_sunk_a: usize,
    /// Ships B sank.
    pub ships_sunk_b: usize,
}

/// Play a match to completion. Each turn follows the same cycle a networked
/// collaborator would: pick a target from the mover's fog, apply it, then
/// report the result back to the mover.
pub fn play_match(
    id: &str,
    rules: Rules,
    player_a: &mut dyn Player,
    player_b: &mut dyn Player,
    rng: &mut SmallRng,
) -> Result<(MatchState, MatchSummary), GameError> {
    let mut state = MatchState::new(id, rules);
    let fleet_a = player_a.place_fleet(rng, &rules)?;
    state.place_fleet(Side::A, fleet_a, rng)?;
    let fleet_b = player_b.place_fleet(rng, &rules)?;
    state.place_fleet(Side::B, fleet_b, rng)?;

    let index_a = build_ship_index(&state.board_a.ships);
    let index_b = build_ship_index(&state.board_b.ships);

    let (mut shots_a, mut shots_b) = (0usize, 0usize);
    let mut sunk = [0usize; 2];
    while state.status == MatchStatus::InProgress {
        let Some(side) = state.current_turn else { break };
        let player: &mut dyn Player = match side {
            Side::A => &mut *player_a,
            Side::B => &mut *player_b,
        };
        let coord = player.select_target(rng, state.fog(side))?;
        let result = state.apply_move(side, coord, &index_a, &index_b)?;
        player.handle_move_result(&result);

        let slot = match side {
            Side::A => {
                shots_a += 1;
                0
            }
            Side::B => {
                shots_b += 1;
                1
            }
        };
        if matches!(result.kind(), MoveKind::Sunk | MoveKind::Win) {
            sunk[slot] += 1;
        }
    }

    let winner = state.winner.ok_or(GameError::MatchNotInProgress {
        status: state.status,
    })?;
    debug!(
        "match {} finished: winner {} after {} shots",
        id,
        winner,
        shots_a + shots_b
    );
    let summary = MatchSummary {
        id: id.to_string(),
        winner,
        turn_no: state.turn_no,
        shots_a,
        shots_b,
        ships_sunk_a: sunk[0],
        ships_sunk_b: sunk[1],
    };
    Ok((state, summary))
}

/// [`play_match`] between two computer players of the given levels.
pub fn play_ai_match(
    id: &str,
    levels: (AiLevel, AiLevel),
    rules: Rules,
    rng: &mut SmallRng,
) -> Result<(MatchState, MatchSummary), GameError> {
    let mut a = AiPlayer::new(levels.0);
    let mut b = AiPlayer::new(levels.1);
    play_match(id, rules, &mut a, &mut b, rng)
}
