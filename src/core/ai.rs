// Computer opponent: three difficulty tiers sharing one scratch state.
// The AI only ever reads its own fog view and learns from move outcomes fed
// back through `update_ai_state`.

use std::collections::VecDeque;

use log::trace;
use rand::seq::IndexedRandom;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::board::{CellMark, Fog};
use crate::core::common::GameError;
use crate::core::config::BOARD_SIZE;
use crate::core::game::MoveKind;
use crate::core::geometry::Coord;

const GRID_SIZE: usize = BOARD_SIZE as usize;

/// Density map indexed `[y][x]`.
pub type Probabilities = [[f64; GRID_SIZE]; GRID_SIZE];

/// Factor applied around a sunk ship; nothing else can sit there.
const SUNK_NEIGHBOR_DAMPING: f64 = 0.1;
/// Factor applied to the cells extending the line of a damaged ship.
const LINE_BOOST: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum AiLevel {
    /// Uniformly random unexplored cell.
    Easy,
    /// Random search, then works the neighbours of each hit.
    Medium,
    /// Medium plus a center-biased density map and line extrapolation.
    Hard,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AiState {
    pub level: AiLevel,
    pub last_hit: Option<Coord>,
    pub target_queue: VecDeque<Coord>,
    pub hunt_mode: bool,
    /// Hits on the ship currently being worked, in shot order.
    pub hit_sequence: Vec<Coord>,
    pub probabilities: Option<Probabilities>,
}

pub fn create_ai_state(level: AiLevel) -> AiState {
    AiState {
        level,
        last_hit: None,
        target_queue: VecDeque::new(),
        hunt_mode: false,
        hit_sequence: Vec::new(),
        probabilities: (level == AiLevel::Hard).then(center_biased_probabilities),
    }
}

/// `max(0.1, 2 - d / 5)` where `d` is the Manhattan distance to the board's
/// geometric center.
fn center_biased_probabilities() -> Probabilities {
    let center = (GRID_SIZE as f64 - 1.0) / 2.0;
    let mut matrix = [[0.0f64; GRID_SIZE]; GRID_SIZE];
    for (y, row) in matrix.iter_mut().enumerate() {
        for (x, p) in row.iter_mut().enumerate() {
            let d = (x as f64 - center).abs() + (y as f64 - center).abs();
            *p = (2.0 - d / 5.0).max(0.1);
        }
    }
    matrix
}

/// Choose the next cell to fire at. Pops stale entries off the target queue.
pub fn get_ai_move<R: Rng + ?Sized>(
    fog: &Fog,
    state: &mut AiState,
    rng: &mut R,
) -> Result<Coord, GameError> {
    let unknown = fog.unknown_cells();
    if unknown.is_empty() {
        return Err(GameError::BoardExhausted);
    }

    let choice = match state.level {
        AiLevel::Easy => None,
        AiLevel::Medium => next_queued_target(fog, state),
        AiLevel::Hard => next_queued_target(fog, state)
            .or_else(|| state.probabilities.as_ref().and_then(|p| best_cell(p, &unknown))),
    };
    let coord = match choice {
        Some(coord) => coord,
        None => *unknown.choose(rng).ok_or(GameError::BoardExhausted)?,
    };
    trace!("ai {:?} chose {}", state.level, coord);
    Ok(coord)
}

fn next_queued_target(fog: &Fog, state: &mut AiState) -> Option<Coord> {
    while let Some(coord) = state.target_queue.pop_front() {
        if fog.get(coord) == CellMark::Unknown {
            return Some(coord);
        }
    }
    None
}

/// Highest-probability cell among `candidates`; the first one wins ties.
fn best_cell(probabilities: &Probabilities, candidates: &[Coord]) -> Option<Coord> {
    let mut best: Option<(Coord, f64)> = None;
    for &c in candidates {
        let p = probabilities[c.y as usize][c.x as usize];
        if best.map_or(true, |(_, bp)| p > bp) {
            best = Some((c, p));
        }
    }
    best.map(|(c, _)| c)
}

/// Feed the outcome of the AI's last shot back into its state. `sunk_coords`
/// should carry the sunk ship's cells for `Sunk` and `Win` outcomes.
pub fn update_ai_state(
    state: &mut AiState,
    coord: Coord,
    kind: MoveKind,
    sunk_coords: Option<&[Coord]>,
) {
    if state.level == AiLevel::Easy {
        return;
    }

    match kind {
        MoveKind::Miss => {
            set_probability(state, coord, 0.0);
            if state.level == AiLevel::Hard && state.hunt_mode && state.hit_sequence.len() >= 2 {
                state.target_queue = get_line_targets(&state.hit_sequence).into();
            }
        }
        MoveKind::Hit => {
            set_probability(state, coord, 0.0);
            state.hunt_mode = true;
            state.last_hit = Some(coord);
            state.hit_sequence.push(coord);
            for n in coord.neighbors4() {
                if !state.target_queue.contains(&n) {
                    state.target_queue.push_back(n);
                }
            }
        }
        MoveKind::Sunk | MoveKind::Win => {
            state.hunt_mode = false;
            state.last_hit = None;
            state.target_queue.clear();
            state.hit_sequence.clear();
            let cells = sunk_coords.unwrap_or(std::slice::from_ref(&coord));
            if let Some(p) = state.probabilities.as_mut() {
                damp_around(p, cells);
            }
        }
    }

    if state.hunt_mode && state.hit_sequence.len() >= 2 {
        for target in get_line_targets(&state.hit_sequence) {
            scale_probability(state, target, LINE_BOOST);
        }
    }
}

fn set_probability(state: &mut AiState, coord: Coord, value: f64) {
    if let (Some(p), true) = (state.probabilities.as_mut(), coord.in_bounds()) {
        p[coord.y as usize][coord.x as usize] = value;
    }
}

fn scale_probability(state: &mut AiState, coord: Coord, factor: f64) {
    if let (Some(p), true) = (state.probabilities.as_mut(), coord.in_bounds()) {
        p[coord.y as usize][coord.x as usize] *= factor;
    }
}

/// Zero the sunk cells and damp every cell touching them.
fn damp_around(p: &mut Probabilities, sunk: &[Coord]) {
    let mut seen: Vec<Coord> = Vec::new();
    for cell in sunk {
        for n in cell.neighbors8() {
            if sunk.contains(&n) || seen.contains(&n) {
                continue;
            }
            seen.push(n);
            p[n.y as usize][n.x as usize] *= SUNK_NEIGHBOR_DAMPING;
        }
    }
    for cell in sunk.iter().filter(|c| c.in_bounds()) {
        p[cell.y as usize][cell.x as usize] = 0.0;
    }
}

/// The two cells extending a straight run of hits, one past each end,
/// dropping any that fall off the board.
///
/// The axis comes from the first two hits: equal `y` means horizontal.
pub fn get_line_targets(hit_sequence: &[Coord]) -> Vec<Coord> {
    let (first, second) = match hit_sequence {
        [first, second, ..] => (*first, *second),
        _ => return Vec::new(),
    };
    let targets = if first.y == second.y {
        let min = hit_sequence.iter().map(|c| c.x).min().unwrap_or(first.x);
        let max = hit_sequence.iter().map(|c| c.x).max().unwrap_or(first.x);
        [Coord::new(min - 1, first.y), Coord::new(max + 1, first.y)]
    } else {
        let min = hit_sequence.iter().map(|c| c.y).min().unwrap_or(first.y);
        let max = hit_sequence.iter().map(|c| c.y).max().unwrap_or(first.y);
        [Coord::new(first.x, min - 1), Coord::new(first.x, max + 1)]
    };
    targets.into_iter().filter(Coord::in_bounds).collect()
}

/// One-line summary for logs and debugging output.
pub fn get_ai_state_debug_info(state: &AiState) -> String {
    format!(
        "level={:?} hunt_mode={} queue={} hits={} last_hit={}",
        state.level,
        state.hunt_mode,
        state.target_queue.len(),
        state.hit_sequence.len(),
        state
            .last_hit
            .map_or_else(|| "-".to_string(), |c| c.to_string()),
    )
}
