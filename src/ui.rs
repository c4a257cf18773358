//! Plain-text rendering for the command-line drivers.

use std::fmt::Write;

use crate::core::{Board, CellMark, Coord, Fog, Probabilities, BOARD_SIZE};

const N: usize = BOARD_SIZE as usize;

fn header(out: &mut String, width: usize) {
    out.push_str("   ");
    for c in 0..N {
        let ch = (b'A' + c as u8) as char;
        let _ = write!(out, " {:>width$}", ch, width = width);
    }
    out.push('\n');
}

/// `.` unknown, `o` miss, `X` hit, `#` sunk.
pub fn render_fog(fog: &Fog) -> String {
    let mut out = String::new();
    header(&mut out, 1);
    for (y, row) in fog.rows().iter().enumerate() {
        let _ = write!(out, "{:2} ", y + 1);
        for mark in row {
            let ch = match mark {
                CellMark::Unknown => '.',
                CellMark::Miss => 'o',
                CellMark::Hit => 'X',
                CellMark::Sunk => '#',
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    out
}

/// The owner's view of a board: ships as `S`, plus received hits and misses.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    header(&mut out, 1);
    for y in 0..N {
        let _ = write!(out, "{:2} ", y + 1);
        for x in 0..N {
            let c = Coord::new(x as i32, y as i32);
            let ch = if board.hits.contains(c) {
                'X'
            } else if board.misses.contains(c) {
                'o'
            } else if board.ships.iter().any(|s| s.occupies(c)) {
                'S'
            } else {
                '.'
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    out
}

/// A density map with two decimals per cell.
pub fn render_probabilities(p: &Probabilities) -> String {
    let mut out = String::new();
    header(&mut out, 4);
    for (y, row) in p.iter().enumerate() {
        let _ = write!(out, "{:2} ", y + 1);
        for v in row {
            let _ = write!(out, " {:4.2}", v);
        }
        out.push('\n');
    }
    out
}
