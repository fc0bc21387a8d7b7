//! Perft node counting for move generator validation.
//!
//! Perft walks the game tree to a fixed depth and counts leaf nodes.
//! The totals for a handful of well-known positions are documented to
//! many digits, so a single wrong move in any category shows up as a
//! mismatched count.

use super::generate_legal;
use crate::Position;

/// Counts leaf nodes at the given depth.
///
/// Depth 1 is answered from the move list length without making any
/// moves (bulk counting).
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal(position);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .as_slice()
        .iter()
        .map(|m| perft(&position.make_move(*m), depth - 1))
        .sum()
}

/// Perft split by root move, sorted by UCI name.
///
/// Comparing the per-move counts against another generator narrows a
/// wrong total down to a single root move.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = generate_legal(position)
        .as_slice()
        .iter()
        .map(|m| {
            let child = position.make_move(*m);
            (m.to_uci(), perft(&child, depth.saturating_sub(1)))
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
