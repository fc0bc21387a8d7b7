//! Bitboard move generation with category-staged output.
//!
//! This crate provides:
//! - [`Bitboard`] - 64-bit board representation with efficient operations
//! - [`Position`] - Full game state including piece positions, castling rights, etc.
//! - Category-based pseudo-legal generation ([`GenType`]): captures,
//!   quiets, quiet checks, evasions, non-evasions
//! - [`generate_legal`] - full legal move enumeration
//! - Perft validation ([`movegen::perft`])
//!
//! # Architecture
//!
//! The engine uses bitboards for piece representation - each piece type/color
//! combination has a 64-bit integer where each bit represents a square.
//! Sliding attacks come from magic bitboard lookups; generation works
//! destination-first from a per-category target bitboard, so a search
//! can ask for exactly the moves it wants to examine.
//!
//! # Example
//!
//! ```
//! use chess_movegen::{generate_captures, generate_legal, Position};
//!
//! let position = Position::startpos();
//! let legal = generate_legal(&position);
//! assert_eq!(legal.len(), 20);
//!
//! // Nothing hangs in the starting position
//! assert!(generate_captures(&position).is_empty());
//! ```

mod bitboard;
pub mod movegen;
mod position;

pub use bitboard::Bitboard;
pub use movegen::{
    bishop_attacks, generate, generate_captures, generate_evasions, generate_legal,
    generate_non_evasions, generate_quiet_checks, generate_quiets, king_attacks, knight_attacks,
    pawn_attacks, queen_attacks, rook_attacks, CheckInfo, GenType, MoveList,
};
pub use position::{CastlingRights, CastlingSide, Position};
