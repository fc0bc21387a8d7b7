//! Board-independent chess primitives.
//!
//! Everything the move generator builds on lives here: [`Square`],
//! [`File`], and [`Rank`] coordinates, [`Piece`] and [`Color`], the
//! packed [`Move`] encoding, and field-level FEN parsing via
//! [`FenParser`].

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::{Move, MoveKind};
pub use piece::Piece;
pub use square::{File, Rank, Square};
