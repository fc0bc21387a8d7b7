//! Move representation.

use crate::{Piece, Square};
use std::fmt;

/// The four kinds of moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    /// Ordinary move or capture.
    Normal = 0,
    /// Pawn promotion; the promoted-to piece is stored in the move.
    Promotion = 1,
    /// En passant capture.
    EnPassant = 2,
    /// Castling, encoded as king origin -> rook origin.
    Castling = 3,
}

/// A chess move.
///
/// Encoded compactly in 16 bits:
/// - bits 0-5: destination square
/// - bits 6-11: origin square
/// - bits 12-13: promotion piece (offset from knight, promotion moves only)
/// - bits 14-15: [`MoveKind`]
///
/// Castling moves store the king's origin as `from` and the rook's origin
/// as `to`. The king's and rook's landing squares are the same as in
/// standard chess (g/c and f/d files), which makes the encoding uniform
/// across standard chess and Chess960; resolving the landing squares is
/// the move maker's job.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// Creates an ordinary move.
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Move((to.index() as u16) | ((from.index() as u16) << 6))
    }

    /// Creates a promotion move.
    ///
    /// `promo` must be one of knight, bishop, rook, or queen.
    #[inline]
    pub const fn promotion(from: Square, to: Square, promo: Piece) -> Self {
        debug_assert!(matches!(
            promo,
            Piece::Knight | Piece::Bishop | Piece::Rook | Piece::Queen
        ));
        let promo_bits = (promo as u16 - Piece::Knight as u16) << 12;
        Move(
            (to.index() as u16)
                | ((from.index() as u16) << 6)
                | promo_bits
                | ((MoveKind::Promotion as u16) << 14),
        )
    }

    /// Creates an en passant capture.
    #[inline]
    pub const fn en_passant(from: Square, to: Square) -> Self {
        Move(
            (to.index() as u16)
                | ((from.index() as u16) << 6)
                | ((MoveKind::EnPassant as u16) << 14),
        )
    }

    /// Creates a castling move from the king's and rook's origin squares.
    #[inline]
    pub const fn castling(king_from: Square, rook_from: Square) -> Self {
        Move(
            (rook_from.index() as u16)
                | ((king_from.index() as u16) << 6)
                | ((MoveKind::Castling as u16) << 14),
        )
    }

    /// Returns the origin square.
    #[inline]
    pub const fn from(self) -> Square {
        // SAFETY: masked to 6 bits, always a valid square index
        unsafe { Square::from_index_unchecked(((self.0 >> 6) & 0x3F) as u8) }
    }

    /// Returns the destination square (the rook's origin for castling).
    #[inline]
    pub const fn to(self) -> Square {
        // SAFETY: masked to 6 bits, always a valid square index
        unsafe { Square::from_index_unchecked((self.0 & 0x3F) as u8) }
    }

    /// Returns the kind of this move.
    #[inline]
    pub const fn kind(self) -> MoveKind {
        match self.0 >> 14 {
            0 => MoveKind::Normal,
            1 => MoveKind::Promotion,
            2 => MoveKind::EnPassant,
            _ => MoveKind::Castling,
        }
    }

    /// Returns the promoted-to piece for promotion moves.
    #[inline]
    pub const fn promotion_piece(self) -> Option<Piece> {
        if !matches!(self.kind(), MoveKind::Promotion) {
            return None;
        }
        Some(match (self.0 >> 12) & 0x3 {
            0 => Piece::Knight,
            1 => Piece::Bishop,
            2 => Piece::Rook,
            _ => Piece::Queen,
        })
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    ///
    /// Castling is rendered with the king's landing square ("e1g1"), not
    /// the rook origin stored in the encoding.
    pub fn to_uci(self) -> String {
        let to = match self.kind() {
            MoveKind::Castling => {
                let from = self.from();
                let file = if self.to().index() > from.index() {
                    crate::File::G
                } else {
                    crate::File::C
                };
                Square::new(file, from.rank())
            }
            _ => self.to(),
        };
        let promo = match self.promotion_piece() {
            Some(Piece::Knight) => "n",
            Some(Piece::Bishop) => "b",
            Some(Piece::Rook) => "r",
            Some(Piece::Queen) => "q",
            _ => "",
        };
        format!("{}{}{}", self.from(), to, promo)
    }

    /// Parses a move from UCI notation.
    ///
    /// Produces a normal or promotion move; castling and en passant
    /// cannot be told apart from ordinary king/pawn moves without a
    /// position, so resolving those is left to the caller.
    pub fn from_uci(s: &str) -> Option<Self> {
        if s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        if s.len() == 5 {
            let promo = match s.chars().nth(4)? {
                'n' | 'N' => Piece::Knight,
                'b' | 'B' => Piece::Bishop,
                'r' | 'R' => Piece::Rook,
                'q' | 'Q' => Piece::Queen,
                _ => return None,
            };
            Some(Move::promotion(from, to, promo))
        } else {
            Some(Move::normal(from, to))
        }
    }

    /// A null move (used as placeholder, not a legal move).
    pub const NULL: Move = Move(0);
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{File, Rank};

    #[test]
    fn move_encoding() {
        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);
        let m = Move::normal(e2, e4);

        assert_eq!(m.from(), e2);
        assert_eq!(m.to(), e4);
        assert_eq!(m.kind(), MoveKind::Normal);
        assert_eq!(m.promotion_piece(), None);
    }

    #[test]
    fn promotion_encoding() {
        let e7 = Square::new(File::E, Rank::R7);
        let e8 = Square::E8;

        for promo in Piece::PROMOTIONS {
            let m = Move::promotion(e7, e8, promo);
            assert_eq!(m.from(), e7);
            assert_eq!(m.to(), e8);
            assert_eq!(m.kind(), MoveKind::Promotion);
            assert_eq!(m.promotion_piece(), Some(promo));
        }
    }

    #[test]
    fn castling_encoding_stores_rook_origin() {
        let m = Move::castling(Square::E1, Square::H1);
        assert_eq!(m.from(), Square::E1);
        assert_eq!(m.to(), Square::H1);
        assert_eq!(m.kind(), MoveKind::Castling);
        assert_eq!(m.promotion_piece(), None);

        // Chess960: rook may start next to the king
        let m = Move::castling(Square::E1, Square::B1);
        assert_eq!(m.from(), Square::E1);
        assert_eq!(m.to(), Square::B1);
        assert_eq!(m.kind(), MoveKind::Castling);
    }

    #[test]
    fn en_passant_encoding() {
        let e5 = Square::new(File::E, Rank::R5);
        let d6 = Square::new(File::D, Rank::R6);
        let m = Move::en_passant(e5, d6);
        assert_eq!(m.from(), e5);
        assert_eq!(m.to(), d6);
        assert_eq!(m.kind(), MoveKind::EnPassant);
    }

    #[test]
    fn move_uci() {
        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(Move::normal(e2, e4).to_uci(), "e2e4");

        let e7 = Square::new(File::E, Rank::R7);
        let promo = Move::promotion(e7, Square::E8, Piece::Queen);
        assert_eq!(promo.to_uci(), "e7e8q");

        // Castling prints the king's destination
        assert_eq!(Move::castling(Square::E1, Square::H1).to_uci(), "e1g1");
        assert_eq!(Move::castling(Square::E1, Square::A1).to_uci(), "e1c1");
        assert_eq!(Move::castling(Square::E8, Square::A8).to_uci(), "e8c8");
    }

    #[test]
    fn move_from_uci() {
        let m = Move::from_uci("e2e4").unwrap();
        assert_eq!(m.from().to_algebraic(), "e2");
        assert_eq!(m.to().to_algebraic(), "e4");
        assert_eq!(m.kind(), MoveKind::Normal);

        let promo = Move::from_uci("e7e8q").unwrap();
        assert_eq!(promo.kind(), MoveKind::Promotion);
        assert_eq!(promo.promotion_piece(), Some(Piece::Queen));

        assert_eq!(
            Move::from_uci("e7e8n").unwrap().promotion_piece(),
            Some(Piece::Knight)
        );
        assert_eq!(
            Move::from_uci("e7e8R").unwrap().promotion_piece(),
            Some(Piece::Rook)
        );

        assert!(Move::from_uci("invalid").is_none());
        assert!(Move::from_uci("e2e9").is_none());
        assert!(Move::from_uci("e7e8x").is_none());
        assert!(Move::from_uci("e2").is_none());
        assert!(Move::from_uci("e2e4qq").is_none());
    }

    #[test]
    fn move_null() {
        let null = Move::NULL;
        assert_eq!(null.from().index(), 0);
        assert_eq!(null.to().index(), 0);
        assert_eq!(null.kind(), MoveKind::Normal);
    }

    proptest::proptest! {
        #[test]
        fn encoding_preserves_squares(from_idx in 0u8..64, to_idx in 0u8..64) {
            let from = Square::from_index(from_idx).unwrap();
            let to = Square::from_index(to_idx).unwrap();

            for m in [
                Move::normal(from, to),
                Move::en_passant(from, to),
                Move::castling(from, to),
                Move::promotion(from, to, Piece::Rook),
            ] {
                proptest::prop_assert_eq!(m.from(), from);
                proptest::prop_assert_eq!(m.to(), to);
            }
        }
    }
}
