//! Piece types and their FEN spellings.

use crate::Color;

/// The six piece types, ordered so the discriminant doubles as a table index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// Every piece type, in discriminant order.
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// The pieces a pawn may promote to, weakest first.
    pub const PROMOTIONS: [Piece; 4] =
        [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen];

    /// Index into per-piece tables (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// FEN letter for this piece: uppercase for White, lowercase for Black.
    #[inline]
    pub const fn to_fen_char(self, color: Color) -> char {
        const LETTERS: [[char; 6]; 2] = [
            ['P', 'N', 'B', 'R', 'Q', 'K'],
            ['p', 'n', 'b', 'r', 'q', 'k'],
        ];
        LETTERS[color.index()][self.index()]
    }

    /// Parses a FEN letter; case selects the color.
    pub const fn from_fen_char(c: char) -> Option<(Piece, Color)> {
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some((piece, color))
    }

    /// True for the ray-moving pieces: bishop, rook, and queen.
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, Piece::Bishop | Piece::Rook | Piece::Queen)
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const NAMES: [&str; 6] = ["Pawn", "Knight", "Bishop", "Rook", "Queen", "King"];
        f.write_str(NAMES[self.index()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fen_letters_round_trip() {
        for piece in Piece::ALL {
            for color in [Color::White, Color::Black] {
                let c = piece.to_fen_char(color);
                assert_eq!(Piece::from_fen_char(c), Some((piece, color)));
            }
        }
    }

    #[test]
    fn fen_letter_case_selects_color() {
        assert_eq!(Piece::from_fen_char('K'), Some((Piece::King, Color::White)));
        assert_eq!(Piece::from_fen_char('k'), Some((Piece::King, Color::Black)));
        assert_eq!(Piece::from_fen_char('x'), None);
        assert_eq!(Piece::from_fen_char('1'), None);
    }

    #[test]
    fn sliders_are_bishop_rook_queen() {
        let sliders: Vec<Piece> = Piece::ALL.into_iter().filter(|p| p.is_slider()).collect();
        assert_eq!(sliders, [Piece::Bishop, Piece::Rook, Piece::Queen]);
    }

    #[test]
    fn promotions_exclude_pawn_and_king() {
        assert!(!Piece::PROMOTIONS.contains(&Piece::Pawn));
        assert!(!Piece::PROMOTIONS.contains(&Piece::King));
        assert_eq!(Piece::PROMOTIONS.len(), 4);
    }
}
