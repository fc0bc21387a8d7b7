//! Files, ranks, and squares in little-endian rank-file order.

use crate::Color;
use std::fmt;

/// A board file, a through h.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// All eight files, a first.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// File with the given index, if it is below 8.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(File::ALL[index as usize])
        } else {
            None
        }
    }

    /// Parses a file letter, either case.
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        let b = c.to_ascii_lowercase() as u32;
        if b >= 'a' as u32 && b <= 'h' as u32 {
            Some(File::ALL[(b - 'a' as u32) as usize])
        } else {
            None
        }
    }

    /// Index 0-7.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Lowercase file letter.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A board rank, 1 through 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    /// All eight ranks, rank 1 first.
    pub const ALL: [Rank; 8] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
    ];

    /// Rank with the given index, if it is below 8.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Rank::ALL[index as usize])
        } else {
            None
        }
    }

    /// Parses a rank digit, '1' through '8'.
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        let b = c as u32;
        if b >= '1' as u32 && b <= '8' as u32 {
            Some(Rank::ALL[(b - '1' as u32) as usize])
        } else {
            None
        }
    }

    /// Index 0-7.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Rank digit character.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }

    /// This rank seen from the given color's side of the board.
    ///
    /// White sees the board as-is; for Black the board is mirrored
    /// vertically, so e.g. `R7.relative_to(Black)` is `R2`.
    #[inline]
    pub const fn relative_to(self, color: Color) -> Rank {
        match color {
            Color::White => self,
            Color::Black => Rank::ALL[7 - self.index() as usize],
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A board square, indexed 0-63.
///
/// The mapping is little-endian rank-file: a1 = 0, h1 = 7, a2 = 8,
/// h8 = 63. One rank up is +8, one file east is +1.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square(u8);

impl Square {
    /// Square at the intersection of a file and a rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square(rank.index() * 8 + file.index())
    }

    /// Square with the given index, if it is below 64.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Square with the given index, skipping the bounds check.
    ///
    /// # Safety
    /// The index must be in the range 0-63.
    #[inline]
    pub const unsafe fn from_index_unchecked(index: u8) -> Self {
        debug_assert!(index < 64);
        Square(index)
    }

    /// Parses a square in algebraic notation, e.g. "e4".
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        match (
            File::from_char(bytes[0] as char),
            Rank::from_char(bytes[1] as char),
        ) {
            (Some(file), Some(rank)) => Some(Square::new(file, rank)),
            _ => None,
        }
    }

    /// Index 0-63.
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// File of this square.
    #[inline]
    pub const fn file(self) -> File {
        File::ALL[(self.0 % 8) as usize]
    }

    /// Rank of this square.
    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self.0 / 8) as usize]
    }

    /// Algebraic notation, e.g. "e4".
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    /// A u64 with only this square's bit set.
    #[inline]
    pub const fn bitboard(self) -> u64 {
        1u64 << self.0
    }

    /// Offsets this square by a signed index delta (+8 is one rank up,
    /// +1 is one file east).
    ///
    /// The caller must ensure the result stays on the board; move
    /// generation only calls this to walk back from a destination that
    /// was itself produced by the inverse shift.
    #[inline]
    pub const fn shifted(self, delta: i8) -> Square {
        let index = self.0 as i8 + delta;
        debug_assert!(0 <= index && index < 64);
        Square(index as u8)
    }

    /// This square seen from the given color's side of the board
    /// (vertical mirror for Black).
    #[inline]
    pub const fn relative_to(self, color: Color) -> Square {
        match color {
            Color::White => self,
            Color::Black => Square(self.0 ^ 56),
        }
    }

    // Back-rank squares, named because castling logic refers to them.
    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_and_rank_compose_into_index() {
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(e4.index(), 28);
        assert_eq!(e4.file(), File::E);
        assert_eq!(e4.rank(), Rank::R4);
        assert_eq!(Square::new(File::A, Rank::R1), Square::A1);
        assert_eq!(Square::new(File::H, Rank::R8), Square::H8);
    }

    #[test]
    fn from_index_bounds() {
        assert_eq!(Square::from_index(0), Some(Square::A1));
        assert_eq!(Square::from_index(63), Some(Square::H8));
        assert_eq!(Square::from_index(64), None);
        assert_eq!(File::from_index(8), None);
        assert_eq!(Rank::from_index(8), None);
    }

    #[test]
    fn algebraic_round_trip() {
        for index in 0..64 {
            let sq = Square::from_index(index).unwrap();
            assert_eq!(Square::from_algebraic(&sq.to_algebraic()), Some(sq));
        }
        assert_eq!(Square::from_algebraic("e4").unwrap().index(), 28);
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic(""), None);
        assert_eq!(Square::from_algebraic("e44"), None);
    }

    #[test]
    fn file_letters_accept_either_case() {
        assert_eq!(File::from_char('a'), Some(File::A));
        assert_eq!(File::from_char('H'), Some(File::H));
        assert_eq!(File::from_char('i'), None);
        assert_eq!(File::from_char('3'), None);
    }

    #[test]
    fn single_bit_bitboards() {
        assert_eq!(Square::A1.bitboard(), 1);
        assert_eq!(Square::H1.bitboard(), 1 << 7);
        assert_eq!(Square::A8.bitboard(), 1 << 56);
    }

    #[test]
    fn shifted_walks_ranks_and_files() {
        let e2 = Square::new(File::E, Rank::R2);
        assert_eq!(e2.shifted(8), Square::new(File::E, Rank::R3));
        assert_eq!(e2.shifted(-8), Square::E1);
        assert_eq!(e2.shifted(9), Square::new(File::F, Rank::R3));
        assert_eq!(e2.shifted(7), Square::new(File::D, Rank::R3));
    }

    #[test]
    fn relative_to_mirrors_for_black() {
        assert_eq!(Square::E1.relative_to(Color::White), Square::E1);
        assert_eq!(Square::E1.relative_to(Color::Black), Square::E8);
        assert_eq!(Square::G1.relative_to(Color::Black), Square::G8);
        assert_eq!(Rank::R7.relative_to(Color::White), Rank::R7);
        assert_eq!(Rank::R7.relative_to(Color::Black), Rank::R2);
        assert_eq!(Rank::R3.relative_to(Color::Black), Rank::R6);
    }
}
