//! Attack table generation and lookup for all piece types, plus the
//! line and between-square masks used for pin and check geometry.

use crate::Bitboard;
use chess_core::{Color, Piece, Square};

pub use super::magics::{bishop_attacks, queen_attacks, rook_attacks};

/// Precomputed knight attack tables.
const KNIGHT_ATTACKS: [Bitboard; 64] = compute_knight_attacks();

/// Precomputed king attack tables.
const KING_ATTACKS: [Bitboard; 64] = compute_king_attacks();

/// Precomputed pawn attack tables [color][square].
const PAWN_ATTACKS: [[Bitboard; 64]; 2] = compute_pawn_attacks();

/// Empty-board bishop attacks per square.
static PSEUDO_BISHOP: [Bitboard; 64] = compute_slider_pseudo_attacks(&BISHOP_DIRS);

/// Empty-board rook attacks per square.
static PSEUDO_ROOK: [Bitboard; 64] = compute_slider_pseudo_attacks(&ROOK_DIRS);

/// For aligned squares a and b, the full board line through both
/// (endpoints included); empty otherwise.
static LINE: [[Bitboard; 64]; 64] = compute_lines();

/// Squares strictly between a and b when they share a rank, file, or
/// diagonal; empty otherwise.
static BETWEEN: [[Bitboard; 64]; 64] = compute_between();

const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Returns knight attacks from the given square.
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index() as usize]
}

/// Returns king attacks from the given square.
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index() as usize]
}

/// Returns pawn attacks from the given square for the given color.
#[inline]
pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index() as usize]
}

/// Returns the attacks of a non-pawn piece from the given square with the
/// given occupancy.
#[inline]
pub fn piece_attacks(piece: Piece, sq: Square, occupied: Bitboard) -> Bitboard {
    match piece {
        Piece::Knight => knight_attacks(sq),
        Piece::Bishop => bishop_attacks(sq, occupied),
        Piece::Rook => rook_attacks(sq, occupied),
        Piece::Queen => queen_attacks(sq, occupied),
        Piece::King => king_attacks(sq),
        Piece::Pawn => unreachable!("pawn attacks depend on color"),
    }
}

/// Returns a sliding piece's attacks on an otherwise empty board.
#[inline]
pub fn pseudo_attacks(piece: Piece, sq: Square) -> Bitboard {
    match piece {
        Piece::Bishop => PSEUDO_BISHOP[sq.index() as usize],
        Piece::Rook => PSEUDO_ROOK[sq.index() as usize],
        Piece::Queen => {
            PSEUDO_BISHOP[sq.index() as usize] | PSEUDO_ROOK[sq.index() as usize]
        }
        _ => unreachable!("only sliders have pseudo attack masks"),
    }
}

/// Returns the full board line through two aligned squares, endpoints
/// included, or the empty bitboard if they are not aligned.
#[inline]
pub fn line(a: Square, b: Square) -> Bitboard {
    LINE[a.index() as usize][b.index() as usize]
}

/// Returns the squares strictly between two aligned squares, or the empty
/// bitboard if they are not aligned.
#[inline]
pub fn between(a: Square, b: Square) -> Bitboard {
    BETWEEN[a.index() as usize][b.index() as usize]
}

/// Returns true if three squares lie on one rank, file, or diagonal.
#[inline]
pub fn aligned(a: Square, b: Square, c: Square) -> bool {
    line(a, b).contains(c)
}

/// Squares reachable from `sq` by one step of each (rank, file) delta,
/// dropping steps that leave the board.
const fn step_targets<const N: usize>(sq: u8, deltas: &[(i8, i8); N]) -> u64 {
    let mut bb = 0u64;
    let mut i = 0;
    while i < N {
        let r = (sq / 8) as i8 + deltas[i].0;
        let f = (sq % 8) as i8 + deltas[i].1;
        if 0 <= r && r < 8 && 0 <= f && f < 8 {
            bb |= 1u64 << (r * 8 + f);
        }
        i += 1;
    }
    bb
}

const fn compute_knight_attacks() -> [Bitboard; 64] {
    const DELTAS: [(i8, i8); 8] = [
        (2, 1),
        (2, -1),
        (-2, 1),
        (-2, -1),
        (1, 2),
        (1, -2),
        (-1, 2),
        (-1, -2),
    ];
    let mut attacks = [Bitboard::EMPTY; 64];
    let mut sq = 0u8;
    while sq < 64 {
        attacks[sq as usize] = Bitboard(step_targets(sq, &DELTAS));
        sq += 1;
    }
    attacks
}

const fn compute_king_attacks() -> [Bitboard; 64] {
    const DELTAS: [(i8, i8); 8] = [
        (1, 0),
        (-1, 0),
        (0, 1),
        (0, -1),
        (1, 1),
        (1, -1),
        (-1, 1),
        (-1, -1),
    ];
    let mut attacks = [Bitboard::EMPTY; 64];
    let mut sq = 0u8;
    while sq < 64 {
        attacks[sq as usize] = Bitboard(step_targets(sq, &DELTAS));
        sq += 1;
    }
    attacks
}

const fn compute_pawn_attacks() -> [[Bitboard; 64]; 2] {
    let mut attacks = [[Bitboard::EMPTY; 64]; 2];
    let mut sq = 0u8;
    while sq < 64 {
        attacks[0][sq as usize] = Bitboard(step_targets(sq, &[(1, 1), (1, -1)]));
        attacks[1][sq as usize] = Bitboard(step_targets(sq, &[(-1, 1), (-1, -1)]));
        sq += 1;
    }
    attacks
}

/// Walks one ray direction from a square to the board edge.
const fn ray(sq: u8, dr: i8, df: i8) -> u64 {
    let mut bb = 0u64;
    let mut r = (sq / 8) as i8 + dr;
    let mut f = (sq % 8) as i8 + df;
    while 0 <= r && r < 8 && 0 <= f && f < 8 {
        bb |= 1u64 << (r * 8 + f);
        r += dr;
        f += df;
    }
    bb
}

const fn compute_slider_pseudo_attacks(dirs: &[(i8, i8); 4]) -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    let mut sq = 0u8;
    while sq < 64 {
        let mut bb = 0u64;
        let mut d = 0;
        while d < 4 {
            bb |= ray(sq, dirs[d].0, dirs[d].1);
            d += 1;
        }
        attacks[sq as usize] = Bitboard(bb);
        sq += 1;
    }
    attacks
}

const fn compute_lines() -> [[Bitboard; 64]; 64] {
    let all_dirs: [(i8, i8); 8] = [
        (1, 0),
        (-1, 0),
        (0, 1),
        (0, -1),
        (1, 1),
        (1, -1),
        (-1, 1),
        (-1, -1),
    ];
    let mut table = [[Bitboard::EMPTY; 64]; 64];
    let mut a = 0u8;
    while a < 64 {
        let mut d = 0;
        while d < 8 {
            let (dr, df) = all_dirs[d];
            let forward = ray(a, dr, df);
            let full = forward | ray(a, -dr, -df) | (1u64 << a);
            let mut bits = forward;
            while bits != 0 {
                let b = bits.trailing_zeros() as usize;
                table[a as usize][b] = Bitboard(full);
                bits &= bits - 1;
            }
            d += 1;
        }
        a += 1;
    }
    table
}

const fn compute_between() -> [[Bitboard; 64]; 64] {
    let all_dirs: [(i8, i8); 8] = [
        (1, 0),
        (-1, 0),
        (0, 1),
        (0, -1),
        (1, 1),
        (1, -1),
        (-1, 1),
        (-1, -1),
    ];
    let mut table = [[Bitboard::EMPTY; 64]; 64];
    let mut a = 0u8;
    while a < 64 {
        let mut d = 0;
        while d < 8 {
            let (dr, df) = all_dirs[d];
            let mut seen = 0u64;
            let mut r = (a / 8) as i8 + dr;
            let mut f = (a % 8) as i8 + df;
            while 0 <= r && r < 8 && 0 <= f && f < 8 {
                let b = (r * 8 + f) as usize;
                table[a as usize][b] = Bitboard(seen);
                seen |= 1u64 << b;
                r += dr;
                f += df;
            }
            d += 1;
        }
        a += 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{File, Rank};

    #[test]
    fn knight_attack_counts_shrink_toward_the_edge() {
        assert_eq!(knight_attacks(Square::new(File::D, Rank::R4)).count(), 8);
        assert_eq!(knight_attacks(Square::new(File::A, Rank::R4)).count(), 4);
        assert_eq!(knight_attacks(Square::A1).count(), 2);
    }

    #[test]
    fn knight_attacks_e4() {
        let attacks = knight_attacks(Square::new(File::E, Rank::R4));
        for (file, rank) in [
            (File::D, Rank::R6),
            (File::F, Rank::R6),
            (File::G, Rank::R5),
            (File::G, Rank::R3),
            (File::F, Rank::R2),
            (File::D, Rank::R2),
            (File::C, Rank::R3),
            (File::C, Rank::R5),
        ] {
            assert!(attacks.contains(Square::new(file, rank)));
        }
        assert_eq!(attacks.count(), 8);
    }

    #[test]
    fn king_attack_counts_shrink_toward_the_edge() {
        assert_eq!(king_attacks(Square::new(File::D, Rank::R4)).count(), 8);
        assert_eq!(king_attacks(Square::new(File::A, Rank::R4)).count(), 5);
        assert_eq!(king_attacks(Square::A1).count(), 3);
    }

    #[test]
    fn pawn_attacks_point_forward() {
        let d4 = Square::new(File::D, Rank::R4);
        let white = pawn_attacks(d4, Color::White);
        assert!(white.contains(Square::new(File::C, Rank::R5)));
        assert!(white.contains(Square::new(File::E, Rank::R5)));
        assert_eq!(white.count(), 2);

        let black = pawn_attacks(d4, Color::Black);
        assert!(black.contains(Square::new(File::C, Rank::R3)));
        assert!(black.contains(Square::new(File::E, Rank::R3)));
        assert_eq!(black.count(), 2);

        // Edge files attack one square, the last rank none
        let a4 = Square::new(File::A, Rank::R4);
        assert_eq!(pawn_attacks(a4, Color::White).count(), 1);
        assert!(pawn_attacks(Square::new(File::D, Rank::R8), Color::White).is_empty());
    }

    #[test]
    fn between_on_file_and_diagonal() {
        let e1 = Square::E1;
        let e8 = Square::E8;
        let b = between(e1, e8);
        assert_eq!(b.count(), 6);
        assert!(b.contains(Square::new(File::E, Rank::R4)));
        assert!(!b.contains(e1));
        assert!(!b.contains(e8));

        let a1 = Square::A1;
        let h8 = Square::H8;
        assert_eq!(between(a1, h8).count(), 6);
        assert!(between(a1, h8).contains(Square::new(File::D, Rank::R4)));
    }

    #[test]
    fn between_adjacent_and_unaligned() {
        assert!(between(Square::E1, Square::new(File::E, Rank::R2)).is_empty());
        // Knight-distance squares are not aligned
        assert!(between(Square::E1, Square::new(File::F, Rank::R3)).is_empty());
    }

    #[test]
    fn line_through_squares() {
        let c1 = Square::C1;
        let h6 = Square::new(File::H, Rank::R6);
        let l = line(c1, h6);
        // Diagonal a-file would be off-board; line runs c1..h6
        assert!(l.contains(c1));
        assert!(l.contains(h6));
        assert!(l.contains(Square::new(File::E, Rank::R3)));
        assert_eq!(l.count(), 6);

        assert!(line(Square::A1, Square::new(File::B, Rank::R3)).is_empty());
    }

    #[test]
    fn line_extends_past_endpoints() {
        let l = line(Square::new(File::C, Rank::R3), Square::new(File::D, Rank::R4));
        assert!(l.contains(Square::A1));
        assert!(l.contains(Square::H8));
        assert_eq!(l.count(), 8);
    }

    #[test]
    fn aligned_three_squares() {
        assert!(aligned(
            Square::E1,
            Square::E8,
            Square::new(File::E, Rank::R5)
        ));
        assert!(!aligned(
            Square::E1,
            Square::E8,
            Square::new(File::D, Rank::R5)
        ));
    }

    #[test]
    fn pseudo_attacks_match_empty_board_magics() {
        for index in [0u8, 7, 28, 35, 63] {
            let sq = Square::from_index(index).unwrap();
            assert_eq!(
                pseudo_attacks(Piece::Bishop, sq),
                bishop_attacks(sq, Bitboard::EMPTY)
            );
            assert_eq!(
                pseudo_attacks(Piece::Rook, sq),
                rook_attacks(sq, Bitboard::EMPTY)
            );
            assert_eq!(
                pseudo_attacks(Piece::Queen, sq),
                queen_attacks(sq, Bitboard::EMPTY)
            );
        }
    }
}
