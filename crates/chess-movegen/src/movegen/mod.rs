//! Category-based move generation.
//!
//! Moves are generated by category (captures, quiets, quiet checks,
//! evasions, non-evasions) so a search can stage them without paying
//! for moves it will never examine. All category generators produce
//! pseudo-legal moves; [`generate_legal`] filters the small set of
//! candidates that can actually leave the king in check.

pub(crate) mod attacks;
mod magics;
pub mod perft;

use crate::{Bitboard, CastlingSide, Position};
use chess_core::{Color, Move, MoveKind, Piece, Rank, Square};

pub use attacks::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks,
};
use attacks::{between, line, piece_attacks, pseudo_attacks};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of legal moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Removes the move at `index` by overwriting it with the last
    /// move. O(1), does not preserve order.
    #[inline]
    pub fn swap_remove(&mut self, index: usize) {
        debug_assert!(index < self.len);
        self.len -= 1;
        self.moves[index] = self.moves[self.len];
    }

    /// Returns true if the list contains the given move.
    pub fn contains(&self, m: Move) -> bool {
        self.as_slice().contains(&m)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// The move categories a generator can be asked for.
///
/// `Captures`, `Quiets`, `QuietChecks` and `NonEvasions` may only be
/// requested when the side to move is not in check; `Evasions` only
/// when it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenType {
    /// Captures and queen promotions.
    Captures,
    /// Non-captures and underpromotions.
    Quiets,
    /// Non-captures and knight underpromotions that give check.
    QuietChecks,
    /// Check evasions: king moves plus blocks and captures of the checker.
    Evasions,
    /// All pseudo-legal moves (captures and quiets).
    NonEvasions,
}

/// Check-detection data computed once per position: the enemy king
/// square, the squares from which each piece type checks it, and our
/// pieces whose departure uncovers a slider check.
pub struct CheckInfo {
    /// The opponent's king square.
    pub ksq: Square,
    /// Side-to-move pieces that are the sole blocker between one of
    /// their own sliders and the enemy king.
    pub dc_candidates: Bitboard,
    /// Per piece type, the squares from which that piece (of the side
    /// to move) gives direct check. Empty for the king.
    pub check_squares: [Bitboard; 6],
}

impl CheckInfo {
    /// Computes check info for the side to move of `position`.
    pub fn new(position: &Position) -> CheckInfo {
        let us = position.side_to_move;
        let them = us.opposite();
        let ksq = position.king_square(them);
        let occupied = position.occupied();

        let bishop = bishop_attacks(ksq, occupied);
        let rook = rook_attacks(ksq, occupied);

        let mut check_squares = [Bitboard::EMPTY; 6];
        check_squares[Piece::Pawn.index()] = pawn_attacks(ksq, them);
        check_squares[Piece::Knight.index()] = knight_attacks(ksq);
        check_squares[Piece::Bishop.index()] = bishop;
        check_squares[Piece::Rook.index()] = rook;
        check_squares[Piece::Queen.index()] = bishop | rook;

        CheckInfo {
            ksq,
            dc_candidates: position.slider_blockers(ksq, us) & position.colors[us.index()],
            check_squares,
        }
    }
}

/// Generates moves of the given category for the position.
///
/// Dispatches to the matching entry point; see [`GenType`] for the
/// check-status preconditions.
pub fn generate(position: &Position, gen_type: GenType) -> MoveList {
    match gen_type {
        GenType::Captures => generate_captures(position),
        GenType::Quiets => generate_quiets(position),
        GenType::QuietChecks => generate_quiet_checks(position),
        GenType::Evasions => generate_evasions(position),
        GenType::NonEvasions => generate_non_evasions(position),
    }
}

/// Generates all pseudo-legal captures and queen promotions.
///
/// The side to move must not be in check.
pub fn generate_captures(position: &Position) -> MoveList {
    debug_assert!(position.checkers().is_empty());
    let them = position.side_to_move.opposite();
    let mut moves = MoveList::new();
    generate_all(
        position,
        &mut moves,
        position.colors[them.index()],
        None,
        GenType::Captures,
    );
    moves
}

/// Generates all pseudo-legal non-captures and underpromotions.
///
/// The side to move must not be in check.
pub fn generate_quiets(position: &Position) -> MoveList {
    debug_assert!(position.checkers().is_empty());
    let mut moves = MoveList::new();
    generate_all(
        position,
        &mut moves,
        position.empty_squares(),
        None,
        GenType::Quiets,
    );
    moves
}

/// Generates all pseudo-legal moves (captures and non-captures).
///
/// The side to move must not be in check.
pub fn generate_non_evasions(position: &Position) -> MoveList {
    debug_assert!(position.checkers().is_empty());
    let us = position.side_to_move;
    let mut moves = MoveList::new();
    generate_all(
        position,
        &mut moves,
        !position.colors[us.index()],
        None,
        GenType::NonEvasions,
    );
    moves
}

/// Generates all pseudo-legal non-captures and knight underpromotions
/// that give check.
///
/// The side to move must not be in check.
pub fn generate_quiet_checks(position: &Position) -> MoveList {
    debug_assert!(position.checkers().is_empty());

    let mut moves = MoveList::new();
    let ci = CheckInfo::new(position);
    let empty = position.empty_squares();
    let occupied = position.occupied();

    // Quiet discovered checks from non-pawn movers. Any destination
    // works because the mover leaves the uncovering ray; pawn movers
    // are folded into the direct-check pass below.
    for from in ci.dc_candidates {
        let (piece, _) = position.piece_at(from).expect("candidate square is occupied");
        if piece == Piece::Pawn {
            continue;
        }

        let mut b = piece_attacks(piece, from, occupied) & empty;
        if piece == Piece::King {
            // A king stepping onto any line through the enemy king
            // would stay on the uncovering ray or give an impossible
            // "king check"
            b &= !pseudo_attacks(Piece::Queen, ci.ksq);
        }
        for to in b {
            moves.push(Move::normal(from, to));
        }
    }

    generate_all(position, &mut moves, empty, Some(&ci), GenType::QuietChecks);
    moves
}

/// Generates all pseudo-legal check evasions.
///
/// The side to move must be in check. Under double check only king
/// moves are produced.
pub fn generate_evasions(position: &Position) -> MoveList {
    let checkers = position.checkers();
    debug_assert!(checkers.is_not_empty());

    let us = position.side_to_move;
    let ksq = position.king_square(us);
    let mut moves = MoveList::new();

    // Squares covered by slider checkers through and beyond the king.
    // Removing them from the king's escape set skips moves that stay on
    // a checking ray and would otherwise fail the legality test.
    let mut slider_attacks = Bitboard::EMPTY;
    let sliders =
        checkers & !(position.pieces[Piece::Knight.index()] | position.pieces[Piece::Pawn.index()]);
    for checksq in sliders {
        slider_attacks |= line(checksq, ksq) ^ Bitboard::from_square(checksq);
    }

    let b = king_attacks(ksq) & !position.colors[us.index()] & !slider_attacks;
    for to in b {
        moves.push(Move::normal(ksq, to));
    }

    // Double check: only a king move can resolve both checks
    if checkers.more_than_one() {
        return moves;
    }

    // Block the check or capture the checking piece
    let mut b = checkers;
    let Some(checksq) = b.pop_lsb() else {
        return moves;
    };
    let target = between(checksq, ksq) | Bitboard::from_square(checksq);
    generate_all(position, &mut moves, target, None, GenType::Evasions);
    moves
}

/// Generates all legal moves.
///
/// Dispatches on check status, then filters the pseudo-legal list with
/// [`Position::is_legal`]. Only pinned movers, king moves and en
/// passant captures can be illegal, so everything else skips the test.
pub fn generate_legal(position: &Position) -> MoveList {
    let us = position.side_to_move;
    let pinned = position.pinned(us);
    let ksq = position.king_square(us);

    let mut moves = if position.checkers().is_not_empty() {
        generate_evasions(position)
    } else {
        generate_non_evasions(position)
    };

    let mut i = 0;
    while i < moves.len() {
        let m = moves[i];
        if (pinned.is_not_empty() || m.from() == ksq || m.kind() == MoveKind::EnPassant)
            && !position.is_legal(m, pinned)
        {
            moves.swap_remove(i);
        } else {
            i += 1;
        }
    }
    moves
}

/// Generates every category except king steps and castling into
/// `moves`, then those two for the categories that include them.
///
/// `ci` is `Some` exactly for the quiet-checks category.
fn generate_all(
    position: &Position,
    moves: &mut MoveList,
    target: Bitboard,
    ci: Option<&CheckInfo>,
    gen_type: GenType,
) {
    generate_pawn_moves(position, moves, target, ci, gen_type);
    for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
        generate_piece_moves(piece, position, moves, target, ci);
    }

    if !matches!(gen_type, GenType::QuietChecks | GenType::Evasions) {
        let ksq = position.king_square(position.side_to_move);
        for to in king_attacks(ksq) & target {
            moves.push(Move::normal(ksq, to));
        }
    }

    if !matches!(gen_type, GenType::Captures | GenType::Evasions)
        && position.castling.has_any(position.side_to_move)
    {
        generate_castling(position, moves, CastlingSide::Kingside, ci);
        generate_castling(position, moves, CastlingSide::Queenside, ci);
    }
}

/// Generates pawn moves of the given category: pushes, double pushes,
/// promotions, captures and en passant, each restricted to `target`.
fn generate_pawn_moves(
    position: &Position,
    moves: &mut MoveList,
    target: Bitboard,
    ci: Option<&CheckInfo>,
    gen_type: GenType,
) {
    let us = position.side_to_move;
    let them = us.opposite();
    let up = us.pawn_push();
    let (right, left) = match us {
        Color::White => (9i8, 7i8),
        Color::Black => (-9i8, -7i8),
    };
    let push = |b: Bitboard| match us {
        Color::White => b.north(),
        Color::Black => b.south(),
    };
    let push_right = |b: Bitboard| match us {
        Color::White => b.north_east(),
        Color::Black => b.south_west(),
    };
    let push_left = |b: Bitboard| match us {
        Color::White => b.north_west(),
        Color::Black => b.south_east(),
    };

    let rank3 = Bitboard::rank(Rank::R3.relative_to(us));
    let rank7 = Bitboard::rank(Rank::R7.relative_to(us));
    let rank8 = Bitboard::rank(Rank::R8.relative_to(us));

    let pawns = position.pieces_of(Piece::Pawn, us);
    let pawns_on7 = pawns & rank7;
    let pawns_not_on7 = pawns & !rank7;

    let enemies = match gen_type {
        GenType::Evasions => position.colors[them.index()] & target,
        GenType::Captures => target,
        _ => position.colors[them.index()],
    };

    let mut empty_squares = Bitboard::EMPTY;

    // Single and double pawn pushes, no promotions
    if gen_type != GenType::Captures {
        empty_squares = if matches!(gen_type, GenType::Quiets | GenType::QuietChecks) {
            target
        } else {
            position.empty_squares()
        };

        let mut b1 = push(pawns_not_on7) & empty_squares;
        let mut b2 = push(b1 & rank3) & empty_squares;

        if gen_type == GenType::Evasions {
            // Consider only blocking squares
            b1 &= target;
            b2 &= target;
        }

        if gen_type == GenType::QuietChecks {
            let ci = ci.expect("quiet checks carry check info");
            b1 &= pawn_attacks(ci.ksq, them);
            b2 &= pawn_attacks(ci.ksq, them);

            // Pushes that give discovered check. Only possible when the
            // pawn is not on the enemy king's file, because this
            // category has no captures; a discovered-check promotion
            // was already emitted among the captures.
            if (pawns_not_on7 & ci.dc_candidates).is_not_empty() {
                let dc1 = push(pawns_not_on7 & ci.dc_candidates)
                    & empty_squares
                    & !Bitboard::file(ci.ksq.file());
                let dc2 = push(dc1 & rank3) & empty_squares;
                b1 |= dc1;
                b2 |= dc2;
            }
        }

        for to in b1 {
            moves.push(Move::normal(to.shifted(-up), to));
        }
        for to in b2 {
            moves.push(Move::normal(to.shifted(-2 * up), to));
        }
    }

    // Promotions and underpromotions
    if pawns_on7.is_not_empty()
        && (gen_type != GenType::Evasions || (target & rank8).is_not_empty())
    {
        if gen_type == GenType::Captures {
            empty_squares = position.empty_squares();
        }
        if gen_type == GenType::Evasions {
            empty_squares &= target;
        }

        for to in push_right(pawns_on7) & enemies {
            push_promotions(moves, to, right, ci, gen_type);
        }
        for to in push_left(pawns_on7) & enemies {
            push_promotions(moves, to, left, ci, gen_type);
        }
        for to in push(pawns_on7) & empty_squares {
            push_promotions(moves, to, up, ci, gen_type);
        }
    }

    // Standard and en passant captures
    if matches!(
        gen_type,
        GenType::Captures | GenType::Evasions | GenType::NonEvasions
    ) {
        for to in push_right(pawns_not_on7) & enemies {
            moves.push(Move::normal(to.shifted(-right), to));
        }
        for to in push_left(pawns_not_on7) & enemies {
            moves.push(Move::normal(to.shifted(-left), to));
        }

        if let Some(ep) = position.en_passant {
            debug_assert_eq!(ep.rank(), Rank::R6.relative_to(us));

            // An en passant capture can be an evasion only if the
            // checker is the double-pushed pawn itself, i.e. the pawn
            // sits in the capture-or-block target.
            if gen_type == GenType::Evasions && !target.contains(ep.shifted(-up)) {
                return;
            }

            for from in pawns_not_on7 & pawn_attacks(ep, them) {
                moves.push(Move::en_passant(from, ep));
            }
        }
    }
}

/// Emits the promotions reaching `to` that belong to the category:
/// queen promotions count as captures, underpromotions as quiets, and
/// quiet checks take only a checking knight.
fn push_promotions(
    moves: &mut MoveList,
    to: Square,
    delta: i8,
    ci: Option<&CheckInfo>,
    gen_type: GenType,
) {
    let from = to.shifted(-delta);

    if matches!(
        gen_type,
        GenType::Captures | GenType::Evasions | GenType::NonEvasions
    ) {
        moves.push(Move::promotion(from, to, Piece::Queen));
    }

    if matches!(
        gen_type,
        GenType::Quiets | GenType::Evasions | GenType::NonEvasions
    ) {
        moves.push(Move::promotion(from, to, Piece::Rook));
        moves.push(Move::promotion(from, to, Piece::Bishop));
        moves.push(Move::promotion(from, to, Piece::Knight));
    }

    // The knight is the only underpromotion that can give a direct
    // check not already covered by the queen promotion
    if gen_type == GenType::QuietChecks {
        let ci = ci.expect("quiet checks carry check info");
        if knight_attacks(to).contains(ci.ksq) {
            moves.push(Move::promotion(from, to, Piece::Knight));
        }
    }
}

/// Generates knight, bishop, rook or queen moves into `target`.
///
/// With check info present (the quiet-checks category) movers are
/// filtered down to those that can actually deliver check: discovered
/// checkers are skipped (already emitted), sliders whose empty-board
/// rays miss every checking square are pruned before the magic lookup,
/// and destinations are masked to the piece's checking squares.
fn generate_piece_moves(
    piece: Piece,
    position: &Position,
    moves: &mut MoveList,
    target: Bitboard,
    ci: Option<&CheckInfo>,
) {
    debug_assert!(!matches!(piece, Piece::Pawn | Piece::King));
    let us = position.side_to_move;
    let occupied = position.occupied();

    for from in position.pieces_of(piece, us) {
        if let Some(ci) = ci {
            if piece.is_slider()
                && (pseudo_attacks(piece, from) & target & ci.check_squares[piece.index()])
                    .is_empty()
            {
                continue;
            }
            if ci.dc_candidates.contains(from) {
                continue;
            }
        }

        let mut b = piece_attacks(piece, from, occupied) & target;
        if let Some(ci) = ci {
            b &= ci.check_squares[piece.index()];
        }
        for to in b {
            moves.push(Move::normal(from, to));
        }
    }
}

/// Generates the castling move for one side if it is available,
/// unimpeded, and safe: the king's transit squares must be unattacked,
/// and in Chess960 removing the rook must not expose the king landing
/// square to a slider hiding behind it.
fn generate_castling(
    position: &Position,
    moves: &mut MoveList,
    side: CastlingSide,
    ci: Option<&CheckInfo>,
) {
    let us = position.side_to_move;
    let them = us.opposite();

    if !position.castling.can_castle(us, side) {
        return;
    }
    let Some(rfrom) = position.castling_rook(us, side) else {
        return;
    };

    debug_assert!(position.checkers().is_empty());

    let kfrom = position.king_square(us);
    let (kto, rto) = match side {
        CastlingSide::Kingside => (Square::G1.relative_to(us), Square::F1.relative_to(us)),
        CastlingSide::Queenside => (Square::C1.relative_to(us), Square::D1.relative_to(us)),
    };

    // All squares the king or rook crosses or lands on, except the two
    // moving pieces themselves, must be empty
    let path = (between(kfrom, kto)
        | between(rfrom, rto)
        | Bitboard::from_square(kto)
        | Bitboard::from_square(rto))
        & !(Bitboard::from_square(kfrom) | Bitboard::from_square(rfrom));
    if (position.occupied() & path).is_not_empty() {
        return;
    }

    // The king may not pass through an attacked square
    let enemies = position.colors[them.index()];
    let step: i8 = if kto.index() > kfrom.index() { -1 } else { 1 };
    let mut sq = kto;
    while sq != kfrom {
        if (position.attackers_to(sq, position.occupied()) & enemies).is_not_empty() {
            return;
        }
        sq = sq.shifted(step);
    }

    // In Chess960 the departing rook can uncover a slider aimed at the
    // king's landing square, e.g. an enemy queen on a1 behind a b1 rook
    if position.chess960 {
        let occupancy = position.occupied() ^ Bitboard::from_square(rfrom);
        let rooks_queens =
            (position.pieces[Piece::Rook.index()] | position.pieces[Piece::Queen.index()])
                & enemies;
        if (rook_attacks(kto, occupancy) & rooks_queens).is_not_empty() {
            return;
        }
    }

    let m = Move::castling(kfrom, rfrom);

    if let Some(ci) = ci {
        if !position.gives_check(m, ci) {
            return;
        }
    }

    moves.push(m);
}
