//! Chess position representation and the read-only queries move
//! generation builds on: attackers, checkers, pins, check detection,
//! and the legality predicate.

use chess_core::{Color, FenError, FenParser, File, Move, MoveKind, Piece, Rank, Square};

use crate::movegen::attacks::{
    aligned, between, bishop_attacks, king_attacks, knight_attacks, pawn_attacks, piece_attacks,
    pseudo_attacks, rook_attacks,
};
use crate::Bitboard;

/// The two castling directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CastlingSide {
    Kingside = 0,
    Queenside = 1,
}

impl CastlingSide {
    pub const BOTH: [CastlingSide; 2] = [CastlingSide::Kingside, CastlingSide::Queenside];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    #[inline]
    const fn flag(color: Color, side: CastlingSide) -> u8 {
        1 << (side.index() + 2 * color.index())
    }

    /// Returns true if the given side retains the given castling right.
    #[inline]
    pub const fn can_castle(self, color: Color, side: CastlingSide) -> bool {
        (self.0 & Self::flag(color, side)) != 0
    }

    /// Returns true if the given side retains any castling right.
    #[inline]
    pub const fn has_any(self, color: Color) -> bool {
        (self.0 & (0b11 << (2 * color.index()))) != 0
    }

    /// Grants one castling right.
    #[inline]
    pub fn add(&mut self, color: Color, side: CastlingSide) {
        self.0 |= Self::flag(color, side);
    }

    /// Removes one castling right.
    #[inline]
    pub fn remove(&mut self, color: Color, side: CastlingSide) {
        self.0 &= !Self::flag(color, side);
    }

    /// Removes both castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.0 &= !(0b11 << (2 * color.index()));
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// Complete chess position state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Bitboards for each piece type, indexed by Piece enum.
    pub pieces: [Bitboard; 6],

    /// Bitboards for each color's pieces.
    pub colors: [Bitboard; 2],

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights.
    pub castling: CastlingRights,

    /// Start square of the castling rook for each retained right,
    /// indexed [color][side]. In Chess960 this can be any back-rank
    /// square on the rook's side of the king.
    pub castling_rooks: [[Option<Square>; 2]; 2],

    /// En passant target square (if any).
    pub en_passant: Option<Square>,

    /// Whether castling encodes Chess960 start squares rather than the
    /// standard layout.
    pub chess960: bool,

    /// Halfmove clock for 50-move rule.
    pub halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl Position {
    /// Creates an empty position.
    pub fn empty() -> Self {
        Position {
            pieces: [Bitboard::EMPTY; 6],
            colors: [Bitboard::EMPTY; 2],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            castling_rooks: [[None; 2]; 2],
            en_passant: None,
            chess960: false,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(FenParser::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a position from a FEN string.
    ///
    /// The castling field accepts both standard letters (`KQkq`) and
    /// X-FEN rook file letters (`A`-`H`/`a`-`h`) for Chess960. A
    /// position whose castling squares differ from the standard layout
    /// is flagged as Chess960.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        let mut position = Position::empty();

        // Parse piece placement
        let ranks: Vec<&str> = parsed.piece_placement.split('/').collect();
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx; // FEN starts from rank 8
            let mut file = 0usize;

            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    file += digit as usize;
                } else if let Some((piece, color)) = Piece::from_fen_char(c) {
                    let sq = unsafe { Square::from_index_unchecked((rank * 8 + file) as u8) };
                    position.pieces[piece.index()].set(sq);
                    position.colors[color.index()].set(sq);
                    file += 1;
                }
            }
        }

        // Active color
        position.side_to_move = match parsed.active_color {
            'w' => Color::White,
            'b' => Color::Black,
            _ => unreachable!("FEN parser validated this"),
        };

        // Castling rights
        for c in parsed.castling.chars() {
            if c == '-' {
                continue;
            }
            let color = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            if position.pieces_of(Piece::King, color).is_not_empty() {
                position.add_castling_right(color, c);
            }
        }

        // En passant
        position.en_passant = if parsed.en_passant == "-" {
            None
        } else {
            Square::from_algebraic(&parsed.en_passant)
        };

        position.halfmove_clock = parsed.halfmove_clock;
        position.fullmove_number = parsed.fullmove_number;

        Ok(position)
    }

    /// Resolves one FEN castling character to a rook square and records
    /// the right. `K`/`Q` name the outermost rook on that side of the
    /// king (the X-FEN rule); a file letter names the rook directly.
    fn add_castling_right(&mut self, color: Color, c: char) {
        let back_rank = Bitboard::rank(Rank::R1.relative_to(color));
        let rooks = self.pieces_of(Piece::Rook, color) & back_rank;
        let ksq = self.king_square(color);

        let rook = match c.to_ascii_lowercase() {
            'k' => rooks.into_iter().filter(|r| r.index() > ksq.index()).last(),
            'q' => rooks.into_iter().find(|r| r.index() < ksq.index()),
            file_char => match File::from_char(file_char) {
                Some(file) => rooks.into_iter().find(|r| r.file() == file),
                None => None,
            },
        };

        let Some(rook) = rook else { return };
        let side = if rook.index() > ksq.index() {
            CastlingSide::Kingside
        } else {
            CastlingSide::Queenside
        };
        self.castling.add(color, side);
        self.castling_rooks[color.index()][side.index()] = Some(rook);

        // A nonstandard king or rook start square implies Chess960
        let standard_rook = match side {
            CastlingSide::Kingside => Square::H1.relative_to(color),
            CastlingSide::Queenside => Square::A1.relative_to(color),
        };
        if ksq != Square::E1.relative_to(color) || rook != standard_rook {
            self.chess960 = true;
        }
    }

    /// Converts the position to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        // Piece placement
        for rank in (0..8).rev() {
            let mut empty_count = 0;
            for file in 0..8 {
                let sq = unsafe { Square::from_index_unchecked(rank * 8 + file) };
                if let Some((piece, color)) = self.piece_at(sq) {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    fen.push(piece.to_fen_char(color));
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        // Active color
        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        // Castling
        fen.push(' ');
        if self.castling.raw() == 0 {
            fen.push('-');
        } else {
            for color in [Color::White, Color::Black] {
                for side in CastlingSide::BOTH {
                    if !self.castling.can_castle(color, side) {
                        continue;
                    }
                    let c = if self.chess960 {
                        self.castling_rooks[color.index()][side.index()]
                            .expect("right implies a rook square")
                            .file()
                            .to_char()
                    } else {
                        match side {
                            CastlingSide::Kingside => 'k',
                            CastlingSide::Queenside => 'q',
                        }
                    };
                    fen.push(match color {
                        Color::White => c.to_ascii_uppercase(),
                        Color::Black => c,
                    });
                }
            }
        }

        // En passant
        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.to_algebraic()),
            None => fen.push('-'),
        }

        // Halfmove clock and fullmove number
        fen.push(' ');
        fen.push_str(&self.halfmove_clock.to_string());
        fen.push(' ');
        fen.push_str(&self.fullmove_number.to_string());

        fen
    }

    /// Returns the piece and color at the given square, if any.
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        let bb = Bitboard::from_square(sq);

        // Check if any piece is on this square
        let color = if (self.colors[Color::White.index()] & bb).is_not_empty() {
            Color::White
        } else if (self.colors[Color::Black.index()] & bb).is_not_empty() {
            Color::Black
        } else {
            return None;
        };

        // Find which piece type
        for piece in Piece::ALL {
            if (self.pieces[piece.index()] & bb).is_not_empty() {
                return Some((piece, color));
            }
        }

        None
    }

    /// Returns a bitboard of all occupied squares.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    /// Returns a bitboard of all empty squares.
    #[inline]
    pub fn empty_squares(&self) -> Bitboard {
        !self.occupied()
    }

    /// Returns a bitboard of pieces of the given type and color.
    #[inline]
    pub fn pieces_of(&self, piece: Piece, color: Color) -> Bitboard {
        self.pieces[piece.index()] & self.colors[color.index()]
    }

    /// Returns the square of the given color's king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        let lsb = self.pieces_of(Piece::King, color).lsb();
        debug_assert!(lsb.is_some());
        // SAFETY: lsb of a 64-bit board is 0-63
        unsafe { Square::from_index_unchecked(lsb.unwrap_or(0)) }
    }

    /// Returns the start square of the castling rook for a right.
    #[inline]
    pub fn castling_rook(&self, color: Color, side: CastlingSide) -> Option<Square> {
        self.castling_rooks[color.index()][side.index()]
    }

    /// Returns all pieces of both colors attacking the given square,
    /// with slider attacks computed against the given occupancy.
    pub fn attackers_to(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        (pawn_attacks(sq, Color::White) & self.pieces_of(Piece::Pawn, Color::Black))
            | (pawn_attacks(sq, Color::Black) & self.pieces_of(Piece::Pawn, Color::White))
            | (knight_attacks(sq) & self.pieces[Piece::Knight.index()])
            | (king_attacks(sq) & self.pieces[Piece::King.index()])
            | (bishop_attacks(sq, occupied)
                & (self.pieces[Piece::Bishop.index()] | self.pieces[Piece::Queen.index()]))
            | (rook_attacks(sq, occupied)
                & (self.pieces[Piece::Rook.index()] | self.pieces[Piece::Queen.index()]))
    }

    /// Returns true if the given square is attacked by the given color.
    #[inline]
    pub fn attacked_by(&self, sq: Square, color: Color) -> bool {
        (self.attackers_to(sq, self.occupied()) & self.colors[color.index()]).is_not_empty()
    }

    /// Returns the pieces giving check to the side to move.
    #[inline]
    pub fn checkers(&self) -> Bitboard {
        let us = self.side_to_move;
        self.attackers_to(self.king_square(us), self.occupied())
            & self.colors[us.opposite().index()]
    }

    /// Returns the pieces (of either color) that are the sole blocker
    /// between `sq` and a slider of color `sniper_color` aimed at it.
    /// Blockers of the other color are pinned; blockers of the sniper's
    /// own color are discovered-check candidates.
    pub fn slider_blockers(&self, sq: Square, sniper_color: Color) -> Bitboard {
        let rooks_queens = self.pieces[Piece::Rook.index()] | self.pieces[Piece::Queen.index()];
        let bishops_queens = self.pieces[Piece::Bishop.index()] | self.pieces[Piece::Queen.index()];

        let snipers = ((pseudo_attacks(Piece::Rook, sq) & rooks_queens)
            | (pseudo_attacks(Piece::Bishop, sq) & bishops_queens))
            & self.colors[sniper_color.index()];

        let occupancy = self.occupied() ^ snipers;
        let mut blockers = Bitboard::EMPTY;

        for sniper in snipers {
            let b = between(sq, sniper) & occupancy;
            if b.is_not_empty() && !b.more_than_one() {
                blockers |= b;
            }
        }
        blockers
    }

    /// Returns the given color's pieces pinned to their own king.
    #[inline]
    pub fn pinned(&self, color: Color) -> Bitboard {
        self.slider_blockers(self.king_square(color), color.opposite()) & self.colors[color.index()]
    }

    /// Returns true if a pseudo-legal move does not leave the mover's
    /// king in check.
    ///
    /// `pinned` must be [`Position::pinned`] for the side to move. Only
    /// pinned movers, king moves, and en passant captures can fail this
    /// test when the input comes from pseudo-legal generation.
    pub fn is_legal(&self, m: Move, pinned: Bitboard) -> bool {
        let us = self.side_to_move;
        let them = us.opposite();
        let from = m.from();
        let ksq = self.king_square(us);

        match m.kind() {
            MoveKind::EnPassant => {
                // Both the capturing and the captured pawn leave their
                // squares, which can uncover a rank or diagonal attack
                // no pin test sees.
                let to = m.to();
                let capsq = to.shifted(-us.pawn_push());
                let occupancy = (self.occupied()
                    ^ Bitboard::from_square(from)
                    ^ Bitboard::from_square(capsq))
                    | Bitboard::from_square(to);
                let enemies = self.colors[them.index()];
                let rooks_queens =
                    self.pieces[Piece::Rook.index()] | self.pieces[Piece::Queen.index()];
                let bishops_queens =
                    self.pieces[Piece::Bishop.index()] | self.pieces[Piece::Queen.index()];

                (rook_attacks(ksq, occupancy) & rooks_queens & enemies).is_empty()
                    && (bishop_attacks(ksq, occupancy) & bishops_queens & enemies).is_empty()
            }
            MoveKind::Castling => {
                // Generation already walks the transit squares; repeat
                // the walk so the predicate stands on its own.
                let rfrom = m.to();
                let kingside = rfrom.index() > from.index();
                let kto = (if kingside { Square::G1 } else { Square::C1 }).relative_to(us);
                let step: i8 = if kto.index() > from.index() { -1 } else { 1 };

                let mut sq = kto;
                while sq != from {
                    if self.attacked_by(sq, them) {
                        return false;
                    }
                    sq = sq.shifted(step);
                }

                // In Chess960 the departing rook can uncover a rook or
                // queen aimed at the king's landing square.
                if self.chess960 {
                    let occupancy = self.occupied() ^ Bitboard::from_square(rfrom);
                    let rooks_queens =
                        self.pieces[Piece::Rook.index()] | self.pieces[Piece::Queen.index()];
                    if (rook_attacks(kto, occupancy) & rooks_queens & self.colors[them.index()])
                        .is_not_empty()
                    {
                        return false;
                    }
                }
                true
            }
            _ if from == ksq => {
                // The king must not step onto an attacked square; drop
                // it from the occupancy so a slider's ray continues
                // through its old square.
                let occupancy = self.occupied() ^ Bitboard::from_square(from);
                (self.attackers_to(m.to(), occupancy) & self.colors[them.index()]).is_empty()
            }
            _ => {
                // A pinned piece may only move along the pin ray
                !pinned.contains(from) || aligned(from, m.to(), ksq)
            }
        }
    }

    /// Returns true if a pseudo-legal move gives check to the opponent.
    ///
    /// `ci` must be a [`CheckInfo`] computed for this position.
    ///
    /// [`CheckInfo`]: crate::movegen::CheckInfo
    pub fn gives_check(&self, m: Move, ci: &crate::movegen::CheckInfo) -> bool {
        let us = self.side_to_move;
        let from = m.from();
        let to = m.to();

        // Direct check. For castling the moved piece is the king, whose
        // check-square mask is empty, so the rook case below decides.
        if let Some((piece, _)) = self.piece_at(from) {
            if ci.check_squares[piece.index()].contains(to) {
                return true;
            }
        }

        // Discovered check
        if ci.dc_candidates.contains(from) && !aligned(from, to, ci.ksq) {
            return true;
        }

        match m.kind() {
            MoveKind::Normal => false,
            MoveKind::Promotion => {
                // The promoted piece may see the king through the
                // vacated origin square
                let promo = m.promotion_piece().expect("promotion move");
                let occupancy = self.occupied() ^ Bitboard::from_square(from);
                piece_attacks(promo, to, occupancy).contains(ci.ksq)
            }
            MoveKind::EnPassant => {
                let capsq = to.shifted(-us.pawn_push());
                let occupancy = (self.occupied()
                    ^ Bitboard::from_square(from)
                    ^ Bitboard::from_square(capsq))
                    | Bitboard::from_square(to);
                let ours = self.colors[us.index()];
                let rooks_queens =
                    self.pieces[Piece::Rook.index()] | self.pieces[Piece::Queen.index()];
                let bishops_queens =
                    self.pieces[Piece::Bishop.index()] | self.pieces[Piece::Queen.index()];

                (rook_attacks(ci.ksq, occupancy) & rooks_queens & ours).is_not_empty()
                    || (bishop_attacks(ci.ksq, occupancy) & bishops_queens & ours).is_not_empty()
            }
            MoveKind::Castling => {
                let rfrom = to;
                let kingside = rfrom.index() > from.index();
                let kto = (if kingside { Square::G1 } else { Square::C1 }).relative_to(us);
                let rto = (if kingside { Square::F1 } else { Square::D1 }).relative_to(us);

                if !pseudo_attacks(Piece::Rook, rto).contains(ci.ksq) {
                    return false;
                }
                let occupancy = (self.occupied()
                    ^ Bitboard::from_square(from)
                    ^ Bitboard::from_square(rfrom))
                    | Bitboard::from_square(kto)
                    | Bitboard::from_square(rto);
                rook_attacks(rto, occupancy).contains(ci.ksq)
            }
        }
    }

    /// Applies a move and returns the resulting position (copy-make).
    ///
    /// Castling moves carry the king's and rook's origin squares; the
    /// landing squares are resolved here (g/c file for the king, f/d
    /// for the rook), which covers standard chess and Chess960 alike.
    pub fn make_move(&self, m: Move) -> Position {
        let mut pos = self.clone();
        let us = self.side_to_move;
        let them = us.opposite();
        let from = m.from();
        let to = m.to();

        let (piece, _) = self.piece_at(from).expect("no piece on origin square");
        let mut is_capture = false;
        pos.en_passant = None;

        if m.kind() == MoveKind::Castling {
            let rfrom = to;
            let kingside = rfrom.index() > from.index();
            let kto = (if kingside { Square::G1 } else { Square::C1 }).relative_to(us);
            let rto = (if kingside { Square::F1 } else { Square::D1 }).relative_to(us);

            // Remove both pieces before placing either; in Chess960 the
            // landing squares may coincide with the origin squares
            pos.pieces[Piece::King.index()].clear(from);
            pos.pieces[Piece::Rook.index()].clear(rfrom);
            pos.colors[us.index()].clear(from);
            pos.colors[us.index()].clear(rfrom);
            pos.pieces[Piece::King.index()].set(kto);
            pos.pieces[Piece::Rook.index()].set(rto);
            pos.colors[us.index()].set(kto);
            pos.colors[us.index()].set(rto);
        } else {
            if let Some((captured, _)) = self.piece_at(to) {
                pos.pieces[captured.index()].clear(to);
                pos.colors[them.index()].clear(to);
                is_capture = true;
            }

            pos.pieces[piece.index()].clear(from);
            pos.colors[us.index()].clear(from);
            let dest_piece = m.promotion_piece().unwrap_or(piece);
            pos.pieces[dest_piece.index()].set(to);
            pos.colors[us.index()].set(to);

            if m.kind() == MoveKind::EnPassant {
                let capsq = to.shifted(-us.pawn_push());
                pos.pieces[Piece::Pawn.index()].clear(capsq);
                pos.colors[them.index()].clear(capsq);
                is_capture = true;
            }

            if piece == Piece::Pawn && (to.index() as i8 - from.index() as i8).abs() == 16 {
                pos.en_passant = Some(from.shifted(us.pawn_push()));
            }
        }

        // A king move (castling included) forfeits both rights; moving
        // or capturing a castling rook forfeits that right
        if piece == Piece::King {
            pos.castling.remove_color(us);
            pos.castling_rooks[us.index()] = [None; 2];
        }
        for color in [Color::White, Color::Black] {
            for side in CastlingSide::BOTH {
                if let Some(rsq) = pos.castling_rooks[color.index()][side.index()] {
                    if rsq == from || rsq == to {
                        pos.castling.remove(color, side);
                        pos.castling_rooks[color.index()][side.index()] = None;
                    }
                }
            }
        }

        if piece == Piece::Pawn || is_capture {
            pos.halfmove_clock = 0;
        } else {
            pos.halfmove_clock += 1;
        }
        if us == Color::Black {
            pos.fullmove_number += 1;
        }
        pos.side_to_move = them;

        pos
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_fen_roundtrip() {
        let pos = Position::startpos();
        assert_eq!(pos.to_fen(), FenParser::STARTPOS);
        assert!(!pos.chess960);
    }

    #[test]
    fn custom_fen_roundtrip() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn piece_at() {
        let pos = Position::startpos();
        assert_eq!(pos.piece_at(Square::E1), Some((Piece::King, Color::White)));
        assert_eq!(pos.piece_at(Square::E8), Some((Piece::King, Color::Black)));
        assert_eq!(pos.piece_at(Square::new(File::E, Rank::R4)), None);
    }

    #[test]
    fn castling_rights() {
        let mut rights = CastlingRights::ALL;
        assert!(rights.can_castle(Color::White, CastlingSide::Kingside));
        assert!(rights.can_castle(Color::Black, CastlingSide::Queenside));

        rights.remove(Color::White, CastlingSide::Kingside);
        assert!(!rights.can_castle(Color::White, CastlingSide::Kingside));
        assert!(rights.can_castle(Color::White, CastlingSide::Queenside));
        assert!(rights.has_any(Color::White));

        rights.remove(Color::White, CastlingSide::Queenside);
        assert!(!rights.has_any(Color::White));
        assert!(rights.has_any(Color::Black));
    }

    #[test]
    fn castling_rights_remove_color() {
        let mut rights = CastlingRights::ALL;
        rights.remove_color(Color::White);
        assert!(!rights.can_castle(Color::White, CastlingSide::Kingside));
        assert!(!rights.can_castle(Color::White, CastlingSide::Queenside));
        assert!(rights.can_castle(Color::Black, CastlingSide::Kingside));
        assert!(rights.can_castle(Color::Black, CastlingSide::Queenside));
    }

    #[test]
    fn startpos_castling_rooks() {
        let pos = Position::startpos();
        assert_eq!(
            pos.castling_rook(Color::White, CastlingSide::Kingside),
            Some(Square::H1)
        );
        assert_eq!(
            pos.castling_rook(Color::White, CastlingSide::Queenside),
            Some(Square::A1)
        );
        assert_eq!(
            pos.castling_rook(Color::Black, CastlingSide::Kingside),
            Some(Square::H8)
        );
        assert_eq!(
            pos.castling_rook(Color::Black, CastlingSide::Queenside),
            Some(Square::A8)
        );
    }

    #[test]
    fn chess960_fen_detection() {
        let fen = "1r2k3/8/8/8/8/8/8/1R2K3 w Bb - 0 1";
        let pos = Position::from_fen(fen).unwrap();
        assert!(pos.chess960);
        assert_eq!(
            pos.castling_rook(Color::White, CastlingSide::Queenside),
            Some(Square::B1)
        );
        assert_eq!(
            pos.castling_rook(Color::Black, CastlingSide::Queenside),
            Some(Square::B8)
        );
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn position_occupied_empty() {
        let pos = Position::startpos();
        assert_eq!(pos.occupied().count(), 32);
        assert_eq!(pos.empty_squares().count(), 32);
    }

    #[test]
    fn position_pieces_of() {
        let pos = Position::startpos();
        assert_eq!(pos.pieces_of(Piece::Pawn, Color::White).count(), 8);
        assert_eq!(pos.pieces_of(Piece::Pawn, Color::Black).count(), 8);
        assert_eq!(pos.king_square(Color::White), Square::E1);
        assert_eq!(pos.king_square(Color::Black), Square::E8);
    }

    #[test]
    fn position_with_en_passant() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.en_passant.unwrap().to_algebraic(), "e3");
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn position_no_castling() {
        let fen = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w - - 0 1";
        let pos = Position::from_fen(fen).unwrap();
        assert!(!pos.castling.has_any(Color::White));
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn attacked_by_startpos() {
        let pos = Position::startpos();
        // e3 is covered by the d2 and f2 pawns
        assert!(pos.attacked_by(Square::new(File::E, Rank::R3), Color::White));
        assert!(!pos.attacked_by(Square::new(File::E, Rank::R4), Color::White));
    }

    #[test]
    fn checkers_none_at_start() {
        let pos = Position::startpos();
        assert!(pos.checkers().is_empty());
    }

    #[test]
    fn checkers_detects_rook_check() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4R2K b - - 0 1").unwrap();
        let checkers = pos.checkers();
        assert_eq!(checkers.count(), 1);
        assert!(checkers.contains(Square::E1));
    }

    #[test]
    fn pinned_piece_detected() {
        // The e4 knight shields the white king from the e8 rook
        let pos = Position::from_fen("4r3/8/8/8/4N3/8/8/4K3 w - - 0 1").unwrap();
        let pinned = pos.pinned(Color::White);
        assert_eq!(pinned.count(), 1);
        assert!(pinned.contains(Square::new(File::E, Rank::R4)));
    }

    #[test]
    fn blocker_behind_blocker_is_not_pinned() {
        // Two white knights between rook and king: neither is pinned
        let pos = Position::from_fen("4r3/8/4N3/8/4N3/8/8/4K3 w - - 0 1").unwrap();
        assert!(pos.pinned(Color::White).is_empty());
    }

    #[test]
    fn is_legal_pinned_piece_stays_on_ray() {
        // White rook on e4 pinned by the e8 rook
        let pos = Position::from_fen("4r3/8/8/8/4R3/8/8/4K3 w - - 0 1").unwrap();
        let pinned = pos.pinned(Color::White);
        let e4 = Square::new(File::E, Rank::R4);

        assert!(pos.is_legal(Move::normal(e4, Square::new(File::E, Rank::R6)), pinned));
        assert!(pos.is_legal(Move::normal(e4, Square::E8), pinned));
        // Leaving the ray exposes the king
        assert!(!pos.is_legal(Move::normal(e4, Square::new(File::A, Rank::R4)), pinned));
    }

    #[test]
    fn is_legal_king_cannot_retreat_along_checking_ray() {
        // The a4 rook's ray passes through e4, so f4 is still check
        // even though f4 is not attacked in the current occupancy
        let pos = Position::from_fen("4k3/8/8/8/r3K3/8/8/8 w - - 0 1").unwrap();
        let pinned = pos.pinned(Color::White);
        let e4 = Square::new(File::E, Rank::R4);
        assert!(!pos.is_legal(Move::normal(e4, Square::new(File::F, Rank::R4)), pinned));
        assert!(pos.is_legal(Move::normal(e4, Square::new(File::F, Rank::R5)), pinned));
    }

    #[test]
    fn is_legal_en_passant_uncovers_rank_check() {
        // After exd6 both pawns leave rank 5 and the h5 rook sees the
        // a5 king
        let pos = Position::from_fen("4k3/8/8/K2pP2r/8/8/8/8 w - d6 0 1").unwrap();
        let pinned = pos.pinned(Color::White);
        let e5 = Square::new(File::E, Rank::R5);
        let d6 = Square::new(File::D, Rank::R6);
        assert!(!pos.is_legal(Move::en_passant(e5, d6), pinned));
    }

    #[test]
    fn is_legal_chess960_castling_rook_departure_uncovers_check() {
        // Castling lands the king on c1; once the b1 rook moves away
        // the a1 queen sees c1 along the rank
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/qR2K3 w B - 0 1").unwrap();
        assert!(pos.chess960);
        let pinned = pos.pinned(Color::White);
        assert!(!pos.is_legal(Move::castling(Square::E1, Square::B1), pinned));

        // Without the queen the same castle is fine
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/1R2K3 w B - 0 1").unwrap();
        let pinned = pos.pinned(Color::White);
        assert!(pos.is_legal(Move::castling(Square::E1, Square::B1), pinned));
    }

    #[test]
    fn make_move_pawn_push() {
        let position = Position::startpos();
        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);

        let new_pos = position.make_move(Move::normal(e2, e4));
        assert_eq!(new_pos.side_to_move, Color::Black);
        assert!(new_pos.piece_at(e4).is_some());
        assert!(new_pos.piece_at(e2).is_none());
        assert_eq!(new_pos.en_passant, Some(Square::new(File::E, Rank::R3)));
    }

    #[test]
    fn make_move_knight() {
        let position = Position::startpos();
        let f3 = Square::new(File::F, Rank::R3);

        let new_pos = position.make_move(Move::normal(Square::G1, f3));
        assert_eq!(new_pos.piece_at(f3), Some((Piece::Knight, Color::White)));
        assert!(new_pos.piece_at(Square::G1).is_none());
        assert_eq!(new_pos.en_passant, None);
    }

    #[test]
    fn make_move_castling_resolves_landing_squares() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let after = pos.make_move(Move::castling(Square::E1, Square::H1));
        assert_eq!(after.piece_at(Square::G1), Some((Piece::King, Color::White)));
        assert_eq!(after.piece_at(Square::F1), Some((Piece::Rook, Color::White)));
        assert!(after.piece_at(Square::E1).is_none());
        assert!(after.piece_at(Square::H1).is_none());
        assert!(!after.castling.has_any(Color::White));
        assert!(after.castling.has_any(Color::Black));
    }

    #[test]
    fn make_move_chess960_castling_overlapping_squares() {
        // The b1 rook lands on d1 while the king crosses it; removing
        // both pieces before placing either keeps the board consistent
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/1R2K3 w B - 0 1").unwrap();
        assert!(pos.chess960);
        let after = pos.make_move(Move::castling(Square::E1, Square::B1));
        assert_eq!(after.piece_at(Square::C1), Some((Piece::King, Color::White)));
        assert_eq!(after.piece_at(Square::D1), Some((Piece::Rook, Color::White)));
        assert!(after.piece_at(Square::B1).is_none());
        assert!(after.piece_at(Square::E1).is_none());
    }

    #[test]
    fn make_move_en_passant_removes_captured_pawn() {
        let pos =
            Position::from_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
                .unwrap();
        let d4 = Square::new(File::D, Rank::R4);
        let e3 = Square::new(File::E, Rank::R3);
        let after = pos.make_move(Move::en_passant(d4, e3));
        assert_eq!(after.piece_at(e3), Some((Piece::Pawn, Color::Black)));
        assert!(after.piece_at(Square::new(File::E, Rank::R4)).is_none());
        assert!(after.piece_at(d4).is_none());
    }

    #[test]
    fn make_move_promotion() {
        let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let a7 = Square::new(File::A, Rank::R7);
        let after = pos.make_move(Move::promotion(a7, Square::A8, Piece::Queen));
        assert_eq!(after.piece_at(Square::A8), Some((Piece::Queen, Color::White)));
        assert!(after.pieces_of(Piece::Pawn, Color::White).is_empty());
    }

    #[test]
    fn make_move_rook_capture_clears_castling_right() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let after = pos.make_move(Move::normal(Square::A1, Square::A8));
        assert!(!after.castling.can_castle(Color::Black, CastlingSide::Queenside));
        assert!(after.castling.can_castle(Color::Black, CastlingSide::Kingside));
        assert!(!after.castling.can_castle(Color::White, CastlingSide::Queenside));
        assert!(after.castling.can_castle(Color::White, CastlingSide::Kingside));
    }

    #[test]
    fn make_move_halfmove_and_fullmove_clocks() {
        let pos = Position::startpos();
        let after = pos.make_move(Move::normal(Square::G1, Square::new(File::F, Rank::R3)));
        assert_eq!(after.halfmove_clock, 1);
        assert_eq!(after.fullmove_number, 1);

        let after = after.make_move(Move::normal(
            Square::new(File::E, Rank::R7),
            Square::new(File::E, Rank::R5),
        ));
        assert_eq!(after.halfmove_clock, 0);
        assert_eq!(after.fullmove_number, 2);
    }
}
