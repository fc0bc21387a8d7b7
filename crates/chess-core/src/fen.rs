//! Forsyth-Edwards Notation: field-level parsing and validation.
//!
//! `FenParser` splits a FEN record into its six fields and checks each for
//! well-formedness. Turning the fields into a board is left to the caller,
//! which is where piece placement and castling files gain meaning.

use thiserror::Error;

/// Reasons a FEN record can be rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// The six fields of a FEN record, validated but not yet interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Rank-by-rank piece placement, rank 8 first.
    pub piece_placement: String,
    /// 'w' or 'b'.
    pub active_color: char,
    /// Castling field: "-", or any mix of KQkq and X-FEN rook files.
    pub castling: String,
    /// En passant target square, or "-".
    pub en_passant: String,
    /// Plies since the last capture or pawn move.
    pub halfmove_clock: u32,
    /// Move counter, starting at 1 and incremented after Black's move.
    pub fullmove_number: u32,
}

impl FenParser {
    /// FEN of the standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Splits and validates a FEN record.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        let [placement, color, castling, en_passant, halfmove, fullmove]: [&str; 6] = parts
            .as_slice()
            .try_into()
            .map_err(|_| FenError::InvalidPartCount(parts.len()))?;

        Self::check_piece_placement(placement)?;

        let active_color = match color {
            "w" => 'w',
            "b" => 'b',
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        Self::check_castling(castling)?;
        Self::check_en_passant(en_passant)?;

        let halfmove_clock = halfmove
            .parse()
            .map_err(|_| FenError::InvalidHalfmoveClock(halfmove.to_string()))?;
        let fullmove_number = fullmove
            .parse()
            .map_err(|_| FenError::InvalidFullmoveNumber(fullmove.to_string()))?;

        Ok(FenParser {
            piece_placement: placement.to_string(),
            active_color,
            castling: castling.to_string(),
            en_passant: en_passant.to_string(),
            halfmove_clock,
            fullmove_number,
        })
    }

    fn check_piece_placement(placement: &str) -> Result<(), FenError> {
        let mut ranks = 0usize;
        for rank in placement.split('/') {
            ranks += 1;
            let mut files = 0u32;
            for c in rank.chars() {
                match c {
                    '1'..='8' => files += c as u32 - '0' as u32,
                    'p' | 'n' | 'b' | 'r' | 'q' | 'k' => files += 1,
                    'P' | 'N' | 'B' | 'R' | 'Q' | 'K' => files += 1,
                    _ => {
                        return Err(FenError::InvalidPiecePlacement(format!(
                            "invalid character '{}' in rank {}",
                            c,
                            9 - ranks
                        )))
                    }
                }
            }
            if files != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    9 - ranks,
                    files
                )));
            }
        }
        if ranks != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks
            )));
        }
        Ok(())
    }

    fn check_castling(castling: &str) -> Result<(), FenError> {
        if castling == "-" {
            return Ok(());
        }
        // X-FEN names the castling rook by its file letter in Chess960
        // positions, so a-h and A-H are accepted alongside KQkq.
        for c in castling.chars() {
            let ok = matches!(c, 'K' | 'Q' | 'k' | 'q')
                || ('a'..='h').contains(&c.to_ascii_lowercase());
            if !ok {
                return Err(FenError::InvalidCastlingRights(format!(
                    "invalid character '{}'",
                    c
                )));
            }
        }
        Ok(())
    }

    fn check_en_passant(ep: &str) -> Result<(), FenError> {
        if ep == "-" {
            return Ok(());
        }
        let bytes = ep.as_bytes();
        let valid = bytes.len() == 2
            && (b'a'..=b'h').contains(&bytes[0])
            && matches!(bytes[1], b'3' | b'6');
        if !valid {
            return Err(FenError::InvalidEnPassantSquare(ep.to_string()));
        }
        Ok(())
    }

    /// Reassembles the six fields into a FEN record.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.piece_placement,
            self.active_color,
            self.castling,
            self.en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl Default for FenParser {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}
