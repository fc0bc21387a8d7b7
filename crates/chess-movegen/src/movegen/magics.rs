//! Magic bitboard tables for sliding piece attack generation.
//!
//! Magic bitboards use a perfect hashing technique to map blocker configurations
//! to precomputed attack bitboards in O(1) time.

use crate::Bitboard;
use chess_core::Square;
use std::sync::OnceLock;

/// Magic entry for a single square.
#[derive(Clone, Copy)]
struct MagicEntry {
    /// Mask of relevant blocker squares (excludes edges).
    mask: Bitboard,
    /// The magic multiplier for this square.
    magic: u64,
    /// Right shift amount (64 - number of bits in mask).
    shift: u8,
    /// Offset into the shared attack table.
    offset: usize,
}

/// A complete per-piece slider attack table.
struct SliderTable {
    entries: [MagicEntry; 64],
    attacks: Vec<Bitboard>,
}

impl SliderTable {
    #[inline]
    fn lookup(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let entry = &self.entries[sq.index() as usize];
        let index = ((occupied.0 & entry.mask.0).wrapping_mul(entry.magic) >> entry.shift) as usize;
        self.attacks[entry.offset + index]
    }
}

/// Bishop and rook tables together (~40KB + ~800KB with fancy magics).
struct Tables {
    bishop: SliderTable,
    rook: SliderTable,
}

static TABLES: OnceLock<Tables> = OnceLock::new();

fn tables() -> &'static Tables {
    TABLES.get_or_init(|| Tables {
        bishop: build_slider_table(&BISHOP_DELTAS, &BISHOP_MAGICS, &BISHOP_BITS),
        rook: build_slider_table(&ROOK_DELTAS, &ROOK_MAGICS, &ROOK_BITS),
    })
}

/// Returns bishop attacks for a square given occupied squares.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    tables().bishop.lookup(sq, occupied)
}

/// Returns rook attacks for a square given occupied squares.
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    tables().rook.lookup(sq, occupied)
}

/// Returns queen attacks (bishop + rook).
#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)
}

const BISHOP_DELTAS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_DELTAS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Builds the full attack table for one slider kind.
fn build_slider_table(deltas: &[(i8, i8); 4], magics: &[u64; 64], bits: &[u8; 64]) -> SliderTable {
    let mut entries = [MagicEntry {
        mask: Bitboard::EMPTY,
        magic: 0,
        shift: 0,
        offset: 0,
    }; 64];
    let mut attacks = Vec::new();

    for sq in 0..64u8 {
        let mask = blocker_mask(sq, deltas);
        let shift = 64 - bits[sq as usize];
        let offset = attacks.len();

        entries[sq as usize] = MagicEntry {
            mask,
            magic: magics[sq as usize],
            shift,
            offset,
        };
        attacks.resize(offset + (1usize << bits[sq as usize]), Bitboard::EMPTY);

        // Carry-Rippler trick to enumerate all blocker subsets of the mask
        let mut blockers = Bitboard::EMPTY;
        loop {
            let index =
                ((blockers.0 & mask.0).wrapping_mul(magics[sq as usize]) >> shift) as usize;
            attacks[offset + index] = attacks_slow(sq, blockers, deltas);

            blockers = Bitboard(blockers.0.wrapping_sub(mask.0) & mask.0);
            if blockers.is_empty() {
                break;
            }
        }
    }

    SliderTable { entries, attacks }
}

/// Generates the relevant blocker mask for a square (excludes edge squares
/// in each ray direction).
fn blocker_mask(sq: u8, deltas: &[(i8, i8); 4]) -> Bitboard {
    let mut mask = 0u64;
    let rank = (sq / 8) as i8;
    let file = (sq % 8) as i8;

    for &(dr, df) in deltas {
        let mut r = rank + dr;
        let mut f = file + df;
        // Stop one square short of the board edge in the travel direction
        while (0..8).contains(&(r + dr)) && (0..8).contains(&(f + df)) {
            mask |= 1u64 << (r * 8 + f);
            r += dr;
            f += df;
        }
    }

    Bitboard(mask)
}

/// Slow ray-walking attack generation, used only to seed the tables.
fn attacks_slow(sq: u8, blockers: Bitboard, deltas: &[(i8, i8); 4]) -> Bitboard {
    let mut attacks = 0u64;
    let rank = (sq / 8) as i8;
    let file = (sq % 8) as i8;

    for &(dr, df) in deltas {
        let mut r = rank + dr;
        let mut f = file + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let bit = 1u64 << (r * 8 + f);
            attacks |= bit;
            if blockers.0 & bit != 0 {
                break;
            }
            r += dr;
            f += df;
        }
    }

    Bitboard(attacks)
}

// Pre-computed magic numbers (from Chess Programming Wiki / Stockfish).
// These are "fancy" magics that minimize table size.
const BISHOP_MAGICS: [u64; 64] = [
    0x89a1121896040240,
    0x2004844802002010,
    0x2068080051921000,
    0x62880a0220200808,
    0x0004042004000000,
    0x0100822020200011,
    0xc00444222012000a,
    0x0028808801216001,
    0x0400492088408100,
    0x0201c401040c0084,
    0x00840800910a0010,
    0x0000082080240060,
    0x2000840504006000,
    0x30010c4108405004,
    0x1008005410080802,
    0x8144042209100900,
    0x0208081020014400,
    0x004800201208ca00,
    0x0f18140408012008,
    0x1004002802102001,
    0x0841000820080811,
    0x0040200200a42008,
    0x0000800054042000,
    0x88010400410c9000,
    0x0520040470104290,
    0x1004040051500081,
    0x2002081833080021,
    0x000400c00c010142,
    0x941408200c002000,
    0x0658810000806011,
    0x0188071040440a00,
    0x4800404002011c00,
    0x0104442040404200,
    0x0511080200222104,
    0x0004022401120400,
    0x80c0040400080120,
    0x8040010040820802,
    0x0480810700020090,
    0x0102008e00040242,
    0x0809005202050100,
    0x8002024220104080,
    0x0431008804142000,
    0x0019001802081400,
    0x0200014208040080,
    0x3308082008200100,
    0x041010500040c020,
    0x4012020c04210308,
    0x208220a202004080,
    0x0111040120082000,
    0x6803040141280a00,
    0x2101004202410000,
    0x8200000041108022,
    0x0000021082088000,
    0x0002410204010040,
    0x0040100400809000,
    0x0822088220820214,
    0x0040808090012004,
    0x00910224040218c9,
    0x0402814422015008,
    0x0090014004842410,
    0x0001000042304105,
    0x0010008830412a00,
    0x2520081090008908,
    0x40102000a0a60140,
];

const ROOK_MAGICS: [u64; 64] = [
    0x0a8002c000108020,
    0x06c00049b0002001,
    0x0100200010090040,
    0x2480041000800801,
    0x0280028004000800,
    0x0900410008040022,
    0x0280020001001080,
    0x2880002041000080,
    0xa000800080400034,
    0x0004808020004000,
    0x2290802004801000,
    0x0411000d00100020,
    0x0402800800040080,
    0x000b000401004208,
    0x2409000100040200,
    0x0001002100004082,
    0x0022878001e24000,
    0x1090810021004010,
    0x0801030040200012,
    0x0500808008001000,
    0x0a08018014000880,
    0x8000808004000200,
    0x0201008080010200,
    0x0801020000441091,
    0x0000800080204005,
    0x1040200040100048,
    0x0000120200402082,
    0x0d14880480100080,
    0x0012040280080080,
    0x0100040080020080,
    0x9020010080800200,
    0x0813241200148449,
    0x0491604001800080,
    0x0100401000402001,
    0x4820010021001040,
    0x0400402202000812,
    0x0209009005000802,
    0x0810800601800400,
    0x4301083214000150,
    0x204026458e001401,
    0x0040204000808000,
    0x8001008040010020,
    0x8410820820420010,
    0x1003001000090020,
    0x0804040008008080,
    0x0012000810020004,
    0x1000100200040208,
    0x430000a044020001,
    0x0280009023410300,
    0x00e0100040002240,
    0x0000200100401700,
    0x2244100408008080,
    0x0008000400801980,
    0x0002000810040200,
    0x8010100228810400,
    0x2000009044210200,
    0x4080008040102101,
    0x0040002080411d01,
    0x2005524060000901,
    0x0502001008400422,
    0x489a000810200402,
    0x0001004400080a13,
    0x4000011008020084,
    0x0026002114058042,
];

const BISHOP_BITS: [u8; 64] = [
    6, 5, 5, 5, 5, 5, 5, 6,
    5, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 7, 7, 7, 7, 5, 5,
    5, 5, 7, 9, 9, 7, 5, 5,
    5, 5, 7, 9, 9, 7, 5, 5,
    5, 5, 7, 7, 7, 7, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5,
    6, 5, 5, 5, 5, 5, 5, 6,
];

const ROOK_BITS: [u8; 64] = [
    12, 11, 11, 11, 11, 11, 11, 12,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    11, 10, 10, 10, 10, 10, 10, 11,
    12, 11, 11, 11, 11, 11, 11, 12,
];
