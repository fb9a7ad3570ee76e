//! Bitboard representation and operations.
//!
//! A bitboard is a 64-bit integer where each bit represents a square on the
//! chess board. Besides plain set algebra this module provides the directional
//! shifts and ray fills that move generation is built from:
//!
//! - [`Bitboard::directional_shift_bounded`] steps every square one move in a
//!   [`Direction`] without wrapping around the board edges.
//! - [`Bitboard::fill`] smears a set along a direction through a permitted area
//!   in three shift rounds (1, 2 and 4 steps).

use crate::Square;
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// A 64-bit board representation.
///
/// Bit 0 = a1, bit 1 = b1, ..., bit 63 = h8 (little-endian rank-file mapping).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u64);

/// One of the eight single-step directions or the eight knight jumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
    NorthNorthEast = 8,
    NorthEastEast = 9,
    SouthEastEast = 10,
    SouthSouthEast = 11,
    SouthSouthWest = 12,
    SouthWestWest = 13,
    NorthWestWest = 14,
    NorthNorthWest = 15,
}

const SHIFTS: [i32; 16] = [8, 9, 1, -7, -8, -9, -1, 7, 17, 10, -6, -15, -17, -10, 6, 15];

// Squares a step in the matching direction may not start from.
const BOUNDS: [u64; 16] = [
    Bitboard::RANK_8.0,
    Bitboard::RANK_8.0 | Bitboard::FILE_H.0,
    Bitboard::FILE_H.0,
    Bitboard::RANK_1.0 | Bitboard::FILE_H.0,
    Bitboard::RANK_1.0,
    Bitboard::RANK_1.0 | Bitboard::FILE_A.0,
    Bitboard::FILE_A.0,
    Bitboard::RANK_8.0 | Bitboard::FILE_A.0,
    Bitboard::RANK_8.0 | Bitboard::RANK_7.0 | Bitboard::FILE_H.0,
    Bitboard::RANK_8.0 | Bitboard::FILE_H.0 | Bitboard::FILE_G.0,
    Bitboard::RANK_1.0 | Bitboard::FILE_H.0 | Bitboard::FILE_G.0,
    Bitboard::RANK_1.0 | Bitboard::RANK_2.0 | Bitboard::FILE_H.0,
    Bitboard::RANK_1.0 | Bitboard::RANK_2.0 | Bitboard::FILE_A.0,
    Bitboard::RANK_1.0 | Bitboard::FILE_A.0 | Bitboard::FILE_B.0,
    Bitboard::RANK_8.0 | Bitboard::FILE_A.0 | Bitboard::FILE_B.0,
    Bitboard::RANK_8.0 | Bitboard::RANK_7.0 | Bitboard::FILE_A.0,
];

impl Direction {
    /// Horizontal and vertical steps.
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Diagonal steps.
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    pub const HORIZONTAL: [Direction; 2] = [Direction::East, Direction::West];
    pub const VERTICAL: [Direction; 2] = [Direction::North, Direction::South];
    /// The a1-h8 diagonal axis.
    pub const DIAGONAL_POSITIVE: [Direction; 2] = [Direction::NorthEast, Direction::SouthWest];
    /// The a8-h1 diagonal axis.
    pub const DIAGONAL_NEGATIVE: [Direction; 2] = [Direction::NorthWest, Direction::SouthEast];

    /// All eight single-step directions.
    pub const EVERY_DIRECTION: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// The eight knight jumps.
    pub const L_SHAPES: [Direction; 8] = [
        Direction::NorthNorthEast,
        Direction::NorthEastEast,
        Direction::SouthEastEast,
        Direction::SouthSouthEast,
        Direction::SouthSouthWest,
        Direction::SouthWestWest,
        Direction::NorthWestWest,
        Direction::NorthNorthWest,
    ];

    /// Returns the index of this direction (0-15).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the signed bit-shift amount for one step in this direction.
    #[inline]
    pub const fn shift(self) -> i32 {
        SHIFTS[self as usize]
    }

    /// Returns the squares a step in this direction may not start from.
    #[inline]
    pub const fn bound(self) -> Bitboard {
        Bitboard(BOUNDS[self as usize])
    }

    /// Returns true for the eight single-step (non-knight) directions.
    #[inline]
    pub const fn is_single_step(self) -> bool {
        (self as u8) < 8
    }

    /// Returns the direction pointing the other way.
    pub const fn opposite(self) -> Direction {
        let index = self as u8;
        let opposite = if index < 8 {
            (index + 4) % 8
        } else {
            8 + (index - 8 + 4) % 8
        };
        match opposite {
            0 => Direction::North,
            1 => Direction::NorthEast,
            2 => Direction::East,
            3 => Direction::SouthEast,
            4 => Direction::South,
            5 => Direction::SouthWest,
            6 => Direction::West,
            7 => Direction::NorthWest,
            8 => Direction::NorthNorthEast,
            9 => Direction::NorthEastEast,
            10 => Direction::SouthEastEast,
            11 => Direction::SouthSouthEast,
            12 => Direction::SouthSouthWest,
            13 => Direction::SouthWestWest,
            14 => Direction::NorthWestWest,
            _ => Direction::NorthNorthWest,
        }
    }

    /// Area a fill in this direction may enter; excludes the file a wrapped
    /// step would land on.
    const fn fill_area(self) -> Bitboard {
        match self {
            Direction::NorthEast | Direction::East | Direction::SouthEast => {
                Bitboard(!Bitboard::FILE_A.0)
            }
            Direction::SouthWest | Direction::West | Direction::NorthWest => {
                Bitboard(!Bitboard::FILE_H.0)
            }
            _ => Bitboard::FULL,
        }
    }
}

impl Bitboard {
    /// Empty bitboard (no squares set).
    pub const EMPTY: Bitboard = Bitboard(0);

    /// Full bitboard (all squares set).
    pub const FULL: Bitboard = Bitboard(!0);

    // File masks
    pub const FILE_A: Bitboard = Bitboard(0x0101_0101_0101_0101);
    pub const FILE_B: Bitboard = Bitboard(0x0202_0202_0202_0202);
    pub const FILE_C: Bitboard = Bitboard(0x0404_0404_0404_0404);
    pub const FILE_D: Bitboard = Bitboard(0x0808_0808_0808_0808);
    pub const FILE_E: Bitboard = Bitboard(0x1010_1010_1010_1010);
    pub const FILE_F: Bitboard = Bitboard(0x2020_2020_2020_2020);
    pub const FILE_G: Bitboard = Bitboard(0x4040_4040_4040_4040);
    pub const FILE_H: Bitboard = Bitboard(0x8080_8080_8080_8080);

    // Rank masks
    pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00FF);
    pub const RANK_2: Bitboard = Bitboard(0x0000_0000_0000_FF00);
    pub const RANK_3: Bitboard = Bitboard(0x0000_0000_00FF_0000);
    pub const RANK_4: Bitboard = Bitboard(0x0000_0000_FF00_0000);
    pub const RANK_5: Bitboard = Bitboard(0x0000_00FF_0000_0000);
    pub const RANK_6: Bitboard = Bitboard(0x0000_FF00_0000_0000);
    pub const RANK_7: Bitboard = Bitboard(0x00FF_0000_0000_0000);
    pub const RANK_8: Bitboard = Bitboard(0xFF00_0000_0000_0000);

    /// Dark squares; a1 is dark.
    pub const DARK_SQUARES: Bitboard = Bitboard(0xAA55_AA55_AA55_AA55);

    /// Creates a bitboard with a single square set.
    #[inline]
    pub const fn from_square(sq: Square) -> Self {
        Bitboard(1u64 << sq.index())
    }

    /// Creates a bitboard from a list of square indices.
    pub const fn from_indices(indices: &[u8]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < indices.len() {
            bits |= 1u64 << indices[i];
            i += 1;
        }
        Bitboard(bits)
    }

    /// Returns true if the bitboard is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the bitboard is not empty.
    #[inline]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// Returns the number of set bits (population count).
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns true if the given square is set.
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 & (1u64 << sq.index())) != 0
    }

    /// Returns true if every square of `bits` is also in `self`.
    #[inline]
    pub const fn contains_all(self, bits: Bitboard) -> bool {
        self.0 & bits.0 == bits.0
    }

    /// Returns true if the two sets share at least one square.
    #[inline]
    pub const fn intersects(self, other: Bitboard) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns the lowest square in the set.
    #[inline]
    pub const fn lsb(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Square::from_index(self.0.trailing_zeros() as u8)
        }
    }

    /// Pops and returns the least significant square.
    #[inline]
    pub fn pop_lsb(&mut self) -> Option<Square> {
        let sq = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    /// Iterates the set as single-square bitboards, lowest square first.
    #[inline]
    pub const fn singles(self) -> Singles {
        Singles(self.0)
    }

    /// Shifts left for a positive amount, logically right for a negative one.
    #[inline]
    pub const fn shift(self, amount: i32) -> Bitboard {
        if amount >= 0 {
            Bitboard(self.0 << amount)
        } else {
            Bitboard(self.0 >> -amount)
        }
    }

    /// Steps every square once in `dir`. Squares may wrap across files.
    #[inline]
    pub const fn directional_shift(self, dir: Direction) -> Bitboard {
        self.shift(dir.shift())
    }

    /// Steps every square once in `dir`, dropping squares that would wrap
    /// around an edge.
    #[inline]
    pub const fn directional_shift_bounded(self, dir: Direction) -> Bitboard {
        Bitboard(self.0 & !dir.bound().0).shift(dir.shift())
    }

    #[inline]
    pub const fn directional_shift_within(self, dir: Direction, area: Bitboard) -> Bitboard {
        Bitboard(self.directional_shift(dir).0 & area.0)
    }

    #[inline]
    pub const fn directional_shift_bounded_within(
        self,
        dir: Direction,
        area: Bitboard,
    ) -> Bitboard {
        Bitboard(self.directional_shift_bounded(dir).0 & area.0)
    }

    /// Steps every square once against `dir`.
    #[inline]
    pub const fn opposite_directional_shift(self, dir: Direction) -> Bitboard {
        self.shift(-dir.shift())
    }

    /// Extends the set along `dir` through `area`.
    ///
    /// The result holds `self` plus every square reachable from it by repeated
    /// single steps that stay inside `area`. Only defined for the eight
    /// single-step directions.
    pub const fn fill(self, dir: Direction, area: Bitboard) -> Bitboard {
        debug_assert!(dir.is_single_step());
        let step = dir.shift();
        let mut bits = self.0;
        let mut area = area.0 & dir.fill_area().0;
        bits |= area & Bitboard(bits).shift(step).0;
        area &= Bitboard(area).shift(step).0;
        bits |= area & Bitboard(bits).shift(step * 2).0;
        area &= Bitboard(area).shift(step * 2).0;
        bits |= area & Bitboard(bits).shift(step * 4).0;
        Bitboard(bits)
    }

    /// Parses algebraic notation into a single-square set; `-` is the empty set.
    pub const fn from_algebraic(s: &str) -> Option<Bitboard> {
        let bytes = s.as_bytes();
        if bytes.len() == 1 && bytes[0] == b'-' {
            return Some(Bitboard::EMPTY);
        }
        match Square::from_algebraic(s) {
            Some(sq) => Some(Bitboard::from_square(sq)),
            None => None,
        }
    }

    /// Algebraic notation of the lowest square, or `-` for the empty set.
    pub fn to_algebraic(self) -> String {
        match self.lsb() {
            Some(sq) => sq.to_algebraic(),
            None => "-".to_string(),
        }
    }
}

impl BitAnd for Bitboard {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Self;
    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Self;
    #[inline]
    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bitboard({:#018x})", self.0)?;
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let mark = if (self.0 >> (rank * 8 + file)) & 1 == 1 {
                    'X'
                } else {
                    '.'
                };
                write!(f, "{} ", mark)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")
    }
}

/// Iterator over set squares in a bitboard.
pub struct BitboardIter(Bitboard);

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_lsb()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count() as usize;
        (count, Some(count))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        BitboardIter(self)
    }
}

/// Iterator over the members of a bitboard as single-square bitboards.
pub struct Singles(u64);

impl Iterator for Singles {
    type Item = Bitboard;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        let lowest = self.0 & self.0.wrapping_neg();
        self.0 ^= lowest;
        Some(Bitboard(lowest))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count_ones() as usize;
        (count, Some(count))
    }
}
