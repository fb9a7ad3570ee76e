//! Player color representation.

use crate::{Bitboard, Direction};

/// Represents the two players in chess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Both colors, white first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Returns the opposite color.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the team bit carried by piece codes of this color.
    #[inline]
    pub const fn team_bit(self) -> u8 {
        match self {
            Color::White => 8,
            Color::Black => 0,
        }
    }

    /// Board slot holding every piece of this color.
    #[inline]
    pub const fn team_slot(self) -> usize {
        self.team_bit() as usize
    }

    /// Direction pawns of this color advance in.
    #[inline]
    pub const fn forward(self) -> Direction {
        match self {
            Color::White => Direction::North,
            Color::Black => Direction::South,
        }
    }

    #[inline]
    pub const fn backward(self) -> Direction {
        match self {
            Color::White => Direction::South,
            Color::Black => Direction::North,
        }
    }

    /// Rank pawns of this color start on and may double push from.
    #[inline]
    pub const fn pawn_start_rank(self) -> Bitboard {
        match self {
            Color::White => Bitboard::RANK_2,
            Color::Black => Bitboard::RANK_7,
        }
    }

    /// Rank pawns of this color promote on.
    #[inline]
    pub const fn promotion_rank(self) -> Bitboard {
        match self {
            Color::White => Bitboard::RANK_8,
            Color::Black => Bitboard::RANK_1,
        }
    }

    /// Pawn capture directions: the a1-h8 diagonal first, then the a8-h1 one.
    #[inline]
    pub const fn pawn_attack_directions(self) -> [Direction; 2] {
        match self {
            Color::White => [Direction::NorthEast, Direction::NorthWest],
            Color::Black => [Direction::SouthWest, Direction::SouthEast],
        }
    }

    /// Parses the FEN side-to-move token.
    pub fn from_fen(token: &str) -> Option<Self> {
        match token {
            "w" => Some(Color::White),
            "b" => Some(Color::Black),
            _ => None,
        }
    }

    #[inline]
    pub const fn to_fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_color() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::White);
    }

    #[test]
    fn team_slots() {
        assert_eq!(Color::White.team_slot(), 8);
        assert_eq!(Color::Black.team_slot(), 0);
    }

    #[test]
    fn pawn_directions() {
        assert_eq!(Color::White.forward(), Direction::North);
        assert_eq!(Color::Black.forward(), Direction::South);
        assert_eq!(Color::White.backward(), Color::White.forward().opposite());
        assert_eq!(
            Color::Black.pawn_attack_directions(),
            [Direction::SouthWest, Direction::SouthEast]
        );
    }

    #[test]
    fn pawn_ranks() {
        assert_eq!(Color::White.pawn_start_rank(), Bitboard::RANK_2);
        assert_eq!(Color::Black.pawn_start_rank(), Bitboard::RANK_7);
        assert_eq!(Color::White.promotion_rank(), Bitboard::RANK_8);
        assert_eq!(Color::Black.promotion_rank(), Bitboard::RANK_1);
    }

    #[test]
    fn fen_token() {
        assert_eq!(Color::from_fen("w"), Some(Color::White));
        assert_eq!(Color::from_fen("b"), Some(Color::Black));
        assert_eq!(Color::from_fen("W"), None);
        assert_eq!(Color::Black.to_fen_char(), 'b');
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Color::White), "White");
        assert_eq!(format!("{}", Color::Black), "Black");
    }
}
