//! Chess piece representation.
//!
//! A [`Piece`] is packed into a single small code: the team bit of its
//! [`Color`] (white 8, black 0) OR'd with its [`PieceKind`] (1-6). Code 7 is
//! reserved for unoccupied squares and the bare team bits name "every piece of
//! that color", which gives the 15 board slots `0..=14`.

use crate::Color;
use std::fmt;

/// The six types of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    King = 1,
    Pawn = 2,
    Knight = 3,
    Bishop = 4,
    Rook = 5,
    Queen = 6,
}

impl PieceKind {
    /// All piece kinds in code order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    /// Promotion choices in the order moves are generated.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Knight,
        PieceKind::Rook,
        PieceKind::Bishop,
    ];

    /// Returns the 3-bit kind code (1-6).
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::King),
            2 => Some(PieceKind::Pawn),
            3 => Some(PieceKind::Knight),
            4 => Some(PieceKind::Bishop),
            5 => Some(PieceKind::Rook),
            6 => Some(PieceKind::Queen),
            _ => None,
        }
    }

    /// Lowercase FEN letter.
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::King => 'k',
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::King => "King",
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
        };
        write!(f, "{}", name)
    }
}

/// A colored piece, stored as its board slot code.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece(u8);

impl Piece {
    /// Number of board slots: 12 pieces, 2 teams, unoccupied.
    pub const SLOTS: usize = 15;

    /// Slot of the unoccupied-square set.
    pub const UNOCCUPIED_SLOT: usize = 7;

    const TEAM_BIT: u8 = 8;
    const KIND_MASK: u8 = 7;

    pub const WHITE_KING: Piece = Piece::new(PieceKind::King, Color::White);
    pub const WHITE_PAWN: Piece = Piece::new(PieceKind::Pawn, Color::White);
    pub const WHITE_KNIGHT: Piece = Piece::new(PieceKind::Knight, Color::White);
    pub const WHITE_BISHOP: Piece = Piece::new(PieceKind::Bishop, Color::White);
    pub const WHITE_ROOK: Piece = Piece::new(PieceKind::Rook, Color::White);
    pub const WHITE_QUEEN: Piece = Piece::new(PieceKind::Queen, Color::White);
    pub const BLACK_KING: Piece = Piece::new(PieceKind::King, Color::Black);
    pub const BLACK_PAWN: Piece = Piece::new(PieceKind::Pawn, Color::Black);
    pub const BLACK_KNIGHT: Piece = Piece::new(PieceKind::Knight, Color::Black);
    pub const BLACK_BISHOP: Piece = Piece::new(PieceKind::Bishop, Color::Black);
    pub const BLACK_ROOK: Piece = Piece::new(PieceKind::Rook, Color::Black);
    pub const BLACK_QUEEN: Piece = Piece::new(PieceKind::Queen, Color::Black);

    /// Creates a piece of the given kind and color.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece(color.team_bit() | kind.code())
    }

    /// Recovers a piece from its slot code; team and unoccupied slots are not pieces.
    pub const fn from_code(code: u8) -> Option<Self> {
        if code > Self::TEAM_BIT | Self::KIND_MASK {
            return None;
        }
        match PieceKind::from_code(code & Self::KIND_MASK) {
            Some(_) => Some(Piece(code)),
            None => None,
        }
    }

    /// Returns the slot code, usable as a board array index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn kind(self) -> PieceKind {
        match PieceKind::from_code(self.0 & Self::KIND_MASK) {
            Some(kind) => kind,
            None => unreachable!(),
        }
    }

    #[inline]
    pub const fn color(self) -> Color {
        if self.0 & Self::TEAM_BIT != 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    pub const fn is_kind(self, kind: PieceKind) -> bool {
        self.0 & Self::KIND_MASK == kind.code()
    }

    /// A rook of this piece's team.
    #[inline]
    pub const fn same_team_rook(self) -> Piece {
        Piece::new(PieceKind::Rook, self.color())
    }

    /// Parses a FEN letter; uppercase is white.
    pub const fn from_fen_char(c: char) -> Option<Piece> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            _ => return None,
        };
        Some(Piece::new(kind, color))
    }

    /// Returns the FEN letter for this piece.
    pub const fn to_fen_char(self) -> char {
        let c = self.kind().to_char();
        match self.color() {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Piece({} {})", self.color(), self.kind())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen_char())
    }
}
