//! Castling rights and castle move construction.

use crate::Board;
use chess_core::{Bitboard, Color, FenError, Move, Piece, PieceKind};
use std::fmt;

/// Which rook a king castles with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];
}

/// Castling rights flags.
///
/// Rights are only ever removed: a king move clears both of its side's
/// flags, a rook leaving or being captured on its corner clears that corner's.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const BLACK_KINGSIDE: u8 = 0b0001;
    pub const BLACK_QUEENSIDE: u8 = 0b0010;
    pub const WHITE_KINGSIDE: u8 = 0b0100;
    pub const WHITE_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    // FEN letters in output order.
    const LETTERS: [(char, u8); 4] = [
        ('K', Self::WHITE_KINGSIDE),
        ('Q', Self::WHITE_QUEENSIDE),
        ('k', Self::BLACK_KINGSIDE),
        ('q', Self::BLACK_QUEENSIDE),
    ];

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    #[inline]
    pub fn can_castle(self, color: Color, side: CastleSide) -> bool {
        self.0 & CastlePath::of(color, side).right != 0
    }

    /// Parses the FEN castling field (`KQkq` subset or `-`).
    pub fn from_fen(field: &str) -> Result<Self, FenError> {
        if field == "-" {
            return Ok(Self::NONE);
        }
        let mut flags = 0;
        for c in field.chars() {
            let (_, flag) = Self::LETTERS
                .iter()
                .find(|(letter, _)| *letter == c)
                .ok_or_else(|| FenError::InvalidCastlingRights(field.to_string()))?;
            flags |= flag;
        }
        Ok(CastlingRights(flags))
    }

    /// Writes the FEN castling field.
    pub fn to_fen(self) -> String {
        let letters: String = Self::LETTERS
            .iter()
            .filter(|(_, flag)| self.0 & flag != 0)
            .map(|(letter, _)| *letter)
            .collect();
        if letters.is_empty() {
            "-".to_string()
        } else {
            letters
        }
    }

    /// Rights remaining once `m` has been played.
    pub fn after_move(self, m: &Move) -> Self {
        let mut flags = self.0;
        let mover = m.piece();
        let color = mover.color();

        if mover.is_kind(PieceKind::King) {
            for side in CastleSide::ALL {
                flags &= !CastlePath::of(color, side).right;
            }
        } else if mover.is_kind(PieceKind::Rook) {
            for side in CastleSide::ALL {
                let path = CastlePath::of(color, side);
                if m.from() == path.rook_from {
                    flags &= !path.right;
                }
            }
        }

        if let (Some(captured), Some(square)) = (m.captured(), m.capture_square()) {
            if captured.is_kind(PieceKind::Rook) {
                for side in CastleSide::ALL {
                    let path = CastlePath::of(captured.color(), side);
                    if square == path.rook_from {
                        flags &= !path.right;
                    }
                }
            }
        }

        CastlingRights(flags)
    }
}

impl fmt::Debug for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastlingRights({})", self.to_fen())
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

/// Squares involved in one castle.
struct CastlePath {
    right: u8,
    king_from: Bitboard,
    king_to: Bitboard,
    rook_from: Bitboard,
    rook_to: Bitboard,
    /// Squares between king and rook.
    must_be_empty: Bitboard,
    /// King start, passed-through and destination squares.
    must_be_safe: Bitboard,
}

impl CastlePath {
    fn of(color: Color, side: CastleSide) -> &'static CastlePath {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => &WHITE_KINGSIDE,
            (Color::White, CastleSide::Queenside) => &WHITE_QUEENSIDE,
            (Color::Black, CastleSide::Kingside) => &BLACK_KINGSIDE,
            (Color::Black, CastleSide::Queenside) => &BLACK_QUEENSIDE,
        }
    }
}

const WHITE_KINGSIDE: CastlePath = CastlePath {
    right: CastlingRights::WHITE_KINGSIDE,
    king_from: Bitboard::from_indices(&[4]),
    king_to: Bitboard::from_indices(&[6]),
    rook_from: Bitboard::from_indices(&[7]),
    rook_to: Bitboard::from_indices(&[5]),
    must_be_empty: Bitboard::from_indices(&[5, 6]),
    must_be_safe: Bitboard::from_indices(&[4, 5, 6]),
};

const WHITE_QUEENSIDE: CastlePath = CastlePath {
    right: CastlingRights::WHITE_QUEENSIDE,
    king_from: Bitboard::from_indices(&[4]),
    king_to: Bitboard::from_indices(&[2]),
    rook_from: Bitboard::from_indices(&[0]),
    rook_to: Bitboard::from_indices(&[3]),
    must_be_empty: Bitboard::from_indices(&[1, 2, 3]),
    must_be_safe: Bitboard::from_indices(&[2, 3, 4]),
};

const BLACK_KINGSIDE: CastlePath = CastlePath {
    right: CastlingRights::BLACK_KINGSIDE,
    king_from: Bitboard::from_indices(&[60]),
    king_to: Bitboard::from_indices(&[62]),
    rook_from: Bitboard::from_indices(&[63]),
    rook_to: Bitboard::from_indices(&[61]),
    must_be_empty: Bitboard::from_indices(&[61, 62]),
    must_be_safe: Bitboard::from_indices(&[60, 61, 62]),
};

const BLACK_QUEENSIDE: CastlePath = CastlePath {
    right: CastlingRights::BLACK_QUEENSIDE,
    king_from: Bitboard::from_indices(&[60]),
    king_to: Bitboard::from_indices(&[58]),
    rook_from: Bitboard::from_indices(&[56]),
    rook_to: Bitboard::from_indices(&[59]),
    must_be_empty: Bitboard::from_indices(&[57, 58, 59]),
    must_be_safe: Bitboard::from_indices(&[58, 59, 60]),
};

/// Builds the castle for `color` on `side` if it is currently legal.
///
/// Requires the right, king and rook on their home squares, empty squares
/// between them, and no threat on the king's start, path or destination.
pub fn castle_move(
    board: &Board,
    color: Color,
    side: CastleSide,
    rights: CastlingRights,
    threatened: Bitboard,
) -> Option<Move> {
    let path = CastlePath::of(color, side);
    let king = Piece::new(PieceKind::King, color);
    let legal = rights.can_castle(color, side)
        && board.unoccupied().contains_all(path.must_be_empty)
        && !threatened.intersects(path.must_be_safe)
        && board.pieces(king).contains_all(path.king_from)
        && board.pieces(king.same_team_rook()).contains_all(path.rook_from);
    legal.then(|| {
        Move::castle(
            path.king_from,
            path.king_to,
            king,
            path.rook_from | path.rook_to,
        )
    })
}
