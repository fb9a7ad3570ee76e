//! Move representation.
//!
//! A [`Move`] carries everything needed to both apply and exactly undo one
//! ply: origin and destination as single-square bitboards, the moving piece,
//! and a [`MoveKind`] holding the shape-specific data.

use crate::{Bitboard, Piece, PieceKind};
use std::fmt;

/// The shape of a move and the data only that shape carries.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Plain move onto an empty square.
    Quiet,
    /// Capture on the destination square.
    Capture { captured: Piece },
    /// Pawn double push; the skipped square becomes the en passant target.
    DoublePush { en_passant_target: Bitboard },
    /// En passant capture of the pawn standing on `captured_square`.
    EnPassant {
        captured: Piece,
        captured_square: Bitboard,
    },
    /// Pawn promotion, optionally capturing on the destination square.
    Promotion {
        promoted: Piece,
        captured: Option<Piece>,
    },
    /// Castling king move; `rook_displacement` holds the rook's origin and destination.
    Castle { rook_displacement: Bitboard },
}

/// A chess move.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Bitboard,
    to: Bitboard,
    piece: Piece,
    kind: MoveKind,
}

impl Move {
    #[inline]
    pub const fn new(from: Bitboard, to: Bitboard, piece: Piece, kind: MoveKind) -> Self {
        Move {
            from,
            to,
            piece,
            kind,
        }
    }

    #[inline]
    pub const fn quiet(from: Bitboard, to: Bitboard, piece: Piece) -> Self {
        Self::new(from, to, piece, MoveKind::Quiet)
    }

    #[inline]
    pub const fn capture(from: Bitboard, to: Bitboard, piece: Piece, captured: Piece) -> Self {
        Self::new(from, to, piece, MoveKind::Capture { captured })
    }

    #[inline]
    pub const fn double_push(
        from: Bitboard,
        to: Bitboard,
        piece: Piece,
        en_passant_target: Bitboard,
    ) -> Self {
        Self::new(from, to, piece, MoveKind::DoublePush { en_passant_target })
    }

    #[inline]
    pub const fn en_passant(
        from: Bitboard,
        to: Bitboard,
        piece: Piece,
        captured: Piece,
        captured_square: Bitboard,
    ) -> Self {
        Self::new(
            from,
            to,
            piece,
            MoveKind::EnPassant {
                captured,
                captured_square,
            },
        )
    }

    #[inline]
    pub const fn promotion(
        from: Bitboard,
        to: Bitboard,
        piece: Piece,
        promoted: Piece,
        captured: Option<Piece>,
    ) -> Self {
        Self::new(from, to, piece, MoveKind::Promotion { promoted, captured })
    }

    #[inline]
    pub const fn castle(
        from: Bitboard,
        to: Bitboard,
        piece: Piece,
        rook_displacement: Bitboard,
    ) -> Self {
        Self::new(from, to, piece, MoveKind::Castle { rook_displacement })
    }

    #[inline]
    pub const fn from(&self) -> Bitboard {
        self.from
    }

    #[inline]
    pub const fn to(&self) -> Bitboard {
        self.to
    }

    /// The piece making the move.
    #[inline]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    #[inline]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// The captured piece, if any.
    pub const fn captured(&self) -> Option<Piece> {
        match self.kind {
            MoveKind::Capture { captured } | MoveKind::EnPassant { captured, .. } => {
                Some(captured)
            }
            MoveKind::Promotion { captured, .. } => captured,
            _ => None,
        }
    }

    /// The square the captured piece stood on; differs from `to` only for en passant.
    pub const fn capture_square(&self) -> Option<Bitboard> {
        match self.kind {
            MoveKind::Capture { .. } | MoveKind::Promotion { captured: Some(_), .. } => {
                Some(self.to)
            }
            MoveKind::EnPassant {
                captured_square, ..
            } => Some(captured_square),
            _ => None,
        }
    }

    pub const fn promoted_to(&self) -> Option<Piece> {
        match self.kind {
            MoveKind::Promotion { promoted, .. } => Some(promoted),
            _ => None,
        }
    }

    /// The en passant target this move produces; empty unless a double push.
    pub const fn en_passant_target(&self) -> Bitboard {
        match self.kind {
            MoveKind::DoublePush { en_passant_target } => en_passant_target,
            _ => Bitboard::EMPTY,
        }
    }

    pub const fn rook_displacement(&self) -> Option<Bitboard> {
        match self.kind {
            MoveKind::Castle { rook_displacement } => Some(rook_displacement),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured().is_some()
    }

    #[inline]
    pub const fn is_pawn_move(&self) -> bool {
        self.piece.is_kind(PieceKind::Pawn)
    }

    /// Converts to algebra notation: `<from><to>[promotion letter]`.
    pub fn to_algebra(&self) -> String {
        let mut s = format!("{}{}", self.from.to_algebraic(), self.to.to_algebraic());
        if let Some(promoted) = self.promoted_to() {
            s.push(promoted.to_fen_char());
        }
        s
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {:?})", self.to_algebra(), self.piece)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebra())
    }
}
