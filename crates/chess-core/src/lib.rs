//! Core types for chess.
//!
//! This crate provides the fundamental types used across the rules engine:
//! - [`Bitboard`] and [`Direction`] for square sets, wrap-safe shifts and ray fills
//! - [`Piece`], [`PieceKind`] and [`Color`] for the packed piece codes
//! - [`Square`] for board coordinates and algebraic notation
//! - [`Move`] for move representation
//! - FEN parsing and serialization

mod bitboard;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter, Direction, Singles};
pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::{Move, MoveKind};
pub use piece::{Piece, PieceKind};
pub use square::Square;
