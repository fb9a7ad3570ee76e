//! Chess rules engine with bitboard representation.
//!
//! This crate provides:
//! - [`Board`] - piece placement as fifteen bitboards with exact apply/undo
//! - [`analyze`] - legal move generation with threat, check and pin masks
//! - [`Game`] - full position state with history, draw rules and results
//! - [`perft`] and [`perft_divide`] - move generator validation
//! - [`CombinatorialGame`] - the trait a search framework drives a game through
//!
//! # Architecture
//!
//! Every piece type/color combination has a bitboard. Moves are generated by
//! shifting and filling whole sets along [`Direction`](chess_core::Direction)s;
//! pins and check rays are computed up front so that each generated move is
//! legal without being tried.
//!
//! # Example
//!
//! ```
//! use chess_rules::{perft, Game};
//!
//! let mut game = Game::standard();
//! assert_eq!(game.possible_moves().len(), 20);
//!
//! game.apply_algebra("e2e4").unwrap();
//! game.apply_algebra("e7e5").unwrap();
//! assert_eq!(
//!     game.to_fen(),
//!     "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
//! );
//!
//! assert_eq!(perft(&mut game, 1), 29);
//! ```

mod board;
mod castling;
mod combinatorial;
mod game;
pub mod movegen;
mod perft;
pub mod rules;

pub use board::Board;
pub use castling::{castle_move, CastleSide, CastlingRights};
pub use combinatorial::CombinatorialGame;
pub use game::{Game, GameError};
pub use movegen::{analyze, Analysis, MoveList, PinAxis};
pub use perft::{perft, perft_divide};
pub use rules::{DrawReason, DrawRules, GameResult};
