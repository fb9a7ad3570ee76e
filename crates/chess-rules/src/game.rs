//! Game state with apply/undo history.
//!
//! A [`Game`] owns the board plus the remaining FEN state (side to move,
//! castling rights, en passant target and both clocks) and keeps the
//! [`Analysis`] of the current position cached. Every mutation goes through
//! [`Game::apply_move`] and the undo functions, which restore the previous
//! state exactly from a history of snapshots.

use crate::movegen::{analyze, Analysis, MoveList, PinAxis};
use crate::rules::{DrawReason, DrawRules, GameResult};
use crate::{Board, CastlingRights};
use chess_core::{Bitboard, Color, FenError, FenParser, Move};
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that can occur when loading or playing a game.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid FEN: {0}")]
    Fen(#[from] FenError),

    #[error("no legal move matches '{0}'")]
    NoMatchingMove(String),

    #[error("no move to undo")]
    NothingToUndo,
}

/// State a move overwrites, kept to take the move back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snapshot {
    mov: Move,
    castling: CastlingRights,
    en_passant: Bitboard,
    halfmove_clock: u32,
    fullmove_number: u32,
}

/// A chess game.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Bitboard,
    halfmove_clock: u32,
    fullmove_number: u32,
    history: Vec<Snapshot>,
    analysis: Analysis,
    rules: DrawRules,
}

impl Default for Game {
    fn default() -> Self {
        Self::standard()
    }
}

impl Game {
    /// Creates a game at the standard starting position.
    pub fn standard() -> Self {
        let mut game = Game {
            board: Board::standard(),
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: Bitboard::EMPTY,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
            analysis: Analysis::default(),
            rules: DrawRules::default(),
        };
        game.refresh();
        game
    }

    /// Creates a game from a six-field FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let parsed = FenParser::parse(fen)?;
        let mut game = Game {
            board: Board::from_fen(&parsed.piece_placement)?,
            side_to_move: parsed.active_color,
            castling: CastlingRights::from_fen(&parsed.castling)?,
            en_passant: parsed.en_passant,
            halfmove_clock: parsed.halfmove_clock,
            fullmove_number: parsed.fullmove_number,
            history: Vec::new(),
            analysis: Analysis::default(),
            rules: DrawRules::default(),
        };
        game.refresh();
        debug!(fen, moves = game.possible_moves().len(), "loaded game");
        Ok(game)
    }

    /// Replaces the draw rules and re-evaluates the current position.
    pub fn with_rules(mut self, rules: DrawRules) -> Self {
        self.rules = rules;
        self.refresh();
        self
    }

    /// Writes the position as a six-field FEN string.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.board.to_fen(),
            self.side_to_move.to_fen_char(),
            self.castling.to_fen(),
            self.en_passant.to_algebraic(),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    fn refresh(&mut self) {
        self.analysis = analyze(
            &self.board,
            self.side_to_move,
            self.castling,
            self.en_passant,
        );
        if self.halfmove_clock_exceeded() || self.dead_position_ends_game() {
            self.analysis.clear_moves();
        }
    }

    fn halfmove_clock_exceeded(&self) -> bool {
        self.halfmove_clock > self.rules.halfmove_limit
    }

    fn dead_position_ends_game(&self) -> bool {
        self.rules.dead_position && self.board.is_dead_position()
    }

    /// Plays `m`, which must be one of [`Game::possible_moves`].
    pub fn apply_move(&mut self, m: Move) {
        self.history.push(Snapshot {
            mov: m,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        });

        self.board.apply_move(&m);
        self.castling = self.castling.after_move(&m);
        self.side_to_move = self.side_to_move.opposite();
        self.en_passant = m.en_passant_target();
        if m.is_pawn_move() || m.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if self.side_to_move == Color::White {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.refresh();
    }

    /// Takes back the last move and re-analyses the restored position.
    pub fn undo_last_move(&mut self) -> Result<Move, GameError> {
        let m = self.undo_last_move_without_analysis()?;
        self.refresh();
        trace!(mov = %m, "undid move");
        Ok(m)
    }

    /// Takes back the last move but leaves the cached analysis stale.
    ///
    /// Only for callers that restore or recompute the analysis themselves,
    /// such as perft.
    pub fn undo_last_move_without_analysis(&mut self) -> Result<Move, GameError> {
        let snapshot = self.history.pop().ok_or(GameError::NothingToUndo)?;
        let m = snapshot.mov;

        self.board.undo_move(&m);
        self.castling = snapshot.castling;
        self.en_passant = snapshot.en_passant;
        self.halfmove_clock = snapshot.halfmove_clock;
        self.fullmove_number = snapshot.fullmove_number;
        self.side_to_move = self.side_to_move.opposite();
        Ok(m)
    }

    /// Finds the legal move written as `<from><to>[promotion letter]`.
    pub fn find_move(&self, algebra: &str) -> Option<Move> {
        self.possible_moves()
            .iter()
            .find(|m| m.to_algebra() == algebra)
            .copied()
    }

    /// Plays the legal move written as `algebra`.
    ///
    /// Leaves the game untouched if no legal move matches.
    pub fn apply_algebra(&mut self, algebra: &str) -> Result<Move, GameError> {
        let Some(m) = self.find_move(algebra) else {
            debug!(algebra, fen = %self.to_fen(), "no matching move");
            return Err(GameError::NoMatchingMove(algebra.to_string()));
        };
        self.apply_move(m);
        if let Some(result) = self.result() {
            debug!(?result, fen = %self.to_fen(), "game over");
        }
        Ok(m)
    }

    /// All legal moves; empty once the game is over.
    #[inline]
    pub fn possible_moves(&self) -> &MoveList {
        self.analysis.moves()
    }

    /// Analysis of the current position.
    #[inline]
    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    #[inline]
    pub fn is_check(&self) -> bool {
        self.analysis.is_check()
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.possible_moves().is_empty()
    }

    #[inline]
    pub fn is_check_mate(&self) -> bool {
        self.is_check() && self.is_game_over()
    }

    /// 1 if white has won, -1 if black has won, 0 otherwise.
    pub fn winner(&self) -> i8 {
        self.result().map_or(0, GameResult::score)
    }

    /// How the game ended, or `None` while it is still going.
    pub fn result(&self) -> Option<GameResult> {
        if !self.is_game_over() {
            return None;
        }
        let result = if self.is_check() {
            GameResult::Checkmate {
                winner: self.side_to_move.opposite(),
            }
        } else if self.halfmove_clock_exceeded() {
            GameResult::Draw(DrawReason::HalfmoveLimit)
        } else if self.dead_position_ends_game() {
            GameResult::Draw(DrawReason::DeadPosition)
        } else {
            GameResult::Draw(DrawReason::Stalemate)
        };
        Some(result)
    }

    /// Squares attacked by the opponent of the side to move.
    #[inline]
    pub fn threatened_squares(&self) -> Bitboard {
        self.analysis.threatened()
    }

    /// Squares a non-king piece of the side to move may land on.
    #[inline]
    pub fn movable_squares(&self) -> Bitboard {
        self.analysis.movable()
    }

    /// Pin rays on `axis`, or all of them for `None`.
    pub fn pin_squares(&self, axis: Option<PinAxis>) -> Bitboard {
        match axis {
            Some(axis) => self.analysis.pin_on(axis),
            None => self.analysis.pins(),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn en_passant_target(&self) -> Bitboard {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Number of moves that can be taken back.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub(crate) fn take_analysis(&mut self) -> Analysis {
        std::mem::take(&mut self.analysis)
    }

    pub(crate) fn restore_analysis(&mut self, analysis: Analysis) {
        self.analysis = analysis;
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        writeln!(f, "Turn: {}", self.side_to_move)?;
        writeln!(f, "Castling: {}", self.castling)?;
        writeln!(f, "En passant: {}", self.en_passant.to_algebraic())?;
        write!(
            f,
            "Halfmove clock: {}, fullmove number: {}",
            self.halfmove_clock, self.fullmove_number
        )?;
        if self.is_check() {
            write!(f, "\nCheck")?;
        }
        match self.result() {
            Some(GameResult::Checkmate { winner }) => write!(f, "\nCheckmate, {} wins", winner),
            Some(GameResult::Draw(reason)) => write!(f, "\nDraw: {:?}", reason),
            None => Ok(()),
        }
    }
}
