//! Game results and draw configuration.

use chess_core::Color;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameResult {
    /// The side to move is checkmated.
    Checkmate { winner: Color },
    /// Draw with a specific reason.
    Draw(DrawReason),
}

impl GameResult {
    /// Score from white's point of view: 1 white wins, -1 black wins, 0 draw.
    pub const fn score(self) -> i8 {
        match self {
            GameResult::Checkmate {
                winner: Color::White,
            } => 1,
            GameResult::Checkmate {
                winner: Color::Black,
            } => -1,
            GameResult::Draw(_) => 0,
        }
    }
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawReason {
    /// No legal moves but not in check.
    Stalemate,
    /// Neither side can ever checkmate.
    DeadPosition,
    /// The halfmove clock went past [`DrawRules::halfmove_limit`].
    HalfmoveLimit,
}

/// Which automatic draws end a game.
///
/// Both draws end the game by emptying the list of legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DrawRules {
    /// The game ends once the halfmove clock exceeds this value.
    pub halfmove_limit: u32,
    /// End the game as soon as the position is dead.
    pub dead_position: bool,
}

impl DrawRules {
    pub const DEFAULT_HALFMOVE_LIMIT: u32 = 49;
}

impl Default for DrawRules {
    fn default() -> Self {
        DrawRules {
            halfmove_limit: Self::DEFAULT_HALFMOVE_LIMIT,
            dead_position: true,
        }
    }
}
