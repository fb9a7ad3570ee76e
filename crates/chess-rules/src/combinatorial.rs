//! The contract a search framework drives a game through.

use crate::movegen::MoveList;
use crate::{Game, GameError};
use chess_core::Move;

/// A two-player, perfect-information game that can be searched by playing
/// moves and taking them back.
///
/// # Example
///
/// ```
/// use chess_rules::{CombinatorialGame, Game};
///
/// fn count_replies<G: CombinatorialGame>(game: &mut G) -> usize {
///     let moves: Vec<G::Move> = game.possible_moves().to_vec();
///     let mut total = 0;
///     for m in moves {
///         game.apply_move(m);
///         total += game.possible_moves().len();
///         game.undo_last_move().ok();
///     }
///     total
/// }
///
/// assert_eq!(count_replies(&mut Game::standard()), 400);
/// ```
pub trait CombinatorialGame {
    type Move: Copy;
    type Error;

    /// Legal moves for the side to move; empty once the game is over.
    fn possible_moves(&self) -> &[Self::Move];

    fn apply_move(&mut self, m: Self::Move);

    fn undo_last_move(&mut self) -> Result<Self::Move, Self::Error>;

    fn is_game_over(&self) -> bool;

    fn is_check_mate(&self) -> bool;

    /// 1 if the first player has won, -1 if the second has, 0 otherwise.
    fn winner(&self) -> i8;

    fn is_check(&self) -> bool;
}

impl CombinatorialGame for Game {
    type Move = Move;
    type Error = GameError;

    fn possible_moves(&self) -> &[Move] {
        MoveList::as_slice(Game::possible_moves(self))
    }

    fn apply_move(&mut self, m: Move) {
        Game::apply_move(self, m);
    }

    fn undo_last_move(&mut self) -> Result<Move, GameError> {
        Game::undo_last_move(self)
    }

    fn is_game_over(&self) -> bool {
        Game::is_game_over(self)
    }

    fn is_check_mate(&self) -> bool {
        Game::is_check_mate(self)
    }

    fn winner(&self) -> i8 {
        Game::winner(self)
    }

    fn is_check(&self) -> bool {
        Game::is_check(self)
    }
}
