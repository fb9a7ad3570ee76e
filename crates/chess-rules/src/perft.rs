//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree to a fixed depth,
//! which can be compared against published values to validate the move
//! generator. The walk plays and takes back moves on the game itself; the
//! game is left exactly as it was found.

use crate::Game;

/// Counts the leaf nodes at `depth` plies below the current position.
pub fn perft(game: &mut Game, depth: u32) -> u64 {
    match depth {
        0 => 1,
        1 => game.possible_moves().len() as u64,
        _ => {
            let analysis = game.take_analysis();
            let mut nodes = 0;
            for &m in analysis.moves() {
                game.apply_move(m);
                nodes += perft(game, depth - 1);
                let undone = game.undo_last_move_without_analysis();
                debug_assert_eq!(undone, Ok(m));
            }
            game.restore_analysis(analysis);
            nodes
        }
    }
}

/// Perft split by root move, sorted by move notation.
///
/// Useful for finding which move's subtree disagrees with a reference.
pub fn perft_divide(game: &mut Game, depth: u32) -> Vec<(String, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let analysis = game.take_analysis();
    let mut results = Vec::with_capacity(analysis.moves().len());
    for &m in analysis.moves() {
        game.apply_move(m);
        results.push((m.to_algebra(), perft(game, depth - 1)));
        let undone = game.undo_last_move_without_analysis();
        debug_assert_eq!(undone, Ok(m));
    }
    game.restore_analysis(analysis);

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
