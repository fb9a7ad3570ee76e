use chess_core::Color;
use chess_rules::{DrawReason, Game, GameError, GameResult};
use proptest::prelude::*;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn load(fen: &str) -> Game {
    Game::from_fen(fen).unwrap()
}

#[test]
fn game_over_positions() {
    let over = [
        "k5qr/8/8/8/8/8/8/7K w k - 0 1",
        "k7/8/8/8/8/8/8/QR5K b - - 0 1",
        "k5r1/8/8/8/8/8/r7/7K w - - 0 1",
        "k7/8/8/3n4/8/8/8/7K w - - 0 1",
    ];
    for fen in over {
        let game = load(fen);
        assert!(game.is_game_over(), "{}", fen);
        assert!(game.possible_moves().is_empty(), "{}", fen);
    }
    assert!(!load("k7/8/8/3n4/8/8/8/3R3K w - - 0 1").is_game_over());
    assert!(!Game::standard().is_game_over());
}

#[test]
fn checkmate_and_winner() {
    let black_wins = load("k5qr/8/8/8/8/8/8/7K w k - 0 1");
    assert!(black_wins.is_check_mate());
    assert_eq!(black_wins.winner(), -1);
    assert_eq!(
        black_wins.result(),
        Some(GameResult::Checkmate { winner: Color::Black })
    );

    let white_wins = load("k7/8/8/8/8/8/8/QR5K b - - 0 1");
    assert!(white_wins.is_check_mate());
    assert_eq!(white_wins.winner(), 1);

    let escapes = load("k6r/8/8/8/8/8/8/7K w k - 0 1");
    assert!(escapes.is_check());
    assert!(!escapes.is_check_mate());
    assert_eq!(escapes.winner(), 0);
}

#[test]
fn draws_have_no_winner() {
    let stalemate = load("k5r1/8/8/8/8/8/r7/7K w - - 0 1");
    assert!(!stalemate.is_check_mate());
    assert_eq!(stalemate.winner(), 0);
    assert_eq!(stalemate.result(), Some(GameResult::Draw(DrawReason::Stalemate)));

    let bare = load("k7/8/8/8/8/8/8/7K w - - 0 1");
    assert!(bare.is_game_over());
    assert_eq!(bare.winner(), 0);
    assert_eq!(bare.result(), Some(GameResult::Draw(DrawReason::DeadPosition)));

    assert_eq!(load("k1r5/8/8/8/8/8/8/3R3K w - - 0 1").winner(), 0);
}

#[test]
fn fools_mate_through_algebra() {
    let mut game = Game::standard();
    for algebra in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        game.apply_algebra(algebra).unwrap();
    }
    assert!(game.is_check_mate());
    assert_eq!(game.winner(), -1);
    assert_eq!(
        game.apply_algebra("e1f2"),
        Err(GameError::NoMatchingMove("e1f2".to_string()))
    );

    for _ in 0..4 {
        game.undo_last_move().unwrap();
    }
    assert_eq!(game.to_fen(), Game::standard().to_fen());
    assert_eq!(game.undo_last_move(), Err(GameError::NothingToUndo));
}

#[test]
fn every_reply_undoes_exactly() {
    let mut game = load(KIWIPETE);
    let moves = game.possible_moves().to_vec();
    for m in moves {
        game.apply_move(m);
        assert!(game.board().is_consistent(), "{}", m.to_algebra());
        let replies = game.possible_moves().to_vec();
        for reply in replies {
            let fen = game.to_fen();
            game.apply_move(reply);
            assert!(game.board().is_consistent());
            assert_eq!(game.undo_last_move(), Ok(reply));
            assert_eq!(game.to_fen(), fen);
        }
        assert_eq!(game.undo_last_move(), Ok(m));
        assert_eq!(game.to_fen(), KIWIPETE);
    }
}

proptest! {
    #[test]
    fn random_playouts_keep_state_consistent(
        choices in prop::collection::vec(any::<prop::sample::Index>(), 1..120)
    ) {
        let mut game = load(KIWIPETE);
        let mut fens = vec![game.to_fen()];
        for choice in &choices {
            if game.is_game_over() {
                break;
            }
            let m = *choice.get(game.possible_moves().as_slice());
            game.apply_move(m);
            prop_assert!(game.board().is_consistent());
            let own = game.board().team(game.side_to_move());
            prop_assert!(!game.movable_squares().intersects(own));
            // The side that just moved can never be left in check.
            let mover = game.side_to_move().opposite();
            let mover_view = chess_rules::analyze(
                game.board(),
                mover,
                game.castling(),
                chess_core::Bitboard::EMPTY,
            );
            prop_assert!(!mover_view.is_check());
            fens.push(game.to_fen());
        }

        while let Some(expected) = fens.pop() {
            prop_assert_eq!(game.to_fen(), expected);
            if fens.is_empty() {
                break;
            }
            prop_assert!(game.undo_last_move().is_ok());
        }
        prop_assert_eq!(game.history_len(), 0);
    }
}
