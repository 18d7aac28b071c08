//! Seeded random playouts checking the engine's invariants move by move.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use chess_core::{Board, Color, GameState};

const GAMES: u64 = 12;
const MAX_PLIES: usize = 80;

#[test]
fn random_playouts_keep_invariants() {
    for seed in 0..GAMES {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = GameState::new(Color::White, "A", "B");

        for _ in 0..MAX_PLIES {
            let moves = game.all_legal_moves();
            let Some(&(from, to)) = moves.choose(&mut rng) else {
                break;
            };
            let mover = game.current_turn();
            let before = game.clone();

            assert!(game.move_piece(from.row, from.col, to.row, to.col));
            assert!(
                !game.is_in_check(mover),
                "seed {seed}: {from}{to} left the {mover} king attacked"
            );
            assert_eq!(game.history().len(), game.undo_depth());
            for pc in game.board().pieces() {
                assert_eq!(game.board().piece_at(pc.position()), Some(pc));
            }

            // Round-trip law, exercised on a fraction of the moves
            if rng.gen_bool(0.25) {
                assert!(game.undo_move());
                assert_eq!(game, before, "seed {seed}: undo of {from}{to} diverged");
                assert!(game.move_piece(from.row, from.col, to.row, to.col));
            }
        }

        while game.undo_move() {
            assert_eq!(game.history().len(), game.undo_depth());
        }
        assert_eq!(game.board(), &Board::startpos());
        assert_eq!(game.current_turn(), Color::White);
        assert!(game.captured_pieces().white.is_empty());
        assert!(game.captured_pieces().black.is_empty());
    }
}
