//! End-to-end game flows driven through the public `GameState` API.

use chess_core::{Board, Color, GameRecord, GameState, GameStatus, PieceKind, Square};

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).unwrap()
}

fn play(game: &mut GameState, from: &str, to: &str) -> bool {
    let (f, t) = (sq(from), sq(to));
    game.move_piece(f.row, f.col, t.row, t.col)
}

#[test]
fn test_opening_pawn_push() {
    let mut game = GameState::new(Color::White, "Ana", "Luis");
    assert!(game.move_piece(6, 4, 4, 4));
    assert_eq!(game.current_turn(), Color::Black);
    assert_eq!(game.history().len(), 1);
    let pawn = game.board().piece_at(sq("e4")).unwrap();
    assert_eq!(pawn.kind, PieceKind::Pawn);
    assert_eq!(pawn.position(), sq("e4"));
}

#[test]
fn test_selecting_empty_square_keeps_turn() {
    let mut game = GameState::new(Color::White, "Ana", "Luis");
    assert!(!game.select_piece(4, 4));
    assert_eq!(game.current_turn(), Color::White);
    assert!(game.selected().is_none());
}

#[test]
fn test_black_cannot_move_first() {
    let mut game = GameState::new(Color::Black, "Ana", "Luis");
    assert!(!game.select_piece(1, 4));
    assert!(!play(&mut game, "e7", "e5"));
    assert_eq!(game.current_turn(), Color::White);
}

#[test]
fn test_double_advance_never_offered_twice() {
    let mut game = GameState::new(Color::White, "Ana", "Luis");
    assert!(play(&mut game, "a2", "a3"));
    assert!(play(&mut game, "h7", "h6"));
    assert!(game.select_piece(5, 0));
    assert_eq!(game.legal_moves(), &[sq("a4")]);
}

#[test]
fn test_fools_mate() {
    let mut game = GameState::new(Color::White, "Ana", "Luis");
    assert!(play(&mut game, "f2", "f3"));
    assert!(play(&mut game, "e7", "e5"));
    assert!(play(&mut game, "g2", "g4"));
    assert_eq!(game.game_status(), GameStatus::Ongoing);
    assert!(play(&mut game, "d8", "h4"));

    let status = game.game_status();
    assert_eq!(status.kind(), "checkmate");
    assert_eq!(status.winner(), Some(Color::Black));
    assert!(game.is_checkmate(Color::White));
    assert!(!game.is_stalemate(Color::White));
    assert_eq!(game.history().last().unwrap().description, "Queen d8h4");

    let json = serde_json::to_value(status).unwrap();
    assert_eq!(json["status"], "checkmate");
    assert_eq!(json["winner"], "black");
}

#[test]
fn test_undo_out_of_checkmate() {
    let mut game = GameState::new(Color::White, "Ana", "Luis");
    for (f, t) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        assert!(play(&mut game, f, t));
    }
    assert!(game.undo_move());
    assert_eq!(game.current_turn(), Color::Black);
    assert_eq!(game.game_status(), GameStatus::Ongoing);
    assert_eq!(game.history().len(), 3);
    assert_eq!(game.undo_depth(), 3);
}

#[test]
fn test_stalemate_scenario() {
    // Black king a8, white queen b6, white king c7; black to move
    let board = Board::from_fen_placement("k7/2K5/1Q6/8/8/8/8/8").unwrap();
    let mut game = GameState::with_board(Color::White, "Ana", "Luis", board);
    game.set_turn(Color::Black);

    assert!(!game.is_in_check(Color::Black));
    assert!(game.is_stalemate(Color::Black));
    assert!(!game.is_checkmate(Color::Black));
    let status = game.game_status();
    assert_eq!(status, GameStatus::Stalemate);
    assert_eq!(status.kind(), "stalemate");
    assert_eq!(status.winner(), None);
}

#[test]
fn test_move_then_undo_restores_everything() {
    let mut game = GameState::new(Color::White, "Ana", "Luis");
    for (f, t) in [("e2", "e4"), ("d7", "d5")] {
        assert!(play(&mut game, f, t));
    }
    let before = game.clone();
    assert!(play(&mut game, "e4", "d5"));
    assert!(game.undo_move());
    assert_eq!(game, before);
    assert_eq!(game.history(), before.history());
    assert_eq!(game.captured_pieces(), before.captured_pieces());
}

#[test]
fn test_save_and_reconstruct() {
    let mut game = GameState::new(Color::Black, "Ana", "Luis");
    for (f, t) in [("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6")] {
        assert!(play(&mut game, f, t));
    }

    let json = serde_json::to_string_pretty(&game.to_record()).unwrap();
    let record: GameRecord = serde_json::from_str(&json).unwrap();
    let mut restored = GameState::from_record(record).unwrap();

    assert_eq!(restored.board(), game.board());
    assert_eq!(restored.current_turn(), game.current_turn());
    assert_eq!(restored.history(), game.history());
    assert_eq!(restored.player_name(Color::White), "Luis");

    // Both continue identically, including undo after the reload.
    assert!(play(&mut game, "f3", "e5"));
    assert!(play(&mut restored, "f3", "e5"));
    assert_eq!(restored.board(), game.board());
    assert_eq!(restored.captured_pieces(), game.captured_pieces());
    for _ in 0..5 {
        assert!(game.undo_move());
        assert!(restored.undo_move());
        assert_eq!(restored.board(), game.board());
    }
    assert_eq!(restored.board(), &Board::startpos());
    assert!(!restored.undo_move());
}
