use super::*;

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).unwrap()
}

fn play(game: &mut GameState, from: &str, to: &str) {
    let (f, t) = (sq(from), sq(to));
    assert!(game.move_piece(f.row, f.col, t.row, t.col), "{from}{to} should be legal");
}

fn sample_game() -> GameState {
    let mut game = GameState::new(Color::Black, "Ana", "Luis");
    play(&mut game, "e2", "e4");
    play(&mut game, "d7", "d5");
    play(&mut game, "e4", "d5");
    game
}

#[test]
fn test_record_shape() {
    let record = sample_game().to_record();
    assert_eq!(record.board.len(), 8);
    assert!(record.board.iter().all(|r| r.len() == 8));
    assert_eq!(record.game_history.len(), record.undo_stack.len());
    assert_eq!(record.current_turn, Color::Black);
    assert_eq!(record.captured_pieces.black.len(), 1);
    assert!(record.saved_at.is_some());

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["player1Color"], "black");
    assert_eq!(json["board"][0][0]["piece"]["type"], "rook");
    assert_eq!(json["board"][0][0]["piece"]["hasMoved"], false);
    assert_eq!(json["board"][4][4]["piece"], serde_json::Value::Null);
    assert_eq!(json["gameHistory"][0]["move"], "Pawn e2e4");
    assert_eq!(json["gameHistory"][0]["player"], "white");
    assert_eq!(json["gameHistory"][0]["playerName"], "Luis");
    assert_eq!(json["capturedPieces"]["black"][0]["type"], "pawn");
}

#[test]
fn test_record_round_trip_through_json() {
    let game = sample_game();
    let json = serde_json::to_string(&game.to_record()).unwrap();
    let record: GameRecord = serde_json::from_str(&json).unwrap();
    let restored = GameState::from_record(record).unwrap();
    assert_eq!(restored, game);
}

#[test]
fn test_stored_positions_are_ignored() {
    let mut record = sample_game().to_record();
    if let Some(pc) = record.board[7][4].piece.as_mut() {
        pc.position = Square { row: 3, col: 3 };
    }
    let restored = GameState::from_record(record).unwrap();
    let king = restored.board().piece_at(sq("e1")).unwrap();
    assert_eq!(king.kind, PieceKind::King);
    assert_eq!(king.position(), sq("e1"));
}

#[test]
fn test_missing_undo_stack_is_rebuilt() {
    let game = sample_game();
    let mut record = game.to_record();
    record.undo_stack.clear();
    let mut restored = GameState::from_record(record).unwrap();
    assert_eq!(restored.undo_depth(), 3);
    assert!(restored.undo_move());
    assert!(restored.board().piece_at(sq("d5")).unwrap().color == Color::Black);
    assert!(restored.captured_pieces().black.is_empty());
}

#[test]
fn test_invalid_records_are_rejected() {
    let mut record = sample_game().to_record();
    record.board.pop();
    assert_eq!(
        GameState::from_record(record),
        Err(RecordError::BoardRows { found: 7 })
    );

    let mut record = sample_game().to_record();
    record.board[2].push(SquareRecord::default());
    assert_eq!(
        GameState::from_record(record),
        Err(RecordError::BoardCols { row: 2, found: 9 })
    );

    let mut record = sample_game().to_record();
    record.undo_stack.pop();
    assert_eq!(
        GameState::from_record(record),
        Err(RecordError::UndoStackMismatch {
            history: 3,
            undo: 2
        })
    );
}

#[test]
fn test_off_board_undo_square_is_rejected() {
    let mut record = sample_game().to_record();
    record.undo_stack[0].from.row = 9;
    assert_eq!(
        GameState::from_record(record),
        Err(RecordError::BadSquare {
            index: 0,
            row: 9,
            col: 4
        })
    );

    // Same check applies when the stack is rebuilt from history.
    let mut record = sample_game().to_record();
    record.undo_stack.clear();
    record.game_history[2].snapshot.to.col = 8;
    assert!(matches!(
        GameState::from_record(record),
        Err(RecordError::BadSquare { index: 2, col: 8, .. })
    ));
}
