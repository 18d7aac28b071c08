//! Game-session state machine: turn order, selection, move execution,
//! undo and status derivation.

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{board::Board, movegen, piece::Piece, types::*};

/// Captured pieces, keyed by the color of the piece that was taken.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedPieces {
    pub white: Vec<Piece>,
    pub black: Vec<Piece>,
}

impl CapturedPieces {
    pub fn of(&self, c: Color) -> &[Piece] {
        match c {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn push(&mut self, pc: Piece) {
        match pc.color {
            Color::White => self.white.push(pc),
            Color::Black => self.black.push(pc),
        }
    }
}

/// Everything needed to reverse exactly one move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UndoSnapshot {
    pub from: Square,
    pub to: Square,
    /// The mover as it stood on `from` before the move.
    pub moved: Piece,
    /// Previous occupant of `to`.
    pub captured: Option<Piece>,
    pub turn: Color,
    pub captured_pieces: CapturedPieces,
}

/// One entry of the move log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub id: i64,
    #[serde(rename = "player")]
    pub color: Color,
    pub player_name: String,
    /// e.g. `"Pawn e2e4"`, `"Queen d8xh4"`
    #[serde(rename = "move")]
    pub description: String,
    pub timestamp: String,
    #[serde(rename = "moveState")]
    pub snapshot: UndoSnapshot,
}

/// The currently selected piece and its cached legal destinations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub square: Square,
    pub piece: Piece,
    pub legal_moves: Vec<Square>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GameStatus {
    Ongoing,
    #[serde(rename_all = "camelCase")]
    Check { in_check: Color },
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    pub fn kind(&self) -> &'static str {
        match self {
            GameStatus::Ongoing => "ongoing",
            GameStatus::Check { .. } => "check",
            GameStatus::Checkmate { .. } => "checkmate",
            GameStatus::Stalemate => "stalemate",
        }
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(*winner),
            _ => None,
        }
    }

    /// Checkmate and stalemate end the game.
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }

    pub fn message(&self) -> Option<String> {
        match self {
            GameStatus::Ongoing => None,
            GameStatus::Check { in_check } => {
                Some(format!(
                "Check! The {} king is under attack",
                in_check.to_string().to_lowercase()
            ))
            }
            GameStatus::Checkmate { winner } => Some(format!("Checkmate! {winner} wins")),
            GameStatus::Stalemate => Some("Stalemate! The game is a draw".to_string()),
        }
    }
}

/// Root of a two-player game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub(crate) player1_color: Color,
    pub(crate) player1_name: String,
    pub(crate) player2_name: String,
    pub(crate) board: Board,
    pub(crate) current_turn: Color,
    pub(crate) selected: Option<Selection>,
    pub(crate) captured: CapturedPieces,
    pub(crate) history: Vec<MoveRecord>,
    pub(crate) undo_stack: Vec<UndoSnapshot>,
}

impl GameState {
    /// Fresh game from the standard setup. White always moves first,
    /// whichever color player 1 picked.
    pub fn new(player1_color: Color, player1_name: &str, player2_name: &str) -> Self {
        Self::with_board(player1_color, player1_name, player2_name, Board::startpos())
    }

    /// Start from an arbitrary position with white to move.
    pub fn with_board(
        player1_color: Color,
        player1_name: &str,
        player2_name: &str,
        board: Board,
    ) -> Self {
        Self {
            player1_color,
            player1_name: player1_name.to_string(),
            player2_name: player2_name.to_string(),
            board,
            current_turn: Color::White,
            selected: None,
            captured: CapturedPieces::default(),
            history: Vec::new(),
            undo_stack: Vec::new(),
        }
    }

    /// Hand the move to `c`. Intended for setting up positions.
    pub fn set_turn(&mut self, c: Color) {
        self.current_turn = c;
        self.selected = None;
    }

    pub fn player1_color(&self) -> Color {
        self.player1_color
    }
    pub fn player2_color(&self) -> Color {
        self.player1_color.other()
    }
    pub fn player1_name(&self) -> &str {
        &self.player1_name
    }
    pub fn player2_name(&self) -> &str {
        &self.player2_name
    }

    pub fn player_name(&self, c: Color) -> &str {
        if c == self.player1_color {
            &self.player1_name
        } else {
            &self.player2_name
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn current_turn(&self) -> Color {
        self.current_turn
    }
    pub fn selected(&self) -> Option<&Selection> {
        self.selected.as_ref()
    }
    pub fn legal_moves(&self) -> &[Square] {
        self.selected
            .as_ref()
            .map(|s| s.legal_moves.as_slice())
            .unwrap_or(&[])
    }
    pub fn captured_pieces(&self) -> &CapturedPieces {
        &self.captured
    }
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }
    /// Owned copy of the move log.
    pub fn history_snapshot(&self) -> Vec<MoveRecord> {
        self.history.clone()
    }
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Select the piece on `(row, col)` if it belongs to the side to move.
    /// Anything else clears the selection and returns false.
    pub fn select_piece(&mut self, row: u8, col: u8) -> bool {
        self.selected = None;
        let Some(sq) = Square::new(row, col) else {
            return false;
        };
        let Some(pc) = self.board.piece_at(sq) else {
            return false;
        };
        if pc.color != self.current_turn {
            debug!(square = %sq, "refusing to select an opponent piece");
            return false;
        }
        self.selected = Some(Selection {
            square: sq,
            piece: pc,
            legal_moves: movegen::legal_destinations(&self.board, sq),
        });
        true
    }

    /// Legal destinations of the piece on `sq`, without touching the selection.
    pub fn legal_moves_for(&self, sq: Square) -> Vec<Square> {
        movegen::legal_destinations(&self.board, sq)
    }

    /// All legal `(from, to)` pairs for the side to move.
    pub fn all_legal_moves(&self) -> Vec<(Square, Square)> {
        movegen::legal_moves(&self.board, self.current_turn)
    }

    pub fn would_leave_king_in_check(&self, from: Square, to: Square) -> bool {
        movegen::would_leave_king_in_check(&self.board, from, to)
    }

    pub fn is_square_attacked(&self, row: u8, col: u8, by: Color) -> bool {
        Square::new(row, col).is_some_and(|sq| self.board.is_square_attacked(sq, by))
    }

    pub fn is_in_check(&self, c: Color) -> bool {
        self.board.in_check(c)
    }

    pub fn has_any_legal_move(&self, c: Color) -> bool {
        movegen::has_any_legal_move(&self.board, c)
    }

    pub fn is_checkmate(&self, c: Color) -> bool {
        self.is_in_check(c) && !self.has_any_legal_move(c)
    }

    pub fn is_stalemate(&self, c: Color) -> bool {
        !self.is_in_check(c) && !self.has_any_legal_move(c)
    }

    /// Checkmate is tested before check, since a mated king is also in check.
    pub fn game_status(&self) -> GameStatus {
        if self.is_checkmate(Color::White) {
            return GameStatus::Checkmate {
                winner: Color::Black,
            };
        }
        if self.is_checkmate(Color::Black) {
            return GameStatus::Checkmate {
                winner: Color::White,
            };
        }
        if self.is_stalemate(Color::White) || self.is_stalemate(Color::Black) {
            return GameStatus::Stalemate;
        }
        for c in [Color::White, Color::Black] {
            if self.is_in_check(c) {
                return GameStatus::Check { in_check: c };
            }
        }
        GameStatus::Ongoing
    }

    /// Execute a move for the side to move. The legal set is recomputed
    /// here rather than trusted from an earlier selection.
    pub fn move_piece(&mut self, from_row: u8, from_col: u8, to_row: u8, to_col: u8) -> bool {
        let (Some(from), Some(to)) = (Square::new(from_row, from_col), Square::new(to_row, to_col))
        else {
            return false;
        };
        let Some(mover) = self.board.piece_at(from) else {
            return false;
        };
        if mover.color != self.current_turn {
            return false;
        }
        if !movegen::legal_destinations(&self.board, from).contains(&to) {
            debug!(%from, %to, "rejected illegal move");
            return false;
        }

        let captured = self.board.piece_at(to);
        let snapshot = UndoSnapshot {
            from,
            to,
            moved: mover,
            captured,
            turn: self.current_turn,
            captured_pieces: self.captured.clone(),
        };

        if let Some(cp) = captured {
            self.captured.push(cp);
        }
        self.board.relocate(from, to);

        let description = format!(
            "{} {}{}{}",
            mover.name(),
            from,
            if captured.is_some() { "x" } else { "" },
            to
        );
        let now = Utc::now().timestamp_millis();
        let id = self.history.last().map_or(now, |r| now.max(r.id + 1));
        debug!(id, color = %self.current_turn, move_ = %description, "move played");

        self.undo_stack.push(snapshot.clone());
        self.history.push(MoveRecord {
            id,
            color: self.current_turn,
            player_name: self.player_name(self.current_turn).to_string(),
            description,
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            snapshot,
        });

        self.current_turn = self.current_turn.other();
        self.selected = None;
        true
    }

    /// Take back the last move. Returns false when there is nothing to undo.
    pub fn undo_move(&mut self) -> bool {
        let Some(snap) = self.undo_stack.pop() else {
            return false;
        };
        let record = self.history.pop();

        self.board.set_square(snap.from, Some(snap.moved));
        self.board.set_square(snap.to, snap.captured);
        self.captured = snap.captured_pieces;
        self.current_turn = snap.turn;
        self.selected = None;

        if let Some(r) = record {
            debug!(id = r.id, move_ = %r.description, "move undone");
        }
        true
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod tests;
