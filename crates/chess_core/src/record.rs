//! Plain-data form of a game, exchanged with the storage layer.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::{
    board::Board,
    game::{CapturedPieces, GameState, MoveRecord, UndoSnapshot},
    piece::Piece,
    types::*,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareRecord {
    pub piece: Option<Piece>,
}

/// Serialized game, as written by a [`GameState`] and read back into one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub player1_color: Color,
    pub player1_name: String,
    pub player2_name: String,
    pub current_turn: Color,
    /// Row-major, row 0 first.
    pub board: Vec<Vec<SquareRecord>>,
    #[serde(default)]
    pub game_history: Vec<MoveRecord>,
    #[serde(default)]
    pub captured_pieces: CapturedPieces,
    #[serde(default)]
    pub undo_stack: Vec<UndoSnapshot>,
    #[serde(default)]
    pub saved_at: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("board has {found} rows, expected 8")]
    BoardRows { found: usize },
    #[error("board row {row} has {found} squares, expected 8")]
    BoardCols { row: usize, found: usize },
    #[error("undo stack holds {undo} entries but history holds {history}")]
    UndoStackMismatch { history: usize, undo: usize },
    #[error("undo entry {index} refers to off-board square ({row}, {col})")]
    BadSquare { index: usize, row: u8, col: u8 },
}

impl GameState {
    pub fn to_record(&self) -> GameRecord {
        let board = self
            .board
            .rows()
            .iter()
            .map(|rank| rank.iter().map(|&piece| SquareRecord { piece }).collect())
            .collect();
        GameRecord {
            player1_color: self.player1_color,
            player1_name: self.player1_name.clone(),
            player2_name: self.player2_name.clone(),
            current_turn: self.current_turn,
            board,
            game_history: self.history.clone(),
            captured_pieces: self.captured.clone(),
            undo_stack: self.undo_stack.clone(),
            saved_at: Some(Utc::now().to_rfc3339()),
        }
    }

    /// Rebuild a game from its record. Pieces are re-placed at their grid
    /// slot; the stored `position` of each piece is not trusted.
    ///
    /// A record with history but no undo stack gets the stack re-derived
    /// from the snapshots embedded in its history, so undo keeps working.
    pub fn from_record(record: GameRecord) -> Result<GameState, RecordError> {
        if record.board.len() != 8 {
            return Err(RecordError::BoardRows {
                found: record.board.len(),
            });
        }

        let mut board = Board::empty();
        for (row, rank) in record.board.iter().enumerate() {
            if rank.len() != 8 {
                return Err(RecordError::BoardCols {
                    row,
                    found: rank.len(),
                });
            }
            for (col, slot) in rank.iter().enumerate() {
                if let Some(pc) = slot.piece {
                    board.place_piece(
                        pc,
                        Square {
                            row: row as u8,
                            col: col as u8,
                        },
                    );
                }
            }
        }

        let history = record.game_history;
        let undo_stack = if record.undo_stack.is_empty() && !history.is_empty() {
            warn!(
                moves = history.len(),
                "record has no undo stack, rebuilding it from history"
            );
            history.iter().map(|r| r.snapshot.clone()).collect()
        } else if record.undo_stack.len() != history.len() {
            return Err(RecordError::UndoStackMismatch {
                history: history.len(),
                undo: record.undo_stack.len(),
            });
        } else {
            record.undo_stack
        };
        for (index, snap) in undo_stack.iter().enumerate() {
            for s in [snap.from, snap.to] {
                if Square::new(s.row, s.col).is_none() {
                    return Err(RecordError::BadSquare {
                        index,
                        row: s.row,
                        col: s.col,
                    });
                }
            }
        }

        let mut game = GameState::with_board(
            record.player1_color,
            &record.player1_name,
            &record.player2_name,
            board,
        );
        game.current_turn = record.current_turn;
        game.captured = record.captured_pieces;
        game.history = history;
        game.undo_stack = undo_stack;
        Ok(game)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
