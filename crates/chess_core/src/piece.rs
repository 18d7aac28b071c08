//! Chess pieces and their per-kind movement patterns.

use serde::{Deserialize, Serialize};

use crate::{board::Board, movegen, types::*};

/// A piece on (or captured from) the board.
///
/// `position` mirrors the board slot that owns the piece. It is only ever
/// written through [`Board::place_piece`], which keeps the two in sync.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    #[serde(rename = "type")]
    pub kind: PieceKind,
    pub color: Color,
    pub(crate) position: Square,
    pub(crate) has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, position: Square) -> Self {
        Self {
            kind,
            color,
            position,
            has_moved: false,
        }
    }

    pub fn position(&self) -> Square {
        self.position
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Display name used in move descriptions.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn symbol(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }

    /// Pseudo-legal destinations: movement pattern and occupancy only,
    /// without regard to the safety of the mover's own king.
    pub fn pseudo_destinations(&self, board: &Board) -> Vec<Square> {
        let mut out = Vec::with_capacity(28);
        match self.kind {
            PieceKind::Pawn => movegen::gen_pawn(board, self, &mut out),
            PieceKind::Knight => movegen::gen_leaper(board, self, &movegen::KNIGHT_DELTAS, &mut out),
            PieceKind::King => movegen::gen_leaper(board, self, &movegen::KING_DELTAS, &mut out),
            PieceKind::Rook => movegen::gen_slider(board, self, &movegen::ORTHO_DIRS, &mut out),
            PieceKind::Bishop => movegen::gen_slider(board, self, &movegen::DIAG_DIRS, &mut out),
            PieceKind::Queen => {
                movegen::gen_slider(board, self, &movegen::ORTHO_DIRS, &mut out);
                movegen::gen_slider(board, self, &movegen::DIAG_DIRS, &mut out);
            }
        }
        out
    }
}
