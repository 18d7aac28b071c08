use std::fmt;

use crate::{piece::Piece, types::*};

/// 8x8 arena of squares. Row 0 holds black's back rank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    pub fn startpos() -> Self {
        let mut b = Board::empty();
        for color in [Color::White, Color::Black] {
            for (col, &kind) in PieceKind::BACK_RANK.iter().enumerate() {
                let sq = Square {
                    row: color.back_row(),
                    col: col as u8,
                };
                b.place_piece(Piece::new(kind, color, sq), sq);
            }
            for col in 0..8 {
                let sq = Square {
                    row: color.pawn_home_row(),
                    col,
                };
                b.place_piece(Piece::new(PieceKind::Pawn, color, sq), sq);
            }
        }
        b
    }

    /// Build a board from the piece-placement field of a FEN string
    /// (e.g. `"k7/2K5/1Q6/8/8/8/8/8"`). Pawns standing off their home row
    /// are marked as moved; every other piece is not.
    pub fn from_fen_placement(placement: &str) -> Option<Board> {
        let field = placement.split_whitespace().next()?;
        let ranks: Vec<&str> = field.split('/').collect();
        if ranks.len() != 8 {
            return None;
        }

        let mut b = Board::empty();
        // FEN lists rank 8 first, which is row 0 here.
        for (row, rank_str) in ranks.iter().enumerate() {
            let mut col: u8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    col += d as u8;
                } else {
                    let color = if ch.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = PieceKind::from_fen_char(ch)?;
                    let sq = Square::new(row as u8, col)?;
                    let mut pc = Piece::new(kind, color, sq);
                    pc.has_moved = kind == PieceKind::Pawn && sq.row != color.pawn_home_row();
                    b.place_piece(pc, sq);
                    col += 1;
                }
                if col > 8 {
                    return None;
                }
            }
            if col != 8 {
                return None;
            }
        }
        Some(b)
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.row as usize][sq.col as usize]
    }

    /// The only way a piece enters a square: writes the slot and the
    /// piece's own position together.
    pub fn place_piece(&mut self, mut piece: Piece, sq: Square) {
        piece.position = sq;
        self.squares[sq.row as usize][sq.col as usize] = Some(piece);
    }

    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.row as usize][sq.col as usize].take()
    }

    /// Restore a slot to a previous occupant (or emptiness).
    pub fn set_square(&mut self, sq: Square, pc: Option<Piece>) {
        match pc {
            Some(p) => self.place_piece(p, sq),
            None => {
                self.remove_piece(sq);
            }
        }
    }

    /// Move whatever stands on `from` to `to`, marking it as moved.
    /// Returns the previous occupant of `to`.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let captured = self.remove_piece(to);
        if let Some(mut pc) = self.remove_piece(from) {
            pc.has_moved = true;
            self.place_piece(pc, to);
        }
        captured
    }

    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.squares
    }

    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.squares.iter().flatten().filter_map(|p| *p)
    }

    pub fn pieces_of(&self, c: Color) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |p| p.color == c)
    }

    pub fn king_sq(&self, c: Color) -> Option<Square> {
        self.pieces_of(c)
            .find(|p| p.kind == PieceKind::King)
            .map(|p| p.position)
    }

    /// A king that is not on the board is never in check.
    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    /// True iff some piece of `by` has `target` among its pseudo-legal
    /// destinations on this board.
    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        self.pieces_of(by)
            .any(|pc| pc.pseudo_destinations(self).contains(&target))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, rank) in self.squares.iter().enumerate() {
            write!(f, "{} ", 8 - row)?;
            for sq in rank {
                match sq {
                    Some(p) => write!(f, " {}", p.symbol())?,
                    None => write!(f, " ·")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
