use crate::{board::Board, piece::Piece, types::*};

pub const ORTHO_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const DIAG_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
pub const KING_DELTAS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub(crate) fn gen_pawn(board: &Board, pc: &Piece, out: &mut Vec<Square>) {
    let from = pc.position();
    let dir = pc.color.pawn_dir();

    // forward 1
    if let Some(to) = from.offset(dir, 0)
        && board.piece_at(to).is_none()
    {
        out.push(to);

        // forward 2 from the home row, both squares empty
        if !pc.has_moved()
            && from.row == pc.color.pawn_home_row()
            && let Some(to2) = from.offset(2 * dir, 0)
            && board.piece_at(to2).is_none()
        {
            out.push(to2);
        }
    }

    // diagonal captures only onto enemy pieces
    for dc in [-1, 1] {
        if let Some(to) = from.offset(dir, dc)
            && let Some(tpc) = board.piece_at(to)
            && tpc.color != pc.color
        {
            out.push(to);
        }
    }
}

/// Knight and king: fixed offsets, blocked only by friendly pieces.
pub(crate) fn gen_leaper(board: &Board, pc: &Piece, deltas: &[(i8, i8)], out: &mut Vec<Square>) {
    let from = pc.position();
    for &(dr, dc) in deltas {
        if let Some(to) = from.offset(dr, dc) {
            match board.piece_at(to) {
                None => out.push(to),
                Some(other) if other.color != pc.color => out.push(to),
                _ => {}
            }
        }
    }
}

pub(crate) fn gen_slider(board: &Board, pc: &Piece, dirs: &[(i8, i8)], out: &mut Vec<Square>) {
    let from = pc.position();
    for &(dr, dc) in dirs {
        let mut cur = from;
        while let Some(to) = cur.offset(dr, dc) {
            match board.piece_at(to) {
                None => out.push(to),
                Some(other) if other.color != pc.color => {
                    out.push(to);
                    break;
                }
                _ => break,
            }
            cur = to;
        }
    }
}

/// Play `from -> to` on a scratch copy of `board` and report whether the
/// mover's king is attacked afterwards. An empty `from` is never unsafe.
pub fn would_leave_king_in_check(board: &Board, from: Square, to: Square) -> bool {
    let Some(mover) = board.piece_at(from) else {
        return false;
    };
    let mut tmp = board.clone();
    tmp.remove_piece(from);
    tmp.place_piece(mover, to);
    tmp.in_check(mover.color)
}

/// Pseudo-legal destinations of the piece on `from` that keep its own king safe.
pub fn legal_destinations(board: &Board, from: Square) -> Vec<Square> {
    let Some(pc) = board.piece_at(from) else {
        return Vec::new();
    };
    let mut out = pc.pseudo_destinations(board);
    out.retain(|&to| !would_leave_king_in_check(board, from, to));
    out
}

/// Every legal `(from, to)` pair for `color`, in board scan order.
pub fn legal_moves(board: &Board, color: Color) -> Vec<(Square, Square)> {
    let mut out = Vec::with_capacity(64);
    for pc in board.pieces_of(color) {
        let from = pc.position();
        for to in legal_destinations(board, from) {
            out.push((from, to));
        }
    }
    out
}

pub fn has_any_legal_move(board: &Board, color: Color) -> bool {
    board
        .pieces_of(color)
        .any(|pc| !legal_destinations(board, pc.position()).is_empty())
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod tests;
