use crate::game::GameState;

/// Leaf count of the legal move tree to `depth`, played through the game's
/// own move/undo path. `game` is left as it was.
pub fn perft(game: &mut GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0u64;
    for (from, to) in game.all_legal_moves() {
        if !game.move_piece(from.row, from.col, to.row, to.col) {
            continue;
        }
        nodes += perft(game, depth - 1);
        game.undo_move();
    }
    nodes
}
