//! Rules engine and game-state machine for two players sharing one device.
//!
//! The board is an 8x8 arena of squares; pieces generate pseudo-legal
//! destinations, the legality filter replays each candidate on a scratch
//! board, and [`GameState`] drives turns, captures, undo and status.
//! Castling, en passant and promotion are not supported.

pub mod board;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod piece;
pub mod record;
pub mod types;

pub use board::*;
pub use game::*;
pub use movegen::{has_any_legal_move, legal_destinations, legal_moves, would_leave_king_in_check};
pub use perft::perft;
pub use piece::*;
pub use record::*;
pub use types::*;
