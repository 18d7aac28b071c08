//! Storage collaborator for the chess engine.
//!
//! The engine only ever hands over and receives [`GameRecord`]s; where they
//! live is up to the [`GameStore`] implementation. Failures never escape the
//! trait: they are logged and reported as `false`/`None`/defaults, and the
//! caller decides whether to retry.

mod catalog;
mod error;
mod json_store;
mod memory;
mod stats;

pub use catalog::SavedGame;
pub use error::*;
pub use json_store::*;
pub use memory::*;
pub use stats::*;

use chess_core::GameRecord;

/// Keyed storage for one "current game" slot and a catalogue of named saves.
pub trait GameStore {
    /// Overwrite the current-game slot.
    fn save_current(&mut self, record: &GameRecord) -> bool;

    fn load_current(&self) -> Option<GameRecord>;

    fn clear_current(&mut self) -> bool;

    /// Add a named save and return its id. `None` picks a dated default name.
    fn save_game(&mut self, name: Option<&str>, record: &GameRecord) -> Option<String>;

    /// Saved games, most recently played first.
    fn list_saved(&self) -> Vec<SavedGame>;

    /// Fetch a saved game and mark it as just played.
    fn load_saved(&mut self, id: &str) -> Option<GameRecord>;

    fn delete_saved(&mut self, id: &str) -> bool;

    fn load_statistics(&self) -> Statistics;

    fn save_statistics(&mut self, stats: &Statistics) -> bool;

    /// Probe whether the backing storage accepts writes right now.
    fn is_available(&self) -> bool;
}
