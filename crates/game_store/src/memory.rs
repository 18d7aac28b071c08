use chess_core::GameRecord;

use crate::{
    catalog::{self, SavedGame},
    stats::Statistics,
    GameStore,
};

/// In-process store. Used in tests and as the fallback when no data
/// directory can be opened; nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    current: Option<GameRecord>,
    saved: Vec<SavedGame>,
    stats: Statistics,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStore for MemoryStore {
    fn save_current(&mut self, record: &GameRecord) -> bool {
        self.current = Some(record.clone());
        true
    }

    fn load_current(&self) -> Option<GameRecord> {
        self.current.clone()
    }

    fn clear_current(&mut self) -> bool {
        self.current = None;
        true
    }

    fn save_game(&mut self, name: Option<&str>, record: &GameRecord) -> Option<String> {
        let entry = catalog::new_entry(&self.saved, name, record);
        let id = entry.id.clone();
        self.saved.push(entry);
        Some(id)
    }

    fn list_saved(&self) -> Vec<SavedGame> {
        let mut games = self.saved.clone();
        catalog::most_recent_first(&mut games);
        games
    }

    fn load_saved(&mut self, id: &str) -> Option<GameRecord> {
        catalog::touch(&mut self.saved, id)
    }

    fn delete_saved(&mut self, id: &str) -> bool {
        self.saved.retain(|g| g.id != id);
        true
    }

    fn load_statistics(&self) -> Statistics {
        self.stats.clone()
    }

    fn save_statistics(&mut self, stats: &Statistics) -> bool {
        self.stats = stats.clone();
        true
    }

    fn is_available(&self) -> bool {
        true
    }
}
