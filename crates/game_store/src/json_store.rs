//! Directory of JSON files: one per storage key.

use std::fs;
use std::path::{Path, PathBuf};

use chess_core::GameRecord;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use crate::{
    catalog::{self, SavedGame},
    error::{logged, StoreError, StoreResult},
    stats::Statistics,
    GameStore,
};

pub const CURRENT_GAME_FILE: &str = "current_game.json";
pub const SAVED_GAMES_FILE: &str = "saved_games.json";
pub const STATISTICS_FILE: &str = "statistics.json";
const PROBE_FILE: &str = ".storage_probe";

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = dir.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;
        debug!(root = %root.display(), "opened game store");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    /// `Ok(None)` when the file does not exist yet.
    fn read_json<T: DeserializeOwned>(&self, file: &str) -> StoreResult<Option<T>> {
        let path = self.path(file);
        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| StoreError::Json { path, source })
    }

    /// Write through a temporary file so a crash never leaves half a record.
    fn write_json<T: Serialize>(&self, file: &str, value: &T) -> StoreResult<()> {
        let path = self.path(file);
        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path, source })
    }

    fn remove(&self, file: &str) -> StoreResult<()> {
        let path = self.path(file);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn saved_games(&self) -> StoreResult<Vec<SavedGame>> {
        Ok(self.read_json(SAVED_GAMES_FILE)?.unwrap_or_default())
    }

    fn try_save_game(&self, name: Option<&str>, record: &GameRecord) -> StoreResult<String> {
        let mut games = self.saved_games()?;
        let entry = catalog::new_entry(&games, name, record);
        let id = entry.id.clone();
        info!(id = %id, name = %entry.name, "saving game");
        games.push(entry);
        self.write_json(SAVED_GAMES_FILE, &games)?;
        Ok(id)
    }

    fn try_load_saved(&self, id: &str) -> StoreResult<GameRecord> {
        let mut games = self.saved_games()?;
        let record =
            catalog::touch(&mut games, id).ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.write_json(SAVED_GAMES_FILE, &games)?;
        Ok(record)
    }

    fn try_delete_saved(&self, id: &str) -> StoreResult<()> {
        let mut games = self.saved_games()?;
        games.retain(|g| g.id != id);
        self.write_json(SAVED_GAMES_FILE, &games)
    }

    fn probe(&self) -> StoreResult<()> {
        let path = self.path(PROBE_FILE);
        fs::write(&path, b"probe").map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        fs::remove_file(&path).map_err(|source| StoreError::Io { path, source })
    }
}

impl GameStore for JsonFileStore {
    fn save_current(&mut self, record: &GameRecord) -> bool {
        logged(
            "saving the current game",
            self.write_json(CURRENT_GAME_FILE, record),
        )
        .is_some()
    }

    fn load_current(&self) -> Option<GameRecord> {
        logged("loading the current game", self.read_json(CURRENT_GAME_FILE)).flatten()
    }

    fn clear_current(&mut self) -> bool {
        logged("clearing the current game", self.remove(CURRENT_GAME_FILE)).is_some()
    }

    fn save_game(&mut self, name: Option<&str>, record: &GameRecord) -> Option<String> {
        logged("saving a game", self.try_save_game(name, record))
    }

    fn list_saved(&self) -> Vec<SavedGame> {
        let mut games = logged("listing saved games", self.saved_games()).unwrap_or_default();
        catalog::most_recent_first(&mut games);
        games
    }

    fn load_saved(&mut self, id: &str) -> Option<GameRecord> {
        logged("loading a saved game", self.try_load_saved(id))
    }

    fn delete_saved(&mut self, id: &str) -> bool {
        logged("deleting a saved game", self.try_delete_saved(id)).is_some()
    }

    fn load_statistics(&self) -> Statistics {
        logged("loading statistics", self.read_json(STATISTICS_FILE))
            .flatten()
            .unwrap_or_default()
    }

    fn save_statistics(&mut self, stats: &Statistics) -> bool {
        logged("saving statistics", self.write_json(STATISTICS_FILE, stats)).is_some()
    }

    fn is_available(&self) -> bool {
        logged("probing storage", self.probe()).is_some()
    }
}

#[cfg(test)]
#[path = "json_store_tests.rs"]
mod tests;
