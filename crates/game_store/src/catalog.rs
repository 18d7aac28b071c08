use chess_core::GameRecord;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// A named entry in the saved-games catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    pub id: String,
    pub name: String,
    pub state: GameRecord,
    pub created_at: DateTime<Utc>,
    pub last_played: DateTime<Utc>,
}

/// Build a new catalogue entry with an id unique within `existing`.
pub(crate) fn new_entry(existing: &[SavedGame], name: Option<&str>, record: &GameRecord) -> SavedGame {
    let now = Utc::now();
    let mut id = now.timestamp_millis();
    while existing.iter().any(|g| g.id == id.to_string()) {
        id += 1;
    }

    let name = match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => format!("Game {}", Local::now().format("%Y-%m-%d %H:%M:%S")),
    };

    SavedGame {
        id: id.to_string(),
        name,
        state: record.clone(),
        created_at: now,
        last_played: now,
    }
}

pub(crate) fn most_recent_first(games: &mut [SavedGame]) {
    games.sort_by(|a, b| b.last_played.cmp(&a.last_played));
}

/// Bump `last_played` on the entry with `id` and return its state.
pub(crate) fn touch(games: &mut [SavedGame], id: &str) -> Option<GameRecord> {
    let game = games.iter_mut().find(|g| g.id == id)?;
    game.last_played = Utc::now();
    Some(game.state.clone())
}
