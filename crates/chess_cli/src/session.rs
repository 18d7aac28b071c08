//! One game session: the engine, its store and the command dispatcher.

use std::fmt::Write as _;

use chess_core::{Color, GameRecord, GameState, Square};
use game_store::GameStore;
use tracing::{info, warn};

use crate::command::{self, Command, HELP};
use crate::config::Settings;

pub struct Session {
    game: GameState,
    store: Box<dyn GameStore>,
    settings: Settings,
    /// Set once a finished game has been counted in the statistics.
    result_recorded: bool,
}

impl Session {
    /// Resume the stored current game when it belongs to the same players,
    /// otherwise discard it and start fresh.
    pub fn start(settings: Settings, mut store: Box<dyn GameStore>) -> Self {
        let fresh = || {
            GameState::new(
                settings.player1_color,
                &settings.player1_name,
                &settings.player2_name,
            )
        };

        let game = match store.load_current() {
            Some(rec) if settings.resume && same_players(&rec, &settings) => {
                match GameState::from_record(rec) {
                    Ok(g) => {
                        info!(moves = g.history().len(), "resumed current game");
                        g
                    }
                    Err(e) => {
                        warn!(error = %e, "stored game is unusable, starting a new one");
                        fresh()
                    }
                }
            }
            Some(_) => {
                store.clear_current();
                fresh()
            }
            None => fresh(),
        };

        let result_recorded = game.game_status().is_over();
        Self {
            game,
            store,
            settings,
            result_recorded,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Handle one input line. `None` means the session should end.
    pub fn handle(&mut self, line: &str) -> Option<String> {
        let cmd = match command::parse(line) {
            Ok(c) => c,
            Err(command::CommandError::Empty) => return Some(String::new()),
            Err(e) => return Some(format!("error: {e}")),
        };

        let out = match cmd {
            Command::Quit => return None,
            Command::Help => HELP.to_string(),
            Command::Board => self.render(),
            Command::Status => self.status_line(),
            Command::Select(sq) => self.select(sq),
            Command::Moves(sq) => self.moves(sq),
            Command::Move(from, to) => self.play(from, to),
            Command::Undo => self.undo(),
            Command::History => self.history(),
            Command::Captured => self.captured(),
            Command::Save(name) => self.save(name.as_deref()),
            Command::List => self.list(),
            Command::Load(id) => self.load(&id),
            Command::Delete(id) => {
                if self.store.delete_saved(&id) {
                    format!("deleted {id}")
                } else {
                    "error: could not delete the game".to_string()
                }
            }
            Command::New => self.new_game(),
            Command::Stats => self.stats(),
        };
        Some(out)
    }

    pub fn render(&self) -> String {
        format!("{}\n{}", self.game.board(), self.status_line())
    }

    fn status_line(&self) -> String {
        let turn = self.game.current_turn();
        let mut line = format!("{turn} to move ({})", self.game.player_name(turn));
        if let Some(msg) = self.game.game_status().message() {
            line.push_str(" | ");
            line.push_str(&msg);
        }
        line
    }

    fn select(&mut self, sq: Square) -> String {
        if !self.game.select_piece(sq.row, sq.col) {
            return format!("cannot select {sq}");
        }
        let moves = self.game.legal_moves();
        format!("{sq}: {}", list_squares(moves))
    }

    fn moves(&self, sq: Option<Square>) -> String {
        match sq.or_else(|| self.game.selected().map(|s| s.square)) {
            Some(sq) => format!("{sq}: {}", list_squares(&self.game.legal_moves_for(sq))),
            None => {
                let all: Vec<String> = self
                    .game
                    .all_legal_moves()
                    .into_iter()
                    .map(|(f, t)| format!("{f}{t}"))
                    .collect();
                all.join(" ")
            }
        }
    }

    fn play(&mut self, from: Square, to: Square) -> String {
        if self.game.game_status().is_over() {
            return "the game is over: undo or start a new one".to_string();
        }
        if !self.game.move_piece(from.row, from.col, to.row, to.col) {
            return format!("illegal move {from}{to}");
        }
        self.autosave();

        let status = self.game.game_status();
        if status.is_over() && !self.result_recorded {
            let mut stats = self.store.load_statistics();
            if stats.record_result(&status, self.game.history().len()) {
                self.store.save_statistics(&stats);
            }
            self.result_recorded = true;
        }

        let played = self
            .game
            .history()
            .last()
            .map(|r| r.description.clone())
            .unwrap_or_default();
        format!("{played}\n{}", self.render())
    }

    fn undo(&mut self) -> String {
        if !self.game.undo_move() {
            return "nothing to undo".to_string();
        }
        self.autosave();
        self.render()
    }

    fn history(&self) -> String {
        let mut out = String::new();
        for (i, rec) in self.game.history().iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3}. [{}] {} ({}): {}",
                i + 1,
                rec.timestamp,
                rec.color,
                rec.player_name,
                rec.description
            );
        }
        if out.is_empty() {
            out.push_str("no moves yet");
        }
        out.trim_end().to_string()
    }

    fn captured(&self) -> String {
        let cap = self.game.captured_pieces();
        let symbols = |c: Color| cap.of(c).iter().map(|p| p.symbol()).collect::<String>();
        format!(
            "white pieces lost: {}\nblack pieces lost: {}",
            symbols(Color::White),
            symbols(Color::Black)
        )
    }

    fn save(&mut self, name: Option<&str>) -> String {
        match self.store.save_game(name, &self.game.to_record()) {
            Some(id) => format!("saved as {id}"),
            None => "error: could not save the game".to_string(),
        }
    }

    fn list(&self) -> String {
        let games = self.store.list_saved();
        if games.is_empty() {
            return "no saved games".to_string();
        }
        games
            .iter()
            .map(|g| {
                format!(
                    "{}  {}  ({} vs {}, {} moves, last played {})",
                    g.id,
                    g.name,
                    g.state.player1_name,
                    g.state.player2_name,
                    g.state.game_history.len(),
                    g.last_played.format("%Y-%m-%d %H:%M")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn load(&mut self, id: &str) -> String {
        let Some(rec) = self.store.load_saved(id) else {
            return format!("error: no saved game {id}");
        };
        match GameState::from_record(rec) {
            Ok(game) => {
                info!(id, "loaded saved game");
                self.game = game;
                self.result_recorded = self.game.game_status().is_over();
                self.autosave();
                self.render()
            }
            Err(e) => format!("error: saved game {id} is damaged: {e}"),
        }
    }

    fn new_game(&mut self) -> String {
        self.game = GameState::new(
            self.game.player1_color(),
            self.game.player1_name(),
            self.game.player2_name(),
        );
        self.result_recorded = false;
        self.store.clear_current();
        self.autosave();
        self.render()
    }

    fn stats(&self) -> String {
        let s = self.store.load_statistics();
        format!(
            "games: {}  white wins: {} ({:.0}%)  black wins: {} ({:.0}%)  draws: {}  average moves: {:.1}",
            s.total_games,
            s.wins.white,
            s.win_rate(Color::White) * 100.0,
            s.wins.black,
            s.win_rate(Color::Black) * 100.0,
            s.draws,
            s.average_moves
        )
    }

    fn autosave(&mut self) {
        if self.settings.autosave && !self.store.save_current(&self.game.to_record()) {
            warn!("autosave failed");
        }
    }
}

fn same_players(rec: &GameRecord, settings: &Settings) -> bool {
    rec.player1_color == settings.player1_color
        && rec.player1_name == settings.player1_name
        && rec.player2_name == settings.player2_name
}

fn list_squares(squares: &[Square]) -> String {
    if squares.is_empty() {
        return "no legal moves".to_string();
    }
    let mut sorted = squares.to_vec();
    sorted.sort_by_key(|s| (s.col, std::cmp::Reverse(s.row)));
    sorted
        .iter()
        .map(|s| s.to_algebraic())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
