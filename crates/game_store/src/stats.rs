//! Results tally across finished games.

use chess_core::{Color, GameStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wins {
    pub white: u32,
    pub black: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_games: u32,
    pub wins: Wins,
    pub draws: u32,
    /// Mean number of half-moves per finished game
    pub average_moves: f64,
}

impl Statistics {
    /// Fold a finished game into the tally. Returns false (and changes
    /// nothing) when `status` is not a terminal state.
    pub fn record_result(&mut self, status: &GameStatus, moves: usize) -> bool {
        match status {
            GameStatus::Checkmate { winner } => match winner {
                Color::White => self.wins.white += 1,
                Color::Black => self.wins.black += 1,
            },
            GameStatus::Stalemate => self.draws += 1,
            GameStatus::Ongoing | GameStatus::Check { .. } => return false,
        }

        let played = self.total_games as f64;
        self.total_games += 1;
        self.average_moves = (self.average_moves * played + moves as f64) / self.total_games as f64;
        true
    }

    pub fn win_rate(&self, c: Color) -> f64 {
        if self.total_games == 0 {
            return 0.0;
        }
        let wins = match c {
            Color::White => self.wins.white,
            Color::Black => self.wins.black,
        };
        wins as f64 / self.total_games as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_results() {
        let mut stats = Statistics::default();
        assert!(stats.record_result(
            &GameStatus::Checkmate {
                winner: Color::Black
            },
            4
        ));
        assert!(stats.record_result(&GameStatus::Stalemate, 10));
        assert_eq!(stats.total_games, 2);
        assert_eq!(stats.wins, Wins { white: 0, black: 1 });
        assert_eq!(stats.draws, 1);
        assert!((stats.average_moves - 7.0).abs() < 1e-9);
        assert!((stats.win_rate(Color::Black) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_unfinished_games_are_ignored() {
        let mut stats = Statistics::default();
        assert!(!stats.record_result(&GameStatus::Ongoing, 3));
        assert!(!stats.record_result(
            &GameStatus::Check {
                in_check: Color::White
            },
            3
        ));
        assert_eq!(stats, Statistics::default());
        assert_eq!(stats.win_rate(Color::White), 0.0);
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(Statistics::default()).unwrap();
        assert_eq!(json["totalGames"], 0);
        assert_eq!(json["wins"]["white"], 0);
        assert_eq!(json["averageMoves"], 0.0);
    }
}
