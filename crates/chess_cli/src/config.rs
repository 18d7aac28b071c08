//! Settings file (TOML) plus command-line overrides.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chess_core::Color;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "chess.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where saved games, the current game and statistics live
    pub data_dir: PathBuf,
    pub player1_name: String,
    pub player2_name: String,
    pub player1_color: Color,
    /// Write the current-game slot after every change
    pub autosave: bool,
    /// Pick up the current-game slot on start if the players match
    pub resume: bool,
    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".chess_data"),
            player1_name: "Player 1".to_string(),
            player2_name: "Player 2".to_string(),
            player1_color: Color::White,
            autosave: true,
            resume: true,
            log_level: "warn".to_string(),
        }
    }
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid settings")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Explicit config paths must exist; the default one is optional.
    pub fn resolve(args: &CliArgs) -> Result<Self> {
        let mut settings = match &args.config {
            Some(path) => Self::load(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load(default)?
                } else {
                    Self::default()
                }
            }
        };
        args.apply(&mut settings);
        Ok(settings)
    }
}

/// Parsed command-line flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub player1_name: Option<String>,
    pub player2_name: Option<String>,
    pub player1_color: Option<Color>,
    pub help: bool,
}

impl CliArgs {
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut out = CliArgs::default();
        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            if matches!(flag, "--help" | "-h") {
                out.help = true;
                i += 1;
                continue;
            }
            let Some(value) = args.get(i + 1) else {
                bail!("{flag} needs a value");
            };
            match flag {
                "--config" | "-c" => out.config = Some(PathBuf::from(value)),
                "--data-dir" | "-d" => out.data_dir = Some(PathBuf::from(value)),
                "--player1" => out.player1_name = Some(value.clone()),
                "--player2" => out.player2_name = Some(value.clone()),
                "--player1-color" => out.player1_color = Some(parse_color(value)?),
                _ => bail!("unknown option {flag}"),
            }
            i += 2;
        }
        Ok(out)
    }

    fn apply(&self, settings: &mut Settings) {
        if let Some(d) = &self.data_dir {
            settings.data_dir = d.clone();
        }
        if let Some(n) = &self.player1_name {
            settings.player1_name = n.clone();
        }
        if let Some(n) = &self.player2_name {
            settings.player2_name = n.clone();
        }
        if let Some(c) = self.player1_color {
            settings.player1_color = c;
        }
    }
}

fn parse_color(s: &str) -> Result<Color> {
    match s.to_ascii_lowercase().as_str() {
        "white" | "w" => Ok(Color::White),
        "black" | "b" => Ok(Color::Black),
        _ => bail!("expected white or black, got {s}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let s = Settings::from_toml("player1_name = \"Ana\"\nplayer1_color = \"black\"\n").unwrap();
        assert_eq!(s.player1_name, "Ana");
        assert_eq!(s.player1_color, Color::Black);
        assert_eq!(s.player2_name, "Player 2");
        assert!(s.autosave);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(Settings::from_toml("player1_color = \"green\"").is_err());
    }

    #[test]
    fn test_args_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chess.toml");
        std::fs::write(&path, "player1_name = \"Ana\"\nautosave = false\n").unwrap();

        let args = CliArgs::parse(&strings(&[
            "--config",
            path.to_str().unwrap(),
            "--player2",
            "Luis",
            "--player1-color",
            "b",
        ]))
        .unwrap();
        let s = Settings::resolve(&args).unwrap();
        assert_eq!(s.player1_name, "Ana");
        assert_eq!(s.player2_name, "Luis");
        assert_eq!(s.player1_color, Color::Black);
        assert!(!s.autosave);
    }

    #[test]
    fn test_arg_errors() {
        assert!(CliArgs::parse(&strings(&["--data-dir"])).is_err());
        assert!(CliArgs::parse(&strings(&["--bogus", "x"])).is_err());
        assert!(CliArgs::parse(&strings(&["--player1-color", "red"])).is_err());
        assert!(CliArgs::parse(&strings(&["-h"])).unwrap().help);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let args = CliArgs {
            config: Some(PathBuf::from("/definitely/not/here.toml")),
            ..Default::default()
        };
        assert!(Settings::resolve(&args).is_err());
    }
}
