//! Battle configuration: defaults, optional TOML file, `APP__*` environment
//! overrides. Changes staged at runtime apply only at round boundaries.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shared::domain::PuzzleVariant;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "cube-duel.toml";

pub const MIN_PLAYER_COUNT: usize = 2;
pub const MAX_PLAYER_COUNT: usize = 4;
pub const BEST_OF_CHOICES: [u32; 4] = [3, 5, 7, 9];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("player_count must be between {MIN_PLAYER_COUNT} and {MAX_PLAYER_COUNT} (got {0})")]
    InvalidPlayerCount(usize),
    #[error("best_of_rounds must be one of 3, 5, 7, or 9 (got {0})")]
    InvalidBestOfRounds(u32),
    #[error("failed to read config file '{path}'")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file '{path}'")]
    Malformed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTheme {
    #[default]
    Default,
    Blue,
    Purple,
    Orange,
    Red,
    Pink,
}

impl ColorTheme {
    /// Accent color as used by the presentation layer.
    pub fn hex(self) -> &'static str {
        match self {
            ColorTheme::Default => "#4CAF50",
            ColorTheme::Blue => "#2196F3",
            ColorTheme::Purple => "#9C27B0",
            ColorTheme::Orange => "#FF9800",
            ColorTheme::Red => "#F44336",
            ColorTheme::Pink => "#E91E63",
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            ColorTheme::Default => "default",
            ColorTheme::Blue => "blue",
            ColorTheme::Purple => "purple",
            ColorTheme::Orange => "orange",
            ColorTheme::Red => "red",
            ColorTheme::Pink => "pink",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized color theme '{0}'")]
pub struct ParseThemeError(pub String);

impl FromStr for ColorTheme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(ColorTheme::Default),
            "blue" => Ok(ColorTheme::Blue),
            "purple" => Ok(ColorTheme::Purple),
            "orange" => Ok(ColorTheme::Orange),
            "red" => Ok(ColorTheme::Red),
            "pink" => Ok(ColorTheme::Pink),
            _ => Err(ParseThemeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub full_black: bool,
    pub non_cuber: bool,
    pub player_count: usize,
    pub color_theme: ColorTheme,
    pub blind_mode: bool,
    pub best_of_mode: bool,
    pub best_of_rounds: u32,
    pub variant: PuzzleVariant,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            full_black: false,
            non_cuber: false,
            player_count: 2,
            color_theme: ColorTheme::Default,
            blind_mode: false,
            best_of_mode: false,
            best_of_rounds: 3,
            variant: PuzzleVariant::ThreeByThree,
        }
    }
}

impl BattleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYER_COUNT..=MAX_PLAYER_COUNT).contains(&self.player_count) {
            return Err(ConfigError::InvalidPlayerCount(self.player_count));
        }
        if !BEST_OF_CHOICES.contains(&self.best_of_rounds) {
            return Err(ConfigError::InvalidBestOfRounds(self.best_of_rounds));
        }
        Ok(())
    }

    /// Round wins needed to take a best-of-N match.
    pub fn required_wins(&self) -> u32 {
        self.best_of_rounds / 2 + 1
    }
}

/// Load the effective configuration: defaults, then the config file, then
/// `APP__*` environment overrides. An explicit `path` must be readable and
/// well-formed; the implicit default file may be absent. A value that fails
/// to parse keeps the prior one.
pub fn load_config(path: Option<&Path>) -> Result<BattleConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let raw = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
                path: path.display().to_string(),
                source,
            })?;
            toml::from_str(&raw).map_err(|source| ConfigError::Malformed {
                path: path.display().to_string(),
                source,
            })?
        }
        None => match fs::read_to_string(DEFAULT_CONFIG_FILE) {
            Ok(raw) => toml::from_str(&raw).map_err(|source| ConfigError::Malformed {
                path: DEFAULT_CONFIG_FILE.to_string(),
                source,
            })?,
            Err(_) => BattleConfig::default(),
        },
    };

    apply_env_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

fn apply_env_overrides(config: &mut BattleConfig) {
    if let Some(v) = env_bool("APP__FULL_BLACK") {
        config.full_black = v;
    }
    if let Some(v) = env_bool("APP__NON_CUBER") {
        config.non_cuber = v;
    }
    if let Ok(v) = std::env::var("APP__PLAYER_COUNT") {
        if let Ok(parsed) = v.parse::<usize>() {
            config.player_count = parsed;
        }
    }
    if let Ok(v) = std::env::var("APP__COLOR_THEME") {
        if let Ok(parsed) = v.parse::<ColorTheme>() {
            config.color_theme = parsed;
        }
    }
    if let Some(v) = env_bool("APP__BLIND_MODE") {
        config.blind_mode = v;
    }
    if let Some(v) = env_bool("APP__BEST_OF_MODE") {
        config.best_of_mode = v;
    }
    if let Ok(v) = std::env::var("APP__BEST_OF_ROUNDS") {
        if let Ok(parsed) = v.parse::<u32>() {
            config.best_of_rounds = parsed;
        }
    }
    if let Ok(v) = std::env::var("APP__VARIANT") {
        if let Ok(parsed) = v.parse::<PuzzleVariant>() {
            config.variant = parsed;
        }
    }
}

fn env_bool(key: &str) -> Option<bool> {
    match std::env::var(key).ok()?.as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}
