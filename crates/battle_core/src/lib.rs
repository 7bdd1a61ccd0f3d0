pub mod config;
pub mod render;
pub mod round;
pub mod session;
pub mod timer;

pub use config::{load_config, BattleConfig, ColorTheme, ConfigError};
pub use render::{format_time_ms, BattleSnapshot, TimerView, MASKED_TIME};
pub use round::{InputEffect, RoundCompletion, RoundController};
pub use session::{spawn, BattleCommand, BattleHandle, MATCH_RESET_DELAY, ROUND_ADVANCE_DELAY};
pub use timer::{PlayerTimer, StopReport, TimerPhase, TICK_MS};
