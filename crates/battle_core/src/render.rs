//! Render state derived from the controller for the presentation layer.

use shared::domain::{Penalty, PuzzleVariant, MAX_PLAYERS, PLUS_TWO_MS};

use crate::config::BattleConfig;
use crate::round::RoundController;
use crate::timer::TimerPhase;

/// Placeholder shown instead of the live time in blind mode.
pub const MASKED_TIME: &str = "???";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerView {
    pub active: bool,
    pub phase: TimerPhase,
    /// Formatted time, the blind-mode mask, or "DNF".
    pub display: String,
    /// True when a +2 penalty applies to the displayed solve.
    pub plus_two: bool,
    pub score: u32,
    pub bo_score: u32,
    pub is_winner: bool,
    /// Previous round's result, formatted, if any.
    pub last_display: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleSnapshot {
    pub variant: PuzzleVariant,
    pub scramble_text: String,
    pub timers: [TimerView; MAX_PLAYERS],
    pub scores: [u32; MAX_PLAYERS],
    pub bo_scores: [u32; MAX_PLAYERS],
    pub winner: Option<usize>,
    pub bo_winner: Option<usize>,
    pub config: BattleConfig,
}

/// `m:ss.cc` once minutes are involved, `s.cc` below that.
pub fn format_time_ms(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    let centis = ms % 1000 / 10;
    if minutes > 0 {
        format!("{minutes}:{seconds:02}.{centis:02}")
    } else {
        format!("{seconds}.{centis:02}")
    }
}

impl RoundController {
    pub fn snapshot(&self) -> BattleSnapshot {
        let config = *self.config();
        BattleSnapshot {
            variant: config.variant,
            scramble_text: self.scramble().to_string(),
            timers: std::array::from_fn(|slot| self.timer_view(slot)),
            scores: self.scores(),
            bo_scores: self.bo_scores(),
            winner: self.winner(),
            bo_winner: self.bo_winner(),
            config,
        }
    }

    fn timer_view(&self, slot: usize) -> TimerView {
        let config = self.config();
        let timer = self.timer(slot);
        let display = if timer.applied_penalty() == Penalty::Dnf {
            "DNF".to_string()
        } else if config.blind_mode && timer.phase() == TimerPhase::Running {
            MASKED_TIME.to_string()
        } else {
            format_time_ms(timer.elapsed_ms())
        };
        TimerView {
            active: self.is_active(slot),
            phase: timer.phase(),
            display,
            plus_two: timer.applied_penalty() == Penalty::PlusTwo,
            score: self.scores()[slot],
            bo_score: self.bo_scores()[slot],
            is_winner: self.winner() == Some(slot),
            last_display: self.last_display(slot),
        }
    }

    fn last_display(&self, slot: usize) -> Option<String> {
        let last_time = self.last_time(slot);
        if last_time == 0 {
            return None;
        }
        Some(match self.last_penalty(slot) {
            Penalty::Dnf => "DNF".to_string(),
            Penalty::PlusTwo => format!("{} (+2)", format_time_ms(last_time + PLUS_TWO_MS)),
            Penalty::None => format_time_ms(last_time),
        })
    }
}
