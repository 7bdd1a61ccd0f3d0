//! Per-player press-and-hold timer state machine.

use shared::domain::{Penalty, PLUS_TWO_MS};

/// Fixed tick resolution while a timer is running.
pub const TICK_MS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Ready,
    Running,
    AwaitingPenalty,
    Finished,
}

/// What a timer reports to the round controller when a solve ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopReport {
    pub raw_ms: u64,
    pub penalty: Penalty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressStartOutcome {
    Ignored,
    Armed,
    /// Timing stopped. `report` is present in non-cuber mode, where the
    /// penalty selection step is skipped and the solve reports immediately.
    Stopped { report: Option<StopReport> },
}

/// One player's timer. Owned by the round controller and mutated only
/// through the transition functions below; the controller resets it
/// whenever the active scramble changes.
#[derive(Debug, Clone)]
pub struct PlayerTimer {
    phase: TimerPhase,
    elapsed_ms: u64,
    captured_ms: u64,
    applied_penalty: Penalty,
}

impl PlayerTimer {
    pub fn new() -> Self {
        Self {
            phase: TimerPhase::Idle,
            elapsed_ms: 0,
            captured_ms: 0,
            applied_penalty: Penalty::None,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    /// Display value in milliseconds. After a +2 penalty this includes the
    /// 2000 ms visual adjustment; the reported raw time never does.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn applied_penalty(&self) -> Penalty {
        self.applied_penalty
    }

    /// Press-start edge (finger down). Arms an idle timer; stops a running
    /// one, capturing the frozen elapsed duration. Ignored while a penalty
    /// choice is pending or the solve is already finished.
    pub fn press_start(&mut self, non_cuber: bool) -> PressStartOutcome {
        match self.phase {
            TimerPhase::Running => {
                self.captured_ms = self.elapsed_ms;
                if non_cuber {
                    self.phase = TimerPhase::Finished;
                    PressStartOutcome::Stopped {
                        report: Some(StopReport {
                            raw_ms: self.captured_ms,
                            penalty: Penalty::None,
                        }),
                    }
                } else {
                    self.phase = TimerPhase::AwaitingPenalty;
                    PressStartOutcome::Stopped { report: None }
                }
            }
            TimerPhase::Idle => {
                self.phase = TimerPhase::Ready;
                PressStartOutcome::Armed
            }
            TimerPhase::Ready | TimerPhase::AwaitingPenalty | TimerPhase::Finished => {
                PressStartOutcome::Ignored
            }
        }
    }

    /// Press-end edge (finger up). Launches timing from Ready; returns
    /// whether timing started.
    pub fn press_end(&mut self) -> bool {
        if self.phase != TimerPhase::Ready {
            return false;
        }
        self.phase = TimerPhase::Running;
        self.elapsed_ms = 0;
        true
    }

    /// One tick quantum. Only meaningful while Running; a late tick after
    /// the stop gesture must not mutate state.
    pub fn tick(&mut self) {
        if self.phase == TimerPhase::Running {
            self.elapsed_ms += TICK_MS;
        }
    }

    /// Commit the penalty choice for a stopped solve. The +2 penalty
    /// adjusts the displayed time only; the report carries the raw capture.
    pub fn select_penalty(&mut self, penalty: Penalty) -> Option<StopReport> {
        if self.phase != TimerPhase::AwaitingPenalty {
            return None;
        }
        self.phase = TimerPhase::Finished;
        self.applied_penalty = penalty;
        if penalty == Penalty::PlusTwo {
            self.elapsed_ms = self.captured_ms + PLUS_TWO_MS;
        }
        Some(StopReport {
            raw_ms: self.captured_ms,
            penalty,
        })
    }

    /// Unconditional return to Idle for the next round.
    pub fn reset(&mut self) {
        self.phase = TimerPhase::Idle;
        self.elapsed_ms = 0;
        self.captured_ms = 0;
        self.applied_penalty = Penalty::None;
    }
}

impl Default for PlayerTimer {
    fn default() -> Self {
        Self::new()
    }
}
