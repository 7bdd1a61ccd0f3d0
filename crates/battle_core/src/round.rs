//! Round controller: owns the per-slot timers, aggregates their reports
//! into a round outcome, and keeps simple and best-of-N match scores.

use scramble::{generate, Scramble};
use shared::domain::{FinalTime, Penalty, SolveResult, MAX_PLAYERS};
use tracing::{debug, info, trace};

use crate::config::BattleConfig;
use crate::timer::{PlayerTimer, PressStartOutcome, TimerPhase};

/// Outcome of a completed round. `winner` is None when every active slot
/// reported a DNF; the round still advances in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundCompletion {
    pub winner: Option<usize>,
    pub match_won: bool,
}

/// What a routed input did to the controller's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEffect {
    Ignored,
    Armed,
    /// Timing stopped; the slot is now waiting for a penalty choice.
    TimingStopped,
    /// A solve result landed in the round state. Carries the completion
    /// summary when this was the last outstanding active slot.
    ResultRecorded(Option<RoundCompletion>),
}

pub struct RoundController {
    config: BattleConfig,
    pending_config: Option<BattleConfig>,
    scramble: Scramble,
    timers: [PlayerTimer; MAX_PLAYERS],
    results: [Option<SolveResult>; MAX_PLAYERS],
    scores: [u32; MAX_PLAYERS],
    bo_scores: [u32; MAX_PLAYERS],
    last_times: [u64; MAX_PLAYERS],
    last_penalties: [Penalty; MAX_PLAYERS],
    winner: Option<usize>,
    bo_winner: Option<usize>,
    reset_epoch: u64,
}

impl RoundController {
    pub fn new(config: BattleConfig) -> Self {
        Self {
            scramble: generate(config.variant),
            config,
            pending_config: None,
            timers: Default::default(),
            results: [None; MAX_PLAYERS],
            scores: [0; MAX_PLAYERS],
            bo_scores: [0; MAX_PLAYERS],
            last_times: [0; MAX_PLAYERS],
            last_penalties: [Penalty::None; MAX_PLAYERS],
            winner: None,
            bo_winner: None,
            reset_epoch: 0,
        }
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn scramble(&self) -> &Scramble {
        &self.scramble
    }

    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    pub fn is_active(&self, slot: usize) -> bool {
        slot < self.config.player_count
    }

    pub fn timer(&self, slot: usize) -> &PlayerTimer {
        &self.timers[slot]
    }

    pub fn result(&self, slot: usize) -> Option<SolveResult> {
        self.results[slot]
    }

    pub fn scores(&self) -> [u32; MAX_PLAYERS] {
        self.scores
    }

    pub fn bo_scores(&self) -> [u32; MAX_PLAYERS] {
        self.bo_scores
    }

    pub fn last_time(&self, slot: usize) -> u64 {
        self.last_times[slot]
    }

    pub fn last_penalty(&self, slot: usize) -> Penalty {
        self.last_penalties[slot]
    }

    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    pub fn bo_winner(&self) -> Option<usize> {
        self.bo_winner
    }

    /// Monotonic counter bumped by every full reset. Deferred actions
    /// scheduled before a reset carry a stale epoch and must be dropped.
    pub fn reset_epoch(&self) -> u64 {
        self.reset_epoch
    }

    pub fn press_start(&mut self, slot: usize) -> InputEffect {
        if !self.is_active(slot) {
            trace!(slot, "press-start on inactive slot ignored");
            return InputEffect::Ignored;
        }
        match self.timers[slot].press_start(self.config.non_cuber) {
            PressStartOutcome::Ignored => {
                trace!(slot, "press-start ignored in current phase");
                InputEffect::Ignored
            }
            PressStartOutcome::Armed => {
                debug!(slot, "timer armed");
                InputEffect::Armed
            }
            PressStartOutcome::Stopped { report: None } => {
                debug!(slot, "timing stopped, awaiting penalty");
                InputEffect::TimingStopped
            }
            PressStartOutcome::Stopped {
                report: Some(report),
            } => {
                debug!(slot, raw_ms = report.raw_ms, "timing stopped");
                let completion =
                    self.record_result(slot, SolveResult::new(report.raw_ms, report.penalty));
                InputEffect::ResultRecorded(completion)
            }
        }
    }

    /// Press-end edge; returns true when the slot's timer launched.
    pub fn press_end(&mut self, slot: usize) -> bool {
        if !self.is_active(slot) {
            return false;
        }
        let started = self.timers[slot].press_end();
        if started {
            info!(slot, "timing started");
        }
        started
    }

    pub fn select_penalty(&mut self, slot: usize, penalty: Penalty) -> InputEffect {
        if !self.is_active(slot) {
            return InputEffect::Ignored;
        }
        match self.timers[slot].select_penalty(penalty) {
            None => {
                trace!(slot, "penalty selection ignored, no solve pending");
                InputEffect::Ignored
            }
            Some(report) => {
                debug!(slot, raw_ms = report.raw_ms, penalty = %report.penalty, "penalty committed");
                let completion =
                    self.record_result(slot, SolveResult::new(report.raw_ms, report.penalty));
                InputEffect::ResultRecorded(completion)
            }
        }
    }

    pub fn tick(&mut self, slot: usize) {
        self.timers[slot].tick();
    }

    /// Write one slot's result into the round state and re-run the
    /// completion check. Safe to call in any arrival order: the winner is
    /// a pure function of the completed results snapshot.
    pub fn record_result(&mut self, slot: usize, result: SolveResult) -> Option<RoundCompletion> {
        if !self.is_active(slot) {
            return None;
        }
        self.results[slot] = Some(result);
        if !self.round_complete() {
            return None;
        }

        let winner = self.compute_winner();
        self.winner = winner;
        let mut match_won = false;
        match winner {
            Some(winner_slot) => {
                info!(winner_slot, "round complete");
                if self.config.best_of_mode {
                    self.bo_scores[winner_slot] += 1;
                    if self.bo_scores[winner_slot] >= self.config.required_wins() {
                        self.bo_winner = Some(winner_slot);
                        match_won = true;
                        info!(winner_slot, "match won");
                    }
                } else {
                    self.scores[winner_slot] += 1;
                }
            }
            None => info!("round complete with no winner"),
        }
        Some(RoundCompletion { winner, match_won })
    }

    pub fn round_complete(&self) -> bool {
        (0..self.config.player_count).all(|slot| self.results[slot].is_some())
    }

    /// Stable minimum of final times across active slots; ties break toward
    /// the lower slot index, and an all-DNF round selects nobody.
    fn compute_winner(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        let mut best_time = FinalTime::Dnf;
        for slot in 0..self.config.player_count {
            if let Some(result) = self.results[slot] {
                let final_time = result.final_time();
                if final_time < best_time {
                    best = Some(slot);
                    best_time = final_time;
                }
            }
        }
        best
    }

    /// Begin the next round: snapshot previous results for display, clear
    /// the round state and winner highlight, apply any staged config, and
    /// generate a fresh scramble for the (possibly updated) variant.
    pub fn advance_round(&mut self) {
        for slot in 0..MAX_PLAYERS {
            if self.is_active(slot) {
                if let Some(result) = self.results[slot] {
                    self.last_times[slot] = result.raw_ms;
                    self.last_penalties[slot] = result.penalty;
                }
            } else {
                self.last_times[slot] = 0;
                self.last_penalties[slot] = Penalty::None;
            }
        }
        if let Some(config) = self.pending_config.take() {
            self.config = config;
        }
        self.results = [None; MAX_PLAYERS];
        self.winner = None;
        for timer in &mut self.timers {
            timer.reset();
        }
        self.scramble = generate(self.config.variant);
        debug!(variant = %self.config.variant, "round advanced");
    }

    /// Full reset: scores, best-of counters, round state, previous-result
    /// snapshots, winner highlights, and a fresh scramble, atomically.
    /// Used by both the manual reset action and the post-match reset.
    pub fn reset_all(&mut self) {
        if let Some(config) = self.pending_config.take() {
            self.config = config;
        }
        self.scores = [0; MAX_PLAYERS];
        self.bo_scores = [0; MAX_PLAYERS];
        self.results = [None; MAX_PLAYERS];
        self.last_times = [0; MAX_PLAYERS];
        self.last_penalties = [Penalty::None; MAX_PLAYERS];
        self.winner = None;
        self.bo_winner = None;
        for timer in &mut self.timers {
            timer.reset();
        }
        self.scramble = generate(self.config.variant);
        self.reset_epoch += 1;
        info!("scores and round state reset");
    }

    /// Stage a configuration change. Applied immediately while the round is
    /// still pristine, otherwise held until the next round boundary.
    pub fn stage_config(&mut self, config: BattleConfig) {
        if self.round_pristine() {
            let variant_changed = config.variant != self.config.variant;
            self.config = config;
            self.pending_config = None;
            if variant_changed {
                self.scramble = generate(self.config.variant);
            }
            debug!("configuration applied");
        } else {
            self.pending_config = Some(config);
            debug!("configuration staged until round boundary");
        }
    }

    fn round_pristine(&self) -> bool {
        self.results.iter().all(Option::is_none)
            && self
                .timers
                .iter()
                .all(|timer| timer.phase() == TimerPhase::Idle)
    }
}
