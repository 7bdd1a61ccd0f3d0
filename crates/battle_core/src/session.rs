//! Async session driver. All state transitions happen inside one event
//! loop; tick and delay tasks only send messages into it, so up to four
//! running timers interleave without ever executing simultaneously.

use std::time::Duration;

use shared::domain::{Penalty, MAX_PLAYERS};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{info, trace, warn};

use crate::config::BattleConfig;
use crate::render::BattleSnapshot;
use crate::round::{InputEffect, RoundCompletion, RoundController};
use crate::timer::TICK_MS;

pub const TICK_INTERVAL: Duration = Duration::from_millis(TICK_MS);
/// Display window between round completion and the next scramble.
pub const ROUND_ADVANCE_DELAY: Duration = Duration::from_secs(2);
/// Display window between a won match and the full reset.
pub const MATCH_RESET_DELAY: Duration = Duration::from_secs(3);

/// The action surface exposed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BattleCommand {
    PressStart(usize),
    PressEnd(usize),
    SelectPenalty(usize, Penalty),
    ResetScores,
    UpdateConfig(BattleConfig),
    Shutdown,
}

enum SessionEvent {
    Command(BattleCommand),
    Tick { slot: usize },
    AdvanceRound { epoch: u64 },
    ResetMatch { epoch: u64 },
}

/// Handle held by the UI: commands in, render snapshots out.
pub struct BattleHandle {
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    snapshot_rx: watch::Receiver<BattleSnapshot>,
    task: JoinHandle<()>,
}

impl BattleHandle {
    pub fn send(&self, command: BattleCommand) {
        if self
            .events_tx
            .send(SessionEvent::Command(command))
            .is_err()
        {
            warn!("battle session is gone; command dropped");
        }
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    pub fn snapshots(&self) -> watch::Receiver<BattleSnapshot> {
        self.snapshot_rx.clone()
    }

    pub async fn shutdown(self) {
        let _ = self
            .events_tx
            .send(SessionEvent::Command(BattleCommand::Shutdown));
        let _ = self.task.await;
    }
}

/// Spawn a battle session onto the current tokio runtime.
pub fn spawn(config: BattleConfig) -> BattleHandle {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let controller = RoundController::new(config);
    let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());
    let session = Session {
        controller,
        events_tx: events_tx.clone(),
        snapshot_tx,
        tick_tasks: Default::default(),
        advance_task: None,
        match_reset_task: None,
    };
    let task = tokio::spawn(session.run(events_rx));
    BattleHandle {
        events_tx,
        snapshot_rx,
        task,
    }
}

struct Session {
    controller: RoundController,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    snapshot_tx: watch::Sender<BattleSnapshot>,
    tick_tasks: [Option<JoinHandle<()>>; MAX_PLAYERS],
    advance_task: Option<JoinHandle<()>>,
    match_reset_task: Option<JoinHandle<()>>,
}

impl Session {
    async fn run(mut self, mut events_rx: mpsc::UnboundedReceiver<SessionEvent>) {
        info!("battle session started");
        while let Some(event) = events_rx.recv().await {
            match event {
                SessionEvent::Command(BattleCommand::Shutdown) => break,
                SessionEvent::Command(command) => self.handle_command(command),
                SessionEvent::Tick { slot } => self.controller.tick(slot),
                SessionEvent::AdvanceRound { epoch } => self.handle_advance(epoch),
                SessionEvent::ResetMatch { epoch } => self.handle_match_reset(epoch),
            }
            self.snapshot_tx.send_replace(self.controller.snapshot());
        }
        self.stop_all_tasks();
        info!("battle session stopped");
    }

    fn handle_command(&mut self, command: BattleCommand) {
        match command {
            BattleCommand::PressStart(slot) => {
                let effect = self.controller.press_start(slot);
                self.apply_effect(slot, effect);
            }
            BattleCommand::PressEnd(slot) => {
                if self.controller.press_end(slot) {
                    self.start_ticking(slot);
                }
            }
            BattleCommand::SelectPenalty(slot, penalty) => {
                let effect = self.controller.select_penalty(slot, penalty);
                self.apply_effect(slot, effect);
            }
            BattleCommand::ResetScores => {
                self.stop_all_tasks();
                self.controller.reset_all();
            }
            BattleCommand::UpdateConfig(config) => self.controller.stage_config(config),
            BattleCommand::Shutdown => {}
        }
    }

    fn apply_effect(&mut self, slot: usize, effect: InputEffect) {
        match effect {
            InputEffect::Ignored | InputEffect::Armed => {}
            InputEffect::TimingStopped => self.stop_ticking(slot),
            InputEffect::ResultRecorded(completion) => {
                self.stop_ticking(slot);
                if let Some(completion) = completion {
                    self.schedule_round_outcome(completion);
                }
            }
        }
    }

    fn schedule_round_outcome(&mut self, completion: RoundCompletion) {
        self.schedule_advance();
        if completion.match_won {
            self.schedule_match_reset();
        }
    }

    fn schedule_advance(&mut self) {
        if let Some(task) = self.advance_task.take() {
            task.abort();
        }
        let events_tx = self.events_tx.clone();
        let epoch = self.controller.reset_epoch();
        self.advance_task = Some(tokio::spawn(async move {
            tokio::time::sleep(ROUND_ADVANCE_DELAY).await;
            let _ = events_tx.send(SessionEvent::AdvanceRound { epoch });
        }));
    }

    fn schedule_match_reset(&mut self) {
        if let Some(task) = self.match_reset_task.take() {
            task.abort();
        }
        let events_tx = self.events_tx.clone();
        let epoch = self.controller.reset_epoch();
        self.match_reset_task = Some(tokio::spawn(async move {
            tokio::time::sleep(MATCH_RESET_DELAY).await;
            let _ = events_tx.send(SessionEvent::ResetMatch { epoch });
        }));
    }

    // Aborting a deferred task cannot recall a message it already queued,
    // so the epoch carried by the event is what actually supersedes stale
    // round advances and match resets.
    fn handle_advance(&mut self, epoch: u64) {
        self.advance_task = None;
        if epoch != self.controller.reset_epoch() {
            trace!("stale round advance dropped");
            return;
        }
        self.stop_tick_tasks();
        self.controller.advance_round();
    }

    fn handle_match_reset(&mut self, epoch: u64) {
        self.match_reset_task = None;
        if epoch != self.controller.reset_epoch() {
            trace!("stale match reset dropped");
            return;
        }
        self.stop_tick_tasks();
        self.controller.reset_all();
    }

    fn start_ticking(&mut self, slot: usize) {
        self.stop_ticking(slot);
        let events_tx = self.events_tx.clone();
        self.tick_tasks[slot] = Some(tokio::spawn(async move {
            loop {
                tokio::time::sleep(TICK_INTERVAL).await;
                if events_tx.send(SessionEvent::Tick { slot }).is_err() {
                    break;
                }
            }
        }));
    }

    fn stop_ticking(&mut self, slot: usize) {
        if let Some(task) = self.tick_tasks[slot].take() {
            task.abort();
        }
    }

    fn stop_tick_tasks(&mut self) {
        for slot in 0..MAX_PLAYERS {
            self.stop_ticking(slot);
        }
    }

    fn stop_all_tasks(&mut self) {
        self.stop_tick_tasks();
        if let Some(task) = self.advance_task.take() {
            task.abort();
        }
        if let Some(task) = self.match_reset_task.take() {
            task.abort();
        }
    }
}
