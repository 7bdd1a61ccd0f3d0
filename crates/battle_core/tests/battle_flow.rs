use std::time::Duration;

use battle_core::config::BattleConfig;
use battle_core::session::{spawn, BattleCommand};
use battle_core::timer::TimerPhase;
use shared::domain::Penalty;

fn two_player_config() -> BattleConfig {
    BattleConfig {
        player_count: 2,
        ..BattleConfig::default()
    }
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

async fn solve_non_cuber(handle: &battle_core::session::BattleHandle, slot: usize, ms: u64) {
    handle.send(BattleCommand::PressStart(slot));
    handle.send(BattleCommand::PressEnd(slot));
    tokio::time::sleep(Duration::from_millis(ms + 5)).await;
    handle.send(BattleCommand::PressStart(slot));
    settle().await;
}

#[tokio::test(start_paused = true)]
async fn full_round_with_penalties_advances_after_the_display_window() {
    let handle = spawn(two_player_config());

    handle.send(BattleCommand::PressStart(0));
    handle.send(BattleCommand::PressEnd(0));
    tokio::time::sleep(Duration::from_millis(505)).await;
    handle.send(BattleCommand::PressStart(0));
    handle.send(BattleCommand::SelectPenalty(0, Penalty::None));
    settle().await;

    handle.send(BattleCommand::PressStart(1));
    handle.send(BattleCommand::PressEnd(1));
    tokio::time::sleep(Duration::from_millis(705)).await;
    handle.send(BattleCommand::PressStart(1));
    handle.send(BattleCommand::SelectPenalty(1, Penalty::PlusTwo));
    settle().await;

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.winner, Some(0));
    assert_eq!(snapshot.scores, [1, 0, 0, 0]);
    assert_eq!(snapshot.timers[0].display, "0.50");
    assert_eq!(snapshot.timers[1].display, "2.70");
    assert!(snapshot.timers[1].plus_two);

    tokio::time::sleep(Duration::from_millis(2_050)).await;
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.winner, None);
    assert_eq!(snapshot.scores, [1, 0, 0, 0]);
    assert_eq!(snapshot.timers[0].phase, TimerPhase::Idle);
    assert_eq!(snapshot.timers[0].last_display.as_deref(), Some("0.50"));
    assert_eq!(
        snapshot.timers[1].last_display.as_deref(),
        Some("2.70 (+2)")
    );

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn manual_reset_supersedes_a_pending_round_advance() {
    let config = BattleConfig {
        non_cuber: true,
        ..two_player_config()
    };
    let handle = spawn(config);

    solve_non_cuber(&handle, 0, 300).await;
    solve_non_cuber(&handle, 1, 400).await;
    assert_eq!(handle.snapshot().scores, [1, 0, 0, 0]);

    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.send(BattleCommand::ResetScores);
    settle().await;
    assert_eq!(handle.snapshot().scores, [0, 0, 0, 0]);

    // Start a fresh solve and run it straight through the moment the
    // superseded round advance would have fired.
    tokio::time::sleep(Duration::from_millis(500)).await;
    handle.send(BattleCommand::PressStart(0));
    handle.send(BattleCommand::PressEnd(0));
    tokio::time::sleep(Duration::from_millis(2_005)).await;

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.timers[0].phase, TimerPhase::Running);
    assert_eq!(snapshot.timers[0].display, "2.00");
    assert_eq!(snapshot.timers[0].last_display, None);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn best_of_three_resets_fully_after_the_match_display_window() {
    let config = BattleConfig {
        non_cuber: true,
        best_of_mode: true,
        best_of_rounds: 3,
        ..two_player_config()
    };
    let handle = spawn(config);

    solve_non_cuber(&handle, 0, 300).await;
    solve_non_cuber(&handle, 1, 500).await;
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.bo_scores, [1, 0, 0, 0]);
    assert_eq!(snapshot.scores, [0, 0, 0, 0]);
    assert_eq!(snapshot.bo_winner, None);

    tokio::time::sleep(Duration::from_millis(2_050)).await;

    solve_non_cuber(&handle, 0, 300).await;
    solve_non_cuber(&handle, 1, 500).await;
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.bo_scores, [2, 0, 0, 0]);
    assert_eq!(snapshot.bo_winner, Some(0));

    // The round advance still fires first; the best-of banner survives it.
    tokio::time::sleep(Duration::from_millis(2_050)).await;
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.bo_winner, Some(0));
    assert!(snapshot.timers[0].last_display.is_some());

    tokio::time::sleep(Duration::from_millis(1_050)).await;
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.bo_scores, [0, 0, 0, 0]);
    assert_eq!(snapshot.bo_winner, None);
    assert_eq!(snapshot.timers[0].last_display, None);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn config_updates_stage_until_the_round_boundary() {
    let config = BattleConfig {
        non_cuber: true,
        ..two_player_config()
    };
    let handle = spawn(config);

    handle.send(BattleCommand::PressStart(0));
    handle.send(BattleCommand::PressEnd(0));
    tokio::time::sleep(Duration::from_millis(105)).await;

    let mut updated = config;
    updated.player_count = 3;
    handle.send(BattleCommand::UpdateConfig(updated));
    settle().await;
    assert_eq!(handle.snapshot().config.player_count, 2);

    handle.send(BattleCommand::PressStart(0));
    settle().await;
    solve_non_cuber(&handle, 1, 200).await;
    tokio::time::sleep(Duration::from_millis(2_050)).await;

    assert_eq!(handle.snapshot().config.player_count, 3);

    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn blind_mode_masks_the_live_time_until_the_stop_gesture() {
    let config = BattleConfig {
        blind_mode: true,
        ..two_player_config()
    };
    let handle = spawn(config);

    handle.send(BattleCommand::PressStart(0));
    handle.send(BattleCommand::PressEnd(0));
    tokio::time::sleep(Duration::from_millis(205)).await;
    assert_eq!(handle.snapshot().timers[0].display, "???");

    handle.send(BattleCommand::PressStart(0));
    settle().await;
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.timers[0].phase, TimerPhase::AwaitingPenalty);
    assert_eq!(snapshot.timers[0].display, "0.20");

    handle.shutdown().await;
}
