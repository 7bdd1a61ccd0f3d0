//! Backend thread owning the tokio runtime that drives the battle session.

use std::sync::mpsc;
use std::thread;

use anyhow::{anyhow, Context, Result};
use battle_core::{spawn, BattleConfig, BattleHandle};

pub fn launch(config: BattleConfig) -> Result<BattleHandle> {
    let (handle_tx, handle_rx) = mpsc::channel();
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = handle_tx.send(Err(anyhow!("failed to build backend runtime: {err}")));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };
        runtime.block_on(async move {
            let _ = handle_tx.send(Ok(spawn(config)));
            std::future::pending::<()>().await
        });
    });

    let handle = handle_rx
        .recv()
        .context("backend worker exited before startup")??;
    Ok(handle)
}
