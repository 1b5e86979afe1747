use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use vitrine_core::agent::DataSource;

use crate::TaskCommand;
use crate::state::SharedAgent;

/// Spawn the refresh loop for one data-backed screen.
/// Returns the command sender and the task handle.
pub fn spawn_agent<S: DataSource>(
    name: &'static str,
    source: S,
    state: SharedAgent<S::Record>,
    period: Duration,
) -> (mpsc::UnboundedSender<TaskCommand>, JoinHandle<()>) {
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(run_refresh_loop(name, source, state, period, cmd_rx));
    (cmd_tx, handle)
}

/// One refresh attempt immediately, then one per period, independent of
/// which screen is visible. Attempts are serialized: the next tick cannot
/// start while an acquisition is still in flight, so two refreshes never
/// race on the snapshot. Acquisition and normalization finish before the
/// write lock is taken, so readers only ever see a fully-formed record.
async fn run_refresh_loop<S: DataSource>(
    name: &'static str,
    source: S,
    state: SharedAgent<S::Record>,
    period: Duration,
    mut cmd_rx: mpsc::UnboundedReceiver<TaskCommand>,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let started = std::time::Instant::now();
                let outcome = source.acquire().await;
                let failed = outcome.is_err();
                state.write().await.apply(outcome, || source.fallback());
                if failed {
                    tracing::warn!(agent = name, "refresh failed; screen keeps last good record");
                } else {
                    tracing::debug!(
                        agent = name,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "refresh applied"
                    );
                }
            }
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(TaskCommand::Stop) | None => break,
                }
            }
        }
    }
}
