use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::TaskCommand;
use crate::state::SharedRotation;

/// Spawn the timed rotation driver.
/// Returns the command sender and the task handle.
pub fn spawn_rotation(
    rotation: SharedRotation,
    slide: Duration,
    fade: Duration,
) -> (mpsc::UnboundedSender<TaskCommand>, JoinHandle<()>) {
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(run_rotation_loop(rotation, slide, fade, cmd_rx));
    (cmd_tx, handle)
}

/// One slide period per tick: fade out, hold for the fade window, then
/// advance and fade back in. The fade-out and the index advance are
/// strictly sequential, so a reader never sees the screen change while it
/// is still fading.
async fn run_rotation_loop(
    rotation: SharedRotation,
    slide: Duration,
    fade: Duration,
    mut cmd_rx: mpsc::UnboundedReceiver<TaskCommand>,
) {
    let first_tick = tokio::time::Instant::now() + slide;
    let mut interval = tokio::time::interval_at(first_tick, slide);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                rotation.write().await.begin_fade();

                let fade_end = tokio::time::Instant::now() + fade;
                tokio::select! {
                    cmd = cmd_rx.recv() => {
                        match cmd {
                            Some(TaskCommand::Stop) | None => return,
                        }
                    }
                    _ = tokio::time::sleep_until(fade_end) => {}
                }

                rotation.write().await.advance();
            }
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(TaskCommand::Stop) | None => break,
                }
            }
        }
    }
}
