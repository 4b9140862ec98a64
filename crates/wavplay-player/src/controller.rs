//! Playback controller: launches a native player and decides when playback is done.

use std::io;
use std::process::ExitStatus;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::process::Child;
use tokio::sync::{oneshot, Notify};
use tokio::time::Instant;
use tracing::{debug, info, warn};
use wavplay_core::{Error, PlaybackRequest, Result};

use crate::command::PlayerCommand;
use crate::config::PlayerConfig;

/// The player currently tracked by the controller.
struct ActiveProcess {
    /// Per-launch id, so a stale exit never clears a newer handle.
    id: u64,
    pid: Option<u32>,
    kill: Arc<Notify>,
}

/// State shared by every clone of a controller.
#[derive(Default)]
struct Shared {
    active: Mutex<Option<ActiveProcess>>,
    stop_requested: AtomicBool,
    next_id: AtomicU64,
}

/// Plays one audio file at a time through the host's command-line player.
///
/// Clones share state, so one task can `stop()` while another awaits `play()`.
#[derive(Clone)]
pub struct PlaybackController {
    config: Arc<PlayerConfig>,
    shared: Arc<Shared>,
}

impl PlaybackController {
    /// Create a controller with the default configuration.
    pub fn new() -> Self {
        Self::with_config(PlayerConfig::default())
    }

    /// Create a controller with a custom configuration.
    pub fn with_config(config: PlayerConfig) -> Self {
        Self {
            config: Arc::new(config),
            shared: Arc::new(Shared::default()),
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Whether a player process is currently tracked.
    pub fn is_playing(&self) -> bool {
        self.shared.active.lock().is_some()
    }

    /// OS process id of the tracked player.
    pub fn active_pid(&self) -> Option<u32> {
        self.shared.active.lock().as_ref().and_then(|active| active.pid)
    }

    /// Play the file described by `request`.
    ///
    /// With `sync` unset the returned future resolves once the grace period
    /// passes without the player failing; the player keeps running on its
    /// own. With `sync` set it resolves when the player exits. A player ended
    /// by [`stop`](Self::stop) always counts as a clean finish.
    pub async fn play(&self, request: PlaybackRequest) -> Result<()> {
        request.validate()?;

        let command = self.resolve_command(&request)?;
        let program = command.program();
        debug!("Launching {:?} {:?}", program, command.arguments());

        let child = command
            .build()
            .spawn()
            .map_err(|source| Error::Launch {
                program: program.clone(),
                source,
            })?;
        info!(
            "Playing {} with {} (pid {:?}, sync: {})",
            request.path().display(),
            program,
            child.id(),
            request.sync
        );

        let exit_rx = self.track(child);

        if request.sync {
            let status = Self::recv_exit(exit_rx).await?;
            return self.settle(status);
        }

        let deadline = Instant::now() + self.config.grace_period();
        tokio::select! {
            () = tokio::time::sleep_until(deadline) => {
                debug!("{program} still running after grace period, detaching");
                Ok(())
            }
            exit = exit_rx => {
                let status = exit.map_err(|_| supervisor_gone())??;
                if !self.stop_requested() && status.success() {
                    // An early clean exit is not a completion on its own;
                    // the grace period still decides.
                    tokio::time::sleep_until(deadline).await;
                    return Ok(());
                }
                self.settle(status)
            }
        }
    }

    /// Build a request from untyped JSON and play it.
    pub async fn play_value(&self, value: &Value) -> Result<()> {
        let request = PlaybackRequest::from_value(value)?;
        self.play(request).await
    }

    /// Ask the tracked player, if any, to terminate.
    ///
    /// Pending `play` futures settle from the player's exit, not from here.
    pub fn stop(&self) {
        let active = self.shared.active.lock();
        self.shared.stop_requested.store(true, Ordering::SeqCst);
        if let Some(active) = active.as_ref() {
            info!("Stopping player (pid {:?})", active.pid);
            active.kill.notify_one();
        } else {
            debug!("Stop requested with no active player");
        }
    }

    fn stop_requested(&self) -> bool {
        self.shared.stop_requested.load(Ordering::SeqCst)
    }

    fn resolve_command(&self, request: &PlaybackRequest) -> Result<PlayerCommand> {
        if let Some(template) = self.config.player() {
            return Ok(template.with_path(request.path()));
        }
        let platform = self.config.platform();
        if !platform.is_supported() {
            warn!("No audio player known for platform {platform}");
            return Err(Error::UnsupportedPlatform(platform));
        }
        PlayerCommand::for_platform(platform, request.path())
            .ok_or(Error::UnsupportedPlatform(platform))
    }

    /// Make `child` the tracked player and hand it to a supervisor task.
    ///
    /// The supervisor owns the child until it exits, kills it when `stop()`
    /// fires, and reports the exit status on the returned channel. If the
    /// receiver is gone the status is dropped, but the child is still reaped.
    fn track(&self, child: Child) -> oneshot::Receiver<io::Result<ExitStatus>> {
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        let pid = child.id();
        let kill = Arc::new(Notify::new());

        // Replaces any previous handle without stopping it. The stop flag is
        // reset under the same lock, so a concurrent stop() either precedes
        // this launch or sees its handle.
        {
            let mut active = self.shared.active.lock();
            self.shared.stop_requested.store(false, Ordering::SeqCst);
            *active = Some(ActiveProcess {
                id,
                pid,
                kill: kill.clone(),
            });
        }

        let (exit_tx, exit_rx) = oneshot::channel();
        let shared = self.shared.clone();
        tokio::spawn(async move {
            let status = supervise(child, kill).await;
            match &status {
                Ok(status) => debug!("Player (pid {:?}) exited: {}", pid, status),
                Err(e) => warn!("Failed to wait for player (pid {:?}): {e}", pid),
            }

            {
                let mut active = shared.active.lock();
                if active.as_ref().is_some_and(|active| active.id == id) {
                    *active = None;
                }
            }

            if exit_tx.send(status).is_err() {
                debug!("Player (pid {:?}) exit not observed", pid);
            }
        });

        exit_rx
    }

    async fn recv_exit(exit_rx: oneshot::Receiver<io::Result<ExitStatus>>) -> Result<ExitStatus> {
        Ok(exit_rx.await.map_err(|_| supervisor_gone())??)
    }

    fn settle(&self, status: ExitStatus) -> Result<()> {
        if self.stop_requested() {
            info!("Playback stopped");
            return Ok(());
        }
        if status.success() {
            info!("Playback finished");
            Ok(())
        } else {
            warn!("Player failed: {status}");
            Err(Error::PlaybackFailed(status.code()))
        }
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for `child` to exit, killing it first if `kill` is notified.
async fn supervise(mut child: Child, kill: Arc<Notify>) -> io::Result<ExitStatus> {
    tokio::select! {
        status = child.wait() => return status,
        () = kill.notified() => {}
    }

    terminate(&mut child);
    child.wait().await
}

/// Send SIGTERM so the player can release its audio device.
#[cfg(unix)]
fn terminate(child: &mut Child) {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    if let Some(pid) = child.id().and_then(|pid| i32::try_from(pid).ok()) {
        match kill(Pid::from_raw(pid), Signal::SIGTERM) {
            Ok(()) => return,
            Err(e) => debug!("SIGTERM to player (pid {pid}) failed: {e}"),
        }
    }
    force_kill(child);
}

#[cfg(not(unix))]
fn terminate(child: &mut Child) {
    force_kill(child);
}

fn force_kill(child: &mut Child) {
    if let Err(e) = child.start_kill() {
        // Already exited between the two branches; wait() reaps it below
        warn!("Failed to kill player: {e}");
    }
}

fn supervisor_gone() -> Error {
    Error::Io(io::Error::other("player supervisor ended without an exit status"))
}
