/*!
 * Simulation Clock
 *
 * Background task that drives the memory manager's tick advancement at a
 * configurable wall-clock interval. The manager itself never blocks or
 * suspends; the clock is the only periodic event source, and pausing it
 * simply stops generating tick events, leaving state as last observed.
 */

use crate::core::limits::{DEFAULT_TICKS_PER_INTERVAL, DEFAULT_TICK_INTERVAL};
use crate::core::types::Ticks;
use crate::memory::MemoryManager;
use log::{debug, info, warn};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Control messages for the clock task
#[derive(Debug, Clone)]
pub enum ClockCommand {
    /// Change the wall-clock interval between ticks
    UpdateInterval(Duration),
    /// Stop generating tick events
    Pause,
    /// Resume generating tick events
    Resume,
    /// Fire a single tick immediately
    Trigger,
    /// Shut down the clock task
    Shutdown,
}

/// Handle to the clock background task
///
/// Spawns paused; `resume()` starts the periodic ticking.
pub struct SimulationClock {
    command_tx: mpsc::UnboundedSender<ClockCommand>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl SimulationClock {
    /// Spawn a clock with the default interval and tick step
    pub fn spawn(manager: Arc<RwLock<MemoryManager>>) -> Self {
        Self::with_interval(manager, DEFAULT_TICK_INTERVAL, DEFAULT_TICKS_PER_INTERVAL)
    }

    /// Spawn a clock advancing `ticks_per_interval` simulated ticks every
    /// `interval` of wall-clock time
    pub fn with_interval(
        manager: Arc<RwLock<MemoryManager>>,
        interval: Duration,
        ticks_per_interval: Ticks,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            run_clock_loop(manager, interval, ticks_per_interval, command_rx).await;
        });

        info!(
            "Simulation clock spawned: {:?} per {} tick(s), paused",
            interval, ticks_per_interval
        );

        Self {
            command_tx,
            handle: Some(handle),
        }
    }

    /// Resume periodic ticking
    pub fn resume(&self) {
        let _ = self.command_tx.send(ClockCommand::Resume);
    }

    /// Pause periodic ticking; in-flight state is left exactly as observed
    pub fn pause(&self) {
        let _ = self.command_tx.send(ClockCommand::Pause);
    }

    /// Change the wall-clock interval between ticks
    pub fn update_interval(&self, interval: Duration) {
        let _ = self.command_tx.send(ClockCommand::UpdateInterval(interval));
    }

    /// Fire a single tick immediately, regardless of pause state
    pub fn trigger(&self) {
        let _ = self.command_tx.send(ClockCommand::Trigger);
    }

    /// Shut down the clock task gracefully
    pub async fn shutdown(mut self) {
        let _ = self.command_tx.send(ClockCommand::Shutdown);

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Clock task shutdown error: {}", e);
            } else {
                info!("Clock task shutdown complete");
            }
        }
    }
}

/// Core clock loop: periodic ticks plus control commands
async fn run_clock_loop(
    manager: Arc<RwLock<MemoryManager>>,
    initial_interval: Duration,
    ticks_per_interval: Ticks,
    mut command_rx: mpsc::UnboundedReceiver<ClockCommand>,
) {
    let mut active = false;
    let mut interval = tokio::time::interval(initial_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if active {
                    advance(&manager, ticks_per_interval);
                }
            }

            Some(cmd) = command_rx.recv() => {
                match cmd {
                    ClockCommand::UpdateInterval(new_interval) => {
                        info!("Clock interval updated: {:?}", new_interval);
                        interval = tokio::time::interval(new_interval);
                        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
                    }

                    ClockCommand::Pause => {
                        info!("Clock paused");
                        active = false;
                    }

                    ClockCommand::Resume => {
                        info!("Clock resumed");
                        active = true;
                    }

                    ClockCommand::Trigger => {
                        advance(&manager, ticks_per_interval);
                    }

                    ClockCommand::Shutdown => {
                        info!("Clock shutting down");
                        break;
                    }
                }
            }
        }
    }
}

/// One tick event: a single write-lock acquisition for the whole step, so a
/// tick never interleaves with a command at sub-tick granularity
fn advance(manager: &Arc<RwLock<MemoryManager>>, ticks: Ticks) {
    match manager.write().tick(ticks) {
        Ok(terminated) if !terminated.is_empty() => {
            debug!("Clock tick: {} process(es) terminated", terminated.len());
        }
        Ok(_) => {}
        Err(e) => warn!("Clock tick failed: {}", e),
    }
}

impl Drop for SimulationClock {
    fn drop(&mut self) {
        // Best-effort shutdown if the handle was never awaited
        if self.handle.is_some() {
            let _ = self.command_tx.send(ClockCommand::Shutdown);
        }
    }
}
