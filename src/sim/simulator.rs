/*!
 * Simulator Facade
 *
 * Composes a memory manager and a simulation clock and exposes the
 * command/query surface consumed by external shells. Every command takes
 * the manager's write lock for its full duration (run-to-completion, no
 * sub-tick interleaving with the clock); queries take the read lock and
 * return owned snapshots.
 */

use super::clock::SimulationClock;
use crate::core::limits::{DEFAULT_TICKS_PER_INTERVAL, DEFAULT_TICK_INTERVAL};
use crate::core::types::{BlockId, Pid, Ticks, Units};
use crate::memory::{BlockSnapshot, MemoryManager, MemoryResult, MemoryStats, Placement};
use crate::process::ProcessSnapshot;
use log::info;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

/// Builder for `Simulator`
pub struct SimulatorBuilder {
    tick_interval: Duration,
    ticks_per_interval: Ticks,
}

impl SimulatorBuilder {
    pub fn new() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            ticks_per_interval: DEFAULT_TICKS_PER_INTERVAL,
        }
    }

    /// Wall-clock interval between clock ticks
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Simulated ticks advanced per clock interval
    pub fn with_ticks_per_interval(mut self, ticks: Ticks) -> Self {
        self.ticks_per_interval = ticks;
        self
    }

    /// Build the simulator; the clock spawns paused
    pub fn build(self) -> Simulator {
        let manager = Arc::new(RwLock::new(MemoryManager::new()));
        let clock = SimulationClock::with_interval(
            Arc::clone(&manager),
            self.tick_interval,
            self.ticks_per_interval,
        );

        info!(
            "Simulator initialized ({:?} per {} tick(s))",
            self.tick_interval, self.ticks_per_interval
        );

        Simulator { manager, clock }
    }
}

impl Default for SimulatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-partition memory allocation simulator
pub struct Simulator {
    manager: Arc<RwLock<MemoryManager>>,
    clock: SimulationClock,
}

impl Simulator {
    pub fn builder() -> SimulatorBuilder {
        SimulatorBuilder::new()
    }

    /// Add a block to the pool
    pub fn create_block(&self, capacity: Units) -> MemoryResult<BlockId> {
        self.manager.write().create_block(capacity)
    }

    /// Remove a free block from the pool
    pub fn remove_block(&self, id: BlockId) -> MemoryResult<()> {
        self.manager.write().remove_block(id)
    }

    /// Register a process and attempt immediate placement
    pub fn submit_process(
        &self,
        name: impl Into<String>,
        size: Units,
        total_runtime: Ticks,
    ) -> MemoryResult<(Pid, Placement)> {
        self.manager.write().submit_process(name, size, total_runtime)
    }

    /// Purge a non-running process from the registry
    pub fn remove_process(&self, pid: Pid) -> MemoryResult<()> {
        self.manager.write().remove_process(pid)
    }

    /// Advance virtual time directly, bypassing the wall clock
    ///
    /// Returns the pids that terminated during the call.
    pub fn tick(&self, elapsed: Ticks) -> MemoryResult<Vec<Pid>> {
        self.manager.write().tick(elapsed)
    }

    /// Start (or resume) the periodic clock
    pub fn start(&self) {
        self.clock.resume();
    }

    /// Stop the periodic clock; state is left exactly as last observed
    pub fn stop(&self) {
        self.clock.pause();
    }

    /// Change the wall-clock interval between ticks
    pub fn set_tick_interval(&self, interval: Duration) {
        self.clock.update_interval(interval);
    }

    /// Shut down the clock task gracefully
    pub async fn shutdown(self) {
        self.clock.shutdown().await;
    }

    /// Process snapshots, in arrival order
    pub fn processes(&self) -> Vec<ProcessSnapshot> {
        self.manager.read().processes()
    }

    /// Block snapshots, in current manager order
    pub fn blocks(&self) -> Vec<BlockSnapshot> {
        self.manager.read().blocks()
    }

    /// Aggregate pool and registry statistics
    pub fn stats(&self) -> MemoryStats {
        self.manager.read().stats()
    }
}

impl Default for Simulator {
    fn default() -> Self {
        SimulatorBuilder::new().build()
    }
}
