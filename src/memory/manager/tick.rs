/*!
 * Tick Advancement
 * Drives every occupied block's process forward by one time step
 */

use super::MemoryManager;
use crate::core::types::{Pid, Ticks};
use crate::memory::types::MemoryResult;
use log::info;

impl MemoryManager {
    /// Advance simulated time by `elapsed` ticks
    ///
    /// Every occupied block's process accumulates `elapsed` runtime. When a
    /// process terminates, its block is released, the relocation and
    /// compaction passes run, and every waiting process is retried in
    /// arrival order before the next occupant is advanced.
    ///
    /// Iteration snapshots the occupant pids up front and re-resolves each
    /// one's block per step: the relocation pass moves occupants between
    /// blocks mid-tick, and iterating by pid guarantees each occupant is
    /// advanced exactly once, never skipped or double-counted. Processes
    /// admitted by the mid-tick retry pass are not in the snapshot and start
    /// aging on the next tick. `tick(0)` is a no-op.
    ///
    /// Returns the pids that terminated during this call.
    pub fn tick(&mut self, elapsed: Ticks) -> MemoryResult<Vec<Pid>> {
        if elapsed == 0 {
            return Ok(Vec::new());
        }
        self.ticks_elapsed += elapsed;

        let scheduled: Vec<Pid> = self.blocks.iter().filter_map(|b| b.occupant()).collect();

        let mut terminated = Vec::new();
        for pid in scheduled {
            let Some(idx) = self.blocks.iter().position(|b| b.occupant() == Some(pid)) else {
                continue;
            };
            let Some(proc_idx) = self.process_index(pid) else {
                continue;
            };

            if self.processes[proc_idx].advance(elapsed)? {
                let block_id = self.blocks[idx].id();
                self.blocks[idx].release()?;
                terminated.push(pid);
                info!(
                    "Process {} terminated, block {} freed; compacting and retrying waiters",
                    pid, block_id
                );

                self.relocate();
                self.compact_order();
                self.admit_waiting();
            }
        }

        Ok(terminated)
    }
}
