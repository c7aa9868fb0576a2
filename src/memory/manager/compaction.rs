/*!
 * Relocation and Compaction
 *
 * Two deterministic rearrangement passes, run together after any block is
 * freed by natural termination (never by eviction). Neither pass changes a
 * block's capacity or id, and neither touches process state: "compaction"
 * here reorders occupancy for scan locality, it does not coalesce memory.
 */

use super::MemoryManager;
use log::debug;

impl MemoryManager {
    /// Shift occupants toward the front of the arena
    ///
    /// Single left-to-right pass: for each free block, the occupant of the
    /// first later occupied block that fits its capacity is moved in,
    /// freeing the source block. Occupants stay `Running` throughout. An
    /// occupant larger than the free block's capacity is skipped; the
    /// capacity invariant holds over administrative moves too.
    pub fn relocate(&mut self) {
        for i in 0..self.blocks.len() {
            if !self.blocks[i].is_free() {
                continue;
            }
            let capacity = self.blocks[i].capacity();
            let candidate = (i + 1..self.blocks.len()).find(|&j| {
                self.blocks[j].occupant().is_some_and(|pid| {
                    self.process_index(pid)
                        .is_some_and(|p| self.processes[p].size() <= capacity)
                })
            });
            if let Some(j) = candidate {
                self.move_occupant(j, i);
            }
        }
    }

    /// Stable partition: occupied blocks before free blocks
    ///
    /// Relative order is preserved within each group, normalizing the arena
    /// for subsequent first-fit scans.
    pub fn compact_order(&mut self) {
        self.blocks.sort_by_key(|b| b.is_free());
    }

    /// Administrative occupant move between two blocks
    ///
    /// Pure rearrangement with no failure mode: the destination is free and
    /// the fit was checked by the caller, so both halves are infallible.
    fn move_occupant(&mut self, from: usize, to: usize) {
        debug_assert!(self.blocks[to].is_free());
        if let Ok(pid) = self.blocks[from].release() {
            let bound = self.blocks[to].bind(pid);
            debug_assert!(bound.is_ok());
            debug!(
                "Process {} relocated from block {} to block {}",
                pid,
                self.blocks[from].id(),
                self.blocks[to].id()
            );
        }
    }
}
