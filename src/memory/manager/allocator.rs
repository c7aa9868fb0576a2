/*!
 * Allocation and Eviction
 * First-fit placement with a swap-out fallback
 */

use super::MemoryManager;
use crate::core::types::{BlockId, Pid, Ticks, Units};
use crate::memory::types::{MemoryError, MemoryResult, Placement};
use log::{info, warn};

impl MemoryManager {
    /// Attempt to place a waiting process: first-fit, then eviction
    ///
    /// `Deferred` is a legitimate outcome, not an error; the process stays in
    /// the registry and is retried whenever a block is freed.
    pub fn allocate(&mut self, pid: Pid) -> MemoryResult<Placement> {
        let proc_idx = self
            .process_index(pid)
            .ok_or(MemoryError::UnknownProcess(pid))?;
        let size = self.processes[proc_idx].size();

        if let Some(block) = self.first_fit(pid, size)? {
            return Ok(Placement::Bound(block));
        }

        if let Some((block, victim)) = self.evict_for(pid, size)? {
            return Ok(Placement::Evicted { block, victim });
        }

        info!(
            "No block available for process {} (size {}), allocation deferred",
            pid, size
        );
        Ok(Placement::Deferred)
    }

    /// First qualifying block wins: the lowest-index free block whose
    /// capacity covers the request. No secondary ordering by capacity.
    pub(super) fn first_fit(&mut self, pid: Pid, size: Units) -> MemoryResult<Option<BlockId>> {
        let Some(idx) = self
            .blocks
            .iter()
            .position(|b| b.is_free() && b.fits(size))
        else {
            return Ok(None);
        };

        let id = self.blocks[idx].id();
        let capacity = self.blocks[idx].capacity();
        self.bind_at(idx, pid)?;
        info!(
            "Process {} bound to block {} by first-fit (size {} / capacity {})",
            pid, id, size, capacity
        );
        Ok(Some(id))
    }

    /// Select and swap out a victim to make room for `pid`
    ///
    /// Victim policy: an occupant qualifies when its block fits the incoming
    /// process and its remaining runtime strictly exceeds the incoming
    /// process's total runtime (swapping must defer more work than it
    /// admits). Among qualifiers the largest remaining runtime wins; ties
    /// resolve to the lowest block index. At most one victim per call. The
    /// victim keeps its elapsed runtime and is re-admitted from the waiting
    /// queue like any other waiter.
    pub(super) fn evict_for(
        &mut self,
        pid: Pid,
        size: Units,
    ) -> MemoryResult<Option<(BlockId, Pid)>> {
        let proc_idx = self
            .process_index(pid)
            .ok_or(MemoryError::UnknownProcess(pid))?;
        let incoming_runtime = self.processes[proc_idx].total_runtime();

        let mut victim: Option<(usize, Pid, Ticks)> = None;
        for (idx, block) in self.blocks.iter().enumerate() {
            let Some(occupant) = block.occupant() else {
                continue;
            };
            if !block.fits(size) {
                continue;
            }
            let Some(p_idx) = self.process_index(occupant) else {
                continue;
            };
            let remaining = self.processes[p_idx].remaining_runtime();
            if remaining <= incoming_runtime {
                continue;
            }
            match victim {
                // Strict comparison keeps the lowest-index candidate on ties
                Some((_, _, best)) if remaining <= best => {}
                _ => victim = Some((idx, occupant, remaining)),
            }
        }

        let Some((idx, victim_pid, remaining)) = victim else {
            return Ok(None);
        };

        let v_idx = self
            .process_index(victim_pid)
            .ok_or(MemoryError::UnknownProcess(victim_pid))?;
        self.processes[v_idx].swap_out()?;
        self.swapped.push(victim_pid);
        self.blocks[idx].release()?;

        let block_id = self.blocks[idx].id();
        self.bind_at(idx, pid)?;
        warn!(
            "Process {} swapped out of block {} ({} ticks remaining) to admit process {}",
            victim_pid, block_id, remaining, pid
        );
        Ok(Some((block_id, victim_pid)))
    }

    /// Re-attempt placement for every waiting process, in arrival order
    ///
    /// Runs after each freed block. A retry never evicts; eviction is
    /// reserved for fresh submissions. A later-arriving small process can win
    /// a freed slot ahead of an earlier large one that still does not fit.
    pub(super) fn admit_waiting(&mut self) {
        let waiting: Vec<(Pid, Units)> = self
            .processes
            .iter()
            .filter(|p| p.state().is_waiting())
            .map(|p| (p.pid(), p.size()))
            .collect();

        for (pid, size) in waiting {
            match self.first_fit(pid, size) {
                Ok(Some(_)) => self.swapped.retain(|&p| p != pid),
                Ok(None) => {}
                Err(e) => warn!("Retry placement for process {} failed: {}", pid, e),
            }
        }
    }

    /// Bind a waiting process to the block at `idx`
    ///
    /// The process transition is validated before the block is touched, so a
    /// contract violation leaves both sides unchanged.
    fn bind_at(&mut self, idx: usize, pid: Pid) -> MemoryResult<()> {
        if let Some(occupant) = self.blocks[idx].occupant() {
            return Err(MemoryError::BlockAlreadyAssigned {
                id: self.blocks[idx].id(),
                occupant,
            });
        }
        let proc_idx = self
            .process_index(pid)
            .ok_or(MemoryError::UnknownProcess(pid))?;
        self.processes[proc_idx].activate()?;
        self.blocks[idx].bind(pid)?;
        Ok(())
    }
}
