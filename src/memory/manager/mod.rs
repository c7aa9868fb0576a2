/*!
 * Memory Manager
 *
 * Owns the ordered block arena and the ordered process registry, and
 * implements the allocation, eviction, relocation, and compaction passes
 * plus the per-tick advancement that ties them together.
 *
 * ## Ordering
 *
 * Block order is significant: it defines the first-fit scan order and is
 * mutated only by the compaction pass. The process registry is kept in
 * arrival order, which doubles as the waiting-queue scan order.
 *
 * ## Identifiers
 *
 * Process and block ids are monotonic counters owned by the manager, never
 * recycled, so independent manager instances never share ids and removed
 * blocks leave a permanent gap in the id space.
 */

mod allocator;
mod compaction;
mod tick;

use super::block::MemoryBlock;
use super::types::{BlockSnapshot, MemoryError, MemoryResult, MemoryStats, Placement};
use crate::core::limits::{BLOCK_ARENA_CAPACITY, PROCESS_REGISTRY_CAPACITY};
use crate::core::types::{BlockId, Pid, Ticks, Units};
use crate::process::{Process, ProcessSnapshot, ProcessState};
use log::info;

/// Fixed-partition pool manager
pub struct MemoryManager {
    pub(super) blocks: Vec<MemoryBlock>,
    pub(super) processes: Vec<Process>,
    // Swap store: pids evicted from a block, in eviction order. Non-owning;
    // the registry above owns the processes themselves.
    pub(super) swapped: Vec<Pid>,
    pub(super) total_capacity: Units,
    pub(super) ticks_elapsed: Ticks,
    next_pid: Pid,
    next_block_id: BlockId,
}

impl MemoryManager {
    pub fn new() -> Self {
        Self {
            blocks: Vec::with_capacity(BLOCK_ARENA_CAPACITY),
            processes: Vec::with_capacity(PROCESS_REGISTRY_CAPACITY),
            swapped: Vec::new(),
            total_capacity: 0,
            ticks_elapsed: 0,
            next_pid: 0,
            next_block_id: 0,
        }
    }

    /// Add a block to the end of the arena
    pub fn create_block(&mut self, capacity: Units) -> MemoryResult<BlockId> {
        if capacity == 0 {
            return Err(MemoryError::InvalidCapacity(capacity));
        }

        let id = self.next_block_id;
        self.next_block_id += 1;

        self.blocks.push(MemoryBlock::new(id, capacity));
        self.total_capacity += capacity;

        info!(
            "Block {} created with capacity {} ({} total units across {} blocks)",
            id,
            capacity,
            self.total_capacity,
            self.blocks.len()
        );
        Ok(id)
    }

    /// Remove a block, valid only while it is free
    ///
    /// The block's id is never reused by later blocks.
    pub fn remove_block(&mut self, id: BlockId) -> MemoryResult<()> {
        let idx = self
            .block_index(id)
            .ok_or(MemoryError::UnknownBlock(id))?;

        if let Some(occupant) = self.blocks[idx].occupant() {
            return Err(MemoryError::BlockOccupied { id, occupant });
        }

        let removed = self.blocks.remove(idx);
        self.total_capacity -= removed.capacity();

        info!(
            "Block {} removed ({} total units across {} blocks)",
            id,
            self.total_capacity,
            self.blocks.len()
        );
        Ok(())
    }

    /// Register a new process and immediately attempt to place it
    ///
    /// The process is created in the `Waiting` state even when placement
    /// defers; it is retried automatically whenever a block is freed.
    pub fn submit_process(
        &mut self,
        name: impl Into<String>,
        size: Units,
        total_runtime: Ticks,
    ) -> MemoryResult<(Pid, Placement)> {
        if size == 0 {
            return Err(MemoryError::InvalidSize(size));
        }
        if total_runtime == 0 {
            return Err(MemoryError::InvalidRuntime(total_runtime));
        }

        let pid = self.next_pid;
        self.next_pid += 1;

        let process = Process::new(pid, name, size, total_runtime);
        info!(
            "Process {} '{}' submitted (size {}, runtime {} ticks)",
            pid,
            process.name(),
            size,
            total_runtime
        );
        self.processes.push(process);

        let placement = self.allocate(pid)?;
        Ok((pid, placement))
    }

    /// Purge a process from the registry
    ///
    /// Running processes are rejected: releasing their block implicitly would
    /// hide an eviction inside a purge. Terminated processes stay visible for
    /// reporting until removed through here.
    pub fn remove_process(&mut self, pid: Pid) -> MemoryResult<()> {
        let idx = self
            .process_index(pid)
            .ok_or(MemoryError::UnknownProcess(pid))?;

        let state = self.processes[idx].state();
        if state == ProcessState::Running {
            return Err(MemoryError::ProcessRunning(pid));
        }

        self.processes.remove(idx);
        self.swapped.retain(|&p| p != pid);
        info!("Process {} removed from registry (was {})", pid, state);
        Ok(())
    }

    /// Process snapshots, in arrival order
    pub fn processes(&self) -> Vec<ProcessSnapshot> {
        self.processes.iter().map(Process::snapshot).collect()
    }

    /// Block snapshots, in current arena order (post-compaction)
    pub fn blocks(&self) -> Vec<BlockSnapshot> {
        self.blocks.iter().map(MemoryBlock::snapshot).collect()
    }

    /// Pids currently held in the swap store, in eviction order
    pub fn swapped(&self) -> &[Pid] {
        &self.swapped
    }

    pub fn total_capacity(&self) -> Units {
        self.total_capacity
    }

    pub fn ticks_elapsed(&self) -> Ticks {
        self.ticks_elapsed
    }

    pub fn stats(&self) -> MemoryStats {
        let occupied_capacity: Units = self
            .blocks
            .iter()
            .filter(|b| !b.is_free())
            .map(MemoryBlock::capacity)
            .sum();
        let occupied_blocks = self.blocks.iter().filter(|b| !b.is_free()).count();

        let count_state = |state: ProcessState| {
            self.processes.iter().filter(|p| p.state() == state).count()
        };

        MemoryStats {
            total_capacity: self.total_capacity,
            occupied_capacity,
            usage_percentage: if self.total_capacity == 0 {
                0.0
            } else {
                occupied_capacity as f64 / self.total_capacity as f64 * 100.0
            },
            total_blocks: self.blocks.len(),
            occupied_blocks,
            free_blocks: self.blocks.len() - occupied_blocks,
            waiting_processes: count_state(ProcessState::Waiting),
            swapped_processes: count_state(ProcessState::Swapped),
            running_processes: count_state(ProcessState::Running),
            terminated_processes: count_state(ProcessState::Terminated),
            ticks_elapsed: self.ticks_elapsed,
        }
    }

    pub(super) fn block_index(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id() == id)
    }

    pub(super) fn process_index(&self, pid: Pid) -> Option<usize> {
        self.processes.iter().position(|p| p.pid() == pid)
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new()
    }
}
