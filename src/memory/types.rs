/*!
 * Memory Types
 * Common types for the fixed-partition pool
 */

use crate::core::types::{BlockId, Pid, Ticks, Units};
use crate::process::ProcessError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
///
/// All variants are local, recoverable conditions; a failed operation leaves
/// the manager exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Invalid block capacity: {0} (must be positive)")]
    InvalidCapacity(Units),

    #[error("Invalid process size: {0} (must be positive)")]
    InvalidSize(Units),

    #[error("Invalid process runtime: {0} (must be positive)")]
    InvalidRuntime(Ticks),

    #[error("Unknown block: {0}")]
    UnknownBlock(BlockId),

    #[error("Unknown process: {0}")]
    UnknownProcess(Pid),

    #[error("Block {id} is occupied by process {occupant} and cannot be removed")]
    BlockOccupied { id: BlockId, occupant: Pid },

    #[error("Process {0} is running and cannot be removed from the registry")]
    ProcessRunning(Pid),

    #[error("Block {id} is already assigned to process {occupant}")]
    BlockAlreadyAssigned { id: BlockId, occupant: Pid },

    #[error("Block {0} is already free")]
    BlockAlreadyFree(BlockId),

    #[error(transparent)]
    Process(#[from] ProcessError),
}

/// Block status, derived from occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockStatus {
    Free,
    Occupied,
}

impl std::fmt::Display for BlockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BlockStatus::Free => write!(f, "free"),
            BlockStatus::Occupied => write!(f, "occupied"),
        }
    }
}

/// Outcome of an allocation attempt
///
/// `Deferred` is not a failure: the process stays in the registry and is
/// retried automatically whenever a block is freed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Bound to a free block by first-fit
    Bound(BlockId),
    /// Bound after swapping out the victim process
    Evicted { block: BlockId, victim: Pid },
    /// No block available; process left waiting
    Deferred,
}

impl Placement {
    pub fn is_deferred(&self) -> bool {
        matches!(self, Placement::Deferred)
    }
}

/// Point-in-time view of a block, in current manager order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BlockSnapshot {
    pub id: BlockId,
    pub capacity: Units,
    pub status: BlockStatus,
    pub occupant: Option<Pid>,
}

/// Pool statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MemoryStats {
    pub total_capacity: Units,
    pub occupied_capacity: Units,
    pub usage_percentage: f64,
    pub total_blocks: usize,
    pub occupied_blocks: usize,
    pub free_blocks: usize,
    pub waiting_processes: usize,
    pub swapped_processes: usize,
    pub running_processes: usize,
    pub terminated_processes: usize,
    pub ticks_elapsed: Ticks,
}
