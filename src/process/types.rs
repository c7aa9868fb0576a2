/*!
 * Process Types
 * Common types for simulated processes
 */

use crate::core::types::{Pid, Ticks, Units};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("Invalid state transition for process {pid}: {from} -> {to}")]
    InvalidTransition {
        pid: Pid,
        from: ProcessState,
        to: ProcessState,
    },
}

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Process is waiting for a memory block
    Waiting,
    /// Process was evicted from a block and waits for re-admission
    Swapped,
    /// Process is bound to a block and accumulating runtime
    Running,
    /// Process has finished its required runtime
    Terminated,
}

impl ProcessState {
    /// Whether the process is eligible for allocation
    pub fn is_waiting(&self) -> bool {
        matches!(self, ProcessState::Waiting | ProcessState::Swapped)
    }
}

impl std::fmt::Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ProcessState::Waiting => write!(f, "waiting"),
            ProcessState::Swapped => write!(f, "swapped"),
            ProcessState::Running => write!(f, "running"),
            ProcessState::Terminated => write!(f, "terminated"),
        }
    }
}

/// Point-in-time view of a process, in registry (arrival) order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessSnapshot {
    pub pid: Pid,
    pub name: String,
    pub size: Units,
    pub total_runtime: Ticks,
    pub elapsed_runtime: Ticks,
    pub state: ProcessState,
}
