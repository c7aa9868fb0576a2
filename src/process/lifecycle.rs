/*!
 * Process Lifecycle
 * State machine for a simulated unit of work
 *
 * States: Waiting -> Running -> Terminated, with Running -> Swapped -> Running
 * round-trips for eviction. Terminated is terminal. Every transition is
 * validated before any field is mutated.
 */

use super::types::{ProcessError, ProcessResult, ProcessSnapshot, ProcessState};
use crate::core::types::{Pid, Ticks, Units};
use log::debug;

/// A simulated process: a size requirement plus a runtime requirement
#[derive(Debug, Clone)]
pub struct Process {
    pid: Pid,
    name: String,
    size: Units,
    total_runtime: Ticks,
    elapsed_runtime: Ticks,
    state: ProcessState,
}

impl Process {
    /// Create a new process in the `Waiting` state
    ///
    /// Input validation (positive size and runtime) happens at the command
    /// boundary before construction.
    pub fn new(pid: Pid, name: impl Into<String>, size: Units, total_runtime: Ticks) -> Self {
        Self {
            pid,
            name: name.into(),
            size,
            total_runtime,
            elapsed_runtime: 0,
            state: ProcessState::Waiting,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> Units {
        self.size
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn elapsed_runtime(&self) -> Ticks {
        self.elapsed_runtime
    }

    pub fn total_runtime(&self) -> Ticks {
        self.total_runtime
    }

    /// Runtime still owed before termination
    pub fn remaining_runtime(&self) -> Ticks {
        self.total_runtime.saturating_sub(self.elapsed_runtime)
    }

    /// Transition to `Running`, valid from `Waiting` or `Swapped`
    pub fn activate(&mut self) -> ProcessResult<()> {
        if !self.state.is_waiting() {
            return Err(ProcessError::InvalidTransition {
                pid: self.pid,
                from: self.state,
                to: ProcessState::Running,
            });
        }
        debug!("Process {} activated ({} -> running)", self.pid, self.state);
        self.state = ProcessState::Running;
        Ok(())
    }

    /// Transition to `Swapped`, valid only from `Running`
    ///
    /// Elapsed runtime is retained: a re-activated process resumes where it
    /// stopped.
    pub fn swap_out(&mut self) -> ProcessResult<()> {
        if self.state != ProcessState::Running {
            return Err(ProcessError::InvalidTransition {
                pid: self.pid,
                from: self.state,
                to: ProcessState::Swapped,
            });
        }
        debug!(
            "Process {} swapped out ({}/{} ticks elapsed)",
            self.pid, self.elapsed_runtime, self.total_runtime
        );
        self.state = ProcessState::Swapped;
        Ok(())
    }

    /// Accumulate `ticks` of runtime, valid only while `Running`
    ///
    /// Reaching the total runtime transitions to `Terminated` within the same
    /// call; there is no intermediate observable state. Returns whether the
    /// process terminated.
    pub fn advance(&mut self, ticks: Ticks) -> ProcessResult<bool> {
        if self.state != ProcessState::Running {
            return Err(ProcessError::InvalidTransition {
                pid: self.pid,
                from: self.state,
                to: ProcessState::Running,
            });
        }

        self.elapsed_runtime = self.elapsed_runtime.saturating_add(ticks);
        if self.elapsed_runtime >= self.total_runtime {
            self.state = ProcessState::Terminated;
            debug!(
                "Process {} terminated after {} ticks",
                self.pid, self.elapsed_runtime
            );
            return Ok(true);
        }
        Ok(false)
    }

    pub fn snapshot(&self) -> ProcessSnapshot {
        ProcessSnapshot {
            pid: self.pid,
            name: self.name.clone(),
            size: self.size,
            total_runtime: self.total_runtime,
            elapsed_runtime: self.elapsed_runtime,
            state: self.state,
        }
    }
}
