/*!
 * Memory Block
 * A fixed-capacity slot holding at most one occupant
 */

use super::types::{BlockSnapshot, BlockStatus, MemoryError, MemoryResult};
use crate::core::types::{BlockId, Pid, Units};

/// A fixed-capacity memory block
///
/// Capacity is immutable after creation. The occupant reference is
/// non-owning; the manager's process registry owns the process itself.
#[derive(Debug, Clone)]
pub struct MemoryBlock {
    id: BlockId,
    capacity: Units,
    occupant: Option<Pid>,
}

impl MemoryBlock {
    pub fn new(id: BlockId, capacity: Units) -> Self {
        Self {
            id,
            capacity,
            occupant: None,
        }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn capacity(&self) -> Units {
        self.capacity
    }

    pub fn occupant(&self) -> Option<Pid> {
        self.occupant
    }

    /// Status is derived: `Free` iff there is no occupant
    pub fn status(&self) -> BlockStatus {
        if self.occupant.is_some() {
            BlockStatus::Occupied
        } else {
            BlockStatus::Free
        }
    }

    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }

    /// Whether a process of `size` fits this block
    pub fn fits(&self, size: Units) -> bool {
        self.capacity >= size
    }

    /// Assign an occupant, valid only while `Free`
    pub fn bind(&mut self, pid: Pid) -> MemoryResult<()> {
        if let Some(occupant) = self.occupant {
            return Err(MemoryError::BlockAlreadyAssigned {
                id: self.id,
                occupant,
            });
        }
        self.occupant = Some(pid);
        Ok(())
    }

    /// Clear the occupant, valid only while `Occupied`
    ///
    /// Does not touch the process itself; the caller either observed its
    /// termination or is performing an administrative move.
    pub fn release(&mut self) -> MemoryResult<Pid> {
        match self.occupant.take() {
            Some(pid) => Ok(pid),
            None => Err(MemoryError::BlockAlreadyFree(self.id)),
        }
    }

    pub fn snapshot(&self) -> BlockSnapshot {
        BlockSnapshot {
            id: self.id,
            capacity: self.capacity,
            status: self.status(),
            occupant: self.occupant,
        }
    }
}
