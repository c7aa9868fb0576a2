/*!
 * Shared invariant checks
 * Verified over snapshots after every command in the scenario tests
 */

use partsim::{BlockStatus, MemoryManager, ProcessState};

/// Occupancy invariant: a block has an occupant iff it is `Occupied`, every
/// occupant is a `Running` registry process that fits its block, no two
/// blocks share an occupant, and the occupant set equals the running set.
/// Also checks the incremental total-capacity counter.
pub fn assert_pool_invariants(manager: &MemoryManager) {
    let blocks = manager.blocks();
    let processes = manager.processes();

    let mut occupants = Vec::new();
    for block in &blocks {
        match (block.status, block.occupant) {
            (BlockStatus::Occupied, Some(pid)) => {
                assert!(
                    !occupants.contains(&pid),
                    "process {pid} occupies two blocks"
                );
                occupants.push(pid);

                let process = processes
                    .iter()
                    .find(|p| p.pid == pid)
                    .unwrap_or_else(|| panic!("occupant {pid} missing from registry"));
                assert_eq!(process.state, ProcessState::Running);
                assert!(
                    process.size <= block.capacity,
                    "process {} (size {}) oversizes block {} (capacity {})",
                    pid,
                    process.size,
                    block.id,
                    block.capacity
                );
            }
            (BlockStatus::Free, None) => {}
            (status, occupant) => panic!(
                "block {} status/occupant mismatch: {status} / {occupant:?}",
                block.id
            ),
        }
    }

    let mut running: Vec<_> = processes
        .iter()
        .filter(|p| p.state == ProcessState::Running)
        .map(|p| p.pid)
        .collect();
    occupants.sort_unstable();
    running.sort_unstable();
    assert_eq!(occupants, running);

    let total: u64 = blocks.iter().map(|b| b.capacity).sum();
    assert_eq!(manager.total_capacity(), total);
}

/// Compaction ordering property: no free block ever precedes an occupied one
pub fn assert_no_free_before_occupied(manager: &MemoryManager) {
    let blocks = manager.blocks();
    for window in blocks.windows(2) {
        assert!(
            !(window[0].status == BlockStatus::Free
                && window[1].status == BlockStatus::Occupied),
            "free block {} precedes occupied block {}",
            window[0].id,
            window[1].id
        );
    }
}
