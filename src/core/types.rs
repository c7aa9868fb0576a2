/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Memory block ID type
pub type BlockId = u32;

/// Size type for block capacities and process requirements, in memory units
pub type Units = u64;

/// Simulated time, in ticks
pub type Ticks = u64;
