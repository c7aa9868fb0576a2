/*!
 * Simulator Limits and Constants
 *
 * Centralized location for simulator-wide defaults and thresholds.
 */

use std::time::Duration;

/// Default wall-clock interval between clock ticks (1 second)
/// Matches one simulated tick per real second at clock speed 1
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Simulated ticks advanced per clock interval
pub const DEFAULT_TICKS_PER_INTERVAL: u64 = 1;

/// Capacity hint for the block arena
/// Educational pools are small; avoids reallocation in the common case
pub const BLOCK_ARENA_CAPACITY: usize = 16;

/// Capacity hint for the process registry
pub const PROCESS_REGISTRY_CAPACITY: usize = 32;
