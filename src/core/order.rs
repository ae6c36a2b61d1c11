//! Total orders over CPU processes.
//!
//! Every chain ends with the process name so two distinct processes never
//! compare equal and runs are reproducible for identical input.

use std::cmp::Ordering;

use super::state::CpuProcess;

/// Burst time, then arrival time, then name.
pub fn by_burst_time(a: &CpuProcess, b: &CpuProcess) -> Ordering {
    a.burst_time
        .cmp(&b.burst_time)
        .then_with(|| a.arrival_time.cmp(&b.arrival_time))
        .then_with(|| a.name.cmp(&b.name))
}

/// Arrival time, then burst time, then name.
pub fn by_arrival_time(a: &CpuProcess, b: &CpuProcess) -> Ordering {
    a.arrival_time
        .cmp(&b.arrival_time)
        .then_with(|| a.burst_time.cmp(&b.burst_time))
        .then_with(|| a.name.cmp(&b.name))
}

/// Priority (lower value first, unprioritised last), then arrival time, then
/// burst time, then name.
pub fn by_priority(a: &CpuProcess, b: &CpuProcess) -> Ordering {
    let rank = |p: &CpuProcess| (p.priority.is_none(), p.priority);
    rank(a)
        .cmp(&rank(b))
        .then_with(|| a.arrival_time.cmp(&b.arrival_time))
        .then_with(|| a.burst_time.cmp(&b.burst_time))
        .then_with(|| a.name.cmp(&b.name))
}

/// Remaining time, then arrival time, then burst time, then name.
pub fn by_remaining_time(a: &CpuProcess, b: &CpuProcess) -> Ordering {
    a.remaining_time
        .cmp(&b.remaining_time)
        .then_with(|| a.arrival_time.cmp(&b.arrival_time))
        .then_with(|| a.burst_time.cmp(&b.burst_time))
        .then_with(|| a.name.cmp(&b.name))
}
