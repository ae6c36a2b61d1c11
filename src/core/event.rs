use std::fmt;

use super::state::Ticks;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedEvent {
    Dispatched {
        process: String,
        at: Ticks,
    },
    // Taken off the CPU with work left
    Preempted {
        process: String,
        at: Ticks,
        remaining: Ticks,
    },
    Completed {
        process: String,
        at: Ticks,
    },
    // Nothing had arrived, CPU idled for `ticks`
    CpuIdle {
        from: Ticks,
        ticks: Ticks,
    },
}

impl fmt::Display for SchedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispatched { process, at } => write!(f, "[{at}] Spawned Process {process}"),
            Self::Preempted {
                process,
                at,
                remaining,
            } => write!(f, "[{at}] Process {process} preempted, {remaining} left"),
            Self::Completed { process, at } => {
                write!(f, "[{at}] Process {process} finished executing!")
            }
            Self::CpuIdle { from, ticks } => write!(f, "[{from}] CPU Idle... ({ticks} ticks)"),
        }
    }
}
