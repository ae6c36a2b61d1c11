pub mod core;
pub mod memory;
pub mod scheduler;
pub mod sim;

pub use crate::core::{CpuScheduler, SchedEvent, SimError};
pub use memory::{Allocator, FitPolicy, MemoryManager};
pub use scheduler::{CpuPolicy, Scheduler};
