pub mod chart;
pub mod driver;
pub mod error;
pub mod event;
pub mod observer;
pub mod order;
pub mod state;

pub use chart::render_gantt;
pub use driver::CpuScheduler;
pub use error::SimError;
pub use event::SchedEvent;
pub use state::{CpuProcess, Occupant, Priority, ProcessId, SchedCtx, ScheduleEntry, Ticks};
