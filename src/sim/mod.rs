pub mod driver;
pub mod job;
pub mod metrics;

pub use driver::{RunReport, Sim};
pub use job::Job;
pub use metrics::{ProcessMetrics, RunSummary};
