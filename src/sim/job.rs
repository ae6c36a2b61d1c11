use crate::core::state::{Priority, Ticks};

/// A process description handed to a simulation before it is admitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub name: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: Option<Priority>,
}

impl Job {
    pub fn new(name: impl Into<String>, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            name: name.into(),
            arrival_time,
            burst_time,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}
