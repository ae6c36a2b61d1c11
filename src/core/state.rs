use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};
use std::cmp::Ordering;
use std::fmt;

use super::error::SimError;

pub type Ticks = u64;
pub type Priority = u32;

new_key_type! {
    pub struct ProcessId;
}

/// A CPU-bound process. `remaining_time` is the only field mutated by a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuProcess {
    pub name: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub remaining_time: Ticks,
    pub priority: Option<Priority>,
}

impl CpuProcess {
    pub fn new(name: impl Into<String>, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            name: name.into(),
            arrival_time,
            burst_time,
            remaining_time: burst_time,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_time == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    Idle,
    Process(String),
}

impl Occupant {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Idle => "IDLE",
            Self::Process(name) => name,
        }
    }
}

impl fmt::Display for Occupant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One merged run of ticks on the CPU.
///
/// `time_delta` is the tick the entry starts at and `burst_time` the number of
/// ticks it spans. For process entries `remaining_time` is the work left once
/// the entry ends; idle entries carry no process attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub occupant: Occupant,
    pub time_delta: Ticks,
    pub burst_time: Ticks,
    pub arrival_time: Option<Ticks>,
    pub remaining_time: Option<Ticks>,
    pub priority: Option<Priority>,
}

impl ScheduleEntry {
    pub fn idle(time_delta: Ticks) -> Self {
        Self {
            occupant: Occupant::Idle,
            time_delta,
            burst_time: 0,
            arrival_time: None,
            remaining_time: None,
            priority: None,
        }
    }

    pub fn running(process: &CpuProcess, time_delta: Ticks) -> Self {
        Self {
            occupant: Occupant::Process(process.name.clone()),
            time_delta,
            burst_time: 0,
            arrival_time: Some(process.arrival_time),
            remaining_time: Some(process.remaining_time),
            priority: process.priority,
        }
    }

    pub fn end(&self) -> Ticks {
        self.time_delta + self.burst_time
    }
}

/// Owned per-tick copies of the job and ready queues.
#[derive(Debug, Clone, Default)]
pub struct History {
    pub job_queues: Vec<Vec<CpuProcess>>,
    pub ready_queues: Vec<Vec<CpuProcess>>,
}

impl History {
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.job_queues.len(), self.ready_queues.len());
        self.job_queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.job_queues.clear();
        self.ready_queues.clear();
    }
}

pub type ProcessOrder = fn(&CpuProcess, &CpuProcess) -> Ordering;

/// All state owned by one CPU simulation instance.
#[derive(Debug, Default)]
pub struct SchedCtx {
    pub now: Ticks,
    pub tasks: SlotMap<ProcessId, CpuProcess>,
    pub job_queue: Vec<ProcessId>,
    pub ready_queue: Vec<ProcessId>,
    pub schedule: Vec<ScheduleEntry>,
    pub history: History,

    names: FxHashMap<String, ProcessId>,
}

impl SchedCtx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_process(&mut self, process: CpuProcess) -> Result<ProcessId, SimError> {
        if self.names.contains_key(&process.name) {
            return Err(SimError::DuplicateProcess { name: process.name });
        }

        let name = process.name.clone();
        let id = self.tasks.insert(process);
        self.job_queue.push(id);
        self.names.insert(name, id);
        Ok(id)
    }

    pub fn remove_process(&mut self, name: &str) -> Option<CpuProcess> {
        let id = self.names.remove(name)?;
        self.job_queue.retain(|queued| *queued != id);
        self.ready_queue.retain(|queued| *queued != id);
        self.tasks.remove(id)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Puts every process back to its admitted state and drops the previous
    /// run's trace.
    pub fn rewind(&mut self) {
        self.now = 0;
        for process in self.tasks.values_mut() {
            process.remaining_time = process.burst_time;
        }
        self.ready_queue.clear();
        self.schedule.clear();
        self.history.clear();
    }

    pub fn process(&self, id: ProcessId) -> &CpuProcess {
        &self.tasks[id]
    }

    pub fn process_by_name(&self, name: &str) -> Option<&CpuProcess> {
        self.names.get(name).map(|id| &self.tasks[*id])
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    /// Processes that have arrived by `at`, in job-queue order.
    pub fn available(&self, at: Ticks, keep_complete: bool) -> Vec<ProcessId> {
        self.job_queue
            .iter()
            .copied()
            .filter(|id| {
                let process = &self.tasks[*id];
                process.arrival_time <= at && (keep_complete || !process.is_complete())
            })
            .collect()
    }

    pub fn has_available(&self, at: Ticks) -> bool {
        self.job_queue.iter().any(|id| {
            let process = &self.tasks[*id];
            process.arrival_time <= at && !process.is_complete()
        })
    }

    pub fn all_complete(&self) -> bool {
        self.job_queue.iter().all(|id| self.tasks[*id].is_complete())
    }

    pub fn sort_job_queue(&mut self, order: ProcessOrder) {
        let tasks = &self.tasks;
        self.job_queue.sort_by(|a, b| order(&tasks[*a], &tasks[*b]));
    }

    /// Sorts the ready queue from index `from` onwards.
    pub fn sort_ready_tail(&mut self, from: usize, order: ProcessOrder) {
        let tasks = &self.tasks;
        if let Some(tail) = self.ready_queue.get_mut(from..) {
            tail.sort_by(|a, b| order(&tasks[*a], &tasks[*b]));
        }
    }

    pub fn sorted(&self, mut ids: Vec<ProcessId>, order: ProcessOrder) -> Vec<ProcessId> {
        ids.sort_by(|a, b| order(&self.tasks[*a], &self.tasks[*b]));
        ids
    }

    pub fn resolve(&self, ids: &[ProcessId]) -> Vec<CpuProcess> {
        ids.iter().map(|id| self.tasks[*id].clone()).collect()
    }

    pub fn snapshot(&mut self) {
        let job_queue = self.resolve(&self.job_queue);
        let ready_queue = self.resolve(&self.ready_queue);
        self.history.job_queues.push(job_queue);
        self.history.ready_queues.push(ready_queue);
    }

    pub fn open_entry(&mut self, entry: ScheduleEntry) {
        if let Some(last) = self.schedule.last() {
            debug_assert_eq!(
                last.end(),
                entry.time_delta,
                "Schedule entry for {} does not start where the previous one ends",
                entry.occupant
            );
        }
        self.schedule.push(entry);
    }

    /// Charges `ticks` of CPU time to `id` and to the open schedule entry.
    pub fn execute(&mut self, id: ProcessId, ticks: Ticks) {
        let process = &mut self.tasks[id];
        debug_assert!(
            process.remaining_time >= ticks,
            "Process {} cannot run {ticks} ticks with {} remaining",
            process.name,
            process.remaining_time
        );
        process.remaining_time -= ticks;

        if let Some(entry) = self.schedule.last_mut() {
            debug_assert_eq!(entry.occupant.name(), process.name);
            entry.burst_time += ticks;
            entry.remaining_time = Some(process.remaining_time);
        }
    }

    /// Opens an idle entry and stretches it one tick at a time until some
    /// process is available. `refresh` runs before every availability check
    /// so the ready queue tracks arrivals during the gap. Returns the gap
    /// length.
    pub fn idle_until_available(&mut self, mut refresh: impl FnMut(&mut Self)) -> Ticks {
        let start = self.now;
        self.open_entry(ScheduleEntry::idle(start));

        loop {
            refresh(self);
            if self.has_available(self.now) {
                break;
            }

            if let Some(entry) = self.schedule.last_mut() {
                entry.burst_time += 1;
            }
            self.advance_time(1);
            self.snapshot();
        }

        self.now - start
    }
}
