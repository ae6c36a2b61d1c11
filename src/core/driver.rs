use log::{Level, debug, log, warn};

use super::{
    chart,
    error::SimError,
    event::SchedEvent,
    state::{CpuProcess, Priority, ProcessId, SchedCtx, ScheduleEntry, Ticks},
};
use crate::scheduler::{CpuPolicy, Scheduler};

/// One CPU scheduling simulation: the process set, the policy, and the
/// trace of the last run.
pub struct CpuScheduler<S: Scheduler> {
    pub ctx: SchedCtx,
    pub scheduler: S,
}

impl CpuScheduler<CpuPolicy> {
    pub fn with_policy(policy: CpuPolicy) -> Self {
        Self::new(policy)
    }
}

impl<S: Scheduler> CpuScheduler<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            ctx: SchedCtx::new(),
            scheduler,
        }
    }

    /// Registers a process. A name already in the job queue is logged and
    /// skipped; the existing process stays.
    pub fn create_process(
        &mut self,
        name: impl Into<String>,
        arrival_time: Ticks,
        burst_time: Ticks,
        priority: Option<Priority>,
    ) -> Result<ProcessId, SimError> {
        let mut process = CpuProcess::new(name, arrival_time, burst_time);
        process.priority = priority;

        self.ctx.create_process(process).inspect_err(|err| {
            warn!("{}: {err}", self.scheduler.name());
        })
    }

    pub fn remove_process(&mut self, name: &str) -> Option<CpuProcess> {
        self.ctx.remove_process(name)
    }

    pub fn reset(&mut self) {
        self.ctx.reset();
    }

    /// Runs the whole process set under the configured policy. Any trace
    /// from an earlier run is discarded first.
    pub fn dispatch_processes(&mut self, verbose: bool) -> Result<Vec<SchedEvent>, SimError> {
        let level = if verbose { Level::Info } else { Level::Debug };
        log!(
            level,
            "{} dispatching {} processes",
            self.scheduler.name(),
            self.ctx.job_queue.len()
        );

        self.ctx.rewind();
        let events = self.scheduler.dispatch(&mut self.ctx)?;

        for event in &events {
            log!(level, "{event}");
        }
        debug!(
            "{} finished at t={} with {} schedule entries",
            self.scheduler.name(),
            self.ctx.now,
            self.ctx.schedule.len()
        );

        Ok(events)
    }

    pub fn schedule(&self) -> &[ScheduleEntry] {
        &self.ctx.schedule
    }

    pub fn job_queue(&self) -> Vec<&CpuProcess> {
        self.ctx.job_queue.iter().map(|id| self.ctx.process(*id)).collect()
    }

    pub fn ready_queue(&self) -> Vec<&CpuProcess> {
        self.ctx
            .ready_queue
            .iter()
            .map(|id| self.ctx.process(*id))
            .collect()
    }

    /// Job queue as it stood at tick `at` of the last run.
    pub fn job_queue_at(&self, at: Ticks) -> Option<&[CpuProcess]> {
        let index = usize::try_from(at).ok()?;
        self.ctx.history.job_queues.get(index).map(Vec::as_slice)
    }

    /// Ready queue as it stood at tick `at` of the last run.
    pub fn ready_queue_at(&self, at: Ticks) -> Option<&[CpuProcess]> {
        let index = usize::try_from(at).ok()?;
        self.ctx.history.ready_queues.get(index).map(Vec::as_slice)
    }

    pub fn all_job_queues(&self) -> &[Vec<CpuProcess>] {
        &self.ctx.history.job_queues
    }

    pub fn all_ready_queues(&self) -> &[Vec<CpuProcess>] {
        &self.ctx.history.ready_queues
    }

    pub fn process_by_name(&self, name: &str) -> Option<&CpuProcess> {
        self.ctx.process_by_name(name)
    }

    pub fn render_gantt(&self) -> String {
        chart::render_gantt(&self.ctx.schedule)
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }
}
