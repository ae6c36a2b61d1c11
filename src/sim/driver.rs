use super::{
    job::Job,
    metrics::{self, ProcessMetrics, RunSummary},
};
use crate::{
    core::{CpuScheduler, SchedEvent, SimError, state::ScheduleEntry},
    scheduler::Scheduler,
};

/// Everything one policy produced for a workload.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub policy: &'static str,
    pub schedule: Vec<ScheduleEntry>,
    pub events: Vec<SchedEvent>,
    pub metrics: Vec<ProcessMetrics>,
    pub summary: RunSummary,
    pub chart: String,
}

/// Runs a fixed set of jobs under a scheduler and collects the results.
pub struct Sim<S: Scheduler> {
    pub core: CpuScheduler<S>,
}

impl<S: Scheduler> Sim<S> {
    /// Jobs with a name already seen are skipped, as `create_process` does.
    pub fn new(scheduler: S, jobs: &[Job]) -> Self {
        let mut core = CpuScheduler::new(scheduler);
        for job in jobs {
            // Duplicates are logged by the scheduler and otherwise ignored.
            let _ = core.create_process(
                job.name.clone(),
                job.arrival_time,
                job.burst_time,
                job.priority,
            );
        }
        Self { core }
    }

    pub fn run(&mut self, verbose: bool) -> Result<RunReport, SimError> {
        let events = self.core.dispatch_processes(verbose)?;
        let schedule = self.core.schedule().to_vec();
        let metrics = metrics::process_metrics(&schedule, self.core.job_queue());
        let summary = metrics::summarize(&schedule, &metrics);

        Ok(RunReport {
            policy: self.core.scheduler.name(),
            chart: self.core.render_gantt(),
            schedule,
            events,
            metrics,
            summary,
        })
    }

    pub fn all_jobs_completed(&self) -> bool {
        self.core.ctx.all_complete()
    }
}
