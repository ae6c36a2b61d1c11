pub mod fcfs;
pub mod priority;
pub mod rr;
pub mod sjf;
pub mod srtf;

use log::debug;

use crate::core::{
    SchedEvent, SimError,
    observer::Observer,
    state::{ProcessId, ProcessOrder, SchedCtx, ScheduleEntry, Ticks},
};
pub use fcfs::Fcfs;
pub use priority::PriorityScheduler;
pub use rr::RoundRobin;
pub use sjf::Sjf;
pub use srtf::Srtf;

pub const DEFAULT_TIME_QUANTUM: Ticks = 2;

pub trait Scheduler {
    fn name(&self) -> &'static str;

    /// Runs every process in `ctx` to completion, filling the schedule and
    /// the per-tick history.
    fn dispatch(&self, ctx: &mut SchedCtx) -> Result<Vec<SchedEvent>, SimError>;
}

/// The closed set of CPU policies, selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuPolicy {
    Fcfs,
    Sjf,
    Priority,
    RoundRobin { time_quantum: Ticks },
    Srtf,
}

impl CpuPolicy {
    pub const ALL: [CpuPolicy; 5] = [
        CpuPolicy::Fcfs,
        CpuPolicy::Sjf,
        CpuPolicy::Priority,
        CpuPolicy::RoundRobin {
            time_quantum: DEFAULT_TIME_QUANTUM,
        },
        CpuPolicy::Srtf,
    ];

    pub fn is_preemptive(&self) -> bool {
        matches!(self, Self::RoundRobin { .. } | Self::Srtf)
    }
}

impl Scheduler for CpuPolicy {
    fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => Fcfs.name(),
            Self::Sjf => Sjf.name(),
            Self::Priority => PriorityScheduler.name(),
            Self::RoundRobin { time_quantum } => RoundRobin::new(*time_quantum).name(),
            Self::Srtf => Srtf.name(),
        }
    }

    fn dispatch(&self, ctx: &mut SchedCtx) -> Result<Vec<SchedEvent>, SimError> {
        match self {
            Self::Fcfs => Fcfs.dispatch(ctx),
            Self::Sjf => Sjf.dispatch(ctx),
            Self::Priority => PriorityScheduler.dispatch(ctx),
            Self::RoundRobin { time_quantum } => RoundRobin::new(*time_quantum).dispatch(ctx),
            Self::Srtf => Srtf.dispatch(ctx),
        }
    }
}

/// Policy hooks for the shared run-to-completion loop.
pub(crate) trait NonPreemptive: Scheduler {
    /// Order the job queue is sorted into before the run.
    fn job_order(&self) -> ProcessOrder;

    /// Rebuilds the ready queue at the top of a tick. `head` indexes the
    /// process that runs next; `boundary` is true when no process holds the
    /// CPU (start of run, or the previous one just completed).
    fn refresh(&self, ctx: &mut SchedCtx, head: usize, boundary: bool);
}

pub(crate) fn run_to_completion<P: NonPreemptive>(
    policy: &P,
    ctx: &mut SchedCtx,
) -> Result<Vec<SchedEvent>, SimError> {
    ctx.sort_job_queue(policy.job_order());

    let mut events = Vec::new();
    let mut observer = Observer::new();
    let mut head = 0;
    let mut current: Option<ProcessId> = None;

    while !ctx.all_complete() {
        let boundary = current.is_none_or(|id| ctx.process(id).is_complete());
        policy.refresh(ctx, head, boundary);
        ctx.snapshot();

        if !ctx.has_available(ctx.now) {
            let from = ctx.now;
            let ticks = ctx.idle_until_available(|ctx| policy.refresh(ctx, head, boundary));
            events.push(SchedEvent::CpuIdle { from, ticks });
        }

        let id = match current {
            Some(id) if !boundary => id,
            _ => {
                let id = *ctx
                    .ready_queue
                    .get(head)
                    .ok_or(SimError::ReadyQueueExhausted { at: ctx.now, head })?;
                let entry = ScheduleEntry::running(ctx.process(id), ctx.now);
                ctx.open_entry(entry);
                events.push(SchedEvent::Dispatched {
                    process: ctx.process(id).name.clone(),
                    at: ctx.now,
                });
                current = Some(id);
                id
            }
        };

        ctx.execute(id, 1);
        ctx.advance_time(1);

        if ctx.process(id).is_complete() {
            events.push(SchedEvent::Completed {
                process: ctx.process(id).name.clone(),
                at: ctx.now,
            });
            head += 1;
        }

        if ctx.all_complete() {
            ctx.snapshot();
        }
        observer.observe(ctx);
    }

    debug!("{} ran {} observed steps", policy.name(), observer.steps());
    Ok(events)
}

/// Appends arrived processes missing from the ready queue, in `order`.
pub(crate) fn admit_arrivals(ctx: &mut SchedCtx, order: ProcessOrder) {
    let arrived = ctx.sorted(ctx.available(ctx.now, true), order);
    for id in arrived {
        if !ctx.ready_queue.contains(&id) {
            ctx.ready_queue.push(id);
        }
    }
}
