use super::{NonPreemptive, Scheduler, run_to_completion};
use crate::core::{
    SchedEvent, SimError, order,
    state::{ProcessOrder, SchedCtx},
};

/// Shortest job first, non-preemptive.
///
/// The job queue is kept in burst order. Only when the CPU is free does the
/// ready queue take in a new process, and then exactly one: the shortest
/// arrived job not admitted yet. Jobs arriving while another runs wait for
/// the next process boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sjf;

impl NonPreemptive for Sjf {
    fn job_order(&self) -> ProcessOrder {
        order::by_burst_time
    }

    fn refresh(&self, ctx: &mut SchedCtx, _head: usize, boundary: bool) {
        if !boundary {
            return;
        }

        let next = ctx
            .available(ctx.now, true)
            .into_iter()
            .find(|id| !ctx.ready_queue.contains(id));
        if let Some(id) = next {
            ctx.ready_queue.push(id);
        }
    }
}

impl Scheduler for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn dispatch(&self, ctx: &mut SchedCtx) -> Result<Vec<SchedEvent>, SimError> {
        run_to_completion(self, ctx)
    }
}
