use super::{NonPreemptive, Scheduler, admit_arrivals, run_to_completion};
use crate::core::{
    SchedEvent, SimError, order,
    state::{ProcessOrder, SchedCtx},
};

/// Non-preemptive priority scheduling; a lower value runs first.
///
/// Arrivals join the ready queue every tick and everything behind the head
/// is re-sorted by priority. A process holding the CPU stays at the head
/// until it completes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityScheduler;

impl NonPreemptive for PriorityScheduler {
    fn job_order(&self) -> ProcessOrder {
        order::by_arrival_time
    }

    fn refresh(&self, ctx: &mut SchedCtx, head: usize, boundary: bool) {
        admit_arrivals(ctx, order::by_priority);
        let from = if boundary { head } else { head + 1 };
        ctx.sort_ready_tail(from, order::by_priority);
    }
}

impl Scheduler for PriorityScheduler {
    fn name(&self) -> &'static str {
        "Priority"
    }

    fn dispatch(&self, ctx: &mut SchedCtx) -> Result<Vec<SchedEvent>, SimError> {
        run_to_completion(self, ctx)
    }
}
