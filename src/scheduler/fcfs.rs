use super::{NonPreemptive, Scheduler, run_to_completion};
use crate::core::{
    SchedEvent, SimError, order,
    state::{ProcessOrder, SchedCtx},
};

/// First come, first served.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl NonPreemptive for Fcfs {
    fn job_order(&self) -> ProcessOrder {
        order::by_arrival_time
    }

    // The job queue is already in arrival order, so every arrived process
    // (finished ones included) lines up behind the head in that order.
    fn refresh(&self, ctx: &mut SchedCtx, _head: usize, _boundary: bool) {
        ctx.ready_queue = ctx.available(ctx.now, true);
    }
}

impl Scheduler for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn dispatch(&self, ctx: &mut SchedCtx) -> Result<Vec<SchedEvent>, SimError> {
        run_to_completion(self, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::test_util::{ctx_with, span, spans};

    #[test]
    fn runs_in_arrival_order() {
        let mut ctx = ctx_with(&[("p3", 2, 4), ("p1", 0, 3), ("p2", 1, 2)]);
        Fcfs.dispatch(&mut ctx).unwrap();
        assert_eq!(
            spans(&ctx),
            [span("p1", 0, 3), span("p2", 3, 2), span("p3", 5, 4)]
        );
        assert_eq!(ctx.now, 9);
    }

    #[test]
    fn idles_until_first_arrival_and_between_gaps() {
        let mut ctx = ctx_with(&[("a", 2, 1), ("b", 5, 2)]);
        let events = Fcfs.dispatch(&mut ctx).unwrap();
        assert_eq!(
            spans(&ctx),
            [
                span("IDLE", 0, 2),
                span("a", 2, 1),
                span("IDLE", 3, 2),
                span("b", 5, 2)
            ]
        );
        assert_eq!(
            events[0],
            SchedEvent::CpuIdle { from: 0, ticks: 2 }
        );
    }

    #[test]
    fn history_has_one_snapshot_per_tick_plus_final() {
        let mut ctx = ctx_with(&[("a", 1, 2)]);
        Fcfs.dispatch(&mut ctx).unwrap();
        // t=0, the idle tick, t=2 and the final state at t=3
        assert_eq!(ctx.history.len(), 4);
        assert!(ctx.history.ready_queues[0].is_empty());
        assert_eq!(ctx.history.job_queues[1][0].remaining_time, 2);
        assert_eq!(ctx.history.ready_queues[2][0].remaining_time, 1);
        assert_eq!(ctx.history.job_queues[3][0].remaining_time, 0);
    }

    #[test]
    fn empty_job_queue_terminates_immediately() {
        let mut ctx = ctx_with(&[]);
        let events = Fcfs.dispatch(&mut ctx).unwrap();
        assert!(events.is_empty());
        assert!(ctx.schedule.is_empty());
        assert!(ctx.history.is_empty());
    }
}
