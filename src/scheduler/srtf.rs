use log::debug;

use super::Scheduler;
use crate::core::{
    SchedEvent, SimError,
    observer::Observer,
    order,
    state::{ProcessId, SchedCtx, ScheduleEntry},
};

/// Shortest remaining time first, re-evaluated every tick.
///
/// The ready queue holds every arrived process, finished ones included,
/// sorted by remaining time. Finished processes sort to the front, so the
/// head index (the number of completed processes) always lands on the
/// shortest unfinished one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Srtf;

fn refresh(ctx: &mut SchedCtx) {
    let arrived = ctx.available(ctx.now, true);
    ctx.ready_queue = ctx.sorted(arrived, order::by_remaining_time);
}

impl Scheduler for Srtf {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn dispatch(&self, ctx: &mut SchedCtx) -> Result<Vec<SchedEvent>, SimError> {
        ctx.sort_job_queue(order::by_arrival_time);

        let mut events = Vec::new();
        let mut observer = Observer::new();
        let mut head = 0;
        let mut last: Option<ProcessId> = None;

        while !ctx.all_complete() {
            refresh(ctx);
            ctx.snapshot();

            if !ctx.has_available(ctx.now) {
                let from = ctx.now;
                let ticks = ctx.idle_until_available(refresh);
                events.push(SchedEvent::CpuIdle { from, ticks });
            }

            let id = *ctx
                .ready_queue
                .get(head)
                .ok_or(SimError::ReadyQueueExhausted { at: ctx.now, head })?;

            if last != Some(id) {
                if let Some(prev) = last.filter(|prev| !ctx.process(*prev).is_complete()) {
                    events.push(SchedEvent::Preempted {
                        process: ctx.process(prev).name.clone(),
                        at: ctx.now,
                        remaining: ctx.process(prev).remaining_time,
                    });
                }
                let entry = ScheduleEntry::running(ctx.process(id), ctx.now);
                ctx.open_entry(entry);
                events.push(SchedEvent::Dispatched {
                    process: ctx.process(id).name.clone(),
                    at: ctx.now,
                });
            }

            ctx.execute(id, 1);
            ctx.advance_time(1);
            last = Some(id);

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

        debug!("{} ran {} observed steps", self.name(), observer.steps());
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::test_util::{ctx_with, span, spans};

    #[test]
    fn shorter_arrival_takes_over_next_tick() {
        let mut ctx = ctx_with(&[
            ("p1", 0, 7),
            ("p2", 1, 5),
            ("p3", 2, 3),
            ("p4", 3, 1),
            ("p5", 4, 2),
            ("p6", 5, 1),
        ]);
        let events = Srtf.dispatch(&mut ctx).unwrap();
        assert_eq!(
            spans(&ctx),
            [
                span("p1", 0, 1),
                span("p2", 1, 1),
                span("p3", 2, 1),
                span("p4", 3, 1),
                span("p3", 4, 2),
                span("p6", 6, 1),
                span("p5", 7, 2),
                span("p2", 9, 4),
                span("p1", 13, 6),
            ]
        );
        assert!(events.contains(&SchedEvent::Preempted {
            process: "p1".into(),
            at: 1,
            remaining: 6,
        }));
    }

    #[test]
    fn finished_processes_stay_at_the_front() {
        let mut ctx = ctx_with(&[("a", 0, 1), ("b", 0, 2)]);
        Srtf.dispatch(&mut ctx).unwrap();
        let last = ctx.history.ready_queues.last().unwrap();
        assert!(last.iter().all(|p| p.remaining_time == 0));
        assert_eq!(ctx.history.ready_queues[1][0].name, "a");
        assert_eq!(ctx.history.ready_queues[1][1].name, "b");
    }

    #[test]
    fn idles_between_bursts() {
        let mut ctx = ctx_with(&[("a", 0, 1), ("b", 3, 1)]);
        Srtf.dispatch(&mut ctx).unwrap();
        assert_eq!(
            spans(&ctx),
            [span("a", 0, 1), span("IDLE", 1, 2), span("b", 3, 1)]
        );
    }
}
