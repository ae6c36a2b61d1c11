use log::debug;

use super::{DEFAULT_TIME_QUANTUM, Scheduler};
use crate::core::{
    SchedEvent, SimError,
    observer::Observer,
    order,
    state::{SchedCtx, ScheduleEntry, Ticks},
};

/// Round robin with a fixed time quantum.
///
/// Time advances a whole quantum (or the rest of a burst) at a time. The
/// ready queue is append-only and walked by a head index, so a process shows
/// up once per turn it has been given. One schedule entry is written per
/// turn.
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    time_quantum: Ticks,
}

impl Default for RoundRobin {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_QUANTUM)
    }
}

impl RoundRobin {
    /// A zero quantum is raised to one tick.
    pub fn new(time_quantum: Ticks) -> Self {
        Self {
            time_quantum: time_quantum.max(1),
        }
    }

    pub fn time_quantum(&self) -> Ticks {
        self.time_quantum
    }

    pub fn set_time_quantum(&mut self, time_quantum: Ticks) {
        self.time_quantum = time_quantum.max(1);
    }
}

impl Scheduler for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn dispatch(&self, ctx: &mut SchedCtx) -> Result<Vec<SchedEvent>, SimError> {
        ctx.sort_job_queue(order::by_arrival_time);

        let mut events = Vec::new();
        if ctx.all_complete() {
            return Ok(events);
        }

        let mut observer = Observer::new();
        let mut head = 0;

        // Nothing at t=0: seed the queue with the earliest unfinished
        // arrival and idle up to it on the first turn.
        ctx.ready_queue = ctx.available(ctx.now, false);
        if ctx.ready_queue.is_empty() {
            let first = ctx
                .job_queue
                .iter()
                .copied()
                .find(|id| !ctx.process(*id).is_complete());
            ctx.ready_queue.extend(first);
        }
        ctx.snapshot();

        while !ctx.all_complete() {
            let id = *ctx
                .ready_queue
                .get(head)
                .ok_or(SimError::ReadyQueueExhausted { at: ctx.now, head })?;
            let arrival = ctx.process(id).arrival_time;

            if arrival > ctx.now {
                let from = ctx.now;
                let gap = arrival - from;
                let mut entry = ScheduleEntry::idle(from);
                entry.burst_time = gap;
                ctx.open_entry(entry);
                for _ in 0..gap {
                    ctx.snapshot();
                }
                ctx.advance_time(gap);
                events.push(SchedEvent::CpuIdle { from, ticks: gap });
            }

            let remaining = ctx.process(id).remaining_time;
            let slice = remaining.min(self.time_quantum);
            head += 1;

            if slice > 0 {
                let entry = ScheduleEntry::running(ctx.process(id), ctx.now);
                ctx.open_entry(entry);
                events.push(SchedEvent::Dispatched {
                    process: ctx.process(id).name.clone(),
                    at: ctx.now,
                });

                // One snapshot per tick of the turn; the last one is taken
                // after arrivals are queued below.
                for tick in 0..slice {
                    ctx.execute(id, 1);
                    if tick + 1 < slice {
                        ctx.snapshot();
                    }
                }
                ctx.advance_time(slice);
            }

            let before = ctx.available(ctx.now - slice, false);
            let arrived: Vec<_> = ctx
                .available(ctx.now, false)
                .into_iter()
                .filter(|id| !before.contains(id))
                .collect();
            ctx.ready_queue.extend(arrived);

            let process = ctx.process(id);
            if process.is_complete() {
                events.push(SchedEvent::Completed {
                    process: process.name.clone(),
                    at: ctx.now,
                });
            } else {
                events.push(SchedEvent::Preempted {
                    process: process.name.clone(),
                    at: ctx.now,
                    remaining: process.remaining_time,
                });
                ctx.ready_queue.push(id);
            }

            // Queue ran dry while work is left: pull in the earliest
            // unfinished process, even one that has not arrived yet.
            if head >= ctx.ready_queue.len() {
                let pending: Vec<_> = ctx
                    .job_queue
                    .iter()
                    .copied()
                    .filter(|id| !ctx.process(*id).is_complete())
                    .collect();
                if let Some(next) = ctx.sorted(pending, order::by_arrival_time).first() {
                    ctx.ready_queue.push(*next);
                }
            }

            ctx.snapshot();
            observer.observe(ctx);
        }

        debug!("{} ran {} observed turns", self.name(), observer.steps());
        Ok(events)
    }
}
