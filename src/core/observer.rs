use super::state::{SchedCtx, Ticks};

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SchedCtx) {
        self.step += 1;

        for process in ctx.tasks.values() {
            debug_assert!(
                process.remaining_time <= process.burst_time,
                "Process {} has {} ticks left of a {} tick burst",
                process.name,
                process.remaining_time,
                process.burst_time
            );
        }

        for pair in ctx.schedule.windows(2) {
            debug_assert_eq!(
                pair[0].end(),
                pair[1].time_delta,
                "Gap or overlap between {} and {} in the schedule",
                pair[0].occupant,
                pair[1].occupant
            );
        }

        if let Some(last) = ctx.schedule.last() {
            debug_assert!(
                last.end() <= ctx.now,
                "Schedule entry for {} ends at {} past now={}",
                last.occupant,
                last.end(),
                ctx.now
            );
        }

        // One job/ready snapshot pair per elapsed tick. Per-tick loops take
        // the pair for `now` at the top of the next tick, or right away once
        // everything is complete; round robin takes it at the end of a turn.
        let recorded = Ticks::try_from(ctx.history.len()).unwrap_or(Ticks::MAX);
        debug_assert!(
            recorded == ctx.now || recorded == ctx.now + 1,
            "{recorded} snapshots recorded by now={}",
            ctx.now
        );

        for id in &ctx.ready_queue {
            debug_assert!(
                ctx.tasks.contains_key(*id),
                "Ready queue references an unknown process"
            );
        }
    }
}
