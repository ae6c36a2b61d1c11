use average::{Estimate, Mean};

use crate::core::state::{CpuProcess, ScheduleEntry, Ticks};

/// Per-process timings derived from a finished schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessMetrics {
    pub name: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub first_run: Ticks,
    pub completion: Ticks,
    /// Ticks the schedule charged to this process.
    pub service: Ticks,
}

impl ProcessMetrics {
    pub fn turnaround(&self) -> Ticks {
        self.completion - self.arrival_time
    }

    pub fn waiting(&self) -> Ticks {
        self.turnaround().saturating_sub(self.burst_time)
    }

    pub fn response(&self) -> Ticks {
        self.first_run - self.arrival_time
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub makespan: Ticks,
    pub idle_ticks: Ticks,
    pub utilisation: f64,
    pub mean_turnaround: f64,
    pub mean_waiting: f64,
    pub mean_response: f64,
}

/// Metrics for every process that appears in `schedule`, in job-queue order.
pub fn process_metrics<'a>(
    schedule: &[ScheduleEntry],
    processes: impl IntoIterator<Item = &'a CpuProcess>,
) -> Vec<ProcessMetrics> {
    processes
        .into_iter()
        .filter_map(|process| {
            let mut runs = schedule.iter().filter(|entry| {
                !entry.occupant.is_idle() && entry.occupant.name() == process.name
            });
            let first = runs.next()?;
            let (completion, service) = runs
                .fold((first.end(), first.burst_time), |(_, service), entry| {
                    (entry.end(), service + entry.burst_time)
                });

            Some(ProcessMetrics {
                name: process.name.clone(),
                arrival_time: process.arrival_time,
                burst_time: process.burst_time,
                first_run: first.time_delta,
                completion,
                service,
            })
        })
        .collect()
}

pub fn summarize(schedule: &[ScheduleEntry], metrics: &[ProcessMetrics]) -> RunSummary {
    let makespan = schedule.last().map_or(0, ScheduleEntry::end);
    let idle_ticks: Ticks = schedule
        .iter()
        .filter(|entry| entry.occupant.is_idle())
        .map(|entry| entry.burst_time)
        .sum();
    let utilisation = if makespan == 0 {
        0.0
    } else {
        (makespan - idle_ticks) as f64 / makespan as f64
    };

    RunSummary {
        makespan,
        idle_ticks,
        utilisation,
        mean_turnaround: avg(metrics.iter().map(|m| m.turnaround() as f64)),
        mean_waiting: avg(metrics.iter().map(|m| m.waiting() as f64)),
        mean_response: avg(metrics.iter().map(|m| m.response() as f64)),
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}
