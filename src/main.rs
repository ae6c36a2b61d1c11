use average::Estimate;
use rand::prelude::*;
use ossim::{
    CpuPolicy, FitPolicy, MemoryManager,
    sim::{Job, Sim},
};

fn main() {
    env_logger::init();

    let jobs = random_jobs(6, 0.5, 1, 8, 5, 42);
    for job in &jobs {
        println!(
            "{} arrives t={} burst={} priority={:?}",
            job.name, job.arrival_time, job.burst_time, job.priority
        );
    }

    let mut turnaround = Vec::new();
    for policy in CpuPolicy::ALL {
        let mut sim = Sim::new(policy, &jobs);
        let report = match sim.run(false) {
            Ok(report) => report,
            Err(err) => {
                eprintln!("{policy:?} failed: {err}");
                continue;
            }
        };

        let kind = if policy.is_preemptive() {
            "preemptive"
        } else {
            "non-preemptive"
        };
        println!("\n{} ({kind})\n{}", report.policy, report.chart);
        println!(
            "makespan={} idle={} utilisation={:.2} turnaround={:.2} waiting={:.2} response={:.2}",
            report.summary.makespan,
            report.summary.idle_ticks,
            report.summary.utilisation,
            report.summary.mean_turnaround,
            report.summary.mean_waiting,
            report.summary.mean_response
        );
        turnaround.push(report.summary.mean_turnaround);
    }
    println!(
        "\nMean turnaround across policies: {:.2} ticks",
        avg(turnaround.into_iter())
    );

    let mut rng = StdRng::seed_from_u64(7);
    for policy in FitPolicy::ALL {
        let mut manager = MemoryManager::with_policy(policy);
        for (i, size) in [100, 500, 200, 300, 600].into_iter().enumerate() {
            manager.create_block(format!("b{}", i + 1), size);
        }
        for i in 0..4 {
            let _ = manager.create_process(format!("p{}", i + 1), rng.random_range(50..=450));
        }

        println!("\n{policy:?}");
        for event in manager.allocate_processes(false) {
            println!("{event}");
        }
    }
}

// Bernoulli arrivals: each tick spawns a job with probability `p_arrival`
// until `count` jobs exist.
fn random_jobs(
    count: usize,
    p_arrival: f64,
    min_burst: u64,
    max_burst: u64,
    max_priority: u32,
    seed: u64,
) -> Vec<Job> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut jobs = Vec::with_capacity(count);

    let mut t = 0;
    while jobs.len() < count {
        if rng.random::<f64>() < p_arrival {
            let burst = rng.random_range(min_burst..=max_burst);
            let priority = rng.random_range(1..=max_priority);
            jobs.push(Job::new(format!("p{}", jobs.len() + 1), t, burst).with_priority(priority));
        }
        t += 1;
    }

    jobs
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<average::Mean>().estimate()
}
