use ossim::{
    CpuPolicy, CpuScheduler, SchedEvent,
    core::{CpuProcess, Occupant, ScheduleEntry},
    scheduler::RoundRobin,
};

fn spans(schedule: &[ScheduleEntry]) -> Vec<(String, u64, u64)> {
    schedule
        .iter()
        .map(|e| (e.occupant.to_string(), e.time_delta, e.end()))
        .collect()
}

fn span(name: &str, start: u64, end: u64) -> (String, u64, u64) {
    (name.to_string(), start, end)
}

#[test]
fn fcfs_runs_back_to_back() {
    let mut sched = CpuScheduler::with_policy(CpuPolicy::Fcfs);
    sched.create_process("p1", 0, 3, None).unwrap();
    sched.create_process("p2", 1, 2, None).unwrap();
    sched.create_process("p3", 2, 4, None).unwrap();
    sched.dispatch_processes(true).unwrap();

    assert_eq!(
        spans(sched.schedule()),
        [span("p1", 0, 3), span("p2", 3, 5), span("p3", 5, 9)]
    );
    assert!(sched.schedule().iter().all(|e| !e.occupant.is_idle()));
    assert_eq!(sched.now(), 9);
}

#[test]
fn round_robin_quantum_three() {
    let mut sched = CpuScheduler::new(RoundRobin::new(3));
    sched.create_process("p1", 1, 8, None).unwrap();
    sched.create_process("p2", 5, 2, None).unwrap();
    let events = sched.dispatch_processes(false).unwrap();

    let first_p1 = &sched.schedule()[1];
    assert_eq!(first_p1.occupant, Occupant::Process("p1".into()));
    assert_eq!((first_p1.time_delta, first_p1.burst_time), (1, 3));
    assert_eq!(first_p1.remaining_time, Some(5));

    let burst_of = |name: &str| -> u64 {
        sched
            .schedule()
            .iter()
            .filter(|e| e.occupant.name() == name)
            .map(|e| e.burst_time)
            .sum()
    };
    assert_eq!(burst_of("p1"), 8);
    assert_eq!(burst_of("p2"), 2);

    let p2_done = events
        .iter()
        .position(|e| matches!(e, SchedEvent::Completed { process, .. } if process == "p2"));
    let p1_done = events
        .iter()
        .position(|e| matches!(e, SchedEvent::Completed { process, .. } if process == "p1"));
    assert!(p2_done < p1_done);
}

#[test]
fn priority_entries_carry_priority() {
    let mut sched = CpuScheduler::with_policy(CpuPolicy::Priority);
    sched.create_process("low", 0, 2, Some(5)).unwrap();
    sched.create_process("high", 0, 2, Some(1)).unwrap();
    sched.dispatch_processes(false).unwrap();

    let priorities: Vec<_> = sched.schedule().iter().map(|e| e.priority).collect();
    assert_eq!(priorities, [Some(1), Some(5)]);
}

#[test]
fn srtf_switches_when_shorter_job_arrives() {
    let mut sched = CpuScheduler::with_policy(CpuPolicy::Srtf);
    sched.create_process("long", 0, 6, None).unwrap();
    sched.create_process("short", 2, 1, None).unwrap();
    sched.dispatch_processes(false).unwrap();

    assert_eq!(
        spans(sched.schedule()),
        [span("long", 0, 2), span("short", 2, 3), span("long", 3, 7)]
    );
}

#[test]
fn removed_process_is_not_scheduled() {
    let mut sched = CpuScheduler::with_policy(CpuPolicy::Sjf);
    sched.create_process("keep", 0, 2, None).unwrap();
    sched.create_process("drop", 0, 1, None).unwrap();
    assert_eq!(sched.remove_process("drop").map(|p| p.burst_time), Some(1));
    sched.dispatch_processes(false).unwrap();
    assert_eq!(spans(sched.schedule()), [span("keep", 0, 2)]);
}

#[test]
fn history_answers_point_in_time_queries() {
    let mut sched = CpuScheduler::with_policy(CpuPolicy::Fcfs);
    sched.create_process("p1", 0, 3, None).unwrap();
    sched.create_process("p2", 1, 2, None).unwrap();
    sched.dispatch_processes(false).unwrap();

    assert_eq!(sched.all_job_queues().len(), sched.all_ready_queues().len());
    let at_two: Vec<_> = sched
        .ready_queue_at(2)
        .unwrap()
        .iter()
        .map(|p| (p.name.as_str(), p.remaining_time))
        .collect();
    assert_eq!(at_two, [("p1", 1), ("p2", 2)]);

    let final_jobs = sched.all_job_queues().last().unwrap();
    assert!(final_jobs.iter().all(CpuProcess::is_complete));
}

#[test]
fn schedule_serializes_for_collaborators() {
    let mut sched = CpuScheduler::with_policy(CpuPolicy::Fcfs);
    sched.create_process("p1", 1, 1, None).unwrap();
    sched.dispatch_processes(false).unwrap();

    let json = serde_json::to_string(sched.schedule()).unwrap();
    let back: Vec<ScheduleEntry> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sched.schedule());
    assert!(json.contains("\"Idle\""));
}
