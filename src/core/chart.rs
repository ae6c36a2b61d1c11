//! Text Gantt chart of a schedule.
//!
//! ```text
//! 0   1   2       5     7           12       16
//! | - | - | - - - | - - | - - - - - | - - - - |
//!         p2         p3      p1      p4         p5
//! ```
//!
//! Each tick is three columns wide. Idle spans get a bar but no label.

use super::state::ScheduleEntry;

const CELL: usize = 3;

pub fn render_gantt(schedule: &[ScheduleEntry]) -> String {
    let Some(last) = schedule.last() else {
        return String::new();
    };

    let mut timing = String::new();
    let mut bars = String::new();
    let mut labels = String::new();

    for entry in schedule {
        let width = width(entry);
        let start = entry.time_delta.to_string();

        // The tick label eats into the first cell so later labels line up.
        timing.push_str(&start);
        timing.push_str(&" ".repeat(width.saturating_sub(start.len()) + 1));

        bars.push('|');
        bars.push_str(&" - ".repeat(ticks(entry)));

        let name = if entry.occupant.is_idle() {
            ""
        } else {
            entry.occupant.name()
        };
        let mid = width / 2;
        labels.push(' ');
        labels.push_str(&" ".repeat(mid));
        labels.push_str(name);
        labels.push_str(&" ".repeat(width.saturating_sub(mid + name.len())));
    }

    timing.push_str(&last.end().to_string());
    bars.push('|');

    format!("{}\n{}\n{}", timing, bars, labels.trim_end())
}

// Saturates instead of truncating where usize is narrower than Ticks.
fn ticks(entry: &ScheduleEntry) -> usize {
    usize::try_from(entry.burst_time).unwrap_or(usize::MAX)
}

fn width(entry: &ScheduleEntry) -> usize {
    ticks(entry).saturating_mul(CELL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::CpuProcess;

    fn entry(name: &str, start: u64, burst: u64) -> ScheduleEntry {
        ScheduleEntry {
            burst_time: burst,
            ..ScheduleEntry::running(&CpuProcess::new(name, 0, burst), start)
        }
    }

    #[test]
    fn empty_schedule_renders_nothing() {
        assert_eq!(render_gantt(&[]), "");
    }

    #[test]
    fn bars_are_three_columns_per_tick() {
        let chart = render_gantt(&[entry("p1", 0, 2), entry("p2", 2, 1)]);
        let lines: Vec<_> = chart.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "| -  - | - |");
        assert!(lines[0].starts_with('0'));
        assert!(lines[0].ends_with('3'));
        assert!(lines[2].contains("p1"));
        assert!(lines[2].contains("p2"));
    }

    #[test]
    fn idle_spans_have_no_label() {
        let schedule = [
            ScheduleEntry {
                burst_time: 2,
                ..ScheduleEntry::idle(0)
            },
            entry("p1", 2, 1),
        ];
        let chart = render_gantt(&schedule);
        assert!(!chart.contains("IDLE"));
        assert_eq!(chart.lines().nth(1), Some("| -  - | - |"));
    }

    #[test]
    fn oversized_spans_saturate_width() {
        assert_eq!(width(&entry("p1", 0, 4)), 12);
        assert_eq!(width(&entry("p1", 0, u64::MAX)), usize::MAX);
    }
}
