use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Attributes CPU time to individual processes.
///
/// Keeps one cached entry per pid: the last observed tick total, when it
/// was observed, and the percentage computed from it. Calls landing inside
/// the minimum refresh interval return the cached percentage unchanged,
/// which bounds recomputation when the UI polls faster than the kernel
/// counters meaningfully move.
///
/// A pid with no cached baseline reports 0 until a second observation
/// exists; that cold-start tick is expected, not masked.
#[derive(Debug, Clone)]
pub struct ProcessCpuTracker {
    entries: HashMap<i32, Entry>,
    clock_ticks: u64,
    min_refresh: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    cpu_ticks: u64,
    sampled_at: Instant,
    percent: f32,
}

pub const DEFAULT_PROC_CPU_REFRESH: Duration = Duration::from_millis(500);

impl ProcessCpuTracker {
    pub fn new(clock_ticks: u64) -> Self {
        Self::with_refresh(clock_ticks, DEFAULT_PROC_CPU_REFRESH)
    }

    pub fn with_refresh(clock_ticks: u64, min_refresh: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            clock_ticks: clock_ticks.max(1),
            min_refresh,
        }
    }

    /// CPU share for `pid` given its accumulated tick total and the
    /// system-wide jiffy delta bracketing this sample. Clamped to
    /// [0, 100].
    pub fn attribute(&mut self, pid: i32, cpu_ticks: u64, system_delta: u64, now: Instant) -> f32 {
        match self.entries.get_mut(&pid) {
            Some(entry) => {
                let elapsed = now.saturating_duration_since(entry.sampled_at);
                if elapsed < self.min_refresh {
                    return entry.percent;
                }

                let percent = if system_delta == 0 || cpu_ticks < entry.cpu_ticks {
                    // No system activity to attribute against, or the pid
                    // was reused and its counters restarted.
                    0.0
                } else {
                    let tick_delta = (cpu_ticks - entry.cpu_ticks) as f64;
                    let seconds = tick_delta / self.clock_ticks as f64;
                    (seconds / elapsed.as_secs_f64() * 100.0).clamp(0.0, 100.0) as f32
                };

                entry.cpu_ticks = cpu_ticks;
                entry.sampled_at = now;
                entry.percent = percent;
                percent
            }
            None => {
                self.entries.insert(
                    pid,
                    Entry {
                        cpu_ticks,
                        sampled_at: now,
                        percent: 0.0,
                    },
                );
                0.0
            }
        }
    }

    /// Drops cached entries for pids no longer alive. Pids are reused by
    /// the kernel, so a stale baseline must not survive its process.
    pub fn retain_pids(&mut self, live: &[i32]) {
        self.entries.retain(|pid, _| live.contains(pid));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Memory share of one process: resident bytes over total physical RAM.
/// Needs no history, so it lives outside the cache.
pub fn memory_percent(rss_bytes: u64, total_ram_bytes: u64) -> f32 {
    if total_ram_bytes == 0 {
        return 0.0;
    }
    rss_bytes as f32 / total_ram_bytes as f32 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> ProcessCpuTracker {
        ProcessCpuTracker::with_refresh(100, Duration::from_millis(500))
    }

    #[test]
    fn cold_start_reports_zero() {
        let mut t = tracker();
        assert_eq!(t.attribute(1, 1000, 500, Instant::now()), 0.0);
    }

    #[test]
    fn fully_busy_process_is_hundred_percent() {
        let mut t = tracker();
        let start = Instant::now();
        t.attribute(1, 1000, 500, start);
        // 100 extra ticks at 100 ticks/s over 1 real second: the process
        // ran the whole interval, so its share is 100%.
        let percent = t.attribute(1, 1100, 500, start + Duration::from_secs(1));
        assert!((percent - 100.0).abs() < 0.01, "percent was {}", percent);
    }

    #[test]
    fn half_busy_process_is_fifty_percent() {
        let mut t = tracker();
        let start = Instant::now();
        t.attribute(7, 0, 100, start);
        let percent = t.attribute(7, 50, 200, start + Duration::from_secs(1));
        assert!((percent - 50.0).abs() < 0.01);
    }

    #[test]
    fn calls_within_refresh_interval_return_cached_value() {
        let mut t = tracker();
        let start = Instant::now();
        t.attribute(1, 1000, 500, start);
        let computed = t.attribute(1, 1050, 500, start + Duration::from_secs(1));
        // Counters moved again, but 100ms later is inside the interval.
        let cached = t.attribute(1, 9999, 500, start + Duration::from_millis(1100));
        assert_eq!(cached, computed);
    }

    #[test]
    fn zero_system_delta_and_tick_regression_report_zero() {
        let mut t = tracker();
        let start = Instant::now();
        t.attribute(1, 1000, 500, start);
        assert_eq!(t.attribute(1, 1100, 0, start + Duration::from_secs(1)), 0.0);
        // Pid reuse: accumulated ticks went backwards.
        assert_eq!(t.attribute(1, 50, 500, start + Duration::from_secs(2)), 0.0);
        // Baseline advanced to the new reading.
        let percent = t.attribute(1, 150, 500, start + Duration::from_secs(3));
        assert!((percent - 100.0).abs() < 0.01);
    }

    #[test]
    fn result_is_clamped_to_hundred() {
        let mut t = tracker();
        let start = Instant::now();
        t.attribute(1, 0, 500, start);
        // More ticks than wall time allows (multi-core burst).
        let percent = t.attribute(1, 500, 500, start + Duration::from_secs(1));
        assert_eq!(percent, 100.0);
    }

    #[test]
    fn dead_pids_are_pruned() {
        let mut t = tracker();
        let now = Instant::now();
        t.attribute(1, 10, 100, now);
        t.attribute(2, 10, 100, now);
        t.attribute(3, 10, 100, now);
        t.retain_pids(&[2]);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn memory_percent_is_a_plain_ratio() {
        assert_eq!(memory_percent(0, 0), 0.0);
        assert!((memory_percent(1024, 4096) - 25.0).abs() < 0.001);
    }
}
