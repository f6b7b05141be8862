use std::fs;

/// The ten jiffy counters from the aggregate `cpu` line of `/proc/stat`.
///
/// All fields are monotonically non-decreasing for the lifetime of the
/// kernel, except on counter wraparound. Consumers must treat any field
/// that goes backwards as a reset, never as a negative delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuCounters {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
    pub guest: u64,
    pub guest_nice: u64,
}

impl CpuCounters {
    /// Sum of the non-idle counters.
    pub fn busy(&self) -> u64 {
        self.user
            + self.nice
            + self.system
            + self.irq
            + self.softirq
            + self.steal
            + self.guest
            + self.guest_nice
    }

    /// Idle time including I/O wait.
    pub fn idle_total(&self) -> u64 {
        self.idle + self.iowait
    }

    /// Sum of all ten counters.
    pub fn total(&self) -> u64 {
        self.busy() + self.idle_total()
    }

    /// True if any single field went backwards relative to `prev`.
    pub fn regressed_from(&self, prev: &CpuCounters) -> bool {
        self.user < prev.user
            || self.nice < prev.nice
            || self.system < prev.system
            || self.idle < prev.idle
            || self.iowait < prev.iowait
            || self.irq < prev.irq
            || self.softirq < prev.softirq
            || self.steal < prev.steal
            || self.guest < prev.guest
            || self.guest_nice < prev.guest_nice
    }
}

/// Parses the first `cpu ` line out of `/proc/stat` text.
///
/// Missing or malformed fields stay zero; the caller gets a usable struct
/// either way.
pub fn parse_cpu_counters(text: &str) -> CpuCounters {
    let mut counters = CpuCounters::default();
    let Some(line) = text
        .lines()
        .find(|l| l.starts_with("cpu ") || l.starts_with("cpu\t"))
    else {
        return counters;
    };

    let mut fields = line.split_whitespace().skip(1);
    let mut next = || fields.next().and_then(|f| f.parse().ok()).unwrap_or(0);
    counters.user = next();
    counters.nice = next();
    counters.system = next();
    counters.idle = next();
    counters.iowait = next();
    counters.irq = next();
    counters.softirq = next();
    counters.steal = next();
    counters.guest = next();
    counters.guest_nice = next();
    counters
}

/// Reads the current system-wide CPU counters.
///
/// Returns a zeroed snapshot if `/proc/stat` is unreadable; callers must
/// tolerate all-zero input.
pub fn read_cpu_counters() -> CpuCounters {
    match fs::read_to_string("/proc/stat") {
        Ok(text) => parse_cpu_counters(&text),
        Err(e) => {
            log::debug!("failed to read /proc/stat: {}", e);
            CpuCounters::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAT: &str = "\
cpu  100 2 50 850 10 3 4 5 6 7
cpu0 50 1 25 425 5 1 2 2 3 3
intr 12345
ctxt 67890
";

    #[test]
    fn parses_aggregate_line() {
        let c = parse_cpu_counters(STAT);
        assert_eq!(c.user, 100);
        assert_eq!(c.nice, 2);
        assert_eq!(c.system, 50);
        assert_eq!(c.idle, 850);
        assert_eq!(c.iowait, 10);
        assert_eq!(c.irq, 3);
        assert_eq!(c.softirq, 4);
        assert_eq!(c.steal, 5);
        assert_eq!(c.guest, 6);
        assert_eq!(c.guest_nice, 7);
    }

    #[test]
    fn busy_and_idle_sums() {
        let c = parse_cpu_counters(STAT);
        assert_eq!(c.busy(), 100 + 2 + 50 + 3 + 4 + 5 + 6 + 7);
        assert_eq!(c.idle_total(), 850 + 10);
        assert_eq!(c.total(), c.busy() + c.idle_total());
    }

    #[test]
    fn missing_cpu_line_is_zeroed() {
        let c = parse_cpu_counters("intr 1 2 3\nctxt 4\n");
        assert_eq!(c, CpuCounters::default());
    }

    #[test]
    fn short_line_keeps_parsed_prefix() {
        let c = parse_cpu_counters("cpu 100 2 50 850\n");
        assert_eq!(c.user, 100);
        assert_eq!(c.idle, 850);
        assert_eq!(c.steal, 0);
        assert_eq!(c.guest_nice, 0);
    }

    #[test]
    fn detects_field_regression() {
        let prev = parse_cpu_counters(STAT);
        let mut cur = prev;
        assert!(!cur.regressed_from(&prev));
        cur.softirq = prev.softirq - 1;
        assert!(cur.regressed_from(&prev));
    }
}
