use crate::proc::CpuCounters;

/// Turns consecutive `/proc/stat` snapshots into a CPU usage percentage.
///
/// Holds the previous snapshot internally; the first call and any tick
/// where a counter regressed both yield 0. The stored baseline always
/// advances to the latest reading, so one bad tick never poisons the next.
#[derive(Debug, Clone, Default)]
pub struct CpuSampler {
    prev: Option<CpuCounters>,
}

impl CpuSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Usage percentage over the interval between the previous snapshot
    /// and `current`, in [0, 100].
    pub fn sample(&mut self, current: CpuCounters) -> f32 {
        let usage = match self.prev {
            Some(prev) if !current.regressed_from(&prev) => {
                let busy = current.busy() - prev.busy();
                let idle = current.idle_total() - prev.idle_total();
                let total = busy + idle;
                if total == 0 {
                    0.0
                } else {
                    busy as f32 / total as f32 * 100.0
                }
            }
            // Cold start, or wraparound/reset: no meaningful delta.
            _ => 0.0,
        };
        self.prev = Some(current);
        usage
    }
}

/// Converts a monotonically increasing byte total into a MiB/s rate.
///
/// One instance per direction; the total is recomputed fresh each tick by
/// summing every interface, so there is no per-interface state here.
#[derive(Debug, Clone, Default)]
pub struct RateSampler {
    prev_total: Option<u64>,
}

const BYTES_PER_MIB: f64 = 1_048_576.0;

impl RateSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rate in MiB/s over `elapsed_secs`. Cold start, counter regression
    /// and non-positive elapsed time all clamp to 0.
    pub fn sample(&mut self, total_bytes: u64, elapsed_secs: f64) -> f32 {
        let rate = match self.prev_total {
            Some(prev) if total_bytes >= prev && elapsed_secs > 0.0 => {
                ((total_bytes - prev) as f64 / elapsed_secs / BYTES_PER_MIB) as f32
            }
            _ => 0.0,
        };
        self.prev_total = Some(total_bytes);
        rate
    }
}
