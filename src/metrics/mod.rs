//! The sampled-metrics engine.
//!
//! Everything here runs inline on the UI thread, once per rendered frame.
//! `MetricsEngine::tick` checks a couple of elapsed-time gates and, when
//! one fires, re-reads the kernel counters and recomputes the derived
//! values. The presentation layer only reads the most recent outputs; the
//! engine is the single writer of all sampling state.

mod history;
mod process;
mod sampler;

pub use history::*;
pub use process::*;
pub use sampler::*;

use std::time::{Duration, Instant};

use crate::proc::{
    self, CpuCounters, DiskUsage, HostInfo, Ipv4Interface, MemInfo, ProcessSnapshot, RxTable,
    TxTable,
};

/// One row of the process table, derived from a `ProcessSnapshot` plus the
/// CPU attribution cache.
#[derive(Debug, Clone, Default)]
pub struct ProcessRow {
    pub pid: i32,
    pub name: String,
    pub state: char,
    pub cpu_percent: f32,
    pub mem_percent: f32,
    pub rss_kb: u64,
}

/// How often the process table and the memory/swap/disk figures refresh.
const TABLE_REFRESH: Duration = Duration::from_secs(1);

/// Owns every sampler, cache and history buffer.
pub struct MetricsEngine {
    host: HostInfo,
    cpu_sampler: CpuSampler,
    rx_sampler: RateSampler,
    tx_sampler: RateSampler,
    proc_cpu: ProcessCpuTracker,
    prev_table_counters: Option<CpuCounters>,

    pub cpu_history: HistoryBuffer,
    pub fan_history: HistoryBuffer,
    pub thermal_history: HistoryBuffer,
    pub rx_history: HistoryBuffer,
    pub tx_history: HistoryBuffer,

    cpu_usage: f32,
    fan_rpm: Option<f32>,
    cpu_temperature: Option<f32>,
    rx_rate: f32,
    tx_rate: f32,
    mem: MemInfo,
    disk: DiskUsage,
    processes: Vec<ProcessRow>,
    rx_table: RxTable,
    tx_table: TxTable,
    ipv4_interfaces: Vec<Ipv4Interface>,

    last_plot_sample: Option<Instant>,
    last_table_refresh: Option<Instant>,
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsEngine {
    pub fn new() -> Self {
        Self {
            host: HostInfo::read(),
            cpu_sampler: CpuSampler::new(),
            rx_sampler: RateSampler::new(),
            tx_sampler: RateSampler::new(),
            proc_cpu: ProcessCpuTracker::new(proc::clock_ticks_per_second()),
            prev_table_counters: None,
            cpu_history: HistoryBuffer::default(),
            fan_history: HistoryBuffer::default(),
            thermal_history: HistoryBuffer::default(),
            rx_history: HistoryBuffer::default(),
            tx_history: HistoryBuffer::default(),
            cpu_usage: 0.0,
            fan_rpm: None,
            cpu_temperature: None,
            rx_rate: 0.0,
            tx_rate: 0.0,
            mem: MemInfo::default(),
            disk: DiskUsage::default(),
            processes: Vec::new(),
            rx_table: RxTable::new(),
            tx_table: TxTable::new(),
            ipv4_interfaces: Vec::new(),
            last_plot_sample: None,
            last_table_refresh: None,
        }
    }

    /// Runs the sampling gates for one frame.
    ///
    /// `plot_fps` bounds how often the plot histories take a sample;
    /// `plots_paused` suspends plot sampling without touching the slower
    /// table refresh. A gate that does not fire this frame is simply
    /// re-evaluated on the next one.
    pub fn tick(&mut self, now: Instant, plot_fps: f32, plots_paused: bool) {
        if !plots_paused && self.plot_gate_open(now, plot_fps) {
            self.sample_plots(now);
        }
        if self.table_gate_open(now) {
            self.refresh_table(now);
        }
    }

    /// Resizes the history buffers when the configured length changed.
    /// Capacity is fixed per buffer lifetime, so a change starts fresh
    /// buffers rather than resizing in place.
    pub fn apply_history_length(&mut self, len: usize) {
        if self.cpu_history.capacity() == len.max(1) {
            return;
        }
        self.cpu_history = HistoryBuffer::new(len);
        self.fan_history = HistoryBuffer::new(len);
        self.thermal_history = HistoryBuffer::new(len);
        self.rx_history = HistoryBuffer::new(len);
        self.tx_history = HistoryBuffer::new(len);
    }

    fn plot_gate_open(&self, now: Instant, plot_fps: f32) -> bool {
        let interval = Duration::from_secs_f32(1.0 / plot_fps.clamp(1.0, 120.0));
        match self.last_plot_sample {
            Some(last) => now.saturating_duration_since(last) >= interval,
            None => true,
        }
    }

    fn table_gate_open(&self, now: Instant) -> bool {
        match self.last_table_refresh {
            Some(last) => now.saturating_duration_since(last) >= TABLE_REFRESH,
            None => true,
        }
    }

    /// Fast-cadence sampling: CPU usage, sensors, network rates, and the
    /// history buffers behind the rolling plots.
    fn sample_plots(&mut self, now: Instant) {
        self.cpu_usage = self.cpu_sampler.sample(proc::read_cpu_counters());
        self.cpu_history.push(self.cpu_usage);

        // A missing sensor leaves its history empty; pushing zeros would
        // draw a flat line where there is nothing to show.
        self.fan_rpm = proc::read_fan_rpm();
        if let Some(rpm) = self.fan_rpm {
            self.fan_history.push(rpm);
        }

        self.cpu_temperature = proc::read_cpu_temperature();
        if let Some(temp) = self.cpu_temperature {
            self.thermal_history.push(temp);
        }

        let elapsed = self
            .last_plot_sample
            .map(|last| now.saturating_duration_since(last).as_secs_f64())
            .unwrap_or(0.0);
        let (rx, tx) = proc::read_net_counters();
        self.rx_rate = self.rx_sampler.sample(proc::total_rx_bytes(&rx), elapsed);
        self.tx_rate = self.tx_sampler.sample(proc::total_tx_bytes(&tx), elapsed);
        self.rx_history.push(self.rx_rate);
        self.tx_history.push(self.tx_rate);
        self.rx_table = rx;
        self.tx_table = tx;

        self.last_plot_sample = Some(now);
    }

    /// Slow-cadence refresh: memory/swap/disk totals, the process table
    /// with per-process CPU attribution, and interface addresses.
    fn refresh_table(&mut self, now: Instant) {
        self.mem = proc::read_mem_info();
        self.disk = proc::read_disk_usage();
        self.ipv4_interfaces = proc::read_ipv4_interfaces();

        let counters = proc::read_cpu_counters();
        let system_delta = match self.prev_table_counters {
            Some(prev) if !counters.regressed_from(&prev) => counters.total() - prev.total(),
            _ => 0,
        };
        self.prev_table_counters = Some(counters);

        let snapshots = proc::read_all_processes();
        let total_ram = self.mem.total_ram_bytes();
        self.processes = snapshots
            .iter()
            .map(|p| self.process_row(p, system_delta, total_ram, now))
            .collect();

        let live: Vec<i32> = snapshots.iter().map(|p| p.pid).collect();
        self.proc_cpu.retain_pids(&live);

        log::debug!(
            "refreshed table: {} processes, ram {:.1}%, disk {:.1}%",
            self.processes.len(),
            self.mem.ram_percent(),
            self.disk.percent()
        );
        self.last_table_refresh = Some(now);
    }

    fn process_row(
        &mut self,
        snapshot: &ProcessSnapshot,
        system_delta: u64,
        total_ram: u64,
        now: Instant,
    ) -> ProcessRow {
        ProcessRow {
            pid: snapshot.pid,
            name: snapshot.name.clone(),
            state: snapshot.state,
            cpu_percent: self
                .proc_cpu
                .attribute(snapshot.pid, snapshot.cpu_ticks(), system_delta, now),
            mem_percent: memory_percent(snapshot.rss_kb * 1024, total_ram),
            rss_kb: snapshot.rss_kb,
        }
    }

    // Read-only accessors for the presentation layer.

    pub fn host(&self) -> &HostInfo {
        &self.host
    }

    pub fn cpu_usage(&self) -> f32 {
        self.cpu_usage
    }

    pub fn fan_rpm(&self) -> Option<f32> {
        self.fan_rpm
    }

    pub fn cpu_temperature(&self) -> Option<f32> {
        self.cpu_temperature
    }

    pub fn rx_rate(&self) -> f32 {
        self.rx_rate
    }

    pub fn tx_rate(&self) -> f32 {
        self.tx_rate
    }

    pub fn mem(&self) -> &MemInfo {
        &self.mem
    }

    pub fn disk(&self) -> &DiskUsage {
        &self.disk
    }

    pub fn processes(&self) -> &[ProcessRow] {
        &self.processes
    }

    pub fn rx_table(&self) -> &RxTable {
        &self.rx_table
    }

    pub fn tx_table(&self) -> &TxTable {
        &self.tx_table
    }

    pub fn ipv4_interfaces(&self) -> &[Ipv4Interface] {
        &self.ipv4_interfaces
    }
}
