use std::ffi::CString;
use std::fs;
use std::mem::MaybeUninit;

/// Key totals out of `/proc/meminfo`, all in kB as the kernel reports them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemInfo {
    pub mem_total_kb: u64,
    pub mem_free_kb: u64,
    pub mem_available_kb: u64,
    pub buffers_kb: u64,
    pub cached_kb: u64,
    pub sreclaimable_kb: u64,
    pub swap_total_kb: u64,
    pub swap_free_kb: u64,
}

impl MemInfo {
    /// RAM usage as a percentage of total physical memory.
    ///
    /// Prefers `MemAvailable` (the kernel's own estimate of reclaimable
    /// memory); older kernels without it fall back to `MemFree`.
    pub fn ram_percent(&self) -> f32 {
        if self.mem_total_kb == 0 {
            return 0.0;
        }
        let available = if self.mem_available_kb > 0 {
            self.mem_available_kb
        } else {
            self.mem_free_kb
        };
        let used = self.mem_total_kb.saturating_sub(available);
        used as f32 / self.mem_total_kb as f32 * 100.0
    }

    /// Swap usage percentage; 0 when no swap is configured.
    pub fn swap_percent(&self) -> f32 {
        if self.swap_total_kb == 0 {
            return 0.0;
        }
        let used = self.swap_total_kb.saturating_sub(self.swap_free_kb);
        used as f32 / self.swap_total_kb as f32 * 100.0
    }

    /// Total physical memory in bytes.
    pub fn total_ram_bytes(&self) -> u64 {
        self.mem_total_kb * 1024
    }
}

/// Parses `/proc/meminfo` text (`Key:  value kB` lines). Unknown keys are
/// ignored; missing keys stay zero.
pub fn parse_mem_info(text: &str) -> MemInfo {
    let mut info = MemInfo::default();
    for line in text.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let value: u64 = rest
            .split_whitespace()
            .next()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        match key {
            "MemTotal" => info.mem_total_kb = value,
            "MemFree" => info.mem_free_kb = value,
            "MemAvailable" => info.mem_available_kb = value,
            "Buffers" => info.buffers_kb = value,
            "Cached" => info.cached_kb = value,
            "SReclaimable" => info.sreclaimable_kb = value,
            "SwapTotal" => info.swap_total_kb = value,
            "SwapFree" => info.swap_free_kb = value,
            _ => {}
        }
    }
    info
}

/// Reads current memory totals; zeroed on failure.
pub fn read_mem_info() -> MemInfo {
    match fs::read_to_string("/proc/meminfo") {
        Ok(text) => parse_mem_info(&text),
        Err(e) => {
            log::debug!("failed to read /proc/meminfo: {}", e);
            MemInfo::default()
        }
    }
}

/// Filesystem usage for one mount point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DiskUsage {
    pub total_bytes: u64,
    pub used_bytes: u64,
}

impl DiskUsage {
    pub fn percent(&self) -> f32 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        self.used_bytes as f32 / self.total_bytes as f32 * 100.0
    }
}

/// Queries `statvfs` for the root filesystem. Zeroed on failure.
pub fn read_disk_usage() -> DiskUsage {
    read_disk_usage_at("/")
}

pub fn read_disk_usage_at(mount: &str) -> DiskUsage {
    let Ok(path) = CString::new(mount) else {
        return DiskUsage::default();
    };
    let mut stat = MaybeUninit::<libc::statvfs>::uninit();
    // SAFETY: path is a valid NUL-terminated string and stat points to
    // enough space for one statvfs struct, initialized by the call.
    let rc = unsafe { libc::statvfs(path.as_ptr(), stat.as_mut_ptr()) };
    if rc != 0 {
        log::debug!("statvfs({}) failed", mount);
        return DiskUsage::default();
    }
    let stat = unsafe { stat.assume_init() };

    let block = stat.f_bsize as u64;
    let total = stat.f_blocks as u64 * block;
    let free = stat.f_bfree as u64 * block;
    DiskUsage {
        total_bytes: total,
        used_bytes: total.saturating_sub(free),
    }
}
