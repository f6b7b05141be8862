use std::fs;
use std::path::Path;

/// One process as read from `/proc/[pid]/stat` (plus the `VmRSS:` override
/// from `/proc/[pid]/status`).
///
/// The pid is only a stable identity within a single observation pair:
/// the kernel reuses pids, so a pid seen again after a gap may denote a
/// different process.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessSnapshot {
    pub pid: i32,
    pub name: String,
    pub state: char,
    /// Virtual memory size in bytes.
    pub vsize: u64,
    /// Resident set size in raw pages, straight from the stat line.
    pub rss_pages: u64,
    /// Resident set size in kB. Taken from `VmRSS:` when present (that
    /// source reports post-scaling kilobytes); otherwise converted from
    /// `rss_pages` with the platform page size.
    pub rss_kb: u64,
    /// Accumulated user-mode jiffies.
    pub utime: u64,
    /// Accumulated kernel-mode jiffies.
    pub stime: u64,
    /// Process start time in ticks since boot.
    pub starttime: u64,
}

impl ProcessSnapshot {
    /// Total accumulated CPU ticks, user plus kernel.
    pub fn cpu_ticks(&self) -> u64 {
        self.utime + self.stime
    }
}

/// Parses one `/proc/[pid]/stat` record.
///
/// The process name sits between the first `(` and the *last* `)`; it may
/// itself contain spaces or parentheses, so only the outermost pair
/// delimits it. Everything after the closing paren is positional and
/// whitespace-delimited. Returns `None` only when the pid or the name
/// delimiters are unusable; missing trailing fields stay zero.
pub fn parse_pid_stat(text: &str) -> Option<ProcessSnapshot> {
    let open = text.find('(')?;
    let close = text.rfind(')')?;
    if close < open {
        return None;
    }

    let pid: i32 = text[..open].trim().parse().ok()?;
    let name = text[open + 1..close].to_string();

    // Fields after the name, 0-indexed: state=0, utime=11, stime=12,
    // starttime=19, vsize=20, rss=21 (per the conventional stat layout
    // where utime is field 14 overall).
    let rest: Vec<&str> = text[close + 1..].split_whitespace().collect();
    let field = |i: usize| -> u64 { rest.get(i).and_then(|f| f.parse().ok()).unwrap_or(0) };

    Some(ProcessSnapshot {
        pid,
        name,
        state: rest.first().and_then(|f| f.chars().next()).unwrap_or('?'),
        utime: field(11),
        stime: field(12),
        starttime: field(19),
        vsize: field(20),
        rss_pages: field(21),
        rss_kb: 0, // filled in by read_process
    })
}

/// Extracts the `VmRSS:` kilobyte value from `/proc/[pid]/status` text.
pub fn parse_vm_rss_kb(text: &str) -> Option<u64> {
    text.lines()
        .find(|l| l.starts_with("VmRSS:"))?
        .split_whitespace()
        .nth(1)?
        .parse()
        .ok()
}

/// Kernel page size in kB, for converting raw stat-line page counts.
/// Falls back to the usual 4 kB pages when `sysconf` cannot answer.
pub fn page_size_kb() -> u64 {
    // SAFETY: sysconf with a valid name has no preconditions.
    let bytes = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if bytes > 0 {
        bytes as u64 / 1024
    } else {
        4
    }
}

fn read_process(proc_dir: &Path, pid: i32) -> Option<ProcessSnapshot> {
    let stat = fs::read_to_string(proc_dir.join(pid.to_string()).join("stat")).ok()?;
    let mut snapshot = parse_pid_stat(&stat)?;

    // The status file reports RSS in kB after page scaling; prefer it
    // over converting the raw page count from the stat line.
    let vm_rss = fs::read_to_string(proc_dir.join(pid.to_string()).join("status"))
        .ok()
        .and_then(|status| parse_vm_rss_kb(&status));
    snapshot.rss_kb = vm_rss.unwrap_or_else(|| snapshot.rss_pages * page_size_kb());
    Some(snapshot)
}

/// Enumerates `/proc` and reads every live process.
///
/// Entries whose name is not a positive integer are skipped. A process
/// that exits between the directory listing and the detail read is simply
/// omitted; that race is routine, not an error.
pub fn read_all_processes() -> Vec<ProcessSnapshot> {
    read_all_processes_in(Path::new("/proc"))
}

pub(crate) fn read_all_processes_in(proc_dir: &Path) -> Vec<ProcessSnapshot> {
    let Ok(entries) = fs::read_dir(proc_dir) else {
        log::debug!("failed to enumerate {}", proc_dir.display());
        return Vec::new();
    };

    let mut processes = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(pid) = name.to_str().and_then(|n| n.parse::<i32>().ok()) else {
            continue;
        };
        if pid <= 0 {
            continue;
        }
        if let Some(snapshot) = read_process(proc_dir, pid) {
            processes.push(snapshot);
        }
    }
    processes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_name() {
        let line = "1234 (bash) S 1 1234 1234 34816 1234 4194304 1000 0 0 0 \
            150 80 10 5 20 0 1 0 4321 14029824 1500 18446744073709551615 1 1 0 0 0 0 0";
        let p = parse_pid_stat(line).unwrap();
        assert_eq!(p.pid, 1234);
        assert_eq!(p.name, "bash");
        assert_eq!(p.state, 'S');
        assert_eq!(p.utime, 150);
        assert_eq!(p.stime, 80);
        assert_eq!(p.starttime, 4321);
        assert_eq!(p.vsize, 14029824);
        assert_eq!(p.rss_pages, 1500);
    }

    #[test]
    fn name_with_spaces_and_parens() {
        // Only the outermost parens delimit the name.
        let line = "42 (tmux: server (1)) R 1 42 42 0 -1 4194560 0 0 0 0 \
            7 3 0 0 20 0 1 0 99 1048576 256 18446744073709551615";
        let p = parse_pid_stat(line).unwrap();
        assert_eq!(p.name, "tmux: server (1)");
        assert_eq!(p.state, 'R');
        assert_eq!(p.utime, 7);
        assert_eq!(p.stime, 3);
    }

    #[test]
    fn rejects_unparseable_pid() {
        assert_eq!(parse_pid_stat("abc (x) S 1 2 3"), None);
        assert_eq!(parse_pid_stat("no parens here"), None);
    }

    #[test]
    fn truncated_record_keeps_parsed_fields() {
        let p = parse_pid_stat("7 (init) S 0 7 7 0 -1 0 0 0 0 0 5 2").unwrap();
        assert_eq!(p.pid, 7);
        assert_eq!(p.state, 'S');
        assert_eq!(p.utime, 5);
        assert_eq!(p.stime, 2);
        assert_eq!(p.vsize, 0);
        assert_eq!(p.rss_pages, 0);
    }

    #[test]
    fn vm_rss_from_status() {
        let status = "Name:\tbash\nUmask:\t0022\nState:\tS (sleeping)\n\
            VmPeak:\t  14000 kB\nVmRSS:\t   1504 kB\nThreads:\t1\n";
        assert_eq!(parse_vm_rss_kb(status), Some(1504));
        assert_eq!(parse_vm_rss_kb("Name:\tbash\n"), None);
    }

    #[test]
    fn cpu_ticks_sums_user_and_kernel() {
        let p = ProcessSnapshot {
            utime: 150,
            stime: 80,
            ..Default::default()
        };
        assert_eq!(p.cpu_ticks(), 230);
    }

    #[test]
    fn enumeration_skips_non_numeric_entries() {
        let dir = std::env::temp_dir().join(format!("sysvis-proc-{}", std::process::id()));
        let pid_dir = dir.join("321");
        fs::create_dir_all(&pid_dir).unwrap();
        fs::create_dir_all(dir.join("self")).unwrap();
        fs::write(
            pid_dir.join("stat"),
            "321 (fixture) S 1 321 321 0 -1 0 0 0 0 0 9 4 0 0 20 0 1 0 10 2048 32 0",
        )
        .unwrap();
        fs::write(pid_dir.join("status"), "Name:\tfixture\nVmRSS:\t 128 kB\n").unwrap();

        let procs = read_all_processes_in(&dir);
        assert_eq!(procs.len(), 1);
        assert_eq!(procs[0].pid, 321);
        assert_eq!(procs[0].rss_kb, 128);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_vm_rss_falls_back_to_page_conversion() {
        let dir = std::env::temp_dir().join(format!("sysvis-norss-{}", std::process::id()));
        let pid_dir = dir.join("654");
        fs::create_dir_all(&pid_dir).unwrap();
        fs::write(
            pid_dir.join("stat"),
            "654 (fixture) S 1 654 654 0 -1 0 0 0 0 0 9 4 0 0 20 0 1 0 10 2048 32 0",
        )
        .unwrap();
        // A status file with no VmRSS line, as for kernel threads.
        fs::write(pid_dir.join("status"), "Name:\tfixture\nThreads:\t1\n").unwrap();

        let procs = read_all_processes_in(&dir);
        assert_eq!(procs.len(), 1);
        assert_eq!(procs[0].rss_pages, 32);
        assert_eq!(procs[0].rss_kb, 32 * page_size_kb());

        fs::remove_dir_all(&dir).unwrap();
    }
}
