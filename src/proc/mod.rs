//! Readers for the Linux pseudo-files the engine samples.
//!
//! Every reader is split into a pure `parse_*` function over raw text and
//! a thin `read_*` wrapper over the live kernel path, so the parsers can
//! be tested against captured fixture text. Readers never fail loudly: an
//! unreadable source produces a zeroed/empty value and the UI shows
//! neutral output.

mod host;
mod mem;
mod net;
mod process;
mod sensors;
mod stat;

pub use host::*;
pub use mem::*;
pub use net::*;
pub use process::*;
pub use sensors::*;
pub use stat::*;

/// Kernel clock ticks per second, used to convert jiffies to seconds.
/// Falls back to the conventional 100 when `sysconf` cannot answer.
pub fn clock_ticks_per_second() -> u64 {
    // SAFETY: sysconf with a valid name has no preconditions.
    let ticks = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
    if ticks > 0 {
        ticks as u64
    } else {
        100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_ticks_is_positive() {
        assert!(clock_ticks_per_second() > 0);
    }
}
