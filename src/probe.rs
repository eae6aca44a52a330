//! Point-in-time process accounting queries.
//!
//! Metrics are best-effort: a query that cannot obtain data returns zero
//! instead of failing the experiment. Nothing here is load-bearing for
//! solution counts.

use std::time::Duration;

/// Total CPU time (user + system) consumed by this process so far.
///
/// Uses `getrusage(RUSAGE_SELF)` on Unix. Returns `Duration::ZERO` on
/// failure or unsupported platforms.
#[cfg(unix)]
pub fn cpu_time() -> Duration {
    // SAFETY: a zeroed rusage is a valid out-parameter, and the error
    // return is handled.
    unsafe {
        let mut usage: libc::rusage = std::mem::zeroed();
        if libc::getrusage(libc::RUSAGE_SELF, &mut usage) != 0 {
            return Duration::ZERO;
        }
        timeval_to_duration(usage.ru_utime) + timeval_to_duration(usage.ru_stime)
    }
}

#[cfg(not(unix))]
pub fn cpu_time() -> Duration {
    Duration::ZERO
}

/// Current resident set size of this process in megabytes.
///
/// Reads `/proc/self/statm` on Linux. Returns `0.0` on failure or
/// unsupported platforms.
#[cfg(target_os = "linux")]
pub fn memory_usage_mb() -> f64 {
    fn resident_bytes() -> Option<u64> {
        let statm = std::fs::read_to_string("/proc/self/statm").ok()?;
        // Second field is the resident page count.
        let pages: u64 = statm.split_whitespace().nth(1)?.parse().ok()?;
        let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        if page_size <= 0 {
            return None;
        }
        Some(pages.saturating_mul(page_size as u64))
    }

    resident_bytes().map_or(0.0, |bytes| bytes as f64 / (1024.0 * 1024.0))
}

#[cfg(not(target_os = "linux"))]
pub fn memory_usage_mb() -> f64 {
    0.0
}

/// Converts a `libc::timeval` to a `Duration`, clamping invalid values.
#[cfg(unix)]
fn timeval_to_duration(tv: libc::timeval) -> Duration {
    let secs = if tv.tv_sec < 0 { 0 } else { tv.tv_sec as u64 };
    // POSIX specifies tv_usec in [0, 999_999].
    let usec = tv.tv_usec.clamp(0, 999_999) as u64;
    Duration::from_secs(secs) + Duration::from_micros(usec)
}
