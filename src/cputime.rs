//! CPU time of the calling thread.
//!
//! Solver tasks report how much CPU they burned, which is a different clock
//! from the watchdog's wall-clock deadline. Off unix there is no portable
//! per-thread CPU clock, so wall time stands in.

use std::time::Duration;
#[cfg(not(unix))]
use std::time::Instant;

/// Measures CPU time consumed by the thread that started it.
///
/// Only meaningful when `elapsed` is called on the same thread as `start`.
#[derive(Debug, Clone, Copy)]
pub struct CpuStopwatch {
    #[cfg(unix)]
    start: Duration,
    #[cfg(not(unix))]
    start: Instant,
}

impl CpuStopwatch {
    #[cfg(unix)]
    pub fn start() -> Self {
        Self {
            start: thread_cpu_time(),
        }
    }

    #[cfg(not(unix))]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    #[cfg(unix)]
    pub fn elapsed(&self) -> Duration {
        thread_cpu_time().saturating_sub(self.start)
    }

    #[cfg(not(unix))]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(unix)]
pub fn thread_cpu_time() -> Duration {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // SAFETY: `ts` is a valid, exclusively borrowed timespec for the call.
    let rc = unsafe { libc::clock_gettime(libc::CLOCK_THREAD_CPUTIME_ID, &mut ts) };
    if rc != 0 {
        return Duration::ZERO;
    }
    Duration::new(ts.tv_sec as u64, ts.tv_nsec as u32)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_busy_thread_accumulates() {
        let clock = CpuStopwatch::start();
        let mut x = 0u64;
        for i in 0..20_000_000u64 {
            x = std::hint::black_box(x.wrapping_mul(31).wrapping_add(i));
        }
        std::hint::black_box(x);
        assert!(clock.elapsed() > Duration::ZERO);
    }

    #[cfg(unix)]
    #[test]
    fn test_sleeping_thread_is_not_charged() {
        let clock = CpuStopwatch::start();
        std::thread::sleep(Duration::from_millis(200));
        assert!(clock.elapsed() < Duration::from_millis(100));
    }
}
