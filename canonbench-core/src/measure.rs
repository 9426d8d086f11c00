//! Wall-Clock Timing

use std::time::Instant;

/// Monotonic stopwatch with nanosecond readout
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Nanoseconds since the timer was started
    #[inline(always)]
    pub fn elapsed_ns(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Pin the current thread to a specific core
///
/// Keeps the scheduler from migrating the worker between measurements.
#[cfg(target_os = "linux")]
pub fn pin_to_cpu(cpu: usize) -> Result<(), std::io::Error> {
    use std::mem::MaybeUninit;

    unsafe {
        let mut set = MaybeUninit::<libc::cpu_set_t>::zeroed();
        let set_ref = set.assume_init_mut();

        libc::CPU_ZERO(set_ref);
        libc::CPU_SET(cpu, set_ref);

        let result = libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), set_ref);

        if result == 0 {
            Ok(())
        } else {
            Err(std::io::Error::last_os_error())
        }
    }
}

/// Pin the current thread to a specific core (no-op on this platform)
#[cfg(not(target_os = "linux"))]
pub fn pin_to_cpu(_cpu: usize) -> Result<(), std::io::Error> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_timer() {
        let timer = Timer::start();
        std::thread::sleep(Duration::from_millis(10));
        let nanos = timer.elapsed_ns();

        assert!(nanos >= 5_000_000);
        assert!(nanos < 1_000_000_000);
    }

    #[test]
    fn test_timer_monotonic() {
        let timer = Timer::start();
        let a = timer.elapsed_ns();
        let b = timer.elapsed_ns();
        assert!(b >= a);
    }

    #[test]
    fn test_pin_to_cpu_zero() {
        // CPU 0 exists everywhere; restricted sandboxes may still refuse
        let _ = pin_to_cpu(0);
    }
}
