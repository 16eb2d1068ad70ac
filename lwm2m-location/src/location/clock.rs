//! Wall-clock source for observation timestamps.

use chrono::{DateTime, Utc};

/// Source of "now" for stamping position readings.
///
/// The refresh cycle takes its timestamp from here rather than reading the
/// system clock directly, so tests can drive time explicitly.
pub trait Clock: Send + Sync {
    /// Current time in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn test_system_clock_as_trait_object() {
        let clock: Box<dyn Clock> = Box::new(SystemClock);
        let _ = clock.now();
    }
}
