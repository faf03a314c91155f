//! Source of "today's" date bucket for the filter shapes.

/// Yields the current date bucket.
pub trait DayClock: Send + Sync {
    fn today(&self) -> i64;
}

/// Local wall clock, canonicalized with [`flickster_catalog::nearest_day`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDayClock;

impl DayClock for SystemDayClock {
    fn today(&self) -> i64 {
        flickster_catalog::today()
    }
}

/// Always reports the same bucket. Useful for tests and replaying a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDayClock(pub i64);

impl DayClock for FixedDayClock {
    fn today(&self) -> i64 {
        self.0
    }
}
