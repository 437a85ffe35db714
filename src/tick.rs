use std::time::Duration;

/// Length of one countdown step
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A repeating tick schedule owned by exactly one timer.
///
/// The source does not spawn anything: the owner feeds it elapsed wall time
/// and it reports how many whole periods have passed. Dropping the source
/// cancels it; a new source always starts with an empty accumulator.
#[derive(Debug, PartialEq, Eq)]
pub struct TickSource {
    id: u64,
    period: Duration,
    accumulated: Duration,
}

impl TickSource {
    pub fn new(id: u64, period: Duration) -> Self {
        Self {
            id,
            period,
            accumulated: Duration::ZERO,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time collected towards the next fire
    pub fn pending(&self) -> Duration {
        self.accumulated
    }

    pub fn accumulate(&mut self, elapsed: Duration) {
        self.accumulated = self.accumulated.saturating_add(elapsed);
    }

    /// Consumes one period from the accumulator, returning true if a fire is due
    pub fn take_fire(&mut self) -> bool {
        if self.period.is_zero() || self.accumulated < self.period {
            return false;
        }
        self.accumulated -= self.period;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_full_period() {
        let mut source = TickSource::new(1, TICK_PERIOD);
        source.accumulate(Duration::from_millis(2500));

        assert!(source.take_fire());
        assert!(source.take_fire());
        assert!(!source.take_fire());
        assert_eq!(source.pending(), Duration::from_millis(500));
    }

    #[test]
    fn partial_periods_carry_over() {
        let mut source = TickSource::new(7, TICK_PERIOD);
        for _ in 0..9 {
            source.accumulate(Duration::from_millis(100));
            assert!(!source.take_fire());
        }
        source.accumulate(Duration::from_millis(100));
        assert!(source.take_fire());
        assert_eq!(source.pending(), Duration::ZERO);
        assert_eq!(source.id(), 7);
    }

    #[test]
    fn zero_period_never_fires() {
        let mut source = TickSource::new(1, Duration::ZERO);
        source.accumulate(Duration::from_secs(5));
        assert!(!source.take_fire());
    }
}
