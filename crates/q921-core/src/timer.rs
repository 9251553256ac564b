//! T200 (retransmission) and T203 (idle keepalive) bookkeeping.
//!
//! Deadlines are absolute millisecond timestamps on the caller's clock. The
//! set never reads a clock itself; [`TimerSet::poll`] is handed the current
//! time and reports which deadlines have been reached.

/// Timers reported as expired by [`TimerSet::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Expired {
    /// T200 deadline reached
    pub t200: bool,
    /// T203 deadline reached
    pub t203: bool,
}

impl Expired {
    /// Whether any timer expired.
    pub fn any(self) -> bool {
        self.t200 || self.t203
    }
}

/// Deadlines and durations for one trunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSet {
    t200_ms: u64,
    t203_ms: u64,
    t200: Option<u64>,
    t203: Option<u64>,
}

impl TimerSet {
    /// Both timers stopped.
    pub fn new(t200_ms: u64, t203_ms: u64) -> Self {
        Self { t200_ms, t203_ms, t200: None, t203: None }
    }

    /// T200 duration in milliseconds.
    pub fn t200_ms(&self) -> u64 {
        self.t200_ms
    }

    /// T203 duration in milliseconds.
    pub fn t203_ms(&self) -> u64 {
        self.t203_ms
    }

    /// Armed T200 deadline.
    pub fn t200_deadline(&self) -> Option<u64> {
        self.t200
    }

    /// Armed T203 deadline.
    pub fn t203_deadline(&self) -> Option<u64> {
        self.t203
    }

    /// Arm T200 unless it is already running.
    pub fn start_t200(&mut self, now: u64) {
        if self.t200.is_none() {
            self.t200 = Some(now.saturating_add(self.t200_ms));
        }
    }

    /// Disarm T200.
    pub fn stop_t200(&mut self) {
        self.t200 = None;
    }

    /// Arm T203 unless it is already running.
    pub fn start_t203(&mut self, now: u64) {
        if self.t203.is_none() {
            self.restart_t203(now);
        }
    }

    /// Arm T203 from `now`, replacing any running deadline.
    pub fn restart_t203(&mut self, now: u64) {
        self.t203 = Some(now.saturating_add(self.t203_ms));
    }

    /// Disarm T203.
    pub fn stop_t203(&mut self) {
        self.t203 = None;
    }

    /// Disarm both timers.
    pub fn stop_all(&mut self) {
        self.t200 = None;
        self.t203 = None;
    }

    /// Report deadlines that `now` has reached. Does not disarm anything.
    pub fn poll(&self, now: u64) -> Expired {
        Expired {
            t200: self.t200.is_some_and(|deadline| now >= deadline),
            t203: self.t203.is_some_and(|deadline| now >= deadline),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t200_start_does_not_extend_running_deadline() {
        let mut timers = TimerSet::new(1000, 10_000);
        timers.start_t200(0);
        timers.start_t200(500);
        assert_eq!(timers.t200_deadline(), Some(1000));

        timers.stop_t200();
        timers.start_t200(500);
        assert_eq!(timers.t200_deadline(), Some(1500));
    }

    #[test]
    fn t203_restart_pushes_deadline() {
        let mut timers = TimerSet::new(1000, 10_000);
        timers.start_t203(0);
        timers.start_t203(4000);
        assert_eq!(timers.t203_deadline(), Some(10_000));

        timers.restart_t203(4000);
        assert_eq!(timers.t203_deadline(), Some(14_000));
    }

    #[test]
    fn poll_fires_at_deadline() {
        let mut timers = TimerSet::new(1000, 10_000);
        timers.start_t200(0);
        timers.start_t203(0);

        assert!(!timers.poll(999).any());
        assert_eq!(timers.poll(1000), Expired { t200: true, t203: false });
        assert_eq!(timers.poll(10_000), Expired { t200: true, t203: true });

        timers.stop_all();
        assert!(!timers.poll(u64::MAX).any());
    }

    #[test]
    fn arming_near_clock_end_saturates() {
        let mut timers = TimerSet::new(1000, 10_000);
        timers.start_t200(u64::MAX - 10);
        assert_eq!(timers.t200_deadline(), Some(u64::MAX));
    }
}
