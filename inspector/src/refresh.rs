use std::time::Duration;

/// What the gate decided for one incoming value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Enough time has passed; apply the value.
    Accept,
    /// Too soon after the last applied value.
    TooSoon,
    /// The clock did not move forward; the gate was reset.
    ClockReset,
}

/// Rate limiter for feed values.
///
/// Timestamps are whatever monotonic-ish clock the feed delivers (e.g. message receive
/// time since the epoch). A timestamp that is not strictly later than the last applied
/// one means the clock jumped back (a replayed log restarting, simulated time
/// resetting), so the gate forgets its history and the next value is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshGate {
    period: Duration,
    last: Duration,
}

impl RefreshGate {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last: Duration::ZERO,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn set_period(&mut self, period: Duration) {
        self.period = period;
    }

    pub fn last_applied(&self) -> Duration {
        self.last
    }

    pub fn check(&mut self, now: Duration) -> GateDecision {
        if now <= self.last {
            self.last = Duration::ZERO;
            return GateDecision::ClockReset;
        }

        if now - self.last > self.period {
            self.last = now;
            GateDecision::Accept
        } else {
            GateDecision::TooSoon
        }
    }
}
