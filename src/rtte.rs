use std::time::Duration;

use tracing::trace;

/// Which per-cycle statistic is used as the "current RTT".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RttStatistic {
    /// Smallest sample seen in the cycle.
    Min,
    /// Arithmetic mean of all samples in the cycle.
    Mean,
}

/// Tracks the connection's base RTT and a per-cycle RTT statistic.
///
/// The base RTT is the minimum over the whole connection lifetime and approximates the
/// propagation delay. The cycle statistic minus the base RTT is the queueing delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RttEstimator {
    statistic: RttStatistic,

    // None means "infinite", i.e. nothing observed yet.
    base_rtt: Option<Duration>,

    cycle_min: Option<Duration>,
    cycle_sum: Duration,
    sample_count: u32,
}

impl RttEstimator {
    pub fn new(statistic: RttStatistic) -> Self {
        Self {
            statistic,
            base_rtt: None,
            cycle_min: None,
            cycle_sum: Duration::ZERO,
            sample_count: 0,
        }
    }

    /// Record one RTT sample. Zero samples carry no information and are ignored.
    pub fn observe(&mut self, rtt: Duration) {
        if rtt.is_zero() {
            trace!("rtte: ignoring zero rtt sample");
            return;
        }

        self.base_rtt = Some(self.base_rtt.map_or(rtt, |b| b.min(rtt)));
        self.cycle_min = Some(self.cycle_min.map_or(rtt, |m| m.min(rtt)));
        self.cycle_sum = self.cycle_sum.saturating_add(rtt);
        self.sample_count = self.sample_count.saturating_add(1);

        trace!(
            sample=?rtt,
            base_rtt=?self.base_rtt,
            count=self.sample_count,
            "rtte: observed"
        );
    }

    /// Start a new measurement cycle. Base RTT is kept.
    pub fn reset(&mut self) {
        self.cycle_min = None;
        self.cycle_sum = Duration::ZERO;
        self.sample_count = 0;
    }

    pub fn base_rtt(&self) -> Option<Duration> {
        self.base_rtt
    }

    /// The statistic for the current cycle, or None if there were no samples.
    pub fn cycle_rtt(&self) -> Option<Duration> {
        match self.statistic {
            RttStatistic::Min => self.cycle_min,
            RttStatistic::Mean => {
                if self.sample_count == 0 {
                    None
                } else {
                    Some(self.cycle_sum / self.sample_count)
                }
            }
        }
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn statistic(&self) -> RttStatistic {
        self.statistic
    }
}
