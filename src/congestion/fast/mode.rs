use tracing::trace;

use crate::rtte::RttEstimator;

use super::{
    config::FastConfig,
    control_law::{self, ControlLawOutput},
};

/// What to do with the window when a measurement cycle closes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleAction {
    /// Not enough (or unusable) RTT samples. Behave like the loss-based controller.
    LossBasedIncrease,
    /// Below ssthresh. Delay-based control only applies in congestion avoidance.
    SlowStart,
    /// Queueing delay is negligible, grow by one segment.
    MultiplicativeIncrease,
    /// Set the window to the control law output.
    ApplyControlLaw(ControlLawOutput),
    /// Queue occupancy is within [alpha, beta), leave the window alone.
    Hold,
}

impl CycleAction {
    /// Whether ssthresh should be raised to follow the window after this action.
    pub fn raises_ssthresh(&self) -> bool {
        matches!(
            self,
            CycleAction::SlowStart
                | CycleAction::MultiplicativeIncrease
                | CycleAction::ApplyControlLaw(_)
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            CycleAction::LossBasedIncrease => "loss_based_increase",
            CycleAction::SlowStart => "slow_start",
            CycleAction::MultiplicativeIncrease => "multiplicative_increase",
            CycleAction::ApplyControlLaw(_) => "control_law",
            CycleAction::Hold => "hold",
        }
    }
}

/// Decide the action for a closed cycle.
pub fn select(
    config: &FastConfig,
    rtte: &RttEstimator,
    current_window_segs: f64,
    previous_window_segs: f64,
    in_slow_start: bool,
) -> CycleAction {
    let sample_count = rtte.sample_count();
    if sample_count < config.min_samples_per_cycle() {
        trace!(sample_count, "not enough rtt samples in cycle");
        return CycleAction::LossBasedIncrease;
    }

    let (Some(base_rtt), Some(cycle_rtt)) = (rtte.base_rtt(), rtte.cycle_rtt()) else {
        trace!("no rtt statistics for cycle");
        return CycleAction::LossBasedIncrease;
    };

    let Some(law) = control_law::evaluate(
        config,
        base_rtt,
        cycle_rtt,
        current_window_segs,
        previous_window_segs,
    ) else {
        trace!(?base_rtt, ?cycle_rtt, "control law has insufficient data");
        return CycleAction::LossBasedIncrease;
    };

    trace!(
        ?base_rtt,
        ?cycle_rtt,
        queueing_delay=?law.queueing_delay,
        current_window_segs,
        previous_window_segs,
        target_segs=law.target_segs,
        "cycle statistics"
    );

    let action = if config.variant().has_hysteresis() {
        if law.queueing_delay < config.mi_threshold() {
            CycleAction::MultiplicativeIncrease
        } else {
            // Packets this flow has queued at the bottleneck, times cycle_rtt.
            let occupancy = previous_window_segs * law.queueing_delay.as_secs_f64();
            let cycle_secs = cycle_rtt.as_secs_f64();
            if occupancy < config.alpha() * cycle_secs || occupancy >= config.beta() * cycle_secs {
                CycleAction::ApplyControlLaw(law)
            } else {
                CycleAction::Hold
            }
        }
    } else {
        CycleAction::ApplyControlLaw(law)
    };

    match action {
        CycleAction::MultiplicativeIncrease | CycleAction::ApplyControlLaw(_) if in_slow_start => {
            CycleAction::SlowStart
        }
        action => action,
    }
}
