#[cfg(feature = "export-metrics")]
mod exported {
    use lazy_static::lazy_static;
    use metrics::{Counter, Gauge, Histogram, counter, gauge, histogram};

    pub struct Metrics {
        pub cycles_control_law: Counter,
        pub cycles_hold: Counter,
        pub cycles_loss_based: Counter,
        pub cycles_multiplicative_increase: Counter,
        pub cycles_slow_start: Counter,
        pub mode_transitions: Counter,
        pub queueing_delay: Histogram,
        pub target_window_segments: Gauge,
    }

    impl Metrics {
        pub fn new() -> Self {
            Self {
                cycles_control_law: counter!("fast_cycles_control_law"),
                cycles_hold: counter!("fast_cycles_hold"),
                cycles_loss_based: counter!("fast_cycles_loss_based"),
                cycles_multiplicative_increase: counter!("fast_cycles_multiplicative_increase"),
                cycles_slow_start: counter!("fast_cycles_slow_start"),
                mode_transitions: counter!("fast_mode_transitions"),
                queueing_delay: histogram!("fast_queueing_delay"),
                target_window_segments: gauge!("fast_target_window_segments"),
            }
        }
    }

    lazy_static! {
        pub static ref METRICS: Metrics = Metrics::new();
    }
}

use crate::congestion::fast::mode::CycleAction;

#[allow(unused_variables)]
pub(crate) fn record_cycle(action: &CycleAction) {
    #[cfg(feature = "export-metrics")]
    {
        let m = &exported::METRICS;
        match action {
            CycleAction::LossBasedIncrease => m.cycles_loss_based.increment(1),
            CycleAction::SlowStart => m.cycles_slow_start.increment(1),
            CycleAction::MultiplicativeIncrease => m.cycles_multiplicative_increase.increment(1),
            CycleAction::ApplyControlLaw(out) => {
                m.cycles_control_law.increment(1);
                m.queueing_delay.record(out.queueing_delay.as_secs_f64());
                m.target_window_segments.set(out.target_segs);
            }
            CycleAction::Hold => m.cycles_hold.increment(1),
        }
    }
}

pub(crate) fn record_mode_transition() {
    #[cfg(feature = "export-metrics")]
    exported::METRICS.mode_transitions.increment(1);
}
