//! The FAST window update (Jin, Wei, Low, "FAST TCP: Motivation, Architecture, Algorithms,
//! Performance", 2004):
//!
//! ```text
//! target = old_cwnd * base_rtt / cycle_rtt + alpha
//! cwnd   = (1 - gamma) * cwnd + gamma * target
//! ```
//!
//! All windows here are in segments.

use std::time::Duration;

use crate::constants::MIN_WINDOW_SEGMENTS;

use super::config::FastConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlLawOutput {
    pub queueing_delay: Duration,
    pub target_segs: f64,
    pub new_window_segs: f64,
}

/// Runs the control law. Returns None if the inputs can't produce a meaningful window (zero RTTs,
/// non-finite or negative windows); the caller must fall back to loss-based growth then.
pub fn evaluate(
    config: &FastConfig,
    base_rtt: Duration,
    cycle_rtt: Duration,
    current_window_segs: f64,
    previous_window_segs: f64,
) -> Option<ControlLawOutput> {
    if base_rtt.is_zero() || cycle_rtt.is_zero() {
        return None;
    }
    if !(current_window_segs.is_finite() && current_window_segs >= 0.) {
        return None;
    }
    if !(previous_window_segs.is_finite() && previous_window_segs >= 0.) {
        return None;
    }

    let queueing_delay = cycle_rtt.saturating_sub(base_rtt);
    let rtt_ratio = base_rtt.as_secs_f64() / cycle_rtt.as_secs_f64();

    let target_segs = previous_window_segs * rtt_ratio + config.alpha();
    let gamma = config.gamma();
    let mut new_window_segs = (1. - gamma) * current_window_segs + gamma * target_segs;

    if let Some(cap) = config.window_cap_multiplier() {
        new_window_segs = new_window_segs.min(cap * current_window_segs);
    }
    new_window_segs = new_window_segs.max(MIN_WINDOW_SEGMENTS);

    if !(target_segs.is_finite() && new_window_segs.is_finite()) {
        return None;
    }

    Some(ControlLawOutput {
        queueing_delay,
        target_segs,
        new_window_segs,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use approx::assert_abs_diff_eq;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use crate::congestion::fast::config::{FastConfig, FastOpts, Variant};

    use super::evaluate;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn config(alpha: f64, gamma: f64) -> FastConfig {
        FastOpts {
            alpha: Some(alpha),
            gamma: Some(gamma),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_no_queueing_delay_target_is_previous_plus_alpha() {
        let cfg = config(200., 0.5);
        for current in [0., 10., 50., 100., 1000.] {
            let out = evaluate(&cfg, ms(100), ms(100), current, 50.).unwrap();
            assert_eq!(out.queueing_delay, Duration::ZERO);
            assert_abs_diff_eq!(out.target_segs, 250., epsilon = 1e-9);
            assert_abs_diff_eq!(
                out.new_window_segs,
                (1. - 0.5) * current + 0.5 * 250.,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_queueing_delay_shrinks_target() {
        let cfg = config(10., 0.5);
        // base/cycle = 0.5, so target = 100 * 0.5 + 10 = 60.
        let out = evaluate(&cfg, ms(50), ms(100), 100., 100.).unwrap();
        assert_eq!(out.queueing_delay, ms(50));
        assert_abs_diff_eq!(out.target_segs, 60., epsilon = 1e-9);
        assert_abs_diff_eq!(out.new_window_segs, 80., epsilon = 1e-9);
    }

    #[test]
    fn test_gamma_extremes() {
        let keep = evaluate(&config(10., 0.), ms(50), ms(100), 42., 100.).unwrap();
        assert_abs_diff_eq!(keep.new_window_segs, 42., epsilon = 1e-9);

        let jump = evaluate(&config(10., 1.), ms(50), ms(100), 42., 100.).unwrap();
        assert_abs_diff_eq!(jump.new_window_segs, 60., epsilon = 1e-9);
    }

    #[test]
    fn test_floor_of_two_segments() {
        let cfg = config(0., 1.);
        let out = evaluate(&cfg, ms(1), ms(1000), 1., 1.).unwrap();
        assert_eq!(out.new_window_segs, 2.);
    }

    #[test]
    fn test_window_cap() {
        let cfg = FastOpts {
            variant: Variant::MeanBasedWithHysteresis,
            alpha: Some(200.),
            ..Default::default()
        }
        .validate()
        .unwrap();
        // Uncapped this would be 0.5 * 10 + 0.5 * 210 = 110, but at most 3 * 10.
        let out = evaluate(&cfg, ms(100), ms(100), 10., 10.).unwrap();
        assert_abs_diff_eq!(out.new_window_segs, 30., epsilon = 1e-9);

        // The floor wins over the cap.
        let out = evaluate(&cfg, ms(100), ms(100), 0.5, 10.).unwrap();
        assert_eq!(out.new_window_segs, 2.);
    }

    #[test]
    fn test_insufficient_data() {
        let cfg = FastConfig::default();
        assert!(evaluate(&cfg, Duration::ZERO, ms(100), 10., 10.).is_none());
        assert!(evaluate(&cfg, ms(100), Duration::ZERO, 10., 10.).is_none());
        assert!(evaluate(&cfg, Duration::ZERO, Duration::ZERO, 10., 10.).is_none());
        assert!(evaluate(&cfg, ms(100), ms(100), f64::NAN, 10.).is_none());
        assert!(evaluate(&cfg, ms(100), ms(100), 10., f64::INFINITY).is_none());
        assert!(evaluate(&cfg, ms(100), ms(100), -1., 10.).is_none());
    }

    #[test]
    fn test_window_never_below_two_segments() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let cfg = FastOpts {
                variant: if rng.random_bool(0.5) {
                    Variant::MinBased
                } else {
                    Variant::MeanBasedWithHysteresis
                },
                alpha: Some(rng.random_range(0.0..400.0)),
                gamma: Some(rng.random_range(0.0..=1.0)),
                ..Default::default()
            }
            .validate()
            .unwrap();

            let base = Duration::from_micros(rng.random_range(1..1_000_000));
            let cycle = base + Duration::from_micros(rng.random_range(0..5_000_000));
            let current = rng.random_range(0.0..100_000.0);
            let previous = rng.random_range(0.0..100_000.0);

            let out = evaluate(&cfg, base, cycle, current, previous).unwrap();
            assert!(
                out.new_window_segs >= 2.,
                "window {} < 2 for base={base:?} cycle={cycle:?} current={current} previous={previous}",
                out.new_window_segs
            );
        }
    }
}
