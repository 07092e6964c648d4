use std::time::Duration;

use crate::{
    constants::{
        DEFAULT_ALPHA_MEAN_BASED, DEFAULT_ALPHA_MIN_BASED, DEFAULT_BETA, DEFAULT_GAMMA,
        DEFAULT_MI_THRESHOLD, DEFAULT_MIN_SAMPLES_PER_CYCLE,
        DEFAULT_WINDOW_CAP_MULTIPLIER_MEAN_BASED,
    },
    error::{Error, Result},
    rtte::RttStatistic,
};

/// Flavor of the FAST algorithm.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Cycle RTT is the minimum sample of the cycle by default. The control law runs on every
    /// cycle with enough samples.
    #[default]
    MinBased,

    /// Cycle RTT is the mean of the cycle's samples by default. Small queueing delays grow the
    /// window by one segment per cycle, and the control law only runs while the estimated queue
    /// occupancy is outside of [alpha, beta).
    MeanBasedWithHysteresis,
}

impl Variant {
    /// Default cycle RTT statistic. Can be overridden with [`FastOpts::rtt_statistic`].
    pub fn rtt_statistic(&self) -> RttStatistic {
        match self {
            Variant::MinBased => RttStatistic::Min,
            Variant::MeanBasedWithHysteresis => RttStatistic::Mean,
        }
    }

    pub fn has_hysteresis(&self) -> bool {
        matches!(self, Variant::MeanBasedWithHysteresis)
    }
}

/// User-facing FAST options. Anything left as None gets the variant's default.
#[derive(Debug, Default, Clone, Copy)]
pub struct FastOpts {
    pub variant: Variant,

    /// Per-cycle RTT statistic, if not the variant's.
    pub rtt_statistic: Option<RttStatistic>,

    /// Target number of packets queued at the bottleneck.
    pub alpha: Option<f64>,

    /// Upper edge of the queue occupancy band, in packets. Only used with hysteresis, where it
    /// must not be below alpha.
    pub beta: Option<f64>,

    /// Weight of the target window when smoothing, within [0, 1].
    pub gamma: Option<f64>,

    /// Queueing delay below which the window grows by one segment per cycle instead of
    /// running the control law. Only used with hysteresis.
    pub mi_threshold: Option<Duration>,

    /// Cycles with fewer RTT samples fall back to loss-based window growth.
    pub min_samples_per_cycle: Option<u32>,

    /// Limit one control law step to this multiple of the current window.
    pub window_cap_multiplier: Option<f64>,

    /// Never cap the control law output, even if the variant does by default.
    pub disable_window_cap: bool,
}

impl FastOpts {
    pub fn validate(&self) -> Result<FastConfig> {
        let variant = self.variant;
        let defaults = FastConfig::new(variant);

        let alpha = self.alpha.unwrap_or(defaults.alpha);
        if !alpha.is_finite() || alpha < 0. {
            return Err(Error::InvalidAlpha { alpha });
        }

        let beta = self.beta.unwrap_or(defaults.beta);
        if !beta.is_finite() || beta < 0. {
            return Err(Error::InvalidBeta { beta });
        }
        if variant.has_hysteresis() && beta < alpha {
            return Err(Error::BetaBelowAlpha { alpha, beta });
        }

        let gamma = self.gamma.unwrap_or(defaults.gamma);
        if !(0. ..=1.).contains(&gamma) {
            return Err(Error::GammaOutOfRange { gamma });
        }

        let window_cap_multiplier = if self.disable_window_cap {
            None
        } else {
            self.window_cap_multiplier
                .or(defaults.window_cap_multiplier)
        };
        if let Some(multiplier) = window_cap_multiplier {
            if !multiplier.is_finite() || multiplier < 1. {
                return Err(Error::InvalidWindowCap { multiplier });
            }
        }

        Ok(FastConfig {
            variant,
            rtt_statistic: self.rtt_statistic.unwrap_or(defaults.rtt_statistic),
            alpha,
            beta,
            gamma,
            mi_threshold: self.mi_threshold.unwrap_or(defaults.mi_threshold),
            min_samples_per_cycle: self
                .min_samples_per_cycle
                .unwrap_or(defaults.min_samples_per_cycle),
            window_cap_multiplier,
        })
    }
}

/// Validated, immutable FAST parameters. Shared between connections through an `Arc`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FastConfig {
    variant: Variant,
    rtt_statistic: RttStatistic,
    alpha: f64,
    beta: f64,
    gamma: f64,
    mi_threshold: Duration,
    min_samples_per_cycle: u32,
    window_cap_multiplier: Option<f64>,
}

impl Default for FastConfig {
    fn default() -> Self {
        Self::new(Variant::default())
    }
}

impl FastConfig {
    /// Defaults for the given variant.
    pub fn new(variant: Variant) -> Self {
        let (alpha, window_cap_multiplier) = match variant {
            Variant::MinBased => (DEFAULT_ALPHA_MIN_BASED, None),
            Variant::MeanBasedWithHysteresis => (
                DEFAULT_ALPHA_MEAN_BASED,
                Some(DEFAULT_WINDOW_CAP_MULTIPLIER_MEAN_BASED),
            ),
        };
        Self {
            variant,
            rtt_statistic: variant.rtt_statistic(),
            alpha,
            beta: DEFAULT_BETA,
            gamma: DEFAULT_GAMMA,
            mi_threshold: DEFAULT_MI_THRESHOLD,
            min_samples_per_cycle: DEFAULT_MIN_SAMPLES_PER_CYCLE,
            window_cap_multiplier,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn rtt_statistic(&self) -> RttStatistic {
        self.rtt_statistic
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn mi_threshold(&self) -> Duration {
        self.mi_threshold
    }

    pub fn min_samples_per_cycle(&self) -> u32 {
        self.min_samples_per_cycle
    }

    pub fn window_cap_multiplier(&self) -> Option<f64> {
        self.window_cap_multiplier
    }
}
