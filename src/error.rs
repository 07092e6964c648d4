#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("gamma ({gamma}) must be within [0, 1]")]
    GammaOutOfRange { gamma: f64 },

    #[error("alpha ({alpha}) must be a finite non-negative number of packets")]
    InvalidAlpha { alpha: f64 },

    #[error("beta ({beta}) must be a finite non-negative number of packets")]
    InvalidBeta { beta: f64 },

    #[error("beta ({beta}) must not be below alpha ({alpha})")]
    BetaBelowAlpha { alpha: f64, beta: f64 },

    #[error("window cap multiplier ({multiplier}) must be finite and at least 1")]
    InvalidWindowCap { multiplier: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
