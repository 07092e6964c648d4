//! FAST TCP congestion control.
//!
//! A delay-based congestion controller, pluggable into any TCP-like transport through the
//! [`CongestionOps`] trait. The host transport owns the connection's [`SocketState`] and reports
//! ACKs (with RTT samples) and congestion state changes; the controller adjusts the congestion
//! window and slow start threshold in place.

#[macro_use]
mod macros;

pub mod congestion;
mod constants;
mod error;
mod metrics;
mod rtte;
mod seq_nr;
mod socket_state;
#[cfg(test)]
mod test_util;
mod utils;

pub use congestion::{
    CongestionConfig, CongestionControllerKind, CongestionOps,
    fast::{ControllerMode, Fast, FastConfig, FastOpts, Variant},
    new_reno::NewReno,
    tracing::TracingController,
};
pub use error::{Error, Result};
pub use rtte::{RttEstimator, RttStatistic};
pub use seq_nr::SeqNr;
pub use socket_state::{CaState, SocketState};
