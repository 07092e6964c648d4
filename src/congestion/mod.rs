pub mod fast;
pub mod new_reno;
pub mod tracing;

use std::time::Duration;

use crate::{
    error::Result,
    socket_state::{CaState, SocketState},
};

use self::{
    fast::{Fast, FastOpts},
    new_reno::NewReno,
    tracing::TracingController,
};

/// Pluggable congestion control strategy, consulted by the host transport.
///
/// All calls for one connection come from the host in order, on one thread at a time. The host's
/// [`SocketState`] is only borrowed for the duration of a call; controllers keep no reference to it.
#[allow(unused_variables)]
pub trait CongestionOps: Send + Sync + core::fmt::Debug {
    fn name(&self) -> &'static str;

    /// New data was cumulatively acknowledged.
    ///
    /// `rtt` is the RTT sample taken from this ACK, or zero if the ACK didn't yield one. The
    /// controller may update `state.cwnd` and `state.ssthresh`.
    fn on_segments_acked(&mut self, state: &mut SocketState, segments_acked: u32, rtt: Duration);

    /// The host switched its congestion state (e.g. entered or left loss recovery).
    fn on_congestion_state_changed(&mut self, state: &SocketState, new_state: CaState) {}

    /// Slow start threshold to use after a loss. Must not modify anything.
    fn post_loss_threshold(&self, state: &SocketState, bytes_in_flight: u32) -> u32;

    /// Duplicate the controller with all of its connection state.
    fn fork(&self) -> Box<dyn CongestionOps>;
}

impl<T: CongestionOps + ?Sized> CongestionOps for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn on_segments_acked(&mut self, state: &mut SocketState, segments_acked: u32, rtt: Duration) {
        (**self).on_segments_acked(state, segments_acked, rtt)
    }

    fn on_congestion_state_changed(&mut self, state: &SocketState, new_state: CaState) {
        (**self).on_congestion_state_changed(state, new_state)
    }

    fn post_loss_threshold(&self, state: &SocketState, bytes_in_flight: u32) -> u32 {
        (**self).post_loss_threshold(state, bytes_in_flight)
    }

    fn fork(&self) -> Box<dyn CongestionOps> {
        (**self).fork()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CongestionControllerKind {
    NewReno,
    #[default]
    Fast,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CongestionConfig {
    pub kind: CongestionControllerKind,
    pub tracing: bool,

    /// Only used if kind is Fast.
    pub fast: FastOpts,
}

impl CongestionConfig {
    pub fn create(&self) -> Result<Box<dyn CongestionOps>> {
        let ops: Box<dyn CongestionOps> = match (self.kind, self.tracing) {
            (CongestionControllerKind::NewReno, true) => {
                ::tracing::debug!("enabling congestion tracing");
                Box::new(TracingController::new(NewReno))
            }
            (CongestionControllerKind::NewReno, false) => Box::new(NewReno),
            (CongestionControllerKind::Fast, tracing) => {
                let fast = Fast::new(self.fast.validate()?.into());
                if tracing {
                    ::tracing::debug!("enabling congestion tracing");
                    Box::new(TracingController::new(fast))
                } else {
                    Box::new(fast)
                }
            }
        };
        Ok(ops)
    }
}
