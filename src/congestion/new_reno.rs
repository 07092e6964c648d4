use std::time::Duration;

use tracing::warn;

use crate::socket_state::SocketState;

use super::CongestionOps;

/// Standard loss-based window growth: exponential slow start below ssthresh, then roughly one
/// segment per RTT (RFC 5681).
///
/// Stateless, all state lives in the host's [`SocketState`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NewReno;

impl NewReno {
    /// Grow cwnd by one segment per acked segment, without crossing ssthresh.
    ///
    /// Returns how many of the acked segments were not consumed by slow start.
    pub fn slow_start(state: &mut SocketState, segments_acked: u32) -> u32 {
        if segments_acked == 0 || state.segment_size == 0 {
            return 0;
        }

        let before = state.cwnd;
        state.cwnd = before
            .saturating_add(segments_acked.saturating_mul(state.segment_size))
            .min(state.ssthresh)
            .max(before);

        let used = (state.cwnd - before) / state.segment_size;
        segments_acked.saturating_sub(used)
    }

    /// Grow cwnd by about segment_size^2 / cwnd per ACK, at least 1 byte.
    pub fn congestion_avoidance(state: &mut SocketState, segments_acked: u32) {
        if segments_acked == 0 {
            return;
        }

        let adder = if state.cwnd == 0 {
            state.segment_size
        } else {
            let seg = state.segment_size as f64;
            (seg * seg / state.cwnd as f64).max(1.) as u32
        };
        state.cwnd = state.cwnd.saturating_add(adder);
    }

    pub fn increase_window(state: &mut SocketState, mut segments_acked: u32) {
        if state.segment_size == 0 {
            warn!("segment_size is 0, not touching cwnd");
            return;
        }

        if state.in_slow_start() {
            segments_acked = Self::slow_start(state, segments_acked);
        }

        if !state.in_slow_start() {
            Self::congestion_avoidance(state, segments_acked);
        }
    }

    pub fn ssthresh_after_loss(state: &SocketState, bytes_in_flight: u32) -> u32 {
        (bytes_in_flight / 2).max(state.segment_size.saturating_mul(2))
    }
}

impl CongestionOps for NewReno {
    fn name(&self) -> &'static str {
        "TcpNewReno"
    }

    fn on_segments_acked(&mut self, state: &mut SocketState, segments_acked: u32, _rtt: Duration) {
        Self::increase_window(state, segments_acked)
    }

    fn post_loss_threshold(&self, state: &SocketState, bytes_in_flight: u32) -> u32 {
        Self::ssthresh_after_loss(state, bytes_in_flight)
    }

    fn fork(&self) -> Box<dyn CongestionOps> {
        Box::new(*self)
    }
}
