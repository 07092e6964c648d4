use std::time::Duration;

use crate::{
    constants::CONGESTION_TRACING_LOG_LEVEL,
    socket_state::{CaState, SocketState},
};

use super::CongestionOps;

/// Wraps a controller and logs every change it makes to the host's cwnd/ssthresh.
#[derive(Debug, Clone)]
pub struct TracingController<I> {
    inner: I,
}

impl<I> TracingController<I> {
    pub fn new(inner: I) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &I {
        &self.inner
    }
}

fn windows(state: &SocketState) -> (u32, u32) {
    (state.cwnd, state.ssthresh)
}

impl<I> CongestionOps for TracingController<I>
where
    I: CongestionOps + Clone + 'static,
{
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn on_segments_acked(&mut self, state: &mut SocketState, segments_acked: u32, rtt: Duration) {
        let inner = &mut self.inner;
        log_every_ms_if_changed!(
            500,
            CONGESTION_TRACING_LOG_LEVEL,
            "on_segments_acked (cwnd, ssthresh)",
            state,
            windows,
            |s| inner.on_segments_acked(s, segments_acked, rtt)
        );
    }

    fn on_congestion_state_changed(&mut self, state: &SocketState, new_state: CaState) {
        tracing::event!(
            CONGESTION_TRACING_LOG_LEVEL,
            name = self.inner.name(),
            ?new_state,
            cwnd = state.cwnd,
            ssthresh = state.ssthresh,
            "congestion state changed"
        );
        self.inner.on_congestion_state_changed(state, new_state);
    }

    fn post_loss_threshold(&self, state: &SocketState, bytes_in_flight: u32) -> u32 {
        self.inner.post_loss_threshold(state, bytes_in_flight)
    }

    fn fork(&self) -> Box<dyn CongestionOps> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{
        congestion::{CongestionOps, fast::Fast, new_reno::NewReno},
        socket_state::CaState,
        test_util::{MockHost, setup_test_logging},
    };

    use super::TracingController;

    #[test]
    fn test_tracing_controller_is_transparent() {
        setup_test_logging();
        let rtt = Duration::from_millis(20);

        let mut traced = MockHost::new(TracingController::new(Fast::default()), 1000, 10);
        let mut plain = MockHost::new(Fast::default(), 1000, 10);
        traced.set_ca_state(CaState::Open);
        plain.set_ca_state(CaState::Open);

        for _ in 0..20 {
            assert_eq!(traced.run_round(rtt), plain.run_round(rtt));
        }
        assert_eq!(traced.cc.inner(), &plain.cc);
    }

    #[test]
    fn test_tracing_controller_delegates_queries() {
        let host = MockHost::new(TracingController::new(NewReno), 1000, 10);
        assert_eq!(host.cc.name(), "TcpNewReno");
        assert_eq!(host.cc.post_loss_threshold(&host.state, 8000), 4000);
        assert_eq!(host.cc.fork().name(), "TcpNewReno");
    }
}
