//! FAST TCP: delay-based congestion control.
//!
//! The window is adjusted once per RTT ("cycle"), based on how much the RTT measured in that cycle
//! exceeds the smallest RTT ever seen on the connection. This is only done while the host is in
//! [`CaState::Open`]. During loss recovery, and in cycles without enough RTT samples, window
//! growth is delegated to [`NewReno`].

pub mod config;
pub mod control_law;
pub mod mode;

use std::{sync::Arc, time::Duration};

use tracing::{debug, trace, warn};

use crate::{
    metrics,
    rtte::RttEstimator,
    seq_nr::SeqNr,
    socket_state::{CaState, SocketState},
    utils::{bytes_to_segments, segments_to_bytes},
};

use self::mode::CycleAction;
use super::{CongestionOps, new_reno::NewReno};

pub use config::{FastConfig, FastOpts, Variant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerMode {
    #[default]
    Inactive,
    Active,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fast {
    config: Arc<FastConfig>,
    rtte: RttEstimator,
    mode: ControllerMode,

    // Right edge of the current measurement cycle. The cycle closes once it's acked.
    cycle_edge: Option<SeqNr>,

    // Window at the close of the previous cycle, in segments.
    previous_window_segs: f64,
}

impl Default for Fast {
    fn default() -> Self {
        Self::new(Arc::new(FastConfig::default()))
    }
}

impl Fast {
    pub fn new(config: Arc<FastConfig>) -> Self {
        Self {
            rtte: RttEstimator::new(config.rtt_statistic()),
            mode: ControllerMode::Inactive,
            cycle_edge: None,
            previous_window_segs: 0.,
            config,
        }
    }

    pub fn config(&self) -> &FastConfig {
        &self.config
    }

    pub fn mode(&self) -> ControllerMode {
        self.mode
    }

    pub fn rtt_estimator(&self) -> &RttEstimator {
        &self.rtte
    }

    pub fn base_rtt(&self) -> Option<Duration> {
        self.rtte.base_rtt()
    }

    pub fn cycle_edge(&self) -> Option<SeqNr> {
        self.cycle_edge
    }

    pub fn previous_window_segs(&self) -> f64 {
        self.previous_window_segs
    }

    fn advance_cycle_edge(&mut self, next_tx_seq: SeqNr) {
        match self.cycle_edge {
            Some(edge) if next_tx_seq <= edge => {}
            _ => self.cycle_edge = Some(next_tx_seq),
        }
    }

    fn enable(&mut self, state: &SocketState) {
        self.mode = ControllerMode::Active;
        self.advance_cycle_edge(state.next_tx_seq);
        self.rtte.reset();
        self.previous_window_segs = bytes_to_segments(state.cwnd, state.segment_size).unwrap_or(0.);
        debug!(
            cycle_edge=?self.cycle_edge,
            previous_window_segs = self.previous_window_segs,
            "fast: enabled"
        );
    }

    fn disable(&mut self) {
        self.mode = ControllerMode::Inactive;
        debug!("fast: disabled");
    }

    fn close_cycle(&mut self, state: &mut SocketState, segments_acked: u32) {
        self.advance_cycle_edge(state.next_tx_seq);

        let Some(current_window_segs) = bytes_to_segments(state.cwnd, state.segment_size) else {
            warn!("fast: segment_size is 0, skipping cycle");
            self.rtte.reset();
            return;
        };

        let action = mode::select(
            &self.config,
            &self.rtte,
            current_window_segs,
            self.previous_window_segs,
            state.in_slow_start(),
        );

        match action {
            CycleAction::LossBasedIncrease => NewReno::increase_window(state, segments_acked),
            CycleAction::SlowStart => {
                NewReno::slow_start(state, segments_acked);
            }
            CycleAction::MultiplicativeIncrease => {
                state.cwnd = state.cwnd.saturating_add(state.segment_size);
            }
            CycleAction::ApplyControlLaw(law) => {
                state.cwnd = segments_to_bytes(law.new_window_segs, state.segment_size);
            }
            CycleAction::Hold => {}
        }

        if action.raises_ssthresh() {
            let three_quarters = (state.cwnd as u64 * 3 / 4) as u32;
            state.ssthresh = state.ssthresh.max(three_quarters);
        }

        self.previous_window_segs =
            bytes_to_segments(state.cwnd, state.segment_size).unwrap_or(current_window_segs);
        self.rtte.reset();

        trace!(
            action = action.name(),
            cwnd = state.cwnd,
            ssthresh = state.ssthresh,
            cycle_edge=?self.cycle_edge,
            "fast: cycle closed"
        );
        metrics::record_cycle(&action);
    }
}

/// Slow start threshold after a loss: one segment below the current window, but never above the
/// current threshold or below two segments.
pub fn post_loss_threshold(ssthresh: u32, cwnd: u32, segment_size: u32) -> u32 {
    ssthresh
        .min(cwnd.saturating_sub(segment_size))
        .max(segment_size.saturating_mul(2))
}

impl CongestionOps for Fast {
    fn name(&self) -> &'static str {
        "TcpFast"
    }

    fn on_segments_acked(&mut self, state: &mut SocketState, segments_acked: u32, rtt: Duration) {
        self.rtte.observe(rtt);

        if self.mode == ControllerMode::Inactive {
            NewReno::increase_window(state, segments_acked);
            return;
        }

        let Some(edge) = self.cycle_edge else {
            return;
        };

        if state.last_acked_seq >= edge {
            self.close_cycle(state, segments_acked);
        }
    }

    fn on_congestion_state_changed(&mut self, state: &SocketState, new_state: CaState) {
        match (self.mode, new_state.is_open()) {
            (ControllerMode::Inactive, true) => {
                self.enable(state);
                metrics::record_mode_transition();
            }
            (ControllerMode::Active, false) => {
                self.disable();
                metrics::record_mode_transition();
            }
            _ => {}
        }
    }

    fn post_loss_threshold(&self, state: &SocketState, _bytes_in_flight: u32) -> u32 {
        post_loss_threshold(state.ssthresh, state.cwnd, state.segment_size)
    }

    fn fork(&self) -> Box<dyn CongestionOps> {
        Box::new(self.clone())
    }
}
