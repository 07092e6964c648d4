use std::time::Duration;

use crate::{
    congestion::CongestionOps,
    seq_nr::SeqNr,
    socket_state::{CaState, SocketState},
};

/// A minimal host transport: tracks sequence numbers for one connection and feeds events to the
/// controller the way a TCP implementation would.
#[derive(Debug)]
pub struct MockHost<C> {
    pub state: SocketState,
    pub cc: C,
}

impl<C: CongestionOps> MockHost<C> {
    pub fn new(cc: C, segment_size: u32, initial_cwnd_segments: u32) -> Self {
        Self {
            state: SocketState::new(segment_size, initial_cwnd_segments),
            cc,
        }
    }

    pub fn set_ca_state(&mut self, new_state: CaState) {
        self.cc.on_congestion_state_changed(&self.state, new_state);
    }

    /// Transmit `segments` new segments.
    pub fn send(&mut self, segments: u32) {
        self.state.next_tx_seq += segments * self.state.segment_size;
    }

    /// Transmit as many new segments as the window allows.
    pub fn send_window(&mut self) {
        let in_flight = (self.state.next_tx_seq - self.state.last_acked_seq).max(0) as u32;
        let room = self.state.cwnd.saturating_sub(in_flight);
        self.send(room / self.state.segment_size);
    }

    /// Cumulatively ACK the next segment, with the given RTT sample.
    pub fn ack(&mut self, rtt: Duration) {
        self.state.last_acked_seq += self.state.segment_size;
        self.cc.on_segments_acked(&mut self.state, 1, rtt);
    }

    pub fn outstanding_segments(&self) -> u32 {
        let in_flight = (self.state.next_tx_seq - self.state.last_acked_seq).max(0) as u32;
        in_flight / self.state.segment_size
    }

    /// Send a window worth of data and ACK all of it with the same RTT. Returns (cwnd, ssthresh)
    /// after the last ACK.
    pub fn run_round(&mut self, rtt: Duration) -> (u32, u32) {
        self.send_window();
        while self.outstanding_segments() > 0 {
            self.ack(rtt);
        }
        (self.state.cwnd, self.state.ssthresh)
    }

    pub fn next_tx_seq(&self) -> SeqNr {
        self.state.next_tx_seq
    }
}
