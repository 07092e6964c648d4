use crate::seq_nr::SeqNr;

/// Congestion state of the host transport, as in Linux's `tcp_ca_state`.
///
/// The delay-based controller only distinguishes [`CaState::Open`] from everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaState {
    /// Normal operation, no loss recovery in progress.
    #[default]
    Open,
    /// Duplicate ACKs or SACKs were seen, but no retransmission yet.
    Disorder,
    /// The window was reduced due to an ECN congestion signal.
    Cwr,
    /// Fast recovery after loss detected by duplicate ACKs.
    Recovery,
    /// Retransmission timeout fired.
    Loss,
}

impl CaState {
    pub fn is_open(&self) -> bool {
        matches!(self, CaState::Open)
    }
}

/// The host's congestion state for one connection.
///
/// Owned by the host. Controllers borrow it for the duration of a single event and read/write
/// `cwnd` and `ssthresh` in place. All window values are in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocketState {
    pub cwnd: u32,
    pub ssthresh: u32,
    pub segment_size: u32,

    /// Sequence number of the next byte to be transmitted.
    pub next_tx_seq: SeqNr,
    /// Highest cumulatively acknowledged sequence number.
    pub last_acked_seq: SeqNr,
}

impl SocketState {
    pub fn new(segment_size: u32, initial_cwnd_segments: u32) -> Self {
        Self {
            cwnd: segment_size.saturating_mul(initial_cwnd_segments),
            ssthresh: u32::MAX,
            segment_size,
            next_tx_seq: SeqNr(0),
            last_acked_seq: SeqNr(0),
        }
    }

    pub fn cwnd_in_segments(&self) -> u32 {
        self.cwnd.checked_div(self.segment_size).unwrap_or(0)
    }

    pub fn in_slow_start(&self) -> bool {
        self.cwnd < self.ssthresh
    }
}
