use std::time::Duration;

use tracing::Level;

// Target number of packets buffered in the bottleneck queue.
pub const DEFAULT_ALPHA_MIN_BASED: f64 = 250.;
pub const DEFAULT_ALPHA_MEAN_BASED: f64 = 200.;

// Upper edge of the queue occupancy band (hysteresis variant only).
pub const DEFAULT_BETA: f64 = 400.;

pub const DEFAULT_GAMMA: f64 = 0.5;

// Queueing delay below which the hysteresis variant grows by one segment per cycle.
pub const DEFAULT_MI_THRESHOLD: Duration = Duration::from_millis(10);

// With delayed ACKs, fewer samples than this per cycle are not a reliable delay signal.
pub const DEFAULT_MIN_SAMPLES_PER_CYCLE: u32 = 3;

pub const DEFAULT_WINDOW_CAP_MULTIPLIER_MEAN_BASED: f64 = 3.;

// The control law never shrinks the window below this many segments.
pub const MIN_WINDOW_SEGMENTS: f64 = 2.;

pub const CONGESTION_TRACING_LOG_LEVEL: Level = Level::DEBUG;
