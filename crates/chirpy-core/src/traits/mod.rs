//! Core traits defined in `chirpy-core` and implemented or consumed by other crates.

pub mod clock;
pub mod metrics;

pub use clock::{Clock, ManualClock, SystemClock};
pub use metrics::{AtomicMetrics, MetricsCollector};
