//! Request metrics collection, kept apart from session state.

use std::sync::atomic::{AtomicU64, Ordering};

/// Collector for the process-wide hit counter reported by admin tooling.
///
/// The HTTP layer owns an instance and records hits from its middleware.
/// Nothing in the session subsystem reads or writes it.
pub trait MetricsCollector: Send + Sync + std::fmt::Debug + 'static {
    /// Record one served request.
    fn record_hit(&self);

    /// Number of requests recorded since the last reset.
    fn hits(&self) -> u64;

    /// Reset the counter to zero.
    fn reset(&self);
}

/// Lock-free in-process metrics collector.
#[derive(Debug, Default)]
pub struct AtomicMetrics {
    hits: AtomicU64,
}

impl AtomicMetrics {
    /// Creates a collector starting at zero.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricsCollector for AtomicMetrics {
    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_record_and_reset() {
        let metrics = AtomicMetrics::new();
        metrics.record_hit();
        metrics.record_hit();
        assert_eq!(metrics.hits(), 2);

        metrics.reset();
        assert_eq!(metrics.hits(), 0);
    }

    #[test]
    fn test_concurrent_hits_are_all_counted() {
        let metrics: Arc<dyn MetricsCollector> = Arc::new(AtomicMetrics::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let metrics = Arc::clone(&metrics);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        metrics.record_hit();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread panicked");
        }
        assert_eq!(metrics.hits(), 8000);
    }
}
