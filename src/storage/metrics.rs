use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Hooks invoked by [`super::SlotTable`] as it mutates and samples slots.
///
/// Implementations collect statistics about slot churn, rehashing, and the
/// sampling strategy chosen by random draws. The graph layer forwards its
/// node table's hooks unchanged.
pub trait TableMetrics: Send + Sync {
    /// Records a key landing in a fresh or recycled slot.
    fn slot_inserted(&self);

    /// Records an insert that overwrote the value of an existing key.
    fn slot_overwritten(&self);

    /// Records a slot being marked deleted.
    fn slot_deleted(&self);

    /// Records a rehash into `buckets` buckets.
    fn rehashed(&self, buckets: usize);

    /// Records a random draw.
    ///
    /// # Parameters
    /// * `rejection` - `true` when rejection sampling served the draw, `false`
    ///   for the sparse-table scan.
    fn random_sample(&self, rejection: bool);
}

/// A no-op implementation of [`TableMetrics`] that discards all recorded metrics.
#[derive(Default)]
pub struct NoopMetrics;

impl TableMetrics for NoopMetrics {
    fn slot_inserted(&self) {}
    fn slot_overwritten(&self) {}
    fn slot_deleted(&self) {}
    fn rehashed(&self, _buckets: usize) {}
    fn random_sample(&self, _rejection: bool) {}
}

/// Counter-based implementation of [`TableMetrics`] backed by atomics.
#[derive(Default)]
pub struct CounterMetrics {
    /// Number of keys inserted into new or recycled slots.
    pub inserts: AtomicU64,

    /// Number of inserts that overwrote an existing key's value.
    pub overwrites: AtomicU64,

    /// Number of slots marked deleted.
    pub deletes: AtomicU64,

    /// Number of rehash passes.
    pub rehashes: AtomicU64,

    /// Bucket count after the most recent rehash.
    pub last_bucket_count: AtomicU64,

    /// Random draws served by rejection sampling.
    pub rejection_samples: AtomicU64,

    /// Random draws served by the sparse scan.
    pub scan_samples: AtomicU64,
}

impl TableMetrics for CounterMetrics {
    fn slot_inserted(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    fn slot_overwritten(&self) {
        self.overwrites.fetch_add(1, Ordering::Relaxed);
    }

    fn slot_deleted(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    fn rehashed(&self, buckets: usize) {
        self.rehashes.fetch_add(1, Ordering::Relaxed);
        self.last_bucket_count.store(buckets as u64, Ordering::Relaxed);
    }

    fn random_sample(&self, rejection: bool) {
        if rejection {
            self.rejection_samples.fetch_add(1, Ordering::Relaxed);
        } else {
            self.scan_samples.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Returns the default metrics implementation wrapped in an [`Arc`].
///
/// The default implementation is [`NoopMetrics`], which discards everything.
pub fn default_metrics() -> Arc<dyn TableMetrics> {
    Arc::new(NoopMetrics)
}
