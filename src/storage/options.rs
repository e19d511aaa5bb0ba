use std::fmt;
use std::sync::Arc;

use super::metrics::{default_metrics, TableMetrics};

/// Bucket count of a table before its first rehash.
pub const DEFAULT_INITIAL_BUCKETS: usize = 16;
/// Live entries per bucket tolerated before the bucket index doubles.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 1.0;
/// Largest handle space a table will grow to.
pub const MAX_KEY_IDS: u64 = i64::MAX as u64;
/// Occupancy at or above which node sampling uses rejection sampling.
pub const DEFAULT_SAMPLE_OCCUPANCY: f64 = 0.8;

/// Configuration options supplied when creating a [`super::SlotTable`].
#[derive(Clone)]
pub struct TableOptions {
    /// Minimum bucket count, allocated on the first insert and rounded up to
    /// a power of two.
    pub initial_buckets: usize,
    /// Live entries per bucket that trigger a rehash.
    pub max_load_factor: f64,
    /// Upper bound on `max_key_ids`; allocation past it fails with
    /// `CapacityExceeded`.
    pub key_id_limit: u64,
    /// Metrics sink for slot churn and sampling.
    pub metrics: Arc<dyn TableMetrics>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            initial_buckets: DEFAULT_INITIAL_BUCKETS,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            key_id_limit: MAX_KEY_IDS,
            metrics: default_metrics(),
        }
    }
}

impl TableOptions {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial bucket count.
    pub fn initial_buckets(mut self, buckets: usize) -> Self {
        self.initial_buckets = buckets;
        self
    }

    /// Sets the load factor that triggers a rehash. Non-positive or
    /// non-finite values fall back to the default.
    pub fn max_load_factor(mut self, factor: f64) -> Self {
        self.max_load_factor = if factor.is_finite() && factor > 0.0 {
            factor
        } else {
            DEFAULT_MAX_LOAD_FACTOR
        };
        self
    }

    /// Caps the handle space, clamped to [`MAX_KEY_IDS`].
    pub fn key_id_limit(mut self, limit: u64) -> Self {
        self.key_id_limit = limit.min(MAX_KEY_IDS);
        self
    }

    /// Sets the metrics collection implementation.
    pub fn metrics(mut self, metrics: Arc<dyn TableMetrics>) -> Self {
        self.metrics = metrics;
        self
    }
}

impl fmt::Debug for TableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableOptions")
            .field("initial_buckets", &self.initial_buckets)
            .field("max_load_factor", &self.max_load_factor)
            .field("key_id_limit", &self.key_id_limit)
            .finish_non_exhaustive()
    }
}

/// Configuration options supplied when creating a [`super::UndirectedGraph`].
#[derive(Clone, Debug)]
pub struct GraphOptions {
    /// Options for the node table.
    pub table: TableOptions,
    /// Occupancy threshold handed to the node table's random sampler.
    pub sample_occupancy: f64,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            table: TableOptions::default(),
            sample_occupancy: DEFAULT_SAMPLE_OCCUPANCY,
        }
    }
}

impl GraphOptions {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the node table options.
    pub fn table(mut self, table: TableOptions) -> Self {
        self.table = table;
        self
    }

    /// Sets the occupancy threshold used by [`super::UndirectedGraph::random_node_id`].
    pub fn sample_occupancy(mut self, threshold: f64) -> Self {
        self.sample_occupancy = threshold;
        self
    }
}
