use rand::Rng;
use tracing::trace;

use super::SlotTable;
use crate::types::KeyId;

impl<K, V> SlotTable<K, V> {
    /// Draws a random live handle, or `None` when the table is empty.
    ///
    /// When the fraction of live slots is at least `occupancy_threshold`,
    /// uniform slot indices are drawn until one is live. Below the threshold
    /// the table is considered sparse: a uniform start index is drawn and the
    /// slots are scanned forward, wrapping once, to the first live one.
    pub fn random_key_id<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        occupancy_threshold: f64,
    ) -> Option<KeyId> {
        if self.is_empty() {
            return None;
        }
        let slots = self.max_key_ids();
        let occupancy = self.len() as f64 / slots as f64;
        if occupancy >= occupancy_threshold {
            trace!(occupancy, "table.sample.rejection");
            self.options().metrics.random_sample(true);
            loop {
                if let Some(id) = self.live_id(rng.gen_range(0..slots)) {
                    return Some(id);
                }
            }
        }
        trace!(occupancy, "table.sample.scan");
        self.options().metrics.random_sample(false);
        let start = rng.gen_range(0..slots);
        (start..slots)
            .chain(0..start)
            .find_map(|idx| self.live_id(idx))
    }
}
