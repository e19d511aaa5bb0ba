use std::borrow::Borrow;
use std::io::{Read, Write};

use rand::Rng;

use super::hash::KeyHash;
use super::options::TableOptions;
use super::persist::Persist;
use super::table::{Keys, SlotTable};
use crate::primitives::bytes::Codec;
use crate::types::{KeyId, Result};

/// Set of keys with the same handle discipline as [`SlotTable`].
#[derive(Clone)]
pub struct KeySet<K> {
    table: SlotTable<K, ()>,
}

impl<K> Default for KeySet<K> {
    fn default() -> Self {
        Self {
            table: SlotTable::default(),
        }
    }
}

impl<K> KeySet<K> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set backed by a table built with `opts`.
    pub fn with_options(opts: TableOptions) -> Self {
        Self {
            table: SlotTable::with_options(opts),
        }
    }

    /// Number of keys in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true when the set holds no keys.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Upper bound on handle indices; see [`SlotTable::max_key_ids`].
    pub fn max_key_ids(&self) -> usize {
        self.table.max_key_ids()
    }

    /// Removes every key and invalidates all outstanding handles.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Key stored under `id`.
    pub fn key(&self, id: KeyId) -> Result<&K> {
        self.table.key(id)
    }

    /// Removes the key stored under `id`.
    pub fn remove_id(&mut self, id: KeyId) -> Result<K> {
        self.table.remove_id(id).map(|(key, ())| key)
    }

    /// Keys in ascending slot order.
    pub fn iter(&self) -> Keys<'_, K, ()> {
        self.table.keys()
    }

    /// Random live handle; see [`SlotTable::random_key_id`].
    pub fn random_key_id<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        occupancy_threshold: f64,
    ) -> Option<KeyId> {
        self.table.random_key_id(rng, occupancy_threshold)
    }
}

impl<K: KeyHash + Eq> KeySet<K> {
    /// Adds `key` if missing and returns its handle.
    pub fn add_key(&mut self, key: K) -> Result<KeyId> {
        self.table.add_key(key)
    }

    /// Returns true when `key` is in the set.
    pub fn is_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: KeyHash + Eq + ?Sized,
    {
        self.table.contains_key(key)
    }

    /// Handle of `key`, if present.
    pub fn key_id<Q>(&self, key: &Q) -> Option<KeyId>
    where
        K: Borrow<Q>,
        Q: KeyHash + Eq + ?Sized,
    {
        self.table.key_id(key)
    }

    /// Removes `key`; returns false when it was absent.
    pub fn del_key<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: KeyHash + Eq + ?Sized,
    {
        self.table.remove(key).is_some()
    }
}

impl<K: KeyHash + Eq> PartialEq for KeySet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table
    }
}

impl<K: KeyHash + Eq> Eq for KeySet<K> {}

impl<K: std::fmt::Debug> std::fmt::Debug for KeySet<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: KeyHash + Eq + Codec> Persist for KeySet<K> {
    fn save<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        self.table.save(out)
    }

    fn load<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        Ok(Self {
            table: SlotTable::load(input)?,
        })
    }
}
