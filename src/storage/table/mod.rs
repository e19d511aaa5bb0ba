//! Handle-indexed hash table.
//!
//! Entries live in a slot vector addressed by [`KeyId`]. A bucket vector maps
//! each hash to the head of a chain threaded through the slots. Deletion is
//! lazy: the slot is tagged deleted, unlinked from its chain, and its index is
//! pushed onto a free list that later inserts pop before growing the vector.

mod iter;
mod persist;
mod sample;
mod slot;

use std::borrow::Borrow;
use std::fmt;
use std::mem;

use tracing::debug;

use self::slot::{Slot, SlotState, NIL};
use super::hash::KeyHash;
use super::options::TableOptions;
use crate::types::{KeyId, Result, SlotGraphError};

pub use iter::{Iter, IterMut, KeyCursor, KeyIds, Keys, Values};

/// Hash table whose entries are addressed by stable [`KeyId`] handles.
#[derive(Clone)]
pub struct SlotTable<K, V> {
    slots: Vec<Slot<K, V>>,
    buckets: Vec<usize>,
    free: Vec<usize>,
    len: usize,
    /// Generation given to slots allocated after a `clear`, so handles from
    /// before the clear stay dead.
    generation_floor: u32,
    opts: TableOptions,
}

impl<K, V> Default for SlotTable<K, V> {
    fn default() -> Self {
        Self::with_options(TableOptions::default())
    }
}

impl<K, V> SlotTable<K, V> {
    /// Creates an empty table with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table. No slots or buckets are allocated until the
    /// first insert.
    pub fn with_options(opts: TableOptions) -> Self {
        Self {
            slots: Vec::new(),
            buckets: Vec::new(),
            free: Vec::new(),
            len: 0,
            generation_floor: 0,
            opts,
        }
    }

    /// Options the table was created with.
    pub fn options(&self) -> &TableOptions {
        &self.opts
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true when the table holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Exclusive upper bound of the handle space: every issued
    /// `KeyId::index()` is below this value.
    pub fn max_key_ids(&self) -> usize {
        self.slots.len()
    }

    /// Number of buckets in the hash index.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Drops every entry and releases all slots and buckets.
    pub fn clear(&mut self) {
        let max_generation = self
            .slots
            .iter()
            .map(|slot| slot.generation)
            .max()
            .unwrap_or(self.generation_floor);
        self.generation_floor = self.generation_floor.max(max_generation.wrapping_add(1));
        self.slots = Vec::new();
        self.buckets = Vec::new();
        self.free = Vec::new();
        self.len = 0;
    }

    /// Returns true if `id` currently designates a live entry.
    pub fn is_key_id(&self, id: KeyId) -> bool {
        self.slot(id).is_some()
    }

    /// Returns the key stored under `id`.
    pub fn key(&self, id: KeyId) -> Result<&K> {
        self.entry(id).map(|(key, _)| key)
    }

    /// Returns the value stored under `id`.
    pub fn dat(&self, id: KeyId) -> Result<&V> {
        self.entry(id).map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value stored under `id`.
    pub fn dat_mut(&mut self, id: KeyId) -> Result<&mut V> {
        let idx = self.slot(id).map(|_| id.index);
        idx.and_then(|idx| self.slots[idx].entry_mut())
            .map(|(_, value)| value)
            .ok_or(SlotGraphError::InvalidHandle(id))
    }

    /// Returns the key and value stored under `id`.
    pub fn entry(&self, id: KeyId) -> Result<(&K, &V)> {
        self.slot(id)
            .and_then(Slot::entry)
            .ok_or(SlotGraphError::InvalidHandle(id))
    }

    fn slot(&self, id: KeyId) -> Option<&Slot<K, V>> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation && slot.is_occupied())
    }

    /// Handle of the live slot at `idx`, if any.
    pub(crate) fn live_id(&self, idx: usize) -> Option<KeyId> {
        self.slots
            .get(idx)
            .filter(|slot| slot.is_occupied())
            .map(|slot| KeyId::new(idx, slot.generation))
    }

    #[inline]
    fn bucket_of(&self, hash: u64) -> usize {
        debug_assert!(self.buckets.len().is_power_of_two());
        ((hash ^ (hash >> 32)) as usize) & (self.buckets.len() - 1)
    }

    fn rehash(&mut self, target_len: usize) {
        let wanted = target_len.saturating_mul(2).max(1);
        let count = wanted
            .checked_next_power_of_two()
            .unwrap_or(1 << (usize::BITS - 1))
            .max(self.opts.initial_buckets.max(1).next_power_of_two());
        debug!(
            from = self.buckets.len(),
            to = count,
            live = self.len,
            slots = self.slots.len(),
            "table.rehash"
        );
        self.buckets = vec![NIL; count];
        for idx in 0..self.slots.len() {
            if !self.slots[idx].is_occupied() {
                continue;
            }
            let bucket = self.bucket_of(self.slots[idx].hash);
            self.slots[idx].next = self.buckets[bucket];
            self.buckets[bucket] = idx;
        }
        self.opts.metrics.rehashed(count);
    }

    fn needs_rehash(&self, target_len: usize) -> bool {
        self.buckets.is_empty()
            || target_len as f64 > self.buckets.len() as f64 * self.opts.max_load_factor
    }

    fn unlink(&mut self, idx: usize) {
        let bucket = self.bucket_of(self.slots[idx].hash);
        let next = self.slots[idx].next;
        if self.buckets[bucket] == idx {
            self.buckets[bucket] = next;
            return;
        }
        let mut cur = self.buckets[bucket];
        while cur != NIL {
            let after = self.slots[cur].next;
            if after == idx {
                self.slots[cur].next = next;
                return;
            }
            cur = after;
        }
        debug_assert!(false, "slot {idx} missing from its bucket chain");
    }

    /// Marks the slot under `id` deleted and returns its entry.
    ///
    /// The slot index goes onto the free list; `id` and every copy of it
    /// become invalid.
    pub fn remove_id(&mut self, id: KeyId) -> Result<(K, V)> {
        if self.slot(id).is_none() {
            return Err(SlotGraphError::InvalidHandle(id));
        }
        let idx = id.index;
        self.unlink(idx);
        let slot = &mut self.slots[idx];
        slot.next = NIL;
        slot.generation = slot.generation.wrapping_add(1);
        let state = mem::replace(&mut slot.state, SlotState::Deleted);
        self.free.push(idx);
        self.len -= 1;
        self.opts.metrics.slot_deleted();
        match state {
            SlotState::Occupied { key, value } => Ok((key, value)),
            SlotState::Deleted => Err(SlotGraphError::InvalidHandle(id)),
        }
    }

    /// Restartable iterator over live entries in ascending slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.slots, self.len)
    }

    /// Like [`SlotTable::iter`] with mutable access to values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let len = self.len;
        IterMut::new(&mut self.slots, len)
    }

    /// Keys in iteration order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Values in iteration order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Handles of live entries in iteration order.
    pub fn key_ids(&self) -> KeyIds<'_, K, V> {
        KeyIds::new(&self.slots, self.len)
    }

    /// Cursor positioned before the first live entry.
    pub fn first_key_id(&self) -> KeyCursor {
        KeyCursor::before_first()
    }

    /// Advances `cursor` to the next live entry. Returns false, leaving the
    /// cursor without a current id, once the table is exhausted.
    pub fn next_key_id(&self, cursor: &mut KeyCursor) -> bool {
        let start = cursor.next.min(self.slots.len());
        match (start..self.slots.len()).find_map(|idx| self.live_id(idx)) {
            Some(id) => {
                cursor.current = Some(id);
                cursor.next = id.index + 1;
                true
            }
            None => {
                cursor.current = None;
                cursor.next = self.slots.len();
                false
            }
        }
    }
}

impl<K: KeyHash + Eq, V> SlotTable<K, V> {
    fn find<Q>(&self, key: &Q, hash: u64) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        if self.buckets.is_empty() {
            return None;
        }
        let mut idx = self.buckets[self.bucket_of(hash)];
        while idx != NIL {
            let slot = &self.slots[idx];
            if slot.hash == hash {
                if let Some((k, _)) = slot.entry() {
                    if k.borrow() == key {
                        return Some(idx);
                    }
                }
            }
            idx = slot.next;
        }
        None
    }

    /// Inserts `value` under `key`.
    ///
    /// An existing key keeps its slot and handle and only has its value
    /// replaced. A new key takes the most recently freed slot, or a slot
    /// appended to the end of the vector.
    pub fn insert(&mut self, key: K, value: V) -> Result<KeyId> {
        let hash = key.key_hash();
        if let Some(idx) = self.find(&key, hash) {
            let slot = &mut self.slots[idx];
            if let Some((_, current)) = slot.entry_mut() {
                *current = value;
            }
            self.opts.metrics.slot_overwritten();
            return Ok(KeyId::new(idx, slot.generation));
        }
        self.insert_new(key, value, hash)
    }

    /// Inserts `key` with a default value unless it is already present.
    /// Returns the key's handle either way.
    pub fn add_key(&mut self, key: K) -> Result<KeyId>
    where
        V: Default,
    {
        let hash = key.key_hash();
        match self.find(&key, hash) {
            Some(idx) => Ok(KeyId::new(idx, self.slots[idx].generation)),
            None => self.insert_new(key, V::default(), hash),
        }
    }

    fn insert_new(&mut self, key: K, value: V, hash: u64) -> Result<KeyId> {
        if self.free.is_empty() && self.slots.len() as u64 >= self.opts.key_id_limit {
            return Err(SlotGraphError::CapacityExceeded {
                limit: self.opts.key_id_limit,
            });
        }
        if self.needs_rehash(self.len + 1) {
            self.rehash(self.len + 1);
        }
        let idx = match self.free.pop() {
            Some(idx) => {
                let slot = &mut self.slots[idx];
                slot.hash = hash;
                slot.state = SlotState::Occupied { key, value };
                idx
            }
            None => {
                self.slots
                    .push(Slot::occupied(key, value, hash, self.generation_floor));
                self.slots.len() - 1
            }
        };
        let bucket = self.bucket_of(hash);
        self.slots[idx].next = self.buckets[bucket];
        self.buckets[bucket] = idx;
        self.len += 1;
        self.opts.metrics.slot_inserted();
        Ok(KeyId::new(idx, self.slots[idx].generation))
    }

    /// Handle of `key`, or `None` when absent.
    pub fn key_id<Q>(&self, key: &Q) -> Option<KeyId>
    where
        K: Borrow<Q>,
        Q: KeyHash + Eq + ?Sized,
    {
        self.find(key, key.key_hash())
            .map(|idx| KeyId::new(idx, self.slots[idx].generation))
    }

    /// Returns true if `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: KeyHash + Eq + ?Sized,
    {
        self.find(key, key.key_hash()).is_some()
    }

    /// Value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: KeyHash + Eq + ?Sized,
    {
        self.find(key, key.key_hash())
            .and_then(|idx| self.slots[idx].entry())
            .map(|(_, value)| value)
    }

    /// Mutable value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: KeyHash + Eq + ?Sized,
    {
        let idx = self.find(key, key.key_hash())?;
        self.slots[idx].entry_mut().map(|(_, value)| value)
    }

    /// Value stored under `key`, reporting absence as [`SlotGraphError::KeyNotFound`].
    pub fn try_get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: KeyHash + Eq + ?Sized,
    {
        self.get(key).ok_or(SlotGraphError::KeyNotFound)
    }

    /// Deletes `key` if present and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: KeyHash + Eq + ?Sized,
    {
        let id = self.key_id(key)?;
        self.remove_id(id).ok().map(|(_, value)| value)
    }
}

impl<K, V> fmt::Debug for SlotTable<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Tables are equal when they hold the same key/value pairs, regardless of
/// slot layout.
impl<K, V> PartialEq for SlotTable<K, V>
where
    K: KeyHash + Eq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|theirs| theirs == value))
    }
}

impl<K: KeyHash + Eq, V: Eq> Eq for SlotTable<K, V> {}

impl<'a, K, V> IntoIterator for &'a SlotTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
