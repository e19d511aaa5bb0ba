use std::iter::FusedIterator;
use std::slice;

use super::slot::Slot;
use crate::types::KeyId;

/// Iterator over live `(key, value)` pairs in ascending slot order.
///
/// A clone continues independently from the same position; a fresh call to
/// [`super::SlotTable::iter`] starts over.
pub struct Iter<'a, K, V> {
    slots: slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(super) fn new(slots: &'a [Slot<K, V>], live: usize) -> Self {
        Self {
            slots: slots.iter(),
            remaining: live,
        }
    }

    /// Returns true once every live entry has been yielded.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.slots.by_ref().find_map(Slot::entry)?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over live entries with mutable values.
pub struct IterMut<'a, K, V> {
    slots: slice::IterMut<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(super) fn new(slots: &'a mut [Slot<K, V>], live: usize) -> Self {
        Self {
            slots: slots.iter_mut(),
            remaining: live,
        }
    }

    /// Returns true once every live entry has been yielded.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.slots.by_ref().find_map(Slot::entry_mut)?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Keys of live entries.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(super) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }

    /// Returns true once every live entry has been yielded.
    pub fn is_exhausted(&self) -> bool {
        self.inner.is_exhausted()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// Values of live entries.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Values<'a, K, V> {
    pub(super) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }

    /// Returns true once every live entry has been yielded.
    pub fn is_exhausted(&self) -> bool {
        self.inner.is_exhausted()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// Handles of live entries.
pub struct KeyIds<'a, K, V> {
    slots: slice::Iter<'a, Slot<K, V>>,
    index: usize,
    remaining: usize,
}

impl<'a, K, V> KeyIds<'a, K, V> {
    pub(super) fn new(slots: &'a [Slot<K, V>], live: usize) -> Self {
        Self {
            slots: slots.iter(),
            index: 0,
            remaining: live,
        }
    }

    /// Returns true once every live handle has been yielded.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

impl<K, V> Clone for KeyIds<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            index: self.index,
            remaining: self.remaining,
        }
    }
}

impl<K, V> Iterator for KeyIds<'_, K, V> {
    type Item = KeyId;

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            let slot = self.slots.next()?;
            let idx = self.index;
            self.index += 1;
            if slot.is_occupied() {
                self.remaining -= 1;
                return Some(KeyId::new(idx, slot.generation));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for KeyIds<'_, K, V> {}
impl<K, V> FusedIterator for KeyIds<'_, K, V> {}

/// Position for the first/next traversal protocol
/// ([`super::SlotTable::first_key_id`] / [`super::SlotTable::next_key_id`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyCursor {
    pub(super) next: usize,
    pub(super) current: Option<KeyId>,
}

impl KeyCursor {
    pub(super) fn before_first() -> Self {
        Self {
            next: 0,
            current: None,
        }
    }

    /// Handle the cursor currently rests on.
    pub fn key_id(&self) -> Option<KeyId> {
        self.current
    }
}
