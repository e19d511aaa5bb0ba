/// Chain terminator and "no bucket head" marker.
pub(crate) const NIL: usize = usize::MAX;

/// Lifecycle of a slot below `max_key_ids`. Positions at or past the end of
/// the slot vector are the empty reserve.
#[derive(Clone, Debug)]
pub(crate) enum SlotState<K, V> {
    Occupied { key: K, value: V },
    Deleted,
}

#[derive(Clone, Debug)]
pub(crate) struct Slot<K, V> {
    /// Next slot in the same bucket chain, or [`NIL`].
    pub(crate) next: usize,
    /// Bumped every time the slot is vacated.
    pub(crate) generation: u32,
    /// Cached hash of the occupying key; stale while deleted.
    pub(crate) hash: u64,
    pub(crate) state: SlotState<K, V>,
}

impl<K, V> Slot<K, V> {
    pub(crate) fn occupied(key: K, value: V, hash: u64, generation: u32) -> Self {
        Self {
            next: NIL,
            generation,
            hash,
            state: SlotState::Occupied { key, value },
        }
    }

    #[inline]
    pub(crate) fn is_occupied(&self) -> bool {
        matches!(self.state, SlotState::Occupied { .. })
    }

    #[inline]
    pub(crate) fn entry(&self) -> Option<(&K, &V)> {
        match &self.state {
            SlotState::Occupied { key, value } => Some((key, value)),
            SlotState::Deleted => None,
        }
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self) -> Option<(&K, &mut V)> {
        match &mut self.state {
            SlotState::Occupied { key, value } => Some((&*key, value)),
            SlotState::Deleted => None,
        }
    }
}
