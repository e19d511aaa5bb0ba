use std::io::{Read, Write};

use tracing::{debug, warn};

use super::SlotTable;
use crate::primitives::bytes::{le, len_from_u64, prealloc_hint, Codec};
use crate::primitives::io::scoped_write;
use crate::storage::hash::KeyHash;
use crate::storage::options::TableOptions;
use crate::storage::persist::Persist;
use crate::types::{Result, SlotGraphError};

impl<K, V> SlotTable<K, V>
where
    K: KeyHash + Eq + Codec,
    V: Codec,
{
    /// Reads a table image, building the result with `opts`.
    ///
    /// Entries are replayed in stored order, so iteration order matches the
    /// saved table while deletion gaps disappear.
    pub fn load_with_options<R: Read + ?Sized>(input: &mut R, opts: TableOptions) -> Result<Self> {
        let count = len_from_u64(le::get_u64(input)?)?;
        let mut table = Self::with_options(opts);
        table.slots.reserve(prealloc_hint(count));
        for _ in 0..count {
            let key = K::decode(input)?;
            let value = V::decode(input)?;
            let before = table.len();
            table.insert(key, value)?;
            if table.len() == before {
                warn!(entries = count, "table.load.duplicate_key");
                return Err(SlotGraphError::Corruption("duplicate key in table image"));
            }
        }
        debug!(entries = count, "table.load");
        Ok(table)
    }
}

impl<K, V> Persist for SlotTable<K, V>
where
    K: KeyHash + Eq + Codec,
    V: Codec,
{
    /// Writes the live count followed by every live `(key, value)` pair in
    /// ascending slot order.
    fn save<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        let ((), bytes) = scoped_write(out, |w| {
            le::put_u64(w, self.len() as u64)?;
            for (key, value) in self.iter() {
                key.encode(w)?;
                value.encode(w)?;
            }
            Ok(())
        })?;
        debug!(entries = self.len(), bytes, "table.save");
        Ok(())
    }

    fn load<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        Self::load_with_options(input, TableOptions::default())
    }
}
