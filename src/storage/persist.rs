use std::io::{Read, Write};

use crate::types::Result;

/// Binary save/load against caller-owned byte streams.
///
/// Implementations never open files themselves. `save` buffers internally
/// and flushes `out` before returning, whether or not it succeeded. `load`
/// consumes exactly one image from `input`, so several structures can share
/// a stream. A failed load leaves nothing behind for the caller to reuse.
pub trait Persist: Sized {
    /// Writes the binary image of `self` to `out`.
    fn save<W: Write + ?Sized>(&self, out: &mut W) -> Result<()>;

    /// Reads one binary image from `input`.
    fn load<R: Read + ?Sized>(input: &mut R) -> Result<Self>;
}
