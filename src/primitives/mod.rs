//! Low-level primitives shared by the table and graph layers.
//!
//! Includes the fixed-width binary codec and the scoped stream helpers used
//! by every save path.

/// Byte-level encoding and decoding.
///
/// Fixed-width little-endian codecs for keys, values, and length prefixes.
pub mod bytes;

/// Stream helpers.
pub mod io;
