use std::hash::Hasher;

use rustc_hash::FxHasher;
use siphasher::sip::SipHasher13;
use xxhash_rust::xxh64::xxh64;

use crate::types::NodeId;

/// Maps a key to the hash code used to pick its bucket.
///
/// Implementations must agree across borrowed forms: `String` and `str`
/// hash identically so tables keyed by `String` can be probed with `&str`.
pub trait KeyHash {
    /// Returns the 64-bit hash code of `self`.
    fn key_hash(&self) -> u64;
}

#[inline]
fn small_int_hash(v: u32) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write_u32(v);
    hasher.finish()
}

#[inline]
fn large_int_hash(bytes: &[u8]) -> u64 {
    xxh64(bytes, 0)
}

/// Computes a deterministic SipHash64 over the key bytes.
#[inline]
fn str_hash(bytes: &[u8]) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write(bytes);
    hasher.finish()
}

macro_rules! small_int_key {
    ($($ty:ty),*) => {
        $(
            impl KeyHash for $ty {
                #[inline]
                fn key_hash(&self) -> u64 {
                    small_int_hash(*self as u32)
                }
            }
        )*
    };
}

macro_rules! large_int_key {
    ($($ty:ty),*) => {
        $(
            impl KeyHash for $ty {
                #[inline]
                fn key_hash(&self) -> u64 {
                    large_int_hash(&self.to_le_bytes())
                }
            }
        )*
    };
}

small_int_key!(u8, i8, u16, i16, u32, i32);
large_int_key!(u64, i64, u128, i128);

impl KeyHash for usize {
    #[inline]
    fn key_hash(&self) -> u64 {
        (*self as u64).key_hash()
    }
}

impl KeyHash for NodeId {
    #[inline]
    fn key_hash(&self) -> u64 {
        self.0.key_hash()
    }
}

impl KeyHash for str {
    #[inline]
    fn key_hash(&self) -> u64 {
        str_hash(self.as_bytes())
    }
}

impl KeyHash for String {
    #[inline]
    fn key_hash(&self) -> u64 {
        self.as_str().key_hash()
    }
}

impl<T: KeyHash + ?Sized> KeyHash for &T {
    #[inline]
    fn key_hash(&self) -> u64 {
        (**self).key_hash()
    }
}

impl<A: KeyHash, B: KeyHash> KeyHash for (A, B) {
    fn key_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        hasher.write_u64(self.0.key_hash());
        hasher.write_u64(self.1.key_hash());
        hasher.finish()
    }
}
