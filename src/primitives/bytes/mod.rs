#![forbid(unsafe_code)]
//! Fixed-width little-endian encoding shared by table and graph persistence.

use std::io::{self, Read, Write};

use crate::types::{NodeId, Result, SlotGraphError};

/// Upper bound on speculative reservations made from untrusted length prefixes.
const MAX_PREALLOC: usize = 4096;

pub mod le {
    //! Raw little-endian primitives over `std::io` streams.

    use std::io::{self, Read, Write};

    /// Writes a single byte.
    pub fn put_u8<W: Write + ?Sized>(out: &mut W, v: u8) -> io::Result<()> {
        out.write_all(&[v])
    }

    /// Writes a u64 in little-endian byte order.
    pub fn put_u64<W: Write + ?Sized>(out: &mut W, v: u64) -> io::Result<()> {
        out.write_all(&v.to_le_bytes())
    }

    /// Writes an i64 in little-endian byte order.
    pub fn put_i64<W: Write + ?Sized>(out: &mut W, v: i64) -> io::Result<()> {
        out.write_all(&v.to_le_bytes())
    }

    /// Reads a single byte.
    pub fn get_u8<R: Read + ?Sized>(input: &mut R) -> io::Result<u8> {
        let mut buf = [0u8; 1];
        input.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    /// Reads a little-endian u64.
    pub fn get_u64<R: Read + ?Sized>(input: &mut R) -> io::Result<u64> {
        let mut buf = [0u8; 8];
        input.read_exact(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    /// Reads a little-endian i64.
    pub fn get_i64<R: Read + ?Sized>(input: &mut R) -> io::Result<i64> {
        let mut buf = [0u8; 8];
        input.read_exact(&mut buf)?;
        Ok(i64::from_le_bytes(buf))
    }
}

/// Converts a decoded u64 length into a `usize`, rejecting values the
/// platform cannot address.
pub fn len_from_u64(len: u64) -> Result<usize> {
    usize::try_from(len).map_err(|_| SlotGraphError::Corruption("length prefix exceeds usize"))
}

/// Capacity to reserve for a collection whose length came off the wire.
pub fn prealloc_hint(len: usize) -> usize {
    len.min(MAX_PREALLOC)
}

/// Binary encoding for keys and values stored in tables.
pub trait Codec: Sized {
    /// Appends the encoded form of `self` to `out`.
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> Result<()>;
    /// Reads one value from `input`.
    fn decode<R: Read + ?Sized>(input: &mut R) -> Result<Self>;
}

macro_rules! int_codec {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Codec for $ty {
                fn encode<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
                    out.write_all(&self.to_le_bytes())?;
                    Ok(())
                }

                fn decode<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
                    let mut buf = [0u8; core::mem::size_of::<$ty>()];
                    input.read_exact(&mut buf)?;
                    Ok(<$ty>::from_le_bytes(buf))
                }
            }
        )*
    };
}

int_codec!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128);

impl Codec for usize {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        le::put_u64(out, *self as u64)?;
        Ok(())
    }

    fn decode<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        len_from_u64(le::get_u64(input)?)
    }
}

impl Codec for bool {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        le::put_u8(out, u8::from(*self))?;
        Ok(())
    }

    fn decode<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        match le::get_u8(input)? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(SlotGraphError::Corruption("invalid bool byte")),
        }
    }
}

impl Codec for f64 {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        le::put_u64(out, self.to_bits())?;
        Ok(())
    }

    fn decode<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        Ok(f64::from_bits(le::get_u64(input)?))
    }
}

impl Codec for () {
    fn encode<W: Write + ?Sized>(&self, _out: &mut W) -> Result<()> {
        Ok(())
    }

    fn decode<R: Read + ?Sized>(_input: &mut R) -> Result<Self> {
        Ok(())
    }
}

impl Codec for String {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        le::put_u64(out, self.len() as u64)?;
        out.write_all(self.as_bytes())?;
        Ok(())
    }

    fn decode<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        let len = le::get_u64(input)?;
        let mut body = Vec::with_capacity(prealloc_hint(len_from_u64(len)?));
        Read::take(&mut *input, len).read_to_end(&mut body)?;
        if body.len() as u64 != len {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "string body truncated").into());
        }
        String::from_utf8(body).map_err(|_| SlotGraphError::Corruption("string key not valid UTF-8"))
    }
}

impl Codec for NodeId {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        le::put_i64(out, self.0)?;
        Ok(())
    }

    fn decode<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        Ok(NodeId(le::get_i64(input)?))
    }
}

impl<A: Codec, B: Codec> Codec for (A, B) {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        self.0.encode(out)?;
        self.1.encode(out)
    }

    fn decode<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        let a = A::decode(input)?;
        let b = B::decode(input)?;
        Ok((a, b))
    }
}

impl<T: Codec> Codec for Vec<T> {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        le::put_u64(out, self.len() as u64)?;
        for item in self {
            item.encode(out)?;
        }
        Ok(())
    }

    fn decode<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        let len = len_from_u64(le::get_u64(input)?)?;
        let mut items = Vec::with_capacity(prealloc_hint(len));
        for _ in 0..len {
            items.push(T::decode(input)?);
        }
        Ok(items)
    }
}
