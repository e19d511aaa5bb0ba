#![forbid(unsafe_code)]

use std::io::{self, BufWriter, Write};

use tracing::warn;

use crate::types::Result;

/// Write adapter that tracks how many bytes passed through it.
pub struct CountingWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> CountingWriter<W> {
    /// Wraps `inner` with a zeroed byte counter.
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Total bytes accepted so far.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Runs `body` against a buffered view of `out` and flushes on every exit path.
///
/// The body's error wins over a flush error; a flush error is reported when
/// the body succeeded. Returns the body's value together with the number of
/// bytes handed to `out`.
pub fn scoped_write<W, T, F>(out: &mut W, body: F) -> Result<(T, u64)>
where
    W: Write + ?Sized,
    F: FnOnce(&mut CountingWriter<BufWriter<&mut W>>) -> Result<T>,
{
    let mut writer = CountingWriter::new(BufWriter::new(out));
    let result = body(&mut writer);
    let flushed = writer.flush();
    match (result, flushed) {
        (Ok(value), Ok(())) => Ok((value, writer.written())),
        (Ok(_), Err(err)) => Err(err.into()),
        (Err(err), flushed) => {
            if let Err(flush_err) = flushed {
                warn!(error = %flush_err, "flush failed while unwinding a failed save");
            }
            Err(err)
        }
    }
}
