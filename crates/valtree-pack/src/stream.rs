//! Scoped output streams.

use std::io::{self, Write};

/// Wraps a codec's output sink and flushes it when the scope ends, on every
/// exit path. A failing final flush is logged and never returned, so it cannot
/// mask the outcome of the write itself.
pub struct ScopedStream<W: Write> {
    inner: W,
    label: &'static str,
}

impl<W: Write> ScopedStream<W> {
    pub fn new(label: &'static str, inner: W) -> Self {
        Self { inner, label }
    }
}

impl<W: Write> Write for ScopedStream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<W: Write> Drop for ScopedStream<W> {
    fn drop(&mut self) {
        if let Err(error) = self.inner.flush() {
            tracing::error!(stream = self.label, %error, "failed to close codec output stream");
        }
    }
}
