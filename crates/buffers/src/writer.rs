//! Auto-growing binary buffer writer.

/// Writes big-endian binary data into a growable buffer.
///
/// `uint8` holds the allocated buffer and `x` the write cursor; bytes past the
/// cursor are scratch space. [`Writer::flush`] hands out the written bytes and
/// resets the cursor so the writer can be reused for the next document.
///
/// # Example
///
/// ```
/// use valtree_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8u16(0xcd, 0x0102);
/// assert_eq!(writer.flush(), vec![0xcd, 0x01, 0x02]);
/// ```
#[derive(Debug, Clone)]
pub struct Writer {
    /// The underlying buffer.
    pub uint8: Vec<u8>,
    /// Current write position.
    pub x: usize,
}

const DEFAULT_CAPACITY: usize = 64 * 1024;

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a writer with the default initial capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a writer with a custom initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: vec![0; capacity.max(16)],
            x: 0,
        }
    }

    /// Makes sure at least `capacity` bytes are available after the cursor.
    #[inline]
    pub fn ensure_capacity(&mut self, capacity: usize) {
        let required = self.x + capacity;
        if required > self.uint8.len() {
            let grown = (self.uint8.len() * 2).max(required);
            self.uint8.resize(grown, 0);
        }
    }

    /// Rewinds the cursor without releasing the allocation.
    pub fn reset(&mut self) {
        self.x = 0;
    }

    /// Returns the bytes written since the last reset and rewinds the cursor.
    pub fn flush(&mut self) -> Vec<u8> {
        let out = self.uint8[..self.x].to_vec();
        self.x = 0;
        out
    }

    /// Number of bytes written since the last reset.
    pub fn len(&self) -> usize {
        self.x
    }

    /// Returns `true` if nothing has been written since the last reset.
    pub fn is_empty(&self) -> bool {
        self.x == 0
    }

    #[inline]
    fn put(&mut self, bytes: &[u8]) {
        self.ensure_capacity(bytes.len());
        let x = self.x;
        self.uint8[x..x + bytes.len()].copy_from_slice(bytes);
        self.x = x + bytes.len();
    }

    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.put(&[val]);
    }

    #[inline]
    pub fn i8(&mut self, val: i8) {
        self.put(&val.to_be_bytes());
    }

    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.put(&val.to_be_bytes());
    }

    #[inline]
    pub fn i16(&mut self, val: i16) {
        self.put(&val.to_be_bytes());
    }

    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.put(&val.to_be_bytes());
    }

    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.put(&val.to_be_bytes());
    }

    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.put(&val.to_be_bytes());
    }

    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.put(&val.to_be_bytes());
    }

    #[inline]
    pub fn f32(&mut self, val: f32) {
        self.put(&val.to_be_bytes());
    }

    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.put(&val.to_be_bytes());
    }

    /// Writes a marker byte followed by a `u8` payload.
    #[inline]
    pub fn u8u8(&mut self, marker: u8, val: u8) {
        self.put(&[marker, val]);
    }

    /// Writes a marker byte followed by a big-endian `u16` payload.
    #[inline]
    pub fn u8u16(&mut self, marker: u8, val: u16) {
        self.ensure_capacity(3);
        self.u8(marker);
        self.u16(val);
    }

    /// Writes a marker byte followed by a big-endian `u32` payload.
    #[inline]
    pub fn u8u32(&mut self, marker: u8, val: u32) {
        self.ensure_capacity(5);
        self.u8(marker);
        self.u32(val);
    }

    /// Writes a marker byte followed by a big-endian `u64` payload.
    #[inline]
    pub fn u8u64(&mut self, marker: u8, val: u64) {
        self.ensure_capacity(9);
        self.u8(marker);
        self.u64(val);
    }

    /// Writes a marker byte followed by a big-endian `f32` payload.
    #[inline]
    pub fn u8f32(&mut self, marker: u8, val: f32) {
        self.ensure_capacity(5);
        self.u8(marker);
        self.f32(val);
    }

    /// Writes a marker byte followed by a big-endian `f64` payload.
    #[inline]
    pub fn u8f64(&mut self, marker: u8, val: f64) {
        self.ensure_capacity(9);
        self.u8(marker);
        self.f64(val);
    }

    /// Writes raw bytes.
    pub fn buf(&mut self, bytes: &[u8]) {
        self.put(bytes);
    }

    /// Writes the UTF-8 bytes of `s` and returns the number of bytes written.
    pub fn utf8(&mut self, s: &str) -> usize {
        self.put(s.as_bytes());
        s.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_past_initial_capacity() {
        let mut writer = Writer::with_capacity(16);
        for i in 0..100u8 {
            writer.u8(i);
        }
        let out = writer.flush();
        assert_eq!(out.len(), 100);
        assert_eq!(out[99], 99);
    }

    #[test]
    fn flush_rewinds_cursor() {
        let mut writer = Writer::new();
        writer.u32(0xdeadbeef);
        assert_eq!(writer.flush(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert!(writer.is_empty());
        writer.u8(1);
        assert_eq!(writer.flush(), vec![1]);
    }

    #[test]
    fn marker_pairs() {
        let mut writer = Writer::new();
        writer.u8u8(0xcc, 0xff);
        writer.u8f32(0xca, 1.5);
        assert_eq!(writer.flush(), vec![0xcc, 0xff, 0xca, 0x3f, 0xc0, 0x00, 0x00]);
    }
}
