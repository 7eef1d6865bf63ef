//! Append-only output buffer.
//!
//! Every render operation writes into a [`Buffer`]. Container nodes are first
//! rendered into a buffer of their own, which is then handed to the parent
//! operation as already-rendered text.

use std::fmt;

/// Default growth unit for output buffers.
pub const OUTPUT_UNIT: usize = 64;

/// Append-only, contiguous text buffer.
///
/// Content already written is never modified; the only mutation is appending.
/// Capacity grows in whole multiples of the buffer's unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Buffer {
    data: String,
    unit: usize,
}

impl Buffer {
    /// Create an empty buffer growing by [`OUTPUT_UNIT`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_unit(OUTPUT_UNIT)
    }

    /// Create an empty buffer growing by `unit` bytes at a time.
    #[must_use]
    pub fn with_unit(unit: usize) -> Self {
        Self {
            data: String::new(),
            unit: unit.max(1),
        }
    }

    /// Append a string slice.
    pub fn push_str(&mut self, s: &str) {
        self.grow(s.len());
        self.data.push_str(s);
    }

    /// Append a single character.
    pub fn push(&mut self, c: char) {
        self.grow(c.len_utf8());
        self.data.push(c);
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Allocated capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Whether the written content ends with `suffix`.
    #[must_use]
    pub fn ends_with(&self, suffix: &str) -> bool {
        self.data.ends_with(suffix)
    }

    /// Consume the buffer and return its content.
    #[must_use]
    pub fn into_string(self) -> String {
        self.data
    }

    /// Reserve room for `additional` bytes, rounded up to the growth unit.
    fn grow(&mut self, additional: usize) {
        let needed = self.data.len() + additional;
        if needed <= self.data.capacity() {
            return;
        }
        let unit = self.unit.max(1);
        let target = needed.div_ceil(unit) * unit;
        self.data.reserve_exact(target - self.data.len());
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for Buffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}

impl AsRef<str> for Buffer {
    fn as_ref(&self) -> &str {
        &self.data
    }
}

impl From<Buffer> for String {
    fn from(buffer: Buffer) -> Self {
        buffer.data
    }
}
