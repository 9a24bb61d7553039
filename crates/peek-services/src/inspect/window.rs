//! Byte-range clamp — turns a requested offset/length into a window that
//! always lies inside the chunk.

use std::ops::Range;

/// `[offset, offset + length)` inside a chunk of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: usize,
    pub length: usize,
}

impl Window {
    /// Clamp a request against a chunk of `size` bytes. Never fails:
    ///
    /// 1. a missing or oversized length becomes `size`
    /// 2. an offset past the end becomes `size`
    /// 3. a length running past the end is cut to `size - offset`
    pub fn clamp(size: usize, offset: Option<usize>, length: Option<usize>) -> Self {
        let mut length = match length {
            Some(length) if length <= size => length,
            _ => size,
        };
        let offset = offset.unwrap_or(0).min(size);
        if offset.saturating_add(length) > size {
            length = size - offset;
        }
        Self { offset, length }
    }

    pub fn end(self) -> usize {
        self.offset + self.length
    }

    pub fn range(self) -> Range<usize> {
        self.offset..self.end()
    }

    pub fn is_empty(self) -> bool {
        self.length == 0
    }
}
