//! Typed decoder — renders chunk bytes as hex, decimal, or text.
//!
//! Multi-byte elements are big-endian, the order the cluster writes them in.

use peek_core::ElementType;

use super::window::Window;

/// Display radix for numeric elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Radix {
    #[default]
    Hex,
    Decimal,
}

/// Read position over an immutable byte slice. Reads hand back the advanced
/// cursor instead of mutating in place.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn position(self) -> usize {
        self.pos
    }

    /// Next `N` bytes, or `None` if fewer than `N` remain.
    pub fn read_array<const N: usize>(self) -> Option<([u8; N], Self)> {
        let end = self.pos.checked_add(N)?;
        let slice = self.bytes.get(self.pos..end)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Some((out, Self { bytes: self.bytes, pos: end }))
    }

    /// Everything left.
    pub fn read_rest(self) -> (&'a [u8], Self) {
        let rest = &self.bytes[self.pos..];
        (rest, Self { bytes: self.bytes, pos: self.bytes.len() })
    }
}

/// One fixed-width numeric element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
}

impl Element {
    /// Read one element of `kind`. `None` for `String` or when the cursor
    /// holds less than one full element.
    pub fn read(kind: ElementType, cursor: Cursor<'_>) -> Option<(Self, Cursor<'_>)> {
        match kind {
            ElementType::Byte => cursor
                .read_array::<1>()
                .map(|(b, c)| (Self::Byte(i8::from_be_bytes(b)), c)),
            ElementType::Short => cursor
                .read_array::<2>()
                .map(|(b, c)| (Self::Short(i16::from_be_bytes(b)), c)),
            ElementType::Int => cursor
                .read_array::<4>()
                .map(|(b, c)| (Self::Int(i32::from_be_bytes(b)), c)),
            ElementType::Long => cursor
                .read_array::<8>()
                .map(|(b, c)| (Self::Long(i64::from_be_bytes(b)), c)),
            ElementType::String => None,
        }
    }

    /// Hex is the unsigned bit pattern padded to two digits per byte.
    pub fn render(self, radix: Radix) -> String {
        match (self, radix) {
            (Self::Byte(v), Radix::Hex) => format!("{:02x}", v as u8),
            (Self::Short(v), Radix::Hex) => format!("{:04x}", v as u16),
            (Self::Int(v), Radix::Hex) => format!("{:08x}", v as u32),
            (Self::Long(v), Radix::Hex) => format!("{:016x}", v as u64),
            (Self::Byte(v), Radix::Decimal) => v.to_string(),
            (Self::Short(v), Radix::Decimal) => v.to_string(),
            (Self::Int(v), Radix::Decimal) => v.to_string(),
            (Self::Long(v), Radix::Decimal) => v.to_string(),
        }
    }

    pub fn to_json(self) -> serde_json::Value {
        match self {
            Self::Byte(v) => v.into(),
            Self::Short(v) => v.into(),
            Self::Int(v) => v.into(),
            Self::Long(v) => v.into(),
        }
    }
}

/// Bytes as Latin-1 text; every byte maps to exactly one char.
pub fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Render the window of `data` as `kind`. Numeric elements are joined by a
/// single space; a trailing partial element is dropped.
pub fn render(data: &[u8], window: Window, kind: ElementType, radix: Radix) -> String {
    let bytes = data.get(window.range()).unwrap_or_default();
    if kind.width().is_none() {
        return latin1(bytes);
    }

    let mut tokens = Vec::new();
    let mut cursor = Cursor::new(bytes);
    while let Some((element, next)) = Element::read(kind, cursor) {
        tokens.push(element.render(radix));
        cursor = next;
    }
    tokens.join(" ")
}
