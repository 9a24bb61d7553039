//! Element types — the fixed-width units chunk bytes are rendered in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Byte,
    Short,
    Int,
    Long,
    /// The whole window as Latin-1 text.
    #[serde(alias = "str")]
    String,
}

impl ElementType {
    /// Width in bytes. `None` for `String`, which has no fixed width.
    pub const fn width(self) -> Option<usize> {
        match self {
            Self::Byte => Some(1),
            Self::Short => Some(2),
            Self::Int => Some(4),
            Self::Long => Some(8),
            Self::String => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::String => "string",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported element type {0:?}")]
pub struct UnknownElementType(pub String);

impl FromStr for ElementType {
    type Err = UnknownElementType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "byte" => Ok(Self::Byte),
            "short" => Ok(Self::Short),
            "int" => Ok(Self::Int),
            "long" => Ok(Self::Long),
            "str" | "string" => Ok(Self::String),
            _ => Err(UnknownElementType(s.to_string())),
        }
    }
}
