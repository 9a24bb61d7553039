//! Call shapes — which overload an argument list selects.
//!
//! The command accepts several legacy argument layouts. They are told apart
//! only by argument count and by whether the first one or two positions are
//! text:
//!
//! | arguments                        | shape                                |
//! |----------------------------------|--------------------------------------|
//! | `"cid" …`                        | textual chunk id, then sub-dispatch  |
//! | `nid lid …` (first not text)     | split id, then sub-dispatch          |
//! | `cid` (single, not text)         | raw read with defaults               |
//!
//! Sub-dispatch on what follows the id:
//!
//! | after the id                     | shape                                |
//! |----------------------------------|--------------------------------------|
//! | `"Type"` alone                   | [`CallShape::Structured`]            |
//! | `"type" hex offset length`       | [`CallShape::RawTypeFirst`]          |
//! | `offset length "type" hex`       | [`CallShape::RawOffsetFirst`]        |
//!
//! Both raw orderings stay separate variants so callers and tests can see
//! which one an argument list picked.

use peek_core::{ChunkId, ElementType, LocalId, NodeId};

use super::args::Arg;
use super::decode::Radix;
use super::InspectError;

/// A chunk reference before it has been resolved against the cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Chunk(Option<ChunkId>),
    Split {
        node: Option<NodeId>,
        local: Option<LocalId>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallShape {
    /// `cid "TypeName"`
    Structured { target: Target, type_name: String },
    /// `cid "type" hex offset length`
    RawTypeFirst { target: Target, options: DecodeOptions },
    /// `cid offset length "type" hex`
    RawOffsetFirst { target: Target, options: DecodeOptions },
}

/// How to render a raw chunk. Missing positions keep their defaults:
/// whole chunk, as text, hex for numeric types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub element: ElementType,
    pub radix: Radix,
    pub offset: Option<usize>,
    pub length: Option<usize>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            element: ElementType::String,
            radix: Radix::Hex,
            offset: None,
            length: None,
        }
    }
}

/// A fully resolved raw read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeRequest {
    pub chunk_id: ChunkId,
    pub options: DecodeOptions,
}

impl CallShape {
    /// Pick the overload for `args`. Only argument types are inspected here;
    /// identifiers are resolved later, so a missing id is not an error yet.
    pub fn parse(args: &[Arg]) -> Result<Self, InspectError> {
        match args {
            [] => Err(InspectError::MissingChunkId),
            [Arg::Text(cid), rest @ ..] => {
                let id = cid
                    .parse::<ChunkId>()
                    .map_err(|_| InspectError::InvalidChunkId(cid.clone()))?;
                Self::after_id(Target::Chunk(Some(id)), rest)
            }
            [cid] => Ok(Self::RawOffsetFirst {
                target: Target::Chunk(chunk_id_arg(cid)?),
                options: DecodeOptions::default(),
            }),
            [nid, lid, rest @ ..] => {
                let target = Target::Split {
                    node: node_id_arg(nid)?,
                    local: local_id_arg(lid)?,
                };
                Self::after_id(target, rest)
            }
        }
    }

    /// Sub-dispatch on the arguments following a chunk reference.
    fn after_id(target: Target, rest: &[Arg]) -> Result<Self, InspectError> {
        match rest {
            [Arg::Text(type_name)] => Ok(Self::Structured {
                target,
                type_name: type_name.clone(),
            }),
            [Arg::Text(_), ..] => Ok(Self::RawTypeFirst {
                target,
                options: DecodeOptions::type_first(rest)?,
            }),
            _ => Ok(Self::RawOffsetFirst {
                target,
                options: DecodeOptions::offset_first(rest)?,
            }),
        }
    }

    pub fn target(&self) -> &Target {
        match self {
            Self::Structured { target, .. }
            | Self::RawTypeFirst { target, .. }
            | Self::RawOffsetFirst { target, .. } => target,
        }
    }
}

impl DecodeOptions {
    /// Legacy ordering: `type hex offset length`.
    pub fn type_first(args: &[Arg]) -> Result<Self, InspectError> {
        let mut options = Self::default();
        if let Some(element) = element_arg(args.first())? {
            options.element = element;
        }
        if let Some(radix) = radix_arg(args.get(1))? {
            options.radix = radix;
        }
        options.offset = size_arg("offset", args.get(2))?;
        options.length = size_arg("length", args.get(3))?;
        Ok(options)
    }

    /// Ordering: `offset length type hex`.
    pub fn offset_first(args: &[Arg]) -> Result<Self, InspectError> {
        let mut options = Self::default();
        options.offset = size_arg("offset", args.first())?;
        options.length = size_arg("length", args.get(1))?;
        if let Some(element) = element_arg(args.get(2))? {
            options.element = element;
        }
        if let Some(radix) = radix_arg(args.get(3))? {
            options.radix = radix;
        }
        Ok(options)
    }
}

// ── Argument conversion ───────────────────────────────────────────────────────

fn invalid(name: &'static str, arg: &Arg) -> InspectError {
    InspectError::InvalidArgument {
        name,
        value: arg.to_string(),
    }
}

/// `0x…` hex or decimal text.
fn parse_u64_text(text: &str) -> Option<u64> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

fn chunk_id_arg(arg: &Arg) -> Result<Option<ChunkId>, InspectError> {
    match arg {
        Arg::Null => Ok(None),
        Arg::Int(n) => u64::try_from(*n)
            .map(|raw| Some(ChunkId::from_raw(raw)))
            .map_err(|_| InspectError::InvalidChunkId(arg.to_string())),
        _ => Err(InspectError::InvalidChunkId(arg.to_string())),
    }
}

fn node_id_arg(arg: &Arg) -> Result<Option<NodeId>, InspectError> {
    match arg {
        Arg::Null => Ok(None),
        Arg::Int(n) => u16::try_from(*n)
            .map(|id| Some(NodeId::new(id)))
            .map_err(|_| invalid("nid", arg)),
        _ => Err(invalid("nid", arg)),
    }
}

fn local_id_arg(arg: &Arg) -> Result<Option<LocalId>, InspectError> {
    match arg {
        Arg::Null => Ok(None),
        Arg::Int(n) => u64::try_from(*n)
            .map(|id| Some(LocalId::new(id)))
            .map_err(|_| invalid("lid", arg)),
        Arg::Text(text) => parse_u64_text(text)
            .map(|id| Some(LocalId::new(id)))
            .ok_or_else(|| invalid("lid", arg)),
        Arg::Bool(_) => Err(invalid("lid", arg)),
    }
}

fn element_arg(arg: Option<&Arg>) -> Result<Option<ElementType>, InspectError> {
    match arg {
        None | Some(Arg::Null) => Ok(None),
        Some(Arg::Text(name)) => name
            .parse::<ElementType>()
            .map(Some)
            .map_err(|e| InspectError::UnsupportedElementType(e.0)),
        Some(other) => Err(InspectError::UnsupportedElementType(other.to_string())),
    }
}

/// `true`/`false`, non-zero/zero, or `hex`/`dec`.
fn radix_arg(arg: Option<&Arg>) -> Result<Option<Radix>, InspectError> {
    let hex = match arg {
        None | Some(Arg::Null) => return Ok(None),
        Some(Arg::Bool(b)) => *b,
        Some(Arg::Int(n)) => *n != 0,
        Some(arg @ Arg::Text(text)) => match text.to_ascii_lowercase().as_str() {
            "hex" => true,
            "dec" | "decimal" => false,
            _ => return Err(invalid("hex", arg)),
        },
    };
    Ok(Some(if hex { Radix::Hex } else { Radix::Decimal }))
}

fn size_arg(name: &'static str, arg: Option<&Arg>) -> Result<Option<usize>, InspectError> {
    match arg {
        None | Some(Arg::Null) => Ok(None),
        Some(arg @ Arg::Int(n)) => usize::try_from(*n)
            .map(Some)
            .map_err(|_| invalid(name, arg)),
        Some(other) => Err(invalid(name, other)),
    }
}
