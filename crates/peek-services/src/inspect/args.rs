//! Loosely typed command arguments.

use std::fmt;

/// One positional argument as the caller supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// Explicitly skipped position; the stage default applies.
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
}

impl Arg {
    /// Type a command-line token. Decimal integers become `Int`,
    /// `true`/`false` become `Bool`, `null` and `_` become `Null`; anything
    /// else, `0x…` ids included, stays `Text`.
    pub fn classify(token: &str) -> Self {
        match token {
            "null" | "_" => Self::Null,
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            _ => match token.parse::<i64>() {
                Ok(n) => Self::Int(n),
                Err(_) => Self::Text(token.to_string()),
            },
        }
    }

    pub fn classify_all<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Vec<Self> {
        tokens.into_iter().map(Self::classify).collect()
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_tokens() {
        assert_eq!(Arg::classify("12"), Arg::Int(12));
        assert_eq!(Arg::classify("-3"), Arg::Int(-3));
        assert_eq!(Arg::classify("true"), Arg::Bool(true));
        assert_eq!(Arg::classify("false"), Arg::Bool(false));
        assert_eq!(Arg::classify("_"), Arg::Null);
        assert_eq!(Arg::classify("null"), Arg::Null);
        assert_eq!(Arg::classify("0x0001000000000001"), Arg::from("0x0001000000000001"));
        assert_eq!(Arg::classify("int"), Arg::from("int"));
    }
}
