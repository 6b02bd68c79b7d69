//! Text rendering of keys, values and batch entries.

mod entry;
pub use entry::format_entry;

use std::fmt::{self, Write as _};
use std::str::FromStr;

use crate::WaltoolError;

/// How a byte string is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Renders nothing.
    Null,
    /// Double quoted with non printable bytes escaped.
    Quoted,
    /// Decimal byte length.
    Size,
    Hex,
    UpperHex,
    /// Lossy UTF-8.
    Text,
}

impl Mode {
    pub fn render(self, v: &[u8]) -> String {
        match self {
            Mode::Null => String::new(),
            Mode::Quoted => quote(v),
            Mode::Size => v.len().to_string(),
            Mode::Hex => v.iter().map(|b| format!("{:02x}", b)).collect(),
            Mode::UpperHex => v.iter().map(|b| format!("{:02X}", b)).collect(),
            Mode::Text => String::from_utf8_lossy(v).into_owned(),
        }
    }
}

impl FromStr for Mode {
    type Err = WaltoolError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = match s {
            "null" => Mode::Null,
            // No comparer specific formatting exists, so pretty falls back to quoting.
            "quoted" | "pretty" | "%q" => Mode::Quoted,
            "size" => Mode::Size,
            "hex" | "%x" => Mode::Hex,
            "%X" => Mode::UpperHex,
            "text" | "%s" => Mode::Text,
            _ => {
                return Err(WaltoolError::UnknownFormatter {
                    mode: s.to_owned(),
                })
            }
        };
        Ok(mode)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Mode::Null => "null",
            Mode::Quoted => "quoted",
            Mode::Size => "size",
            Mode::Hex => "hex",
            Mode::UpperHex => "%X",
            Mode::Text => "text",
        };
        f.write_str(name)
    }
}

fn quote(v: &[u8]) -> String {
    let mut out = String::with_capacity(v.len() + 2);
    out.push('"');
    for &b in v {
        match b {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(b as char),
            _ => {
                let _ = write!(out, "\\x{:02x}", b);
            }
        }
    }
    out.push('"');
    out
}

/// Renders user keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyFormatter(Mode);

impl KeyFormatter {
    pub fn new(mode: Mode) -> Self {
        Self(mode)
    }

    pub fn mode(&self) -> Mode {
        self.0
    }

    pub fn format(&self, key: &[u8]) -> String {
        self.0.render(key)
    }
}

impl Default for KeyFormatter {
    fn default() -> Self {
        Self(Mode::Quoted)
    }
}

impl FromStr for KeyFormatter {
    type Err = WaltoolError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(KeyFormatter)
    }
}

/// Renders values. The owning key is passed along for key dependent
/// renderings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueFormatter(Mode);

impl ValueFormatter {
    pub fn new(mode: Mode) -> Self {
        Self(mode)
    }

    pub fn mode(&self) -> Mode {
        self.0
    }

    pub fn format(&self, _key: &[u8], value: &[u8]) -> String {
        self.0.render(value)
    }
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self(Mode::Size)
    }
}

impl FromStr for ValueFormatter {
    type Err = WaltoolError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(ValueFormatter)
    }
}

/// Rendering settings, fixed before the first file is dumped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormatterConfig {
    pub key: KeyFormatter,
    pub value: ValueFormatter,
    pub verbose: bool,
}
