//! Range key spans encoded in `RangeKeySet`, `RangeKeyUnset` and
//! `RangeKeyDelete` entries.
//!
//! The entry key is the span start. The value holds the rest:
//!
//! ```text
//! RangeKeySet:    | end varstring | (suffix varstring, value varstring)* |
//! RangeKeyUnset:  | end varstring | suffix varstring* |
//! RangeKeyDelete: | end (raw bytes) |
//! ```

use std::fmt;

use bytes::{Buf, Bytes};

use crate::batch::Kind;
use crate::varint::decode_varstring;

#[derive(Debug, Clone, PartialEq)]
pub enum RangeKeyError {
    NotRangeKey(Kind),
    EndKey,
    SuffixValue,
    UnsetSuffix,
}

impl fmt::Display for RangeKeyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RangeKeyError::NotRangeKey(kind) => write!(f, "{} is not a range key kind", kind),
            RangeKeyError::EndKey => write!(f, "unable to decode range key end"),
            RangeKeyError::SuffixValue => {
                write!(f, "unable to decode range key suffix-value tuple")
            }
            RangeKeyError::UnsetSuffix => write!(f, "unable to decode range key unset suffix"),
        }
    }
}

impl std::error::Error for RangeKeyError {}

/// A key interval `[start, end)` with the range keys applied over it.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Bytes,
    pub end: Bytes,
    pub keys: Vec<RangeKey>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeKey {
    pub seq_num: u64,
    pub kind: Kind,
    pub suffix: Bytes,
    pub value: Bytes,
}

/// Decode the span of a range key entry. `seq_num` is stamped on every key of
/// the span.
pub fn decode(
    kind: Kind,
    start: Bytes,
    seq_num: u64,
    value: Bytes,
) -> Result<Span, RangeKeyError> {
    let key = |suffix: Bytes, value: Bytes| RangeKey {
        seq_num,
        kind,
        suffix,
        value,
    };

    match kind {
        Kind::RangeKeyDelete => Ok(Span {
            start,
            end: value,
            keys: vec![key(Bytes::new(), Bytes::new())],
        }),
        Kind::RangeKeySet => {
            let mut src = value;
            let end = decode_varstring(&mut src).ok_or(RangeKeyError::EndKey)?;
            let mut keys = Vec::new();
            while src.has_remaining() {
                let suffix = decode_varstring(&mut src).ok_or(RangeKeyError::SuffixValue)?;
                let value = decode_varstring(&mut src).ok_or(RangeKeyError::SuffixValue)?;
                keys.push(key(suffix, value));
            }
            Ok(Span { start, end, keys })
        }
        Kind::RangeKeyUnset => {
            let mut src = value;
            let end = decode_varstring(&mut src).ok_or(RangeKeyError::EndKey)?;
            let mut keys = Vec::new();
            while src.has_remaining() {
                let suffix = decode_varstring(&mut src).ok_or(RangeKeyError::UnsetSuffix)?;
                keys.push(key(suffix, Bytes::new()));
            }
            Ok(Span { start, end, keys })
        }
        other => Err(RangeKeyError::NotRangeKey(other)),
    }
}

impl Span {
    /// Render as `[start, end): #seq,KIND,suffix,value ...` using `fmt_key`
    /// for the bounds. Suffixes and values are shown as text.
    pub fn pretty<F>(&self, fmt_key: F) -> String
    where
        F: Fn(&[u8]) -> String,
    {
        let mut out = format!("[{}, {}): ", fmt_key(&self.start), fmt_key(&self.end));
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&format!("#{},{}", key.seq_num, key.kind.short_name()));
            if !key.suffix.is_empty() || !key.value.is_empty() {
                out.push(',');
                out.push_str(&String::from_utf8_lossy(&key.suffix));
            }
            if !key.value.is_empty() {
                out.push(',');
                out.push_str(&String::from_utf8_lossy(&key.value));
            }
        }
        out
    }
}
