use std::convert::TryFrom;

use bytes::{Buf, Bytes};

use crate::batch::{BatchError, Kind};
use crate::varint::decode_varstring;

/// One mutation of a batch.
///
/// The layout of `value` depends on `kind`: an end key for `RangeDelete`, a
/// varint size for `DeleteSized`, an encoded span tail for range keys, the
/// blob for `LogData`. `IngestSST` keeps its varint file number in `key`.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub kind: Kind,
    pub key: Bytes,
    pub value: Option<Bytes>,
}

impl Entry {
    // | kind u8 | key varstring | value varstring (some kinds) |
    pub(super) fn decode_from(src: &mut Bytes) -> Result<Self, BatchError> {
        if !src.has_remaining() {
            return Err(BatchError::Truncated);
        }
        let tag = src.get_u8();
        let kind = Kind::try_from(tag).map_err(BatchError::InvalidKind)?;

        let key = decode_varstring(src).ok_or(BatchError::Key)?;
        let value = if kind.has_value() {
            Some(decode_varstring(src).ok_or(BatchError::Value(kind))?)
        } else {
            None
        };

        // Log data is written in the key slot; expose it as the payload.
        if kind == Kind::LogData {
            return Ok(Entry {
                kind,
                key: Bytes::new(),
                value: Some(key),
            });
        }

        Ok(Entry { kind, key, value })
    }

    pub fn value_or_empty(&self) -> &[u8] {
        self.value.as_deref().unwrap_or_default()
    }
}
