//! Unsigned LEB128 varints, as used by batch length prefixes and range key
//! payloads.

use bytes::{Buf, BufMut, Bytes};

/// Maximum encoded length of a u64.
pub const MAX_VARINT_LEN64: usize = 10;

/// Decode a varint from the front of `src`, advancing past it.
/// Returns `None` when the input is truncated or overflows a u64; `src` is
/// left untouched in that case.
pub fn decode_uvarint(src: &mut impl Buf) -> Option<u64> {
    let (value, n) = peek_uvarint(src.chunk())?;
    src.advance(n);
    Some(value)
}

/// Lenient decode used for display. Malformed input renders as 0.
pub fn uvarint(src: &[u8]) -> u64 {
    peek_uvarint(src).map(|(value, _)| value).unwrap_or(0)
}

/// Decode a varint length prefixed byte string, advancing past it.
pub fn decode_varstring(src: &mut Bytes) -> Option<Bytes> {
    let len = decode_uvarint(src)?;
    if (src.remaining() as u64) < len {
        return None;
    }
    Some(src.split_to(len as usize))
}

pub fn encode_uvarint(mut value: u64, dst: &mut impl BufMut) {
    while value >= 0x80 {
        dst.put_u8((value as u8) | 0x80);
        value >>= 7;
    }
    dst.put_u8(value as u8);
}

fn peek_uvarint(src: &[u8]) -> Option<(u64, usize)> {
    let mut value: u64 = 0;
    let mut shift = 0;
    for (i, &b) in src.iter().enumerate() {
        if i == MAX_VARINT_LEN64 {
            return None;
        }
        if b < 0x80 {
            // The tenth byte may only carry the top bit of a u64.
            if i == MAX_VARINT_LEN64 - 1 && b > 1 {
                return None;
            }
            return Some((value | (b as u64) << shift, i + 1));
        }
        value |= ((b & 0x7f) as u64) << shift;
        shift += 7;
    }
    None
}
