//! Batches as they appear in log records.
//!
//! ```text
//! | seq_num u64 LE | count u32 LE | entry | entry | ... |
//! ```
//!
//! Entries are assigned consecutive sequence numbers starting at the batch
//! sequence number, so they must be read in order.

mod entry;
pub use entry::Entry;

mod kind;
pub use kind::Kind;

use std::fmt;

use bytes::{Buf, Bytes};

#[derive(Debug)]
pub enum BatchError {
    TooSmall { len: usize },
    Truncated,
    InvalidKind(u8),
    Key,
    Value(Kind),
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("invalid batch: ")?;
        match self {
            BatchError::TooSmall { len } => write!(f, "batch repr too small ({} bytes)", len),
            BatchError::Truncated => write!(f, "truncated entry"),
            BatchError::InvalidKind(tag) => write!(f, "invalid key kind 0x{:x}", tag),
            BatchError::Key => write!(f, "decoding user key"),
            BatchError::Value(kind) => write!(f, "decoding {} value", kind),
        }
    }
}

impl std::error::Error for BatchError {}

/// Batch decoded from the payload of one log record.
#[derive(Debug, Clone)]
pub struct Batch {
    repr: Bytes,
    seq_num: u64,
    count: u32,
}

impl Batch {
    pub const HEADER_BYTES: usize = 8 // seq_num
        + 4 // count
    ;

    /// Read the batch header. Entries are decoded lazily by [`Batch::entries`].
    pub fn decode(repr: impl Into<Bytes>) -> Result<Self, BatchError> {
        let repr = repr.into();
        if repr.len() < Batch::HEADER_BYTES {
            return Err(BatchError::TooSmall { len: repr.len() });
        }

        let mut header = &repr[..Batch::HEADER_BYTES];
        let seq_num = header.get_u64_le();
        let count = header.get_u32_le();

        Ok(Self {
            repr,
            seq_num,
            count,
        })
    }

    pub fn seq_num(&self) -> u64 {
        self.seq_num
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Encoded length including the header.
    pub fn len(&self) -> usize {
        self.repr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn entries(&self) -> Entries {
        Entries {
            data: self.repr.slice(Batch::HEADER_BYTES..),
            seq_num: self.seq_num,
            index: 0,
            count: self.count,
            failed: false,
        }
    }
}

/// Entries of a batch paired with their implied sequence numbers.
///
/// Iteration ends after `count` entries or when the data runs out, whichever
/// comes first. After a decode error the iterator is exhausted.
pub struct Entries {
    data: Bytes,
    seq_num: u64,
    index: u32,
    count: u32,
    failed: bool,
}

impl Iterator for Entries {
    type Item = Result<(u64, Entry), BatchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.index >= self.count || !self.data.has_remaining() {
            return None;
        }

        match Entry::decode_from(&mut self.data) {
            Ok(entry) => {
                let seq_num = self.seq_num.wrapping_add(self.index as u64);
                self.index += 1;
                Some(Ok((seq_num, entry)))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
