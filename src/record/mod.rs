//! Chunk framing of log files.
//!
//! A log is a sequence of 32KiB blocks. Each block holds one or more chunks,
//! and a logical record is either a single full chunk or a first chunk,
//! any number of middle chunks and a last chunk. Chunks never cross a block
//! boundary; a block tail too small for a header is zero padded.
//!
//! ```text
//! legacy:     | checksum u32 | length u16 | type u8 | payload |
//! recyclable: | checksum u32 | length u16 | type u8 | log number u32 | payload |
//! ```
//!
//! Recyclable chunks carry the number of the log they were written for, so
//! a reader can stop at stale data left behind when a log file is reused.

mod reader;
pub use reader::RecordReader;

use std::fmt;
use std::io;

use async_trait::async_trait;

pub const BLOCK_SIZE: usize = 32 * 1024;

pub(crate) const LEGACY_HEADER_SIZE: usize = 7;
pub(crate) const RECYCLABLE_HEADER_SIZE: usize = LEGACY_HEADER_SIZE + 4;

pub(crate) mod chunktype {
    pub(crate) const FULL: u8 = 1;
    pub(crate) const FIRST: u8 = 2;
    #[cfg(test)]
    pub(crate) const MIDDLE: u8 = 3;
    pub(crate) const LAST: u8 = 4;
    pub(crate) const RECYCLABLE_FULL: u8 = 5;
    pub(crate) const RECYCLABLE_LAST: u8 = 8;
}

/// Why a record could not be read.
///
/// The first two variants are expected at the tail of a log and mean "no more
/// usable data"; only `Other` indicates real damage.
#[derive(Debug)]
pub enum RecordError {
    /// Trailing space that was never written, typical of preallocated logs.
    ZeroedChunk,
    /// A chunk that does not decode, typical of a recycled log whose stale
    /// contents follow the last record of its current life.
    InvalidChunk,
    Other(io::Error),
}

impl RecordError {
    /// Whether this error is an expected end of usable data.
    pub fn is_soft(&self) -> bool {
        matches!(self, RecordError::ZeroedChunk | RecordError::InvalidChunk)
    }

    // io::Error is not Clone; rebuild it for sticky errors.
    pub(crate) fn replay(&self) -> RecordError {
        match self {
            RecordError::ZeroedChunk => RecordError::ZeroedChunk,
            RecordError::InvalidChunk => RecordError::InvalidChunk,
            RecordError::Other(err) => {
                RecordError::Other(io::Error::new(err.kind(), err.to_string()))
            }
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordError::ZeroedChunk => write!(f, "zeroed chunk"),
            RecordError::InvalidChunk => write!(f, "invalid chunk"),
            RecordError::Other(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for RecordError {}

impl From<io::Error> for RecordError {
    fn from(err: io::Error) -> Self {
        RecordError::Other(err)
    }
}

/// Lazy sequence of logical records.
#[async_trait]
pub trait RecordSource {
    /// Offset at which the next record starts.
    fn offset(&self) -> u64;

    /// Next record payload, `None` at the clean end of the stream.
    async fn next_record(&mut self) -> Result<Option<Vec<u8>>, RecordError>;
}

/// Masked CRC-32C of a chunk, computed over the type byte (and log number)
/// through the end of the payload.
pub(crate) fn chunk_checksum(data: &[u8]) -> u32 {
    let c = crc32c::crc32c(data);
    (c >> 15 | c << 17).wrapping_add(0xa282_ead8)
}
