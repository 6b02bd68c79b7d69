use std::io;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::common::trace;
use crate::record::{
    chunk_checksum, chunktype, RecordError, RecordSource, BLOCK_SIZE, LEGACY_HEADER_SIZE,
    RECYCLABLE_HEADER_SIZE,
};

// Outcome of positioning on the next chunk.
enum Step {
    Chunk,
    EndOfStream,
}

/// Reads logical records from a chunk framed stream.
pub struct RecordReader<R> {
    reader: R,
    // expected log number of recyclable chunks.
    log_num: u32,
    buf: Box<[u8]>,
    // valid bytes in buf.
    n: usize,
    // current chunk payload is buf[begin..end].
    begin: usize,
    end: usize,
    // index of the block in buf, -1 before the first read.
    block_num: i64,
    // whether the current chunk completes its record.
    last: bool,
    // errors are sticky; end of stream is remembered as Ok(None).
    done: Option<Result<(), RecordError>>,
}

impl<R> RecordReader<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(reader: R, log_num: u32) -> Self {
        Self {
            reader,
            log_num,
            buf: vec![0; BLOCK_SIZE].into_boxed_slice(),
            n: 0,
            begin: 0,
            end: 0,
            block_num: -1,
            last: false,
            done: None,
        }
    }

    /// Offset in the stream where the next record begins. Only meaningful
    /// when called between records.
    pub fn offset(&self) -> u64 {
        if self.block_num < 0 {
            return 0;
        }
        self.block_num as u64 * BLOCK_SIZE as u64 + self.end as u64
    }

    /// Read the next record. Returns `Ok(None)` at the clean end of the
    /// stream. Once an error is returned every later call returns it again.
    pub async fn next(&mut self) -> Result<Option<Vec<u8>>, RecordError> {
        match &self.done {
            Some(Ok(())) => return Ok(None),
            Some(Err(err)) => return Err(err.replay()),
            None => {}
        }

        match self.read_record().await {
            Ok(Some(record)) => Ok(Some(record)),
            Ok(None) => {
                self.done = Some(Ok(()));
                Ok(None)
            }
            Err(err) => {
                self.done = Some(Err(err.replay()));
                Err(err)
            }
        }
    }

    async fn read_record(&mut self) -> Result<Option<Vec<u8>>, RecordError> {
        self.begin = self.end;
        if let Step::EndOfStream = self.next_chunk(true).await? {
            return Ok(None);
        }

        let mut record = self.buf[self.begin..self.end].to_vec();
        while !self.last {
            match self.next_chunk(false).await? {
                Step::Chunk => record.extend_from_slice(&self.buf[self.begin..self.end]),
                Step::EndOfStream => {
                    return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into())
                }
            }
        }
        Ok(Some(record))
    }

    // Position begin..end on the payload of the next chunk. When want_first is
    // set, chunks that continue an earlier record are skipped.
    async fn next_chunk(&mut self, want_first: bool) -> Result<Step, RecordError> {
        loop {
            if self.end + LEGACY_HEADER_SIZE <= self.n {
                let h = &self.buf[self.end..];
                let checksum = u32::from_le_bytes([h[0], h[1], h[2], h[3]]);
                let length = u16::from_le_bytes([h[4], h[5]]) as usize;
                let mut chunk_type = h[6];

                if checksum == 0 && length == 0 && chunk_type == 0 {
                    if self.end + RECYCLABLE_HEADER_SIZE > self.n {
                        // Block trailer.
                        self.end = self.n;
                        continue;
                    }
                    return Err(RecordError::ZeroedChunk);
                }

                let mut header_size = LEGACY_HEADER_SIZE;
                if (chunktype::RECYCLABLE_FULL..=chunktype::RECYCLABLE_LAST).contains(&chunk_type)
                {
                    header_size = RECYCLABLE_HEADER_SIZE;
                    if self.end + header_size > self.n {
                        return Err(RecordError::InvalidChunk);
                    }
                    let log_num = u32::from_le_bytes([h[7], h[8], h[9], h[10]]);
                    if log_num != self.log_num {
                        trace!(
                            "chunk of log {} while reading log {} at block {}",
                            log_num,
                            self.log_num,
                            self.block_num
                        );
                        if want_first {
                            // A previous life of this file; nothing more to read.
                            return Ok(Step::EndOfStream);
                        }
                        return Err(RecordError::InvalidChunk);
                    }
                    chunk_type -= chunktype::RECYCLABLE_FULL - 1;
                }

                self.begin = self.end + header_size;
                self.end = self.begin + length;
                if self.end > self.n {
                    return Err(RecordError::InvalidChunk);
                }
                let checksummed = &self.buf[self.begin - header_size + 6..self.end];
                if checksum != chunk_checksum(checksummed) {
                    return Err(RecordError::InvalidChunk);
                }
                if want_first && chunk_type != chunktype::FULL && chunk_type != chunktype::FIRST {
                    continue;
                }
                self.last = chunk_type == chunktype::FULL || chunk_type == chunktype::LAST;
                return Ok(Step::Chunk);
            }

            // The previous read returned a partial block, so the stream is
            // exhausted.
            if self.n < BLOCK_SIZE && self.block_num >= 0 {
                if !want_first || self.end != self.n {
                    return Err(RecordError::InvalidChunk);
                }
                return Ok(Step::EndOfStream);
            }

            let n = self.read_block().await?;
            if n == 0 {
                if want_first {
                    return Ok(Step::EndOfStream);
                }
                return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
            }
            self.begin = 0;
            self.end = 0;
            self.n = n;
            self.block_num += 1;
        }
    }

    // Fill buf with up to one block, stopping early only at end of stream.
    async fn read_block(&mut self) -> io::Result<usize> {
        let mut n = 0;
        while n < BLOCK_SIZE {
            match self.reader.read(&mut self.buf[n..]).await {
                Ok(0) => break,
                Ok(read) => n += read,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(n)
    }
}

#[async_trait]
impl<R> RecordSource for RecordReader<R>
where
    R: AsyncRead + Unpin + Send,
{
    fn offset(&self) -> u64 {
        RecordReader::offset(self)
    }

    async fn next_record(&mut self) -> Result<Option<Vec<u8>>, RecordError> {
        self.next().await
    }
}
