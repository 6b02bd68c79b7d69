#![allow(dead_code)]

//! Fixtures for building log files.

const BLOCK_SIZE: usize = 32 * 1024;
const LEGACY_HEADER_SIZE: usize = 7;
const RECYCLABLE_HEADER_SIZE: usize = 11;

pub mod kind {
    pub const DELETE: u8 = 0;
    pub const SET: u8 = 1;
    pub const MERGE: u8 = 2;
    pub const LOG_DATA: u8 = 3;
    pub const SINGLE_DELETE: u8 = 7;
    pub const RANGE_DELETE: u8 = 15;
    pub const SET_WITH_DELETE: u8 = 18;
    pub const RANGE_KEY_DELETE: u8 = 19;
    pub const RANGE_KEY_UNSET: u8 = 20;
    pub const RANGE_KEY_SET: u8 = 21;
    pub const INGEST_SST: u8 = 22;
    pub const DELETE_SIZED: u8 = 23;
}

pub fn put_uvarint(buf: &mut Vec<u8>, mut n: u64) {
    while n >= 0x80 {
        buf.push((n as u8) | 0x80);
        n >>= 7;
    }
    buf.push(n as u8);
}

pub fn put_str(buf: &mut Vec<u8>, s: &[u8]) {
    put_uvarint(buf, s.len() as u64);
    buf.extend_from_slice(s);
}

pub fn uvarint(n: u64) -> Vec<u8> {
    let mut buf = Vec::new();
    put_uvarint(&mut buf, n);
    buf
}

/// Encodes a batch the way the engine writes it.
pub struct BatchBuilder {
    seq_num: u64,
    count: u32,
    body: Vec<u8>,
}

impl BatchBuilder {
    pub fn new(seq_num: u64) -> Self {
        Self {
            seq_num,
            count: 0,
            body: Vec::new(),
        }
    }

    pub fn raw(mut self, kind: u8, key: &[u8], value: Option<&[u8]>) -> Self {
        self.body.push(kind);
        put_str(&mut self.body, key);
        if let Some(value) = value {
            put_str(&mut self.body, value);
        }
        self.count += 1;
        self
    }

    pub fn set(self, key: &str, value: &str) -> Self {
        self.raw(kind::SET, key.as_bytes(), Some(value.as_bytes()))
    }

    pub fn merge(self, key: &str, value: &str) -> Self {
        self.raw(kind::MERGE, key.as_bytes(), Some(value.as_bytes()))
    }

    pub fn delete(self, key: &str) -> Self {
        self.raw(kind::DELETE, key.as_bytes(), None)
    }

    pub fn single_delete(self, key: &str) -> Self {
        self.raw(kind::SINGLE_DELETE, key.as_bytes(), None)
    }

    pub fn set_with_delete(self, key: &str) -> Self {
        self.raw(kind::SET_WITH_DELETE, key.as_bytes(), None)
    }

    pub fn log_data(self, data: &[u8]) -> Self {
        self.raw(kind::LOG_DATA, data, None)
    }

    pub fn ingest_sst(self, file_num: u64) -> Self {
        self.raw(kind::INGEST_SST, &uvarint(file_num), None)
    }

    pub fn range_delete(self, start: &str, end: &str) -> Self {
        self.raw(kind::RANGE_DELETE, start.as_bytes(), Some(end.as_bytes()))
    }

    pub fn delete_sized(self, key: &str, size: u64) -> Self {
        self.raw(kind::DELETE_SIZED, key.as_bytes(), Some(&uvarint(size)))
    }

    pub fn range_key_set(self, start: &str, end: &str, suffix: &str, value: &str) -> Self {
        let mut v = Vec::new();
        put_str(&mut v, end.as_bytes());
        put_str(&mut v, suffix.as_bytes());
        put_str(&mut v, value.as_bytes());
        self.raw(kind::RANGE_KEY_SET, start.as_bytes(), Some(&v))
    }

    pub fn range_key_unset(self, start: &str, end: &str, suffix: &str) -> Self {
        let mut v = Vec::new();
        put_str(&mut v, end.as_bytes());
        put_str(&mut v, suffix.as_bytes());
        self.raw(kind::RANGE_KEY_UNSET, start.as_bytes(), Some(&v))
    }

    pub fn range_key_delete(self, start: &str, end: &str) -> Self {
        self.raw(kind::RANGE_KEY_DELETE, start.as_bytes(), Some(end.as_bytes()))
    }

    pub fn build(self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(12 + self.body.len());
        buf.extend_from_slice(&self.seq_num.to_le_bytes());
        buf.extend_from_slice(&self.count.to_le_bytes());
        buf.extend_from_slice(&self.body);
        buf
    }
}

fn masked_crc(data: &[u8]) -> u32 {
    let c = crc32c::crc32c(data);
    (c >> 15 | c << 17).wrapping_add(0xa282_ead8)
}

/// Frames records into 32KiB blocks of chunks.
pub struct LogWriter {
    buf: Vec<u8>,
    block_offset: usize,
    // Some for recyclable chunk headers.
    log_num: Option<u32>,
}

impl LogWriter {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            block_offset: 0,
            log_num: None,
        }
    }

    pub fn recyclable(log_num: u32) -> Self {
        Self {
            log_num: Some(log_num),
            ..LogWriter::new()
        }
    }

    /// Switch the log number stamped on later chunks, emulating stale data
    /// left by a previous use of the file.
    pub fn set_log_num(&mut self, log_num: u32) {
        self.log_num = Some(log_num);
    }

    pub fn offset(&self) -> usize {
        self.buf.len()
    }

    pub fn add_record(&mut self, mut payload: &[u8]) -> &mut Self {
        let header_size = match self.log_num {
            Some(_) => RECYCLABLE_HEADER_SIZE,
            None => LEGACY_HEADER_SIZE,
        };

        let mut first = true;
        loop {
            let left = BLOCK_SIZE - self.block_offset;
            if left < header_size {
                self.buf.extend(std::iter::repeat(0).take(left));
                self.block_offset = 0;
            }

            let avail = BLOCK_SIZE - self.block_offset - header_size;
            let n = avail.min(payload.len());
            let last = n == payload.len();
            let chunk_type = match (first, last) {
                (true, true) => 1,
                (true, false) => 2,
                (false, false) => 3,
                (false, true) => 4,
            };
            self.put_chunk(chunk_type, &payload[..n]);

            payload = &payload[n..];
            first = false;
            if last {
                return self;
            }
        }
    }

    fn put_chunk(&mut self, chunk_type: u8, payload: &[u8]) {
        let mut body = Vec::with_capacity(payload.len() + 5);
        match self.log_num {
            Some(log_num) => {
                body.push(chunk_type + 4);
                body.extend_from_slice(&log_num.to_le_bytes());
            }
            None => body.push(chunk_type),
        }
        body.extend_from_slice(payload);

        self.buf.extend_from_slice(&masked_crc(&body).to_le_bytes());
        self.buf.extend_from_slice(&(payload.len() as u16).to_le_bytes());
        self.buf.extend_from_slice(&body);
        self.block_offset += 6 + body.len();
    }

    /// Append bytes that are not chunk framed.
    pub fn add_raw(&mut self, raw: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(raw);
        self.block_offset = (self.block_offset + raw.len()) % BLOCK_SIZE;
        self
    }

    pub fn finish(&self) -> Vec<u8> {
        self.buf.clone()
    }
}

pub fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}
