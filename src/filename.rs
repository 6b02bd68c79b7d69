//! Recovery of file numbers from engine file names.
//!
//! Log files are named `NNNNNN.log`. The number matters because recycled logs
//! stamp it into every chunk header, and the record reader uses it to tell the
//! current log's chunks apart from stale chunks of the file's previous life.

use std::fmt;
use std::path::Path;

use atoi::FromRadix10Checked;

use crate::common::debug;

/// File number assigned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct FileNum(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Log,
    Table,
    Temp,
    Manifest,
    Options,
}

impl FileNum {
    /// Log number stamped into recyclable chunk headers.
    pub fn log_num(self) -> u32 {
        self.0 as u32
    }
}

impl fmt::Display for FileNum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:06}", self.0)
    }
}

/// Parse the base name of `path`. Returns `None` for anything that does not
/// follow the naming convention.
pub fn parse_filename(path: impl AsRef<Path>) -> Option<(FileType, FileNum)> {
    let name = path.as_ref().file_name()?.to_str()?;

    if let Some(num) = name.strip_prefix("MANIFEST-") {
        return parse_num(num).map(|n| (FileType::Manifest, n));
    }
    if let Some(num) = name.strip_prefix("OPTIONS-") {
        return parse_num(num).map(|n| (FileType::Options, n));
    }

    let (num, ext) = name.split_once('.')?;
    let file_type = match ext {
        "log" => FileType::Log,
        "sst" => FileType::Table,
        "dbtmp" => FileType::Temp,
        _ => return None,
    };
    parse_num(num).map(|n| (file_type, n))
}

/// File number of `path`, or zero when the name is not recognized. Decoding
/// a non-recycled log does not depend on the number, so this never fails.
pub fn file_num_or_zero(path: impl AsRef<Path>) -> FileNum {
    match parse_filename(path.as_ref()) {
        Some((_, num)) => num,
        None => {
            debug!(
                "unrecognized file name {}, assuming file number 0",
                path.as_ref().display()
            );
            FileNum(0)
        }
    }
}

// digits only, whole string consumed, no overflow.
fn parse_num(s: &str) -> Option<FileNum> {
    if s.is_empty() {
        return None;
    }
    match u64::from_radix_10_checked(s.as_bytes()) {
        (Some(n), used) if used == s.len() => Some(FileNum(n)),
        _ => None,
    }
}
