pub(crate) mod internal;

use std::fmt;

use crate::common::Error;

#[derive(Debug)]
pub enum WaltoolError {
    // One or more input files could not be dumped cleanly.
    DumpFailed { failed: usize, attempted: usize },
    // Formatter mode name is not recognized.
    UnknownFormatter { mode: String },
    Internal(Error),
}

impl fmt::Display for WaltoolError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WaltoolError::DumpFailed { failed, attempted } => {
                write!(f, "{} of {} files failed to dump", failed, attempted)
            }
            WaltoolError::UnknownFormatter { mode } => {
                write!(f, "unknown formatter mode {:?}", mode)
            }
            WaltoolError::Internal(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for WaltoolError {}

impl From<Error> for WaltoolError {
    fn from(err: Error) -> Self {
        WaltoolError::Internal(err)
    }
}

impl From<std::io::Error> for WaltoolError {
    fn from(err: std::io::Error) -> Self {
        WaltoolError::Internal(err.into())
    }
}
