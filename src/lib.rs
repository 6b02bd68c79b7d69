#![allow(clippy::module_inception)]

pub mod batch;
pub mod cli;
pub mod config;
pub mod dump;
pub mod error;
pub mod filename;
pub mod format;
pub mod rangekey;
pub mod record;
pub mod varint;

pub use crate::error::WaltoolError;
pub type Result<T, E = crate::error::WaltoolError> = std::result::Result<T, E>;

pub(crate) mod common {
    pub(crate) type Error = crate::error::internal::Error;
    pub(crate) type ErrorKind = crate::error::internal::ErrorKind;

    pub use tracing::{debug, info, trace, warn};
}
