//! Error types for the textproc crate.

use std::ffi::NulError;
use std::str::Utf8Error;

use thiserror::Error;

/// Result type alias for textproc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for textproc operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The native side returned a null handle from create.
    #[error("native processor creation failed (prefix: {configuration:?})")]
    CreationFailed {
        /// The configuration the processor was created with.
        configuration: String,
    },

    /// The native side returned a null result buffer from invoke.
    #[error("native text processing failed")]
    ProcessingFailed,

    /// The result buffer is not valid UTF-8.
    #[error("result buffer is not valid UTF-8")]
    InvalidEncoding(#[source] Utf8Error),

    /// The processor was already released.
    #[error("processor already released")]
    UseAfterRelease,

    /// Text contains an interior NUL byte and cannot cross the
    /// NUL-terminated boundary.
    #[error("text contains an interior NUL byte")]
    NulByte(#[from] NulError),

    /// The native library could not be loaded or is missing a symbol.
    #[error("failed to load native library")]
    Library(#[from] libloading::Error),
}

impl Error {
    /// Check if this is a use-after-release error.
    pub fn is_use_after_release(&self) -> bool {
        matches!(self, Error::UseAfterRelease)
    }

    /// Check if this is a creation failure.
    pub fn is_creation_failed(&self) -> bool {
        matches!(self, Error::CreationFailed { .. })
    }

    /// Check if this is a processing failure.
    pub fn is_processing_failed(&self) -> bool {
        matches!(self, Error::ProcessingFailed)
    }

    /// Check if this is a library load error.
    pub fn is_library(&self) -> bool {
        matches!(self, Error::Library(_))
    }
}
