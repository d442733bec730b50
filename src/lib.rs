//! Rust bindings for the textproc native text-processing library.
//!
//! The native side exposes exactly four C functions: create a processor
//! with a prefix, process a piece of text, free a returned string buffer,
//! and destroy the processor. This crate wraps that boundary in a safe,
//! ownership-driven API: a [`Processor`] owns one native handle, frees
//! every result buffer immediately after decoding it, and destroys the
//! native instance exactly once no matter how it leaves scope.
//!
//! # Example
//!
//! ```no_run
//! use textproc::NativeLibrary;
//!
//! fn main() -> textproc::Result<()> {
//!     // Load libtextproc from the default location (or $TEXTPROC_LIBRARY).
//!     let lib = NativeLibrary::discover()?;
//!
//!     // Each processor owns one independently configured native instance.
//!     let logger = lib.processor("[LOG]")?;
//!     println!("{}", logger.process("first message")?);
//!     println!("{}", logger.process("second message")?);
//!
//!     // Destroyed here when `logger` goes out of scope; or call
//!     // `close()` to release early. Both paths destroy exactly once.
//!     Ok(())
//! }
//! ```
//!
//! # Boundary contract
//!
//! The raw ABI lives in [`boundary`]: null is the only failure signal the
//! native side has, every non-null result buffer must be freed through the
//! boundary exactly once, and a destroyed handle must never be used again.
//! [`Processor`] upholds all of that structurally, so the unsafe surface
//! stays inside this crate.

pub mod boundary;
pub mod error;
pub mod library;
pub mod processor;

// Re-export main types at the crate root
pub use boundary::Boundary;
pub use error::{Error, Result};
pub use library::NativeLibrary;
pub use processor::Processor;
