//! The safe processor proxy.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use tracing::{debug, trace};

use crate::boundary::{Boundary, ProcHandle};
use crate::error::{Error, Result};

/// A handle-owning proxy for one native processor instance.
///
/// Each `Processor` exclusively owns one native handle from a successful
/// create until [`close`](Processor::close) or drop, whichever comes first.
/// Every boundary call is guarded by handle validity, result buffers are
/// freed on every exit path, and the native destroy runs exactly once.
///
/// The proxy borrows its boundary, so the library it came from cannot be
/// unloaded while the processor is alive.
///
/// # Example
///
/// ```no_run
/// use textproc::NativeLibrary;
///
/// let lib = NativeLibrary::discover()?;
/// let proc = lib.processor("[LOG]")?;
///
/// let out = proc.process("hello")?;
/// println!("{out}");
///
/// // The native instance is destroyed when `proc` goes out of scope.
/// # Ok::<(), textproc::Error>(())
/// ```
///
/// # Thread safety
///
/// `Processor` is `Send` but not `Sync`: the native side does not document
/// concurrent invocation on one handle, so at most one call is in flight per
/// processor. Wrap it in a `Mutex` to share across threads. Independent
/// processors are fully independent and may run concurrently.
pub struct Processor<'b> {
    boundary: &'b dyn Boundary,
    handle: ProcHandle,
}

impl<'b> Processor<'b> {
    /// Create a processor configured with `prefix`.
    ///
    /// Returns [`Error::CreationFailed`] if the native side returns a null
    /// handle; no proxy exists in that case.
    pub fn new(boundary: &'b dyn Boundary, prefix: &str) -> Result<Self> {
        let config = CString::new(prefix)?;
        let raw = boundary.create(&config);
        if raw.is_null() {
            return Err(Error::CreationFailed {
                configuration: prefix.to_string(),
            });
        }

        debug!(prefix, "created native processor");

        Ok(Self {
            boundary,
            handle: ProcHandle::new(raw),
        })
    }

    /// Process `text` through the native instance.
    ///
    /// Fails with [`Error::UseAfterRelease`] if the processor was already
    /// closed (no boundary call is made), [`Error::ProcessingFailed`] if the
    /// native side returns null, and [`Error::InvalidEncoding`] if the result
    /// buffer is not UTF-8. The native result buffer is freed before this
    /// method returns, on every path.
    pub fn process(&self, text: &str) -> Result<String> {
        if !self.handle.is_valid() {
            return Err(Error::UseAfterRelease);
        }

        let input = CString::new(text)?;
        let raw = unsafe { self.boundary.invoke(self.handle.as_ptr(), &input) };
        if raw.is_null() {
            return Err(Error::ProcessingFailed);
        }

        trace!(len = text.len(), "received result buffer");

        // The guard owns the native buffer from here on; decode copies the
        // bytes out and the drop frees the buffer even if decoding fails.
        let buffer = ResultBuffer {
            ptr: raw,
            boundary: self.boundary,
        };
        buffer.decode()
    }

    /// Check whether this processor has been released.
    pub fn is_released(&self) -> bool {
        !self.handle.is_valid()
    }

    /// Destroy the native instance and invalidate the handle.
    ///
    /// Idempotent: the first call destroys, later calls (including the one
    /// from drop) are no-ops. After `close`, [`process`](Processor::process)
    /// fails with [`Error::UseAfterRelease`].
    pub fn close(&mut self) {
        if !self.handle.is_valid() {
            return;
        }

        unsafe { self.boundary.destroy(self.handle.as_ptr()) };
        self.handle = ProcHandle::invalid();
        debug!("destroyed native processor");
    }
}

impl Drop for Processor<'_> {
    fn drop(&mut self) {
        self.close();
    }
}

// Send: the handle is an address token that moves with its owning proxy,
// and the boundary reference is Send because Boundary is Sync.
// Not Sync: one call in flight per handle (see type docs).
unsafe impl Send for Processor<'_> {}

/// Scope guard for a native result buffer.
///
/// Frees the buffer exactly once when dropped, so decode errors and early
/// returns cannot leak it, and nothing can read it after release.
struct ResultBuffer<'a> {
    ptr: *mut c_char,
    boundary: &'a dyn Boundary,
}

impl ResultBuffer<'_> {
    /// Copy the buffer contents into an owned `String`.
    ///
    /// Consumes the guard; the native buffer is freed as soon as the bytes
    /// have been copied. An empty buffer decodes to an empty string.
    fn decode(self) -> Result<String> {
        unsafe { CStr::from_ptr(self.ptr) }
            .to_str()
            .map(str::to_owned)
            .map_err(Error::InvalidEncoding)
        // self drops here, releasing the buffer.
    }
}

impl Drop for ResultBuffer<'_> {
    fn drop(&mut self) {
        trace!("releasing result buffer");
        unsafe { self.boundary.release_buffer(self.ptr) };
    }
}
