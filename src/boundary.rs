//! The C boundary contract exposed by the native library.
//!
//! Four operations cross the boundary: create a processor, invoke it,
//! free a result buffer, destroy the processor. All text is NUL-terminated
//! UTF-8; the only failure signal is a null pointer. Users should prefer
//! the safe [`Processor`](crate::Processor) wrapper.

use std::ffi::CStr;
use std::os::raw::{c_char, c_void};

/// `void* create_processor(const char* prefix)`
pub type CreateFn = unsafe extern "C" fn(prefix: *const c_char) -> *mut c_void;

/// `char* processor_process_text(void* handle, const char* text)`
pub type InvokeFn = unsafe extern "C" fn(handle: *mut c_void, text: *const c_char) -> *mut c_char;

/// `void free_string_memory(char* ptr)`
pub type ReleaseBufferFn = unsafe extern "C" fn(ptr: *mut c_char);

/// `void destroy_processor(void* handle)`
pub type DestroyFn = unsafe extern "C" fn(handle: *mut c_void);

/// Exported symbol names, as the native library publishes them.
pub mod symbols {
    /// Symbol for [`CreateFn`](super::CreateFn).
    pub const CREATE: &[u8] = b"create_processor";
    /// Symbol for [`InvokeFn`](super::InvokeFn).
    pub const INVOKE: &[u8] = b"processor_process_text";
    /// Symbol for [`ReleaseBufferFn`](super::ReleaseBufferFn).
    pub const RELEASE_BUFFER: &[u8] = b"free_string_memory";
    /// Symbol for [`DestroyFn`](super::DestroyFn).
    pub const DESTROY: &[u8] = b"destroy_processor";
}

/// The four boundary operations.
///
/// The production implementation is [`NativeLibrary`](crate::NativeLibrary),
/// which forwards to the loaded symbols. Tests substitute in-process doubles
/// to count calls and inject failures.
///
/// Implementations must be `Send + Sync`: one library serves any number of
/// independent processors, possibly on different threads.
pub trait Boundary: Send + Sync {
    /// Create a processor configured with `prefix`.
    ///
    /// Returns a handle, or null if the native side failed to construct.
    /// A null return is the only failure signal; no partial instance exists
    /// after it.
    fn create(&self, prefix: &CStr) -> *mut c_void;

    /// Invoke the processor identified by `handle` on `text`.
    ///
    /// Returns a result buffer the caller must pass to
    /// [`release_buffer`](Boundary::release_buffer) exactly once, or null on
    /// failure. The native side does not retain `text` past the call.
    ///
    /// # Safety
    ///
    /// `handle` must come from a successful [`create`](Boundary::create) on
    /// this boundary and must not have been destroyed.
    unsafe fn invoke(&self, handle: *mut c_void, text: &CStr) -> *mut c_char;

    /// Free a result buffer returned by [`invoke`](Boundary::invoke).
    ///
    /// # Safety
    ///
    /// `ptr` must be a non-null buffer obtained from `invoke` on this
    /// boundary, not yet released. The buffer must not be read afterwards.
    unsafe fn release_buffer(&self, ptr: *mut c_char);

    /// Destroy the processor identified by `handle`.
    ///
    /// # Safety
    ///
    /// `handle` must come from a successful [`create`](Boundary::create) on
    /// this boundary and must not have been destroyed already.
    unsafe fn destroy(&self, handle: *mut c_void);
}

/// Opaque handle to a native processor instance.
///
/// Nullable so the owning proxy can invalidate it after destroy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ProcHandle {
    raw: *mut c_void,
}

impl ProcHandle {
    /// Wrap a raw handle returned by the boundary.
    #[inline]
    pub(crate) const fn new(raw: *mut c_void) -> Self {
        Self { raw }
    }

    /// Create an invalid (null) handle.
    #[inline]
    pub(crate) const fn invalid() -> Self {
        Self {
            raw: std::ptr::null_mut(),
        }
    }

    /// Check if this handle is valid (non-null).
    #[inline]
    pub(crate) fn is_valid(&self) -> bool {
        !self.raw.is_null()
    }

    /// Get the raw pointer for a boundary call.
    #[inline]
    pub(crate) fn as_ptr(&self) -> *mut c_void {
        self.raw
    }
}

impl Default for ProcHandle {
    fn default() -> Self {
        Self::invalid()
    }
}
