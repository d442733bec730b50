//! Runtime loading of the native textproc library.

use std::env;
use std::ffi::{CStr, OsStr, OsString};
use std::os::raw::{c_char, c_void};

use libloading::Library;
use tracing::debug;

use crate::boundary::{symbols, Boundary, CreateFn, DestroyFn, InvokeFn, ReleaseBufferFn};
use crate::error::Result;
use crate::processor::Processor;

/// Environment variable that overrides library discovery.
pub const LIBRARY_ENV: &str = "TEXTPROC_LIBRARY";

/// A loaded native textproc library.
///
/// All four boundary symbols are resolved eagerly when the library is
/// opened, so a missing export fails at load time rather than mid-call.
///
/// # Example
///
/// ```no_run
/// use textproc::NativeLibrary;
///
/// let lib = NativeLibrary::discover()?;
/// let proc = lib.processor("[LOG]")?;
/// println!("{}", proc.process("hello")?);
/// # Ok::<(), textproc::Error>(())
/// ```
pub struct NativeLibrary {
    create: CreateFn,
    invoke: InvokeFn,
    release_buffer: ReleaseBufferFn,
    destroy: DestroyFn,
    // Keeps the loaded library mapped for as long as the function
    // pointers above are reachable.
    _library: Library,
}

impl NativeLibrary {
    /// Load the native library from `path` and resolve the boundary symbols.
    pub fn open(path: impl AsRef<OsStr>) -> Result<Self> {
        let path = path.as_ref();
        let library = unsafe { Library::new(path)? };

        let (create, invoke, release_buffer, destroy) = unsafe {
            (
                *library.get::<CreateFn>(symbols::CREATE)?,
                *library.get::<InvokeFn>(symbols::INVOKE)?,
                *library.get::<ReleaseBufferFn>(symbols::RELEASE_BUFFER)?,
                *library.get::<DestroyFn>(symbols::DESTROY)?,
            )
        };

        debug!(?path, "loaded native textproc library");

        Ok(Self {
            create,
            invoke,
            release_buffer,
            destroy,
            _library: library,
        })
    }

    /// Load the native library from its default location.
    ///
    /// Honors the `TEXTPROC_LIBRARY` environment variable if set, otherwise
    /// asks the system loader for the platform-conventional file name
    /// (`libtextproc.so`, `libtextproc.dylib`, or `textproc.dll`).
    pub fn discover() -> Result<Self> {
        let path = env::var_os(LIBRARY_ENV).unwrap_or_else(|| {
            OsString::from(format!(
                "{}textproc{}",
                env::consts::DLL_PREFIX,
                env::consts::DLL_SUFFIX
            ))
        });
        Self::open(path)
    }

    /// Create a [`Processor`] backed by this library.
    ///
    /// The processor borrows the library, so the library stays loaded for
    /// at least as long as the processor lives.
    pub fn processor(&self, prefix: &str) -> Result<Processor<'_>> {
        Processor::new(self, prefix)
    }
}

impl Boundary for NativeLibrary {
    fn create(&self, prefix: &CStr) -> *mut c_void {
        unsafe { (self.create)(prefix.as_ptr()) }
    }

    unsafe fn invoke(&self, handle: *mut c_void, text: &CStr) -> *mut c_char {
        (self.invoke)(handle, text.as_ptr())
    }

    unsafe fn release_buffer(&self, ptr: *mut c_char) {
        (self.release_buffer)(ptr)
    }

    unsafe fn destroy(&self, handle: *mut c_void) {
        (self.destroy)(handle)
    }
}
