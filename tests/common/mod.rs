//! An in-process boundary double with per-operation call counting.
//!
//! Behaves like the real native library (prefix stored at create, result
//! buffers allocated per invoke) but keeps accounting the tests can assert
//! on, and can be configured to fail or misbehave.

#![allow(dead_code)]

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_void};
use std::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};

use textproc::Boundary;

/// The stub's native-side instance: just the stored prefix.
struct StubInstance {
    prefix: String,
}

/// Counting test double for the four boundary operations.
#[derive(Default)]
pub struct StubBoundary {
    pub create_calls: AtomicUsize,
    pub invoke_calls: AtomicUsize,
    pub release_calls: AtomicUsize,
    pub destroy_calls: AtomicUsize,
    /// Buffers handed out and not yet released. Goes negative on double-free.
    pub live_buffers: AtomicIsize,
    /// Instances created and not yet destroyed. Goes negative on double-destroy.
    pub live_instances: AtomicIsize,
    fail_create: bool,
    fail_invoke: bool,
    garble_output: bool,
    empty_output: bool,
}

impl StubBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    /// A double whose create always returns null.
    pub fn failing_create() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }

    /// A double whose invoke always returns null.
    pub fn failing_invoke() -> Self {
        Self {
            fail_invoke: true,
            ..Self::default()
        }
    }

    /// A double whose result buffers are not valid UTF-8.
    pub fn garbled() -> Self {
        Self {
            garble_output: true,
            ..Self::default()
        }
    }

    /// A double whose result buffers are always empty.
    pub fn empty_output() -> Self {
        Self {
            empty_output: true,
            ..Self::default()
        }
    }

    /// Snapshot of all four call counters, for "no further boundary calls"
    /// assertions.
    pub fn counts(&self) -> [usize; 4] {
        [
            self.create_calls.load(Ordering::SeqCst),
            self.invoke_calls.load(Ordering::SeqCst),
            self.release_calls.load(Ordering::SeqCst),
            self.destroy_calls.load(Ordering::SeqCst),
        ]
    }

    pub fn live_buffers(&self) -> isize {
        self.live_buffers.load(Ordering::SeqCst)
    }

    pub fn live_instances(&self) -> isize {
        self.live_instances.load(Ordering::SeqCst)
    }
}

impl Boundary for StubBoundary {
    fn create(&self, prefix: &CStr) -> *mut c_void {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create {
            return std::ptr::null_mut();
        }

        let prefix = prefix.to_str().expect("stub prefix must be UTF-8").to_string();
        self.live_instances.fetch_add(1, Ordering::SeqCst);
        Box::into_raw(Box::new(StubInstance { prefix })) as *mut c_void
    }

    unsafe fn invoke(&self, handle: *mut c_void, text: &CStr) -> *mut c_char {
        self.invoke_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_invoke {
            return std::ptr::null_mut();
        }

        let out = if self.garble_output {
            CString::new(vec![0xFF_u8, 0xFE, 0x20]).expect("garbled bytes contain no NUL")
        } else if self.empty_output {
            CString::new("").expect("empty string contains no NUL")
        } else {
            let instance = &*(handle as *const StubInstance);
            let text = text.to_str().expect("stub input must be UTF-8");
            CString::new(format!("{}: {}", instance.prefix, text.to_uppercase()))
                .expect("stub output contains no NUL")
        };

        self.live_buffers.fetch_add(1, Ordering::SeqCst);
        out.into_raw()
    }

    unsafe fn release_buffer(&self, ptr: *mut c_char) {
        self.release_calls.fetch_add(1, Ordering::SeqCst);
        self.live_buffers.fetch_sub(1, Ordering::SeqCst);
        drop(CString::from_raw(ptr));
    }

    unsafe fn destroy(&self, handle: *mut c_void) {
        self.destroy_calls.fetch_add(1, Ordering::SeqCst);
        self.live_instances.fetch_sub(1, Ordering::SeqCst);
        drop(Box::from_raw(handle as *mut StubInstance));
    }
}
