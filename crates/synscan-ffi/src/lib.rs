//! C ABI for the synscan engine.
//!
//! Hosts call [`synscan_scan`] with a byte buffer and a language code and
//! receive a [`SynscanResult`] holding one [`SynscanDiagnostic`] per defect,
//! sorted by position. Every allocation in the result belongs to this library
//! and is returned with [`synscan_release`].
//!
//! Language codes are `1 = C`, `2 = C++`, `3 = Java`, `4 = Python`;
//! [`synscan_language_id`] maps names to codes.
//!
//! # Safety
//!
//! Entry points take raw pointers from foreign code. Each function documents
//! the pointer contract it relies on; null pointers are always rejected rather
//! than dereferenced.

use std::ffi::{CStr, CString, c_char};
use std::mem::ManuallyDrop;
use std::ptr;
use std::slice;

use synscan::{Diagnostic, DiagnosticBuffer, SupportedLanguage};

/// Returned by [`synscan_scan`] when the language code is not supported.
pub const SYNSCAN_UNKNOWN_LANGUAGE: i32 = -1;

/// Returned by [`synscan_scan`] when a required pointer is null or the
/// result would not fit the boundary's integer widths.
pub const SYNSCAN_INVALID_ARGUMENT: i32 = -2;

/// One defect as seen by foreign callers.
#[repr(C)]
#[derive(Debug)]
pub struct SynscanDiagnostic {
    /// One-based line.
    pub line: i32,
    /// One-based column, counted in characters.
    pub column: i32,
    /// Numeric diagnostic kind, `1..=6`.
    pub kind: i32,
    /// NUL-terminated message owned by the enclosing result.
    pub message: *mut c_char,
    /// Message length in bytes, excluding the terminator.
    pub message_len: usize,
}

/// The caller-visible result of one scan.
#[repr(C)]
#[derive(Debug)]
pub struct SynscanResult {
    /// First of `count` diagnostics, or null when nothing is held.
    pub items: *mut SynscanDiagnostic,
    /// Number of diagnostics.
    pub count: i32,
    /// Number of slots allocated for `items`.
    pub capacity: i32,
}

impl SynscanResult {
    /// A result holding nothing.
    pub const EMPTY: Self = Self {
        items: ptr::null_mut(),
        count: 0,
        capacity: 0,
    };

    fn from_buffer(buffer: &DiagnosticBuffer) -> Option<Self> {
        let mut items = Vec::with_capacity(buffer.capacity());
        items.extend(buffer.iter().map(SynscanDiagnostic::from_diagnostic));

        let (Ok(count), Ok(capacity)) = (
            i32::try_from(items.len()),
            i32::try_from(items.capacity()),
        ) else {
            release_items(items);
            return None;
        };

        let mut leaked = ManuallyDrop::new(items);
        Some(Self {
            items: leaked.as_mut_ptr(),
            count,
            capacity,
        })
    }
}

impl Default for SynscanResult {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl SynscanDiagnostic {
    fn from_diagnostic(diagnostic: &Diagnostic) -> Self {
        let message = CString::new(diagnostic.message().replace('\0', "")).unwrap_or_default();
        let message_len = message.as_bytes().len();
        Self {
            line: i32::try_from(diagnostic.line()).unwrap_or(i32::MAX),
            column: i32::try_from(diagnostic.column()).unwrap_or(i32::MAX),
            kind: diagnostic.kind().code(),
            message: message.into_raw(),
            message_len,
        }
    }
}

fn release_items(items: Vec<SynscanDiagnostic>) {
    for item in items {
        if !item.message.is_null() {
            // SAFETY: every non-null message was produced by `CString::into_raw`.
            drop(unsafe { CString::from_raw(item.message) });
        }
    }
}

/// Scans `len` bytes at `text` as the language with code `language`.
///
/// On success `*out` receives the diagnostics and the return value is their
/// count. On failure `*out` is left empty and a negative status is returned:
/// [`SYNSCAN_UNKNOWN_LANGUAGE`] or [`SYNSCAN_INVALID_ARGUMENT`].
///
/// The text need not be NUL-terminated and may contain NUL bytes.
///
/// # Safety
///
/// - `out` must be null or point to a writable `SynscanResult` that holds no
///   unreleased diagnostics.
/// - `text` must be valid for reads of `len` bytes; it may be null only when
///   `len` is zero.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn synscan_scan(
    text: *const c_char,
    len: usize,
    language: i32,
    out: *mut SynscanResult,
) -> i32 {
    // SAFETY: the caller guarantees `out` is null or valid for writes.
    let Some(slot) = (unsafe { out.as_mut() }) else {
        return SYNSCAN_INVALID_ARGUMENT;
    };
    *slot = SynscanResult::EMPTY;

    let bytes: &[u8] = if len == 0 {
        &[]
    } else if text.is_null() {
        return SYNSCAN_INVALID_ARGUMENT;
    } else {
        // SAFETY: the caller guarantees `text` is readable for `len` bytes.
        unsafe { slice::from_raw_parts(text.cast::<u8>(), len) }
    };

    let Ok(buffer) = synscan::scan(bytes, language) else {
        return SYNSCAN_UNKNOWN_LANGUAGE;
    };
    let Some(result) = SynscanResult::from_buffer(&buffer) else {
        tracing::warn!(diagnostics = buffer.len(), "result too large for the C ABI");
        return SYNSCAN_INVALID_ARGUMENT;
    };
    let count = result.count;
    *slot = result;
    count
}

/// Frees every allocation held by `*out` and resets it to empty.
///
/// Releasing an empty or already released result does nothing.
///
/// # Safety
///
/// `out` must be null or point to a `SynscanResult` that is empty or was
/// filled by [`synscan_scan`] and not modified since.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn synscan_release(out: *mut SynscanResult) {
    // SAFETY: the caller guarantees `out` is null or valid.
    let Some(slot) = (unsafe { out.as_mut() }) else {
        return;
    };
    let result = std::mem::take(slot);
    if result.items.is_null() {
        return;
    }
    let (Ok(count), Ok(capacity)) = (
        usize::try_from(result.count),
        usize::try_from(result.capacity),
    ) else {
        return;
    };
    // SAFETY: `items`, `count`, and `capacity` describe the vector leaked by
    // `SynscanResult::from_buffer`.
    let items = unsafe { Vec::from_raw_parts(result.items, count, capacity) };
    release_items(items);
}

/// Maps a language name to its code, or returns `-1`.
///
/// Names are matched case-insensitively: `c`, `cpp` (`c++`, `cxx`), `java`,
/// `python` (`py`).
///
/// # Safety
///
/// `name` must be null or point to a NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn synscan_language_id(name: *const c_char) -> i32 {
    if name.is_null() {
        return SYNSCAN_UNKNOWN_LANGUAGE;
    }
    // SAFETY: the caller guarantees a NUL-terminated string.
    let raw = unsafe { CStr::from_ptr(name) };
    raw.to_str()
        .ok()
        .and_then(|text| text.parse::<SupportedLanguage>().ok())
        .map_or(SYNSCAN_UNKNOWN_LANGUAGE, SupportedLanguage::id)
}
