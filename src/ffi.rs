//! FFI bindings for stride-calc
//!
//! This module provides C-compatible functions for calling stride-calc from other languages.
//! All functions take null-terminated UTF-8 C strings and return allocated memory that
//! must be freed by the caller using `stride_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::error::TrackerError;
use crate::pipeline::{steps_report, training_report, training_report_json};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clear the last error message
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Run a fallible report function, mapping errors to NULL + last error
unsafe fn report_or_null(
    record: *const c_char,
    weight: f64,
    height: f64,
    report: fn(&str, f64, f64) -> Result<String, TrackerError>,
) -> *mut c_char {
    clear_last_error();

    let record_str = match cstr_to_string(record) {
        Some(s) => s,
        None => {
            set_last_error("Invalid record string pointer");
            return ptr::null_mut();
        }
    };

    match report(&record_str, weight, height) {
        Ok(text) => string_to_cstr(&text),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Report API
// ============================================================================

/// Produce the steps-only report for a `"<steps>,<duration>"` record.
///
/// # Safety
/// - `record` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `stride_free_string`.
/// - Returns an empty string when the record cannot be processed.
/// - Returns NULL only if `record` is NULL or not valid UTF-8.
#[no_mangle]
pub unsafe extern "C" fn stride_steps_report(
    record: *const c_char,
    weight: f64,
    height: f64,
) -> *mut c_char {
    clear_last_error();

    match cstr_to_string(record) {
        Some(s) => string_to_cstr(&steps_report(&s, weight, height)),
        None => {
            set_last_error("Invalid record string pointer");
            ptr::null_mut()
        }
    }
}

/// Produce the training report for a `"<steps>,<activity>,<duration>"` record.
///
/// # Safety
/// - `record` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `stride_free_string`.
/// - Returns NULL on error; call `stride_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn stride_training_report(
    record: *const c_char,
    weight: f64,
    height: f64,
) -> *mut c_char {
    report_or_null(record, weight, height, training_report)
}

/// Produce the training report as a JSON object.
///
/// # Safety
/// - `record` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `stride_free_string`.
/// - Returns NULL on error; call `stride_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn stride_training_report_json(
    record: *const c_char,
    weight: f64,
    height: f64,
) -> *mut c_char {
    report_or_null(record, weight, height, training_report_json)
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by stride-calc functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a stride-calc function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn stride_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next stride-calc function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn stride_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn stride_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe fn take_string(ptr: *mut c_char) -> String {
        assert!(!ptr.is_null());
        let s = CStr::from_ptr(ptr).to_str().unwrap().to_string();
        stride_free_string(ptr);
        s
    }

    #[test]
    fn test_ffi_steps_report() {
        let record = CString::new("678,0h50m").unwrap();

        unsafe {
            let result = take_string(stride_steps_report(record.as_ptr(), 70.0, 170.0));
            assert!(result.starts_with("Количество шагов: 678."));
            assert!(stride_last_error().is_null());
        }
    }

    #[test]
    fn test_ffi_steps_report_failure_is_empty() {
        let record = CString::new("100, 1h").unwrap();

        unsafe {
            let result = take_string(stride_steps_report(record.as_ptr(), 70.0, 170.0));
            assert!(result.is_empty());

            assert!(stride_steps_report(ptr::null(), 70.0, 170.0).is_null());
            assert!(!stride_last_error().is_null());
        }
    }

    #[test]
    fn test_ffi_training_report() {
        let record = CString::new("1000,Велосипед,1h0m").unwrap();

        unsafe {
            let text = take_string(stride_training_report(record.as_ptr(), 80.0, 180.0));
            assert!(text.contains("Сожгли калорий: 640.00"));

            let json = take_string(stride_training_report_json(record.as_ptr(), 80.0, 180.0));
            let value: serde_json::Value = serde_json::from_str(&json).unwrap();
            assert_eq!(value["calories_kcal"], 640.0);
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        let record = CString::new("500,Плавание,1h").unwrap();

        unsafe {
            let result = stride_training_report(record.as_ptr(), 70.0, 170.0);
            assert!(result.is_null());

            let error = stride_last_error();
            assert!(!error.is_null());

            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert_eq!(error_str, "Unknown activity type: Плавание");
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = stride_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert_eq!(version_str, env!("CARGO_PKG_VERSION"));
        }
    }
}
