//! FFI bindings for the behaviour scoring engine
//!
//! C-compatible entry points for host applications. All functions take
//! null-terminated C strings and return allocated memory that must be freed
//! by the caller using `bsi_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::config::AnalysisConfig;
use crate::error::ScoreError;
use crate::pipeline::Analyzer;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

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

/// Build an analyzer from an optional preset name (NULL means dashboard)
unsafe fn analyzer_for(preset: *const c_char) -> Result<Analyzer, ScoreError> {
    let config = match cstr_to_string(preset) {
        Some(name) => AnalysisConfig::preset(&name)?,
        None => AnalysisConfig::dashboard(),
    };
    Analyzer::with_config(config)
}

fn finish(result: Result<String, ScoreError>) -> *mut c_char {
    match result {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Analysis API
// ============================================================================

/// Analyse a free-text daily log JSON and return a report JSON.
///
/// # Safety
/// - `log_json` must be a valid null-terminated C string.
/// - `preset` may be NULL (dashboard) or a null-terminated preset name.
/// - Returns a newly allocated string that must be freed with `bsi_free_string`.
/// - Returns NULL on error; call `bsi_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn bsi_analyze_log_json(
    log_json: *const c_char,
    preset: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(log_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    finish(analyzer_for(preset).and_then(|a| a.analyze_log_json(&json_str)))
}

/// Generate insights from a history JSON array and return a report JSON.
///
/// # Safety
/// - `history_json` must be a valid null-terminated C string.
/// - `preset` may be NULL (dashboard) or a null-terminated preset name.
/// - Returns a newly allocated string that must be freed with `bsi_free_string`.
/// - Returns NULL on error; call `bsi_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn bsi_insights_json(
    history_json: *const c_char,
    preset: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(history_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    finish(analyzer_for(preset).and_then(|a| a.insights_json(&json_str)))
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by this library.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a `bsi_*` function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn bsi_free_string(ptr: *mut c_char) {
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
/// - The returned pointer is valid until the next `bsi_*` call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn bsi_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn bsi_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn test_ffi_analyze_log() {
        let json = CString::new(
            r#"{"sleep": "5.9", "steps": "4,100", "mood": "4", "water": "1.2", "junk": true}"#,
        )
        .unwrap();

        unsafe {
            let result = bsi_analyze_log_json(json.as_ptr(), ptr::null());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            let payload: serde_json::Value = serde_json::from_str(result_str).unwrap();
            assert_eq!(payload["day"]["bsi"], 42);

            bsi_free_string(result);
        }
    }

    #[test]
    fn test_ffi_insights_with_preset() {
        let history = serde_json::to_string(&crate::sample::sample_week()).unwrap();
        let json = CString::new(history).unwrap();
        let preset = CString::new("daily_log").unwrap();

        unsafe {
            let result = bsi_insights_json(json.as_ptr(), preset.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            assert!(result_str.contains("\"gym_rate\": 57"));

            bsi_free_string(result);
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        let invalid_json = CString::new("not json").unwrap();

        unsafe {
            let result = bsi_analyze_log_json(invalid_json.as_ptr(), ptr::null());
            assert!(result.is_null());

            let error = bsi_last_error();
            assert!(!error.is_null());
            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert!(!error_str.is_empty());
        }
    }

    #[test]
    fn test_ffi_unknown_preset() {
        let json = CString::new("{}").unwrap();
        let preset = CString::new("weekly").unwrap();

        unsafe {
            let result = bsi_analyze_log_json(json.as_ptr(), preset.as_ptr());
            assert!(result.is_null());

            let error_str = CStr::from_ptr(bsi_last_error()).to_str().unwrap();
            assert!(error_str.contains("weekly"));
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = bsi_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert!(!version_str.is_empty());
        }
    }
}
