//! C ABI surface for build tools linking the shim as a static library.
//!
//! Both exports accept a conventional `(argc, argv)` pair and return the
//! driver's exit status. Shim-side failures (unreachable driver, bad
//! argument bytes) are logged and reported as status 1; diagnostics for the
//! compilation itself are the driver's business.

use std::ffi::CStr;

use libc::{c_char, c_int};

use crate::driver::{self, DriverError};

/// Forward a compile-style vector to the driver unchanged.
///
/// # Safety
///
/// `argv` must point to `argc` readable, NUL-terminated strings. It may be
/// null when `argc` is zero; null entries are treated as empty strings.
#[no_mangle]
pub unsafe extern "C" fn gangway_cc(argc: c_int, argv: *const *const c_char) -> c_int {
    let args = collect_args(argc, argv);
    report(driver::compile(args))
}

/// Forward a link-style vector, forcing the configured default linker.
///
/// # Safety
///
/// Same contract as [`gangway_cc`].
#[no_mangle]
pub unsafe extern "C" fn gangway_link(argc: c_int, argv: *const *const c_char) -> c_int {
    let args = collect_args(argc, argv);
    report(driver::link(args))
}

unsafe fn collect_args(argc: c_int, argv: *const *const c_char) -> Vec<String> {
    if argv.is_null() || argc <= 0 {
        return Vec::new();
    }
    (0..argc as usize)
        .map(|i| {
            let ptr = *argv.add(i);
            if ptr.is_null() {
                String::new()
            } else {
                CStr::from_ptr(ptr).to_string_lossy().into_owned()
            }
        })
        .collect()
}

fn report(result: Result<i32, DriverError>) -> c_int {
    match result {
        Ok(status) => status,
        Err(e) => {
            tracing::error!("driver invocation failed: {:#}", anyhow::Error::new(e));
            1
        }
    }
}
