//! Minimal user-database stand-in for platforms without `pwd.h`.
//!
//! Cross-building an old make needs the `passwd` record and `getpwnam` to
//! exist at compile time; it never needs them to answer. This module
//! supplies the reduced record and a lookup that always reports "user not
//! found", the honest answer on a platform with no user database.

use std::ffi::CStr;

use libc::{c_char, gid_t, uid_t};

/// Reduced user record, C layout.
#[repr(C)]
#[derive(Debug)]
pub struct Passwd {
    /// User's login name.
    pub pw_name: *mut c_char,
    /// Numerical user ID.
    pub pw_uid: uid_t,
    /// Numerical group ID.
    pub pw_gid: gid_t,
    /// Initial working directory.
    pub pw_dir: *mut c_char,
    /// Program to use as shell.
    pub pw_shell: *mut c_char,
}

/// Look up a user record by login name.
///
/// Always answers `None`, regardless of the name asked for.
pub fn lookup_user(name: &CStr) -> Option<&'static Passwd> {
    let _ = name;
    None
}

/// Unmangled `getpwnam` for legacy C callers; always null.
///
/// Only built with the `pwd-stub` feature: on a host with a real libc this
/// symbol would shadow the genuine one for the whole process.
///
/// # Safety
///
/// `name` may be any pointer; it is never dereferenced.
#[cfg(feature = "pwd-stub")]
#[no_mangle]
pub unsafe extern "C" fn getpwnam(name: *const c_char) -> *mut Passwd {
    let _ = name;
    std::ptr::null_mut()
}
