//! Owned argument vectors in the driver's `(argc, argv)` calling convention.

use std::ffi::CString;

use libc::{c_char, c_int};

use super::DriverError;

/// An owned argument vector destined for the driver.
///
/// Arguments are stored as plain strings until the moment of dispatch.
/// Interior NUL bytes are rejected at construction, since no C argv can
/// carry them.
#[derive(Debug, Clone, Default)]
pub struct DriverCommand {
    args: Vec<String>,
}

impl DriverCommand {
    /// Build a vector forwarded verbatim, `argv[0]` included.
    pub fn from_args<I, S>(args: I) -> Result<Self, DriverError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cmd = DriverCommand::default();
        for arg in args {
            cmd.push(arg.as_ref())?;
        }
        Ok(cmd)
    }

    /// Build a link-shaped vector: `program` first, the incoming `argv[0]`
    /// dropped, everything after it preserved in order.
    pub fn link_shape<I, S>(program: &str, args: I) -> Result<Self, DriverError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cmd = DriverCommand {
            args: vec![program.to_string()],
        };
        for arg in args.into_iter().skip(1) {
            cmd.push(arg.as_ref())?;
        }
        Ok(cmd)
    }

    fn push(&mut self, arg: &str) -> Result<(), DriverError> {
        if arg.contains('\0') {
            return Err(DriverError::NulArg {
                arg: arg.to_string(),
            });
        }
        self.args.push(arg.to_string());
        Ok(())
    }

    /// Append `flag` unless an identical argument is already present.
    ///
    /// The scan is an exact match; a `-fuse-ld=` selecting a different
    /// linker does not count as this flag.
    pub fn ensure_flag(&mut self, flag: &str) {
        if !self.args.iter().any(|a| a == flag) {
            self.args.push(flag.to_string());
        }
    }

    /// Number of arguments, `argv[0]` included.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// The arguments as stored.
    pub fn as_slice(&self) -> &[String] {
        &self.args
    }

    /// Program name, if the vector has one.
    pub fn program(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Render for log lines and error messages.
    pub fn display(&self) -> String {
        self.args.join(" ")
    }

    /// Marshal into owned C storage for the FFI boundary.
    pub fn to_c_argv(&self) -> Result<CArgv, DriverError> {
        let mut owned = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            owned.push(
                CString::new(arg.as_str()).map_err(|_| DriverError::NulArg { arg: arg.clone() })?,
            );
        }
        Ok(CArgv::new(owned))
    }
}

/// C-compatible view of a [`DriverCommand`]: owned `CString` storage plus a
/// null-terminated pointer table.
///
/// The pointer table borrows from the owned strings; the struct must
/// outlive the driver call it is handed to.
pub struct CArgv {
    owned: Vec<CString>,
    ptrs: Vec<*const c_char>,
}

impl CArgv {
    fn new(owned: Vec<CString>) -> Self {
        let mut ptrs: Vec<*const c_char> = owned.iter().map(|s| s.as_ptr()).collect();
        ptrs.push(std::ptr::null());
        CArgv { owned, ptrs }
    }

    /// `argc` for the driver's calling convention.
    pub fn argc(&self) -> c_int {
        self.owned.len() as c_int
    }

    /// `argv`: the pointer table, with a trailing null entry.
    pub fn argv(&self) -> *const *const c_char {
        self.ptrs.as_ptr()
    }
}
