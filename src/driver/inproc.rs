//! In-process driver entry (feature `inproc`).
//!
//! The unmangled entry symbol comes from `native/inproc_entry.cc`, which
//! installs the toolchain's crash handler and argv normalization before
//! handing off to the driver's real `main`. Backend registration, argv
//! marshalling and the no-fork assertion live on this side.

use super::{DriverCommand, DriverConfig, DriverError, SPAWN_CC1_VAR};

pub(crate) mod ffi {
    use libc::{c_char, c_int};

    extern "C" {
        /// C++ glue around the driver's `main`; see `native/inproc_entry.cc`.
        pub fn gangway_clang_entry(argc: c_int, argv: *const *const c_char) -> c_int;

        pub fn LLVMInitializeX86TargetInfo();
        pub fn LLVMInitializeX86Target();
        pub fn LLVMInitializeX86AsmParser();
        pub fn LLVMInitializeX86AsmPrinter();
        pub fn LLVMInitializeAArch64TargetInfo();
        pub fn LLVMInitializeAArch64Target();
        pub fn LLVMInitializeAArch64AsmParser();
        pub fn LLVMInitializeAArch64AsmPrinter();
    }
}

/// Run the driver in this process and relay its exit status.
pub(super) fn run(config: &DriverConfig, cmd: &DriverCommand) -> Result<i32, DriverError> {
    if !config.spawn_cc1 {
        // The driver otherwise re-execs itself as a cc1 helper process.
        std::env::set_var(SPAWN_CC1_VAR, "0");
    }

    let argv = cmd.to_c_argv()?;
    tracing::trace!("entering driver: {}", cmd.display());
    let status = unsafe { ffi::gangway_clang_entry(argv.argc(), argv.argv()) };
    tracing::debug!("driver returned status {}", status);
    Ok(status)
}
