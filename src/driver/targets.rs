//! One-time registration of the code-generation backends.
//!
//! The driver can target x86 and AArch64; both backends must be registered
//! before the first invocation and at most once per process. Registration
//! is guarded by `std::sync::Once`, so concurrent first use from several
//! threads blocks all but one and never registers twice.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

static REGISTER: Once = Once::new();
static REGISTRATIONS: AtomicUsize = AtomicUsize::new(0);

/// Register the x86 and AArch64 backends, exactly once per process.
///
/// Later calls return immediately and never fail.
pub fn ensure_backends_registered() {
    REGISTER.call_once(|| {
        register_backends();
        REGISTRATIONS.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("code-generation backends registered");
    });
}

/// Whether backend registration has completed.
pub fn backends_registered() -> bool {
    REGISTER.is_completed()
}

#[cfg(feature = "inproc")]
fn register_backends() {
    use super::inproc::ffi;

    // Target info, target, asm parser and asm printer for each
    // architecture; the driver refuses to emit code for a target missing
    // any of the four.
    unsafe {
        ffi::LLVMInitializeX86TargetInfo();
        ffi::LLVMInitializeX86Target();
        ffi::LLVMInitializeX86AsmParser();
        ffi::LLVMInitializeX86AsmPrinter();
        ffi::LLVMInitializeAArch64TargetInfo();
        ffi::LLVMInitializeAArch64Target();
        ffi::LLVMInitializeAArch64AsmParser();
        ffi::LLVMInitializeAArch64AsmPrinter();
    }
}

#[cfg(not(feature = "inproc"))]
fn register_backends() {
    // Out-of-process mode: the external driver registers its own backends
    // at startup; nothing to initialize on this side.
}
