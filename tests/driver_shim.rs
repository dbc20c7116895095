//! Integration tests for the driver shim.
//!
//! The real toolchain is never required: a stub driver records its argv and
//! exits with a distinctive status, which is all the shim-side contract
//! needs.

#![cfg(unix)]

use std::ffi::CString;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

use gangway::{DriverConfig, DriverError, LinkerFlavor};

/// Write an executable stub driver that appends its argv to `log`, one
/// argument per line, and exits with `status`.
fn stub_driver(dir: &Path, log: &Path, status: i32) -> PathBuf {
    let path = dir.join("clang");
    let script = format!(
        "#!/bin/sh\nfor a in \"$@\"; do printf '%s\\n' \"$a\"; done >> \"{}\"\nexit {}\n",
        log.display(),
        status
    );
    fs::write(&path, script).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// Get the gangway binary command.
fn gangway() -> Command {
    Command::cargo_bin("gangway").unwrap()
}

fn recorded_args(log: &Path) -> Vec<String> {
    fs::read_to_string(log)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Pass-through
// ============================================================================

#[test]
fn compile_relays_status_unchanged() {
    let tmp = temp_dir();
    let log = tmp.path().join("argv.log");
    let driver = stub_driver(tmp.path(), &log, 42);

    let config = DriverConfig::new().driver_path(&driver);
    let status = config.compile(["clang", "-c", "hello.c"]).unwrap();

    assert_eq!(status, 42);
    assert_eq!(recorded_args(&log), ["-c", "hello.c"]);
}

#[test]
fn compile_accepts_an_empty_vector() {
    let tmp = temp_dir();
    let log = tmp.path().join("argv.log");
    let driver = stub_driver(tmp.path(), &log, 7);

    let config = DriverConfig::new().driver_path(&driver);
    let status = config.compile(Vec::<String>::new()).unwrap();

    assert_eq!(status, 7);
    assert!(recorded_args(&log).is_empty());
}

#[test]
fn compile_rejects_interior_nul_before_dispatch() {
    let tmp = temp_dir();
    let log = tmp.path().join("argv.log");
    let driver = stub_driver(tmp.path(), &log, 0);

    let config = DriverConfig::new().driver_path(&driver);
    let err = config.compile(["clang", "bad\0arg"]).unwrap_err();

    assert!(matches!(err, DriverError::NulArg { .. }));
    // The stub was never reached.
    assert!(recorded_args(&log).is_empty());
}

// ============================================================================
// Linker-flag injection
// ============================================================================

#[test]
fn link_appends_the_linker_flag_once() {
    let tmp = temp_dir();
    let log = tmp.path().join("argv.log");
    let driver = stub_driver(tmp.path(), &log, 0);

    let config = DriverConfig::new().driver_path(&driver);
    let status = config.link(["ld-shim", "-o", "demo", "main.o"]).unwrap();

    assert_eq!(status, 0);
    let args = recorded_args(&log);
    assert_eq!(args, ["-o", "demo", "main.o", "-fuse-ld=lld"]);
}

#[test]
fn link_does_not_duplicate_an_existing_flag() {
    let tmp = temp_dir();
    let log = tmp.path().join("argv.log");
    let driver = stub_driver(tmp.path(), &log, 0);

    let config = DriverConfig::new().driver_path(&driver);
    config
        .link(["ld-shim", "-fuse-ld=lld", "-o", "demo"])
        .unwrap();

    let args = recorded_args(&log);
    let count = args.iter().filter(|a| *a == "-fuse-ld=lld").count();
    assert_eq!(count, 1);
    assert_eq!(args, ["-fuse-ld=lld", "-o", "demo"]);
}

#[test]
fn link_with_empty_vector_still_selects_the_linker() {
    let tmp = temp_dir();
    let log = tmp.path().join("argv.log");
    let driver = stub_driver(tmp.path(), &log, 0);

    let config = DriverConfig::new().driver_path(&driver);
    config.link(Vec::<String>::new()).unwrap();

    assert_eq!(recorded_args(&log), ["-fuse-ld=lld"]);
}

#[test]
fn link_honors_the_configured_flavor() {
    let tmp = temp_dir();
    let log = tmp.path().join("argv.log");
    let driver = stub_driver(tmp.path(), &log, 0);

    let config = DriverConfig::new()
        .driver_path(&driver)
        .linker(LinkerFlavor::Gold);
    config.link(["ld-shim", "-o", "demo"]).unwrap();

    assert_eq!(recorded_args(&log), ["-o", "demo", "-fuse-ld=gold"]);
}

// ============================================================================
// C ABI
// ============================================================================

#[test]
fn c_abi_relays_status_and_injects_the_flag() {
    let tmp = temp_dir();
    let log = tmp.path().join("argv.log");
    let driver = stub_driver(tmp.path(), &log, 5);

    // The C ABI entry points run under the default configuration, so the
    // stub is supplied through the environment override. No other test in
    // this binary reads the variable.
    std::env::set_var("GANGWAY_CLANG", &driver);

    let owned: Vec<CString> = ["clang", "-c", "hello.c"]
        .iter()
        .map(|a| CString::new(*a).unwrap())
        .collect();
    let ptrs: Vec<_> = owned.iter().map(|a| a.as_ptr()).collect();
    let status = unsafe { gangway::capi::gangway_cc(ptrs.len() as i32, ptrs.as_ptr()) };
    assert_eq!(status, 5);
    assert_eq!(recorded_args(&log), ["-c", "hello.c"]);

    fs::remove_file(&log).unwrap();

    let owned: Vec<CString> = ["ld-shim", "-o", "demo"]
        .iter()
        .map(|a| CString::new(*a).unwrap())
        .collect();
    let ptrs: Vec<_> = owned.iter().map(|a| a.as_ptr()).collect();
    let status = unsafe { gangway::capi::gangway_link(ptrs.len() as i32, ptrs.as_ptr()) };
    assert_eq!(status, 5);
    assert_eq!(recorded_args(&log), ["-o", "demo", "-fuse-ld=lld"]);

    std::env::remove_var("GANGWAY_CLANG");
}

// ============================================================================
// CLI
// ============================================================================

#[test]
fn cli_cc_relays_the_driver_status() {
    let tmp = temp_dir();
    let log = tmp.path().join("argv.log");
    let driver = stub_driver(tmp.path(), &log, 3);

    gangway()
        .args(["cc", "-c", "hello.c"])
        .env("GANGWAY_CLANG", &driver)
        .assert()
        .code(3);

    assert_eq!(recorded_args(&log), ["-c", "hello.c"]);
}

#[test]
fn cli_link_injects_the_flag() {
    let tmp = temp_dir();
    let log = tmp.path().join("argv.log");
    let driver = stub_driver(tmp.path(), &log, 0);

    gangway()
        .args(["link", "-o", "demo", "main.o"])
        .env("GANGWAY_CLANG", &driver)
        .assert()
        .success();

    let args = recorded_args(&log);
    let count = args.iter().filter(|a| *a == "-fuse-ld=lld").count();
    assert_eq!(count, 1);
    assert_eq!(args, ["-o", "demo", "main.o", "-fuse-ld=lld"]);
}

#[test]
fn cli_link_honors_the_linker_option() {
    let tmp = temp_dir();
    let log = tmp.path().join("argv.log");
    let driver = stub_driver(tmp.path(), &log, 0);

    gangway()
        .args(["link", "--linker", "mold", "-o", "demo"])
        .env("GANGWAY_CLANG", &driver)
        .assert()
        .success();

    assert_eq!(recorded_args(&log), ["-o", "demo", "-fuse-ld=mold"]);
}

#[test]
fn cli_rejects_an_unknown_linker() {
    gangway()
        .args(["link", "--linker", "sculd", "-o", "demo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid linker"));
}

#[test]
fn cli_reports_an_unresolvable_driver_override() {
    gangway()
        .args(["cc", "-c", "hello.c"])
        .env("GANGWAY_CLANG", "definitely-not-a-real-driver")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error:"));
}
