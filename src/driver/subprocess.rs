//! Out-of-process fallback honoring the in-process contract.
//!
//! Built when the `inproc` feature is off: the public API stays identical,
//! the driver just runs as a child process. Discovery order: explicit
//! config path, then the `GANGWAY_CLANG` environment variable, then a PATH
//! lookup.

use std::path::PathBuf;
use std::process::Command;

use super::{DriverCommand, DriverConfig, DriverError, DRIVER_ENV, DRIVER_PROGRAM, SPAWN_CC1_VAR};

/// Run the external driver and relay its exit status.
pub(super) fn run(config: &DriverConfig, cmd: &DriverCommand) -> Result<i32, DriverError> {
    let program = resolve_driver(config)?;
    tracing::trace!("spawning `{}`: {}", program.display(), cmd.display());

    let mut child = Command::new(&program);
    // The incoming argv[0] is advisory; Command supplies its own.
    if !cmd.is_empty() {
        child.args(&cmd.as_slice()[1..]);
    }
    if !config.spawn_cc1 {
        child.env(SPAWN_CC1_VAR, "0");
    }

    let status = child.status().map_err(|source| DriverError::Spawn {
        program: program.display().to_string(),
        source,
    })?;

    // A signal death has no code; report it as a plain failure.
    let code = status.code().unwrap_or(1);
    tracing::debug!("driver exited with status {}", code);
    Ok(code)
}

/// Locate the driver binary.
fn resolve_driver(config: &DriverConfig) -> Result<PathBuf, DriverError> {
    if let Some(ref path) = config.driver_path {
        return Ok(path.clone());
    }

    if let Ok(env_driver) = std::env::var(DRIVER_ENV) {
        if let Ok(path) = which::which(&env_driver) {
            return Ok(path);
        }
        // An explicit override that does not resolve is an error, not a
        // fall-through to PATH.
        return Err(DriverError::DriverNotFound {
            searched: format!("{}={}", DRIVER_ENV, env_driver),
        });
    }

    which::which(DRIVER_PROGRAM).map_err(|_| DriverError::DriverNotFound {
        searched: format!("`{}` on PATH (set {} to override)", DRIVER_PROGRAM, DRIVER_ENV),
    })
}
