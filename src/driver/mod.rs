//! Driver invocation: configuration, argument forwarding, status relay.
//!
//! Two entry points mirror the two shapes a build tool hands us: a
//! compile-style vector forwarded verbatim, and a link-style vector that is
//! normalized to the driver's program name and guaranteed to carry a linker
//! selection. Everything past that boundary (parsing, diagnostics, code
//! generation, the link itself) belongs to the driver.

mod argv;
mod targets;

#[cfg(feature = "inproc")]
mod inproc;
#[cfg(not(feature = "inproc"))]
mod subprocess;

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

pub use argv::{CArgv, DriverCommand};
pub use targets::{backends_registered, ensure_backends_registered};

/// Environment variable the wrapped driver checks before forking a cc1
/// helper process. `0` keeps compilation in the calling process.
pub(crate) const SPAWN_CC1_VAR: &str = "CLANG_SPAWN_CC1";

/// Environment variable overriding driver discovery.
pub const DRIVER_ENV: &str = "GANGWAY_CLANG";

/// Program name handed to the driver for link-style invocations.
pub(crate) const DRIVER_PROGRAM: &str = "clang";

/// Error raised while preparing or dispatching a driver invocation.
///
/// Diagnostics for the compilation itself are owned by the driver and show
/// up only in its exit status; this type covers failures to reach it.
#[derive(Debug, Error)]
pub enum DriverError {
    /// C argument vectors cannot carry interior NUL bytes.
    #[error("argument contains an interior NUL byte: {arg:?}")]
    NulArg { arg: String },

    /// No usable driver binary (out-of-process mode only).
    #[error("clang driver not found (searched {searched})")]
    DriverNotFound { searched: String },

    /// The driver binary exists but could not be started.
    #[error("failed to spawn `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Which linker the driver is asked to run for link-style invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkerFlavor {
    /// LLVM's lld.
    #[default]
    Lld,
    /// GNU BFD ld.
    Bfd,
    /// GNU gold.
    Gold,
    /// mold.
    Mold,
}

impl LinkerFlavor {
    /// Linker name as it appears after `-fuse-ld=`.
    pub fn as_str(self) -> &'static str {
        match self {
            LinkerFlavor::Lld => "lld",
            LinkerFlavor::Bfd => "bfd",
            LinkerFlavor::Gold => "gold",
            LinkerFlavor::Mold => "mold",
        }
    }

    /// The full driver flag selecting this linker.
    pub fn flag(self) -> String {
        format!("-fuse-ld={}", self.as_str())
    }
}

impl FromStr for LinkerFlavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lld" => Ok(LinkerFlavor::Lld),
            "bfd" => Ok(LinkerFlavor::Bfd),
            "gold" => Ok(LinkerFlavor::Gold),
            "mold" => Ok(LinkerFlavor::Mold),
            _ => Err(format!(
                "invalid linker '{}'; expected 'lld', 'bfd', 'gold', or 'mold'",
                s
            )),
        }
    }
}

impl std::fmt::Display for LinkerFlavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for constructing and dispatching driver invocations.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Explicit driver binary, overriding discovery (out-of-process mode).
    driver_path: Option<PathBuf>,
    /// Linker requested for link-style invocations.
    linker: LinkerFlavor,
    /// Whether the driver may fork a cc1 helper process.
    spawn_cc1: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            driver_path: None,
            linker: LinkerFlavor::Lld,
            spawn_cc1: false,
        }
    }
}

impl DriverConfig {
    /// Create a configuration with the defaults: discovered driver, lld,
    /// no cc1 helper process.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific driver binary instead of discovery.
    pub fn driver_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.driver_path = Some(path.into());
        self
    }

    /// Select the linker injected into link-style invocations.
    pub fn linker(mut self, linker: LinkerFlavor) -> Self {
        self.linker = linker;
        self
    }

    /// Allow the driver to fork a cc1 helper process.
    pub fn spawn_cc1(mut self, allow: bool) -> Self {
        self.spawn_cc1 = allow;
        self
    }

    /// Forward a compile-style argument vector to the driver unchanged.
    ///
    /// The vector is passed through verbatim, `argv[0]` included, and an
    /// empty vector is legal. Returns the driver's exit status.
    pub fn compile<I, S>(&self, args: I) -> Result<i32, DriverError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cmd = DriverCommand::from_args(args)?;
        self.dispatch(cmd)
    }

    /// Forward a link-style argument vector.
    ///
    /// The incoming `argv[0]` is discarded and replaced with the driver's
    /// own program name, and the configured linker flag is appended unless
    /// an identical one is already present.
    pub fn link<I, S>(&self, args: I) -> Result<i32, DriverError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cmd = DriverCommand::link_shape(DRIVER_PROGRAM, args)?;
        cmd.ensure_flag(&self.linker.flag());
        self.dispatch(cmd)
    }

    fn dispatch(&self, cmd: DriverCommand) -> Result<i32, DriverError> {
        ensure_backends_registered();
        tracing::debug!("dispatching driver invocation: {}", cmd.display());

        #[cfg(feature = "inproc")]
        return inproc::run(self, &cmd);

        #[cfg(not(feature = "inproc"))]
        subprocess::run(self, &cmd)
    }
}

/// Forward a compile-style argument vector under the default configuration.
///
/// See [`DriverConfig::compile`].
pub fn compile<I, S>(args: I) -> Result<i32, DriverError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    DriverConfig::default().compile(args)
}

/// Forward a link-style argument vector under the default configuration,
/// selecting lld.
///
/// See [`DriverConfig::link`].
pub fn link<I, S>(args: I) -> Result<i32, DriverError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    DriverConfig::default().link(args)
}
