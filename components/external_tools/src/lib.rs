// components/external_tools/src/lib.rs
mod codecs;
mod probe;
mod system;

#[cfg(any(test, feature = "stub"))]
pub mod stub;

pub use codecs::{ToolSet, TrackTags};
pub use probe::probe_duration_ms;
pub use system::SystemRunner;

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Required tool not found on PATH: {tool}")]
    NotFound { tool: String },

    #[error("Failed to start {tool}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} exited with {status}\nStderr: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Duration probe returned nothing for {path}")]
    EmptyDuration { path: PathBuf },
}

/// A program name plus its arguments, kept as OS strings so paths survive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    args: Vec<OsString>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Runs external programs to completion and hands back their stdout.
///
/// Every failure is fatal to the caller; nothing is retried.
pub trait ToolRunner {
    fn check_available(&self, program: &str) -> Result<(), ToolError>;
    fn run(&self, command: &ToolCommand) -> Result<String, ToolError>;
}
