//! CLI command implementations for Mundus.

pub(crate) mod check;
pub(crate) mod decline;
pub(crate) mod play;
pub(crate) mod prototypes;

mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;

/// Output format for the `decline` and `prototypes` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<mundus::WorldError> for CliError {
    fn from(e: mundus::WorldError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<mundus::ConfigError> for CliError {
    fn from(e: mundus::ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<mundus::SnapshotError> for CliError {
    fn from(e: mundus::SnapshotError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<mundus::DeclensionError> for CliError {
    fn from(e: mundus::DeclensionError) -> Self {
        Self::new(e.to_string())
    }
}
