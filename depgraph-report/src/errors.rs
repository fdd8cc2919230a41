// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by depgraph.

use camino::Utf8PathBuf;
use config::ConfigError;
use std::{io, process::ExitStatus};
use thiserror::Error;

/// An error that occurred while parsing the reporter config.
#[derive(Debug, Error)]
#[error("failed to parse depgraph config at `{config_file}`")]
#[non_exhaustive]
pub struct ConfigParseError {
    config_file: Utf8PathBuf,
    #[source]
    kind: ConfigParseErrorKind,
}

impl ConfigParseError {
    pub(crate) fn new(config_file: impl Into<Utf8PathBuf>, kind: ConfigParseErrorKind) -> Self {
        Self {
            config_file: config_file.into(),
            kind,
        }
    }

    /// Returns the config file for this error.
    pub fn config_file(&self) -> &Utf8PathBuf {
        &self.config_file
    }

    /// Returns the kind of error this is.
    pub fn kind(&self) -> &ConfigParseErrorKind {
        &self.kind
    }
}

/// The kind of error that occurred while parsing the reporter config.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigParseErrorKind {
    /// An error occurred while building the config.
    #[error(transparent)]
    BuildError(Box<ConfigError>),

    /// An error occurred while deserializing the config.
    #[error(transparent)]
    DeserializeError(Box<serde_path_to_error::Error<ConfigError>>),
}

/// An error that occurred while reading a run record.
#[derive(Debug, Error)]
pub enum RunReadError {
    /// The file could not be read.
    #[error("error reading run record at `{path}`")]
    Read {
        /// The path to the run record.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// The file is not a valid run record.
    #[error("error parsing run record at `{path}`")]
    Parse {
        /// The path to the run record.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: serde_json::Error,
    },
}

/// An error that occurred while writing a report.
#[derive(Debug, Error)]
pub enum WriteReportError {
    /// An error occurred while operating on the file system.
    #[error("error operating on path `{file}`")]
    Fs {
        /// The file being operated on.
        file: Utf8PathBuf,

        /// The underlying IO error.
        #[source]
        error: io::Error,
    },

    /// A node could not be serialized as JSON.
    #[error("error serializing JSON for `{file}`")]
    Json {
        /// The file being written.
        file: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: serde_json::Error,
    },

    /// A node could not be serialized as YAML.
    #[error("error serializing YAML for `{file}`")]
    Yaml {
        /// The file being written.
        file: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: serde_yaml::Error,
    },

    /// A DOT file could not be converted to PNG.
    #[error("error converting `{file}` to PNG")]
    Convert {
        /// The DOT file being converted.
        file: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: DotConvertError,
    },
}

/// An error that occurred while running the Graphviz converter.
#[derive(Debug, Error)]
pub enum DotConvertError {
    /// The converter could not be started.
    #[error("failed to run `{program}`")]
    Spawn {
        /// The converter program.
        program: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// The converter ran but reported failure.
    #[error("`{program}` exited with {status}{}", display_stderr(.stderr))]
    Failed {
        /// The converter program.
        program: Utf8PathBuf,

        /// The exit status.
        status: ExitStatus,

        /// Whatever the converter wrote to standard error.
        stderr: String,
    },
}

fn display_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(":\n{stderr}")
    }
}
