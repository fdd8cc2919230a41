// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING, StderrStyles};
use depgraph_report::errors::{
    ConfigParseError, ConfigParseErrorKind, DotConvertError, RunReadError, WriteReportError,
};
use owo_colors::OwoColorize;
use std::error::Error;
use thiserror::Error;
use tracing::error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

/// Documented exit codes for `depgraph` failures.
pub enum DepgraphExitCode {}

impl DepgraphExitCode {
    /// The report was written, or there was nothing to do.
    pub const OK: i32 = 0;

    /// The configuration could not be read.
    pub const SETUP_ERROR: i32 = 96;

    /// The run record could not be read or parsed.
    pub const RUN_READ_FAILED: i32 = 97;

    /// Writing the report failed.
    pub const WRITE_REPORT_FAILED: i32 = 98;
}

// The #[error()] strings are placeholders. Errors are meant to be printed with display_to_stderr,
// which colorizes them.

/// An error that was anticipated and has a documented exit code.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("config parse error")]
    ConfigParseError {
        #[from]
        err: ConfigParseError,
    },
    #[error("failed to determine the current directory")]
    CurrentDirFailed {
        #[source]
        err: std::io::Error,
    },
    #[error("current directory is not valid UTF-8")]
    CurrentDirInvalidUtf8 { path: std::path::PathBuf },
    #[error("run read error")]
    RunReadError {
        #[from]
        err: RunReadError,
    },
    #[error("write report error")]
    WriteReportError {
        #[from]
        err: WriteReportError,
    },
    #[error("error writing to stdout")]
    WriteStdoutError {
        #[source]
        err: std::io::Error,
    },
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::ConfigParseError { .. }
            | Self::CurrentDirFailed { .. }
            | Self::CurrentDirInvalidUtf8 { .. } => DepgraphExitCode::SETUP_ERROR,
            Self::RunReadError { .. } => DepgraphExitCode::RUN_READ_FAILED,
            Self::WriteReportError { .. } | Self::WriteStdoutError { .. } => {
                DepgraphExitCode::WRITE_REPORT_FAILED
            }
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match &self {
            Self::ConfigParseError { err } => {
                error!(
                    "failed to parse depgraph config at `{}`",
                    err.config_file().style(styles.bold)
                );
                match err.kind() {
                    ConfigParseErrorKind::BuildError(error) => Some(&**error as &dyn Error),
                    ConfigParseErrorKind::DeserializeError(error) => Some(&**error as &dyn Error),
                    _ => None,
                }
            }
            Self::CurrentDirFailed { err } => {
                error!("failed to determine the current directory");
                Some(err as &dyn Error)
            }
            Self::CurrentDirInvalidUtf8 { path } => {
                error!(
                    "current directory `{}` is not valid UTF-8",
                    path.display().style(styles.bold)
                );
                None
            }
            Self::RunReadError { err } => {
                match err {
                    RunReadError::Read { path, .. } => {
                        error!("failed to read run record at `{}`", path.style(styles.bold));
                    }
                    RunReadError::Parse { path, .. } => {
                        error!("failed to parse run record at `{}`", path.style(styles.bold));
                    }
                }
                err.source()
            }
            Self::WriteReportError { err } => {
                match err {
                    WriteReportError::Convert {
                        file,
                        error: DotConvertError::Failed { program, .. },
                    } => {
                        error!(
                            "`{}` failed to convert `{}` to PNG",
                            program.style(styles.bold),
                            file.style(styles.bold),
                        );
                    }
                    other => error!("{other}"),
                }
                err.source()
            }
            Self::WriteStdoutError { err } => {
                error!("error writing to stdout");
                Some(err as &dyn Error)
            }
        };

        while let Some(err) = next_error {
            error!(target: NO_HEADING, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
