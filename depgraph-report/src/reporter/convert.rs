// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::DotConvertError;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, trace};

/// Converts DOT files to PNG by running Graphviz: `dot <file.dot> -Grankdir=LR -Tpng -o <file.png>`.
#[derive(Clone, Debug)]
pub struct DotConverter {
    program: Utf8PathBuf,
}

impl DotConverter {
    /// Creates a converter that runs the given `dot` binary.
    pub fn new(program: impl Into<Utf8PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Returns the program this converter runs.
    pub fn program(&self) -> &Utf8Path {
        &self.program
    }

    /// Returns the image path for a DOT file: the same path with a `.png` extension.
    pub fn png_path(dot_file: &Utf8Path) -> Utf8PathBuf {
        dot_file.with_extension("png")
    }

    /// Converts `dot_file` and returns the path of the image written.
    ///
    /// This blocks until the converter exits. There is no timeout.
    pub fn convert(&self, dot_file: &Utf8Path) -> Result<Utf8PathBuf, DotConvertError> {
        let png_file = Self::png_path(dot_file);
        let expression = duct::cmd(
            self.program.as_str(),
            [
                dot_file.as_str(),
                "-Grankdir=LR",
                "-Tpng",
                "-o",
                png_file.as_str(),
            ],
        );
        trace!("Executing command: {:?}", expression);

        let output = expression
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
            .map_err(|error| DotConvertError::Spawn {
                program: self.program.clone(),
                error,
            })?;
        if !output.status.success() {
            return Err(DotConvertError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        debug!("converted {dot_file} to {png_file}");
        Ok(png_file)
    }
}
