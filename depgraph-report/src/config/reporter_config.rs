// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::ReporterOptions;
use crate::errors::{ConfigParseError, ConfigParseErrorKind};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, builder::DefaultState};
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::warn;

/// Settings given on the command line, applied on top of every config file.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Replaces `reporter.options`.
    pub options: Option<String>,
    /// Replaces `reporter.dot-path`.
    pub dot_path: Option<Utf8PathBuf>,
}

/// Overall reporter configuration.
#[derive(Clone, Debug)]
pub struct ReporterConfig {
    options_list: String,
    options: ReporterOptions,
    dir: Utf8PathBuf,
    dot_path: Utf8PathBuf,
    unknown_keys: BTreeSet<String>,
}

impl ReporterConfig {
    /// The name of the config file, relative to the workspace root.
    pub const CONFIG_PATH: &'static str = ".config/depgraph.toml";

    /// Contains the default config as a TOML file.
    ///
    /// Workspace-specific configuration is layered on top of the default config.
    pub const DEFAULT_CONFIG: &'static str = include_str!("../../default-config.toml");

    /// Reads the reporter configuration from the given sources.
    ///
    /// If `config_file` is given, it must exist. Otherwise `.config/depgraph.toml` under the
    /// workspace root is read if present.
    pub fn from_sources(
        workspace_root: impl AsRef<Utf8Path>,
        config_file: Option<&Utf8Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigParseError> {
        let (config_file, source) = match config_file {
            Some(file) => (file.to_owned(), File::new(file.as_str(), FileFormat::Toml)),
            None => {
                let config_file = workspace_root.as_ref().join(Self::CONFIG_PATH);
                let source = File::new(config_file.as_str(), FileFormat::Toml).required(false);
                (config_file, source)
            }
        };

        let builder = Self::make_default_config().add_source(source);
        let (deserialized, unknown_keys) = Self::build_and_deserialize_config(&builder)
            .map_err(|kind| ConfigParseError::new(&config_file, kind))?;

        if !unknown_keys.is_empty() {
            warn!(
                "ignoring unknown configuration keys in `{config_file}`: {}",
                unknown_keys.iter().cloned().collect::<Vec<_>>().join(", "),
            );
        }

        Ok(Self::new(deserialized.reporter, overrides, unknown_keys))
    }

    /// Returns the default configuration, with overrides applied.
    pub fn default_config(overrides: &ConfigOverrides) -> Self {
        let config = Self::make_default_config()
            .build()
            .expect("default config is always valid");
        let deserialized: ReporterConfigDeserialize = config
            .try_deserialize()
            .expect("default config is always valid");
        Self::new(deserialized.reporter, overrides, BTreeSet::new())
    }

    fn new(
        section: ReporterSection,
        overrides: &ConfigOverrides,
        unknown_keys: BTreeSet<String>,
    ) -> Self {
        let options_list = overrides.options.clone().unwrap_or(section.options);
        Self {
            options: ReporterOptions::parse(&options_list),
            options_list,
            dir: section.dir,
            dot_path: overrides.dot_path.clone().unwrap_or(section.dot_path),
            unknown_keys,
        }
    }

    /// Returns the resolved reporter options.
    pub fn options(&self) -> &ReporterOptions {
        &self.options
    }

    /// Returns the option list the options were resolved from.
    pub fn options_list(&self) -> &str {
        &self.options_list
    }

    /// Returns the report directory, relative to the output directory.
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Returns the path to the Graphviz `dot` binary.
    pub fn dot_path(&self) -> &Utf8Path {
        &self.dot_path
    }

    /// Returns keys that were present in the config file but not recognized.
    pub fn unknown_keys(&self) -> &BTreeSet<String> {
        &self.unknown_keys
    }

    fn make_default_config() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml))
    }

    /// This returns a tuple of (config, ignored paths).
    fn build_and_deserialize_config(
        builder: &ConfigBuilder<DefaultState>,
    ) -> Result<(ReporterConfigDeserialize, BTreeSet<String>), ConfigParseErrorKind> {
        let config = builder
            .build_cloned()
            .map_err(|error| ConfigParseErrorKind::BuildError(Box::new(error)))?;

        let mut ignored = BTreeSet::new();
        let mut cb = |path: serde_ignored::Path| {
            ignored.insert(path.to_string());
        };
        let ignored_de = serde_ignored::Deserializer::new(config, &mut cb);
        let config: ReporterConfigDeserialize = serde_path_to_error::deserialize(ignored_de)
            .map_err(|error| {
                // The config crate also reports the key. Drop it so the path only appears once.
                let path = error.path().clone();
                let error = match error.into_inner() {
                    ConfigError::At { error, .. } => *error,
                    other => other,
                };
                ConfigParseErrorKind::DeserializeError(Box::new(serde_path_to_error::Error::new(
                    path, error,
                )))
            })?;

        Ok((config, ignored))
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ReporterConfigDeserialize {
    reporter: ReporterSection,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ReporterSection {
    options: String,
    dir: Utf8PathBuf,
    dot_path: Utf8PathBuf,
}
