// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::model::NodeKind;
use std::{fmt, str::FromStr};
use tracing::debug;

/// The options that can be passed to the reporter as a `KEY:value` list.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ReportOption {
    /// Whether reporting happens at all.
    Enabled,
    /// Whether the engine skips real execution for a structural pass.
    Prescan,
    /// Which levels get per-node artifacts.
    Mode,
    /// Which artifact formats are written.
    Output,
}

impl ReportOption {
    /// All options, in the order they are documented.
    pub const ALL: [ReportOption; 4] = [
        ReportOption::Enabled,
        ReportOption::Prescan,
        ReportOption::Mode,
        ReportOption::Output,
    ];

    /// Returns the option's key.
    pub fn key(self) -> &'static str {
        match self {
            ReportOption::Enabled => "ENABLED",
            ReportOption::Prescan => "PRESCAN",
            ReportOption::Mode => "MODE",
            ReportOption::Output => "OUTPUT",
        }
    }

    /// Returns the recognized values. The first one is the default.
    pub fn values(self) -> &'static [&'static str] {
        match self {
            ReportOption::Enabled => &["true", "false"],
            ReportOption::Prescan => &["false", "true"],
            ReportOption::Mode => ReportMode::variants(),
            ReportOption::Output => OutputFormat::variants(),
        }
    }

    /// Returns the value this option takes in `list`.
    ///
    /// The last pair whose key matches (ignoring case) and whose value is recognized (after
    /// lower-casing) wins. Anything else falls back to the default.
    pub fn resolve(self, list: &str) -> &'static str {
        let values = self.values();
        let mut resolved = values[0];
        for pair in list.split(',') {
            let Some((key, value)) = pair.split_once(':') else {
                if !pair.trim().is_empty() {
                    debug!("ignoring malformed reporter option `{pair}`");
                }
                continue;
            };
            if !key.eq_ignore_ascii_case(self.key()) {
                continue;
            }
            let value = value.to_lowercase();
            match values.iter().find(|known| **known == value) {
                Some(&known) => resolved = known,
                None => debug!(
                    "ignoring unrecognized value `{value}` for {} (known values: {})",
                    self.key(),
                    values.join(", "),
                ),
            }
        }
        resolved
    }
}

impl fmt::Display for ReportOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The levels that get per-node artifacts.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ReportMode {
    /// Every level.
    #[default]
    All,
    /// Suites only.
    Suites,
    /// Tests only.
    Tests,
    /// Classes only.
    Classes,
    /// Methods only.
    Methods,
    /// Accepted, but writes no per-node artifacts.
    Groups,
    /// Accepted, but writes no per-node artifacts.
    Configuration,
}

impl ReportMode {
    /// String representations of all known variants.
    pub fn variants() -> &'static [&'static str] {
        &[
            "all",
            "suites",
            "tests",
            "classes",
            "methods",
            "groups",
            "configuration",
        ]
    }

    /// Returns true if per-node artifacts are written for nodes of this kind.
    ///
    /// `all` selects every level, and each level mode selects only its own level.
    pub fn includes(self, kind: NodeKind) -> bool {
        match self {
            ReportMode::All => true,
            ReportMode::Suites => kind == NodeKind::Suite,
            ReportMode::Tests => kind == NodeKind::Test,
            ReportMode::Classes => kind == NodeKind::Class,
            ReportMode::Methods => kind == NodeKind::Method,
            ReportMode::Groups | ReportMode::Configuration => false,
        }
    }
}

impl FromStr for ReportMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mode = match s {
            "all" => ReportMode::All,
            "suites" => ReportMode::Suites,
            "tests" => ReportMode::Tests,
            "classes" => ReportMode::Classes,
            "methods" => ReportMode::Methods,
            "groups" => ReportMode::Groups,
            "configuration" => ReportMode::Configuration,
            _ => return Err(()),
        };
        Ok(mode)
    }
}

/// The artifact formats to write.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum OutputFormat {
    /// Every format.
    #[default]
    All,
    /// Graphviz DOT.
    Dot,
    /// PNG images, converted from DOT.
    Png,
    /// JSON documents.
    Json,
    /// YAML documents.
    Yaml,
}

impl OutputFormat {
    /// String representations of all known variants.
    pub fn variants() -> &'static [&'static str] {
        &["all", "dot", "png", "json", "yaml"]
    }

    /// Returns true if DOT files are written. PNG output needs them as an intermediate.
    pub fn writes_dot(self) -> bool {
        matches!(self, OutputFormat::All | OutputFormat::Dot | OutputFormat::Png)
    }

    /// Returns true if DOT files are kept after conversion.
    pub fn keeps_dot(self) -> bool {
        matches!(self, OutputFormat::All | OutputFormat::Dot)
    }

    /// Returns true if DOT files are converted to PNG.
    pub fn writes_png(self) -> bool {
        matches!(self, OutputFormat::All | OutputFormat::Png)
    }

    /// Returns true if JSON documents are written.
    pub fn writes_json(self) -> bool {
        matches!(self, OutputFormat::All | OutputFormat::Json)
    }

    /// Returns true if YAML documents are written.
    pub fn writes_yaml(self) -> bool {
        matches!(self, OutputFormat::All | OutputFormat::Yaml)
    }
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format = match s {
            "all" => OutputFormat::All,
            "dot" => OutputFormat::Dot,
            "png" => OutputFormat::Png,
            "json" => OutputFormat::Json,
            "yaml" => OutputFormat::Yaml,
            _ => return Err(()),
        };
        Ok(format)
    }
}

/// The reporter options, resolved from a `KEY:value` list.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ReporterOptions {
    /// Whether reporting happens at all.
    pub enabled: bool,
    /// Whether the engine skips real execution for a structural pass.
    pub prescan: bool,
    /// Which levels get per-node artifacts.
    pub mode: ReportMode,
    /// Which artifact formats are written.
    pub output: OutputFormat,
}

impl ReporterOptions {
    /// Resolves every option from a comma-separated `KEY:value` list.
    pub fn parse(list: &str) -> Self {
        // resolve only returns recognized values, so the parses below cannot fall back.
        Self {
            enabled: ReportOption::Enabled.resolve(list) == "true",
            prescan: ReportOption::Prescan.resolve(list) == "true",
            mode: ReportOption::Mode.resolve(list).parse().unwrap_or_default(),
            output: ReportOption::Output.resolve(list).parse().unwrap_or_default(),
        }
    }
}

impl Default for ReporterOptions {
    fn default() -> Self {
        Self::parse("")
    }
}
