// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::{DepgraphExitCode, ExpectedError, Result},
    output::{OutputContext, OutputOpts, OutputWriter, StdoutStyles},
};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use depgraph_report::{
    config::{ConfigOverrides, ReportOption, ReporterConfig},
    helpers::plural,
    reporter::{ArtifactKind, DependencyReporter, ReportSummary},
    run::RunRecord,
};
use itertools::Itertools;
use owo_colors::OwoColorize;
use std::io::Write;
use tracing::{debug, info};

/// Render dependency graphs and structured reports for finished test runs.
#[derive(Debug, Parser)]
#[command(
    version,
    name = "depgraph",
    styles = crate::output::clap_styles(),
    max_term_width = 100,
)]
pub struct DepgraphApp {
    #[clap(flatten)]
    output: OutputOpts,

    #[clap(subcommand)]
    command: Command,
}

impl DepgraphApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app.
    pub fn exec(self, output_writer: &mut OutputWriter) -> Result<i32> {
        let output = OutputContext {
            verbose: self.output.verbose,
            color: self.output.color,
        };
        match self.command {
            Command::Report(opts) => {
                let workspace_root = current_dir()?;
                opts.exec(&workspace_root, output, output_writer)
            }
            Command::Options => list_options(output, output_writer),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write the dependency report for a recorded run
    Report(ReportOpts),

    /// List the reporter options and the values they accept
    ///
    /// The first value listed for each option is its default.
    Options,
}

#[derive(Debug, Args)]
struct ReportOpts {
    /// The run record to report on, as JSON
    #[arg(long, value_name = "FILE")]
    run: Utf8PathBuf,

    /// Directory the report directory is created under
    #[arg(long, value_name = "DIR", default_value = "target/depgraph")]
    output_dir: Utf8PathBuf,

    /// Reporter options as a comma-separated KEY:value list [default: from config]
    #[arg(long, value_name = "LIST", env = "DEPGRAPH_OPTIONS")]
    options: Option<String>,

    /// Config file [default: .config/depgraph.toml under the current directory]
    #[arg(long, value_name = "PATH")]
    config_file: Option<Utf8PathBuf>,

    /// Path to the Graphviz `dot` binary [default: from config]
    #[arg(long, value_name = "PATH")]
    dot_path: Option<Utf8PathBuf>,
}

impl ReportOpts {
    fn exec(
        self,
        workspace_root: &Utf8Path,
        output: OutputContext,
        output_writer: &mut OutputWriter,
    ) -> Result<i32> {
        let overrides = ConfigOverrides {
            options: self.options,
            dot_path: self.dot_path,
        };
        let config =
            ReporterConfig::from_sources(workspace_root, self.config_file.as_deref(), &overrides)?;
        debug!(
            "resolved reporter options `{}` to {:?}",
            config.options_list(),
            config.options(),
        );

        let run = RunRecord::read_from(&self.run)?;
        let reporter = DependencyReporter::new(config);
        let Some(summary) = reporter.generate(&run, &self.output_dir)? else {
            info!("dependency reporting is disabled, nothing written");
            return Ok(DepgraphExitCode::OK);
        };

        let mut writer = output_writer.stdout_writer();
        write_summary(&summary, output, &mut writer)
            .and_then(|()| writer.flush())
            .map_err(|err| ExpectedError::WriteStdoutError { err })?;

        Ok(DepgraphExitCode::OK)
    }
}

fn write_summary(
    summary: &ReportSummary,
    output: OutputContext,
    writer: &mut dyn Write,
) -> std::io::Result<()> {
    let styles = output.stdout_styles();
    let artifact_count = summary.artifacts().len();
    let suite_count = summary.suites().len();
    let image_count = summary.paths_of(ArtifactKind::Png).count();

    write!(
        writer,
        "wrote {} {} for {} {} to {}",
        artifact_count.style(styles.count),
        plural::artifacts_str(artifact_count),
        suite_count.style(styles.count),
        plural::suites_str(suite_count),
        summary.report_dir(),
    )?;
    if image_count > 0 {
        write!(
            writer,
            " ({} {})",
            image_count.style(styles.count),
            plural::images_str(image_count),
        )?;
    }
    writeln!(writer)?;

    if output.verbose {
        for artifact in summary.artifacts() {
            writeln!(writer, "  {}", artifact.path)?;
        }
    }
    Ok(())
}

fn list_options(output: OutputContext, output_writer: &mut OutputWriter) -> Result<i32> {
    let styles = output.stdout_styles();
    let mut writer = output_writer.stdout_writer();
    write_options(&styles, &mut writer)
        .and_then(|()| writer.flush())
        .map_err(|err| ExpectedError::WriteStdoutError { err })?;
    Ok(DepgraphExitCode::OK)
}

fn write_options(styles: &StdoutStyles, writer: &mut dyn Write) -> std::io::Result<()> {
    for option in ReportOption::ALL {
        let Some((default, rest)) = option.values().split_first() else {
            continue;
        };
        writeln!(
            writer,
            "{}: {}{}",
            option.key().style(styles.option),
            default.style(styles.default_value),
            rest.iter().map(|value| format!(", {value}")).join(""),
        )?;
    }
    Ok(())
}

fn current_dir() -> Result<Utf8PathBuf> {
    let dir = std::env::current_dir().map_err(|err| ExpectedError::CurrentDirFailed { err })?;
    Utf8PathBuf::from_path_buf(dir).map_err(|path| ExpectedError::CurrentDirInvalidUtf8 { path })
}
