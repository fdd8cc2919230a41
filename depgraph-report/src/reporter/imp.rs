// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::DotConverter;
use crate::{
    config::{OutputFormat, ReporterConfig},
    errors::WriteReportError,
    helpers::artifact_stem,
    model::{NodeKind, SuiteForest},
    render::ReportNode,
    run::RunRecord,
};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use std::{fmt, fs, io};
use tracing::{debug, info};

/// The graph text of a graph with nothing in it. Graphs like this are not written.
const EMPTY_GRAPH: &str = "digraph g {\n}\n";

/// The kind of file a report artifact is.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum ArtifactKind {
    /// Graphviz DOT.
    Dot,
    /// A PNG image converted from DOT.
    Png,
    /// A JSON document with the exposed fields of the nodes.
    Json,
    /// A YAML document with the full views of the nodes.
    Yaml,
}

impl ArtifactKind {
    /// Returns the file extension for this kind.
    pub fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Dot => "dot",
            ArtifactKind::Png => "png",
            ArtifactKind::Json => "json",
            ArtifactKind::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A file written by the reporter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Artifact {
    /// The kind of file.
    pub kind: ArtifactKind,
    /// Where the file was written.
    pub path: Utf8PathBuf,
}

/// What a report pass left on disk.
#[derive(Clone, Debug)]
pub struct ReportSummary {
    report_dir: Utf8PathBuf,
    artifacts: Vec<Artifact>,
    suites: Vec<String>,
}

impl ReportSummary {
    /// Returns the directory the report was written to.
    pub fn report_dir(&self) -> &Utf8Path {
        &self.report_dir
    }

    /// Returns every artifact that remains on disk, in the order it was written.
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Returns the paths of the artifacts of one kind.
    pub fn paths_of(&self, kind: ArtifactKind) -> impl Iterator<Item = &Utf8Path> {
        self.artifacts
            .iter()
            .filter(move |artifact| artifact.kind == kind)
            .map(|artifact| artifact.path.as_path())
    }

    /// Returns the names of the suites reported on, in node order.
    pub fn suites(&self) -> &[String] {
        &self.suites
    }
}

/// Writes dependency reports for finished runs.
#[derive(Clone, Debug)]
pub struct DependencyReporter {
    config: ReporterConfig,
    converter: DotConverter,
}

impl DependencyReporter {
    /// Creates a reporter with the given configuration.
    pub fn new(config: ReporterConfig) -> Self {
        let converter = DotConverter::new(config.dot_path());
        Self { config, converter }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Returns the directory reports are written to under `output_dir`.
    pub fn report_dir(&self, output_dir: &Utf8Path) -> Utf8PathBuf {
        output_dir.join(self.config.dir())
    }

    /// Writes the report for `run` under `output_dir`.
    ///
    /// Returns `None` without touching the file system if reporting is disabled. Otherwise the
    /// previous report directory is removed first, and the first failure aborts the pass.
    pub fn generate(
        &self,
        run: &RunRecord,
        output_dir: &Utf8Path,
    ) -> Result<Option<ReportSummary>, WriteReportError> {
        let options = self.config.options();
        if !options.enabled {
            debug!("dependency reporting is disabled");
            return Ok(None);
        }

        let report_dir = self.report_dir(output_dir);
        remove_quietly(&report_dir, |dir| fs::remove_dir_all(dir));

        let forest = SuiteForest::from_run(run);
        let writer = ArtifactWriter {
            output: options.output,
        };

        // A class or method can appear under several tests. Its files share a path, so each path
        // is recorded once.
        let mut artifacts = ArtifactLog::default();
        artifacts.record(writer.write_json(&report_dir.join("report.json"), || forest.to_json())?);
        artifacts.record(writer.write_yaml(&report_dir.join("report.yaml"), || forest.to_yaml())?);
        artifacts.record(writer.write_dot(&report_dir.join("report.dot"), || forest.to_dot())?);

        for suite in forest.suites() {
            if options.mode.includes(NodeKind::Suite) {
                debug!("generating reports for suite {}", suite.name());
                artifacts.record(writer.write_node(&report_dir, suite)?);
            }
            for test in suite.tests() {
                if options.mode.includes(NodeKind::Test) {
                    debug!("generating reports for test {}", test.name());
                    artifacts.record(writer.write_node(&report_dir, test)?);
                }
                for class in test.classes() {
                    if options.mode.includes(NodeKind::Class) {
                        debug!("generating reports for class {}", class.name());
                        artifacts.record(writer.write_node(&report_dir, class)?);
                    }
                    if options.mode.includes(NodeKind::Method) {
                        for method in class.methods() {
                            debug!("generating reports for method {}", method.name());
                            artifacts.record(writer.write_node(&report_dir, method)?);
                        }
                    }
                }
            }
        }

        let artifacts = self.convert_dot_files(artifacts, options.output)?;

        let suites: Vec<_> = forest.suites().iter().map(|s| s.name().to_owned()).collect();
        for suite in &suites {
            info!("dependency report generation complete for {suite}");
        }

        Ok(Some(ReportSummary {
            report_dir,
            artifacts,
            suites,
        }))
    }

    /// Converts every DOT artifact to PNG if requested, then removes the DOT files that were only
    /// written as an intermediate.
    fn convert_dot_files(
        &self,
        artifacts: ArtifactLog,
        output: OutputFormat,
    ) -> Result<Vec<Artifact>, WriteReportError> {
        if !output.writes_png() {
            return Ok(artifacts.into_artifacts().collect());
        }

        let mut remaining = Vec::with_capacity(artifacts.len());
        for artifact in artifacts.into_artifacts() {
            if artifact.kind != ArtifactKind::Dot {
                remaining.push(artifact);
                continue;
            }

            let converted = self.converter.convert(&artifact.path);
            // The DOT file goes whether or not the conversion worked.
            let keep = output.keeps_dot();
            if !keep {
                debug!("deleting {}", artifact.path);
                remove_quietly(&artifact.path, |file| fs::remove_file(file));
            }
            let png = converted.map_err(|error| WriteReportError::Convert {
                file: artifact.path.clone(),
                error,
            })?;

            if keep {
                remaining.push(artifact);
            }
            remaining.push(Artifact {
                kind: ArtifactKind::Png,
                path: png,
            });
        }
        Ok(remaining)
    }
}

/// The artifacts written so far, keyed by path in the order they were first written.
#[derive(Debug, Default)]
struct ArtifactLog {
    by_path: IndexMap<Utf8PathBuf, ArtifactKind>,
}

impl ArtifactLog {
    fn record(&mut self, artifacts: impl IntoIterator<Item = Artifact>) {
        for Artifact { kind, path } in artifacts {
            // A rewrite keeps the position of the first write.
            self.by_path.insert(path, kind);
        }
    }

    fn len(&self) -> usize {
        self.by_path.len()
    }

    fn into_artifacts(self) -> impl Iterator<Item = Artifact> {
        self.by_path
            .into_iter()
            .map(|(path, kind)| Artifact { kind, path })
    }
}

/// Writes individual artifacts, honoring the output selection.
///
/// Every write returns the artifact it wrote, or `None` if it wrote nothing.
#[derive(Clone, Copy, Debug)]
struct ArtifactWriter {
    output: OutputFormat,
}

impl ArtifactWriter {
    fn write_node<N: ReportNode>(
        &self,
        report_dir: &Utf8Path,
        node: &N,
    ) -> Result<Vec<Artifact>, WriteReportError> {
        let dir = report_dir.join(N::KIND.dir_name());
        let stem = artifact_stem(N::KIND, node.name());
        let path = |kind: ArtifactKind| dir.join(format!("{stem}.{kind}"));

        let artifacts = [
            self.write_dot(&path(ArtifactKind::Dot), || node.to_dot(false))?,
            self.write_json(&path(ArtifactKind::Json), || node.to_json())?,
            self.write_yaml(&path(ArtifactKind::Yaml), || node.to_yaml())?,
        ];
        Ok(artifacts.into_iter().flatten().collect())
    }

    fn write_dot(
        &self,
        path: &Utf8Path,
        render: impl FnOnce() -> String,
    ) -> Result<Option<Artifact>, WriteReportError> {
        if !self.output.writes_dot() {
            return Ok(None);
        }
        let dot = render();
        if dot.is_empty() || dot == EMPTY_GRAPH {
            return Ok(None);
        }
        write_file(path, &dot)?;
        Ok(Some(Artifact {
            kind: ArtifactKind::Dot,
            path: path.to_owned(),
        }))
    }

    fn write_json(
        &self,
        path: &Utf8Path,
        render: impl FnOnce() -> serde_json::Result<String>,
    ) -> Result<Option<Artifact>, WriteReportError> {
        if !self.output.writes_json() {
            return Ok(None);
        }
        let json = render().map_err(|error| WriteReportError::Json {
            file: path.to_owned(),
            error,
        })?;
        write_file(path, &json)?;
        Ok(Some(Artifact {
            kind: ArtifactKind::Json,
            path: path.to_owned(),
        }))
    }

    fn write_yaml(
        &self,
        path: &Utf8Path,
        render: impl FnOnce() -> Result<String, serde_yaml::Error>,
    ) -> Result<Option<Artifact>, WriteReportError> {
        if !self.output.writes_yaml() {
            return Ok(None);
        }
        let yaml = render().map_err(|error| WriteReportError::Yaml {
            file: path.to_owned(),
            error,
        })?;
        write_file(path, &yaml)?;
        Ok(Some(Artifact {
            kind: ArtifactKind::Yaml,
            path: path.to_owned(),
        }))
    }
}

fn write_file(path: &Utf8Path, contents: &str) -> Result<(), WriteReportError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|error| WriteReportError::Fs {
            file: dir.to_owned(),
            error,
        })?;
    }
    debug!("creating {path}");
    fs::write(path, contents).map_err(|error| WriteReportError::Fs {
        file: path.to_owned(),
        error,
    })
}

fn remove_quietly(path: &Utf8Path, remove: impl FnOnce(&Utf8Path) -> io::Result<()>) {
    match remove(path) {
        Ok(()) => {}
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => debug!("failed to remove {path}: {error}"),
    }
}
