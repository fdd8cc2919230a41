// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::{Utf8Path, Utf8PathBuf};
use depgraph_report::{
    config::{ConfigOverrides, ReporterConfig},
    model::Verdict,
    reporter::DependencyReporter,
    run::RunRecord,
};
use fixture_data::{SAMPLE_RUN_JSON, models::VerdictFixture};

pub(crate) fn sample_run() -> RunRecord {
    RunRecord::from_json(SAMPLE_RUN_JSON).expect("sample run is valid")
}

pub(crate) fn reporter(options: &str, dot_path: Option<&str>) -> DependencyReporter {
    DependencyReporter::new(ReporterConfig::default_config(&ConfigOverrides {
        options: Some(options.to_owned()),
        dot_path: dot_path.map(Utf8PathBuf::from),
    }))
}

pub(crate) fn verdict(fixture: VerdictFixture) -> Verdict {
    match fixture {
        VerdictFixture::Passed => Verdict::Passed,
        VerdictFixture::Failed => Verdict::Failed,
        VerdictFixture::Skipped => Verdict::Skipped,
    }
}

/// Lists every file under `dir`, relative to it, sorted.
pub(crate) fn list_files(dir: &Utf8Path) -> Vec<String> {
    let mut files = Vec::new();
    collect_files(dir, dir, &mut files);
    files.sort();
    files
}

fn collect_files(root: &Utf8Path, dir: &Utf8Path, files: &mut Vec<String>) {
    for entry in dir.read_dir_utf8().expect("report directory is readable") {
        let entry = entry.expect("directory entry is readable");
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, path, files);
        } else {
            let relative = path.strip_prefix(root).expect("path is under root");
            files.push(relative.to_string());
        }
    }
}
