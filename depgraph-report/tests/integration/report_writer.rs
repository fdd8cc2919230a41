// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::{list_files, reporter, sample_run};
use camino_tempfile::tempdir;
use depgraph_report::{
    errors::{DotConvertError, WriteReportError},
    model::SuiteNode,
    reporter::ArtifactKind,
    run::{MethodRecord, RunRecord, SuiteRecord, TestContextRecord},
};
use pretty_assertions::assert_eq;

#[test]
fn classes_mode_json_output() {
    let output_dir = tempdir().unwrap();
    let summary = reporter("MODE:classes,OUTPUT:json", None)
        .generate(&sample_run(), output_dir.path())
        .unwrap()
        .expect("reporting is enabled");

    assert_eq!(
        list_files(summary.report_dir()),
        [
            "classes/com.acme.ExportTest.json",
            "classes/com.acme.LoginTest.json",
            "classes/com.acme.PingTest.json",
            "classes/com.acme.SessionTest.json",
            "report.json",
        ]
    );
    assert_eq!(summary.paths_of(ArtifactKind::Json).count(), 5);
    assert_eq!(
        summary.suites(),
        ["Smoke Suite", "Regression Suite", "Empty Suite"]
    );

    let login = std::fs::read_to_string(
        summary
            .report_dir()
            .join("classes/com.acme.LoginTest.json"),
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&login).unwrap();
    assert_eq!(value["name"], "com.acme.LoginTest");
    assert_eq!(value["classResult"], "FAILED");
    let methods: Vec<_> = value["testMethods"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["methodName"].as_str().unwrap())
        .collect();
    assert_eq!(
        methods,
        [
            "com.acme.LoginTest.submitCredentials",
            "com.acme.LoginTest.rejectBadPassword",
            "com.acme.LoginTest.openPage",
        ]
    );
}

#[test]
fn dot_output_skips_trivial_graphs() {
    let output_dir = tempdir().unwrap();
    let summary = reporter("output:dot", None)
        .generate(&sample_run(), output_dir.path())
        .unwrap()
        .expect("reporting is enabled");

    // Methods without dependencies render as an empty graph and are not written.
    assert_eq!(
        list_files(summary.report_dir()),
        [
            "classes/com.acme.ExportTest.dot",
            "classes/com.acme.LoginTest.dot",
            "classes/com.acme.PingTest.dot",
            "classes/com.acme.SessionTest.dot",
            "methods/com.acme.ExportTest.exportPdf.dot",
            "methods/com.acme.LoginTest.submitCredentials.dot",
            "methods/com.acme.SessionTest.refreshToken.dot",
            "report.dot",
            "suites/EmptySuite.dot",
            "suites/RegressionSuite.dot",
            "suites/SmokeSuite.dot",
            "tests/LoginTests.dot",
            "tests/QuickCheck.dot",
            "tests/ReportingTests.dot",
        ]
    );

    let method = std::fs::read_to_string(
        summary
            .report_dir()
            .join("methods/com.acme.LoginTest.submitCredentials.dot"),
    )
    .unwrap();
    insta::assert_snapshot!(method, @r#"
    digraph g {
    "com.acme.LoginTest.submitCredentials" -> "com.acme.LoginTest.openPage";
    }
    "#);
}

#[test]
fn yaml_includes_run_records() {
    let output_dir = tempdir().unwrap();
    let summary = reporter("mode:tests,output:yaml", None)
        .generate(&sample_run(), output_dir.path())
        .unwrap()
        .expect("reporting is enabled");

    assert_eq!(
        list_files(summary.report_dir()),
        [
            "report.yaml",
            "tests/LoginTests.yaml",
            "tests/QuickCheck.yaml",
            "tests/ReportingTests.yaml",
        ]
    );

    let yaml =
        std::fs::read_to_string(summary.report_dir().join("tests/LoginTests.yaml")).unwrap();
    assert!(yaml.contains("testResult: FAILED"), "{yaml}");
    assert!(yaml.contains("included-groups:"), "{yaml}");
    assert!(yaml.contains("class-name: com.acme.LoginTest"), "{yaml}");
}

#[test]
fn repeated_runs_are_identical() {
    let run = sample_run();
    let output_dir = tempdir().unwrap();
    // Without PNG output the converter is never run.
    let reporter = reporter("output:dot", Some("/nonexistent/dot"));
    assert_eq!(reporter.config().options_list(), "output:dot");
    let first = reporter.generate(&run, output_dir.path()).unwrap().unwrap();
    let report_dot = first.report_dir().join("report.dot");
    let before = std::fs::read_to_string(&report_dot).unwrap();

    reporter.generate(&run, output_dir.path()).unwrap().unwrap();
    let after = std::fs::read_to_string(&report_dot).unwrap();
    assert_eq!(before, after);
}

#[test]
fn json_report_parses_back() {
    let output_dir = tempdir().unwrap();
    let summary = reporter("output:json,mode:groups", None)
        .generate(&sample_run(), output_dir.path())
        .unwrap()
        .unwrap();

    // Groups mode writes no per-node artifacts.
    assert_eq!(list_files(summary.report_dir()), ["report.json"]);

    let json = std::fs::read_to_string(summary.report_dir().join("report.json")).unwrap();
    let suites: Vec<SuiteNode<'_>> = serde_json::from_str(&json).unwrap();
    let names: Vec<_> = suites.iter().map(|s| s.name()).collect();
    assert_eq!(names, ["Smoke Suite", "Regression Suite", "Empty Suite"]);
}

#[cfg(unix)]
#[test]
fn png_output_removes_intermediate_dot_files() {
    let output_dir = tempdir().unwrap();
    // `true` accepts any arguments and writes nothing.
    let summary = reporter("output:png", Some("/bin/true"))
        .generate(&sample_run(), output_dir.path())
        .unwrap()
        .expect("reporting is enabled");

    assert_eq!(summary.paths_of(ArtifactKind::Dot).count(), 0);
    assert_eq!(summary.paths_of(ArtifactKind::Png).count(), 14);
    assert!(
        summary
            .paths_of(ArtifactKind::Png)
            .any(|path| path == summary.report_dir().join("report.png").as_path())
    );
    assert_eq!(list_files(summary.report_dir()), Vec::<String>::new());
}

#[cfg(unix)]
#[test]
fn png_and_dot_output_keeps_dot_files() {
    let output_dir = tempdir().unwrap();
    let summary = reporter("output:all,mode:suites", Some("/bin/true"))
        .generate(&sample_run(), output_dir.path())
        .unwrap()
        .expect("reporting is enabled");

    // report.dot plus one per suite.
    assert_eq!(summary.paths_of(ArtifactKind::Dot).count(), 4);
    assert_eq!(summary.paths_of(ArtifactKind::Png).count(), 4);
    assert!(summary.report_dir().join("suites/SmokeSuite.dot").exists());
    assert!(summary.report_dir().join("suites/SmokeSuite.json").exists());
    assert!(summary.report_dir().join("suites/SmokeSuite.yaml").exists());
}

#[cfg(unix)]
#[test]
fn failed_conversion_is_fatal_and_cleans_up() {
    let output_dir = tempdir().unwrap();
    let reporter = reporter("output:png", Some("/bin/false"));
    let error = reporter
        .generate(&sample_run(), output_dir.path())
        .expect_err("conversion fails");

    let report_dot = reporter.report_dir(output_dir.path()).join("report.dot");
    match error {
        WriteReportError::Convert {
            file,
            error: DotConvertError::Failed { .. },
        } => assert_eq!(file, report_dot),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!report_dot.exists());
}

/// Writes a converter that fails unless its input exists, and copies the input to the output.
#[cfg(unix)]
fn strict_converter(dir: &camino::Utf8Path) -> camino::Utf8PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("strict-dot");
    std::fs::write(
        &script,
        indoc::indoc! {r#"
            #!/bin/sh
            test -f "$1" || { echo "no such file: $1" >&2; exit 1; }
            cp "$1" "$5"
        "#},
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    script
}

#[cfg(unix)]
#[test]
fn shared_class_converted_once() {
    let run = RunRecord::from_json(indoc::indoc! {r#"
        {
            "suites": [
                {
                    "name": "S",
                    "results": [
                        {
                            "name": "First",
                            "passed": [{ "class-name": "a.Shared", "method-name": "m" }]
                        },
                        {
                            "name": "Second",
                            "failed": [{ "class-name": "a.Shared", "method-name": "m" }]
                        }
                    ]
                }
            ]
        }
    "#})
    .unwrap();
    let tools = tempdir().unwrap();
    let converter = strict_converter(tools.path());
    let output_dir = tempdir().unwrap();

    let summary = reporter("output:png,mode:classes", Some(converter.as_str()))
        .generate(&run, output_dir.path())
        .unwrap()
        .expect("reporting is enabled");

    let shared = summary.report_dir().join("classes/a.Shared.png");
    let pngs: Vec<_> = summary.paths_of(ArtifactKind::Png).collect();
    assert_eq!(
        pngs,
        [
            summary.report_dir().join("report.png").as_path(),
            shared.as_path()
        ]
    );
    assert_eq!(
        list_files(summary.report_dir()),
        ["classes/a.Shared.png", "report.png"]
    );
}

#[test]
fn shared_class_recorded_once() {
    let mut run = RunRecord::default();
    let mut suite = SuiteRecord {
        name: "S".to_owned(),
        ..SuiteRecord::default()
    };
    for name in ["First", "Second"] {
        suite.results.push(TestContextRecord {
            name: name.to_owned(),
            passed: vec![MethodRecord::new("a.Shared", "m")],
            ..TestContextRecord::default()
        });
    }
    run.suites.push(suite);
    let output_dir = tempdir().unwrap();

    let summary = reporter("output:json,mode:classes", None)
        .generate(&run, output_dir.path())
        .unwrap()
        .expect("reporting is enabled");

    assert_eq!(
        summary.paths_of(ArtifactKind::Json).collect::<Vec<_>>(),
        [
            summary.report_dir().join("report.json").as_path(),
            summary.report_dir().join("classes/a.Shared.json").as_path(),
        ]
    );
}
