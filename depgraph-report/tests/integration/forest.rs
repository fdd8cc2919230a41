// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::{sample_run, verdict};
use depgraph_report::{
    model::{SuiteForest, SuiteNode, VerdictTally},
    render::ReportNode,
};
use fixture_data::sample_run::{DISABLED_METHODS, EXPECTED_SUITES};
use pretty_assertions::assert_eq;

#[test]
fn forest_matches_expected() {
    let run = sample_run();
    let forest = SuiteForest::from_run(&run);

    // Node order is descending, fixture order ascending.
    let actual_names: Vec<_> = forest.suites().iter().map(|s| s.name()).collect();
    let mut expected_names: Vec<_> = EXPECTED_SUITES.iter().map(|s| s.name).collect();
    expected_names.reverse();
    assert_eq!(actual_names, expected_names);

    for suite in forest.suites() {
        let expected = EXPECTED_SUITES
            .get(suite.name())
            .unwrap_or_else(|| panic!("unexpected suite {}", suite.name()));
        assert_eq!(suite.verdict(), verdict(expected.verdict), "{}", suite.name());
        assert_eq!(
            suite.child_suites().iter().collect::<Vec<_>>(),
            expected.child_suites,
            "{}",
            suite.name()
        );
        assert_eq!(suite.tests().len(), expected.tests.len(), "{}", suite.name());

        for test in suite.tests() {
            let expected = expected
                .tests
                .get(test.name())
                .unwrap_or_else(|| panic!("unexpected test {}", test.name()));
            assert_eq!(test.verdict(), verdict(expected.verdict), "{}", test.name());
            assert_eq!(test.classes().len(), expected.classes.len(), "{}", test.name());

            for class in test.classes() {
                let expected = expected
                    .classes
                    .get(class.name())
                    .unwrap_or_else(|| panic!("unexpected class {}", class.name()));
                assert_eq!(class.verdict(), verdict(expected.verdict), "{}", class.name());
                assert_eq!(class.methods().len(), expected.methods.len(), "{}", class.name());

                for method in class.methods() {
                    let expected = expected
                        .methods
                        .get(method.name())
                        .unwrap_or_else(|| panic!("unexpected method {}", method.name()));
                    assert_eq!(
                        method.verdict(),
                        Some(verdict(expected.verdict)),
                        "{}",
                        method.name()
                    );
                    assert_eq!(
                        method.dependent_methods(),
                        expected.dependent_methods,
                        "{}",
                        method.name()
                    );
                    assert!(!DISABLED_METHODS.contains(&method.name()));
                }
            }
        }
    }
}

#[test]
fn tallies_on_sample_run() {
    let run = sample_run();
    let regression = SuiteNode::from_record(&run.suites[0]);

    assert!(regression.has_passed());
    assert!(regression.has_skips());
    assert!(regression.has_failures());
    let failed: Vec<_> = regression.failures().iter().map(|t| t.name()).collect();
    assert_eq!(failed, ["Login Tests"]);
    let passed: Vec<_> = regression.passed().iter().map(|t| t.name()).collect();
    assert_eq!(passed, ["Reporting Tests"]);
    assert!(regression.skips().is_empty());

    let login = regression
        .tests()
        .iter()
        .find(|t| t.name() == "Login Tests")
        .unwrap();
    assert_eq!(login.groups(), ["auth", "smoke"]);
    assert_eq!(login.parallel(), "methods");
    let skipped: Vec<_> = login.skips().iter().map(|c| c.name()).collect();
    assert_eq!(skipped, ["com.acme.SessionTest"]);
}

#[test]
fn skipped_suite_graph() {
    let run = sample_run();
    let smoke = SuiteNode::from_record(&run.suites[1]);

    insta::assert_snapshot!(smoke.to_dot(false), @r#"
    digraph g {
    "Smoke Suite"[style=filled,color=yellow,shape=box,peripheries=2,label="Suite: Smoke Suite"];
    "Quick Check"[style=filled,color=yellow,shape=house,label="Test: Quick Check"];
    "Smoke Suite" -> "Quick Check";
    subgraph test0 {
    "com.acme.PingTest"[style=filled,color=yellow];
    "Quick Check" -> "com.acme.PingTest";
    subgraph class1 {
    "com.acme.PingTest"[shape=box,label="Class: com.acme.PingTest"];
    "com.acme.PingTest.ping"[style=filled,color=yellow];
    "com.acme.PingTest" -> "com.acme.PingTest.ping";
    }
    }
    }
    "#);
}

#[test]
fn combined_graph_names_are_unique() {
    let run = sample_run();
    let dot = SuiteForest::from_run(&run).to_dot();

    let mut names: Vec<_> = dot
        .lines()
        .filter_map(|line| line.strip_prefix("subgraph "))
        .collect();
    let count = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), count, "{dot}");

    // Rendering is deterministic.
    assert_eq!(SuiteForest::from_run(&run).to_dot(), dot);

    assert!(dot.contains("\"Regression Suite\" -> \"Smoke Suite\";"), "{dot}");
    assert!(
        dot.contains("\"com.acme.SessionTest.refreshToken\" -> \"com.acme.LoginTest.openPage\";"),
        "{dot}"
    );
    assert!(
        dot.contains("\"auth\"[shape=cds,label=\"Group: auth\"];"),
        "{dot}"
    );
    assert!(!dot.contains("disabledCase"), "{dot}");
}

#[test]
fn combined_json_round_trips() {
    let run = sample_run();
    let forest = SuiteForest::from_run(&run);

    let json = forest.to_json().unwrap();
    let parsed: Vec<SuiteNode<'_>> = serde_json::from_str(&json).unwrap();
    let expected: Vec<_> = forest.suites().iter().cloned().collect();
    assert_eq!(parsed, expected);
    for (parsed, expected) in parsed.iter().zip(&expected) {
        assert_eq!(parsed.verdict(), expected.verdict());
        assert_eq!(parsed.tests().len(), expected.tests().len());
        assert_eq!(parsed.source(), None);
    }
}
