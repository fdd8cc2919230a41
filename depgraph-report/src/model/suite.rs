// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{NodeKind, TestNode, Verdict, VerdictTally, first_wins};
use crate::{
    render::{DotGraph, NodePath, ReportNode, SubgraphNamer, serialize_full_set},
    run::{MethodRoster, RunRecord, SuiteRecord},
};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::BTreeSet};

/// A suite: the tests it ran, plus the names of its child suites.
///
/// Child suites are referenced by name only. They are drawn in the suite's graph whether or not
/// a node for them is part of the same report.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteNode<'run> {
    parallel: String,
    name: String,
    preserve_order: bool,
    tests: BTreeSet<TestNode<'run>>,
    child_suites: BTreeSet<String>,
    #[serde(rename = "suiteResult")]
    verdict: Verdict,

    #[serde(skip)]
    source: Option<&'run SuiteRecord>,
}

impl<'run> SuiteNode<'run> {
    /// Creates a suite from already-built tests, with no child suites, order not preserved and
    /// no parallelism.
    pub fn new(name: impl Into<String>, tests: impl IntoIterator<Item = TestNode<'run>>) -> Self {
        Self::build(
            name.into(),
            false,
            "none".to_owned(),
            first_wins(tests),
            BTreeSet::new(),
            None,
        )
    }

    /// Creates a suite from its record and already-built tests.
    pub fn with_tests(
        record: &'run SuiteRecord,
        tests: impl IntoIterator<Item = TestNode<'run>>,
    ) -> Self {
        Self::build(
            record.name.clone(),
            record.preserve_order,
            record.parallel.clone(),
            first_wins(tests),
            child_suites(record),
            Some(record),
        )
    }

    /// Creates a suite from its record, building one test per result context.
    pub fn from_record(record: &'run SuiteRecord) -> Self {
        let roster = MethodRoster::new(record);
        let tests = record
            .results
            .iter()
            .map(|context| TestNode::from_context(context, &roster));
        Self::with_tests(record, tests)
    }

    fn build(
        name: String,
        preserve_order: bool,
        parallel: String,
        tests: BTreeSet<TestNode<'run>>,
        child_suites: BTreeSet<String>,
        source: Option<&'run SuiteRecord>,
    ) -> Self {
        let mut this = Self {
            parallel,
            name,
            preserve_order,
            tests,
            child_suites,
            verdict: Verdict::Skipped,
            source,
        };
        // Unlike the other levels, a suite with nothing that passed counts as skipped.
        this.verdict = Verdict::derive(
            Verdict::Skipped,
            Verdict::Passed,
            this.has_passed(),
            this.has_failures(),
        );
        this
    }

    /// Returns the suite name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the suite preserved declaration order.
    pub fn preserve_order(&self) -> bool {
        self.preserve_order
    }

    /// Returns the parallelism mode, as reported by the engine.
    pub fn parallel(&self) -> &str {
        &self.parallel
    }

    /// Returns the tests, in node order.
    pub fn tests(&self) -> &BTreeSet<TestNode<'run>> {
        &self.tests
    }

    /// Returns the names of the child suites, in ascending order.
    pub fn child_suites(&self) -> &BTreeSet<String> {
        &self.child_suites
    }

    /// Returns the verdict derived at construction: failed if any method failed, otherwise
    /// passed if any method passed, otherwise skipped.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Returns the record this suite was built from, if any.
    pub fn source(&self) -> Option<&'run SuiteRecord> {
        self.source
    }

    /// Compares identities in descending order. This is the order [`Ord`] uses.
    pub fn cmp_descending(&self, other: &Self) -> Ordering {
        other.name.cmp(&self.name)
    }
}

fn child_suites(record: &SuiteRecord) -> BTreeSet<String> {
    record.child_suites.iter().cloned().collect()
}

impl<'run> VerdictTally for SuiteNode<'run> {
    type Member = TestNode<'run>;

    fn has_any(&self, verdict: Verdict) -> bool {
        self.tests.iter().any(|test| test.has_any(verdict))
    }

    fn members_with(&self, verdict: Verdict) -> Vec<&Self::Member> {
        self.tests
            .iter()
            .filter(|test| test.verdict() == verdict)
            .collect()
    }
}

impl PartialEq for SuiteNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for SuiteNode<'_> {}

impl PartialOrd for SuiteNode<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SuiteNode<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_descending(other)
    }
}

/// The document view of a suite, including the record it was built from.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullSuite<'a, 'run> {
    parallel: &'a str,
    name: &'a str,
    preserve_order: bool,
    #[serde(serialize_with = "serialize_full_set")]
    tests: &'a BTreeSet<TestNode<'run>>,
    child_suites: &'a BTreeSet<String>,
    #[serde(rename = "suiteResult")]
    verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'run SuiteRecord>,
}

impl<'run> ReportNode for SuiteNode<'run> {
    const KIND: NodeKind = NodeKind::Suite;

    type Full<'a>
        = FullSuite<'a, 'run>
    where
        Self: 'a;

    fn name(&self) -> &str {
        &self.name
    }

    fn write_dot(&self, as_subgraph: bool, parent: &NodePath, namer: &mut SubgraphNamer) -> String {
        if as_subgraph && self.tests.is_empty() && self.child_suites.is_empty() {
            return String::new();
        }

        let path = parent.child(Self::KIND, &self.name);
        let mut graph = DotGraph::open(as_subgraph, Self::KIND, &path, namer);
        graph.node(
            &self.name,
            &format!(
                "{},shape=box,peripheries=2,label=\"Suite: {}\"",
                self.verdict.dot_style(),
                self.name
            ),
        );
        for child in &self.child_suites {
            graph.node(child, &format!("shape=box,peripheries=2,label=\"Suite: {child}\""));
            graph.edge(&self.name, child);
        }
        for test in &self.tests {
            graph.node(
                test.name(),
                &format!(
                    "{},shape=house,label=\"Test: {}\"",
                    test.verdict().dot_style(),
                    test.name()
                ),
            );
            graph.edge(&self.name, test.name());
            graph.fragment(&test.write_dot(true, &path, namer));
        }
        graph.close()
    }

    fn full(&self) -> Self::Full<'_> {
        FullSuite {
            parallel: &self.parallel,
            name: &self.name,
            preserve_order: self.preserve_order,
            tests: &self.tests,
            child_suites: &self.child_suites,
            verdict: self.verdict,
            source: self.source,
        }
    }
}

/// Every suite of a run, in node order.
#[derive(Clone, Debug, Default)]
pub struct SuiteForest<'run> {
    suites: BTreeSet<SuiteNode<'run>>,
}

impl<'run> SuiteForest<'run> {
    /// Builds a suite node for every suite in the run.
    pub fn from_run(run: &'run RunRecord) -> Self {
        Self::new(run.suites.iter().map(SuiteNode::from_record))
    }

    /// Collects already-built suites.
    pub fn new(suites: impl IntoIterator<Item = SuiteNode<'run>>) -> Self {
        Self {
            suites: first_wins(suites),
        }
    }

    /// Returns the suites, in node order.
    pub fn suites(&self) -> &BTreeSet<SuiteNode<'run>> {
        &self.suites
    }

    /// Renders every suite as a subgraph of a single graph.
    ///
    /// Subgraph names are unique across the whole graph.
    pub fn to_dot(&self) -> String {
        let mut namer = SubgraphNamer::new();
        let root = NodePath::root();
        let mut graph = DotGraph::open(false, NodeKind::Suite, &root, &mut namer);
        for suite in &self.suites {
            graph.fragment(&suite.write_dot(true, &root, &mut namer));
        }
        graph.close()
    }

    /// Serializes the exposed fields of every suite as a JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.suites)
    }

    /// Serializes every suite, including the records they were built from, as a YAML sequence.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&FullForest(&self.suites))
    }
}

struct FullForest<'a, 'run>(&'a BTreeSet<SuiteNode<'run>>);

impl Serialize for FullForest<'_, '_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_full_set(&self.0, serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{ClassNode, MethodNode},
        run::TestContextRecord,
    };
    use pretty_assertions::assert_eq;

    fn single_method_suite(verdict: Verdict) -> SuiteNode<'static> {
        let mut method = MethodNode::new("C.m");
        method.set_verdict(verdict);
        let class = ClassNode::new("C", [method]);
        let test = TestNode::new("T", [class]);
        SuiteNode::new("S", [test])
    }

    #[test]
    fn passing_chain() {
        let suite = single_method_suite(Verdict::Passed);

        assert_eq!(suite.verdict(), Verdict::Passed);
        insta::assert_snapshot!(suite.to_dot(false), @r#"
        digraph g {
        "S"[style=filled,color=green,shape=box,peripheries=2,label="Suite: S"];
        "T"[style=filled,color=green,shape=house,label="Test: T"];
        "S" -> "T";
        subgraph test0 {
        "C"[style=filled,color=green];
        "T" -> "C";
        subgraph class1 {
        "C"[shape=box,label="Class: C"];
        "C.m"[style=filled,color=green];
        "C" -> "C.m";
        }
        }
        }
        "#);
    }

    #[test]
    fn failing_method_fails_every_level() {
        let suite = single_method_suite(Verdict::Failed);

        let test = suite.tests().first().unwrap();
        let class = test.classes().first().unwrap();
        assert_eq!(class.verdict(), Verdict::Failed);
        assert_eq!(test.verdict(), Verdict::Failed);
        assert_eq!(suite.verdict(), Verdict::Failed);

        let dot = suite.to_dot(false);
        assert!(dot.contains("\"C.m\"[style=filled,color=red];"), "{dot}");
        assert!(
            dot.contains("\"S\"[style=filled,color=red,shape=box,peripheries=2"),
            "{dot}"
        );
    }

    #[test]
    fn duplicate_tests_and_suites_keep_first() {
        let suite = SuiteNode::new(
            "S",
            [
                TestNode::new("T", []),
                single_method_suite(Verdict::Failed).tests().first().unwrap().clone(),
            ],
        );
        assert_eq!(suite.tests().len(), 1);
        assert!(suite.tests().first().unwrap().classes().is_empty());
        assert_eq!(suite.verdict(), Verdict::Skipped);

        let forest = SuiteForest::new([
            single_method_suite(Verdict::Passed),
            single_method_suite(Verdict::Failed),
        ]);
        assert_eq!(forest.suites().len(), 1);
        assert_eq!(forest.suites().first().unwrap().verdict(), Verdict::Passed);
    }

    #[test]
    fn empty_suite_is_skipped() {
        let suite = SuiteNode::new("empty", []);

        assert_eq!(suite.verdict(), Verdict::Skipped);
        assert_eq!(suite.to_dot(true), "");
    }

    #[test]
    fn suite_of_empty_tests_is_skipped() {
        // The tests themselves pass, but nothing underneath them passed.
        let suite = SuiteNode::new("S", [TestNode::new("T", [])]);

        assert_eq!(suite.tests().first().unwrap().verdict(), Verdict::Passed);
        assert_eq!(suite.verdict(), Verdict::Skipped);
        assert_eq!(suite.passed().len(), 1);
    }

    #[test]
    fn child_suites_from_record() {
        let record = SuiteRecord {
            name: "parent".to_owned(),
            parallel: "tests".to_owned(),
            preserve_order: true,
            child_suites: vec!["zeta".to_owned(), "alpha".to_owned(), "zeta".to_owned()],
            ..Default::default()
        };

        let prebuilt = SuiteNode::with_tests(&record, []);
        let derived = SuiteNode::from_record(&record);
        for suite in [&prebuilt, &derived] {
            assert_eq!(
                suite.child_suites().iter().collect::<Vec<_>>(),
                ["alpha", "zeta"]
            );
            assert_eq!(suite.parallel(), "tests");
            assert!(suite.preserve_order());
            assert_eq!(suite.verdict(), Verdict::Skipped);
        }

        insta::assert_snapshot!(derived.to_dot(true), @r#"
        subgraph suite0 {
        "parent"[style=filled,color=yellow,shape=box,peripheries=2,label="Suite: parent"];
        "alpha"[shape=box,peripheries=2,label="Suite: alpha"];
        "parent" -> "alpha";
        "zeta"[shape=box,peripheries=2,label="Suite: zeta"];
        "parent" -> "zeta";
        }
        "#);
    }

    #[test]
    fn from_record_builds_tests() {
        let record = SuiteRecord {
            name: "S".to_owned(),
            results: vec![
                TestContextRecord {
                    name: "passing".to_owned(),
                    passed: vec![crate::run::MethodRecord::new("a.B", "ok")],
                    ..Default::default()
                },
                TestContextRecord {
                    name: "skipping".to_owned(),
                    skipped: vec![crate::run::MethodRecord::new("a.C", "later")],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let suite = SuiteNode::from_record(&record);
        let names: Vec<_> = suite.tests().iter().map(|t| t.name()).collect();
        assert_eq!(names, ["skipping", "passing"]);
        assert_eq!(suite.verdict(), Verdict::Passed);
        assert_eq!(suite.skips().len(), 1);
        assert!(suite.has_skips());
        assert!(!suite.has_failures());
    }

    #[test]
    fn forest_document_and_graph() {
        let forest = SuiteForest::new([
            single_method_suite(Verdict::Passed),
            SuiteNode::new("empty", []),
        ]);

        let dot = forest.to_dot();
        assert!(dot.starts_with("digraph g {\nsubgraph suite0 {\n"), "{dot}");
        assert!(dot.ends_with("}\n}\n"), "{dot}");
        // The empty suite has nothing to draw.
        assert!(!dot.contains("empty"), "{dot}");

        let json = forest.to_json().unwrap();
        let parsed: Vec<SuiteNode<'_>> = serde_json::from_str(&json).unwrap();
        let names: Vec<_> = parsed.iter().map(|s| s.name()).collect();
        assert_eq!(names, ["empty", "S"]);

        let yaml = forest.to_yaml().unwrap();
        assert!(yaml.starts_with("- parallel: none\n"), "{yaml}");
    }
}
