// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Records describing a finished test run, as handed over by the test-execution engine.
//!
//! The engine decides which methods passed, failed or were skipped. These records only carry
//! that information across; nothing here executes or classifies tests.

mod resolve;

pub use resolve::*;

use crate::errors::RunReadError;
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

/// A complete run: every suite the engine finished.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct RunRecord {
    /// The suites in this run.
    #[serde(default)]
    pub suites: Vec<SuiteRecord>,
}

impl RunRecord {
    /// Parses a run from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads a run from a JSON file.
    pub fn read_from(path: &Utf8Path) -> Result<Self, RunReadError> {
        let contents = std::fs::read_to_string(path).map_err(|error| RunReadError::Read {
            path: path.to_owned(),
            error,
        })?;
        Self::from_json(&contents).map_err(|error| RunReadError::Parse {
            path: path.to_owned(),
            error,
        })
    }
}

/// One suite of a run.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct SuiteRecord {
    /// The suite name.
    pub name: String,

    /// The parallelism mode the suite ran with, as reported by the engine.
    #[serde(default = "default_parallel")]
    pub parallel: String,

    /// Whether the suite preserved declaration order.
    #[serde(default)]
    pub preserve_order: bool,

    /// Names of the suites declared as children of this one.
    #[serde(default)]
    pub child_suites: Vec<String>,

    /// Every method declared in the suite, whether or not it ran.
    ///
    /// May be empty, in which case the methods found in [`Self::results`] form the roster.
    #[serde(default)]
    pub methods: Vec<MethodRecord>,

    /// One result context per test in the suite.
    #[serde(default)]
    pub results: Vec<TestContextRecord>,
}

/// The results of one test within a suite, bucketed by disposition.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct TestContextRecord {
    /// The test name.
    pub name: String,

    /// The parallelism mode the test ran with, as reported by the engine.
    #[serde(default = "default_parallel")]
    pub parallel: String,

    /// Whether the test preserved declaration order.
    #[serde(default)]
    pub preserve_order: bool,

    /// The groups the test was configured to include, in declaration order.
    #[serde(default)]
    pub included_groups: Vec<String>,

    /// Methods that passed.
    #[serde(default)]
    pub passed: Vec<MethodRecord>,

    /// Methods that failed, but within the configured success percentage.
    #[serde(default)]
    pub failed_within_success_percentage: Vec<MethodRecord>,

    /// Methods that failed.
    #[serde(default)]
    pub failed: Vec<MethodRecord>,

    /// Methods that were skipped.
    #[serde(default)]
    pub skipped: Vec<MethodRecord>,
}

impl TestContextRecord {
    /// Iterates over the methods of all four buckets: passed, failed within the success
    /// percentage, failed, skipped.
    ///
    /// A method that appears in more than one bucket is yielded once per bucket.
    pub fn all_bucket_methods(&self) -> impl Iterator<Item = &MethodRecord> {
        self.passed
            .iter()
            .chain(&self.failed_within_success_percentage)
            .chain(&self.failed)
            .chain(&self.skipped)
    }

    /// Returns true if a method with this qualified name is in the failed bucket.
    pub fn is_failed(&self, method: &MethodRecord) -> bool {
        contains_method(&self.failed, method)
    }

    /// Returns true if a method with this qualified name is in the skipped bucket.
    pub fn is_skipped(&self, method: &MethodRecord) -> bool {
        contains_method(&self.skipped, method)
    }
}

fn contains_method(bucket: &[MethodRecord], method: &MethodRecord) -> bool {
    bucket.iter().any(|m| m.is_same_method(method))
}

/// A single test method as declared to the engine.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct MethodRecord {
    /// The fully qualified name of the class declaring the method.
    pub class_name: String,

    /// The method's own name.
    pub method_name: String,

    /// Whether the method is enabled. Disabled methods are left out of reports.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// The groups the method belongs to.
    #[serde(default)]
    pub groups: Vec<String>,

    /// The groups the method depends on.
    #[serde(default)]
    pub groups_depended_upon: Vec<String>,

    /// The methods the method depends on, as declared.
    ///
    /// Each entry is a pattern over qualified method names. Entries without a `.` are relative to
    /// [`Self::class_name`].
    #[serde(default)]
    pub methods_depended_upon: Vec<String>,

    /// Groups this method runs before.
    #[serde(default)]
    pub before_groups: Vec<String>,

    /// Groups this method runs after.
    #[serde(default)]
    pub after_groups: Vec<String>,
}

impl MethodRecord {
    /// Creates a new, enabled method record with no groups or dependencies.
    pub fn new(class_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            enabled: true,
            groups: Vec::new(),
            groups_depended_upon: Vec::new(),
            methods_depended_upon: Vec::new(),
            before_groups: Vec::new(),
            after_groups: Vec::new(),
        }
    }

    /// Returns the qualified name: `<class_name>.<method_name>`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.class_name, self.method_name)
    }

    /// Returns true if both records name the same method.
    pub fn is_same_method(&self, other: &MethodRecord) -> bool {
        self.class_name == other.class_name && self.method_name == other.method_name
    }
}

fn default_parallel() -> String {
    "none".to_owned()
}

fn default_enabled() -> bool {
    true
}
