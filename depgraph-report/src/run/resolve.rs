// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{MethodRecord, SuiteRecord};
use regex::Regex;
use tracing::debug;

/// Every method known to a suite, used to resolve declared dependencies.
#[derive(Clone, Debug)]
pub struct MethodRoster<'run> {
    methods: Vec<&'run MethodRecord>,
}

impl<'run> MethodRoster<'run> {
    /// Builds the roster for a suite: the suite's declared methods followed by every method in its
    /// result buckets, deduplicated by qualified name.
    pub fn new(suite: &'run SuiteRecord) -> Self {
        let declared = suite.methods.iter();
        let executed = suite
            .results
            .iter()
            .flat_map(|context| context.all_bucket_methods());
        Self::from_methods(declared.chain(executed))
    }

    /// Builds a roster from a list of methods, keeping the first of any duplicates.
    pub fn from_methods(methods: impl IntoIterator<Item = &'run MethodRecord>) -> Self {
        let mut roster: Vec<&'run MethodRecord> = Vec::new();
        for method in methods {
            if !roster.iter().any(|m| m.is_same_method(method)) {
                roster.push(method);
            }
        }
        Self { methods: roster }
    }

    /// Returns the methods in the roster, in roster order.
    pub fn methods(&self) -> &[&'run MethodRecord] {
        &self.methods
    }

    /// Resolves the methods that `method` depends on.
    ///
    /// Group dependencies come first (every roster method in one of the depended-upon groups),
    /// then explicit method dependencies (every roster method whose qualified name fully matches
    /// one of the declared patterns). The result has no duplicates. It may contain `method`
    /// itself, and nothing is done about cycles.
    pub fn depended_upon(&self, method: &MethodRecord) -> Vec<&'run MethodRecord> {
        let mut resolved: Vec<&'run MethodRecord> = Vec::new();
        let mut push = |candidate: &'run MethodRecord| {
            if !resolved.iter().any(|m| m.is_same_method(candidate)) {
                resolved.push(candidate);
            }
        };

        for group in &method.groups_depended_upon {
            for &candidate in &self.methods {
                if candidate.groups.contains(group) {
                    push(candidate);
                }
            }
        }

        for declared in &method.methods_depended_upon {
            let matcher = DependencyPattern::new(&method.class_name, declared);
            for &candidate in &self.methods {
                if matcher.is_match(&candidate.qualified_name()) {
                    push(candidate);
                }
            }
        }

        resolved
    }
}

/// A declared method dependency, qualified and compiled.
#[derive(Debug)]
struct DependencyPattern {
    regex: Regex,
}

impl DependencyPattern {
    fn new(class_name: &str, declared: &str) -> Self {
        let qualified = if declared.contains('.') {
            declared.to_owned()
        } else {
            format!("{class_name}.{declared}")
        };

        let regex = match Regex::new(&format!("^(?:{qualified})$")) {
            Ok(regex) => regex,
            Err(error) => {
                debug!(
                    "dependency `{qualified}` is not a valid pattern ({error}), matching literally"
                );
                Regex::new(&format!("^{}$", regex::escape(&qualified)))
                    .expect("escaped pattern is always valid")
            }
        };
        Self { regex }
    }

    fn is_match(&self, qualified_name: &str) -> bool {
        self.regex.is_match(qualified_name)
    }
}
