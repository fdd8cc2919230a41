// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{MethodNode, NodeKind, Verdict, VerdictTally, first_wins};
use crate::render::{DotGraph, NodePath, ReportNode, SubgraphNamer, serialize_full_set};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, collections::BTreeSet};

/// A test class and the methods of it that ran.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ClassNode<'run> {
    name: String,
    #[serde(rename = "testMethods")]
    methods: BTreeSet<MethodNode<'run>>,
    #[serde(rename = "classResult")]
    verdict: Verdict,
}

impl<'run> ClassNode<'run> {
    /// Creates a class from its methods and derives its verdict.
    ///
    /// Methods are keyed by identity: if two have the same name, the first one is kept.
    pub fn new(
        name: impl Into<String>,
        methods: impl IntoIterator<Item = MethodNode<'run>>,
    ) -> Self {
        let mut this = Self {
            name: name.into(),
            methods: first_wins(methods),
            verdict: Verdict::Passed,
        };
        this.verdict = Verdict::derive(
            Verdict::Passed,
            Verdict::Skipped,
            this.has_skips(),
            this.has_failures(),
        );
        this
    }

    /// Returns the qualified class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the methods, in node order.
    pub fn methods(&self) -> &BTreeSet<MethodNode<'run>> {
        &self.methods
    }

    /// Returns the verdict derived at construction: failed if any method failed, otherwise
    /// skipped if any method was skipped, otherwise passed.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Compares identities in descending order. This is the order [`Ord`] uses.
    pub fn cmp_descending(&self, other: &Self) -> Ordering {
        other.name.cmp(&self.name)
    }
}

impl<'run> VerdictTally for ClassNode<'run> {
    type Member = MethodNode<'run>;

    fn has_any(&self, verdict: Verdict) -> bool {
        self.methods.iter().any(|m| m.verdict() == Some(verdict))
    }

    fn members_with(&self, verdict: Verdict) -> Vec<&Self::Member> {
        self.methods
            .iter()
            .filter(|m| m.verdict() == Some(verdict))
            .collect()
    }
}

impl PartialEq for ClassNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ClassNode<'_> {}

impl PartialOrd for ClassNode<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClassNode<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_descending(other)
    }
}

/// The document view of a class, with its methods in their document views.
#[derive(Serialize)]
pub struct FullClass<'a, 'run> {
    name: &'a str,
    #[serde(rename = "testMethods", serialize_with = "serialize_full_set")]
    methods: &'a BTreeSet<MethodNode<'run>>,
    #[serde(rename = "classResult")]
    verdict: Verdict,
}

impl<'run> ReportNode for ClassNode<'run> {
    const KIND: NodeKind = NodeKind::Class;

    type Full<'a>
        = FullClass<'a, 'run>
    where
        Self: 'a;

    fn name(&self) -> &str {
        &self.name
    }

    fn write_dot(&self, as_subgraph: bool, parent: &NodePath, namer: &mut SubgraphNamer) -> String {
        if as_subgraph && self.methods.is_empty() {
            return String::new();
        }

        let path = parent.child(Self::KIND, &self.name);
        let mut graph = DotGraph::open(as_subgraph, Self::KIND, &path, namer);
        graph.node(&self.name, &format!("shape=box,label=\"Class: {}\"", self.name));
        let mut visited = BTreeSet::new();
        for method in &self.methods {
            if !visited.insert(method.name()) {
                continue;
            }
            graph.node(method.name(), Verdict::dot_style_or_empty(method.verdict()));
            graph.edge(&self.name, method.name());
            graph.fragment(&method.write_dot(true, &path, namer));
        }
        graph.close()
    }

    fn full(&self) -> Self::Full<'_> {
        FullClass {
            name: &self.name,
            methods: &self.methods,
            verdict: self.verdict,
        }
    }
}
