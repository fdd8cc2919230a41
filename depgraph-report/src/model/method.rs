// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{NodeKind, Verdict};
use crate::{
    render::{DotGraph, NodePath, ReportNode, SubgraphNamer},
    run::{MethodRecord, MethodRoster},
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single test method, its group memberships and the edges to whatever it depends on.
///
/// The identity is the qualified name, `<class name>.<method name>`.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodNode<'run> {
    #[serde(rename = "methodName")]
    name: String,
    groups: Vec<String>,
    dependent_groups: Vec<String>,
    before_groups: Vec<String>,
    after_groups: Vec<String>,
    dependent_methods: Vec<String>,
    #[serde(rename = "result", default, skip_serializing_if = "Option::is_none")]
    verdict: Option<Verdict>,

    #[serde(skip)]
    source: Option<&'run MethodRecord>,
}

impl<'run> MethodNode<'run> {
    /// Creates a method with the given qualified name, no groups, no dependencies and no verdict.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
            dependent_groups: Vec::new(),
            before_groups: Vec::new(),
            after_groups: Vec::new(),
            dependent_methods: Vec::new(),
            verdict: None,
            source: None,
        }
    }

    /// Creates a method from its run record, resolving the methods it depends on against the
    /// suite's roster.
    pub fn from_record(record: &'run MethodRecord, roster: &MethodRoster<'run>) -> Self {
        let dependent_methods = roster
            .depended_upon(record)
            .into_iter()
            .map(MethodRecord::qualified_name)
            .collect();

        Self {
            name: record.qualified_name(),
            groups: record.groups.clone(),
            dependent_groups: record.groups_depended_upon.clone(),
            before_groups: record.before_groups.clone(),
            after_groups: record.after_groups.clone(),
            dependent_methods,
            verdict: None,
            source: Some(record),
        }
    }

    /// Sets the verdict the engine gave this method.
    pub fn set_verdict(&mut self, verdict: Verdict) -> &mut Self {
        self.verdict = Some(verdict);
        self
    }

    /// Sets the groups this method belongs to.
    pub fn set_groups(&mut self, groups: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the groups this method depends on.
    pub fn set_dependent_groups(
        &mut self,
        groups: impl IntoIterator<Item = impl Into<String>>,
    ) -> &mut Self {
        self.dependent_groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the groups this method runs before.
    pub fn set_before_groups(
        &mut self,
        groups: impl IntoIterator<Item = impl Into<String>>,
    ) -> &mut Self {
        self.before_groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the groups this method runs after.
    pub fn set_after_groups(
        &mut self,
        groups: impl IntoIterator<Item = impl Into<String>>,
    ) -> &mut Self {
        self.after_groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the qualified names of the methods this method depends on.
    pub fn set_dependent_methods(
        &mut self,
        methods: impl IntoIterator<Item = impl Into<String>>,
    ) -> &mut Self {
        self.dependent_methods = methods.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the qualified name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the verdict, if one was attached.
    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    /// Returns the groups this method belongs to.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Returns the groups this method depends on.
    pub fn dependent_groups(&self) -> &[String] {
        &self.dependent_groups
    }

    /// Returns the groups this method runs before.
    pub fn before_groups(&self) -> &[String] {
        &self.before_groups
    }

    /// Returns the groups this method runs after.
    pub fn after_groups(&self) -> &[String] {
        &self.after_groups
    }

    /// Returns the qualified names of the methods this method depends on.
    pub fn dependent_methods(&self) -> &[String] {
        &self.dependent_methods
    }

    /// Returns the run record this method was built from, if any.
    pub fn source(&self) -> Option<&'run MethodRecord> {
        self.source
    }

    /// Compares identities in descending order. This is the order [`Ord`] uses.
    pub fn cmp_descending(&self, other: &Self) -> Ordering {
        other.name.cmp(&self.name)
    }

    fn has_dependencies(&self) -> bool {
        !self.dependent_methods.is_empty() || !self.dependent_groups.is_empty()
    }
}

impl PartialEq for MethodNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for MethodNode<'_> {}

impl PartialOrd for MethodNode<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MethodNode<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_descending(other)
    }
}

/// The document view of a method including the record it was built from.
#[derive(Serialize)]
pub struct FullMethod<'a, 'run> {
    #[serde(flatten)]
    node: &'a MethodNode<'run>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'run MethodRecord>,
}

impl<'run> ReportNode for MethodNode<'run> {
    const KIND: NodeKind = NodeKind::Method;

    type Full<'a>
        = FullMethod<'a, 'run>
    where
        Self: 'a;

    fn name(&self) -> &str {
        &self.name
    }

    fn write_dot(&self, as_subgraph: bool, parent: &NodePath, namer: &mut SubgraphNamer) -> String {
        // Nothing to show in a nested view.
        if as_subgraph && !self.has_dependencies() {
            return String::new();
        }

        let path = parent.child(Self::KIND, &self.name);
        let mut graph = DotGraph::open(as_subgraph, Self::KIND, &path, namer);
        for method in &self.dependent_methods {
            graph.edge(&self.name, method);
        }
        for group in &self.dependent_groups {
            graph.group(&self.name, group);
        }
        graph.close()
    }

    fn full(&self) -> Self::Full<'_> {
        FullMethod {
            node: self,
            source: self.source,
        }
    }
}
