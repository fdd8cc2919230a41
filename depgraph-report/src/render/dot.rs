// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::model::NodeKind;
use indexmap::IndexMap;
use std::fmt;
use swrite::{SWrite, swrite};

/// The position of a node in the tree: the kind and name of each node from the root down.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct NodePath {
    path: String,
}

impl NodePath {
    /// The path of the (unnamed) root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns the path of a child of this node.
    pub fn child(&self, kind: NodeKind, name: &str) -> Self {
        let mut path = self.path.clone();
        swrite!(path, "/{kind}:{name}");
        Self { path }
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str("/")
        } else {
            f.write_str(&self.path)
        }
    }
}

/// Assigns subgraph names that are unique within one graph.
///
/// Each node position gets a number the first time a subgraph is emitted for it, counting up from
/// zero across all kinds. The name is the kind's prefix followed by that number, so rendering the
/// same graph twice yields the same names.
#[derive(Clone, Debug, Default)]
pub struct SubgraphNamer {
    assigned: IndexMap<NodePath, usize>,
}

impl SubgraphNamer {
    /// Creates a namer with no names assigned.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the subgraph name for the node at `path`, assigning one if needed.
    pub fn name_for(&mut self, kind: NodeKind, path: &NodePath) -> String {
        let next = self.assigned.len();
        let index = *self.assigned.entry(path.clone()).or_insert(next);
        format!("{}{index}", kind.subgraph_prefix())
    }
}

/// A DOT graph or subgraph under construction.
#[derive(Debug)]
pub struct DotGraph {
    out: String,
}

impl DotGraph {
    /// Opens a `digraph`, or a named `subgraph` if `as_subgraph` is set.
    pub fn open(
        as_subgraph: bool,
        kind: NodeKind,
        path: &NodePath,
        namer: &mut SubgraphNamer,
    ) -> Self {
        let mut out = String::new();
        if as_subgraph {
            swrite!(out, "subgraph {} {{\n", namer.name_for(kind, path));
        } else {
            out.push_str("digraph g {\n");
        }
        Self { out }
    }

    /// Declares a node with the given attribute list.
    pub fn node(&mut self, id: &str, attrs: &str) {
        swrite!(self.out, "\"{id}\"[{attrs}];\n");
    }

    /// Adds an edge.
    pub fn edge(&mut self, from: &str, to: &str) {
        swrite!(self.out, "\"{from}\" -> \"{to}\";\n");
    }

    /// Declares a group node and an edge to it.
    pub fn group(&mut self, from: &str, group: &str) {
        self.node(group, &format!("shape=cds,label=\"Group: {group}\""));
        self.edge(from, group);
    }

    /// Appends already-rendered statements, such as a nested subgraph.
    pub fn fragment(&mut self, dot: &str) {
        self.out.push_str(dot);
    }

    /// Closes the graph and returns its text.
    pub fn close(mut self) -> String {
        self.out.push_str("}\n");
        self.out
    }
}
