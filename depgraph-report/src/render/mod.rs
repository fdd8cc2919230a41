// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering nodes as Graphviz DOT, JSON and YAML.
//!
//! JSON carries the fields a node exposes. YAML carries the node's full view, which adds the run
//! record the node was built from. DOT is written by hand, one statement per line.

mod dot;

pub use dot::*;

use crate::model::NodeKind;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;

/// A node that can be rendered into any of the report formats.
pub trait ReportNode: Serialize {
    /// The kind of node.
    const KIND: NodeKind;

    /// The full view of this node, serialized into YAML documents.
    type Full<'a>: Serialize
    where
        Self: 'a;

    /// Returns the node's identity.
    fn name(&self) -> &str;

    /// Writes this node as DOT.
    ///
    /// With `as_subgraph` set, the output is a `subgraph` block named by `namer`, or nothing at all
    /// if the node has nothing to contribute to an enclosing graph. Otherwise it is a complete
    /// `digraph`. `parent` is the path of the enclosing node.
    fn write_dot(&self, as_subgraph: bool, parent: &NodePath, namer: &mut SubgraphNamer)
    -> String;

    /// Returns the full view of this node.
    fn full(&self) -> Self::Full<'_>;

    /// Renders this node as DOT, numbering subgraphs from zero.
    fn to_dot(&self, as_subgraph: bool) -> String {
        self.write_dot(as_subgraph, &NodePath::root(), &mut SubgraphNamer::new())
    }

    /// Renders the exposed fields of this node as pretty-printed JSON.
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Renders the full view of this node as YAML.
    fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.full())
    }
}

/// Serializes a set of nodes as a sequence of their full views.
pub(crate) fn serialize_full_set<T, S>(set: &&BTreeSet<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: ReportNode,
    S: Serializer,
{
    serializer.collect_seq(set.iter().map(|node| node.full()))
}
