// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The suite → test → class → method tree built from a finished run.
//!
//! The tree is built bottom-up, once, and is read-only afterwards. Every node has an identity
//! (its name) which alone decides equality and ordering, a set of children keyed by identity, and
//! a verdict. Methods carry the verdict the engine gave them; containers derive theirs when they
//! are constructed.
//!
//! # Ordering
//!
//! Nodes order **descending** by identity, and children are stored and rendered in that order.
//! Existing reports depend on this order, so it stays until the inversion is confirmed to be a
//! defect. Use [`MethodNode::cmp_descending`] (and its siblings) when the
//! direction matters to the reader.

mod class;
mod method;
mod suite;
mod verdict;

pub use class::*;
pub use method::*;
pub use suite::*;
pub use test::*;
pub use verdict::*;

use std::{collections::BTreeSet, fmt};

/// The four kinds of node in the tree.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum NodeKind {
    /// A [`SuiteNode`].
    Suite,
    /// A [`TestNode`].
    Test,
    /// A [`ClassNode`].
    Class,
    /// A [`MethodNode`].
    Method,
}

impl NodeKind {
    /// Returns the prefix used to name subgraphs for this kind of node.
    pub fn subgraph_prefix(self) -> &'static str {
        match self {
            NodeKind::Suite => "suite",
            NodeKind::Test => "test",
            NodeKind::Class => "class",
            NodeKind::Method => "method",
        }
    }

    /// Returns the report directory that per-node artifacts of this kind are written to.
    pub fn dir_name(self) -> &'static str {
        match self {
            NodeKind::Suite => "suites",
            NodeKind::Test => "tests",
            NodeKind::Class => "classes",
            NodeKind::Method => "methods",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subgraph_prefix())
    }
}

/// Collects nodes into a set keyed by identity. When two share an identity, the first is kept.
pub(crate) fn first_wins<T: Ord>(nodes: impl IntoIterator<Item = T>) -> BTreeSet<T> {
    let mut set = BTreeSet::new();
    for node in nodes {
        // insert leaves an existing equal element in place.
        set.insert(node);
    }
    set
}
