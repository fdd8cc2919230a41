// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// The outcome of a method, and the outcome derived for every node containing methods.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// The method was skipped.
    Skipped,
    /// The method failed.
    Failed,
    /// The method passed.
    Passed,
}

/// The graph style used for nodes that carry no verdict.
pub const EMPTY_DOT_STYLE: &str = "style=empty";

impl Verdict {
    /// All verdicts.
    pub const ALL: [Verdict; 3] = [Verdict::Skipped, Verdict::Failed, Verdict::Passed];

    /// Returns the Graphviz node style for this verdict.
    pub fn dot_style(self) -> &'static str {
        match self {
            Verdict::Skipped => "style=filled,color=yellow",
            Verdict::Failed => "style=filled,color=red",
            Verdict::Passed => "style=filled,color=green",
        }
    }

    /// Returns the Graphviz node style for an optional verdict, falling back to
    /// [`EMPTY_DOT_STYLE`].
    pub fn dot_style_or_empty(verdict: Option<Verdict>) -> &'static str {
        verdict.map_or(EMPTY_DOT_STYLE, Verdict::dot_style)
    }

    /// Derives a container's verdict: `default`, overridden by `first` if `first_fires`, then by
    /// [`Verdict::Failed`] if `has_failures`.
    pub(crate) fn derive(
        default: Verdict,
        first: Verdict,
        first_fires: bool,
        has_failures: bool,
    ) -> Verdict {
        let mut verdict = default;
        if first_fires {
            verdict = first;
        }
        if has_failures {
            verdict = Verdict::Failed;
        }
        verdict
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Skipped => write!(f, "SKIPPED"),
            Verdict::Failed => write!(f, "FAILED"),
            Verdict::Passed => write!(f, "PASSED"),
        }
    }
}

/// Pass, skip and failure queries over a node's members.
///
/// The `has_*` predicates look through to the methods underneath the node. The subset accessors
/// return the direct members whose own verdict matches, and are computed on every call.
pub trait VerdictTally {
    /// The kind of member this node contains.
    type Member;

    /// Returns true if any method underneath this node has the given verdict.
    fn has_any(&self, verdict: Verdict) -> bool;

    /// Returns the direct members whose own verdict is `verdict`.
    fn members_with(&self, verdict: Verdict) -> Vec<&Self::Member>;

    /// Returns true if any method underneath this node passed.
    fn has_passed(&self) -> bool {
        self.has_any(Verdict::Passed)
    }

    /// Returns the direct members that passed.
    fn passed(&self) -> Vec<&Self::Member> {
        self.members_with(Verdict::Passed)
    }

    /// Returns true if any method underneath this node was skipped.
    fn has_skips(&self) -> bool {
        self.has_any(Verdict::Skipped)
    }

    /// Returns the direct members that were skipped.
    fn skips(&self) -> Vec<&Self::Member> {
        self.members_with(Verdict::Skipped)
    }

    /// Returns true if any method underneath this node failed.
    fn has_failures(&self) -> bool {
        self.has_any(Verdict::Failed)
    }

    /// Returns the direct members that failed.
    fn failures(&self) -> Vec<&Self::Member> {
        self.members_with(Verdict::Failed)
    }
}
