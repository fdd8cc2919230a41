// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! General support code for depgraph-report.

use crate::model::NodeKind;

/// Utilities for pluralizing various words based on count or plurality.
pub mod plural {
    /// Returns "artifact" if `count` is 1, otherwise "artifacts".
    pub fn artifacts_str(count: usize) -> &'static str {
        if count == 1 { "artifact" } else { "artifacts" }
    }

    /// Returns "suite" if `count` is 1, otherwise "suites".
    pub fn suites_str(count: usize) -> &'static str {
        if count == 1 { "suite" } else { "suites" }
    }

    /// Returns "image" if `count` is 1, otherwise "images".
    pub fn images_str(count: usize) -> &'static str {
        if count == 1 { "image" } else { "images" }
    }
}

/// Returns the file stem used for a node's per-node artifacts.
///
/// Suite and test names lose their spaces. Class and method identities are used as they are.
pub(crate) fn artifact_stem(kind: NodeKind, name: &str) -> String {
    match kind {
        NodeKind::Suite | NodeKind::Test => name.replace(' ', ""),
        NodeKind::Class | NodeKind::Method => name.to_owned(),
    }
}
