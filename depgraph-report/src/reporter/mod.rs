// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Writing reports to disk.
//!
//! The reporter builds the suite forest for a run and writes the combined documents, then one
//! set of artifacts per node down to the configured depth, then converts graphs to images.

mod convert;
mod imp;

pub use convert::*;
pub use imp::*;
