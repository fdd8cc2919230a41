// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `depgraph` command-line tool.
//!
//! This crate is not meant to be used as a library. Its API is unstable.

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::DepgraphApp;
#[doc(hidden)]
pub use errors::{DepgraphExitCode, ExpectedError};
#[doc(hidden)]
pub use output::{OutputContext, OutputWriter};
