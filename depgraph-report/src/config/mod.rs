// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reporter configuration.
//!
//! Options come from a `KEY:value` list, which is itself one setting of the layered TOML config.

mod options;
mod reporter_config;

pub use options::*;
pub use reporter_config::*;
