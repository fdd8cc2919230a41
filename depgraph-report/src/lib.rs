// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Dependency graphs and structured reports for hierarchical test runs.
//!
//! A finished run (suites containing tests, tests containing classes, classes containing
//! methods) is read through the records in [`run`], aggregated bottom-up into the node tree in
//! [`model`], and written out by [`reporter::DependencyReporter`] as Graphviz graph text, JSON and
//! YAML.

pub mod config;
pub mod errors;
pub mod helpers;
pub mod listener;
pub mod model;
pub mod render;
pub mod reporter;
pub mod run;
