// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture data for depgraph integration tests.

pub mod models;
pub mod sample_run;

/// The canned run, as written by a test engine.
pub const SAMPLE_RUN_JSON: &str = include_str!("../fixtures/sample-run.json");
