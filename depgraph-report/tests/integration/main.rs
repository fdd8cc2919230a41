// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod fixtures;
mod forest;
mod report_writer;
