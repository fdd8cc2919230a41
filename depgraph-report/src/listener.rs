// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Answers to the test engine's lifecycle hooks.
//!
//! With `PRESCAN:true`, the engine is asked to skip every test and configuration method so that a
//! run produces the structure of the suites without executing anything.

use crate::config::ReporterOptions;

/// The reason given for tests skipped during a prescan.
pub const PRESCAN_SKIP_REASON: &str = "Skipped for suite analysis";

/// What the engine should do with a test or configuration method that is about to run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HookAction {
    /// Run it normally.
    Run,
    /// Skip it.
    Skip {
        /// Why it was skipped.
        reason: &'static str,
    },
}

/// The status the engine recorded for a configuration method.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConfigurationStatus {
    /// The configuration method succeeded.
    Success,
    /// The configuration method was skipped.
    Skip,
}

/// Decides how the engine's hooks respond, based on the reporter options.
#[derive(Copy, Clone, Debug)]
pub struct PrescanGate {
    active: bool,
}

impl PrescanGate {
    /// Creates a gate from the reporter options. The gate is active only when reporting is
    /// enabled and a prescan was requested.
    pub fn new(options: &ReporterOptions) -> Self {
        Self {
            active: options.enabled && options.prescan,
        }
    }

    /// Returns true if the gate is skipping execution.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Called before a test starts.
    pub fn on_test_start(&self) -> HookAction {
        self.action()
    }

    /// Called before a configuration method runs.
    pub fn before_configuration(&self) -> HookAction {
        self.action()
    }

    /// Called after a configuration method was skipped. Returns the status to record.
    ///
    /// During a prescan, skipped configuration is recorded as a success so that the engine does not
    /// cascade the skip into dependent suites.
    pub fn on_configuration_skip(&self) -> ConfigurationStatus {
        if self.active {
            ConfigurationStatus::Success
        } else {
            ConfigurationStatus::Skip
        }
    }

    fn action(&self) -> HookAction {
        if self.active {
            HookAction::Skip {
                reason: PRESCAN_SKIP_REASON,
            }
        } else {
            HookAction::Run
        }
    }
}
