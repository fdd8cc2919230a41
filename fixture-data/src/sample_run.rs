// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Expected contents of `fixtures/sample-run.json`.
//!
//! Iteration order here is ascending by name, which is the reverse of node order.

use crate::models::{
    ClassFixture, MethodFixture, SuiteFixture, TestFixture,
    VerdictFixture::{Failed, Passed, Skipped},
};
use iddqd::{IdOrdMap, id_ord_map};
use std::sync::LazyLock;

pub static EXPECTED_SUITES: LazyLock<IdOrdMap<SuiteFixture>> = LazyLock::new(|| {
    id_ord_map! {
        SuiteFixture::new(
            "Regression Suite",
            Failed,
            id_ord_map! {
                TestFixture::new(
                    "Login Tests",
                    Failed,
                    id_ord_map! {
                        ClassFixture::new(
                            "com.acme.LoginTest",
                            Failed,
                            id_ord_map! {
                                MethodFixture::new("com.acme.LoginTest.openPage", Passed),
                                MethodFixture::new("com.acme.LoginTest.submitCredentials", Passed)
                                    .with_dependent_methods(&["com.acme.LoginTest.openPage"]),
                                MethodFixture::new("com.acme.LoginTest.rejectBadPassword", Failed),
                            },
                        ),
                        ClassFixture::new(
                            "com.acme.SessionTest",
                            Skipped,
                            id_ord_map! {
                                // Everything in the `auth` group.
                                MethodFixture::new("com.acme.SessionTest.refreshToken", Skipped)
                                    .with_dependent_methods(&[
                                        "com.acme.LoginTest.openPage",
                                        "com.acme.LoginTest.submitCredentials",
                                        "com.acme.LoginTest.rejectBadPassword",
                                    ]),
                            },
                        ),
                    },
                ),
                TestFixture::new(
                    "Reporting Tests",
                    Passed,
                    id_ord_map! {
                        ClassFixture::new(
                            "com.acme.ExportTest",
                            Passed,
                            id_ord_map! {
                                MethodFixture::new("com.acme.ExportTest.exportCsv", Passed),
                                // Failed within the success percentage.
                                MethodFixture::new("com.acme.ExportTest.exportPdf", Passed)
                                    .with_dependent_methods(&["com.acme.ExportTest.exportCsv"]),
                            },
                        ),
                    },
                ),
            },
        )
        .with_child_suites(&["Smoke Suite"]),
        SuiteFixture::new(
            "Smoke Suite",
            Skipped,
            id_ord_map! {
                TestFixture::new(
                    "Quick Check",
                    Skipped,
                    id_ord_map! {
                        ClassFixture::new(
                            "com.acme.PingTest",
                            Skipped,
                            id_ord_map! {
                                MethodFixture::new("com.acme.PingTest.ping", Skipped),
                            },
                        ),
                    },
                ),
            },
        ),
        SuiteFixture::new("Empty Suite", Skipped, IdOrdMap::new()),
    }
});

/// Methods in the run that are disabled, and so appear in no report.
pub static DISABLED_METHODS: &[&str] = &["com.acme.LoginTest.disabledCase"];
