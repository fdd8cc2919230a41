// Copyright (c) The depgraph Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data models for fixture information.

use iddqd::{IdOrdItem, IdOrdMap, id_upcast};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VerdictFixture {
    Passed,
    Failed,
    Skipped,
}

impl VerdictFixture {
    /// The verdict as it appears in documents.
    pub fn as_str(self) -> &'static str {
        match self {
            VerdictFixture::Passed => "PASSED",
            VerdictFixture::Failed => "FAILED",
            VerdictFixture::Skipped => "SKIPPED",
        }
    }

    /// The DOT color nodes with this verdict are filled with.
    pub fn color(self) -> &'static str {
        match self {
            VerdictFixture::Passed => "green",
            VerdictFixture::Failed => "red",
            VerdictFixture::Skipped => "yellow",
        }
    }
}

#[derive(Clone, Debug)]
pub struct SuiteFixture {
    pub name: &'static str,
    pub verdict: VerdictFixture,
    pub child_suites: &'static [&'static str],
    pub tests: IdOrdMap<TestFixture>,
}

impl SuiteFixture {
    pub fn new(
        name: &'static str,
        verdict: VerdictFixture,
        tests: IdOrdMap<TestFixture>,
    ) -> Self {
        Self {
            name,
            verdict,
            child_suites: &[],
            tests,
        }
    }

    pub fn with_child_suites(mut self, child_suites: &'static [&'static str]) -> Self {
        self.child_suites = child_suites;
        self
    }
}

impl IdOrdItem for SuiteFixture {
    type Key<'a> = &'a str;
    fn key(&self) -> Self::Key<'_> {
        self.name
    }
    id_upcast!();
}

#[derive(Clone, Debug)]
pub struct TestFixture {
    pub name: &'static str,
    pub verdict: VerdictFixture,
    pub classes: IdOrdMap<ClassFixture>,
}

impl TestFixture {
    pub fn new(
        name: &'static str,
        verdict: VerdictFixture,
        classes: IdOrdMap<ClassFixture>,
    ) -> Self {
        Self {
            name,
            verdict,
            classes,
        }
    }
}

impl IdOrdItem for TestFixture {
    type Key<'a> = &'a str;
    fn key(&self) -> Self::Key<'_> {
        self.name
    }
    id_upcast!();
}

#[derive(Clone, Debug)]
pub struct ClassFixture {
    pub name: &'static str,
    pub verdict: VerdictFixture,
    pub methods: IdOrdMap<MethodFixture>,
}

impl ClassFixture {
    pub fn new(
        name: &'static str,
        verdict: VerdictFixture,
        methods: IdOrdMap<MethodFixture>,
    ) -> Self {
        Self {
            name,
            verdict,
            methods,
        }
    }
}

impl IdOrdItem for ClassFixture {
    type Key<'a> = &'a str;
    fn key(&self) -> Self::Key<'_> {
        self.name
    }
    id_upcast!();
}

/// A method, by qualified name.
#[derive(Clone, Debug)]
pub struct MethodFixture {
    pub name: &'static str,
    pub verdict: VerdictFixture,
    pub dependent_methods: &'static [&'static str],
}

impl MethodFixture {
    pub fn new(name: &'static str, verdict: VerdictFixture) -> Self {
        Self {
            name,
            verdict,
            dependent_methods: &[],
        }
    }

    pub fn with_dependent_methods(mut self, methods: &'static [&'static str]) -> Self {
        self.dependent_methods = methods;
        self
    }
}

impl IdOrdItem for MethodFixture {
    type Key<'a> = &'a str;
    fn key(&self) -> Self::Key<'_> {
        self.name
    }
    id_upcast!();
}
