//! Conformance testing harness for miniprintf.
//!
//! This crate provides:
//! - Fixture verify: run JSON fixture cases through `snprintf` and compare
//! - Fixture capture: record the host libc's `snprintf` output as fixtures
//! - Report generation: markdown and JSON conformance reports
//! - Structured JSONL logs with an artifact index

#![deny(unsafe_code)]

#[cfg(unix)]
#[allow(unsafe_code)]
pub mod capture;
pub mod diff;
pub mod error;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use error::HarnessError;
pub use fixtures::{FixtureArg, FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::{VerificationResult, VerificationSummary};
