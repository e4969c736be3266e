//! Test execution engine.

use miniprintf_core::snprintf;

use crate::diff;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::verify::VerificationResult;

/// What one `snprintf` call produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Bytes stored before the terminator.
    pub output: String,
    /// Returned (untruncated) length.
    pub returned: usize,
}

/// Run a case through the engine with the case's capacity.
#[must_use]
pub fn render_case(case: &FixtureCase) -> Rendered {
    let capacity = case.capacity();
    let mut buf = vec![0u8; capacity];
    let args = case.arguments();
    let returned = snprintf(&mut buf, case.format.as_bytes(), &args);
    let stored = returned.min(capacity.saturating_sub(1));
    Rendered {
        output: String::from_utf8_lossy(&buf[..stored]).into_owned(),
        returned,
    }
}

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
    /// Only run cases whose section starts with this prefix.
    pub section_filter: Option<String>,
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub fn new(campaign: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
            section_filter: None,
        }
    }

    #[must_use]
    pub fn with_section_filter(mut self, prefix: impl Into<String>) -> Self {
        self.section_filter = Some(prefix.into());
        self
    }

    /// Run all fixtures in a set and return results.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set
            .cases
            .iter()
            .filter(|case| self.selects(case))
            .map(verify_case)
            .collect()
    }

    fn selects(&self, case: &FixtureCase) -> bool {
        self.section_filter
            .as_deref()
            .is_none_or(|prefix| case.section.starts_with(prefix))
    }
}

fn verify_case(case: &FixtureCase) -> VerificationResult {
    let run = render_case(case);
    let output_matches = run.output == case.expected_output;
    let return_matches = run.returned == case.expected_return;

    let mut notes = Vec::new();
    if !output_matches {
        notes.push(diff::render_diff(&case.expected_output, &run.output));
    }
    if !return_matches {
        notes.push(diff::render_return_mismatch(case.expected_return, run.returned));
    }

    VerificationResult {
        case_name: case.name.clone(),
        section: case.section.clone(),
        format: case.format.clone(),
        passed: output_matches && return_matches,
        expected: case.expected_output.clone(),
        actual: run.output,
        expected_return: case.expected_return,
        actual_return: run.returned,
        diff: (!notes.is_empty()).then(|| notes.join("\n")),
    }
}
