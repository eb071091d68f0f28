use serde::Serialize;

use crate::domain::ApiResponse;

use super::assertions::{Assertion, CheckResult};

/// Named boolean outcomes recorded while a scenario runs.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct CheckSet {
    results: Vec<CheckResult>,
}

impl CheckSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `passed` under `name` and hands it back for chaining.
    pub fn check(&mut self, name: impl Into<String>, passed: bool) -> bool {
        let name = name.into();
        if !passed {
            tracing::warn!(check = %name, "check failed");
        }
        self.results.push(CheckResult {
            name,
            passed,
            actual: None,
            message: None,
        });
        passed
    }

    pub fn assert(&mut self, assertion: &Assertion, response: &ApiResponse) -> bool {
        let result = assertion.evaluate(response);
        if let Some(message) = result.message.as_deref().filter(|_| !result.passed) {
            tracing::warn!(check = %result.name, %message, "check failed");
        }
        let passed = result.passed;
        self.results.push(result);
        passed
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|result| result.passed)
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|result| result.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<CheckResult> {
        self.results
    }
}
