//! # Scenarios
//!
//! The end-to-end scripts. Every scenario builds its payload, validates it
//! locally, sends exactly one request and records checks against the
//! response. Transport and parse failures end the scenario with
//! `success = false`; they are logged, never propagated.

use std::fmt::{self, Display};
use std::time::Instant;

use serde_json::Value;

use crate::domain::{ApiResponse, Endpoint};
use crate::engine::ApiClient;
use crate::fixtures::{self, PackageGenerator};
use crate::testing::{Assertion, CheckSet, ReportError, RunReport, ScenarioReport, lookup};
use crate::validation::{BatchValidationResult, validate_add_request};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Randomized valid packages sent to `add`.
    Add,
    /// Canned valid packages sent to `check`.
    Check,
    /// A package missing `rec_name` with a mistyped `weight`, sent to `add`.
    InvalidAdd,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Add, Scenario::Check, Scenario::InvalidAdd];

    pub fn endpoint(self) -> Endpoint {
        match self {
            Scenario::Add | Scenario::InvalidAdd => Endpoint::Add,
            Scenario::Check => Endpoint::Check,
        }
    }
}

impl Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Scenario::Add => "add",
            Scenario::Check => "check",
            Scenario::InvalidAdd => "invalid-add",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub scenarios: Vec<Scenario>,
    pub carrier: String,
    pub iterations: u64,
    pub packages_per_request: usize,
    pub seed: Option<u64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            scenarios: Scenario::ALL.to_vec(),
            carrier: "cp".to_string(),
            iterations: 1,
            packages_per_request: 1,
            seed: None,
        }
    }
}

/// Runs every selected scenario `iterations` times, strictly in sequence.
pub async fn run(client: &ApiClient, options: &RunOptions) -> Result<RunReport, ReportError> {
    let started = Instant::now();
    let mut generator = PackageGenerator::new(options.seed);
    let mut reports = Vec::new();

    for iteration in 0..options.iterations.max(1) {
        for &scenario in &options.scenarios {
            let report = run_scenario(client, scenario, options, &mut generator, iteration).await;
            tracing::info!(
                %scenario,
                iteration,
                success = report.success,
                status = report.status,
                "scenario finished"
            );
            reports.push(report);
        }
    }

    RunReport::from_scenarios(reports, started.elapsed().as_millis())
}

pub async fn run_scenario(
    client: &ApiClient,
    scenario: Scenario,
    options: &RunOptions,
    generator: &mut PackageGenerator,
    iteration: u64,
) -> ScenarioReport {
    let payload = match scenario {
        Scenario::Add => generator.request(options.packages_per_request).to_value(),
        Scenario::Check => fixtures::canned_request(options.packages_per_request).to_value(),
        Scenario::InvalidAdd => Ok(fixtures::invalid_request()),
    };

    let mut report = ScenarioReport {
        scenario: scenario.to_string(),
        iteration,
        success: false,
        status: None,
        timings: None,
        validation: BatchValidationResult::default(),
        checks: Vec::new(),
        error: None,
    };

    let payload = match payload {
        Ok(payload) => payload,
        Err(err) => {
            tracing::error!(%scenario, error = %err, "failed to serialize payload");
            report.error = Some(format!("Failed to serialize payload: {err}"));
            return report;
        }
    };

    let mut checks = CheckSet::new();
    let validation = validate_add_request(&payload);
    for warning in &validation.warnings {
        tracing::warn!(%scenario, %warning, "payload validation warning");
    }
    match scenario {
        Scenario::InvalidAdd => checks.check("payload is rejected locally", !validation.valid),
        Scenario::Add | Scenario::Check => checks.check("payload is valid", validation.valid),
    };
    report.validation = validation;

    let path = scenario.endpoint().path(&options.carrier);
    let response = match client.post_json(&path, &payload).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(%scenario, %path, error = %err, "request failed");
            checks.check("response received", false);
            report.error = Some(err.to_string());
            report.checks = checks.into_results();
            return report;
        }
    };
    checks.check("response received", true);
    report.status = Some(response.status);
    report.timings = Some(response.timings);

    let body = match response.json() {
        Ok(body) => body,
        Err(err) => {
            tracing::error!(
                %scenario,
                status = response.status,
                body = %truncate(&response.body, 512),
                error = %err,
                "response body is not JSON"
            );
            checks.check("body is JSON", false);
            report.error = Some(format!("Failed to parse response body: {err}"));
            report.checks = checks.into_results();
            return report;
        }
    };
    checks.check("body is JSON", true);

    match scenario {
        Scenario::Add => assert_created(&mut checks, &response, &body),
        Scenario::Check => assert_checked(&mut checks, &response),
        Scenario::InvalidAdd => assert_rejected(&mut checks, &body),
    }

    report.success = checks.all_passed();
    report.checks = checks.into_results();
    report
}

fn assert_created(checks: &mut CheckSet, response: &ApiResponse, body: &Value) {
    checks.assert(&Assertion::status_equals(200), response);
    checks.assert(&Assertion::json_equals("status", "200"), response);

    let packages = lookup(body, "packages").and_then(Value::as_array);
    if !checks.check("body has packages", packages.is_some_and(|p| !p.is_empty())) {
        return;
    }
    for (index, _) in packages.into_iter().flatten().enumerate() {
        let status = Assertion::json_equals(&format!("packages.{index}.status"), "200");
        checks.assert(&status, response);
        checks.assert(&Assertion::json_exists(&format!("packages.{index}.package_id")), response);
    }
}

fn assert_checked(checks: &mut CheckSet, response: &ApiResponse) {
    checks.assert(&Assertion::status_equals(200), response);
    checks.assert(&Assertion::json_equals("status", "200"), response);
}

// The API may answer a rejected package with HTTP 200 or 400, so only the
// body is asserted.
fn assert_rejected(checks: &mut CheckSet, body: &Value) {
    let status = lookup(body, "status").and_then(Value::as_u64);
    checks.check("body status is not 200", status.is_some_and(|status| status != 200));

    let errors = lookup(body, "packages.0.errors");
    let has_errors = match errors {
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(fields)) => !fields.is_empty(),
        _ => false,
    };
    checks.check("package reports errors", has_errors);
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
