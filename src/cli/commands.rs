//! CLI command implementations

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::engine::ApiClient;
use crate::scenarios;
use crate::testing::RunReport;
use crate::validation::{BatchValidationResult, validate_add_request};

use super::args::{OutputFormat, RunArgs};
use super::errors::{CliError, CliResult};

pub async fn run(args: &RunArgs) -> CliResult<ExitCode> {
    let config = ApiConfig::from_env()?;
    tracing::info!(
        base_url = %config.base_url,
        auth = config.auth().scheme(),
        partner = config.partner.as_deref().unwrap_or("-"),
        "configuration loaded"
    );

    let client = ApiClient::new(&config)?;
    let report = scenarios::run(&client, &args.options()).await?;

    print_output(args.output, &report, render_report)?;
    Ok(exit_code(report.success()))
}

pub fn validate(path: &Path, output: OutputFormat) -> CliResult<ExitCode> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let payload: Value = serde_json::from_str(&raw)?;
    let result = validate_add_request(&payload);

    print_output(output, &result, render_validation)?;
    Ok(exit_code(result.valid))
}

fn print_output<T: Serialize>(
    output: OutputFormat,
    value: &T,
    render_text: fn(&T) -> String,
) -> CliResult<()> {
    match output {
        OutputFormat::Text => print!("{}", render_text(value)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

pub fn render_validation(result: &BatchValidationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "valid: {}", result.valid);
    for (label, lines) in [("errors", &result.errors), ("warnings", &result.warnings)] {
        if lines.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{label}:");
        for line in lines {
            let _ = writeln!(out, "  - {line}");
        }
    }
    out
}

pub fn render_report(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:>5} {:>6} {:>10} {:>7}  result",
        "scenario", "iter", "status", "time(ms)", "checks"
    );

    for scenario in &report.scenarios {
        let passed = scenario.checks.iter().filter(|c| c.passed).count();
        let status = scenario
            .status
            .map(|status| status.to_string())
            .unwrap_or_else(|| "-".to_string());
        let time = scenario
            .timings
            .map(|t| format!("{:.1}", t.duration_ms))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<12} {:>5} {:>6} {:>10} {:>7}  {}",
            scenario.scenario,
            scenario.iteration,
            status,
            time,
            format!("{passed}/{}", scenario.checks.len()),
            if scenario.success { "ok" } else { "FAILED" }
        );

        for check in scenario.checks.iter().filter(|c| !c.passed) {
            match &check.message {
                Some(message) => {
                    let _ = writeln!(out, "    x {}: {message}", check.name);
                }
                None => {
                    let _ = writeln!(out, "    x {}", check.name);
                }
            }
        }
        if let Some(error) = &scenario.error {
            let _ = writeln!(out, "    ! {error}");
        }
    }

    let _ = writeln!(
        out,
        "\nchecks: {} total, {} passed, {} failed ({} ms)",
        report.total, report.passed, report.failed, report.duration_ms
    );
    if report.latency.count > 0 {
        let latency = &report.latency;
        let _ = writeln!(
            out,
            "latency: min {:.1} / avg {:.1} / p95 {:.1} / max {:.1} ms",
            latency.min_ms, latency.avg_ms, latency.p95_ms, latency.max_ms
        );
    }
    out
}
