use hdrhistogram::Histogram;
use serde::Serialize;

use crate::domain::Timings;
use crate::validation::BatchValidationResult;

use super::assertions::CheckResult;

/// Upper bound recorded by the latency histogram, in microseconds.
const MAX_LATENCY_US: u64 = 60_000_000;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to initialize latency histogram: {0}")]
    Histogram(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatencySummary {
    pub count: u64,
    pub min_ms: f64,
    pub avg_ms: f64,
    pub max_ms: f64,
    pub p50_ms: f64,
    pub p90_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
}

impl LatencySummary {
    pub fn from_durations(durations_ms: &[f64]) -> Result<Self, ReportError> {
        if durations_ms.is_empty() {
            return Ok(Self::default());
        }

        let mut histogram = Histogram::<u64>::new_with_bounds(1, MAX_LATENCY_US, 3)
            .map_err(|err| ReportError::Histogram(err.to_string()))?;
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        let mut sum = 0.0;
        for &duration in durations_ms {
            min = min.min(duration);
            max = max.max(duration);
            sum += duration;
            let micros = ((duration * 1000.0).round().max(1.0) as u64).min(MAX_LATENCY_US);
            let _ = histogram.record(micros);
        }

        let quantile = |q: f64| round_to_3(histogram.value_at_quantile(q) as f64 / 1000.0);
        Ok(Self {
            count: durations_ms.len() as u64,
            min_ms: round_to_3(min),
            avg_ms: round_to_3(sum / durations_ms.len() as f64),
            max_ms: round_to_3(max),
            p50_ms: quantile(0.50),
            p90_ms: quantile(0.90),
            p95_ms: quantile(0.95),
            p99_ms: quantile(0.99),
        })
    }
}

fn round_to_3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Outcome of one scenario iteration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    pub scenario: String,
    pub iteration: u64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timings: Option<Timings>,
    pub validation: BatchValidationResult,
    pub checks: Vec<CheckResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary report for a whole run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// Number of checks evaluated.
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub scenarios_failed: usize,
    pub duration_ms: u128,
    pub latency: LatencySummary,
    pub scenarios: Vec<ScenarioReport>,
}

impl RunReport {
    pub fn from_scenarios(
        scenarios: Vec<ScenarioReport>,
        duration_ms: u128,
    ) -> Result<Self, ReportError> {
        let durations: Vec<f64> = scenarios
            .iter()
            .filter_map(|scenario| scenario.timings.map(|t| t.duration_ms))
            .collect();

        let total = scenarios.iter().map(|s| s.checks.len()).sum();
        let passed = scenarios
            .iter()
            .flat_map(|s| s.checks.iter())
            .filter(|check| check.passed)
            .count();

        Ok(Self {
            total,
            passed,
            failed: total - passed,
            scenarios_failed: scenarios.iter().filter(|s| !s.success).count(),
            duration_ms,
            latency: LatencySummary::from_durations(&durations)?,
            scenarios,
        })
    }

    pub fn success(&self) -> bool {
        self.failed == 0 && self.scenarios_failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(name: &str, passed: bool) -> CheckResult {
        CheckResult {
            name: name.into(),
            passed,
            actual: None,
            message: None,
        }
    }

    fn scenario(
        success: bool,
        duration_ms: Option<f64>,
        checks: Vec<CheckResult>,
    ) -> ScenarioReport {
        ScenarioReport {
            scenario: "add".into(),
            iteration: 0,
            success,
            status: duration_ms.map(|_| 200),
            timings: duration_ms.map(|duration_ms| Timings {
                waiting_ms: duration_ms,
                receiving_ms: 0.0,
                duration_ms,
            }),
            validation: BatchValidationResult::default(),
            checks,
            error: None,
        }
    }

    #[test]
    fn latency_percentiles() {
        let summary = LatencySummary::from_durations(&[10.0, 20.0, 30.0, 40.0]).unwrap();

        assert_eq!(summary.count, 4);
        assert_eq!(summary.min_ms, 10.0);
        assert_eq!(summary.max_ms, 40.0);
        assert_eq!(summary.avg_ms, 25.0);
        assert!((summary.p50_ms - 20.0).abs() < 0.1);
        assert!((summary.p99_ms - 40.0).abs() < 0.1);
    }

    #[test]
    fn empty_latency_is_zeroed() {
        assert_eq!(LatencySummary::from_durations(&[]).unwrap(), LatencySummary::default());
    }

    #[test]
    fn run_report_counts_checks_and_failures() {
        let report = RunReport::from_scenarios(
            vec![
                scenario(true, Some(12.0), vec![check("a", true), check("b", true)]),
                scenario(false, None, vec![check("c", false)]),
            ],
            50,
        )
        .unwrap();

        assert_eq!(report.total, 3);
        assert_eq!(report.passed, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.scenarios_failed, 1);
        assert_eq!(report.latency.count, 1);
        assert!(!report.success());
    }

    #[test]
    fn clean_run_succeeds() {
        let clean = scenario(true, Some(5.0), vec![check("a", true)]);
        let report = RunReport::from_scenarios(vec![clean], 5).unwrap();
        assert!(report.success());
    }
}
