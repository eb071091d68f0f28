//! # Checks & Assertions
//!
//! Records named pass/fail outcomes for each scenario, evaluates response
//! assertions (status, JSON paths, body text) and rolls everything up into a
//! run report with a latency summary.

mod assertions;
mod checks;
mod report;

pub use assertions::{Assertion, AssertionOperator, AssertionTarget, CheckResult, lookup};
pub use checks::CheckSet;
pub use report::{LatencySummary, ReportError, RunReport, ScenarioReport};
