use serde::Serialize;
use serde_json::Value;

use crate::domain::ApiResponse;

/// Target of an assertion within the HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionTarget {
    StatusCode,
    /// Dot-separated path into the JSON body, e.g. `packages.0.status`.
    JsonPath(String),
    BodyContains,
}

/// Comparison operator for an assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertionOperator {
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
    Exists,
}

/// A single assertion that can be evaluated against a response.
#[derive(Debug, Clone)]
pub struct Assertion {
    pub target: AssertionTarget,
    pub operator: AssertionOperator,
    pub expected: String,
}

/// Outcome of one named check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Assertion {
    pub fn new(
        target: AssertionTarget,
        operator: AssertionOperator,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            target,
            operator,
            expected: expected.into(),
        }
    }

    pub fn status_equals(status: u16) -> Self {
        Self::new(AssertionTarget::StatusCode, AssertionOperator::Equals, status.to_string())
    }

    pub fn json_equals(path: &str, expected: impl Into<String>) -> Self {
        Self::new(AssertionTarget::JsonPath(path.into()), AssertionOperator::Equals, expected)
    }

    pub fn json_exists(path: &str) -> Self {
        Self::new(AssertionTarget::JsonPath(path.into()), AssertionOperator::Exists, "")
    }

    /// Human-readable label used as the check name.
    pub fn describe(&self) -> String {
        let target = match &self.target {
            AssertionTarget::StatusCode => "status".to_string(),
            AssertionTarget::JsonPath(path) => format!("body.{path}"),
            AssertionTarget::BodyContains => "body".to_string(),
        };
        let operator = match self.operator {
            AssertionOperator::Equals => "==",
            AssertionOperator::NotEquals => "!=",
            AssertionOperator::Contains => "contains",
            AssertionOperator::GreaterThan => ">",
            AssertionOperator::LessThan => "<",
            AssertionOperator::Exists => return format!("{target} exists"),
        };
        format!("{target} {operator} {}", self.expected)
    }

    pub fn evaluate(&self, response: &ApiResponse) -> CheckResult {
        let actual = match &self.target {
            AssertionTarget::StatusCode => Some(response.status.to_string()),
            AssertionTarget::BodyContains => Some(response.body.clone()),
            AssertionTarget::JsonPath(path) => match response.json() {
                Ok(body) => lookup(&body, path).and_then(render),
                Err(err) => {
                    return self.failed(None, format!("Body is not JSON: {err}"));
                }
            },
        };

        let passed = match (self.operator, actual.as_deref()) {
            (AssertionOperator::Exists, found) => found.is_some(),
            (_, None) => false,
            (AssertionOperator::Equals, Some(actual)) => actual == self.expected,
            (AssertionOperator::NotEquals, Some(actual)) => actual != self.expected,
            (AssertionOperator::Contains, Some(actual)) => actual.contains(&self.expected),
            (AssertionOperator::GreaterThan, Some(actual)) => {
                compare_numbers(actual, &self.expected).is_some_and(|(a, e)| a > e)
            }
            (AssertionOperator::LessThan, Some(actual)) => {
                compare_numbers(actual, &self.expected).is_some_and(|(a, e)| a < e)
            }
        };

        if passed {
            CheckResult {
                name: self.describe(),
                passed,
                actual,
                message: None,
            }
        } else {
            let message = match &actual {
                Some(value) => format!("expected {}, got {value}", self.describe()),
                None => format!("expected {}, value missing", self.describe()),
            };
            self.failed(actual, message)
        }
    }

    fn failed(&self, actual: Option<String>, message: String) -> CheckResult {
        CheckResult {
            name: self.describe(),
            passed: false,
            actual,
            message: Some(message),
        }
    }
}

/// Resolves a dot path against a JSON value. Numeric segments index arrays.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    let pointer: String = path
        .split('.')
        .map(|segment| format!("/{}", segment.replace('~', "~0").replace('/', "~1")))
        .collect();
    value.pointer(&pointer)
}

/// Strings render without quotes; `null` counts as missing.
fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn compare_numbers(actual: &str, expected: &str) -> Option<(f64, f64)> {
    Some((actual.trim().parse().ok()?, expected.trim().parse().ok()?))
}
