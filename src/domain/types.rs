use serde::Serialize;
use std::fmt::{self, Display};

// ─── Endpoints ────────────────────────────────────────────────────────────────

/// Balikobot endpoints exercised by the scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Add,
    Check,
}

impl Endpoint {
    /// Path relative to the API base URL, e.g. `cp/add`.
    pub fn path(self, carrier: &str) -> String {
        format!("{}/{}", carrier.trim_matches('/'), self)
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Endpoint::Add => "add",
            Endpoint::Check => "check",
        };
        write!(f, "{label}")
    }
}

// ─── HTTP Types ───────────────────────────────────────────────────────────────

/// Timing breakdown of a single call, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timings {
    /// Time until the response headers arrived.
    pub waiting_ms: f64,
    /// Time spent reading the body.
    pub receiving_ms: f64,
    pub duration_ms: f64,
}

/// Status, raw body and timings of one API call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
    pub timings: Timings,
}

impl ApiResponse {
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
