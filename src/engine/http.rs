use crate::config::ApiConfig;
use crate::domain::{ApiResponse, Timings};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::{Duration, Instant};

pub const PARTNER_HEADER: &str = "BB-Partner";
const JSON_MIME: &str = "application/json";

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("Invalid URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid header `{name}`: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to read response: {0}")]
    ReadBody(String),
}

pub fn build_headers(input: &[(&str, String)]) -> Result<HeaderMap, HttpError> {
    let mut headers = HeaderMap::new();

    for (key, value) in input {
        if key.is_empty() {
            continue;
        }

        let invalid = |reason: String| HttpError::InvalidHeader {
            name: key.to_string(),
            reason,
        };
        let header_name =
            HeaderName::from_bytes(key.as_bytes()).map_err(|err| invalid(err.to_string()))?;
        let header_value = HeaderValue::from_str(value).map_err(|err| invalid(err.to_string()))?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}

/// Headers sent with every Balikobot call.
pub fn default_headers(config: &ApiConfig) -> Result<HeaderMap, HttpError> {
    let mut pairs = vec![
        ("Content-Type", JSON_MIME.to_string()),
        ("Accept", JSON_MIME.to_string()),
        ("Authorization", config.auth().header_value()),
    ];
    if let Some(partner) = &config.partner {
        pairs.push((PARTNER_HEADER, partner.clone()));
    }
    build_headers(&pairs)
}

fn classify_reqwest_error(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        return HttpError::Timeout(err.to_string());
    }
    if err.is_connect() {
        return HttpError::Connect(err.to_string());
    }
    if err.is_body() || err.is_decode() {
        return HttpError::ReadBody(err.to_string());
    }
    HttpError::Request(err.to_string())
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}

/// A single reusable client bound to one API base URL and credential set.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    headers: HeaderMap,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, HttpError> {
        // `Url::join` drops the last segment unless the base ends with `/`.
        let base = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&base).map_err(|err| HttpError::InvalidUrl {
            url: config.base_url.clone(),
            reason: err.to_string(),
        })?;

        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| HttpError::Client(err.to_string()))?;

        Ok(Self {
            client,
            base_url,
            headers: default_headers(config)?,
        })
    }

    pub fn url(&self, path: &str) -> Result<Url, HttpError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| HttpError::InvalidUrl {
                url: path.to_string(),
                reason: err.to_string(),
            })
    }

    /// Sends `body` as JSON to `path` with a single POST.
    pub async fn post_json(&self, path: &str, body: &Value) -> Result<ApiResponse, HttpError> {
        let url = self.url(path)?;
        let request = self
            .client
            .post(url.clone())
            .headers(self.headers.clone())
            .body(body.to_string());

        tracing::debug!(%url, "sending request");
        let started = Instant::now();
        let response = request.send().await.map_err(classify_reqwest_error)?;
        let waiting_ms = elapsed_ms(started);
        let status = response.status();

        let receive_started = Instant::now();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| HttpError::ReadBody(err.to_string()))?;
        let receiving_ms = elapsed_ms(receive_started);
        let duration_ms = elapsed_ms(started);

        tracing::debug!(status = status.as_u16(), duration_ms, "response received");

        Ok(ApiResponse {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&bytes).to_string(),
            timings: Timings {
                waiting_ms,
                receiving_ms,
                duration_ms,
            },
        })
    }
}
