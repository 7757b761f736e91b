use crate::{Error, ErrorContext, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

/// Deadline applied to every request unless overridden on the builder.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-call request options. Headers given here replace the defaults of the same name.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            headers: Vec::new(),
            body: Some(body),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .map_err(|e| {
                Error::configuration_with_context(
                    format!("Failed to create HTTP client: {}", e),
                    ErrorContext::new().with_source("http_transport"),
                )
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute endpoints are used as given; anything else is appended to the base URL.
    pub fn resolve(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http") {
            endpoint.to_string()
        } else {
            format!("{}{}", self.base_url, endpoint)
        }
    }

    /// Execute a request and decode the JSON response body.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let body = self.execute(endpoint, options).await?;
        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(endpoint, error = %e, "malformed response body");
            Error::Other(e.to_string())
        })
    }

    /// Execute a request and return the raw body of a successful response.
    ///
    /// The whole exchange (connect, send, status, body) runs under one deadline.
    /// When it expires the in-flight future is dropped, which aborts the request.
    pub async fn execute(&self, endpoint: &str, options: RequestOptions) -> Result<Vec<u8>> {
        let url = self.resolve(endpoint);
        let method = options.method.clone();
        let headers = build_headers(&options.headers)?;

        let mut req = self.client.request(method.clone(), &url).headers(headers);
        if let Some(body) = &options.body {
            req = req.body(serde_json::to_vec(body)?);
        }

        tracing::debug!(%method, %url, "sending request");
        let started = Instant::now();

        let exchange = async {
            let response = req.send().await.map_err(classify_transport_error)?;
            let status = response.status();
            if !status.is_success() {
                return Err(Error::from_status(status));
            }
            let bytes = response.bytes().await.map_err(classify_transport_error)?;
            Ok(bytes.to_vec())
        };

        let outcome = match tokio::time::timeout(self.timeout, exchange).await {
            Ok(outcome) => outcome,
            Err(_) => Err(Error::Timeout),
        };

        match &outcome {
            Ok(body) => tracing::debug!(
                %method,
                %url,
                bytes = body.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "request completed"
            ),
            Err(e) => tracing::warn!(
                %method,
                %url,
                category = ?e.category(),
                error = %e,
                "request failed"
            ),
        }
        outcome
    }
}

/// Map a low-level transport failure onto the client's error variants.
///
/// Anything that went wrong on the wire (connect, send, reading the body) is
/// `Unreachable`. Decode and builder failures keep their own message.
pub(crate) fn classify_transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout
    } else if err.is_decode() || err.is_builder() {
        Error::Other(err.to_string())
    } else if err.is_connect() || err.is_request() || err.is_body() {
        Error::Unreachable
    } else {
        Error::Other(err.to_string())
    }
}

fn build_headers(overrides: &[(String, String)]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in overrides {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            Error::validation_with_context(
                format!("Invalid header name: {}", e),
                ErrorContext::new()
                    .with_field_path(format!("headers.{}", name))
                    .with_source("http_transport"),
            )
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            Error::validation_with_context(
                format!("Invalid header value: {}", e),
                ErrorContext::new()
                    .with_field_path(format!("headers.{}", name))
                    .with_source("http_transport"),
            )
        })?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}
