use std::error::Error as _;
use std::time::Duration;

use probe_logging::{probe_debug, probe_warn};
use reqwest::header::{HeaderMap, ACCEPT, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN};

use crate::{EngineError, FailureKind, FetchError, ProbeRequest, ProbeResponse};

/// Transport tuning. Both timeouts default to none: the probe relies on
/// whatever the operating system gives up at.
#[derive(Debug, Clone, Default)]
pub struct FetchSettings {
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, request: &ProbeRequest) -> Result<ProbeResponse, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: &FetchSettings) -> Result<Self, EngineError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, request: &ProbeRequest) -> Result<ProbeResponse, FetchError> {
        let parsed = reqwest::Url::parse(&request.url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let cross_origin = request
            .origin
            .as_deref()
            .filter(|origin| !is_same_origin(&parsed, origin));

        let mut builder = self
            .client
            .get(parsed)
            .header(ACCEPT, "application/json");
        if let Some(origin) = cross_origin {
            builder = builder.header(ORIGIN, origin);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        probe_debug!("GET {} -> {}", request.url, status);

        if let Some(origin) = cross_origin {
            check_cors(origin, response.headers())?;
        }

        let headers = collect_headers(response.headers());
        let body = response.text().await.map_err(|err| {
            FetchError::new(FailureKind::Body, describe(&err))
        })?;

        Ok(ProbeResponse {
            status,
            headers,
            body,
        })
    }
}

/// Scheme, host and port match; such requests need no allow-origin grant.
pub(crate) fn is_same_origin(target: &reqwest::Url, origin: &str) -> bool {
    reqwest::Url::parse(origin.trim())
        .map(|origin| origin.origin() == target.origin())
        .unwrap_or(false)
}

/// Applies the browser's cross-origin rule: the response must allow `origin`
/// explicitly or through `*`, otherwise it is withheld as a fetch failure.
pub(crate) fn check_cors(origin: &str, headers: &HeaderMap) -> Result<(), FetchError> {
    let allowed = headers
        .get(ACCESS_CONTROL_ALLOW_ORIGIN)
        .and_then(|value| value.to_str().ok())
        .map(str::trim);

    match allowed {
        Some("*") => Ok(()),
        Some(value) if value.eq_ignore_ascii_case(origin) => Ok(()),
        Some(value) => {
            probe_warn!("CORS mismatch: allow-origin={} origin={}", value, origin);
            Err(FetchError::new(
                FailureKind::CorsRejected,
                format!(
                    "Failed to fetch: Access-Control-Allow-Origin '{value}' does not match origin '{origin}'"
                ),
            ))
        }
        None => {
            probe_warn!("CORS rejection: no allow-origin header for origin={}", origin);
            Err(FetchError::new(
                FailureKind::CorsRejected,
                format!("Failed to fetch: no Access-Control-Allow-Origin header for origin '{origin}'"),
            ))
        }
    }
}

fn collect_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            (name.as_str().to_string(), value)
        })
        .collect()
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, describe(&err));
    }
    if err.is_connect() {
        return FetchError::new(
            FailureKind::Connect,
            format!("Failed to fetch: {}", describe(&err)),
        );
    }
    FetchError::new(
        FailureKind::Network,
        format!("Failed to fetch: {}", describe(&err)),
    )
}

/// Error text including its source chain.
fn describe(err: &reqwest::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers_with(allow: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(value) = allow {
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(value));
        }
        headers
    }

    #[test]
    fn wildcard_and_exact_origin_pass() {
        let origin = "http://localhost:3000";
        assert!(check_cors(origin, &headers_with(Some("*"))).is_ok());
        assert!(check_cors(origin, &headers_with(Some("http://localhost:3000"))).is_ok());
        assert!(check_cors(origin, &headers_with(Some("HTTP://LOCALHOST:3000"))).is_ok());
    }

    #[test]
    fn same_origin_compares_scheme_host_and_port() {
        let target = reqwest::Url::parse("http://127.0.0.1:8080/").unwrap();
        assert!(is_same_origin(&target, "http://127.0.0.1:8080"));
        assert!(is_same_origin(&target, "http://127.0.0.1:8080/"));
        assert!(!is_same_origin(&target, "http://127.0.0.1:3000"));
        assert!(!is_same_origin(&target, "https://127.0.0.1:8080"));
        assert!(!is_same_origin(&target, "not an origin"));

        let default_port = reqwest::Url::parse("https://api.example.com/").unwrap();
        assert!(is_same_origin(&default_port, "https://api.example.com:443"));
    }

    #[test]
    fn missing_or_other_origin_is_rejected_as_fetch_failure() {
        let origin = "http://localhost:3000";
        for headers in [headers_with(None), headers_with(Some("https://app.example.com"))] {
            let err = check_cors(origin, &headers).unwrap_err();
            assert_eq!(err.kind, FailureKind::CorsRejected);
            assert!(err.message.starts_with("Failed to fetch"));
            assert!(err.is_transport());
        }
    }
}
