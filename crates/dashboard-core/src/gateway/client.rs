//! Shared HTTP client
//!
//! One request per call: no retries, no timeouts beyond the transport's
//! own, no caching. Non-2xx responses always become `GatewayError::Remote`
//! carrying the server's body text.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{GatewayError, GatewayResult};

/// Characters left as-is by `encodeURIComponent`
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Tunnelled deployments of the backend interpose a browser warning page
/// unless this header is present.
const SKIP_BROWSER_WARNING: &str = "ngrok-skip-browser-warning";

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> GatewayResult<Self> {
        Self::with_http(base_url, reqwest::Client::new())
    }

    /// Shares an existing connection pool.
    pub fn with_http(base_url: &str, http: reqwest::Client) -> GatewayResult<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        let path = path.trim();
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// `GET path?query`, decoded leniently.
    pub async fn get_value(&self, path: &str, query: &[(&str, String)]) -> GatewayResult<Value> {
        let url = self.endpoint(path);
        debug!("GET {} {:?}", url, query);
        let request = self
            .http
            .get(&url)
            .query(query)
            .header(ACCEPT, "application/json")
            .header(SKIP_BROWSER_WARNING, "true");
        dispatch(request, "GET", &url).await
    }

    /// Sends a JSON body (or none) with the given method.
    pub async fn send_json<B>(&self, method: Method, path: &str, body: Option<&B>) -> GatewayResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        debug!("{} {}", method, url);
        let label = method.to_string();
        let mut request = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }
        dispatch(request, &label, &url).await
    }
}

async fn dispatch(request: RequestBuilder, method: &str, url: &str) -> GatewayResult<Value> {
    let response = request.send().await.map_err(|error| {
        warn!("{} {} failed: {}", method, url, error);
        GatewayError::Network {
            message: error.to_string(),
        }
    })?;
    decode_json_response(response, method, url).await
}

/// Reads the body and checks the status. Empty bodies decode to `Null` and
/// non-JSON bodies to a JSON string, since several endpoints answer 2xx with
/// plain text.
async fn decode_json_response(response: Response, method: &str, url: &str) -> GatewayResult<Value> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(|error| GatewayError::Network {
        message: error.to_string(),
    })?;

    if !status.is_success() {
        warn!("{} {} -> {}", method, url, status);
        return Err(GatewayError::remote(status.as_u16(), &bytes));
    }

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).trim().to_string())))
}

/// Trims whitespace and trailing slashes; requires an http(s) scheme and a host.
pub fn normalize_base_url(raw: &str) -> GatewayResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let Some((scheme, rest)) = trimmed.split_once("://") else {
        return Err(GatewayError::InvalidBaseUrl(raw.to_string()));
    };
    if !matches!(scheme, "http" | "https") || rest.is_empty() || rest.starts_with('/') {
        return Err(GatewayError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Percent-encodes one path segment.
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_base_url_trims_and_drops_trailing_slash() {
        assert_eq!(
            normalize_base_url("  https://api.example.com/// ").unwrap(),
            "https://api.example.com"
        );
        assert_eq!(normalize_base_url("http://127.0.0.1:8080").unwrap(), "http://127.0.0.1:8080");
    }

    #[test]
    fn normalize_base_url_requires_http_scheme() {
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("ftp://api.example.com").is_err());
        assert!(normalize_base_url("api.example.com").is_err());
        assert!(normalize_base_url("https:///path").is_err());
    }

    #[test]
    fn endpoint_builder_joins_paths() {
        let client = ApiClient::new("https://api.example.com/").unwrap();
        assert_eq!(client.endpoint("/api/mvp/3"), "https://api.example.com/api/mvp/3");
        assert_eq!(client.endpoint("api/mvp/3"), "https://api.example.com/api/mvp/3");
    }

    #[test]
    fn encode_segment_matches_uri_component_rules() {
        assert_eq!(encode_segment("real estate"), "real%20estate");
        assert_eq!(encode_segment("caf\u{e9}/bar"), "caf%C3%A9%2Fbar");
        assert_eq!(encode_segment("a-b_c.d~(e)"), "a-b_c.d~(e)");
    }
}
