//! HTTP client for the upstream generative-text service.

use std::env;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Response};
use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::types::{GenerateContentRequest, GenerateContentResponse, Turn};

const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// The upstream model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// The outbound relay call: full history plus the persona instruction in,
/// answer text out.
///
/// This is the seam between the conversation core and the network; retry
/// policies and controllers are written against it so they can be exercised
/// with stub implementations.
#[async_trait]
pub trait Relay: Send + Sync {
    /// Sends one request pairing `history` with `instruction` and returns the
    /// answer text.
    ///
    /// Implementations perform exactly one network call and never mutate
    /// conversation state.
    async fn generate(&self, history: &[Turn], instruction: &str) -> Result<String>;
}

#[async_trait]
impl<T: Relay + ?Sized> Relay for std::sync::Arc<T> {
    async fn generate(&self, history: &[Turn], instruction: &str) -> Result<String> {
        (**self).generate(history, instruction).await
    }
}

/// Client for the Gemini `generateContent` API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    client: ReqwestClient,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// The API key can be provided directly or read from the GEMINI_API_KEY
    /// environment variable.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_options(api_key, None, None, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(
        api_key: Option<String>,
        base_url: Option<String>,
        model: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let api_key = match api_key {
            Some(key) => key,
            None => env::var("GEMINI_API_KEY").map_err(|_| {
                Error::configuration(
                    "API key not provided and GEMINI_API_KEY environment variable not set",
                )
            })?,
        };

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            api_key,
            client,
            base_url: base_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout,
        })
    }

    /// The upstream endpoint with the credential appended as a query pair.
    fn endpoint_url(&self) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}:generateContent", self.base_url, self.model))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    /// Process API response errors and convert to our Error type.
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.parse::<u64>().ok());

        // Try to parse the upstream error body
        #[derive(Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::serialization(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let message = serde_json::from_str::<ErrorResponse>(&error_body)
            .ok()
            .and_then(|e| e.error)
            .and_then(|e| e.message)
            .unwrap_or(error_body);

        classify_status(status_code, message, retry_after)
    }
}

/// Map a non-success upstream status to an error, preserving retryability:
/// 429 and server faults are transient, everything else is permanent.
fn classify_status(status_code: u16, message: String, retry_after: Option<u64>) -> Error {
    match status_code {
        429 => Error::rate_limit(message, retry_after),
        500..=599 => Error::upstream(status_code, message),
        _ => Error::api(status_code, message),
    }
}

#[async_trait]
impl Relay for GeminiClient {
    async fn generate(&self, history: &[Turn], instruction: &str) -> Result<String> {
        let url = self.endpoint_url()?;
        let request = GenerateContentRequest::new(history.to_vec(), instruction);

        CLIENT_REQUESTS.click();
        let start = Instant::now();
        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                CLIENT_REQUEST_ERRORS.click();
                if e.is_timeout() {
                    Error::timeout(
                        format!("Request timed out: {}", e),
                        Some(self.timeout.as_secs_f64()),
                    )
                } else {
                    Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
                }
            })?;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());

        if !response.status().is_success() {
            CLIENT_REQUEST_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            CLIENT_REQUEST_ERRORS.click();
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })?;

        match body.answer_text() {
            Some(text) => Ok(text.to_string()),
            None => {
                CLIENT_REQUEST_ERRORS.click();
                Err(Error::bad_response(
                    "response carried no answer text at candidates[0].content.parts[0].text",
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_client_creation() {
        // Test with explicit API key
        let client = GeminiClient::new(Some("test-key".to_string())).unwrap();
        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.base_url, DEFAULT_API_URL);
        assert_eq!(client.model, DEFAULT_MODEL);
        assert_eq!(client.timeout, DEFAULT_TIMEOUT);

        // Test with custom options
        let client = GeminiClient::with_options(
            Some("test-key".to_string()),
            Some("https://custom-api.example.com/models/".to_string()),
            Some("gemini-test".to_string()),
            Some(Duration::from_secs(30)),
        )
        .unwrap();
        assert_eq!(client.base_url, "https://custom-api.example.com/models/");
        assert_eq!(client.model, "gemini-test");
        assert_eq!(client.timeout, Duration::from_secs(30));
    }

    #[test]
    fn endpoint_url_carries_model_and_key() {
        let client = GeminiClient::new(Some("test-key".to_string())).unwrap();
        let url = client.endpoint_url().unwrap();
        assert!(url.path().ends_with(&format!("{DEFAULT_MODEL}:generateContent")));
        assert_eq!(url.query(), Some("key=test-key"));
    }

    #[test]
    fn classify_rate_limit() {
        let err = classify_status(429, "quota exceeded".to_string(), Some(7));
        assert_eq!(err.kind(), ErrorKind::Transient);
        match err {
            Error::RateLimit { retry_after, .. } => assert_eq!(retry_after, Some(7)),
            other => panic!("expected rate limit, got {other:?}"),
        }
    }

    #[test]
    fn classify_server_faults() {
        for status in [500u16, 502, 503, 599] {
            let err = classify_status(status, "server fault".to_string(), None);
            assert_eq!(err.kind(), ErrorKind::Transient);
            assert_eq!(err.status_code(), Some(status));
        }
    }

    #[test]
    fn classify_client_errors() {
        for status in [400u16, 401, 403, 404] {
            let err = classify_status(status, "client error".to_string(), None);
            assert_eq!(err.kind(), ErrorKind::Permanent);
            assert_eq!(err.status_code(), Some(status));
        }
    }
}
