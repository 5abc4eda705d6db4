//! Extraction Request Client: sends extracted resume text to the parser endpoint.
//!
//! One POST per upload, no retries and no idempotency key. Endpoint failures,
//! transport failures and extraction failures stay distinguishable in `ClientError`.

pub mod session;

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::extraction::ExtractionError;
use crate::parsing::models::CandidateProfile;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/api/v1/parse-resume";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Could not reach the parser endpoint: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Parser endpoint did not respond within {0:?}")]
    Timeout(Duration),

    #[error("Parser endpoint returned {status}: {message}")]
    Endpoint { status: u16, message: String },

    #[error("Unexpected response from parser endpoint: {0}")]
    InvalidResponse(String),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Upload cancelled")]
    Cancelled,

    #[error("An upload is already being processed")]
    Busy,
}

impl ClientError {
    /// Message for the failure notification.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Extraction(e) => e.user_message(),
            ClientError::Network(_) => {
                "Could not reach the resume parser. Check your connection and try again."
                    .to_string()
            }
            ClientError::Timeout(_) => "The resume parser took too long to respond".to_string(),
            ClientError::Endpoint { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// HTTP client for the Structured-Data Endpoint.
#[derive(Clone)]
pub struct ParseClient {
    http: Client,
    endpoint: String,
    timeout: Duration,
}

impl ParseClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Network)?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    /// Issues exactly one request for `resume_text` and decodes the profile.
    pub async fn request_profile(&self, resume_text: &str) -> Result<CandidateProfile, ClientError> {
        debug!(endpoint = %self.endpoint, chars = resume_text.len(), "Requesting structured profile");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "resumeText": resume_text }))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        let value = serde_json::from_str::<Value>(&body).ok();

        // The endpoint reports failures as `{ "error": "..." }`; honour that on any status.
        if let Some(message) = value.as_ref().and_then(envelope_error) {
            warn!(status = status.as_u16(), "Parser endpoint reported an error: {message}");
            return Err(ClientError::Endpoint {
                status: status.as_u16(),
                message,
            });
        }

        if !status.is_success() {
            let message = match body.trim() {
                "" => status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
                text => text.to_string(),
            };
            return Err(ClientError::Endpoint {
                status: status.as_u16(),
                message,
            });
        }

        let value = value.ok_or_else(|| {
            ClientError::InvalidResponse("response body is not JSON".to_string())
        })?;
        CandidateProfile::from_model_value(value).map_err(ClientError::InvalidResponse)
    }

    fn transport_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.timeout)
        } else {
            ClientError::Network(err)
        }
    }
}

fn envelope_error(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::String(message) => Some(message.clone()),
        Value::Object(obj) => obj
            .get("message")
            .and_then(Value::as_str)
            .map(String::from),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    use std::net::SocketAddr;

    use axum::Router;

    /// Serves `app` on an ephemeral loopback port for the lifetime of the test runtime.
    pub async fn spawn(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{http::StatusCode, routing::post, Router};

    use super::*;
    use crate::config::Config;
    use crate::parsing::pipeline::stub::StubModel;
    use crate::routes::build_router;
    use crate::state::AppState;

    const JANE_JSON: &str = r#"{"name":"Jane Doe","email":"jane@x.com","phone":"","skills":["Go","Rust"],"experience":[{"title":"Engineer","company":"Acme","duration":"2020-2023","description":""}],"education":[]}"#;

    async fn parser_endpoint(model: StubModel) -> String {
        let app = build_router(AppState {
            model: Arc::new(model),
            config: Config::default(),
        });
        let addr = test_server::spawn(app).await;
        format!("http://{addr}/api/v1/parse-resume")
    }

    #[tokio::test]
    async fn test_request_profile_success() {
        let endpoint = parser_endpoint(StubModel::replying(JANE_JSON)).await;
        let client = ParseClient::new(endpoint, Duration::from_secs(5)).unwrap();

        let profile = client.request_profile("Jane Doe resume").await.unwrap();

        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.skills, vec!["Go", "Rust"]);
    }

    #[tokio::test]
    async fn test_endpoint_error_envelope_is_propagated() {
        let endpoint = parser_endpoint(StubModel::replying("not json at all")).await;
        let client = ParseClient::new(endpoint, Duration::from_secs(5)).unwrap();

        let err = client.request_profile("Jane Doe resume").await.unwrap_err();

        match err {
            ClientError::Endpoint { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Language model returned malformed JSON");
            }
            other => panic!("expected Endpoint error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_application_error_on_success_status() {
        let app = Router::new().route(
            "/parse",
            post(|| async { axum::Json(json!({ "error": "quota exhausted" })) }),
        );
        let addr = test_server::spawn(app).await;
        let client = ParseClient::new(format!("http://{addr}/parse"), Duration::from_secs(5)).unwrap();

        let err = client.request_profile("text").await.unwrap_err();

        assert!(matches!(
            err,
            ClientError::Endpoint { status: 200, ref message } if message == "quota exhausted"
        ));
    }

    #[tokio::test]
    async fn test_non_json_failure_uses_raw_body() {
        let app = Router::new().route(
            "/parse",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream gateway down") }),
        );
        let addr = test_server::spawn(app).await;
        let client = ParseClient::new(format!("http://{addr}/parse"), Duration::from_secs(5)).unwrap();

        let err = client.request_profile("text").await.unwrap_err();

        assert!(matches!(
            err,
            ClientError::Endpoint { status: 502, ref message } if message == "upstream gateway down"
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ParseClient::new(format!("http://{addr}/parse"), Duration::from_secs(5)).unwrap();
        let err = client.request_profile("text").await.unwrap_err();

        assert!(matches!(err, ClientError::Network(_)));
        assert!(err.user_message().contains("Could not reach"));
    }

    #[tokio::test]
    async fn test_slow_endpoint_times_out() {
        let app = Router::new().route(
            "/parse",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                axum::Json(json!({}))
            }),
        );
        let addr = test_server::spawn(app).await;
        let client =
            ParseClient::new(format!("http://{addr}/parse"), Duration::from_millis(100)).unwrap();

        let err = client.request_profile("text").await.unwrap_err();

        assert!(matches!(err, ClientError::Timeout(_)));
    }

    #[test]
    fn test_envelope_error_shapes() {
        assert_eq!(
            envelope_error(&json!({"error": "boom"})),
            Some("boom".to_string())
        );
        assert_eq!(
            envelope_error(&json!({"error": {"code": "X", "message": "nested"}})),
            Some("nested".to_string())
        );
        assert_eq!(envelope_error(&json!({"name": "Jane"})), None);
    }
}
