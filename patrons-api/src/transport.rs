//! Blocking HTTP transport.

use std::time::Duration;

use serde_json::Value;

use crate::error::ApiError;

const USER_AGENT: &str = concat!("patrons/", env!("CARGO_PKG_VERSION"));

/// The network seam. Every request the crate makes goes through one of these
/// two calls, so tests can script responses without a server.
pub trait Transport {
    /// `GET url` with a bearer token, parsed as JSON.
    fn get_json(&self, url: &str, bearer: &str) -> Result<Value, ApiError>;

    /// `POST url` with a JSON body. Only the status matters.
    fn post_json(&self, url: &str, body: &Value) -> Result<(), ApiError>;
}

/// `ureq`-backed transport with a single per-request timeout.
#[derive(Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();
        Self { agent }
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, url: &str, bearer: &str) -> Result<Value, ApiError> {
        tracing::debug!("GET {url}");
        let response = self
            .agent
            .get(url)
            .set("Authorization", &format!("Bearer {bearer}"))
            .set("Content-Type", "application/json")
            .call()
            .map_err(|e| map_ureq_error(url, e))?;
        ensure_success(url, response.status())?;

        let body = response.into_string().map_err(|source| ApiError::Body {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|source| ApiError::Json {
            url: url.to_string(),
            source,
        })
    }

    fn post_json(&self, url: &str, body: &Value) -> Result<(), ApiError> {
        tracing::debug!("POST {url}");
        let response = self
            .agent
            .post(url)
            .send_json(body)
            .map_err(|e| map_ureq_error(url, e))?;
        ensure_success(url, response.status())
    }
}

fn ensure_success(url: &str, status: u16) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ApiError::Status {
            url: url.to_string(),
            status,
        })
    }
}

fn map_ureq_error(url: &str, err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(status, _) => ApiError::Status {
            url: url.to_string(),
            status,
        },
        ureq::Error::Transport(transport) => ApiError::Transport {
            url: url.to_string(),
            message: transport.to_string(),
        },
    }
}
