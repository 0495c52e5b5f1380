//! Error types for patrons-api.

use thiserror::Error;

/// All errors that can arise talking to the upstream API or the webhook.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP error {status} at {url}{}", auth_hint(.status))]
    Status { url: String, status: u16 },

    /// Connection, TLS, DNS or timeout failure.
    #[error("network error at {url}: {message}")]
    Transport { url: String, message: String },

    /// The response body could not be read.
    #[error("failed to read response from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// The response body was not the JSON shape we expect.
    #[error("malformed JSON from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The webhook body could not be encoded.
    #[error("failed to encode webhook body for {url}: {source}")]
    Encode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// `GET /campaigns` returned an empty list.
    #[error("no campaigns found for this account")]
    NoCampaigns,
}

fn auth_hint(status: &u16) -> &'static str {
    if *status == 401 {
        ". Authentication failed. Check your PATREON_ACCESS_TOKEN."
    } else {
        ""
    }
}
