//! HTTP capability used by every pipeline step.
//!
//! The pipeline never talks to `reqwest` directly. It goes through
//! [`HttpFetch`], so the same code runs against openSenseMap in production
//! and against canned responses in tests.

use crate::model::SenseBoxError;
use std::time::Duration;

/// Status code and raw body of a completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Issues a GET with query parameters, bounded by `timeout`.
///
/// `Err` is reserved for transport failures (DNS, connect, timeout, body
/// read). Any HTTP status, including 5xx, is a successful `HttpResponse`.
pub trait HttpFetch: Send + Sync {
    fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<HttpResponse, SenseBoxError>;
}

impl HttpFetch for reqwest::blocking::Client {
    fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<HttpResponse, SenseBoxError> {
        let response = reqwest::blocking::Client::get(self, url)
            .query(query)
            .header("Accept", "application/json")
            .timeout(timeout)
            .send()
            .map_err(|e| SenseBoxError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| SenseBoxError::Transport(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

/// Builds the client that backs one pipeline run.
pub fn build_client() -> Result<reqwest::blocking::Client, SenseBoxError> {
    reqwest::blocking::Client::builder()
        .user_agent(concat!("hivebox_service/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| SenseBoxError::ClientInit(e.to_string()))
}
