// crates/sensor-gate-client/src/probe.rs
// ============================================================================
// Module: HTTP Probe Client
// Description: Thin request/response wrapper over reqwest for probing.
// Purpose: Return (status, decoded body) pairs with transport errors intact.
// Dependencies: reqwest, serde, serde_json, thiserror, url
// ============================================================================

//! ## Overview
//! Probes are consumed immediately by assertions and never persisted. Any
//! transport-level failure propagates unmodified to the scenario runner,
//! which wraps it with the step trace. Empty response bodies decode as JSON
//! `null` so endpoints that answer with a bare status still yield a body.

// ============================================================================
// SECTION: Imports
// ============================================================================

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use sensor_gate_core::ScenarioError;

// ============================================================================
// SECTION: Probe Errors
// ============================================================================

/// Transport-level failures raised by the probe client.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Base URL or client construction was invalid.
    #[error("invalid probe configuration: {0}")]
    Build(String),
    /// Request could not be sent or the response could not be read.
    #[error("http request failed: {0}")]
    Send(String),
    /// Response body was not valid JSON or did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<ProbeError> for ScenarioError {
    fn from(err: ProbeError) -> Self {
        Self::Transport(err.to_string())
    }
}

// ============================================================================
// SECTION: Probe Response
// ============================================================================

/// Status code and decoded body of one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    /// HTTP status code.
    status: u16,
    /// Decoded JSON body; `Null` for empty bodies.
    body: Value,
}

impl ProbeResponse {
    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the decoded JSON body.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.body
    }

    /// Decodes the body into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Decode`] when the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self, context: &str) -> Result<T, ProbeError> {
        serde_json::from_value(self.body.clone())
            .map_err(|err| ProbeError::Decode(format!("decode {context}: {err}")))
    }
}

// ============================================================================
// SECTION: Probe Client
// ============================================================================

/// HTTP client bound to the base URL of the service under test.
#[derive(Debug, Clone)]
pub struct ProbeClient {
    /// Base URL without a trailing slash.
    base_url: String,
    /// Shared reqwest client with transport-default timeouts.
    client: Client,
}

impl ProbeClient {
    /// Creates a probe client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Build`] when the base URL does not parse or the
    /// underlying client cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self, ProbeError> {
        Url::parse(base_url).map_err(|err| ProbeError::Build(format!("invalid base url: {err}")))?;
        let client =
            Client::builder().build().map_err(|err| ProbeError::Build(err.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Returns the base URL the client probes.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues a GET probe against `{base_url}{path}`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] on transport or decode failure.
    pub async fn get(&self, path: &str) -> Result<ProbeResponse, ProbeError> {
        self.execute(self.client.get(self.join(path))).await
    }

    /// Issues a POST probe with a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] on transport or decode failure.
    pub async fn post<T: Serialize + Sync>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<ProbeResponse, ProbeError> {
        self.execute(self.client.post(self.join(path)).json(payload)).await
    }

    /// Issues a PUT probe with a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] on transport or decode failure.
    pub async fn put<T: Serialize + Sync>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<ProbeResponse, ProbeError> {
        self.execute(self.client.put(self.join(path)).json(payload)).await
    }

    /// Issues a DELETE probe.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] on transport or decode failure.
    pub async fn delete(&self, path: &str) -> Result<ProbeResponse, ProbeError> {
        self.execute(self.client.delete(self.join(path))).await
    }

    /// Joins the relative path onto the base URL.
    fn join(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends the request exactly once and decodes the response.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<ProbeResponse, ProbeError> {
        let response = request.send().await.map_err(|err| ProbeError::Send(err.to_string()))?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|err| ProbeError::Send(err.to_string()))?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|err| ProbeError::Decode(err.to_string()))?
        };
        Ok(ProbeResponse {
            status,
            body,
        })
    }
}
