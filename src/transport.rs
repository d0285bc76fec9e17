//! SOAP transport: the wire primitive and the per-endpoint gateway.
//!
//! [`SoapTransport`] is the only network-facing seam in the crate: given an
//! endpoint URL, an operation name and a fully built envelope, it returns
//! the raw response XML or a [`RemoteFault`]. The production implementation
//! is a blocking ureq POST; tests inject a scripted transport.
//!
//! [`SoapGateway`] binds one endpoint URL and one credential pair for its
//! lifetime, attaches a fresh WS-Security header to every call, and
//! classifies failures into the typed fault taxonomy.

use crate::error::{Error, RemoteFault, Result};
use crate::extract::{self, Document};
use crate::security;
use std::sync::Arc;
use tracing::{debug, warn};
use ureq::Agent;

/// Opaque wire collaborator: send XML, receive XML, or fail.
pub trait SoapTransport: Send + Sync {
    /// Perform one SOAP exchange against `url`.
    fn send(&self, url: &str, operation: &str, envelope: &str)
        -> std::result::Result<String, RemoteFault>;
}

/// Blocking HTTP transport.
pub struct HttpTransport {
    agent: Agent,
}

impl HttpTransport {
    pub fn new() -> Self {
        // Keep 4xx/5xx readable: SOAP faults arrive as HTTP 500 bodies and
        // must not surface as a status error before we can extract the code.
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.into(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SoapTransport for HttpTransport {
    fn send(
        &self,
        url: &str,
        operation: &str,
        envelope: &str,
    ) -> std::result::Result<String, RemoteFault> {
        let soap_action = format!("\"{}\"", operation);

        let mut response = self
            .agent
            .post(url)
            .header("Content-Type", r#"text/xml; charset="utf-8""#)
            .header("SOAPAction", &soap_action)
            .send(envelope.to_string())
            .map_err(|e| RemoteFault::transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| RemoteFault::transport(format!("failed to read response body: {}", e)))?;

        if status.is_success() {
            return Ok(body);
        }

        Err(remote_fault_from_body(status.as_u16(), &body))
    }
}

/// Build a typed fault from a non-2xx response body.
///
/// The registry reports validation problems as SOAP faults whose
/// `faultstring` is the numeric remote error code.
fn remote_fault_from_body(status: u16, body: &str) -> RemoteFault {
    if let Ok(doc) = Document::parse(body) {
        if let Some(faultstring) = extract::optional_text(doc.root(), "faultstring") {
            let code = faultstring.trim().to_string();
            return RemoteFault::with_code(
                code.clone(),
                format!("SOAP fault (HTTP {}): {}", status, code),
            );
        }
    }
    RemoteFault::transport(format!("HTTP status {}", status))
}

/// One SOAP endpoint with its credentials.
pub struct SoapGateway {
    url: String,
    username: String,
    password: String,
    debug: bool,
    transport: Arc<dyn SoapTransport>,
}

impl SoapGateway {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        debug: bool,
        transport: Arc<dyn SoapTransport>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
            debug,
            transport,
        }
    }

    /// Endpoint URL this gateway is bound to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Invoke a remote operation with the given request body.
    ///
    /// A fresh WS-Security header is attached per call. On failure the
    /// remote fault is classified: code 1534 means a request field was
    /// rejected; anything else is a transport fault carrying the URL and
    /// operation name for diagnostics.
    pub fn call(&self, operation: &str, request_xml: &str) -> Result<String> {
        let header = security::security_header(&self.username, &self.password)?;
        let envelope = build_envelope(&header, request_xml);

        let outcome = self.transport.send(&self.url, operation, &envelope);

        // Diagnostic emission happens on both paths, not only failures.
        if self.debug {
            match &outcome {
                Ok(body) => debug!(
                    url = %self.url,
                    operation,
                    request = %envelope,
                    response = %body,
                    "SOAP exchange"
                ),
                Err(fault) => debug!(
                    url = %self.url,
                    operation,
                    request = %envelope,
                    fault = %fault,
                    "SOAP exchange failed"
                ),
            }
        }

        match outcome {
            Ok(body) => Ok(body),
            Err(fault) if fault.is_incorrect_field() => {
                warn!(url = %self.url, operation, "registry rejected a request field");
                Err(Error::IncorrectField { source: fault })
            }
            Err(fault) => Err(Error::Transport {
                url: self.url.clone(),
                operation: operation.to_string(),
                source: fault,
            }),
        }
    }
}

/// Wrap a security header and a request body into a SOAP 1.1 envelope.
fn build_envelope(security_header: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Header>
{}
  </soap:Header>
  <soap:Body>
{}
  </soap:Body>
</soap:Envelope>"#,
        security_header, body
    )
}
