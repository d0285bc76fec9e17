//! Error types for the InMotiv client.

use thiserror::Error;

/// Remote error code the registry returns when a request field fails
/// validation (wrong birthday, malformed licence number, ...).
pub const REMOTE_CODE_INCORRECT_FIELD: &str = "1534";

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// InMotiv client errors.
///
/// Every public operation either returns a typed success value or exactly
/// one of these variants. Optional-field extraction is the only place a
/// failure is recovered locally (into an absent value); all other faults
/// propagate unchanged to the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// A rendering variable has no `{{ key }}` placeholder in the template.
    #[error("placeholder for key {placeholder} not found in the template")]
    Template { placeholder: String },

    /// The rendered request is not well-formed XML.
    #[error("rendered request XML is not well-formed: {reason}")]
    MalformedRequestXml { reason: String },

    /// Transport-level or remote-service-level failure.
    #[error("SOAP call failed, url {url} operation {operation}")]
    Transport {
        url: String,
        operation: String,
        #[source]
        source: RemoteFault,
    },

    /// The registry rejected a request field (remote code 1534).
    #[error("registry rejected a request field")]
    IncorrectField {
        #[source]
        source: RemoteFault,
    },

    /// The response is missing a node the protocol requires.
    #[error("unexpected response: {reason}")]
    UnexpectedResponse { reason: String },

    /// No registration record with processing status 00 in the response.
    #[error("vehicle not found")]
    VehicleNotFound,
}

/// Typed fault payload surfaced by the transport primitive.
///
/// Carries the structured remote error code (when the remote side sent a
/// SOAP Fault) so classification never has to string-match a message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RemoteFault {
    /// Remote error code extracted from the SOAP Fault, if any.
    pub code: Option<String>,
    /// Human-readable description of the failure.
    pub message: String,
}

impl RemoteFault {
    /// A fault carrying a remote error code.
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// A plain transport fault with no remote code.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    /// True when the remote code signals a request-field validation error.
    pub fn is_incorrect_field(&self) -> bool {
        self.code.as_deref() == Some(REMOTE_CODE_INCORRECT_FIELD)
    }
}
