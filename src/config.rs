//! Configuration types for the InMotiv client.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the InMotiv client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Which endpoint preset to talk to.
    #[serde(default)]
    pub environment: Environment,

    /// RDC client number included in every request body.
    pub client_number: String,

    /// WS-Security username.
    pub username: String,

    /// WS-Security password.
    pub password: String,

    /// Emit the last request/response of every SOAP call to the log.
    #[serde(default)]
    pub debug: bool,

    /// Directory for the vehicle-scan response cache. Caching is disabled
    /// when unset.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

/// Endpoint presets. Exactly two environments exist; there is no other
/// endpoint configuration surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Live registry.
    #[default]
    Production,
    /// Acceptance environment with synthetic records.
    Sandbox,
}

impl Environment {
    /// URL of the driving licence verification service (DVS).
    pub fn licence_verification_url(&self) -> &'static str {
        match self {
            Self::Production => "https://services.rdc.nl/dvs/1.0/wsdl",
            Self::Sandbox => "https://acc-services.rdc.nl/dvs/1.0/acc/wsdl",
        }
    }

    /// URL of the vehicle scan service (VTS).
    pub fn vehicle_scan_url(&self) -> &'static str {
        match self {
            Self::Production => "https://services.rdc.nl/voertuigscan/2.0/wsdl",
            Self::Sandbox => "https://acc-services.rdc.nl/voertuigscan/2.0/acc/wsdl",
        }
    }
}
