//! SOAP client for the RDC vehicle registry.
//!
//! Builds XML requests from named templates, signs every call with a
//! WS-Security header carrying a fresh nonce, and parses the registry's
//! responses into typed results: a driving licence validity check and a
//! structured vehicle record.
//!
//! # Features
//!
//! - Template-based request construction with placeholder validation
//! - Per-call WS-Security UsernameToken header (random nonce)
//! - Blocking SOAP transport with typed fault classification
//! - Namespace-insensitive response extraction with per-field fallback
//! - Optional flat-file memoization of vehicle scan responses
//!
//! # Example
//!
//! ```ignore
//! use inmotiv_client::{ClientConfig, Environment, InMotivClient};
//!
//! let client = InMotivClient::new(ClientConfig {
//!     environment: Environment::Sandbox,
//!     client_number: "123456".into(),
//!     username: "user".into(),
//!     password: "secret".into(),
//!     debug: false,
//!     cache_dir: None,
//! });
//!
//! let valid = client.is_driving_licence_valid(1234567890, 1990, 3, 7)?;
//! let info = client.vehicle_info("12ABC3")?;
//! println!("{} ({:?})", info.brand(), info.production_year());
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod security;
pub mod template;
pub mod transport;
pub mod vehicle;

pub use client::InMotivClient;
pub use config::{ClientConfig, Environment};
pub use error::{Error, RemoteFault, Result};
pub use vehicle::VehicleInfo;
