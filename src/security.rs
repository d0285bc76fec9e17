//! WS-Security header construction.
//!
//! Every SOAP call carries a UsernameToken header with a fresh nonce. The
//! nonce is a SHA-256 digest of random bytes, base64-encoded, so it is both
//! unique and unpredictable across calls. Headers are never cached.

use crate::error::Result;
use crate::template::{self, Template};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Namespace of the `Security` header element.
pub const WSSE_NS: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd";

/// Build the WS-Security header fragment for one call.
pub fn security_header(username: &str, password: &str) -> Result<String> {
    let nonce = generate_nonce();
    template::render(
        Template::SecurityHeader,
        &[
            ("username", username),
            ("password", password),
            ("nonce", &nonce),
        ],
    )
}

/// A fresh base64-encoded nonce.
fn generate_nonce() -> String {
    let mut seed = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut seed);
    STANDARD.encode(Sha256::digest(seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_contains_credentials_and_nonce() {
        let header = security_header("user", "pass").unwrap();
        assert!(header.contains("<wsse:Username>user</wsse:Username>"));
        assert!(header.contains("pass"));
        assert!(header.contains("<wsse:Nonce"));
        assert!(header.contains(WSSE_NS));
    }

    #[test]
    fn test_nonce_is_fresh_per_call() {
        let a = security_header("user", "pass").unwrap();
        let b = security_header("user", "pass").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_nonce_is_base64() {
        let nonce = generate_nonce();
        assert!(STANDARD.decode(&nonce).is_ok());
        // SHA-256 digest is 32 bytes, 44 characters in base64.
        assert_eq!(nonce.len(), 44);
    }
}
