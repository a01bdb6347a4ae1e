use sha2::{Digest, Sha256};
use tracing::warn;

use desk_domain::{PinVerifier, RuntimeConfig};

const DEVELOPMENT_PIN: &str = "1234";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Expected {
    Sha256Hex(String),
    Plain(String),
}

/// Checks the shared volunteer PIN against the configured SHA-256 digest,
/// then a configured plain PIN, then the development default.
#[derive(Debug, Clone)]
pub struct ConfiguredPinVerifier {
    expected: Expected,
}

impl ConfiguredPinVerifier {
    pub fn from_config(config: &RuntimeConfig) -> Self {
        let expected = if let Some(hash) = &config.volunteer_pin_hash {
            Expected::Sha256Hex(hash.trim().to_lowercase())
        } else if let Some(pin) = &config.volunteer_pin {
            Expected::Plain(pin.trim().to_string())
        } else {
            warn!("no volunteer PIN configured, accepting the development default");
            Expected::Plain(DEVELOPMENT_PIN.to_string())
        };
        Self { expected }
    }
}

pub fn pin_digest(pin: &str) -> String {
    Sha256::digest(pin.as_bytes())
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}

impl PinVerifier for ConfiguredPinVerifier {
    fn verify(&self, pin: &str) -> bool {
        match &self.expected {
            Expected::Sha256Hex(hash) => pin_digest(pin) == *hash,
            Expected::Plain(expected) => pin == expected,
        }
    }
}
