//! Password credential derivation.

use std::fmt;

use sha2::{Digest, Sha256};

/// One-way credential derived from a plaintext password.
///
/// Wraps the lowercase hex SHA-256 digest of the plaintext. Derivation is
/// deterministic: the same plaintext always yields the same credential, which
/// is what makes [`Credential::matches`] possible without storing the
/// password itself.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Derive a credential from a plaintext password.
    pub fn derive(password: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Check a plaintext password against this credential.
    pub fn matches(&self, password: &str) -> bool {
        *self == Self::derive(password)
    }

    /// Hex digest for persistence adapters that store credentials as text.
    pub fn as_hex(&self) -> &str {
        self.0.as_str()
    }
}

// Redacted so credentials cannot leak through logs or assertion output.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
