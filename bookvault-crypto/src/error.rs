//! Error types for the encryption layer.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur while encrypting or decrypting artifacts.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Key derivation failed.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// Encryption failed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// An authentication tag did not verify. The artifact was tampered with
    /// or a different secret was used; no plaintext is released.
    #[error("artifact failed authentication (tampered data or wrong secret)")]
    IntegrityViolation,

    /// The artifact header is truncated or not in the BookVault format.
    /// Distinct from [`CryptoError::IntegrityViolation`] so callers can tell
    /// "not our format" from "tampered".
    #[error("malformed artifact: {0}")]
    MalformedInput(String),

    /// An underlying stream read or write failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
