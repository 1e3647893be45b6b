//! Error types for the file encryption service.

use bookvault_crypto::CryptoError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for file encryption operations.
pub type FileServiceResult<T> = Result<T, FileServiceError>;

/// Errors surfaced by [`crate::FileEncryptionService`].
#[derive(Debug, Error)]
pub enum FileServiceError {
    /// The destination could not be created or the source could not be
    /// opened. Propagated as-is; the service never retries.
    #[error("{op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Codec failure: integrity violation, malformed artifact, or a stream
    /// error mid-transfer.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

impl FileServiceError {
    /// True when the artifact failed authentication (tampered or wrong
    /// secret) as opposed to being unreadable or foreign.
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::Crypto(CryptoError::IntegrityViolation))
    }
}
