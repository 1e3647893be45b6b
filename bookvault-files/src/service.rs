//! The file encryption service.

use crate::error::{FileServiceError, FileServiceResult};
use bookvault_crypto::{decrypt_stream, encrypt_stream, KdfParams, VaultSecret};
use std::io::Cursor;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncWrite, BufReader, BufWriter};
use tracing::debug;

/// Encrypts submitted documents to disk and decrypts them back.
///
/// The service owns the vault secret; callers never see key material. Each
/// call derives its own per-artifact key, so concurrent operations on
/// different paths are fully independent.
pub struct FileEncryptionService {
    secret: VaultSecret,
    kdf: KdfParams,
}

impl FileEncryptionService {
    /// Creates a service with production key-derivation parameters.
    pub fn new(secret: VaultSecret) -> Self {
        Self {
            secret,
            kdf: KdfParams::default(),
        }
    }

    /// Creates a service with explicit key-derivation parameters. Tests use
    /// this to avoid the production Argon2 cost.
    pub fn with_kdf_params(secret: VaultSecret, kdf: KdfParams) -> Self {
        Self { secret, kdf }
    }

    /// Streams `input` through the codec into a newly created file at
    /// `destination`. The input is read exactly once, sequentially; returns
    /// the number of plaintext bytes consumed.
    pub async fn encrypt_file<R>(&self, input: R, destination: &Path) -> FileServiceResult<u64>
    where
        R: AsyncRead + Unpin,
    {
        let file = File::create(destination)
            .await
            .map_err(|source| FileServiceError::Io {
                op: "failed to create",
                path: destination.to_path_buf(),
                source,
            })?;

        let written = encrypt_stream(&self.secret, &self.kdf, input, BufWriter::new(file)).await?;
        debug!(path = %destination.display(), bytes = written, "encrypted document written");
        Ok(written)
    }

    /// Decrypts the artifact at `source` and returns the plaintext, sized
    /// for typical document uploads. Callers with very large artifacts can
    /// use [`FileEncryptionService::decrypt_file_to`] instead.
    pub async fn decrypt_file(&self, source: &Path) -> FileServiceResult<Vec<u8>> {
        let mut plaintext = Vec::new();
        self.decrypt_file_to(source, Cursor::new(&mut plaintext)).await?;
        Ok(plaintext)
    }

    /// Streams the decrypted artifact at `source` into `out`, verifying each
    /// chunk before any of its bytes are written. Returns the number of
    /// plaintext bytes recovered.
    pub async fn decrypt_file_to<W>(&self, source: &Path, out: W) -> FileServiceResult<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let file = File::open(source)
            .await
            .map_err(|source_err| FileServiceError::Io {
                op: "failed to open",
                path: source.to_path_buf(),
                source: source_err,
            })?;

        let recovered = decrypt_stream(&self.secret, &self.kdf, BufReader::new(file), out).await?;
        debug!(path = %source.display(), bytes = recovered, "document decrypted");
        Ok(recovered)
    }
}
