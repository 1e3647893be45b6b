//! Secrets and per-artifact key derivation.
//!
//! The service owns a single [`VaultSecret`]; every artifact gets its own
//! key, derived with Argon2id from that secret and the artifact's random
//! salt. Key material is zeroed on drop.

use crate::error::{CryptoError, CryptoResult};
use argon2::{Argon2, Params, Version};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of encryption keys in bytes (256 bits for ChaCha20).
pub const KEY_SIZE: usize = 32;

/// Size of the key-derivation salt in bytes.
pub const SALT_SIZE: usize = 16;

/// Long-lived secret owned by the encryption service.
///
/// Never written to disk by this crate; artifacts only carry the salt the
/// secret is stretched with.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct VaultSecret {
    bytes: Vec<u8>,
}

impl VaultSecret {
    /// Wraps a passphrase supplied by the deployment configuration.
    pub fn from_passphrase(passphrase: impl Into<String>) -> Self {
        Self {
            bytes: passphrase.into().into_bytes(),
        }
    }

    /// Wraps raw secret bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Generates a random 32-byte secret.
    pub fn random() -> Self {
        let mut bytes = vec![0u8; KEY_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Returns the secret bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for VaultSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultSecret")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// A per-artifact encryption key with automatic zeroization on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ArtifactKey {
    bytes: [u8; KEY_SIZE],
}

impl ArtifactKey {
    /// Creates a key from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for ArtifactKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Argon2id parameters for per-artifact key derivation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KdfParams {
    /// Memory cost in KiB.
    pub memory_cost: u32,
    /// Time cost (iterations).
    pub time_cost: u32,
    /// Parallelism factor.
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        // OWASP recommendations for Argon2id (2023)
        Self {
            memory_cost: 19 * 1024, // 19 MiB
            time_cost: 2,
            parallelism: 1,
        }
    }
}

/// Derives the key for a single artifact from the vault secret and the
/// artifact's salt.
pub fn derive_artifact_key(
    secret: &VaultSecret,
    salt: &[u8; SALT_SIZE],
    params: &KdfParams,
) -> CryptoResult<ArtifactKey> {
    let argon2_params = Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        Some(KEY_SIZE),
    )
    .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, argon2_params);

    let mut key_bytes = [0u8; KEY_SIZE];
    argon2
        .hash_password_into(secret.as_bytes(), salt, &mut key_bytes)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

    Ok(ArtifactKey::from_bytes(key_bytes))
}

/// Generates a random key directly, bypassing derivation. Used by tests that
/// exercise the chunk layer on its own.
pub fn random_artifact_key() -> ArtifactKey {
    let mut bytes = [0u8; KEY_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    ArtifactKey::from_bytes(bytes)
}
