//! Chunk-level ChaCha20-Poly1305 sealing.
//!
//! A chunk nonce is `prefix (7) || counter (u32 BE) || last-flag (1)`. The
//! counter binds each chunk to its position and the last-flag binds the final
//! chunk to end-of-stream, so swapped, dropped, or appended chunks fail
//! authentication.

use crate::error::{CryptoError, CryptoResult};
use crate::key::ArtifactKey;
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};

/// Size of nonce in bytes (96 bits for ChaCha20-Poly1305).
pub const NONCE_SIZE: usize = 12;

/// Size of the per-artifact random nonce prefix in bytes.
pub const NONCE_PREFIX_SIZE: usize = 7;

/// Size of the authentication tag appended to every chunk.
pub const TAG_SIZE: usize = 16;

/// Plaintext bytes per chunk. Interior chunks are always exactly this size.
pub const CHUNK_SIZE: usize = 64 * 1024;

fn chunk_nonce(prefix: &[u8; NONCE_PREFIX_SIZE], counter: u32, last: bool) -> [u8; NONCE_SIZE] {
    let mut nonce = [0u8; NONCE_SIZE];
    nonce[..NONCE_PREFIX_SIZE].copy_from_slice(prefix);
    nonce[NONCE_PREFIX_SIZE..NONCE_PREFIX_SIZE + 4].copy_from_slice(&counter.to_be_bytes());
    nonce[NONCE_SIZE - 1] = u8::from(last);
    nonce
}

/// Seals one chunk of plaintext, returning `ciphertext || tag`.
pub fn seal_chunk(
    key: &ArtifactKey,
    prefix: &[u8; NONCE_PREFIX_SIZE],
    counter: u32,
    last: bool,
    plaintext: &[u8],
) -> CryptoResult<Vec<u8>> {
    let cipher = ChaCha20Poly1305::new(key.as_bytes().into());
    let nonce = chunk_nonce(prefix, counter, last);

    cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| CryptoError::Encryption(e.to_string()))
}

/// Opens one sealed chunk. The position and last-flag must match the values
/// used when sealing or the tag check fails.
pub fn open_chunk(
    key: &ArtifactKey,
    prefix: &[u8; NONCE_PREFIX_SIZE],
    counter: u32,
    last: bool,
    sealed: &[u8],
) -> CryptoResult<Vec<u8>> {
    let cipher = ChaCha20Poly1305::new(key.as_bytes().into());
    let nonce = chunk_nonce(prefix, counter, last);

    cipher
        .decrypt(Nonce::from_slice(&nonce), sealed)
        .map_err(|_| CryptoError::IntegrityViolation)
}
