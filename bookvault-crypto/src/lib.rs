//! Streaming authenticated encryption for BookVault document artifacts.
//!
//! Attached documents are protected at rest with ChaCha20-Poly1305. Input is
//! processed in bounded 64 KiB chunks, so memory use is independent of file
//! size, and every chunk carries its own authentication tag: any tampering is
//! detected before a single decrypted byte reaches the caller.
//!
//! # Artifact format (version 1)
//!
//! ```text
//! offset  size  field
//! 0       4     magic "BKVF"
//! 4       1     format version (0x01)
//! 5       16    key-derivation salt (fresh per artifact)
//! 21      7     nonce prefix (fresh per artifact)
//! 28      ..    sealed chunks
//! ```
//!
//! Each sealed chunk is `plaintext_len + 16` bytes of ChaCha20-Poly1305
//! output. The chunk nonce is `prefix || counter (u32 BE) || last-flag`, so
//! reordering, truncating at a chunk boundary, or extending the stream all
//! fail authentication. Every interior chunk holds exactly 64 KiB of
//! plaintext; the final chunk holds the remainder (possibly zero bytes, so
//! empty inputs still produce an authenticated artifact).
//!
//! The per-artifact key is derived with Argon2id from a caller-owned
//! [`VaultSecret`] and the artifact's salt, meaning no two artifacts share a
//! key even under the same secret.

mod cipher;
mod error;
mod key;
mod stream;

pub use cipher::{open_chunk, seal_chunk, CHUNK_SIZE, NONCE_PREFIX_SIZE, NONCE_SIZE, TAG_SIZE};
pub use error::{CryptoError, CryptoResult};
pub use key::{derive_artifact_key, random_artifact_key, ArtifactKey, KdfParams, VaultSecret, KEY_SIZE, SALT_SIZE};
pub use stream::{decrypt_stream, encrypt_stream, encrypted_len, ArtifactHeader, HEADER_SIZE, MAGIC};
