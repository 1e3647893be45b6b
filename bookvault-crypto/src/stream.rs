//! Streaming encrypt/decrypt over async byte streams.
//!
//! Both directions hold at most two chunks in memory: the chunk being
//! processed and one chunk of lookahead, which is how the final chunk is
//! recognized without knowing the input length up front.

use crate::cipher::{open_chunk, seal_chunk, CHUNK_SIZE, NONCE_PREFIX_SIZE, TAG_SIZE};
use crate::error::{CryptoError, CryptoResult};
use crate::key::{derive_artifact_key, KdfParams, VaultSecret, SALT_SIZE};
use rand::RngCore;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Magic bytes identifying a BookVault artifact.
pub const MAGIC: [u8; 4] = *b"BKVF";

/// Current artifact format version.
const FORMAT_VERSION: u8 = 1;

/// Total header size: magic, version, salt, nonce prefix.
pub const HEADER_SIZE: usize = 4 + 1 + SALT_SIZE + NONCE_PREFIX_SIZE;

/// Size of a fully populated sealed chunk.
const SEALED_CHUNK_SIZE: usize = CHUNK_SIZE + TAG_SIZE;

/// The self-describing artifact header written before any ciphertext.
#[derive(Clone, Debug)]
pub struct ArtifactHeader {
    salt: [u8; SALT_SIZE],
    nonce_prefix: [u8; NONCE_PREFIX_SIZE],
}

impl ArtifactHeader {
    /// Generates a header with fresh random salt and nonce prefix. Called
    /// once per encryption so no two artifacts share key or nonce material.
    pub fn generate() -> Self {
        let mut salt = [0u8; SALT_SIZE];
        let mut nonce_prefix = [0u8; NONCE_PREFIX_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut salt);
        rand::rngs::OsRng.fill_bytes(&mut nonce_prefix);
        Self { salt, nonce_prefix }
    }

    /// Returns the key-derivation salt.
    pub fn salt(&self) -> &[u8; SALT_SIZE] {
        &self.salt
    }

    /// Returns the nonce prefix shared by every chunk of the artifact.
    pub fn nonce_prefix(&self) -> &[u8; NONCE_PREFIX_SIZE] {
        &self.nonce_prefix
    }

    /// Encodes the header into its on-disk form.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[..4].copy_from_slice(&MAGIC);
        out[4] = FORMAT_VERSION;
        out[5..5 + SALT_SIZE].copy_from_slice(&self.salt);
        out[5 + SALT_SIZE..].copy_from_slice(&self.nonce_prefix);
        out
    }

    /// Decodes and validates an on-disk header.
    pub fn decode(bytes: &[u8; HEADER_SIZE]) -> CryptoResult<Self> {
        if bytes[..4] != MAGIC {
            return Err(CryptoError::MalformedInput(
                "missing BKVF magic, not a BookVault artifact".to_string(),
            ));
        }
        if bytes[4] != FORMAT_VERSION {
            return Err(CryptoError::MalformedInput(format!(
                "unsupported format version {}",
                bytes[4]
            )));
        }

        let mut salt = [0u8; SALT_SIZE];
        salt.copy_from_slice(&bytes[5..5 + SALT_SIZE]);
        let mut nonce_prefix = [0u8; NONCE_PREFIX_SIZE];
        nonce_prefix.copy_from_slice(&bytes[5 + SALT_SIZE..]);

        Ok(Self { salt, nonce_prefix })
    }
}

/// Ciphertext size for a given plaintext size. The overhead is the header
/// plus one tag per chunk; an empty input still carries one (empty) chunk.
pub fn encrypted_len(plaintext_len: u64) -> u64 {
    let chunks = plaintext_len.div_ceil(CHUNK_SIZE as u64).max(1);
    HEADER_SIZE as u64 + plaintext_len + TAG_SIZE as u64 * chunks
}

/// Reads until `buf` is full or the stream ends, returning the bytes read.
async fn read_full<R: AsyncRead + Unpin>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

/// Encrypts `plaintext` into `out` as a version-1 artifact.
///
/// The input is read exactly once, sequentially, in 64 KiB chunks. Returns
/// the number of plaintext bytes consumed.
pub async fn encrypt_stream<R, W>(
    secret: &VaultSecret,
    params: &KdfParams,
    mut plaintext: R,
    mut out: W,
) -> CryptoResult<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let header = ArtifactHeader::generate();
    let key = derive_artifact_key(secret, header.salt(), params)?;
    out.write_all(&header.encode()).await?;

    let mut cur = vec![0u8; CHUNK_SIZE];
    let mut next = vec![0u8; CHUNK_SIZE];
    let mut counter: u32 = 0;
    let mut total: u64 = 0;

    let mut cur_len = read_full(&mut plaintext, &mut cur).await?;
    loop {
        let next_len = read_full(&mut plaintext, &mut next).await?;
        let last = next_len == 0;

        let sealed = seal_chunk(&key, header.nonce_prefix(), counter, last, &cur[..cur_len])?;
        out.write_all(&sealed).await?;
        total += cur_len as u64;

        if last {
            break;
        }
        counter = counter
            .checked_add(1)
            .ok_or_else(|| CryptoError::Encryption("chunk counter overflow".to_string()))?;
        std::mem::swap(&mut cur, &mut next);
        cur_len = next_len;
    }

    out.flush().await?;
    Ok(total)
}

/// Decrypts a version-1 artifact from `ciphertext` into `out`.
///
/// Every chunk's tag is verified before its plaintext is written. Returns
/// the number of plaintext bytes recovered.
pub async fn decrypt_stream<R, W>(
    secret: &VaultSecret,
    params: &KdfParams,
    mut ciphertext: R,
    mut out: W,
) -> CryptoResult<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut header_bytes = [0u8; HEADER_SIZE];
    let got = read_full(&mut ciphertext, &mut header_bytes).await?;
    if got < HEADER_SIZE {
        return Err(CryptoError::MalformedInput(format!(
            "artifact too short: {got} bytes"
        )));
    }
    let header = ArtifactHeader::decode(&header_bytes)?;
    let key = derive_artifact_key(secret, header.salt(), params)?;

    let mut cur = vec![0u8; SEALED_CHUNK_SIZE];
    let mut next = vec![0u8; SEALED_CHUNK_SIZE];
    let mut counter: u32 = 0;
    let mut total: u64 = 0;

    let mut cur_len = read_full(&mut ciphertext, &mut cur).await?;
    if cur_len < TAG_SIZE {
        return Err(CryptoError::MalformedInput(
            "artifact truncated before first chunk".to_string(),
        ));
    }
    loop {
        let next_len = read_full(&mut ciphertext, &mut next).await?;
        let last = next_len == 0;

        // Interior chunks are always full; a short one means bytes were lost.
        if !last && cur_len != SEALED_CHUNK_SIZE {
            return Err(CryptoError::MalformedInput(
                "short interior chunk".to_string(),
            ));
        }

        let plain = open_chunk(&key, header.nonce_prefix(), counter, last, &cur[..cur_len])?;
        out.write_all(&plain).await?;
        total += plain.len() as u64;

        if last {
            break;
        }
        if next_len < TAG_SIZE {
            return Err(CryptoError::MalformedInput(
                "artifact truncated mid-chunk".to_string(),
            ));
        }
        counter = counter
            .checked_add(1)
            .ok_or_else(|| CryptoError::MalformedInput("chunk counter overflow".to_string()))?;
        std::mem::swap(&mut cur, &mut next);
        cur_len = next_len;
    }

    out.flush().await?;
    Ok(total)
}
