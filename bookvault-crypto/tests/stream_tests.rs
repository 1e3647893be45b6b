use bookvault_crypto::{
    decrypt_stream, encrypt_stream, encrypted_len, CryptoError, KdfParams, VaultSecret,
    CHUNK_SIZE, HEADER_SIZE, TAG_SIZE,
};
use std::io::Cursor;

fn fast_params() -> KdfParams {
    KdfParams {
        memory_cost: 1024,
        time_cost: 1,
        parallelism: 1,
    }
}

async fn encrypt_to_vec(secret: &VaultSecret, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    encrypt_stream(secret, &fast_params(), data, Cursor::new(&mut out))
        .await
        .unwrap();
    out
}

async fn decrypt_to_vec(secret: &VaultSecret, artifact: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut out = Vec::new();
    decrypt_stream(secret, &fast_params(), artifact, Cursor::new(&mut out)).await?;
    Ok(out)
}

#[tokio::test]
async fn roundtrip_short_input() {
    let secret = VaultSecret::random();
    let artifact = encrypt_to_vec(&secret, b"hello artifact").await;
    let plain = decrypt_to_vec(&secret, &artifact).await.unwrap();
    assert_eq!(plain, b"hello artifact");
}

#[tokio::test]
async fn roundtrip_empty_input() {
    let secret = VaultSecret::random();
    let artifact = encrypt_to_vec(&secret, b"").await;
    // Header plus one empty authenticated chunk.
    assert_eq!(artifact.len(), HEADER_SIZE + TAG_SIZE);
    let plain = decrypt_to_vec(&secret, &artifact).await.unwrap();
    assert!(plain.is_empty());
}

#[tokio::test]
async fn roundtrip_exactly_one_chunk() {
    let secret = VaultSecret::random();
    let data: Vec<u8> = (0..CHUNK_SIZE).map(|i| (i % 251) as u8).collect();
    let artifact = encrypt_to_vec(&secret, &data).await;
    let plain = decrypt_to_vec(&secret, &artifact).await.unwrap();
    assert_eq!(plain, data);
}

#[tokio::test]
async fn roundtrip_multi_chunk() {
    let secret = VaultSecret::random();
    // A few megabytes: many full chunks plus a ragged tail.
    let data: Vec<u8> = (0..CHUNK_SIZE * 32 + 12345).map(|i| (i % 257) as u8).collect();
    let artifact = encrypt_to_vec(&secret, &data).await;
    assert_eq!(artifact.len() as u64, encrypted_len(data.len() as u64));
    let plain = decrypt_to_vec(&secret, &artifact).await.unwrap();
    assert_eq!(plain, data);
}

#[tokio::test]
async fn ciphertext_length_is_deterministic() {
    let secret = VaultSecret::random();
    for len in [0usize, 1, 100, CHUNK_SIZE - 1, CHUNK_SIZE, CHUNK_SIZE + 1, CHUNK_SIZE * 2] {
        let data = vec![0xAB; len];
        let artifact = encrypt_to_vec(&secret, &data).await;
        assert_eq!(artifact.len() as u64, encrypted_len(len as u64), "len={len}");
    }
}

#[tokio::test]
async fn ciphertext_differs_from_plaintext() {
    let secret = VaultSecret::random();
    let data = b"not-so-secret bytes".to_vec();
    let artifact = encrypt_to_vec(&secret, &data).await;
    assert_ne!(&artifact[HEADER_SIZE..HEADER_SIZE + data.len()], &data[..]);
    // The plaintext must not appear anywhere in the artifact.
    assert!(!artifact.windows(data.len()).any(|w| w == data));
}

#[tokio::test]
async fn same_input_twice_yields_different_artifacts() {
    let secret = VaultSecret::random();
    let a = encrypt_to_vec(&secret, b"same input").await;
    let b = encrypt_to_vec(&secret, b"same input").await;
    // Fresh salt and nonce prefix every invocation.
    assert_ne!(a, b);
}

#[tokio::test]
async fn wrong_secret_fails_authentication() {
    let artifact = encrypt_to_vec(&VaultSecret::random(), b"secret data").await;
    let err = decrypt_to_vec(&VaultSecret::random(), &artifact).await.unwrap_err();
    assert!(matches!(err, CryptoError::IntegrityViolation));
}

#[tokio::test]
async fn any_body_byte_flip_is_detected() {
    let secret = VaultSecret::random();
    let artifact = encrypt_to_vec(&secret, b"flip me").await;
    for pos in HEADER_SIZE..artifact.len() {
        let mut tampered = artifact.clone();
        tampered[pos] ^= 0x01;
        let err = decrypt_to_vec(&secret, &tampered).await.unwrap_err();
        assert!(matches!(err, CryptoError::IntegrityViolation), "pos={pos}");
    }
}

#[tokio::test]
async fn salt_or_prefix_flip_is_detected() {
    let secret = VaultSecret::random();
    let artifact = encrypt_to_vec(&secret, b"flip me").await;
    // Bytes 5..HEADER_SIZE are salt and nonce prefix; flipping either changes
    // the derived key or the chunk nonces, so the tag check fails.
    for pos in 5..HEADER_SIZE {
        let mut tampered = artifact.clone();
        tampered[pos] ^= 0x01;
        let err = decrypt_to_vec(&secret, &tampered).await.unwrap_err();
        assert!(matches!(err, CryptoError::IntegrityViolation), "pos={pos}");
    }
}

#[tokio::test]
async fn bad_magic_is_malformed() {
    let secret = VaultSecret::random();
    let mut artifact = encrypt_to_vec(&secret, b"data").await;
    artifact[0] = b'X';
    let err = decrypt_to_vec(&secret, &artifact).await.unwrap_err();
    assert!(matches!(err, CryptoError::MalformedInput(_)));
}

#[tokio::test]
async fn unknown_version_is_malformed() {
    let secret = VaultSecret::random();
    let mut artifact = encrypt_to_vec(&secret, b"data").await;
    artifact[4] = 9;
    let err = decrypt_to_vec(&secret, &artifact).await.unwrap_err();
    assert!(matches!(err, CryptoError::MalformedInput(_)));
}

#[tokio::test]
async fn truncated_header_is_malformed() {
    let secret = VaultSecret::random();
    let artifact = encrypt_to_vec(&secret, b"data").await;
    let err = decrypt_to_vec(&secret, &artifact[..HEADER_SIZE - 3])
        .await
        .unwrap_err();
    assert!(matches!(err, CryptoError::MalformedInput(_)));
}

#[tokio::test]
async fn truncation_at_chunk_boundary_is_detected() {
    let secret = VaultSecret::random();
    let data = vec![0x55u8; CHUNK_SIZE * 2 + 77];
    let artifact = encrypt_to_vec(&secret, &data).await;
    // Drop the final chunk entirely; the new last chunk was not sealed with
    // the last-flag, so authentication fails rather than yielding a shorter
    // plaintext.
    let cut = HEADER_SIZE + 2 * (CHUNK_SIZE + TAG_SIZE);
    let err = decrypt_to_vec(&secret, &artifact[..cut]).await.unwrap_err();
    assert!(matches!(err, CryptoError::IntegrityViolation));
}

#[tokio::test]
async fn truncation_mid_chunk_is_rejected() {
    let secret = VaultSecret::random();
    let data = vec![0x66u8; CHUNK_SIZE + 500];
    let artifact = encrypt_to_vec(&secret, &data).await;
    let err = decrypt_to_vec(&secret, &artifact[..artifact.len() - 100])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CryptoError::IntegrityViolation | CryptoError::MalformedInput(_)
    ));
}

#[tokio::test]
async fn foreign_bytes_are_malformed() {
    let secret = VaultSecret::random();
    let err = decrypt_to_vec(&secret, &[0u8; 64]).await.unwrap_err();
    assert!(matches!(err, CryptoError::MalformedInput(_)));
}

#[test]
fn encrypted_len_formula() {
    let header = HEADER_SIZE as u64;
    let tag = TAG_SIZE as u64;
    let chunk = CHUNK_SIZE as u64;
    assert_eq!(encrypted_len(0), header + tag);
    assert_eq!(encrypted_len(1), header + 1 + tag);
    assert_eq!(encrypted_len(chunk), header + chunk + tag);
    assert_eq!(encrypted_len(chunk + 1), header + chunk + 1 + 2 * tag);
    assert_eq!(encrypted_len(3 * chunk), header + 3 * chunk + 3 * tag);
}
