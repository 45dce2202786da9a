//! MD5 digest helpers shared by ring construction and key lookup.
//!
//! Ring points and key hashes are both read out of an MD5 digest as
//! little-endian `u32` windows. Clients in other processes reproduce this
//! bit for bit, so neither the digest nor the byte order may change.

/// Size of an MD5 digest in bytes.
pub const DIGEST_LEN: usize = 16;

/// Number of 4-byte windows in one digest.
pub const WINDOWS_PER_DIGEST: usize = DIGEST_LEN / 4;

/// Computes the MD5 digest of `bytes`.
#[inline]
pub fn digest(bytes: &[u8]) -> [u8; DIGEST_LEN] {
    md5::compute(bytes).0
}

/// Reads window `window` (0..4) of `digest` as a little-endian `u32`.
///
/// # Panics
///
/// Panics if `window >= WINDOWS_PER_DIGEST`.
#[inline]
pub fn extract_u32_le(digest: &[u8; DIGEST_LEN], window: usize) -> u32 {
    assert!(
        window < WINDOWS_PER_DIGEST,
        "digest window {window} out of range"
    );
    let start = window * 4;
    u32::from_le_bytes([
        digest[start],
        digest[start + 1],
        digest[start + 2],
        digest[start + 3],
    ])
}

/// Hashes a lookup key: the first window of its digest.
#[inline]
pub fn hash_key(key: &[u8]) -> u32 {
    extract_u32_le(&digest(key), 0)
}
