//! Stable content hashing used to seed deterministic stub embeddings.

use blake3::Hasher;

/// Computes a 64-bit hash of `data` (first 8 bytes of BLAKE3).
///
/// Used for seeding, never for authentication.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(bytes)
}

/// Hashes `data` under a modality tag so that the same bytes seed different
/// vectors for video, audio and text.
#[inline]
pub fn hash_modality(modality: &str, data: &[u8]) -> u64 {
    let mut hasher = Hasher::new();
    hasher.update(modality.as_bytes());
    hasher.update(b"|");
    hasher.update(data);

    let hash = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(bytes)
}
