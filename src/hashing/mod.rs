use blake3::Hasher;

/// Computes a 64-bit hash of the input data using BLAKE3, truncated from 256 bits.
///
/// Truncation is acceptable here: passage ids are used for index point ids and
/// deduplication, not for cryptographic verification. At realistic collection
/// sizes (millions of passages) the birthday-bound collision probability is
/// negligible, and a collision degrades to one passage shadowing another in
/// the index rather than data corruption.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}

/// Derives a passage identity from `(source, page, text)`.
///
/// The separator bytes prevent ambiguity between field boundaries
/// (`("ab", "cd")` must not collide with `("abc", "d")`).
#[inline]
pub fn hash_passage(source: &str, page: u32, text: &str) -> u64 {
    let mut hasher = Hasher::new();
    hasher.update(source.as_bytes());
    hasher.update(b"|");
    hasher.update(&page.to_le_bytes());
    hasher.update(b"|");
    hasher.update(text.as_bytes());

    let hash = hasher.finalize();
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}
