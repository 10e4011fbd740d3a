//! Cache key derivation
//!
//! Keys are the lowercase hex encoding of the URL bytes, which is injective and
//! only uses `[0-9a-f]`, so keys are valid file names on every filesystem,
//! case-insensitive ones included. Hex doubles the length, so URLs whose
//! encoding would not fit in a file name fall back to `sha256.<digest>`. The
//! `.` cannot appear in a hex encoding, which keeps the two forms disjoint.

use sha2::{Digest, Sha256};

/// Longest hex-encoded key kept as is (leaves room for `.html` under the
/// usual 255-byte file name limit)
pub const MAX_ENCODED_KEY_LEN: usize = 240;

/// Derives the cache key of a URL
///
/// # Example
///
/// ```
/// use listing_harvest::cache::cache_key;
///
/// assert_eq!(cache_key("https://a.b/"), "68747470733a2f2f612e622f");
/// ```
pub fn cache_key(url: &str) -> String {
    let encoded = hex::encode(url.as_bytes());
    if encoded.len() <= MAX_ENCODED_KEY_LEN {
        return encoded;
    }

    format!("sha256.{}", hex::encode(Sha256::digest(url.as_bytes())))
}
