/// Session token generation and hashing
///
/// The "session" cookie carries a random token; the database stores only a
/// keyed SHA-256 digest of it. Looking a session up therefore means hashing
/// the presented token and querying by the digest — a stolen database dump
/// yields no usable cookies, and the digest key (the application session
/// secret) never leaves configuration.
///
/// Serialization contract: issuing a token for a session row *is* the
/// serialize-user step; resolving a presented token back to its row (and the
/// row's user) is deserialize-user.
///
/// # Token Format
///
/// 32 random base62 characters ([A-Za-z0-9]), ~190 bits of entropy.
///
/// # Example
///
/// ```
/// use wildspot_shared::auth::token::{generate_session_token, hash_session_token};
///
/// let secret = "an-application-secret-of-at-least-32-chars";
/// let (token, hash) = generate_session_token(secret);
///
/// assert_eq!(token.len(), 32);
/// assert_eq!(hash, hash_session_token(secret, &token));
/// ```

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Length of a session token in characters
pub const TOKEN_LENGTH: usize = 32;

/// Generates a new session token
///
/// # Returns
///
/// Tuple of (plaintext token, keyed hex digest). The token goes into the
/// cookie, the digest into the sessions table.
pub fn generate_session_token(secret: &str) -> (String, String) {
    let token = generate_random_string(TOKEN_LENGTH);
    let hash = hash_session_token(secret, &token);

    (token, hash)
}

/// Generates a random alphanumeric string
///
/// Uses base62 encoding (A-Z, a-z, 0-9) for cookie-safe tokens.
fn generate_random_string(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Hashes a session token with the application secret
///
/// HMAC-SHA256 keyed with the secret; deterministic, so the digest can be
/// used directly as a lookup key.
///
/// # Returns
///
/// Hex-encoded digest (64 characters)
pub fn hash_session_token(secret: &str, token: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(token.as_bytes());

    hex::encode(mac.finalize().into_bytes())
}
