//! Invite token generation and format checks.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;

/// Number of random bytes in an invite token.
pub const INVITE_TOKEN_BYTES: usize = 32;

/// Upper bound on the length of a token accepted from a link.
pub const MAX_INVITE_TOKEN_LEN: usize = 128;

lazy_static::lazy_static! {
    static ref INVITE_TOKEN_REGEX: regex::Regex =
        regex::Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
}

/// Generates a random, URL-safe invite token.
pub fn generate_invite_token() -> String {
    let mut bytes = [0u8; INVITE_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Returns true when `token` could have been produced by an invite link.
///
/// Tokens are opaque, so this only rejects values that cannot possibly be
/// stored (too long or containing characters outside the URL-safe alphabet).
pub fn is_well_formed_token(token: &str) -> bool {
    !token.is_empty() && token.len() <= MAX_INVITE_TOKEN_LEN && INVITE_TOKEN_REGEX.is_match(token)
}
