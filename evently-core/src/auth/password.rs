//! Password hashing and reset-token handling.
//!
//! Passwords are stored as argon2id PHC strings. Reset tokens are minted as
//! 32 random bytes; only the hex SHA-256 digest is persisted, and the raw
//! token travels to the user by email once.

use crate::auth::AuthError;
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use time::{Duration, OffsetDateTime, PrimitiveDateTime};

/// Reset tokens are valid for ten minutes.
pub const RESET_TOKEN_TTL: Duration = Duration::minutes(10);

pub fn hash_password(plaintext: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

pub fn verify_password(plaintext: &str, phc_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(phc_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok())
}

/// A freshly minted reset token: the raw value for the email, the digest and
/// expiry for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetToken {
    pub raw: String,
    pub digest: String,
    pub expires: PrimitiveDateTime,
}

pub fn mint_reset_token() -> ResetToken {
    let bytes: [u8; 32] = rand::random();
    let raw = hex_encode(&bytes);
    let digest = digest_reset_token(&raw);
    let expires = to_primitive(OffsetDateTime::now_utc() + RESET_TOKEN_TTL);
    ResetToken {
        raw,
        digest,
        expires,
    }
}

/// Hex SHA-256 of the raw token, the only form ever stored.
pub fn digest_reset_token(raw: &str) -> String {
    let digest = ring::digest::digest(&ring::digest::SHA256, raw.as_bytes());
    hex_encode(digest.as_ref())
}

pub fn reset_token_expired(expires: Option<PrimitiveDateTime>, now: OffsetDateTime) -> bool {
    match expires {
        Some(expiry) => expiry.assume_utc() < now,
        None => true,
    }
}

/// Whether the password changed after a token with the given issued-at was
/// minted. Used to invalidate bearer tokens on password change.
pub fn changed_after(password_changed_at: Option<PrimitiveDateTime>, token_iat: i64) -> bool {
    match password_changed_at {
        Some(changed) => token_iat < changed.assume_utc().unix_timestamp(),
        None => false,
    }
}

pub(crate) fn to_primitive(dt: OffsetDateTime) -> PrimitiveDateTime {
    let utc = dt.to_offset(time::UtcOffset::UTC);
    PrimitiveDateTime::new(utc.date(), utc.time())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("Corr3ct!horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("Corr3ct!horse", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn reset_token_digest_is_stable_and_never_the_raw_value() {
        let token = mint_reset_token();
        assert_eq!(token.raw.len(), 64);
        assert_ne!(token.raw, token.digest);
        assert_eq!(digest_reset_token(&token.raw), token.digest);
    }

    #[test]
    fn reset_token_expiry() {
        let now = OffsetDateTime::now_utc();
        let token = mint_reset_token();
        assert!(!reset_token_expired(Some(token.expires), now));
        assert!(reset_token_expired(
            Some(to_primitive(now - Duration::minutes(1))),
            now
        ));
        assert!(reset_token_expired(None, now));
    }

    #[test]
    fn password_change_invalidates_older_tokens_only() {
        let now = OffsetDateTime::now_utc();
        let changed = to_primitive(now);
        let before = now.unix_timestamp() - 60;
        let after = now.unix_timestamp() + 60;
        assert!(changed_after(Some(changed), before));
        assert!(!changed_after(Some(changed), after));
        assert!(!changed_after(None, before));
    }
}
