//! Bearer-token issuance and verification (HS256 JWTs).

use crate::auth::AuthError;
use evently_sdk::objects::Role;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    /// Issued-at, unix seconds. Compared against `password_changed_at`.
    pub iat: i64,
    pub exp: i64,
}

pub fn issue(
    secret: &[u8],
    user_id: Uuid,
    role: Role,
    expiry: time::Duration,
) -> Result<String, AuthError> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let claims = Claims {
        sub: user_id,
        role,
        iat: now,
        exp: now + expiry.whole_seconds(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|_| AuthError::InvalidToken)
}

pub fn verify(secret: &[u8], token: &str) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"unit-test-secret";

    #[test]
    fn issue_verify_round_trip() {
        let id = Uuid::new_v4();
        let token = issue(SECRET, id, Role::EventPlanner, time::Duration::hours(1)).unwrap();
        let claims = verify(SECRET, &token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.role, Role::EventPlanner);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = issue(
            SECRET,
            Uuid::new_v4(),
            Role::RegularUser,
            time::Duration::hours(1),
        )
        .unwrap();
        assert!(matches!(
            verify(b"other-secret", &token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn rejects_expired_token() {
        // Past the default validation leeway.
        let token = issue(
            SECRET,
            Uuid::new_v4(),
            Role::RegularUser,
            time::Duration::minutes(-5),
        )
        .unwrap();
        assert!(matches!(
            verify(SECRET, &token),
            Err(AuthError::InvalidToken)
        ));
    }
}
