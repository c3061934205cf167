use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Claims carried by every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies HS256 bearer tokens with a fixed lifetime.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, user_id: i64, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::Internal("Token lifetime overflows the clock".into()))?;
        let claims = Claims {
            user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Rejected token: {}", e);
                AppError::InvalidToken
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-secret", Duration::days(7))
    }

    #[test]
    fn issued_token_verifies() {
        let codec = codec();
        let token = codec.issue(42, "ana@x.com").unwrap();

        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.email, "ana@x.com");
        assert_eq!(claims.exp - claims.iat, Duration::days(7).num_seconds());
    }

    #[test]
    fn claims_use_user_id_field_name() {
        let claims = Claims {
            user_id: 1,
            email: "a@b.c".into(),
            iat: 0,
            exp: 1,
        };
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["userId"], 1);
    }

    #[test]
    fn expired_token_is_invalid() {
        // Well past the default 60 second leeway.
        let expired = TokenCodec::new("test-secret", Duration::hours(-2));
        let token = expired.issue(1, "ana@x.com").unwrap();

        assert!(matches!(codec().verify(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn tampered_token_is_invalid() {
        let codec = codec();
        let token = codec.issue(1, "ana@x.com").unwrap();

        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let forged = codec.issue(2, "eve@x.com").unwrap();
        parts[1] = forged.split('.').nth(1).unwrap().to_string();
        let tampered = parts.join(".");

        assert!(matches!(codec.verify(&tampered), Err(AppError::InvalidToken)));
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let other = TokenCodec::new("another-secret", Duration::days(7));
        let token = other.issue(1, "ana@x.com").unwrap();

        assert!(matches!(codec().verify(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn overflowing_lifetime_is_an_error() {
        let codec = TokenCodec::new("test-secret", Duration::days(100_000_000));
        assert!(matches!(codec.issue(1, "ana@x.com"), Err(AppError::Internal(_))));
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(codec().verify("not.a.jwt"), Err(AppError::InvalidToken)));
        assert!(matches!(codec().verify(""), Err(AppError::InvalidToken)));
    }
}
