use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use crate::errors::ApiError;
use crate::types::db::role::RoleType;
use crate::types::internal::auth::Claims;

/// Signs and verifies JWTs carrying the user id and role claims
pub struct TokenService {
    jwt_secret: String,
    token_expiration_hours: i64,
}

impl TokenService {
    /// Create a new TokenService with the given signing secret
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            token_expiration_hours: 24,
        }
    }

    /// Sign a token for the given user and role set
    ///
    /// The token embeds a fixed 24-hour expiry, independent of the 7-day
    /// lifetime of the persisted session row.
    pub fn sign(&self, user_id: &str, roles: Vec<RoleType>) -> Result<String, ApiError> {
        let now = Utc::now().timestamp();
        let expiration = now + self.token_expiration_hours * 60 * 60;

        let claims = Claims {
            sub: user_id.to_string(),
            roles,
            exp: expiration,
            iat: now,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| ApiError::internal(format!("failed to sign token: {}", e)))
    }

    /// Verify a token and return its claims
    ///
    /// Returns None for any failure: malformed token, bad signature or
    /// expired. Callers must treat None as "authentication failed" without
    /// distinguishing the cause. Expiry is checked with zero leeway.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .ok()
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("token_expiration_hours", &self.token_expiration_hours)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const TEST_SECRET: &str = "test-secret-key-minimum-32-characters-long";

    fn service() -> TokenService {
        TokenService::new(TEST_SECRET.to_string())
    }

    #[test]
    fn test_sign_and_verify_roundtrip() {
        let token_service = service();
        let user_id = uuid::Uuid::new_v4().to_string();

        let token = token_service
            .sign(&user_id, vec![RoleType::User, RoleType::Manager])
            .unwrap();
        let claims = token_service.verify(&token).expect("token should verify");

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.roles, vec![RoleType::User, RoleType::Manager]);
    }

    #[test]
    fn test_token_expiration_is_24_hours() {
        let token_service = service();

        let token = token_service.sign("user-1", vec![]).unwrap();
        let claims = token_service.verify(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_verify_returns_none_for_bad_signature() {
        let token_service = service();
        let other_service = TokenService::new("wrong-secret-key-minimum-32-characters".to_string());

        let token = token_service.sign("user-1", vec![RoleType::User]).unwrap();

        assert!(other_service.verify(&token).is_none());
    }

    #[test]
    fn test_verify_returns_none_for_malformed_token() {
        let token_service = service();

        assert!(token_service.verify("not-a-jwt").is_none());
        assert!(token_service.verify("").is_none());
    }

    #[test]
    fn test_verify_returns_none_one_second_past_expiry() {
        let token_service = service();

        // Simulate a token issued 24h and 1s ago: its embedded expiry lies
        // one second in the past. Zero leeway makes the cutoff exact.
        let now = Utc::now().timestamp();
        let iat = now - 24 * 60 * 60 - 1;
        let claims = Claims {
            sub: uuid::Uuid::new_v4().to_string(),
            roles: vec![RoleType::User],
            exp: iat + 24 * 60 * 60,
            iat,
        };

        let expired_token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert!(token_service.verify(&expired_token).is_none());
    }

    #[test]
    fn test_verify_failures_are_indistinguishable() {
        let token_service = service();

        let now = Utc::now().timestamp();
        let expired = encode(
            &Header::new(Algorithm::HS256),
            &Claims {
                sub: "user-1".to_string(),
                roles: vec![],
                exp: now - 3600,
                iat: now - 7200,
            },
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        // Expired, tampered and garbage all collapse into the same None.
        assert!(token_service.verify(&expired).is_none());
        assert!(token_service.verify("garbage").is_none());
    }

    #[test]
    fn test_debug_does_not_expose_secret() {
        let token_service = service();

        let debug_output = format!("{:?}", token_service);

        assert!(!debug_output.contains(TEST_SECRET));
        assert!(debug_output.contains("<redacted>"));
    }
}
