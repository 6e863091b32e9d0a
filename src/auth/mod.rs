use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::database::models::User;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user: &User, expiry_hours: u64) -> Self {
        let now = Utc::now();

        Self {
            sub: user.id,
            email: user.email.clone(),
            exp: (now + Duration::hours(expiry_hours as i64)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT signing secret is empty")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Password hashing and session-token signing, built once at startup from
/// [`SecurityConfig`] and shared through the application state.
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    bcrypt_cost: u32,
    token_expiry_hours: u64,
}

impl AuthService {
    pub fn new(security: &SecurityConfig) -> Result<Self, AuthError> {
        if security.jwt_secret.is_empty() {
            return Err(AuthError::InvalidSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(security.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(security.jwt_secret.as_bytes()),
            bcrypt_cost: security.bcrypt_cost,
            token_expiry_hours: security.jwt_expiry_hours,
        })
    }

    /// Salted one-way hash; the same plaintext produces a different hash
    /// on every call.
    pub fn hash_password(&self, plaintext: &str) -> Result<String, AuthError> {
        Ok(bcrypt::hash(plaintext, self.bcrypt_cost)?)
    }

    /// A malformed stored hash verifies as false rather than erroring.
    pub fn verify_password(&self, plaintext: &str, hash: &str) -> bool {
        bcrypt::verify(plaintext, hash).unwrap_or(false)
    }

    /// Sign a session token for an authenticated user.
    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let claims = Claims::new(user, self.token_expiry_hours);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Verify signature and expiry, returning the embedded claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        // Minimum bcrypt cost keeps the hashing tests fast
        AuthService::new(&SecurityConfig {
            jwt_secret: "test-signing-secret".to_string(),
            jwt_expiry_hours: 1,
            bcrypt_cost: 4,
        })
        .unwrap()
    }

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            password: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn same_password_hashes_differently_but_both_verify() {
        let auth = service();
        let first = auth.hash_password("secret123").unwrap();
        let second = auth.hash_password("secret123").unwrap();

        assert_ne!(first, second);
        assert!(auth.verify_password("secret123", &first));
        assert!(auth.verify_password("secret123", &second));
        assert!(!auth.verify_password("wrong", &first));
    }

    #[test]
    fn malformed_hash_verifies_false() {
        let auth = service();
        assert!(!auth.verify_password("secret123", "not-a-bcrypt-hash"));
        assert!(!auth.verify_password("secret123", ""));
    }

    #[test]
    fn token_round_trip_preserves_subject() {
        let auth = service();
        let user = user();

        let token = auth.issue_token(&user).unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let auth = service();
        let user = user();

        // Issued two hours ago with a one-hour lifetime
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            exp: (now - Duration::hours(1)).timestamp(),
            iat: (now - Duration::hours(2)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &auth.encoding_key).unwrap();

        assert!(matches!(
            auth.verify_token(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let auth = service();
        let token = auth.issue_token(&user()).unwrap();
        let tampered = format!("{}x", token);

        assert!(matches!(
            auth.verify_token(&tampered),
            Err(AuthError::TokenInvalid)
        ));
        assert!(matches!(
            auth.verify_token("garbage"),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn empty_secret_is_refused() {
        let security = SecurityConfig {
            jwt_secret: String::new(),
            jwt_expiry_hours: 1,
            bcrypt_cost: 10,
        };
        assert!(matches!(
            AuthService::new(&security),
            Err(AuthError::InvalidSecret)
        ));
    }
}
