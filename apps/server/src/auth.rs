//! JWT authentication module.
//!
//! Order submission works with or without an identity; order history
//! requires one. Tokens arrive as `Authorization: Bearer <jwt>`.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,

    /// Email, when the identity provider supplies one
    pub email: Option<String>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// JWT token manager.
#[derive(Debug)]
pub struct JwtManager {
    secret: String,
}

impl JwtManager {
    /// Create a new JWT manager.
    pub fn new(secret: impl Into<String>) -> Self {
        JwtManager {
            secret: secret.into(),
        }
    }

    /// Generate a signed token for a user.
    pub fn generate_token(
        &self,
        user_id: &str,
        email: Option<&str>,
        lifetime_secs: i64,
    ) -> Result<String, ApiError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(lifetime_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.map(str::to_string),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ApiError::internal(format!("Failed to generate token: {}", e)))
    }

    /// Validate and decode a token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, ApiError> {
        let validation = Validation::default();

        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|_| ApiError::unauthorized())?;

        Ok(token_data.claims)
    }
}

/// Extracts the bearer token from request headers, if present.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Resolves the caller's identity, requiring a valid token.
///
/// Used by order history: an unauthenticated read is an authorization
/// failure, never degraded.
pub fn require_identity(headers: &HeaderMap, jwt: &JwtManager) -> Result<Claims, ApiError> {
    let token = bearer_token(headers).ok_or_else(ApiError::unauthorized)?;
    jwt.validate_token(token)
}

/// Resolves the caller's identity when one is presented.
///
/// Used by order submission: anonymous checkouts are allowed, and an
/// invalid token is treated the same as no token.
pub fn optional_identity(headers: &HeaderMap, jwt: &JwtManager) -> Option<Claims> {
    bearer_token(headers).and_then(|t| jwt.validate_token(t).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn manager() -> JwtManager {
        JwtManager::new("test-secret")
    }

    fn headers_with(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[test]
    fn test_token_roundtrip() {
        let jwt = manager();
        let token = jwt
            .generate_token("user-1", Some("alex@email.com"), 3600)
            .unwrap();

        let claims = jwt.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email.as_deref(), Some("alex@email.com"));
    }

    #[test]
    fn test_require_identity_without_header_fails() {
        let jwt = manager();
        assert!(require_identity(&HeaderMap::new(), &jwt).is_err());
    }

    #[test]
    fn test_require_identity_rejects_garbage_token() {
        let jwt = manager();
        assert!(require_identity(&headers_with("not-a-jwt"), &jwt).is_err());
    }

    #[test]
    fn test_optional_identity_tolerates_garbage_token() {
        let jwt = manager();
        assert!(optional_identity(&headers_with("not-a-jwt"), &jwt).is_none());
        assert!(optional_identity(&HeaderMap::new(), &jwt).is_none());

        let token = jwt.generate_token("user-2", None, 3600).unwrap();
        let claims = optional_identity(&headers_with(&token), &jwt).unwrap();
        assert_eq!(claims.sub, "user-2");
    }
}
