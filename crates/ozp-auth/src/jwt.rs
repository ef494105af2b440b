//! JWT creation and verification.
//!
//! Tokens are HS256-signed with the secret from [`JwtConfig`]. Verification
//! checks signature and expiry; anything else is the caller's concern.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use ozp_config::JwtConfig;
use ozp_core::AppError;
use ozp_core::errors::INVALID_TOKEN;

use crate::claims::Claims;

/// Creates an access token for the account `username`.
///
/// # Errors
///
/// Returns an internal error if token encoding fails.
pub fn create_access_token(username: &str, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry.max(0) as usize;

    let claims = Claims {
        sub: username.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verifies an access token and returns the embedded claims.
///
/// # Errors
///
/// Returns `401 Invalid token.` when the signature is wrong, the token has
/// expired, or it is malformed.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(INVALID_TOKEN))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_created_token_verifies() {
        let config = config("test-secret");
        let token = create_access_token("bigbrother", &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "bigbrother");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_access_token("bigbrother", &config("secret-a")).unwrap();
        let err = verify_token(&token, &config("secret-b")).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.error.to_string(), INVALID_TOKEN);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = config("test-secret");
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "jones".to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();
        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(verify_token("not-a-jwt", &config("test-secret")).is_err());
    }
}
