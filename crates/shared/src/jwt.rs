//! JWT access-token utilities.
//!
//! Access tokens are issued by the external identity provider and signed with
//! RS256. This service only needs the provider's public key to verify them;
//! a signing key is optional and only used to mint tokens in tests and local
//! development.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("No signing key configured")]
    MissingSigningKey,
}

/// JWT token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// JWT ID (unique token identifier)
    pub jti: String,
    /// Token type (access or refresh)
    pub token_type: TokenType,
    /// Email address asserted by the identity provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name asserted by the identity provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Type of JWT token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Profile fields embedded into a minted token.
#[derive(Debug, Clone, Default)]
pub struct TokenProfile {
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Configuration for JWT validation (and optional generation).
#[derive(Clone)]
pub struct JwtConfig {
    /// Private key for minting tokens. Absent in production.
    encoding_key: Option<EncodingKey>,
    /// Public key of the identity provider.
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    /// Access token expiration in seconds, used when minting.
    pub access_token_expiry_secs: i64,
    /// Leeway in seconds for clock skew tolerance (default: 30)
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("algorithm", &self.algorithm)
            .field("access_token_expiry_secs", &self.access_token_expiry_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("can_sign", &self.encoding_key.is_some())
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// Default leeway in seconds for clock skew tolerance
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Default lifetime of minted access tokens.
pub const DEFAULT_ACCESS_TOKEN_EXPIRY_SECS: i64 = 3600;

impl JwtConfig {
    /// Creates a verify-only config from the provider's RSA public key (PEM).
    pub fn verifier(public_key_pem: &str, leeway_secs: u64) -> Result<Self, JwtError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(format!("Invalid public key: {}", e)))?;

        Ok(Self {
            encoding_key: None,
            decoding_key,
            algorithm: Algorithm::RS256,
            access_token_expiry_secs: DEFAULT_ACCESS_TOKEN_EXPIRY_SECS,
            leeway_secs,
        })
    }

    /// Adds an RSA private key (PEM) so the config can mint tokens.
    pub fn with_signing_key(mut self, private_key_pem: &str) -> Result<Self, JwtError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(format!("Invalid private key: {}", e)))?;
        self.encoding_key = Some(encoding_key);
        Ok(self)
    }

    /// Creates an HS256 config from a shared secret.
    /// DO NOT use in production - only for tests.
    pub fn new_for_testing(secret: &str) -> Self {
        Self {
            encoding_key: Some(EncodingKey::from_secret(secret.as_bytes())),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
            access_token_expiry_secs: 900,
            leeway_secs: 0, // Strict for testing - no leeway
        }
    }

    /// Generates an access token for the given user.
    pub fn generate_access_token(
        &self,
        user_id: Uuid,
        profile: TokenProfile,
    ) -> Result<(String, String), JwtError> {
        self.generate_token(
            user_id,
            profile,
            TokenType::Access,
            self.access_token_expiry_secs,
        )
    }

    fn generate_token(
        &self,
        user_id: Uuid,
        profile: TokenProfile,
        token_type: TokenType,
        expiry_secs: i64,
    ) -> Result<(String, String), JwtError> {
        let encoding_key = self
            .encoding_key
            .as_ref()
            .ok_or(JwtError::MissingSigningKey)?;

        let now = Utc::now();
        let jti = Uuid::new_v4().to_string();
        let exp = (now + Duration::seconds(expiry_secs)).timestamp();

        let claims = Claims {
            sub: user_id.to_string(),
            exp,
            iat: now.timestamp(),
            jti: jti.clone(),
            token_type,
            email: profile.email,
            name: profile.name,
        };

        let token = encode(&Header::new(self.algorithm), &claims, encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))?;

        Ok((token, jti))
    }

    /// Validates a token and returns its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Validates an access token specifically.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(JwtError::InvalidToken);
        }
        Ok(claims)
    }
}

/// Extracts user ID from validated claims.
pub fn extract_user_id(claims: &Claims) -> Result<Uuid, JwtError> {
    Uuid::parse_str(&claims.sub).map_err(|_| JwtError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> JwtConfig {
        JwtConfig::new_for_testing("test_secret_key_for_jwt_testing_12345")
    }

    fn profile(email: &str) -> TokenProfile {
        TokenProfile {
            email: Some(email.to_string()),
            name: None,
        }
    }

    #[test]
    fn test_generate_and_validate_access_token() {
        let config = create_test_config();
        let user_id = Uuid::new_v4();

        let (token, jti) = config
            .generate_access_token(user_id, profile("a@x.com"))
            .unwrap();
        let claims = config.validate_access_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.jti, jti);
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.email.as_deref(), Some("a@x.com"));
    }

    #[test]
    fn test_claims_without_profile_fields() {
        let config = create_test_config();
        let (token, _) = config
            .generate_access_token(Uuid::new_v4(), TokenProfile::default())
            .unwrap();
        let claims = config.validate_access_token(&token).unwrap();

        assert!(claims.email.is_none());
        assert!(claims.name.is_none());
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let config = create_test_config();
        let (token, _) = config
            .generate_token(
                Uuid::new_v4(),
                TokenProfile::default(),
                TokenType::Refresh,
                600,
            )
            .unwrap();

        let result = config.validate_access_token(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_expired_token() {
        let config = create_test_config();
        let (token, _) = config
            .generate_token(
                Uuid::new_v4(),
                TokenProfile::default(),
                TokenType::Access,
                -120,
            )
            .unwrap();

        let result = config.validate_access_token(&token);
        assert!(
            matches!(result, Err(JwtError::TokenExpired)),
            "Expected TokenExpired, got: {:?}",
            result
        );
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let issuer = JwtConfig::new_for_testing("issuer-secret");
        let verifier = JwtConfig::new_for_testing("another-secret");
        let (token, _) = issuer
            .generate_access_token(Uuid::new_v4(), TokenProfile::default())
            .unwrap();

        assert!(matches!(
            verifier.validate_access_token(&token),
            Err(JwtError::InvalidToken)
        ));
    }

    #[test]
    fn test_malformed_token() {
        let config = create_test_config();
        assert!(config.validate_token("not_a_jwt").is_err());
    }

    #[test]
    fn test_verifier_rejects_garbage_key() {
        let result = JwtConfig::verifier("not a pem", DEFAULT_LEEWAY_SECS);
        assert!(matches!(result, Err(JwtError::InvalidKey(_))));
    }

    #[test]
    fn test_extract_user_id() {
        let config = create_test_config();
        let user_id = Uuid::new_v4();

        let (token, _) = config
            .generate_access_token(user_id, TokenProfile::default())
            .unwrap();
        let claims = config.validate_access_token(&token).unwrap();

        assert_eq!(extract_user_id(&claims).unwrap(), user_id);
    }

    #[test]
    fn test_token_type_serialization() {
        assert_eq!(
            serde_json::to_string(&TokenType::Access).unwrap(),
            "\"access\""
        );
        assert_eq!(
            serde_json::to_string(&TokenType::Refresh).unwrap(),
            "\"refresh\""
        );
    }
}
