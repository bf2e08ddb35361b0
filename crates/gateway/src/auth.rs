//! JWT token issuance and validation.
//!
//! Sentinel only mints and checks bearer tokens; verifying who a user is
//! belongs to the external identity store fronting this service.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use sentinel_core::config::AuthConfig;
use sentinel_core::{state::epoch_millis, Error, Result};

/// Claims carried by a Sentinel access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username the token was issued for.
    pub sub: String,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiry, seconds since epoch.
    pub exp: i64,
}

/// HS256 token issuer/validator.
pub struct AuthService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl AuthService {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Build from configuration. Returns `None` when auth is disabled;
    /// enabled-but-secretless is a hard configuration error.
    pub fn from_config(cfg: &AuthConfig) -> Result<Option<Self>> {
        if !cfg.enabled {
            return Ok(None);
        }
        let secret = cfg
            .jwt_secret
            .as_ref()
            .ok_or_else(|| Error::auth("auth.jwt_secret is required when auth is enabled"))?;
        Ok(Some(Self::new(secret.expose_secret(), cfg.token_ttl_secs)))
    }

    /// Token lifetime in seconds.
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Mint a token for a username.
    pub fn issue_token(&self, username: &str) -> Result<String> {
        let now = epoch_millis() / 1000;
        let claims = Claims {
            sub: username.to_string(),
            iat: now,
            exp: now + self.ttl_secs as i64,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| Error::auth(format!("Failed to issue token: {}", e)))
    }

    /// Validate a token and return its claims.
    pub fn validate(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| Error::auth(format!("Invalid token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    #[test]
    fn test_issue_and_validate_round_trip() {
        let auth = AuthService::new("test-secret", 3600);

        let token = auth.issue_token("analyst1").unwrap();
        let claims = auth.validate(&token).unwrap();

        assert_eq!(claims.sub, "analyst1");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let auth = AuthService::new("test-secret", 3600);
        assert!(auth.validate("not-a-token").is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = AuthService::new("secret-a", 3600);
        let verifier = AuthService::new("secret-b", 3600);

        let token = issuer.issue_token("analyst1").unwrap();
        assert!(verifier.validate(&token).is_err());
    }

    #[test]
    fn test_enabled_config_requires_secret() {
        let cfg = AuthConfig {
            enabled: true,
            jwt_secret: None,
            token_ttl_secs: 3600,
        };
        assert!(AuthService::from_config(&cfg).is_err());

        let cfg = AuthConfig {
            enabled: true,
            jwt_secret: Some(Secret::new("s3cr3t".to_string())),
            token_ttl_secs: 3600,
        };
        assert!(AuthService::from_config(&cfg).unwrap().is_some());
    }

    #[test]
    fn test_disabled_config_yields_none() {
        assert!(AuthService::from_config(&AuthConfig::default())
            .unwrap()
            .is_none());
    }
}
