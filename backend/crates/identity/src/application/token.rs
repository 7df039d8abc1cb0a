//! Token Service
//!
//! Stateless signed bearer tokens. A token is
//! `base64url(claims JSON) + "." + base64url(HMAC-SHA256(secret, claims JSON))`;
//! validity is fully determined by signature and expiry, with no
//! server-side session state.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::IdentityConfig;
use crate::domain::value_object::user_id::UserId;
use crate::error::{IdentityError, IdentityResult};

/// Signed token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject user id
    pub id: Uuid,
    /// Issued-at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
}

/// Issues and verifies signed bearer tokens
#[derive(Clone)]
pub struct TokenService {
    config: Arc<IdentityConfig>,
}

impl TokenService {
    pub fn new(config: Arc<IdentityConfig>) -> Self {
        Self { config }
    }

    /// Issue a token for the user, expiring `token_ttl` from now
    pub fn issue(&self, user_id: &UserId) -> IdentityResult<String> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            id: *user_id.as_uuid(),
            iat: now,
            exp: now + self.config.token_ttl_secs(),
        };

        let payload = serde_json::to_vec(&claims)
            .map_err(|e| IdentityError::Internal(format!("Token encoding failed: {e}")))?;
        let signature = platform::crypto::hmac_sha256(&self.config.token_secret, &payload);

        Ok(format!(
            "{}.{}",
            platform::crypto::to_base64url(&payload),
            platform::crypto::to_base64url(&signature)
        ))
    }

    /// Verify signature and expiry, returning the embedded user id
    pub fn verify(&self, token: &str) -> IdentityResult<UserId> {
        let (payload_b64, signature_b64) =
            token.split_once('.').ok_or(IdentityError::InvalidToken)?;

        let payload = platform::crypto::from_base64url(payload_b64)
            .map_err(|_| IdentityError::InvalidToken)?;
        let provided_signature = platform::crypto::from_base64url(signature_b64)
            .map_err(|_| IdentityError::InvalidToken)?;

        let expected_signature =
            platform::crypto::hmac_sha256(&self.config.token_secret, &payload);

        if !platform::crypto::constant_time_eq(&provided_signature, &expected_signature) {
            return Err(IdentityError::InvalidToken);
        }

        let claims: TokenClaims =
            serde_json::from_slice(&payload).map_err(|_| IdentityError::InvalidToken)?;

        if claims.exp <= Utc::now().timestamp() {
            return Err(IdentityError::InvalidToken);
        }

        Ok(UserId::from_uuid(claims.id))
    }
}
