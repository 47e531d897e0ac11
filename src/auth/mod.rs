//! Credential verification and sessions
//!
//! Administrators are stored with bcrypt password hashes. A successful
//! sign-in yields a [`Session`], handed to clients as a signed token.

pub mod users;

pub use users::{UserRecord, UserStore};

use crate::config::AuthConfig;
use crate::error::{AuthFailure, Error, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// An authenticated administrator
///
/// Every session may create, update and delete places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "id")]
    pub user_id: String,
    pub email: String,
    pub name: String,
}

impl Session {
    /// Identity recorded as `createdBy` on places this session writes
    pub fn actor(&self) -> &str {
        if self.email.is_empty() {
            "anonymous"
        } else {
            &self.email
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id
    sub: String,
    email: String,
    name: String,
    /// Expiry time as Unix timestamp
    exp: usize,
}

/// Signs and verifies session tokens
pub struct SessionKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.secret, Duration::hours(config.session_ttl_hours))
    }

    /// Issue a token for the session
    pub fn issue(&self, session: &Session) -> Result<String> {
        let exp = usize::try_from((Utc::now() + self.ttl).timestamp())
            .map_err(|_| Error::Config("Session lifetime produces an invalid expiry".to_string()))?;
        let claims = Claims {
            sub: session.user_id.clone(),
            email: session.email.clone(),
            name: session.name.clone(),
            exp,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| Error::Server(format!("Failed to sign session: {}", e)))
    }

    /// Verify a token and recover its session
    pub fn verify(&self, token: &str) -> Result<Session> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| AuthFailure::InvalidSession)?;

        Ok(Session {
            user_id: data.claims.sub,
            email: data.claims.email,
            name: data.claims.name,
        })
    }

    /// Extract and verify a bearer token from an `Authorization` header value
    pub fn verify_bearer(&self, header: Option<&str>) -> Result<Session> {
        let token = header
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthFailure::MissingSession)?;

        self.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            user_id: "u-1".to_string(),
            email: "admin@example.com".to_string(),
            name: "Test Admin".to_string(),
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let keys = SessionKeys::new("secret", Duration::hours(1));
        let token = keys.issue(&session()).unwrap();
        assert_eq!(keys.verify(&token).unwrap(), session());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = SessionKeys::new("secret", Duration::hours(1))
            .issue(&session())
            .unwrap();
        let err = SessionKeys::new("other", Duration::hours(1))
            .verify(&token)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Authentication(AuthFailure::InvalidSession)
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let keys = SessionKeys::new("secret", Duration::hours(-2));
        let token = keys.issue(&session()).unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn test_bearer_header() {
        let keys = SessionKeys::new("secret", Duration::hours(1));
        let token = keys.issue(&session()).unwrap();

        let header = format!("Bearer {}", token);
        assert!(keys.verify_bearer(Some(&header)).is_ok());

        let err = keys.verify_bearer(None).unwrap_err();
        assert!(matches!(
            err,
            Error::Authentication(AuthFailure::MissingSession)
        ));
        assert!(keys.verify_bearer(Some("Basic abc")).is_err());
        assert!(keys.verify_bearer(Some("Bearer ")).is_err());
    }

    #[test]
    fn test_actor_falls_back_to_anonymous() {
        let mut s = session();
        assert_eq!(s.actor(), "admin@example.com");
        s.email.clear();
        assert_eq!(s.actor(), "anonymous");
    }
}
