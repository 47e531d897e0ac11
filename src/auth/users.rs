//! Administrator credential store

use crate::auth::Session;
use crate::db::Database;
use crate::error::{AuthFailure, Error, Result};
use chrono::{DateTime, Utc};
use pwhash::bcrypt;
use tracing::{info, warn};
use uuid::Uuid;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// A stored administrator (the hash never leaves this module)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    fn session(&self) -> Session {
        Session {
            user_id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// Users collection
#[derive(Debug, Clone)]
pub struct UserStore {
    db: Database,
}

impl UserStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Register an administrator
    ///
    /// Registration is administrator-only; it is exposed on the CLI, not over HTTP.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<UserRecord> {
        let email = normalize_email(email);
        if email.is_empty() || !email.contains('@') {
            return Err(Error::Validation(format!("Invalid email: {}", email)));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        if self.find_by_email(&email).await?.is_some() {
            return Err(Error::Validation(format!(
                "A user with email {} already exists",
                email
            )));
        }

        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password))
            .await
            .map_err(|e| Error::Server(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| Error::Server(format!("Failed to hash password: {}", e)))?;

        let record = UserRecord {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            email,
            password_hash,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(record.created_at)
        .execute(self.db.pool())
        .await?;

        info!("Registered user {}", record.email);
        Ok(record)
    }

    /// Check an email/password pair and return the resulting session
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Session> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(Error::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let user = self.find_by_email(&email).await?.ok_or_else(|| {
            warn!("Sign-in attempt for unknown email {}", email);
            AuthFailure::UserNotFound
        })?;

        let password = password.to_string();
        let hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| Error::Server(format!("Password check task failed: {}", e)))?;

        if !matches {
            warn!("Incorrect password for {}", email);
            return Err(AuthFailure::InvalidPassword.into());
        }

        info!("Signed in {}", email);
        Ok(user.session())
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = ?",
        )
        .bind(normalize_email(email))
        .fetch_optional(self.db.pool())
        .await?;

        Ok(user)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
