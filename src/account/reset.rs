//! Password reset: token issuance, expiry enforcement, single-use consumption.

use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use super::auth;
use super::policy;
use crate::error::ApiError;
use crate::mail::{MailMessage, Mailer};
use crate::storage::Storage;

/// Reset tokens are valid for one hour.
const RESET_TOKEN_TTL_SECS: i64 = 3600;

pub struct PasswordResetService {
    storage: Arc<Storage>,
    mailer: Arc<dyn Mailer>,
    reset_url: String,
}

impl PasswordResetService {
    pub fn new(storage: Arc<Storage>, mailer: Arc<dyn Mailer>, reset_url: String) -> Self {
        Self {
            storage,
            mailer,
            reset_url,
        }
    }

    /// Issue a fresh reset token for the account behind `email` and hand the
    /// reset link to the mailer. Any previously issued token stops matching
    /// the stored value and is invalid from this point on.
    ///
    /// Token issuance succeeds even when the mail cannot be delivered; the
    /// send error is logged and the caller may trigger a resend.
    pub async fn request_reset(&self, email: &str) -> Result<(), ApiError> {
        let mut account = self
            .storage
            .find_account_by_email(email)
            .map_err(ApiError::DatabaseError)?
            .ok_or(ApiError::NotFound("User"))?;

        let token = Uuid::new_v4().to_string();
        let expiry = Utc::now() + Duration::seconds(RESET_TOKEN_TTL_SECS);

        if let Some(old_token) = account.reset_token.clone() {
            self.storage
                .remove_reset_token(&old_token)
                .map_err(ApiError::DatabaseError)?;
        }
        account.set_reset_token(token.clone(), expiry);
        self.storage
            .save_account(&account)
            .map_err(ApiError::DatabaseError)?;
        self.storage
            .index_reset_token(&token, &account.id)
            .map_err(ApiError::DatabaseError)?;

        let reset_link = format!("{}?token={}", self.reset_url, token);
        let message = MailMessage {
            to: account.email.clone(),
            subject: "Password Reset Request".to_string(),
            body: format!(
                "Click the following link to reset your password: {}",
                reset_link
            ),
        };

        match self.mailer.send(&message).await {
            Ok(()) => info!("Password reset email sent to {}", account.email),
            Err(e) => warn!("Error sending email to {}: {}", account.email, e),
        }
        Ok(())
    }

    /// Consume a reset token and store a new password hash.
    ///
    /// The token is cleared only on success; an expired or policy-rejected
    /// attempt leaves the stored state untouched.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), ApiError> {
        let mut account = self
            .storage
            .find_account_by_reset_token(token)
            .map_err(ApiError::DatabaseError)?
            .ok_or(ApiError::InvalidToken)?;

        if !account.has_pending_reset(Utc::now()) {
            return Err(ApiError::TokenExpired);
        }

        policy::validate(new_password)?;

        account.password_hash = auth::hash_password(new_password)?;
        account.clear_reset_token();
        self.storage
            .save_account(&account)
            .map_err(ApiError::DatabaseError)?;
        self.storage
            .remove_reset_token(token)
            .map_err(ApiError::DatabaseError)?;

        info!("Password reset completed for account {}", account.id);
        Ok(())
    }
}
