//! Account type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account identifier - opaque uuid string, assigned on creation.
pub type AccountId = String;

/// Main account record as persisted.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Account {
    // Identity
    pub id: AccountId,
    pub name: String,
    pub email: String,

    // Authentication
    pub password_hash: String, // Argon2id PHC string, never plaintext

    // Profile
    pub phone_contact: String,
    pub birth_date: String,
    pub country: String,
    pub about_me: String,
    pub current_address: String,

    // Password reset state. Both fields are set and cleared together.
    pub reset_token: Option<String>,
    pub reset_token_expiry: Option<DateTime<Utc>>,

    pub created_at: u64,
}

impl Account {
    pub fn new(input: AccountInput, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            email: input.email,
            password_hash,
            phone_contact: input.phone_contact,
            birth_date: input.birth_date,
            country: input.country,
            about_me: input.about_me,
            current_address: input.current_address,
            reset_token: None,
            reset_token_expiry: None,
            created_at: current_timestamp(),
        }
    }

    pub fn set_reset_token(&mut self, token: String, expiry: DateTime<Utc>) {
        self.reset_token = Some(token);
        self.reset_token_expiry = Some(expiry);
    }

    pub fn clear_reset_token(&mut self) {
        self.reset_token = None;
        self.reset_token_expiry = None;
    }

    /// True while a token is stored and its expiry is still ahead of `now`.
    pub fn has_pending_reset(&self, now: DateTime<Utc>) -> bool {
        matches!(self.reset_token_expiry, Some(expiry) if expiry > now)
    }

    pub fn to_view(&self, groups: Vec<String>) -> AccountView {
        AccountView {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone_contact: self.phone_contact.clone(),
            birth_date: self.birth_date.clone(),
            country: self.country.clone(),
            about_me: self.about_me.clone(),
            current_address: self.current_address.clone(),
            groups,
        }
    }
}

/// Incoming account fields. `password` is plaintext here and only here;
/// it is hashed before anything is persisted.
#[derive(Deserialize, Clone, Debug)]
pub struct AccountInput {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone_contact: String,
    #[serde(default)]
    pub birth_date: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub about_me: String,
    #[serde(default)]
    pub current_address: String,
}

/// Public view of an account. Excludes the password hash and reset fields.
#[derive(Serialize, Clone, Debug)]
pub struct AccountView {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub phone_contact: String,
    pub birth_date: String,
    pub country: String,
    pub about_me: String,
    pub current_address: String,
    pub groups: Vec<String>,
}

fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample() -> Account {
        Account::new(
            AccountInput {
                name: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "ignored".to_string(),
                phone_contact: String::new(),
                birth_date: String::new(),
                country: String::new(),
                about_me: String::new(),
                current_address: String::new(),
            },
            "hash".to_string(),
        )
    }

    #[test]
    fn test_reset_fields_set_and_cleared_together() {
        let mut account = sample();
        assert!(account.reset_token.is_none());
        assert!(account.reset_token_expiry.is_none());

        account.set_reset_token("tok".to_string(), Utc::now());
        assert!(account.reset_token.is_some());
        assert!(account.reset_token_expiry.is_some());

        account.clear_reset_token();
        assert!(account.reset_token.is_none());
        assert!(account.reset_token_expiry.is_none());
    }

    #[test]
    fn test_has_pending_reset_respects_expiry() {
        let mut account = sample();
        let now = Utc::now();
        assert!(!account.has_pending_reset(now));

        account.set_reset_token("tok".to_string(), now + Duration::seconds(5));
        assert!(account.has_pending_reset(now));

        account.set_reset_token("tok".to_string(), now - Duration::seconds(5));
        assert!(!account.has_pending_reset(now));
    }

    #[test]
    fn test_view_carries_no_secrets() {
        let mut account = sample();
        account.set_reset_token("tok".to_string(), Utc::now());
        let view = account.to_view(vec!["g1".to_string()]);

        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("hash"));
        assert!(!json.contains("tok"));
        assert_eq!(view.groups, vec!["g1".to_string()]);
    }
}
