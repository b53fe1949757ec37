//! Identity service: registration, lookup, and profile updates.

use std::sync::Arc;
use tracing::info;

use super::auth;
use super::policy;
use super::types::{Account, AccountInput, AccountView};
use crate::error::ApiError;
use crate::storage::Storage;

pub struct IdentityService {
    storage: Arc<Storage>,
}

impl IdentityService {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Register a new account. The password is validated before anything is
    /// written; a policy violation means no account exists afterwards.
    pub fn register(&self, input: AccountInput) -> Result<AccountView, ApiError> {
        policy::validate(&input.password)?;

        let password_hash = auth::hash_password(&input.password)?;
        let account = Account::new(input, password_hash);
        self.storage
            .save_account(&account)
            .map_err(ApiError::DatabaseError)?;

        info!("Registered account {} ({})", account.id, account.email);
        self.view(&account)
    }

    pub fn get(&self, id: &str) -> Result<AccountView, ApiError> {
        let account = self
            .storage
            .get_account(id)
            .map_err(ApiError::DatabaseError)?
            .ok_or(ApiError::NotFound("User"))?;
        self.view(&account)
    }

    pub fn list(&self) -> Result<Vec<AccountView>, ApiError> {
        let accounts = self.storage.list_accounts().map_err(ApiError::DatabaseError)?;
        accounts.iter().map(|a| self.view(a)).collect()
    }

    /// Overwrite the profile fields of an existing account.
    ///
    /// The submitted password is re-validated and re-hashed even when it is
    /// unchanged: every profile update requires a policy-valid password.
    pub fn update_profile(&self, id: &str, input: AccountInput) -> Result<AccountView, ApiError> {
        let mut account = self
            .storage
            .get_account(id)
            .map_err(ApiError::DatabaseError)?
            .ok_or(ApiError::NotFound("User"))?;

        policy::validate(&input.password)?;
        let password_hash = auth::hash_password(&input.password)?;

        if account.email != input.email {
            self.storage
                .remove_email_index(&account.email)
                .map_err(ApiError::DatabaseError)?;
        }

        account.name = input.name;
        account.email = input.email;
        account.password_hash = password_hash;
        account.phone_contact = input.phone_contact;
        account.birth_date = input.birth_date;
        account.country = input.country;
        account.about_me = input.about_me;
        account.current_address = input.current_address;

        self.storage
            .save_account(&account)
            .map_err(ApiError::DatabaseError)?;

        info!("Updated profile for account {}", account.id);
        self.view(&account)
    }

    fn view(&self, account: &Account) -> Result<AccountView, ApiError> {
        let groups = self
            .storage
            .user_group_ids(&account.id)
            .map_err(ApiError::DatabaseError)?;
        Ok(account.to_view(groups))
    }
}
