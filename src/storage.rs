use rocksdb::{Direction, IteratorMode, Options, DB};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::account::types::Account;
use crate::group::types::Group;

/// Durable key-value store. Records are bincode blobs; secondary lookups
/// (email, reset token) are small index rows pointing at the primary key.
pub struct Storage {
    db: Arc<DB>,
}

impl Storage {
    pub fn new(path: &str) -> Self {
        let path = Path::new(path);
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DB::open(&opts, path).expect("Failed to open database");
        Storage { db: Arc::new(db) }
    }

    // Generic Helper: Put
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), String> {
        let serialized = bincode::serialize(value).map_err(|e| e.to_string())?;
        self.db.put(key.as_bytes(), serialized).map_err(|e| e.to_string())
    }

    // Generic Helper: Get
    pub fn get<T: for<'a> Deserialize<'a>>(&self, key: &str) -> Result<Option<T>, String> {
        match self.db.get(key.as_bytes()) {
            Ok(Some(data)) => {
                let deserialized = bincode::deserialize(&data).map_err(|e| e.to_string())?;
                Ok(Some(deserialized))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(e.to_string()),
        }
    }

    pub fn delete(&self, key: &str) -> Result<(), String> {
        self.db.delete(key.as_bytes()).map_err(|e| e.to_string())
    }

    /// Decode every value whose key starts with `prefix`, in key order.
    fn scan_prefix<T: for<'a> Deserialize<'a>>(&self, prefix: &str) -> Result<Vec<T>, String> {
        let mut out = Vec::new();
        let iter = self
            .db
            .iterator(IteratorMode::From(prefix.as_bytes(), Direction::Forward));
        for item in iter {
            let (key, value) = item.map_err(|e| e.to_string())?;
            if !key.starts_with(prefix.as_bytes()) {
                break;
            }
            out.push(bincode::deserialize(&value).map_err(|e| e.to_string())?);
        }
        Ok(out)
    }

    /// Collect key suffixes (the part after `prefix`), in key order.
    fn scan_prefix_keys(&self, prefix: &str) -> Result<Vec<String>, String> {
        let mut out = Vec::new();
        let iter = self
            .db
            .iterator(IteratorMode::From(prefix.as_bytes(), Direction::Forward));
        for item in iter {
            let (key, _) = item.map_err(|e| e.to_string())?;
            if !key.starts_with(prefix.as_bytes()) {
                break;
            }
            out.push(String::from_utf8_lossy(&key[prefix.len()..]).to_string());
        }
        Ok(out)
    }

    // --- Accounts ---

    /// Persist the whole record and keep the email index row current.
    /// Callers that change an email must remove the stale index row first.
    pub fn save_account(&self, account: &Account) -> Result<(), String> {
        self.put(&format!("account:{}", account.id), account)?;
        self.put(&format!("account_email:{}", account.email), &account.id)
    }

    pub fn get_account(&self, id: &str) -> Result<Option<Account>, String> {
        self.get(&format!("account:{}", id))
    }

    pub fn list_accounts(&self) -> Result<Vec<Account>, String> {
        self.scan_prefix("account:")
    }

    pub fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, String> {
        let id: Option<String> = self.get(&format!("account_email:{}", email))?;
        match id {
            Some(id) => {
                let account = self.get_account(&id)?;
                // A stale index row must not surface an account whose email moved on.
                Ok(account.filter(|a| a.email == email))
            }
            None => Ok(None),
        }
    }

    pub fn remove_email_index(&self, email: &str) -> Result<(), String> {
        self.delete(&format!("account_email:{}", email))
    }

    pub fn index_reset_token(&self, token: &str, account_id: &str) -> Result<(), String> {
        self.put(&format!("account_reset:{}", token), &account_id.to_string())
    }

    pub fn remove_reset_token(&self, token: &str) -> Result<(), String> {
        self.delete(&format!("account_reset:{}", token))
    }

    pub fn find_account_by_reset_token(&self, token: &str) -> Result<Option<Account>, String> {
        let id: Option<String> = self.get(&format!("account_reset:{}", token))?;
        match id {
            Some(id) => {
                let account = self.get_account(&id)?;
                // Only an exact match against the stored field authorizes a reset.
                Ok(account.filter(|a| a.reset_token.as_deref() == Some(token)))
            }
            None => Ok(None),
        }
    }

    // --- Groups ---

    pub fn save_group(&self, group: &Group) -> Result<(), String> {
        self.put(&format!("group:{}", group.id), group)
    }

    pub fn get_group(&self, id: &str) -> Result<Option<Group>, String> {
        self.get(&format!("group:{}", id))
    }

    pub fn list_groups(&self) -> Result<Vec<Group>, String> {
        self.scan_prefix("group:")
    }

    // --- Membership edges ---
    //
    // One edge is two pair-keyed rows, readable by prefix from either side.
    // Keying by the pair makes a repeated insert overwrite the same rows.

    pub fn add_membership_edge(&self, user_id: &str, group_id: &str) -> Result<(), String> {
        self.put(&format!("member:u:{}:{}", user_id, group_id), &true)?;
        self.put(&format!("member:g:{}:{}", group_id, user_id), &true)
    }

    pub fn user_group_ids(&self, user_id: &str) -> Result<Vec<String>, String> {
        self.scan_prefix_keys(&format!("member:u:{}:", user_id))
    }

    pub fn group_member_ids(&self, group_id: &str) -> Result<Vec<String>, String> {
        self.scan_prefix_keys(&format!("member:g:{}:", group_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::types::AccountInput;
    use crate::group::types::GroupInput;

    fn test_storage() -> Storage {
        let path = std::env::temp_dir().join(format!("studyhub_test_{}", uuid::Uuid::new_v4()));
        Storage::new(path.to_str().unwrap())
    }

    fn sample_account(name: &str, email: &str) -> Account {
        Account::new(
            AccountInput {
                name: name.to_string(),
                email: email.to_string(),
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
    fn test_account_round_trip_and_email_lookup() {
        let storage = test_storage();
        let account = sample_account("alice", "alice@example.com");
        storage.save_account(&account).unwrap();

        let loaded = storage.get_account(&account.id).unwrap().unwrap();
        assert_eq!(loaded.email, "alice@example.com");

        let by_email = storage.find_account_by_email("alice@example.com").unwrap().unwrap();
        assert_eq!(by_email.id, account.id);

        assert!(storage.find_account_by_email("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn test_stale_email_index_is_not_surfaced() {
        let storage = test_storage();
        let mut account = sample_account("alice", "old@example.com");
        storage.save_account(&account).unwrap();

        // Email changed but the old index row was left behind on purpose.
        account.email = "new@example.com".to_string();
        storage.save_account(&account).unwrap();

        assert!(storage.find_account_by_email("old@example.com").unwrap().is_none());
        assert!(storage.find_account_by_email("new@example.com").unwrap().is_some());
    }

    #[test]
    fn test_reset_token_lookup_requires_exact_field_match() {
        let storage = test_storage();
        let mut account = sample_account("alice", "alice@example.com");
        account.set_reset_token("tok-1".to_string(), chrono::Utc::now());
        storage.save_account(&account).unwrap();
        storage.index_reset_token("tok-1", &account.id).unwrap();

        assert!(storage.find_account_by_reset_token("tok-1").unwrap().is_some());
        assert!(storage.find_account_by_reset_token("tok-2").unwrap().is_none());

        // Index row without a matching stored field is dead.
        account.clear_reset_token();
        storage.save_account(&account).unwrap();
        assert!(storage.find_account_by_reset_token("tok-1").unwrap().is_none());
    }

    #[test]
    fn test_membership_edges_readable_from_both_sides() {
        let storage = test_storage();
        let account = sample_account("alice", "alice@example.com");
        let group = Group::new(GroupInput {
            name: "rustaceans".to_string(),
            description: String::new(),
        });
        storage.save_account(&account).unwrap();
        storage.save_group(&group).unwrap();

        storage.add_membership_edge(&account.id, &group.id).unwrap();

        assert_eq!(storage.user_group_ids(&account.id).unwrap(), vec![group.id.clone()]);
        assert_eq!(storage.group_member_ids(&group.id).unwrap(), vec![account.id.clone()]);
    }

    #[test]
    fn test_list_accounts_excludes_index_rows() {
        let storage = test_storage();
        storage.save_account(&sample_account("a", "a@example.com")).unwrap();
        storage.save_account(&sample_account("b", "b@example.com")).unwrap();

        assert_eq!(storage.list_accounts().unwrap().len(), 2);
        assert!(storage.list_groups().unwrap().is_empty());
    }
}
