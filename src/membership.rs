//! Membership manager: the user↔group association.
//!
//! An edge is written as two pair-keyed rows in one call, so every stored
//! edge is readable from both sides. Because the rows are keyed by the
//! (user, group) pair, adding the same membership twice is an upsert.

use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::storage::Storage;

pub struct MembershipManager {
    storage: Arc<Storage>,
}

impl MembershipManager {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Add a user to a group. Both records must exist; the edge is persisted
    /// for both read directions.
    pub fn add_membership(&self, user_id: &str, group_id: &str) -> Result<(), ApiError> {
        let account = self
            .storage
            .get_account(user_id)
            .map_err(ApiError::DatabaseError)?
            .ok_or(ApiError::NotFound("User"))?;
        let group = self
            .storage
            .get_group(group_id)
            .map_err(ApiError::DatabaseError)?
            .ok_or(ApiError::NotFound("Group"))?;

        self.storage
            .add_membership_edge(&account.id, &group.id)
            .map_err(ApiError::DatabaseError)?;

        info!("Added user {} to group {}", account.id, group.id);
        Ok(())
    }

    pub fn groups_of(&self, user_id: &str) -> Result<Vec<String>, ApiError> {
        self.storage
            .user_group_ids(user_id)
            .map_err(ApiError::DatabaseError)
    }

    pub fn members_of(&self, group_id: &str) -> Result<Vec<String>, ApiError> {
        self.storage
            .group_member_ids(group_id)
            .map_err(ApiError::DatabaseError)
    }
}
