//! Group CRUD over the shared storage.

use std::sync::Arc;
use tracing::info;

use super::types::{Group, GroupInput, GroupView};
use crate::error::ApiError;
use crate::storage::Storage;

pub struct GroupService {
    storage: Arc<Storage>,
}

impl GroupService {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    pub fn create(&self, input: GroupInput) -> Result<GroupView, ApiError> {
        let group = Group::new(input);
        self.storage
            .save_group(&group)
            .map_err(ApiError::DatabaseError)?;

        info!("Created group {} ({})", group.id, group.name);
        self.view(&group)
    }

    pub fn update(&self, id: &str, input: GroupInput) -> Result<GroupView, ApiError> {
        let mut group = self
            .storage
            .get_group(id)
            .map_err(ApiError::DatabaseError)?
            .ok_or(ApiError::NotFound("Group"))?;

        group.name = input.name;
        group.description = input.description;
        self.storage
            .save_group(&group)
            .map_err(ApiError::DatabaseError)?;

        info!("Updated group {}", group.id);
        self.view(&group)
    }

    pub fn get(&self, id: &str) -> Result<GroupView, ApiError> {
        let group = self
            .storage
            .get_group(id)
            .map_err(ApiError::DatabaseError)?
            .ok_or(ApiError::NotFound("Group"))?;
        self.view(&group)
    }

    pub fn list(&self) -> Result<Vec<GroupView>, ApiError> {
        let groups = self.storage.list_groups().map_err(ApiError::DatabaseError)?;
        groups.iter().map(|g| self.view(g)).collect()
    }

    fn view(&self, group: &Group) -> Result<GroupView, ApiError> {
        let members = self
            .storage
            .group_member_ids(&group.id)
            .map_err(ApiError::DatabaseError)?;
        Ok(group.to_view(members))
    }
}
