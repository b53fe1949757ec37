use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Group identifier - opaque uuid string.
pub type GroupId = String;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub description: String,
    pub created_at: u64,
}

impl Group {
    pub fn new(input: GroupInput) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            description: input.description,
            created_at: current_timestamp(),
        }
    }

    pub fn to_view(&self, members: Vec<String>) -> GroupView {
        GroupView {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            members,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct GroupInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Public view of a group. Membership is observed, not owned: the member
/// list is derived from the stored edges at read time.
#[derive(Serialize, Clone, Debug)]
pub struct GroupView {
    pub id: GroupId,
    pub name: String,
    pub description: String,
    pub members: Vec<String>,
}

fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as u64
}
