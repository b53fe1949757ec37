//! Study groups: named collections accounts can belong to.

pub mod service;
pub mod types;

pub use service::GroupService;
pub use types::{Group, GroupId, GroupInput, GroupView};
