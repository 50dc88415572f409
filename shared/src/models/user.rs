//! User Model

use serde::{Deserialize, Serialize};

/// Account status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

/// Staff user entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub tenant_id: String,
    pub name: String,
    pub email: String,
    pub status: UserStatus,
    /// Comma separated role names
    pub roles: String,
}

/// Create / replace user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default = "default_roles")]
    pub roles: String,
}

fn default_roles() -> String {
    "staff".to_string()
}
