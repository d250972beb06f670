use serde::Deserialize;

use crate::role::{RoleId, NO_MATCH};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_name: String,
    pub full_name: Option<String>,
    pub email_address: Option<String>,
    pub enabled: bool,
    pub is_admin: bool,
    pub data_role_id: RoleId,
    #[serde(default)]
    pub function_role_ids: Vec<RoleId>,
    #[serde(default)]
    pub web_function_role_ids: Vec<RoleId>,
}

impl User {
    pub fn full_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(NO_MATCH)
    }

    pub fn email(&self) -> &str {
        self.email_address.as_deref().unwrap_or(NO_MATCH)
    }
}
