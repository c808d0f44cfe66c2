use poem_openapi::Object;

use crate::types::db::role::{self, RoleType};

/// Request model for role creation
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct CreateRoleRequest {
    /// Role name
    #[oai(validator(min_length = 1, max_length = 255))]
    pub name: String,

    /// Role type
    pub role_type: RoleType,
}

/// Request model for role updates
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    #[oai(validator(min_length = 1, max_length = 255))]
    pub name: Option<String>,

    pub role_type: Option<RoleType>,
}

/// Public view of a role
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct RoleResponse {
    pub id: String,
    pub name: String,
    pub role_type: RoleType,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<&role::Model> for RoleResponse {
    fn from(role: &role::Model) -> Self {
        Self {
            id: role.id.clone(),
            name: role.name.clone(),
            role_type: role.role_type,
            created_at: role.created_at,
            updated_at: role.updated_at,
        }
    }
}

/// Envelope for single-role responses
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct RoleEnvelope {
    pub success: bool,
    pub data: RoleResponse,
}

/// Envelope for role listings
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct RoleListEnvelope {
    pub success: bool,
    pub data: Vec<RoleResponse>,
}
