use poem_openapi::Object;

use crate::types::db::department;

/// Request model for department creation
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct CreateDepartmentRequest {
    /// Department name, unique
    #[oai(validator(min_length = 1, max_length = 255))]
    pub name: String,
}

/// Request model for department updates
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct UpdateDepartmentRequest {
    #[oai(validator(min_length = 1, max_length = 255))]
    pub name: Option<String>,
}

/// Public view of a department
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct DepartmentResponse {
    pub id: String,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<&department::Model> for DepartmentResponse {
    fn from(department: &department::Model) -> Self {
        Self {
            id: department.id.clone(),
            name: department.name.clone(),
            created_at: department.created_at,
            updated_at: department.updated_at,
        }
    }
}

/// Envelope for single-department responses
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct DepartmentEnvelope {
    pub success: bool,
    pub data: DepartmentResponse,
}

/// Envelope for department listings
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct DepartmentListEnvelope {
    pub success: bool,
    pub data: Vec<DepartmentResponse>,
}
