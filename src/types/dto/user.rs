use poem_openapi::Object;

use crate::types::db::user;

/// Public view of a user record. Never includes the password hash.
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub photo_url: Option<String>,
    pub department_id: Option<String>,
    pub is_active: bool,
}

impl From<&user::Model> for UserResponse {
    fn from(user: &user::Model) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            photo_url: user.photo_url.clone(),
            department_id: user.department_id.clone(),
            is_active: user.is_active,
        }
    }
}

/// Envelope for single-user responses
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct UserEnvelope {
    pub success: bool,
    pub data: UserResponse,
}

/// Request model for profile updates. All fields optional; `name` is split
/// into first/last name on the first whitespace.
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[oai(validator(min_length = 1, max_length = 255))]
    pub name: Option<String>,

    #[oai(validator(min_length = 3, max_length = 255))]
    pub email: Option<String>,

    #[oai(validator(max_length = 1024))]
    pub photo_url: Option<String>,

    pub department_id: Option<String>,

    pub is_active: Option<bool>,
}
