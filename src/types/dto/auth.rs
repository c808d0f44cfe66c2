use poem_openapi::Object;

use crate::types::dto::user::UserResponse;

/// Request model for user registration
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Email address, unique across live accounts
    #[oai(validator(min_length = 3, max_length = 255))]
    pub email: String,

    /// Plaintext password; only its bcrypt hash is ever stored
    #[oai(validator(min_length = 6, max_length = 128))]
    pub password: String,

    /// Display name, split into first/last on the first whitespace
    #[oai(validator(min_length = 1, max_length = 255))]
    pub name: String,
}

/// Public fields of a freshly registered user
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Envelope for the register endpoint
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct RegisterEnvelope {
    pub success: bool,
    pub data: RegisteredUser,
    pub message: String,
}

/// Request model for local login
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct LoginRequest {
    #[oai(validator(min_length = 3, max_length = 255))]
    pub email: String,

    #[oai(validator(min_length = 1, max_length = 128))]
    pub password: String,
}

/// Token plus user payload returned by login
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct LoginData {
    pub token: String,
    pub user: UserResponse,
}

/// Envelope for the login endpoint
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct LoginEnvelope {
    pub success: bool,
    pub data: LoginData,
}

/// Envelope for the Google callback endpoint (token and user are top-level)
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct GoogleCallbackEnvelope {
    pub success: bool,
    pub token: String,
    pub user: UserResponse,
}
