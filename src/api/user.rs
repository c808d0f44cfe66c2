use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::BearerAuth;
use crate::errors::ApiError;
use crate::services::auth_service::split_name;
use crate::services::AuthGuard;
use crate::stores::{UserChanges, UserStore};
use crate::types::dto::common::MessageEnvelope;
use crate::types::dto::user::{UpdateUserRequest, UserEnvelope, UserResponse};

/// User profile API endpoints
pub struct UserApi {
    user_store: Arc<UserStore>,
    auth_guard: Arc<AuthGuard>,
}

impl UserApi {
    pub fn new(user_store: Arc<UserStore>, auth_guard: Arc<AuthGuard>) -> Self {
        Self {
            user_store,
            auth_guard,
        }
    }

    async fn fetch_user(&self, id: &str) -> Result<UserEnvelope, ApiError> {
        let user = self
            .user_store
            .find_by_id(id)
            .await?
            .ok_or_else(ApiError::user_not_found)?;

        Ok(UserEnvelope {
            success: true,
            data: UserResponse::from(&user),
        })
    }

    async fn apply_update(
        &self,
        id: &str,
        body: UpdateUserRequest,
    ) -> Result<UserEnvelope, ApiError> {
        let (first_name, last_name) = match body.name {
            Some(name) => {
                let (first, last) = split_name(&name);
                (Some(first), Some(last))
            }
            None => (None, None),
        };

        let updated = self
            .user_store
            .update(
                id,
                UserChanges {
                    first_name,
                    last_name,
                    email: body.email,
                    photo_url: body.photo_url,
                    department_id: body.department_id,
                    is_active: body.is_active,
                },
            )
            .await?;

        Ok(UserEnvelope {
            success: true,
            data: UserResponse::from(&updated),
        })
    }
}

#[derive(Tags)]
enum UserTags {
    /// User management endpoints
    Users,
}

#[OpenApi(prefix_path = "/users")]
impl UserApi {
    /// Get the profile of the currently authenticated user
    #[oai(path = "/me", method = "get", tag = "UserTags::Users")]
    async fn me(&self, auth: BearerAuth) -> Result<Json<UserEnvelope>, ApiError> {
        let identity = self.auth_guard.authenticate(&auth.0.token).await?;

        Ok(Json(self.fetch_user(&identity.user_id).await?))
    }

    /// Update the profile of the currently authenticated user
    #[oai(path = "/me", method = "put", tag = "UserTags::Users")]
    async fn update_me(
        &self,
        auth: BearerAuth,
        body: Json<UpdateUserRequest>,
    ) -> Result<Json<UserEnvelope>, ApiError> {
        let identity = self.auth_guard.authenticate(&auth.0.token).await?;

        Ok(Json(self.apply_update(&identity.user_id, body.0).await?))
    }

    /// Delete the currently authenticated user
    #[oai(path = "/me", method = "delete", tag = "UserTags::Users")]
    async fn delete_me(&self, auth: BearerAuth) -> Result<Json<MessageEnvelope>, ApiError> {
        let identity = self.auth_guard.authenticate(&auth.0.token).await?;

        self.user_store.delete(&identity.user_id).await?;

        Ok(Json(MessageEnvelope {
            success: true,
            message: "User deleted successfully".to_string(),
        }))
    }

    /// Get a user profile by id
    #[oai(path = "/:id", method = "get", tag = "UserTags::Users")]
    async fn get_user(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<UserEnvelope>, ApiError> {
        self.auth_guard.authenticate(&auth.0.token).await?;

        Ok(Json(self.fetch_user(&id.0).await?))
    }

    /// Update a user profile by id
    #[oai(path = "/:id", method = "put", tag = "UserTags::Users")]
    async fn update_user(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateUserRequest>,
    ) -> Result<Json<UserEnvelope>, ApiError> {
        self.auth_guard.authenticate(&auth.0.token).await?;

        Ok(Json(self.apply_update(&id.0, body.0).await?))
    }
}
