use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::BearerAuth;
use crate::errors::ApiError;
use crate::services::auth_guard::ADMIN_ROLES;
use crate::services::AuthGuard;
use crate::stores::RoleStore;
use crate::types::dto::common::MessageEnvelope;
use crate::types::dto::role::{
    CreateRoleRequest, RoleEnvelope, RoleListEnvelope, RoleResponse, UpdateRoleRequest,
};

/// Role management API endpoints. Every operation requires an admin role.
pub struct RoleApi {
    role_store: Arc<RoleStore>,
    auth_guard: Arc<AuthGuard>,
}

impl RoleApi {
    pub fn new(role_store: Arc<RoleStore>, auth_guard: Arc<AuthGuard>) -> Self {
        Self {
            role_store,
            auth_guard,
        }
    }

    async fn require_admin(&self, auth: &BearerAuth) -> Result<(), ApiError> {
        let identity = self.auth_guard.authenticate(&auth.0.token).await?;
        self.auth_guard.require_role(&identity, ADMIN_ROLES)
    }
}

#[derive(Tags)]
enum RoleTags {
    /// Role management endpoints
    Roles,
}

#[OpenApi]
impl RoleApi {
    /// Create a new role
    #[oai(path = "/roles", method = "post", tag = "RoleTags::Roles")]
    async fn create_role(
        &self,
        auth: BearerAuth,
        body: Json<CreateRoleRequest>,
    ) -> Result<Json<RoleEnvelope>, ApiError> {
        self.require_admin(&auth).await?;

        let role = self.role_store.create(body.0.name, body.0.role_type).await?;

        Ok(Json(RoleEnvelope {
            success: true,
            data: RoleResponse::from(&role),
        }))
    }

    /// List all roles
    #[oai(path = "/roles", method = "get", tag = "RoleTags::Roles")]
    async fn list_roles(&self, auth: BearerAuth) -> Result<Json<RoleListEnvelope>, ApiError> {
        self.require_admin(&auth).await?;

        let roles = self.role_store.find_all().await?;

        Ok(Json(RoleListEnvelope {
            success: true,
            data: roles.iter().map(RoleResponse::from).collect(),
        }))
    }

    /// Get a role by id
    #[oai(path = "/roles/:id", method = "get", tag = "RoleTags::Roles")]
    async fn get_role(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<RoleEnvelope>, ApiError> {
        self.require_admin(&auth).await?;

        let role = self
            .role_store
            .find_by_id(&id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("Role not found"))?;

        Ok(Json(RoleEnvelope {
            success: true,
            data: RoleResponse::from(&role),
        }))
    }

    /// Update a role by id
    #[oai(path = "/roles/:id", method = "put", tag = "RoleTags::Roles")]
    async fn update_role(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateRoleRequest>,
    ) -> Result<Json<RoleEnvelope>, ApiError> {
        self.require_admin(&auth).await?;

        let role = self
            .role_store
            .update(&id.0, body.0.name, body.0.role_type)
            .await?;

        Ok(Json(RoleEnvelope {
            success: true,
            data: RoleResponse::from(&role),
        }))
    }

    /// Delete a role by id
    #[oai(path = "/roles/:id", method = "delete", tag = "RoleTags::Roles")]
    async fn delete_role(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<MessageEnvelope>, ApiError> {
        self.require_admin(&auth).await?;

        self.role_store.delete(&id.0).await?;

        Ok(Json(MessageEnvelope {
            success: true,
            message: "Role deleted successfully".to_string(),
        }))
    }
}
