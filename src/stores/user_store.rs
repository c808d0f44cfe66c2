use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::stores::is_unique_violation;
use crate::types::db::role::{self, RoleType};
use crate::types::db::{user, user_role};

/// Fields required to insert a user row. The password must already be hashed
/// by the caller; this store never sees a plaintext password.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub photo_url: Option<String>,
}

/// Partial update for a user row. None leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub department_id: Option<String>,
    pub is_active: Option<bool>,
}

/// User row together with its eagerly loaded role assignments
#[derive(Debug, Clone)]
pub struct UserWithRoles {
    pub user: user::Model,
    pub roles: Vec<role::Model>,
}

impl UserWithRoles {
    pub fn role_types(&self) -> Vec<RoleType> {
        self.roles.iter().map(|role| role.role_type).collect()
    }
}

/// Persistence access for user records and their role associations.
///
/// Every lookup, update and delete filters out soft-deleted rows; a deleted
/// user is indistinguishable from one that never existed.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Look up a live user by email, eagerly resolving role assignments
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserWithRoles>, ApiError> {
        let mut rows = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::IsDeleted.eq(false))
            .find_with_related(role::Entity)
            .all(&self.db)
            .await
            .map_err(|e| ApiError::internal(format!("failed to query user by email: {}", e)))?;

        Ok(rows.pop().map(|(user, roles)| UserWithRoles { user, roles }))
    }

    /// Look up a live user by id
    pub async fn find_by_id(&self, id: &str) -> Result<Option<user::Model>, ApiError> {
        user::Entity::find()
            .filter(user::Column::Id.eq(id))
            .filter(user::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await
            .map_err(|e| ApiError::internal(format!("failed to query user by id: {}", e)))
    }

    /// Insert a new user and best-effort assign the default role.
    ///
    /// The register flow checks for an existing email before calling this,
    /// but that check-then-insert pair is not atomic: a concurrent duplicate
    /// registration is caught here by the unique constraint and reported as
    /// the same Conflict.
    pub async fn create(&self, data: NewUser) -> Result<UserWithRoles, ApiError> {
        let now = Utc::now().timestamp();

        let new_user = user::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            email: Set(data.email),
            first_name: Set(data.first_name),
            last_name: Set(data.last_name),
            password_hash: Set(data.password_hash),
            photo_url: Set(data.photo_url),
            department_id: Set(None),
            is_active: Set(true),
            is_deleted: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let user = new_user.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::user_exists()
            } else {
                ApiError::internal(format!("failed to insert user: {}", e))
            }
        })?;

        let roles = self.assign_default_role(&user).await;

        Ok(UserWithRoles { user, roles })
    }

    /// Link the new user to the default role (role_type USER).
    /// A missing role or a failed insert must not fail user creation.
    async fn assign_default_role(&self, user: &user::Model) -> Vec<role::Model> {
        let default_role = role::Entity::find()
            .filter(role::Column::RoleType.eq(RoleType::User))
            .one(&self.db)
            .await;

        let role = match default_role {
            Ok(Some(role)) => role,
            Ok(None) => {
                tracing::warn!("default role not found, user {} created without a role", user.id);
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("default role lookup failed for user {}: {}", user.id, e);
                return Vec::new();
            }
        };

        let link = user_role::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user.id.clone()),
            role_id: Set(role.id.clone()),
            created_at: Set(Utc::now().timestamp()),
        };

        match link.insert(&self.db).await {
            Ok(_) => vec![role],
            Err(e) => {
                tracing::warn!("default role assignment failed for user {}: {}", user.id, e);
                Vec::new()
            }
        }
    }

    /// Apply a partial update to a live user row
    pub async fn update(&self, id: &str, changes: UserChanges) -> Result<user::Model, ApiError> {
        let user = self
            .find_by_id(id)
            .await?
            .ok_or_else(ApiError::user_not_found)?;

        let mut active: user::ActiveModel = user.into();
        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(photo_url) = changes.photo_url {
            active.photo_url = Set(Some(photo_url));
        }
        if let Some(department_id) = changes.department_id {
            active.department_id = Set(Some(department_id));
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().timestamp());

        active.update(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::user_exists()
            } else {
                ApiError::internal(format!("failed to update user: {}", e))
            }
        })
    }

    /// Soft-delete a user. The row is kept but becomes invisible to every
    /// lookup; repeating the lookup stays absent.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let user = self
            .find_by_id(id)
            .await?
            .ok_or_else(ApiError::user_not_found)?;

        let mut active: user::ActiveModel = user.into();
        active.is_active = Set(false);
        active.is_deleted = Set(true);
        active.updated_at = Set(Utc::now().timestamp());

        active
            .update(&self.db)
            .await
            .map_err(|e| ApiError::internal(format!("failed to delete user: {}", e)))?;

        Ok(())
    }
}
