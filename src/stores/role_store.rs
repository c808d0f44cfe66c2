use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::stores::is_unique_violation;
use crate::types::db::role::{self, RoleType};

/// Administrator-managed CRUD over the fixed role catalogue
pub struct RoleStore {
    db: DatabaseConnection,
}

impl RoleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: String, role_type: RoleType) -> Result<role::Model, ApiError> {
        let now = Utc::now().timestamp();

        let new_role = role::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(name),
            role_type: Set(role_type),
            created_at: Set(now),
            updated_at: Set(now),
        };

        new_role.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict("Role name already exists")
            } else {
                ApiError::internal(format!("failed to insert role: {}", e))
            }
        })
    }

    pub async fn find_all(&self) -> Result<Vec<role::Model>, ApiError> {
        role::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| ApiError::internal(format!("failed to list roles: {}", e)))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<role::Model>, ApiError> {
        role::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ApiError::internal(format!("failed to query role: {}", e)))
    }

    pub async fn update(
        &self,
        id: &str,
        name: Option<String>,
        role_type: Option<RoleType>,
    ) -> Result<role::Model, ApiError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Role not found"))?;

        let mut active: role::ActiveModel = existing.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(role_type) = role_type {
            active.role_type = Set(role_type);
        }
        active.updated_at = Set(Utc::now().timestamp());

        active.update(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict("Role name already exists")
            } else {
                ApiError::internal(format!("failed to update role: {}", e))
            }
        })
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Role not found"))?;

        role::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await
            .map_err(|e| ApiError::internal(format!("failed to delete role: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_test_db() -> RoleStore {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        RoleStore::new(db)
    }

    #[tokio::test]
    async fn test_create_and_find_roundtrip() {
        let store = setup_test_db().await;

        let created = store
            .create("Administrators".to_string(), RoleType::Admin)
            .await
            .unwrap();

        let found = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Administrators");
        assert_eq!(found.role_type, RoleType::Admin);
    }

    #[tokio::test]
    async fn test_create_duplicate_name_is_conflict() {
        let store = setup_test_db().await;
        store
            .create("Employee".to_string(), RoleType::User)
            .await
            .unwrap();

        let result = store.create("Employee".to_string(), RoleType::Guest).await;

        match result {
            Err(ApiError::Conflict(_)) => {}
            other => panic!("Expected Conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_find_all_lists_every_role() {
        let store = setup_test_db().await;
        store.create("Employee".to_string(), RoleType::User).await.unwrap();
        store.create("Managers".to_string(), RoleType::Manager).await.unwrap();

        let roles = store.find_all().await.unwrap();

        assert_eq!(roles.len(), 2);
    }

    #[tokio::test]
    async fn test_update_changes_only_given_fields() {
        let store = setup_test_db().await;
        let created = store
            .create("Employee".to_string(), RoleType::User)
            .await
            .unwrap();

        let updated = store
            .update(&created.id, None, Some(RoleType::Moderator))
            .await
            .unwrap();

        assert_eq!(updated.name, "Employee");
        assert_eq!(updated.role_type, RoleType::Moderator);
    }

    #[tokio::test]
    async fn test_update_missing_role_is_not_found() {
        let store = setup_test_db().await;

        let result = store.update("no-such-id", None, None).await;

        match result {
            Err(ApiError::NotFound(_)) => {}
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_removes_role() {
        let store = setup_test_db().await;
        let created = store
            .create("Employee".to_string(), RoleType::User)
            .await
            .unwrap();

        store.delete(&created.id).await.unwrap();

        assert!(store.find_by_id(&created.id).await.unwrap().is_none());
    }
}
