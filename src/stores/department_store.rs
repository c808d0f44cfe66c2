use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::stores::is_unique_violation;
use crate::types::db::department;

/// Administrator-managed CRUD over departments
pub struct DepartmentStore {
    db: DatabaseConnection,
}

impl DepartmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: String) -> Result<department::Model, ApiError> {
        let now = Utc::now().timestamp();

        let new_department = department::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(name),
            created_at: Set(now),
            updated_at: Set(now),
        };

        new_department.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict("Department name already exists")
            } else {
                ApiError::internal(format!("failed to insert department: {}", e))
            }
        })
    }

    pub async fn find_all(&self) -> Result<Vec<department::Model>, ApiError> {
        department::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| ApiError::internal(format!("failed to list departments: {}", e)))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<department::Model>, ApiError> {
        department::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ApiError::internal(format!("failed to query department: {}", e)))
    }

    pub async fn update(&self, id: &str, name: Option<String>) -> Result<department::Model, ApiError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Department not found"))?;

        let mut active: department::ActiveModel = existing.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        active.updated_at = Set(Utc::now().timestamp());

        active.update(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict("Department name already exists")
            } else {
                ApiError::internal(format!("failed to update department: {}", e))
            }
        })
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Department not found"))?;

        department::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await
            .map_err(|e| ApiError::internal(format!("failed to delete department: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_test_db() -> DepartmentStore {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        DepartmentStore::new(db)
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let store = setup_test_db().await;

        store.create("Engineering".to_string()).await.unwrap();
        store.create("Sales".to_string()).await.unwrap();

        let departments = store.find_all().await.unwrap();
        assert_eq!(departments.len(), 2);
    }

    #[tokio::test]
    async fn test_create_duplicate_name_is_conflict() {
        let store = setup_test_db().await;
        store.create("Engineering".to_string()).await.unwrap();

        let result = store.create("Engineering".to_string()).await;

        match result {
            Err(ApiError::Conflict(_)) => {}
            other => panic!("Expected Conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_renames_department() {
        let store = setup_test_db().await;
        let created = store.create("Engineering".to_string()).await.unwrap();

        let updated = store
            .update(&created.id, Some("Platform Engineering".to_string()))
            .await
            .unwrap();

        assert_eq!(updated.name, "Platform Engineering");
    }

    #[tokio::test]
    async fn test_delete_missing_department_is_not_found() {
        let store = setup_test_db().await;

        let result = store.delete("no-such-id").await;

        match result {
            Err(ApiError::NotFound(_)) => {}
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }
}
