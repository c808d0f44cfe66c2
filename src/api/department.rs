use std::sync::Arc;

use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};

use crate::api::BearerAuth;
use crate::errors::ApiError;
use crate::services::auth_guard::ADMIN_ROLES;
use crate::services::AuthGuard;
use crate::stores::DepartmentStore;
use crate::types::dto::common::MessageEnvelope;
use crate::types::dto::department::{
    CreateDepartmentRequest, DepartmentEnvelope, DepartmentListEnvelope, DepartmentResponse,
    UpdateDepartmentRequest,
};

/// Department management API endpoints. Every operation requires an admin
/// role. The `/departaments` spelling is the established public path.
pub struct DepartmentApi {
    department_store: Arc<DepartmentStore>,
    auth_guard: Arc<AuthGuard>,
}

impl DepartmentApi {
    pub fn new(department_store: Arc<DepartmentStore>, auth_guard: Arc<AuthGuard>) -> Self {
        Self {
            department_store,
            auth_guard,
        }
    }

    async fn require_admin(&self, auth: &BearerAuth) -> Result<(), ApiError> {
        let identity = self.auth_guard.authenticate(&auth.0.token).await?;
        self.auth_guard.require_role(&identity, ADMIN_ROLES)
    }
}

#[derive(Tags)]
enum DepartmentTags {
    /// Department management endpoints
    Departments,
}

#[OpenApi]
impl DepartmentApi {
    /// Create a new department
    #[oai(path = "/departaments", method = "post", tag = "DepartmentTags::Departments")]
    async fn create_department(
        &self,
        auth: BearerAuth,
        body: Json<CreateDepartmentRequest>,
    ) -> Result<Json<DepartmentEnvelope>, ApiError> {
        self.require_admin(&auth).await?;

        let department = self.department_store.create(body.0.name).await?;

        Ok(Json(DepartmentEnvelope {
            success: true,
            data: DepartmentResponse::from(&department),
        }))
    }

    /// List all departments
    #[oai(path = "/departaments", method = "get", tag = "DepartmentTags::Departments")]
    async fn list_departments(
        &self,
        auth: BearerAuth,
    ) -> Result<Json<DepartmentListEnvelope>, ApiError> {
        self.require_admin(&auth).await?;

        let departments = self.department_store.find_all().await?;

        Ok(Json(DepartmentListEnvelope {
            success: true,
            data: departments.iter().map(DepartmentResponse::from).collect(),
        }))
    }

    /// Get a department by id
    #[oai(path = "/departaments/:id", method = "get", tag = "DepartmentTags::Departments")]
    async fn get_department(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<DepartmentEnvelope>, ApiError> {
        self.require_admin(&auth).await?;

        let department = self
            .department_store
            .find_by_id(&id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("Department not found"))?;

        Ok(Json(DepartmentEnvelope {
            success: true,
            data: DepartmentResponse::from(&department),
        }))
    }

    /// Update a department by id
    #[oai(path = "/departaments/:id", method = "put", tag = "DepartmentTags::Departments")]
    async fn update_department(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateDepartmentRequest>,
    ) -> Result<Json<DepartmentEnvelope>, ApiError> {
        self.require_admin(&auth).await?;

        let department = self.department_store.update(&id.0, body.0.name).await?;

        Ok(Json(DepartmentEnvelope {
            success: true,
            data: DepartmentResponse::from(&department),
        }))
    }

    /// Delete a department by id
    #[oai(path = "/departaments/:id", method = "delete", tag = "DepartmentTags::Departments")]
    async fn delete_department(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<MessageEnvelope>, ApiError> {
        self.require_admin(&auth).await?;

        self.department_store.delete(&id.0).await?;

        Ok(Json(MessageEnvelope {
            success: true,
            message: "Department deleted successfully".to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::TokenService;
    use crate::stores::{NewUser, UserStore};
    use crate::types::db::role::RoleType;
    use migration::{Migrator, MigratorTrait};
    use poem_openapi::auth::Bearer;
    use sea_orm::Database;

    struct Fixture {
        api: DepartmentApi,
        token_service: Arc<TokenService>,
        user_id: String,
    }

    async fn setup() -> Fixture {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let user_store = Arc::new(UserStore::new(db.clone()));
        let department_store = Arc::new(DepartmentStore::new(db));
        let token_service = Arc::new(TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
        ));
        let auth_guard = Arc::new(AuthGuard::new(token_service.clone(), user_store.clone()));

        let user_id = user_store
            .create(NewUser {
                email: "admin@x.com".to_string(),
                first_name: "Ad".to_string(),
                last_name: "Min".to_string(),
                password_hash: "$2b$10$abcdefghijklmnopqrstuv".to_string(),
                photo_url: None,
            })
            .await
            .expect("Failed to seed user")
            .user
            .id;

        Fixture {
            api: DepartmentApi::new(department_store, auth_guard),
            token_service,
            user_id,
        }
    }

    fn bearer(fixture: &Fixture, roles: Vec<RoleType>) -> BearerAuth {
        let token = fixture.token_service.sign(&fixture.user_id, roles).unwrap();
        BearerAuth(Bearer { token })
    }

    #[tokio::test]
    async fn test_admin_crud_roundtrip() {
        let fixture = setup().await;

        let created = fixture
            .api
            .create_department(
                bearer(&fixture, vec![RoleType::Admin]),
                Json(CreateDepartmentRequest {
                    name: "Engineering".to_string(),
                }),
            )
            .await
            .unwrap();

        let updated = fixture
            .api
            .update_department(
                bearer(&fixture, vec![RoleType::Admin]),
                Path(created.0.data.id.clone()),
                Json(UpdateDepartmentRequest {
                    name: Some("Platform".to_string()),
                }),
            )
            .await
            .unwrap();
        assert_eq!(updated.0.data.name, "Platform");

        fixture
            .api
            .delete_department(
                bearer(&fixture, vec![RoleType::Admin]),
                Path(created.0.data.id.clone()),
            )
            .await
            .unwrap();

        let result = fixture
            .api
            .get_department(
                bearer(&fixture, vec![RoleType::Admin]),
                Path(created.0.data.id),
            )
            .await;
        match result {
            Err(ApiError::NotFound(_)) => {}
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_admin_is_forbidden() {
        let fixture = setup().await;

        let result = fixture
            .api
            .create_department(
                bearer(&fixture, vec![RoleType::Moderator]),
                Json(CreateDepartmentRequest {
                    name: "Engineering".to_string(),
                }),
            )
            .await;

        match result {
            Err(ApiError::Forbidden(_)) => {}
            other => panic!("Expected Forbidden, got {:?}", other),
        }
    }
}
