use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Settings;
use crate::services::{AuthGuard, AuthService, GoogleOAuthService, TokenService};
use crate::stores::{DepartmentStore, RoleStore, SessionStore, UserStore};

/// Centralized application data following the main-owned dependencies pattern.
///
/// Every store and service is constructed exactly once here and shared via
/// Arc; API structs receive the pieces they need as constructor parameters,
/// never instantiating collaborators themselves.
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: Arc<Settings>,
    pub user_store: Arc<UserStore>,
    pub session_store: Arc<SessionStore>,
    pub role_store: Arc<RoleStore>,
    pub department_store: Arc<DepartmentStore>,
    pub token_service: Arc<TokenService>,
    pub google_oauth: Arc<GoogleOAuthService>,
    pub auth_service: Arc<AuthService>,
    pub auth_guard: Arc<AuthGuard>,
}

impl AppData {
    /// Build all stores and services from an established database connection.
    /// The database should be connected and migrated before calling this.
    pub fn init(db: DatabaseConnection, settings: Arc<Settings>) -> Self {
        tracing::debug!("Initializing application data...");

        let user_store = Arc::new(UserStore::new(db.clone()));
        let session_store = Arc::new(SessionStore::new(db.clone()));
        let role_store = Arc::new(RoleStore::new(db.clone()));
        let department_store = Arc::new(DepartmentStore::new(db.clone()));

        let token_service = Arc::new(TokenService::new(settings.jwt_secret.clone()));
        let google_oauth = Arc::new(GoogleOAuthService::new(settings.google.clone()));

        let auth_service = Arc::new(AuthService::new(
            user_store.clone(),
            session_store.clone(),
            token_service.clone(),
        ));
        let auth_guard = Arc::new(AuthGuard::new(token_service.clone(), user_store.clone()));

        tracing::debug!("Application data initialized");

        Self {
            db,
            settings,
            user_store,
            session_store,
            role_store,
            department_store,
            token_service,
            google_oauth,
            auth_service,
            auth_guard,
        }
    }
}
