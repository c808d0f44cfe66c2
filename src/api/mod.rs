// API layer - HTTP endpoints
pub mod auth;
pub mod department;
pub mod health;
pub mod role;
pub mod user;

use std::sync::Arc;

use poem::Route;
use poem_openapi::{auth::Bearer, OpenApiService, SecurityScheme};

pub use auth::AuthApi;
pub use department::DepartmentApi;
pub use health::HealthApi;
pub use role::RoleApi;
pub use user::UserApi;

use crate::app_data::AppData;

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// Compose the routed application: the OpenAPI service nested under the
/// configured API prefix, plus Swagger UI under /swagger.
pub fn build_app(app_data: &Arc<AppData>) -> Route {
    let api_service = OpenApiService::new(
        (
            HealthApi,
            AuthApi::new(
                app_data.auth_service.clone(),
                app_data.google_oauth.clone(),
            ),
            UserApi::new(app_data.user_store.clone(), app_data.auth_guard.clone()),
            RoleApi::new(app_data.role_store.clone(), app_data.auth_guard.clone()),
            DepartmentApi::new(
                app_data.department_store.clone(),
                app_data.auth_guard.clone(),
            ),
        ),
        "Teampulse API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!(
        "http://localhost:{}{}",
        app_data.settings.port, app_data.settings.api_prefix
    ));

    let ui = api_service.swagger_ui();

    Route::new()
        .nest(app_data.settings.api_prefix.clone(), api_service)
        .nest("/swagger", ui)
}
