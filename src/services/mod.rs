// Services layer - business logic and orchestration
pub mod auth_guard;
pub mod auth_service;
pub mod crypto;
pub mod google_oauth;
pub mod token_service;

pub use auth_guard::AuthGuard;
pub use auth_service::AuthService;
pub use google_oauth::GoogleOAuthService;
pub use token_service::TokenService;
