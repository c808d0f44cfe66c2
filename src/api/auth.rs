use std::sync::Arc;

use poem_openapi::{param::Query, payload::Json, ApiResponse, OpenApi, Tags};

use crate::errors::ApiError;
use crate::services::{AuthService, GoogleOAuthService};
use crate::types::dto::auth::{
    GoogleCallbackEnvelope, LoginData, LoginEnvelope, LoginRequest, RegisterEnvelope,
    RegisterRequest, RegisteredUser,
};
use crate::types::dto::user::UserResponse;

/// Authentication API endpoints
pub struct AuthApi {
    auth_service: Arc<AuthService>,
    google_oauth: Arc<GoogleOAuthService>,
}

impl AuthApi {
    pub fn new(auth_service: Arc<AuthService>, google_oauth: Arc<GoogleOAuthService>) -> Self {
        Self {
            auth_service,
            google_oauth,
        }
    }
}

#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

/// Redirect to the provider consent screen
#[derive(ApiResponse)]
pub enum GoogleRedirect {
    #[oai(status = 302)]
    Found(#[oai(header = "Location")] String),
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Register a new user account
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(
        &self,
        body: Json<RegisterRequest>,
    ) -> Result<Json<RegisterEnvelope>, ApiError> {
        let (user, _token) = self
            .auth_service
            .register(body.0.email, body.0.password, body.0.name)
            .await?;

        Ok(Json(RegisterEnvelope {
            success: true,
            data: RegisteredUser {
                id: user.user.id,
                email: user.user.email,
                first_name: user.user.first_name,
                last_name: user.user.last_name,
            },
            message: "User registered successfully".to_string(),
        }))
    }

    /// Login with email and password to receive an authentication token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<LoginEnvelope>, ApiError> {
        let (user, token) = self.auth_service.login(&body.0.email, &body.0.password).await?;

        Ok(Json(LoginEnvelope {
            success: true,
            data: LoginData {
                token,
                user: UserResponse::from(&user.user),
            },
        }))
    }

    /// Redirect to the Google consent screen
    #[oai(path = "/google", method = "get", tag = "AuthTags::Authentication")]
    async fn google(&self) -> GoogleRedirect {
        GoogleRedirect::Found(self.google_oauth.authorize_url())
    }

    /// Complete the Google login: exchange the code, fetch the profile, then
    /// log in or register the matching user
    #[oai(path = "/google/callback", method = "get", tag = "AuthTags::Authentication")]
    async fn google_callback(
        &self,
        code: Query<Option<String>>,
    ) -> Result<Json<GoogleCallbackEnvelope>, ApiError> {
        let code = code.0.ok_or_else(|| ApiError::bad_request("No code provided"))?;

        let tokens = self.google_oauth.exchange_code(&code).await?;
        let profile = self.google_oauth.fetch_profile(&tokens.access_token).await?;
        let (user, token) = self.auth_service.login_with_google(profile).await?;

        Ok(Json(GoogleCallbackEnvelope {
            success: true,
            token,
            user: UserResponse::from(&user.user),
        }))
    }
}
