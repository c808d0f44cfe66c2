use std::sync::Arc;

use crate::errors::ApiError;
use crate::services::TokenService;
use crate::stores::UserStore;
use crate::types::db::role::RoleType;
use crate::types::internal::auth::AuthenticatedUser;

/// Role set allowed to manage roles and departments
pub const ADMIN_ROLES: &[RoleType] = &[RoleType::Admin, RoleType::SuperAdmin];

/// Derives an authenticated identity from a bearer token and enforces role
/// membership for protected routes.
pub struct AuthGuard {
    token_service: Arc<TokenService>,
    user_store: Arc<UserStore>,
}

impl AuthGuard {
    pub fn new(token_service: Arc<TokenService>, user_store: Arc<UserStore>) -> Self {
        Self {
            token_service,
            user_store,
        }
    }

    /// Authenticate a bearer token.
    ///
    /// An unverifiable token and a token whose user no longer exists are the
    /// same failure: a deleted user's still-valid token must not authenticate.
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, ApiError> {
        let claims = self
            .token_service
            .verify(token)
            .ok_or_else(ApiError::invalid_token)?;

        if self.user_store.find_by_id(&claims.sub).await?.is_none() {
            return Err(ApiError::invalid_token());
        }

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            roles: claims.roles,
        })
    }

    /// Require one of the allowed roles.
    ///
    /// Pure set membership against the token's claims: the store is not
    /// re-queried, so a role change takes effect only when the user's token
    /// is reissued.
    pub fn require_role(
        &self,
        identity: &AuthenticatedUser,
        allowed: &[RoleType],
    ) -> Result<(), ApiError> {
        if identity.has_any_role(allowed) {
            Ok(())
        } else {
            Err(ApiError::forbidden())
        }
    }
}
