use serde::{Deserialize, Serialize};

use crate::types::db::role::RoleType;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,

    /// Role types held by the user at token issuance
    pub roles: Vec<RoleType>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Identity derived from a verified bearer token.
///
/// The roles come from the token claims, not from the store: role changes
/// only take effect once the user's token is reissued.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub roles: Vec<RoleType>,
}

impl AuthenticatedUser {
    pub fn has_any_role(&self, allowed: &[RoleType]) -> bool {
        self.roles.iter().any(|role| allowed.contains(role))
    }
}
