use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::types::db::session;

/// Append-only persistence of issued tokens.
///
/// Rows are bookkeeping: they are never updated, never pruned on expiry, and
/// never consulted to decide token validity.
pub struct SessionStore {
    db: DatabaseConnection,
}

impl SessionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Record an issued token for a user with the given expiry timestamp
    pub async fn create(
        &self,
        user_id: &str,
        token: &str,
        expires_at: i64,
    ) -> Result<session::Model, ApiError> {
        let new_session = session::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            token: Set(token.to_string()),
            expires_at: Set(expires_at),
            created_at: Set(Utc::now().timestamp()),
        };

        new_session
            .insert(&self.db)
            .await
            .map_err(|e| ApiError::internal(format!("failed to store session: {}", e)))
    }
}
