use chrono::Utc;
use std::sync::Arc;

use crate::errors::ApiError;
use crate::services::crypto;
use crate::services::google_oauth::GoogleUserInfo;
use crate::services::TokenService;
use crate::stores::{NewUser, SessionStore, UserStore, UserWithRoles};

/// Lifetime of a persisted session row. Independent of the 24-hour expiry
/// embedded in the signed token itself.
const SESSION_TTL_DAYS: i64 = 7;

/// Orchestrates registration, local login and federated login.
///
/// Coordinates the user store, the credential hashing primitives, the token
/// service and the session store. Each flow is a short single-shot sequence
/// with no retries and no partial-completion recovery.
pub struct AuthService {
    user_store: Arc<UserStore>,
    session_store: Arc<SessionStore>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(
        user_store: Arc<UserStore>,
        session_store: Arc<SessionStore>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            user_store,
            session_store,
            token_service,
        }
    }

    /// Register a new local account.
    ///
    /// The email existence check and the insert are two separate statements;
    /// a concurrent duplicate that slips between them is caught by the store
    /// mapping the unique violation to the same Conflict.
    pub async fn register(
        &self,
        email: String,
        password: String,
        name: String,
    ) -> Result<(UserWithRoles, String), ApiError> {
        if self.user_store.find_by_email(&email).await?.is_some() {
            return Err(ApiError::user_exists());
        }

        let password_hash = crypto::hash_password(&password)?;
        let (first_name, last_name) = split_name(&name);

        let user = self
            .user_store
            .create(NewUser {
                email,
                first_name,
                last_name,
                password_hash,
                photo_url: None,
            })
            .await?;

        let token = self.issue_token(&user).await?;

        tracing::info!("registered user {}", user.user.id);

        Ok((user, token))
    }

    /// Authenticate a local account.
    ///
    /// An unknown email and a wrong password fail with the identical error,
    /// so responses never reveal whether an account exists. The flow only
    /// proceeds when the hash comparison affirms a match.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(UserWithRoles, String), ApiError> {
        let user = self
            .user_store
            .find_by_email(email)
            .await?
            .ok_or_else(ApiError::invalid_credentials)?;

        if !crypto::verify_password(password, &user.user.password_hash) {
            return Err(ApiError::invalid_credentials());
        }

        let token = self.issue_token(&user).await?;

        Ok((user, token))
    }

    /// Authenticate or create an account from a federated identity profile.
    ///
    /// A first-time federated user gets a random generated password; only its
    /// hash is stored, so the account has no usable local-login password.
    pub async fn login_with_google(
        &self,
        profile: GoogleUserInfo,
    ) -> Result<(UserWithRoles, String), ApiError> {
        let user = match self.user_store.find_by_email(&profile.email).await? {
            Some(user) => user,
            None => {
                let password_hash = crypto::hash_password(&crypto::generate_random_password())?;

                let user = self
                    .user_store
                    .create(NewUser {
                        email: profile.email,
                        first_name: profile.given_name.unwrap_or_default(),
                        last_name: profile.family_name.unwrap_or_default(),
                        password_hash,
                        photo_url: profile.picture,
                    })
                    .await?;

                tracing::info!("created user {} from federated login", user.user.id);

                user
            }
        };

        let token = self.issue_token(&user).await?;

        Ok((user, token))
    }

    /// Sign a token from the user's role claims and record the session.
    ///
    /// Token validity is self-contained in its signature and expiry; the
    /// session row is advisory bookkeeping, so a failed insert is logged and
    /// the token is still handed to the caller.
    async fn issue_token(&self, user: &UserWithRoles) -> Result<String, ApiError> {
        let token = self.token_service.sign(&user.user.id, user.role_types())?;

        let expires_at = Utc::now().timestamp() + SESSION_TTL_DAYS * 24 * 60 * 60;
        if let Err(e) = self
            .session_store
            .create(&user.user.id, &token, expires_at)
            .await
        {
            tracing::warn!("failed to persist session for user {}: {}", user.user.id, e);
        }

        Ok(token)
    }
}

/// Split a display name into first/last on the first whitespace
pub(crate) fn split_name(name: &str) -> (String, String) {
    match name.trim().split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (name.trim().to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::db::role::RoleType;
    use crate::types::db::{session, user};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
        QueryFilter, Set,
    };
    use uuid::Uuid;

    async fn setup() -> (DatabaseConnection, AuthService) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let user_store = Arc::new(UserStore::new(db.clone()));
        let session_store = Arc::new(SessionStore::new(db.clone()));
        let token_service = Arc::new(TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
        ));

        (
            db,
            AuthService::new(user_store, session_store, token_service),
        )
    }

    async fn seed_default_role(db: &DatabaseConnection) {
        let now = Utc::now().timestamp();
        crate::types::db::role::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set("Employee".to_string()),
            role_type: Set(RoleType::User),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
        .expect("Failed to seed default role");
    }

    fn profile(email: &str) -> GoogleUserInfo {
        serde_json::from_value(serde_json::json!({
            "email": email,
            "given_name": "Grace",
            "family_name": "Hopper",
            "picture": "https://example.com/avatar.png",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_register_never_stores_plaintext_password() {
        let (db, auth) = setup().await;

        let (created, _token) = auth
            .register("a@x.com".to_string(), "secret1".to_string(), "A B".to_string())
            .await
            .unwrap();

        let stored = user::Entity::find_by_id(created.user.id)
            .one(&db)
            .await
            .unwrap()
            .unwrap();

        assert_ne!(stored.password_hash, "secret1");
        assert!(crypto::verify_password("secret1", &stored.password_hash));
    }

    #[tokio::test]
    async fn test_register_splits_name() {
        let (_db, auth) = setup().await;

        let (created, _token) = auth
            .register(
                "a@x.com".to_string(),
                "secret1".to_string(),
                "Ada Lovelace King".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(created.user.first_name, "Ada");
        assert_eq!(created.user.last_name, "Lovelace King");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_conflict_without_second_row() {
        let (db, auth) = setup().await;

        auth.register("a@x.com".to_string(), "secret1".to_string(), "A".to_string())
            .await
            .unwrap();
        let result = auth
            .register("a@x.com".to_string(), "other2".to_string(), "B".to_string())
            .await;

        match result {
            Err(ApiError::Conflict(_)) => {}
            other => panic!("Expected Conflict, got {:?}", other),
        }

        let count = user::Entity::find().count(&db).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_register_persists_session_with_seven_day_expiry() {
        let (db, auth) = setup().await;

        let (created, token) = auth
            .register("a@x.com".to_string(), "secret1".to_string(), "A".to_string())
            .await
            .unwrap();

        let stored = session::Entity::find()
            .filter(session::Column::UserId.eq(created.user.id))
            .one(&db)
            .await
            .unwrap()
            .expect("session row should exist");

        assert_eq!(stored.token, token);

        let expected = Utc::now().timestamp() + 7 * 24 * 60 * 60;
        assert!((stored.expires_at - expected).abs() < 5);
    }

    #[tokio::test]
    async fn test_login_returns_token_for_valid_credentials() {
        let (_db, auth) = setup().await;
        auth.register("a@x.com".to_string(), "secret1".to_string(), "A".to_string())
            .await
            .unwrap();

        let (user, token) = auth.login("a@x.com", "secret1").await.unwrap();

        assert_eq!(user.user.email, "a@x.com");
        assert!(!token.is_empty());
    }

    #[tokio::test]
    async fn test_login_token_carries_role_claims() {
        let (db, auth) = setup().await;
        seed_default_role(&db).await;
        auth.register("a@x.com".to_string(), "secret1".to_string(), "A".to_string())
            .await
            .unwrap();

        let (_user, token) = auth.login("a@x.com", "secret1").await.unwrap();

        let token_service =
            TokenService::new("test-secret-key-minimum-32-characters-long".to_string());
        let claims = token_service.verify(&token).unwrap();
        assert_eq!(claims.roles, vec![RoleType::User]);
    }

    #[tokio::test]
    async fn test_login_failures_share_one_error_shape() {
        let (_db, auth) = setup().await;
        auth.register("a@x.com".to_string(), "secret1".to_string(), "A".to_string())
            .await
            .unwrap();

        let unknown_email = auth.login("nobody@x.com", "secret1").await.unwrap_err();
        let wrong_password = auth.login("a@x.com", "wrong-password").await.unwrap_err();

        assert_eq!(unknown_email.code(), wrong_password.code());
        assert_eq!(unknown_email.message(), wrong_password.message());
        match (unknown_email, wrong_password) {
            (ApiError::Unauthorized(_), ApiError::Unauthorized(_)) => {}
            other => panic!("Expected two Unauthorized errors, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_google_login_creates_user_on_first_visit() {
        let (db, auth) = setup().await;

        let (user, token) = auth.login_with_google(profile("g@x.com")).await.unwrap();

        assert_eq!(user.user.email, "g@x.com");
        assert_eq!(user.user.first_name, "Grace");
        assert_eq!(user.user.last_name, "Hopper");
        assert_eq!(
            user.user.photo_url.as_deref(),
            Some("https://example.com/avatar.png")
        );
        assert!(!token.is_empty());

        let count = user::Entity::find().count(&db).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_google_login_reuses_existing_user() {
        let (db, auth) = setup().await;

        let (first, _) = auth.login_with_google(profile("g@x.com")).await.unwrap();
        let (second, _) = auth.login_with_google(profile("g@x.com")).await.unwrap();

        assert_eq!(first.user.id, second.user.id);

        let count = user::Entity::find().count(&db).await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_google_account_has_no_usable_local_password() {
        let (_db, auth) = setup().await;

        let (user, _) = auth.login_with_google(profile("g@x.com")).await.unwrap();

        // The generated password was hashed and discarded; no guessable
        // plaintext verifies against the stored hash.
        assert!(!crypto::verify_password("", &user.user.password_hash));
        assert!(!crypto::verify_password("password", &user.user.password_hash));
    }

    #[test]
    fn test_split_name_variants() {
        assert_eq!(split_name("Ada Lovelace"), ("Ada".to_string(), "Lovelace".to_string()));
        assert_eq!(split_name("Ada"), ("Ada".to_string(), String::new()));
        assert_eq!(
            split_name("  Ada   Lovelace  "),
            ("Ada".to_string(), "Lovelace".to_string())
        );
    }
}
