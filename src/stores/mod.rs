// Stores layer - persistence access per entity
pub mod department_store;
pub mod role_store;
pub mod session_store;
pub mod user_store;

pub use department_store::DepartmentStore;
pub use role_store::RoleStore;
pub use session_store::SessionStore;
pub use user_store::{NewUser, UserChanges, UserStore, UserWithRoles};

/// True when a database error is a uniqueness-constraint violation.
/// Matches the wording of both the SQLite and Postgres drivers.
pub(crate) fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    let message = err.to_string();
    message.contains("UNIQUE") || message.contains("unique") || message.contains("duplicate")
}
