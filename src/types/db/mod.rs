// Database entities (sea-orm)
pub mod department;
pub mod role;
pub mod session;
pub mod user;
pub mod user_role;
