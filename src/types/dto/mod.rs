// Wire DTOs (poem-openapi objects)
pub mod auth;
pub mod common;
pub mod department;
pub mod role;
pub mod user;
