use thiserror::Error;

/// Startup and infrastructure failures. These never reach an HTTP response;
/// they abort process bootstrap in main.
#[derive(Debug, Error)]
pub enum InternalError {
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),

    #[error("invalid value {value:?} for environment variable {name}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("database error during {operation}")]
    Database {
        operation: &'static str,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

impl InternalError {
    pub fn database(operation: &'static str, source: sea_orm::DbErr) -> Self {
        InternalError::Database { operation, source }
    }
}
