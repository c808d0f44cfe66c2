use std::env;

use crate::errors::InternalError;

const DEFAULT_DATABASE_URL: &str = "sqlite://teampulse.db?mode=rwc";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_API_PREFIX: &str = "/api";

/// Process-wide configuration, read once at startup and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub api_prefix: String,
    pub google: GoogleSettings,
}

/// Google OAuth client configuration. Empty values leave local auth working
/// and make the federated path fail at the provider exchange.
#[derive(Debug, Clone, Default)]
pub struct GoogleSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl Settings {
    /// Load settings from the process environment. `JWT_SECRET` is the only
    /// required variable; everything else has a development default.
    pub fn from_env() -> Result<Self, InternalError> {
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| InternalError::MissingEnv("JWT_SECRET"))?;

        let port = match env::var("PORT") {
            Ok(value) => value.parse().map_err(|_| InternalError::InvalidEnv {
                name: "PORT",
                value,
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            port,
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| DEFAULT_API_PREFIX.to_string()),
            google: GoogleSettings {
                client_id: env::var("GOOGLE_CLIENT_ID").unwrap_or_default(),
                client_secret: env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default(),
                redirect_uri: env::var("GOOGLE_REDIRECT_URI").unwrap_or_default(),
            },
        })
    }
}

impl std::fmt::Display for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Settings {{ port: {}, api_prefix: {}, jwt_secret: <redacted>, google_client_secret: <redacted> }}",
            self.port, self.api_prefix
        )
    }
}
