use std::sync::Arc;

use poem::{listener::TcpListener, Server};

use teampulse_backend::api;
use teampulse_backend::app_data::AppData;
use teampulse_backend::config::{self, Settings};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    config::init_logging().expect("Failed to initialize logging");

    let settings = Arc::new(Settings::from_env().expect("Failed to load settings"));
    tracing::info!("Loaded {}", settings);

    let db = config::init_database(&settings)
        .await
        .expect("Failed to connect to database");
    config::migrate_database(&db)
        .await
        .expect("Failed to run migrations");

    let app_data = Arc::new(AppData::init(db, settings.clone()));
    let app = api::build_app(&app_data);

    tracing::info!(
        "Starting server on http://0.0.0.0:{} (API at {}, Swagger UI at /swagger)",
        settings.port,
        settings.api_prefix
    );

    Server::new(TcpListener::bind(format!("0.0.0.0:{}", settings.port)))
        .run(app)
        .await
}
