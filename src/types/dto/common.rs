use poem_openapi::Object;

/// Response model for the health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Running server version
    pub version: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Envelope for operations that return no data, e.g. deletes
#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct MessageEnvelope {
    pub success: bool,
    pub message: String,
}
