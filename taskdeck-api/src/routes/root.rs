/// Greeting endpoint
///
/// # Endpoint
///
/// ```text
/// GET /
/// ```

use axum::Json;
use serde::{Deserialize, Serialize};

/// Greeting response
#[derive(Debug, Serialize, Deserialize)]
pub struct GreetingResponse {
    /// Static greeting message
    pub message: String,
}

/// Greeting handler
///
/// Returns a static message so a client can confirm the service is up.
pub async fn greeting() -> Json<GreetingResponse> {
    Json(GreetingResponse {
        message: "taskdeck API is running".to_string(),
    })
}
