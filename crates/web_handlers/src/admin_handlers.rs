use actix_web::{HttpResponse, Result};

/// Root endpoint, kept for clients that probe it for liveness
pub async fn root() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().body("API START"))
}

/// Health check endpoint for the booking API
pub async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "service": "booking-api",
        "status": "healthy",
        "timestamp": chrono::Utc::now()
    })))
}
