use actix_web::{HttpResponse, Result, web};
use validator::Validate;

use auth_services::service::AuthService;
use auth_services::types::*;

/// Handles user registration by validating the request and creating the user.
/// Registration does not log the caller in; a token is only issued by `login`.
pub async fn register(
    auth_service: web::Data<AuthService>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AuthError> {
    // Validate the request
    request
        .validate()
        .map_err(|e| AuthError::Validation(format!("Validation error: {}", e)))?;

    auth_service.register(&request).await?;

    Ok(HttpResponse::Ok().json(RegisterResponse { success: true }))
}

/// Handles user login by validating the request, verifying credentials,
/// and returning a signed bearer token.
pub async fn login(
    auth_service: web::Data<AuthService>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AuthError> {
    // Validate the request
    request
        .validate()
        .map_err(|e| AuthError::Validation(format!("Validation error: {}", e)))?;

    let token = match auth_service.login(&request).await {
        Ok(token) => token,
        Err(e) => {
            log::warn!("Login failed for '{}': {}", request.username, e);
            return Err(e);
        }
    };

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}
