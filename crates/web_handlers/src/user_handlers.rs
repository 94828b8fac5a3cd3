use actix_web::{HttpResponse, Result, web};
use uuid::Uuid;
use validator::Validate;

use auth_services::middleware::AuthenticatedUser;
use auth_services::service::AuthService;
use auth_services::types::*;

/// Returns the account of the authenticated caller.
pub async fn get_profile(
    auth_service: web::Data<AuthService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AuthError> {
    let user = auth_service.get_user(&user.id).await?;

    Ok(HttpResponse::Ok().json(UserInfo::from(user)))
}

/// Lists all users without their password hashes.
pub async fn list_users(
    auth_service: web::Data<AuthService>,
    _user: AuthenticatedUser,
) -> Result<HttpResponse, AuthError> {
    let users: Vec<UserInfo> = auth_service
        .list_users()
        .await?
        .into_iter()
        .map(UserInfo::from)
        .collect();

    Ok(HttpResponse::Ok().json(users))
}

/// Fetches a single user by ID.
pub async fn get_user(
    auth_service: web::Data<AuthService>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AuthError> {
    let user = auth_service.get_user(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(UserInfo::from(user)))
}

/// Updates username, password and/or status of the user named in the body.
pub async fn update_user(
    auth_service: web::Data<AuthService>,
    user: AuthenticatedUser,
    request: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::Validation(format!("Validation error: {}", e)))?;

    let updated = auth_service.update_user(&request).await?;
    log::info!("User {} updated by {}", updated.id, user.username);

    Ok(HttpResponse::Ok().json(UserActionResponse {
        message: "User updated".to_string(),
    }))
}

/// Deletes the user named in the body.
pub async fn delete_user(
    auth_service: web::Data<AuthService>,
    user: AuthenticatedUser,
    request: web::Json<DeleteUserRequest>,
) -> Result<HttpResponse, AuthError> {
    log::warn!("🚨 User {} requested deletion of {:?}", user.username, request.id);

    auth_service.delete_user(request.id).await?;

    Ok(HttpResponse::Ok().json(UserActionResponse {
        message: "User deleted".to_string(),
    }))
}
