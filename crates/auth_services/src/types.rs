use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::jwt::VerificationError;
use crate::password::HashingError;

/// Request structure for user registration
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username for the new account
    #[validate(length(min = 1, max = 255, message = "Username is required"))]
    pub username: String,

    /// Password for the new account
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response structure for a successful registration
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Always `true`; failures are returned as errors
    pub success: bool,
}

/// Request structure for user login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username of the account
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Password for the account
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response structure for a successful login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed bearer token
    pub token: String,
}

/// Request structure for updating a user
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// ID of the user to update
    pub id: Option<Uuid>,

    /// New username
    #[validate(length(min = 1, max = 255, message = "Username must not be empty"))]
    pub username: Option<String>,

    /// New plaintext password, hashed before storage
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: Option<String>,

    /// New account status
    pub status: Option<UserStatus>,
}

/// Request structure for deleting a user
#[derive(Debug, Deserialize)]
pub struct DeleteUserRequest {
    /// ID of the user to delete
    pub id: Option<Uuid>,
}

/// Response structure for user update and delete actions
#[derive(Debug, Serialize, Deserialize)]
pub struct UserActionResponse {
    /// Message describing the result of the action
    pub message: String,
}

/// Account status of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// The account may log in
    Active,
    /// The account is blocked from logging in
    Disabled,
}

impl UserStatus {
    /// Returns the value stored in the `status` column
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Disabled => "disabled",
        }
    }

    /// Parses a stored `status` column value
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(UserStatus::Active),
            "disabled" => Some(UserStatus::Disabled),
            _ => None,
        }
    }
}

/// User model representing the database schema
#[derive(Debug, Clone)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,
    /// Username, unique and case-sensitive
    pub username: String,
    /// Hashed password of the user
    pub password_hash: String,
    /// Account status
    pub status: UserStatus,
    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,
    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

/// Information about the user, used in responses
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    /// Unique identifier for the user
    pub id: Uuid,
    /// Username
    pub username: String,
    /// Account status
    pub status: UserStatus,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            status: user.status,
        }
    }
}

/// Field changes applied by an update. `None` leaves the column untouched.
#[derive(Debug, Default)]
pub struct UserChanges {
    /// New username
    pub username: Option<String>,
    /// New password hash
    pub password_hash: Option<String>,
    /// New status
    pub status: Option<UserStatus>,
}

impl UserChanges {
    /// Whether no column would change
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password_hash.is_none() && self.status.is_none()
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject of the token, the user ID
    pub sub: Uuid,
    /// Username of the user
    pub username: String,
    /// Expiration timestamp of the token (seconds since epoch)
    pub exp: i64,
    /// Issued at timestamp of the token (seconds since epoch)
    pub iat: i64,
}

/// Custom error type for authentication-related errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The username is already taken
    #[error("Username already exists")]
    UsernameExists,

    /// No user with the given username exists
    #[error("Unknown username")]
    UnknownUser,

    /// The username exists but the password does not match, or the account is disabled
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The request carries no bearer token
    #[error("Missing bearer token")]
    MissingToken,

    /// The bearer token failed verification
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] VerificationError),

    /// The user was not found in the system
    #[error("User not found")]
    UserNotFound,

    /// An internal server error occurred
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An error occurred while hashing the password
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] HashingError),

    /// An error occurred while signing a token
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// A stored row could not be mapped to a user
    #[error("Corrupt user record: {0}")]
    CorruptRecord(String),

    /// An error occurred while validating input data
    #[error("Validation error: {0}")]
    Validation(String),
}

const GENERIC_LOGIN_FAILURE: &str = "Invalid username or password";

impl actix_web::ResponseError for AuthError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AuthError::UsernameExists => StatusCode::CONFLICT,
            AuthError::UnknownUser | AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidCredentials | AuthError::InvalidToken(_) => StatusCode::FORBIDDEN,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::HttpResponse;

        let status = self.status_code();
        let body = match self {
            AuthError::UsernameExists => serde_json::json!({
                "error": "username_exists",
                "message": "Username already exists"
            }),
            AuthError::UnknownUser | AuthError::InvalidCredentials => serde_json::json!({
                "error": "invalid_credentials",
                "message": GENERIC_LOGIN_FAILURE
            }),
            AuthError::MissingToken => serde_json::json!({
                "error": "missing_token",
                "message": "Authorization token is required"
            }),
            AuthError::InvalidToken(_) => serde_json::json!({
                "error": "invalid_token",
                "message": "Invalid or expired token"
            }),
            AuthError::UserNotFound => serde_json::json!({
                "error": "user_not_found",
                "message": "User not found"
            }),
            AuthError::Validation(msg) => serde_json::json!({
                "error": "validation_error",
                "message": msg
            }),
            other => {
                log::error!("Internal auth error: {}", other);
                serde_json::json!({
                    "error": "internal_error",
                    "message": "An internal error occurred"
                })
            }
        };

        HttpResponse::build(status).json(body)
    }
}
