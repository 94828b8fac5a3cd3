use std::sync::Arc;

use uuid::Uuid;

use crate::jwt::JwtService;
use crate::password::PasswordHasher;
use crate::store::UserStore;
use crate::types::{
    AuthError, LoginRequest, RegisterRequest, UpdateUserRequest, User, UserChanges, UserStatus,
};

/// A service for handling user authentication operations such as registering users,
/// verifying credentials, issuing tokens, and managing accounts.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    jwt: JwtService,
}

impl AuthService {
    /// Creates a new instance of `AuthService` over the given store, hasher and token service.
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher, jwt: JwtService) -> Self {
        Self { store, hasher, jwt }
    }

    /// The token service used to sign and verify session tokens
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    /// Registers a new user. Registration never authenticates the caller.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, AuthError> {
        let password_hash = self.hasher.hash_blocking(request.password.clone()).await?;

        let user = self
            .store
            .insert_user(&request.username, &password_hash)
            .await?;

        log::info!("Registered user {} ({})", user.username, user.id);
        Ok(user)
    }

    /// Verifies the user's credentials and issues a session token.
    pub async fn login(&self, request: &LoginRequest) -> Result<String, AuthError> {
        let user = self
            .store
            .find_by_username(&request.username)
            .await?
            .ok_or(AuthError::UnknownUser)?;

        let is_valid = self
            .hasher
            .verify_blocking(request.password.clone(), user.password_hash.clone())
            .await?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        // Checked only after the password so a disabled account is
        // indistinguishable from a wrong password.
        if user.status != UserStatus::Active {
            log::warn!("Login attempt for disabled user {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        self.jwt.generate_access_token(&user)
    }

    /// Lists all users.
    pub async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        self.store.list_users().await
    }

    /// Retrieves a user by ID.
    pub async fn get_user(&self, id: &Uuid) -> Result<User, AuthError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Updates username, password and/or status of a user.
    pub async fn update_user(&self, request: &UpdateUserRequest) -> Result<User, AuthError> {
        let id = request
            .id
            .ok_or_else(|| AuthError::Validation("User ID is required".to_string()))?;

        if request.username.is_none() && request.password.is_none() && request.status.is_none() {
            return Err(AuthError::Validation("No fields to update".to_string()));
        }

        let password_hash = match &request.password {
            Some(password) => Some(self.hasher.hash_blocking(password.clone()).await?),
            None => None,
        };

        let changes = UserChanges {
            username: request.username.clone(),
            password_hash,
            status: request.status,
        };

        self.store
            .update_user(&id, &changes)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Deletes a user by ID.
    pub async fn delete_user(&self, id: Option<Uuid>) -> Result<(), AuthError> {
        let id = id.ok_or_else(|| AuthError::Validation("User ID is required".to_string()))?;

        if !self.store.delete_user(&id).await? {
            return Err(AuthError::UserNotFound);
        }

        log::info!("Deleted user {}", id);
        Ok(())
    }
}
