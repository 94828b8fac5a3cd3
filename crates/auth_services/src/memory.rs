//! In-memory [`UserStore`] used by tests across the workspace.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::store::UserStore;
use crate::types::{AuthError, User, UserChanges, UserStatus};

/// A [`UserStore`] holding users in a mutex-guarded vector.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    /// Whether the store holds no users
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert_user(&self, username: &str, password_hash: &str) -> Result<User, AuthError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == username) {
            return Err(AuthError::UsernameExists);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.id == id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn update_user(
        &self,
        id: &Uuid,
        changes: &UserChanges,
    ) -> Result<Option<User>, AuthError> {
        let mut users = self.users.lock().unwrap();

        if let Some(username) = &changes.username {
            if users.iter().any(|u| &u.username == username && &u.id != id) {
                return Err(AuthError::UsernameExists);
            }
        }

        let Some(user) = users.iter_mut().find(|u| &u.id == id) else {
            return Ok(None);
        };
        if let Some(username) = &changes.username {
            user.username = username.clone();
        }
        if let Some(password_hash) = &changes.password_hash {
            user.password_hash = password_hash.clone();
        }
        if let Some(status) = changes.status {
            user.status = status;
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: &Uuid) -> Result<bool, AuthError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| &u.id != id);
        Ok(users.len() != before)
    }
}
