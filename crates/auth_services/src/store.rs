use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::types::{AuthError, User, UserChanges, UserStatus};

/// Postgres SQLSTATE for a unique constraint violation
const UNIQUE_VIOLATION: &str = "23505";

/// Persistence for user accounts.
///
/// Username uniqueness is enforced by the store; a violation surfaces as
/// [`AuthError::UsernameExists`] from both insert and update.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new active user.
    async fn insert_user(&self, username: &str, password_hash: &str) -> Result<User, AuthError>;

    /// Looks up a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError>;

    /// Looks up a user by ID.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, AuthError>;

    /// Lists all users ordered by creation time.
    async fn list_users(&self) -> Result<Vec<User>, AuthError>;

    /// Applies `changes` to a user, returning `None` if the ID is unknown.
    async fn update_user(&self, id: &Uuid, changes: &UserChanges)
    -> Result<Option<User>, AuthError>;

    /// Deletes a user, returning whether a row was removed.
    async fn delete_user(&self, id: &Uuid) -> Result<bool, AuthError>;
}

/// [`UserStore`] backed by the `users` table.
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Creates a new store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(sqlstate: Option<&str>) -> bool {
    sqlstate == Some(UNIQUE_VIOLATION)
}

fn map_unique_violation(err: sqlx::Error) -> AuthError {
    match &err {
        sqlx::Error::Database(db_err) if is_unique_violation(db_err.code().as_deref()) => {
            AuthError::UsernameExists
        }
        _ => AuthError::Database(err),
    }
}

fn user_from_row(row: &PgRow) -> Result<User, AuthError> {
    let status: String = row.get("status");
    let status = UserStatus::parse(&status)
        .ok_or_else(|| AuthError::CorruptRecord(format!("unknown user status '{}'", status)))?;

    Ok(User {
        id: row.get("id"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        status,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert_user(&self, username: &str, password_hash: &str) -> Result<User, AuthError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, status)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, status, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(UserStatus::Active.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        user_from_row(&row)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, status, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash, status, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, password_hash, status, created_at, updated_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(user_from_row).collect()
    }

    async fn update_user(
        &self,
        id: &Uuid,
        changes: &UserChanges,
    ) -> Result<Option<User>, AuthError> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE users SET ");
        let mut set = builder.separated(", ");
        if let Some(username) = &changes.username {
            set.push("username = ").push_bind_unseparated(username);
        }
        if let Some(password_hash) = &changes.password_hash {
            set.push("password_hash = ")
                .push_bind_unseparated(password_hash);
        }
        if let Some(status) = changes.status {
            set.push("status = ").push_bind_unseparated(status.as_str());
        }
        set.push("updated_at = NOW()");

        builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING id, username, password_hash, status, created_at, updated_at");

        let row = builder
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_unique_violation)?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn delete_user(&self, id: &Uuid) -> Result<bool, AuthError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_unique_violation_sqlstate_is_a_conflict() {
        assert!(is_unique_violation(Some("23505")));
        // foreign key and not-null violations are ordinary storage errors
        assert!(!is_unique_violation(Some("23503")));
        assert!(!is_unique_violation(Some("23502")));
        assert!(!is_unique_violation(None));
    }

    #[test]
    fn test_non_database_errors_stay_internal() {
        assert!(matches!(
            map_unique_violation(sqlx::Error::RowNotFound),
            AuthError::Database(sqlx::Error::RowNotFound)
        ));
        assert!(matches!(
            map_unique_violation(sqlx::Error::PoolTimedOut),
            AuthError::Database(_)
        ));
    }
}
