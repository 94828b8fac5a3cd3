use sqlx::migrate::MigrateError;
use sqlx::{PgPool, Row};

/// Creates a connection pool to the PostgreSQL database at `database_url`.
pub async fn create_connection_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Tests the database connection by executing a simple query.
pub async fn test_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    let row = sqlx::query("SELECT 1 as test").fetch_one(pool).await?;

    let test_value: i32 = row.get("test");
    log::info!("✅ Database connection successful! Test value: {}", test_value);

    Ok(())
}

/// Applies the embedded schema migrations that have not run yet.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
