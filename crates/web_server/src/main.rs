//! Main entry point for the taxi booking API server.
//! Wires configuration, storage and services into the actix-web application.

mod config;
mod cors;

use std::sync::Arc;

use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use auth_services::jwt::JwtService;
use auth_services::middleware::AuthMiddleware;
use auth_services::password::PasswordHasher;
use auth_services::service::AuthService;
use auth_services::store::PgUserStore;
use booking_services::service::BookingService;
use booking_services::store::PgBookingStore;
use postgres::database::*;
use web_handlers::routes::configure_routes;

use crate::config::AppConfig;
use crate::cors::cors_policy;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    log::info!("🚀 Starting taxi booking API server...");

    let config = AppConfig::from_env().context("invalid configuration")?;

    // Create database connection pool
    let pool = create_connection_pool(&config.database_url)
        .await
        .context("failed to create database pool; check DATABASE_URL and that PostgreSQL is running")?;
    log::info!("🗃️ Database pool created successfully");

    if let Err(e) = test_connection(&pool).await {
        log::error!("❌ Database connection test failed: {}", e);
    }

    run_migrations(&pool)
        .await
        .context("failed to apply database migrations")?;
    log::info!("📜 Database migrations applied");

    let hasher = PasswordHasher::new(config.bcrypt_cost).context("invalid bcrypt cost")?;
    let jwt = JwtService::new(config.jwt_secret.as_bytes(), config.token_ttl);
    let auth_service = AuthService::new(Arc::new(PgUserStore::new(pool.clone())), hasher, jwt.clone());
    let booking_service = BookingService::new(Arc::new(PgBookingStore::new(pool)));

    log::info!(
        "🔐 Tokens expire after {} seconds, bcrypt cost {}",
        config.token_ttl.num_seconds(),
        config.bcrypt_cost
    );
    log::info!("🌍 Allowed origins: {}", config.cors_allowed_origins.join(", "));

    let (host, port) = config.bind_address();
    log::info!("🌐 Server will be available at: http://{}:{}", host, port);

    let origins = config.cors_allowed_origins.clone();
    HttpServer::new(move || {
        let gate = AuthMiddleware::new(jwt.clone());
        App::new()
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(booking_service.clone()))
            .wrap(cors_policy(&origins))
            .wrap(Logger::default())
            .configure(move |cfg| configure_routes(cfg, gate))
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("failed to bind {}:{}", host, port))?
    .run()
    .await?;

    Ok(())
}
