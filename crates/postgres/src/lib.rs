//! # Postgres
//!
//! This crate provides the connection pool and schema migrations for the booking API's PostgreSQL database.

/// Database client for the booking API.
pub mod database;
