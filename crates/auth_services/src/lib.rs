//! # Auth Services
//!
//! This crate provides authentication services for the application.
//! It includes password hashing, JWT token handling, middleware for request
//! authentication, the user store and service definitions.

/// JWT token issuance and verification.
pub mod jwt;
/// Middleware for request authentication and the authenticated-user extractor.
pub mod middleware;
/// Salted password hashing.
pub mod password;
/// Service definitions for user management and authentication operations.
pub mod service;
/// Persistence for user accounts.
pub mod store;
/// Types and structures used in authentication services.
pub mod types;

/// In-memory user store for tests.
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
