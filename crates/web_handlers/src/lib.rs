//! # Web Handlers for the Taxi Booking API
//!
//! HTTP handlers and the route table for the booking API.

/// Authentication handlers (register, login)
mod auth_handlers;
pub use auth_handlers::*;

/// User management handlers
mod user_handlers;
pub use user_handlers::*;

/// Booking form and booking listing handlers
mod booking_handlers;
pub use booking_handlers::*;

/// Destination price list handlers
mod destination_handlers;
pub use destination_handlers::*;

/// Liveness and health handlers
mod admin_handlers;
pub use admin_handlers::*;

/// Route table and extractor configuration
pub mod routes;
