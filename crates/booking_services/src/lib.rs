//! # Booking Services
//!
//! Taxi bookings and the destination price list: request and record types,
//! the persistence trait with its Postgres implementation, and the service
//! used by the web handlers.

/// Service definitions for booking and destination operations.
pub mod service;
/// Persistence for bookings and destinations.
pub mod store;
/// Types and structures used in booking services.
pub mod types;

/// In-memory booking store for tests.
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
