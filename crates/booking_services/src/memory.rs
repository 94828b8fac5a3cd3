//! In-memory [`BookingStore`] used by tests across the workspace.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::store::BookingStore;
use crate::types::{Booking, BookingError, CreateBookingRequest, Destination};

/// A [`BookingStore`] holding rows in mutex-guarded vectors.
#[derive(Default)]
pub struct MemoryBookingStore {
    bookings: Mutex<Vec<Booking>>,
    destinations: Mutex<Vec<Destination>>,
}

impl MemoryBookingStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut bookings: Vec<Booking>) -> Vec<Booking> {
    bookings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    bookings
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn insert_booking(&self, booking: &CreateBookingRequest) -> Result<Booking, BookingError> {
        let stored = Booking {
            id: Uuid::new_v4(),
            full_name: booking.full_name.trim().to_string(),
            phone: booking.phone.trim().to_string(),
            email: booking.email.trim().to_string(),
            destination: booking.destination.trim().to_string(),
            price: booking.price,
            timestamp: Utc::now(),
        };
        self.bookings.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, BookingError> {
        Ok(newest_first(self.bookings.lock().unwrap().clone()))
    }

    async fn search_bookings(&self, keyword: &str) -> Result<Vec<Booking>, BookingError> {
        let needle = keyword.to_lowercase();
        let matches = self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.destination.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(newest_first(matches))
    }

    async fn insert_destinations(&self, destinations: &[Destination]) -> Result<u64, BookingError> {
        let mut stored = self.destinations.lock().unwrap();
        stored.extend(destinations.iter().map(|d| Destination {
            destination: d.destination.trim().to_string(),
            price: d.price,
        }));
        Ok(destinations.len() as u64)
    }

    async fn list_destinations(&self) -> Result<Vec<Destination>, BookingError> {
        Ok(self.destinations.lock().unwrap().clone())
    }
}
