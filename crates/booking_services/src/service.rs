use std::sync::Arc;

use validator::Validate;

use crate::store::BookingStore;
use crate::types::{Booking, BookingError, CreateBookingRequest, Destination};

/// Service for handling booking and destination operations
#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn BookingStore>,
}

impl BookingService {
    /// Creates a new instance of `BookingService` over the given store
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    /// Records a new booking
    pub async fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> Result<Booking, BookingError> {
        request
            .validate()
            .map_err(|e| BookingError::Validation(format!("Validation error: {}", e)))?;

        let booking = self.store.insert_booking(request).await?;
        log::info!(
            "Booking {} created for destination {}",
            booking.id,
            booking.destination
        );
        Ok(booking)
    }

    /// Lists all bookings, newest first
    pub async fn list_bookings(&self) -> Result<Vec<Booking>, BookingError> {
        self.store.list_bookings().await
    }

    /// Searches bookings by destination substring
    pub async fn search_bookings(&self, keyword: &str) -> Result<Vec<Booking>, BookingError> {
        self.store.search_bookings(keyword.trim()).await
    }

    /// Inserts a batch of destinations. The batch must be non-empty and every
    /// entry valid; nothing is inserted otherwise.
    pub async fn create_destinations(
        &self,
        destinations: &[Destination],
    ) -> Result<u64, BookingError> {
        if destinations.is_empty() {
            return Err(BookingError::Validation("Invalid input data".to_string()));
        }

        for (index, destination) in destinations.iter().enumerate() {
            destination.validate().map_err(|e| {
                BookingError::Validation(format!("Invalid destination at index {}: {}", index, e))
            })?;
        }

        let inserted = self.store.insert_destinations(destinations).await?;
        log::info!("Inserted {} destinations", inserted);
        Ok(inserted)
    }

    /// Lists the destination price list
    pub async fn list_destinations(&self) -> Result<Vec<Destination>, BookingError> {
        self.store.list_destinations().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBookingStore;

    fn service() -> BookingService {
        BookingService::new(Arc::new(MemoryBookingStore::new()))
    }

    fn booking(destination: &str) -> CreateBookingRequest {
        CreateBookingRequest {
            full_name: "Niran K.".to_string(),
            phone: "0899999999".to_string(),
            email: "niran@example.com".to_string(),
            destination: destination.to_string(),
            price: 1200.0,
        }
    }

    fn destination(name: &str, price: f64) -> Destination {
        Destination {
            destination: name.to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn test_bookings_listed_newest_first() {
        let service = service();
        let first = service.create_booking(&booking("Airport")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = service.create_booking(&booking("Pattaya")).await.unwrap();

        let listed = service.list_bookings().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[tokio::test]
    async fn test_search_matches_destination_substring() {
        let service = service();
        service.create_booking(&booking("Suvarnabhumi Airport")).await.unwrap();
        service.create_booking(&booking("Don Mueang Airport")).await.unwrap();
        service.create_booking(&booking("Hua Hin")).await.unwrap();

        assert_eq!(service.search_bookings("airport").await.unwrap().len(), 2);
        assert_eq!(service.search_bookings("HUA").await.unwrap().len(), 1);
        assert_eq!(service.search_bookings("Chiang Mai").await.unwrap().len(), 0);
        assert_eq!(service.search_bookings("").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_bulk_destinations() {
        let service = service();
        let inserted = service
            .create_destinations(&[destination("Pattaya", 1500.0), destination("Rayong", 2200.0)])
            .await
            .unwrap();

        assert_eq!(inserted, 2);
        let listed = service.list_destinations().await.unwrap();
        assert_eq!(listed, vec![destination("Pattaya", 1500.0), destination("Rayong", 2200.0)]);
    }

    #[tokio::test]
    async fn test_bulk_destinations_rejects_empty_and_invalid_batches() {
        let service = service();

        assert!(matches!(
            service.create_destinations(&[]).await,
            Err(BookingError::Validation(msg)) if msg == "Invalid input data"
        ));
        assert!(matches!(
            service
                .create_destinations(&[destination("Pattaya", 1500.0), destination("", 10.0)])
                .await,
            Err(BookingError::Validation(_))
        ));
        assert!(service.list_destinations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected_before_storage() {
        let service = service();

        assert!(matches!(
            service.create_destinations(&[destination("   ", 1.0)]).await,
            Err(BookingError::Validation(_))
        ));
        assert!(service.list_destinations().await.unwrap().is_empty());

        let mut blank = booking("  ");
        blank.full_name = "  ".to_string();
        blank.phone = "  ".to_string();
        assert!(matches!(
            service.create_booking(&blank).await,
            Err(BookingError::Validation(_))
        ));
        assert!(service.list_bookings().await.unwrap().is_empty());
    }
}
