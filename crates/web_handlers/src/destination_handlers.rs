use actix_web::{HttpResponse, Result, web};

use auth_services::middleware::AuthenticatedUser;
use booking_services::service::BookingService;
use booking_services::types::*;

/// Inserts a batch of destinations with their prices
pub async fn create_destinations(
    booking_service: web::Data<BookingService>,
    user: AuthenticatedUser,
    request: web::Json<Vec<Destination>>,
) -> Result<HttpResponse, BookingError> {
    let inserted = booking_service.create_destinations(&request).await?;
    log::info!("{} inserted {} destinations", user.username, inserted);

    Ok(HttpResponse::Ok().json(BulkInsertResponse {
        success: true,
        inserted,
    }))
}

/// Lists the destination price list
pub async fn list_destinations(
    booking_service: web::Data<BookingService>,
) -> Result<HttpResponse, BookingError> {
    let destinations = booking_service.list_destinations().await?;

    Ok(HttpResponse::Ok().json(destinations))
}
