use actix_web::{HttpResponse, Result, web};
use validator::Validate;

use auth_services::middleware::AuthenticatedUser;
use booking_services::service::BookingService;
use booking_services::types::*;

/// Records a booking submitted from the public booking form
pub async fn create_booking(
    booking_service: web::Data<BookingService>,
    request: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse, BookingError> {
    // Validate the request
    request
        .validate()
        .map_err(|e| BookingError::Validation(format!("Validation error: {}", e)))?;

    let booking = booking_service.create_booking(&request).await?;

    Ok(HttpResponse::Ok().json(CreateBookingResponse {
        success: true,
        id: booking.id,
    }))
}

/// Lists all bookings, newest first
pub async fn list_bookings(
    booking_service: web::Data<BookingService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, BookingError> {
    let bookings = booking_service.list_bookings().await?;
    log::debug!("{} listed {} bookings", user.username, bookings.len());

    Ok(HttpResponse::Ok().json(bookings))
}

/// Searches bookings by destination keyword
pub async fn search_bookings(
    booking_service: web::Data<BookingService>,
    user: AuthenticatedUser,
    request: web::Json<SearchBookingsRequest>,
) -> Result<HttpResponse, BookingError> {
    let bookings = booking_service.search_bookings(&request.keyword).await?;
    log::debug!(
        "{} searched bookings for '{}': {} hits",
        user.username,
        request.keyword,
        bookings.len()
    );

    Ok(HttpResponse::Ok().json(bookings))
}
