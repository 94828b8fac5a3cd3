use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Rejects strings that are empty once surrounding whitespace is removed.
/// Stored text is trimmed, so such values would be saved empty.
fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// Request structure for creating a booking.
///
/// Field names follow the booking form used by existing clients.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookingRequest {
    /// Full name of the passenger
    #[serde(rename = "FullName")]
    #[validate(length(min = 1, max = 255, message = "Full name is required"))]
    #[validate(custom(function = "non_blank"))]
    pub full_name: String,

    /// Contact phone number
    #[serde(rename = "Phone")]
    #[validate(length(min = 1, max = 32, message = "Phone is required"))]
    #[validate(custom(function = "non_blank"))]
    pub phone: String,

    /// Contact email address
    #[serde(rename = "Email")]
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,

    /// Destination name
    #[serde(rename = "Destination")]
    #[validate(length(min = 1, max = 255, message = "Destination is required"))]
    #[validate(custom(function = "non_blank"))]
    pub destination: String,

    /// Quoted price
    #[serde(rename = "Price")]
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
}

/// Response structure for a created booking
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBookingResponse {
    /// Always `true`; failures are returned as errors
    pub success: bool,
    /// ID of the created booking
    pub id: Uuid,
}

/// A stored booking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    /// Unique identifier for the booking
    pub id: Uuid,
    /// Full name of the passenger
    #[serde(rename = "FullName")]
    pub full_name: String,
    /// Contact phone number
    #[serde(rename = "Phone")]
    pub phone: String,
    /// Contact email address
    #[serde(rename = "Email")]
    pub email: String,
    /// Destination name
    #[serde(rename = "Destination")]
    pub destination: String,
    /// Quoted price
    #[serde(rename = "Price")]
    pub price: f64,
    /// Server-assigned creation time
    pub timestamp: DateTime<Utc>,
}

/// Request structure for searching bookings by destination
#[derive(Debug, Deserialize)]
pub struct SearchBookingsRequest {
    /// Substring matched case-insensitively against the destination
    #[serde(default)]
    pub keyword: String,
}

/// A destination and its price, used both for input and output
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct Destination {
    /// Destination name
    #[validate(length(min = 1, max = 255, message = "Destination is required"))]
    #[validate(custom(function = "non_blank"))]
    pub destination: String,
    /// Price to the destination
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
}

/// Response structure for a bulk destination insert
#[derive(Debug, Serialize, Deserialize)]
pub struct BulkInsertResponse {
    /// Always `true`; failures are returned as errors
    pub success: bool,
    /// Number of rows inserted
    pub inserted: u64,
}

/// Custom error type for booking and destination operations
#[derive(thiserror::Error, Debug)]
pub enum BookingError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl actix_web::ResponseError for BookingError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::HttpResponse;

        match self {
            BookingError::Validation(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "validation_error",
                "message": msg
            })),
            BookingError::Database(e) => {
                log::error!("Booking storage failure: {}", e);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "internal_error",
                    "message": "An internal error occurred"
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_form_field_names() {
        let request: CreateBookingRequest = serde_json::from_value(serde_json::json!({
            "FullName": "Somchai P.",
            "Phone": "0812345678",
            "Email": "somchai@example.com",
            "Destination": "Pattaya",
            "Price": 1500.0
        }))
        .unwrap();

        assert_eq!(request.full_name, "Somchai P.");
        assert_eq!(request.destination, "Pattaya");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_booking_request_validation() {
        let request = CreateBookingRequest {
            full_name: String::new(),
            phone: "0812345678".to_string(),
            email: "not-an-email".to_string(),
            destination: "Hua Hin".to_string(),
            price: -1.0,
        };

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("full_name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("price"));
        assert!(!fields.contains_key("destination"));
    }

    #[test]
    fn test_whitespace_only_fields_are_blank() {
        let request = CreateBookingRequest {
            full_name: "  ".to_string(),
            phone: "  ".to_string(),
            email: "somchai@example.com".to_string(),
            destination: "  ".to_string(),
            price: 100.0,
        };

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("full_name"));
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("destination"));

        let blank = Destination {
            destination: " \t ".to_string(),
            price: 1.0,
        };
        assert!(blank.validate().is_err());

        let padded = Destination {
            destination: "  Pattaya ".to_string(),
            price: 1.0,
        };
        assert!(padded.validate().is_ok());
    }

    #[test]
    fn test_booking_serializes_with_form_names() {
        let booking = Booking {
            id: Uuid::new_v4(),
            full_name: "A".to_string(),
            phone: "1".to_string(),
            email: "a@example.com".to_string(),
            destination: "Airport".to_string(),
            price: 800.0,
            timestamp: Utc::now(),
        };

        let value = serde_json::to_value(&booking).unwrap();
        assert_eq!(value["FullName"], "A");
        assert_eq!(value["Destination"], "Airport");
        assert_eq!(value["Price"], 800.0);
        assert!(value.get("timestamp").is_some());
        assert!(value.get("id").is_some());
    }
}
