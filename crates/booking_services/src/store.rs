use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::types::{Booking, BookingError, CreateBookingRequest, Destination};

/// Persistence for bookings and the destination price list.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Inserts a booking stamped with the current server time.
    async fn insert_booking(&self, booking: &CreateBookingRequest) -> Result<Booking, BookingError>;

    /// Lists all bookings, newest first.
    async fn list_bookings(&self) -> Result<Vec<Booking>, BookingError>;

    /// Lists bookings whose destination contains `keyword`, ignoring case.
    async fn search_bookings(&self, keyword: &str) -> Result<Vec<Booking>, BookingError>;

    /// Inserts all destinations in one statement, returning the row count.
    async fn insert_destinations(&self, destinations: &[Destination]) -> Result<u64, BookingError>;

    /// Lists all destinations.
    async fn list_destinations(&self) -> Result<Vec<Destination>, BookingError>;
}

/// [`BookingStore`] backed by the `bookings` and `destinations` tables.
pub struct PgBookingStore {
    pool: PgPool,
}

impl PgBookingStore {
    /// Creates a new store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn booking_from_row(row: &PgRow) -> Booking {
    Booking {
        id: row.get("id"),
        full_name: row.get("full_name"),
        phone: row.get("phone"),
        email: row.get("email"),
        destination: row.get("destination"),
        price: row.get("price"),
        timestamp: row.get("created_at"),
    }
}

/// Postgres accepts at most this many bind parameters per statement
const MAX_BIND_PARAMS: usize = 65535;
/// Bind parameters per inserted destination row
const DESTINATION_BINDS: usize = 2;

/// Splits a batch into INSERT-sized chunks that stay under the bind limit.
fn destination_batches(destinations: &[Destination]) -> std::slice::Chunks<'_, Destination> {
    destinations.chunks(MAX_BIND_PARAMS / DESTINATION_BINDS)
}

/// Escapes LIKE metacharacters so the keyword matches literally.
fn like_pattern(keyword: &str) -> String {
    let escaped = keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn insert_booking(&self, booking: &CreateBookingRequest) -> Result<Booking, BookingError> {
        let row = sqlx::query(
            r#"
            INSERT INTO bookings (full_name, phone, email, destination, price, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING id, full_name, phone, email, destination, price, created_at
            "#,
        )
        .bind(booking.full_name.trim())
        .bind(booking.phone.trim())
        .bind(booking.email.trim())
        .bind(booking.destination.trim())
        .bind(booking.price)
        .fetch_one(&self.pool)
        .await?;

        Ok(booking_from_row(&row))
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, BookingError> {
        let rows = sqlx::query(
            r#"
            SELECT id, full_name, phone, email, destination, price, created_at
            FROM bookings
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(booking_from_row).collect())
    }

    async fn search_bookings(&self, keyword: &str) -> Result<Vec<Booking>, BookingError> {
        let rows = sqlx::query(
            r#"
            SELECT id, full_name, phone, email, destination, price, created_at
            FROM bookings
            WHERE destination ILIKE $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(like_pattern(keyword))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(booking_from_row).collect())
    }

    async fn insert_destinations(&self, destinations: &[Destination]) -> Result<u64, BookingError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for batch in destination_batches(destinations) {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new("INSERT INTO destinations (destination, price) ");
            builder.push_values(batch, |mut row, d| {
                row.push_bind(d.destination.trim()).push_bind(d.price);
            });

            inserted += builder.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn list_destinations(&self) -> Result<Vec<Destination>, BookingError> {
        let rows = sqlx::query("SELECT destination, price FROM destinations ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| Destination {
                destination: row.get("destination"),
                price: row.get("price"),
            })
            .collect())
    }
}
