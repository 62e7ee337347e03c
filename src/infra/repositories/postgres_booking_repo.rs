use crate::domain::{
    models::booking::{Booking, BookingFilter},
    ports::BookingRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use chrono::{DateTime, NaiveDate, Utc};

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            r#"INSERT INTO bookings (
                id, event_type_id, client_email, name, additional_notes,
                start_time, end_time, date, meeting_link, booking_status,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *"#,
        )
            .bind(&booking.id)
            .bind(&booking.event_type_id)
            .bind(&booking.client_email)
            .bind(&booking.name)
            .bind(&booking.additional_notes)
            .bind(booking.start_time)
            .bind(booking.end_time)
            .bind(booking.date)
            .bind(&booking.meeting_link)
            .bind(&booking.booking_status)
            .bind(booking.created_at)
            .bind(booking.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            r#"SELECT * FROM bookings
               WHERE ($1::text IS NULL OR event_type_id = $1)
                 AND ($2::date IS NULL OR date = $2)
                 AND ($3::text IS NULL OR booking_status = $3)
                 AND ($4::text IS NULL OR client_email = $4)
               ORDER BY date DESC, start_time DESC"#,
        )
            .bind(&filter.event_type_id)
            .bind(filter.date)
            .bind(&filter.booking_status)
            .bind(&filter.client_email)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            r#"UPDATE bookings SET
                event_type_id = $1, client_email = $2, name = $3, additional_notes = $4,
                start_time = $5, end_time = $6, date = $7, meeting_link = $8,
                booking_status = $9, updated_at = $10
               WHERE id = $11 RETURNING *"#,
        )
            .bind(&booking.event_type_id)
            .bind(&booking.client_email)
            .bind(&booking.name)
            .bind(&booking.additional_notes)
            .bind(booking.start_time)
            .bind(booking.end_time)
            .bind(booking.date)
            .bind(&booking.meeting_link)
            .bind(&booking.booking_status)
            .bind(booking.updated_at)
            .bind(&booking.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Booking not found".into()));
        }
        Ok(())
    }

    async fn count_overlapping(
        &self,
        event_type_id: &str,
        date: NaiveDate,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<&str>,
    ) -> Result<i64, AppError> {
        let result = sqlx::query(
            r#"SELECT COUNT(*) as count FROM bookings
               WHERE event_type_id = $1
                 AND date = $2
                 AND booking_status != 'cancelled'
                 AND start_time < $3
                 AND end_time > $4
                 AND ($5::text IS NULL OR id != $5)"#,
        )
            .bind(event_type_id)
            .bind(date)
            .bind(end)
            .bind(start)
            .bind(exclude_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.get::<i64, _>("count"))
    }
}
