use crate::domain::{
    models::{availability::{Availability, AvailabilityInterval}, event_type::EventType},
    ports::EventTypeRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteEventTypeRepo {
    pool: SqlitePool,
}

impl SqliteEventTypeRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const INSERT_EVENT_TYPE: &str = r#"INSERT INTO event_types (
    id, name, description, duration, url_slug, user_id, availability_id, created_at, updated_at
) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
RETURNING *"#;

#[async_trait]
impl EventTypeRepository for SqliteEventTypeRepo {
    async fn create(&self, event_type: &EventType) -> Result<EventType, AppError> {
        sqlx::query_as::<_, EventType>(INSERT_EVENT_TYPE)
            .bind(&event_type.id)
            .bind(&event_type.name)
            .bind(&event_type.description)
            .bind(event_type.duration)
            .bind(&event_type.url_slug)
            .bind(&event_type.user_id)
            .bind(&event_type.availability_id)
            .bind(event_type.created_at)
            .bind(event_type.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create_with_availability(
        &self,
        event_type: &EventType,
        availability: &Availability,
        intervals: &[AvailabilityInterval],
    ) -> Result<EventType, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query(
            "INSERT INTO availability (id, name, timezone, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
            .bind(&availability.id)
            .bind(&availability.name)
            .bind(&availability.timezone)
            .bind(availability.created_at)
            .bind(availability.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        for interval in intervals {
            sqlx::query(
                "INSERT INTO availability_intervals (id, availability_id, day_of_week, start_time, end_time, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
                .bind(&interval.id)
                .bind(&interval.availability_id)
                .bind(interval.day_of_week)
                .bind(interval.start_time)
                .bind(interval.end_time)
                .bind(interval.created_at)
                .bind(interval.updated_at)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        let created = sqlx::query_as::<_, EventType>(INSERT_EVENT_TYPE)
            .bind(&event_type.id)
            .bind(&event_type.name)
            .bind(&event_type.description)
            .bind(event_type.duration)
            .bind(&event_type.url_slug)
            .bind(&event_type.user_id)
            .bind(&event_type.availability_id)
            .bind(event_type.created_at)
            .bind(event_type.updated_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<EventType>, AppError> {
        sqlx::query_as::<_, EventType>("SELECT * FROM event_types WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<EventType>, AppError> {
        sqlx::query_as::<_, EventType>("SELECT * FROM event_types WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<EventType>, AppError> {
        sqlx::query_as::<_, EventType>("SELECT * FROM event_types WHERE url_slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<EventType>, AppError> {
        sqlx::query_as::<_, EventType>("SELECT * FROM event_types ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, event_type: &EventType) -> Result<EventType, AppError> {
        sqlx::query_as::<_, EventType>(
            r#"UPDATE event_types SET
                name = ?, description = ?, duration = ?, url_slug = ?,
                availability_id = ?, updated_at = ?
               WHERE id = ? RETURNING *"#,
        )
            .bind(&event_type.name)
            .bind(&event_type.description)
            .bind(event_type.duration)
            .bind(&event_type.url_slug)
            .bind(&event_type.availability_id)
            .bind(event_type.updated_at)
            .bind(&event_type.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM event_types WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event type not found".into()));
        }
        Ok(())
    }
}
