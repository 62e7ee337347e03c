use crate::domain::{
    models::availability::{Availability, AvailabilityInterval},
    ports::AvailabilityRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteAvailabilityRepo {
    pool: SqlitePool,
}

impl SqliteAvailabilityRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

async fn insert_interval(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    interval: &AvailabilityInterval,
) -> Result<(), AppError> {
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
        .execute(&mut **tx)
        .await
        .map_err(AppError::Database)?;
    Ok(())
}

#[async_trait]
impl AvailabilityRepository for SqliteAvailabilityRepo {
    async fn create(&self, availability: &Availability, intervals: &[AvailabilityInterval]) -> Result<(), AppError> {
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
            insert_interval(&mut tx, interval).await?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Availability>, AppError> {
        sqlx::query_as::<_, Availability>("SELECT * FROM availability WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Availability>, AppError> {
        sqlx::query_as::<_, Availability>("SELECT * FROM availability ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_intervals(&self, availability_id: &str) -> Result<Vec<AvailabilityInterval>, AppError> {
        sqlx::query_as::<_, AvailabilityInterval>(
            "SELECT * FROM availability_intervals WHERE availability_id = ? ORDER BY day_of_week ASC, start_time ASC",
        )
            .bind(availability_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, availability: &Availability, intervals: Option<&[AvailabilityInterval]>) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("UPDATE availability SET name = ?, timezone = ?, updated_at = ? WHERE id = ?")
            .bind(&availability.name)
            .bind(&availability.timezone)
            .bind(availability.updated_at)
            .bind(&availability.id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        // Replacement semantics: a supplied interval set, even an empty
        // one, wipes and rewrites the whole set.
        if let Some(intervals) = intervals {
            sqlx::query("DELETE FROM availability_intervals WHERE availability_id = ?")
                .bind(&availability.id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;

            for interval in intervals {
                insert_interval(&mut tx, interval).await?;
            }
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM availability WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Availability not found".into()));
        }
        Ok(())
    }

    async fn find_default(&self) -> Result<Option<Availability>, AppError> {
        sqlx::query_as::<_, Availability>("SELECT * FROM availability ORDER BY created_at ASC LIMIT 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
