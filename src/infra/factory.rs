use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::{info, warn};
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::infra::repositories::{
    postgres_availability_repo::PostgresAvailabilityRepo,
    postgres_booking_repo::PostgresBookingRepo,
    postgres_event_type_repo::PostgresEventTypeRepo,
    sqlite_availability_repo::SqliteAvailabilityRepo,
    sqlite_booking_repo::SqliteBookingRepo,
    sqlite_event_type_repo::SqliteEventTypeRepo,
};

const MAX_MIGRATION_ATTEMPTS: u32 = 5;

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        AppState {
            config: config.clone(),
            availability_repo: Arc::new(PostgresAvailabilityRepo::new(pool.clone())),
            event_type_repo: Arc::new(PostgresEventTypeRepo::new(pool.clone())),
            booking_repo: Arc::new(PostgresBookingRepo::new(pool.clone())),
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        AppState {
            config: config.clone(),
            availability_repo: Arc::new(SqliteAvailabilityRepo::new(pool.clone())),
            event_type_repo: Arc::new(SqliteEventTypeRepo::new(pool.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(pool.clone())),
        }
    }
}

// Schema provisioning must survive transient connection failures and a
// previously half-provisioned database: bounded exponential backoff, and
// "already exists" counts as success.
fn migration_backoff(attempt: u32) -> Duration {
    Duration::from_millis(100 * 2u64.pow(attempt))
}

fn is_already_provisioned(err: &sqlx::migrate::MigrateError) -> bool {
    err.to_string().contains("already exists")
}

async fn run_postgres_migrations(pool: &PgPool) {
    let mut attempt = 0;
    loop {
        match sqlx::migrate!("./migrations/postgres").run(pool).await {
            Ok(()) => return,
            Err(e) if is_already_provisioned(&e) => {
                info!("Schema already provisioned, continuing");
                return;
            }
            Err(e) => {
                attempt += 1;
                if attempt >= MAX_MIGRATION_ATTEMPTS {
                    panic!("Failed to run Postgres migrations after {} attempts: {}", attempt, e);
                }
                let backoff = migration_backoff(attempt);
                warn!("Migration attempt {} failed ({}), retrying in {:?}", attempt, e, backoff);
                tokio::time::sleep(backoff).await;
            }
        }
    }
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    let mut attempt = 0;
    loop {
        match sqlx::migrate!("./migrations/sqlite").run(pool).await {
            Ok(()) => return,
            Err(e) if is_already_provisioned(&e) => {
                info!("Schema already provisioned, continuing");
                return;
            }
            Err(e) => {
                attempt += 1;
                if attempt >= MAX_MIGRATION_ATTEMPTS {
                    panic!("Failed to run SQLite migrations after {} attempts: {}", attempt, e);
                }
                let backoff = migration_backoff(attempt);
                warn!("Migration attempt {} failed ({}), retrying in {:?}", attempt, e, backoff);
                tokio::time::sleep(backoff).await;
            }
        }
    }
}
