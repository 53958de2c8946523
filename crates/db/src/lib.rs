pub mod models;
pub mod repositories;
pub mod schema;

pub mod mock;

use chrono::{Datelike, NaiveDate};
use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, Pool, Postgres};

pub type DbPool = Pool<Postgres>;

/// First key of the two-key advisory locks taken per calendar date
const DATE_LOCK_NAMESPACE: i32 = 0x4c42;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Serializes writers touching `date` until the surrounding transaction ends.
///
/// Lesson bookings and block creations both take this lock before reading
/// the day's lessons and blocks, so the read-validate-insert sequence of one
/// request can't interleave with another request for the same date.
pub async fn lock_date(conn: &mut PgConnection, date: NaiveDate) -> Result<()> {
    tracing::debug!("Locking date {} for writing", date);

    sqlx::query("SELECT pg_advisory_xact_lock($1, $2)")
        .bind(DATE_LOCK_NAMESPACE)
        .bind(date.num_days_from_ce())
        .execute(conn)
        .await?;

    Ok(())
}

/// Whether a repository error is a unique-constraint violation, i.e. the
/// storage layer refused a second lesson for an occupied slot
pub fn is_unique_violation(err: &eyre::Report) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .is_some_and(|e| e.is_unique_violation())
}
