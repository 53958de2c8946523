use crate::models::DbBlockedRange;
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use sqlx::PgExecutor;
use uuid::Uuid;

pub async fn create_blocked_range<'e, E>(
    executor: E,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<DbBlockedRange>
where
    E: PgExecutor<'e>,
{
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating blocked range: id={}, date={}, start={}, end={}",
        id, date, start_time, end_time
    );

    let block = sqlx::query_as::<_, DbBlockedRange>(
        r#"
        INSERT INTO blocked_ranges (id, block_date, start_time, end_time, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, block_date, start_time, end_time, created_at
        "#,
    )
    .bind(id)
    .bind(date)
    .bind(start_time)
    .bind(end_time)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(block)
}

pub async fn get_blocked_ranges_by_date<'e, E>(
    executor: E,
    date: NaiveDate,
) -> Result<Vec<DbBlockedRange>>
where
    E: PgExecutor<'e>,
{
    let blocks = sqlx::query_as::<_, DbBlockedRange>(
        r#"
        SELECT id, block_date, start_time, end_time, created_at
        FROM blocked_ranges
        WHERE block_date = $1
        ORDER BY start_time ASC
        "#,
    )
    .bind(date)
    .fetch_all(executor)
    .await?;

    Ok(blocks)
}

/// Blocks dated `from..=to`, ordered by date then start time
pub async fn get_blocked_ranges_in_range<'e, E>(
    executor: E,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DbBlockedRange>>
where
    E: PgExecutor<'e>,
{
    let blocks = sqlx::query_as::<_, DbBlockedRange>(
        r#"
        SELECT id, block_date, start_time, end_time, created_at
        FROM blocked_ranges
        WHERE block_date BETWEEN $1 AND $2
        ORDER BY block_date ASC, start_time ASC
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_all(executor)
    .await?;

    Ok(blocks)
}

/// Returns whether a block was deleted
pub async fn delete_blocked_range<'e, E>(executor: E, id: Uuid) -> Result<bool>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        DELETE FROM blocked_ranges
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}
