use crate::models::DbLesson;
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use sqlx::PgExecutor;
use uuid::Uuid;

pub async fn create_lesson<'e, E>(
    executor: E,
    student_id: Uuid,
    date: NaiveDate,
    time: NaiveTime,
    price: i32,
) -> Result<DbLesson>
where
    E: PgExecutor<'e>,
{
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating lesson: id={}, student_id={}, date={}, time={}, price={}",
        id, student_id, date, time, price
    );

    let lesson = sqlx::query_as::<_, DbLesson>(
        r#"
        INSERT INTO lessons (id, student_id, lesson_date, start_time, price, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, student_id, lesson_date, start_time, price, created_at
        "#,
    )
    .bind(id)
    .bind(student_id)
    .bind(date)
    .bind(time)
    .bind(price)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(lesson)
}

pub async fn get_lesson_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<DbLesson>>
where
    E: PgExecutor<'e>,
{
    let lesson = sqlx::query_as::<_, DbLesson>(
        r#"
        SELECT id, student_id, lesson_date, start_time, price, created_at
        FROM lessons
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(lesson)
}

pub async fn get_lessons_by_date<'e, E>(executor: E, date: NaiveDate) -> Result<Vec<DbLesson>>
where
    E: PgExecutor<'e>,
{
    let lessons = sqlx::query_as::<_, DbLesson>(
        r#"
        SELECT id, student_id, lesson_date, start_time, price, created_at
        FROM lessons
        WHERE lesson_date = $1
        ORDER BY start_time ASC
        "#,
    )
    .bind(date)
    .fetch_all(executor)
    .await?;

    Ok(lessons)
}

/// Lessons dated `from..=to`, ordered by date then time
pub async fn get_lessons_in_range<'e, E>(
    executor: E,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DbLesson>>
where
    E: PgExecutor<'e>,
{
    let lessons = sqlx::query_as::<_, DbLesson>(
        r#"
        SELECT id, student_id, lesson_date, start_time, price, created_at
        FROM lessons
        WHERE lesson_date BETWEEN $1 AND $2
        ORDER BY lesson_date ASC, start_time ASC
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_all(executor)
    .await?;

    Ok(lessons)
}

/// A student's lessons dated `from` or later
pub async fn get_upcoming_lessons_by_student<'e, E>(
    executor: E,
    student_id: Uuid,
    from: NaiveDate,
) -> Result<Vec<DbLesson>>
where
    E: PgExecutor<'e>,
{
    let lessons = sqlx::query_as::<_, DbLesson>(
        r#"
        SELECT id, student_id, lesson_date, start_time, price, created_at
        FROM lessons
        WHERE student_id = $1 AND lesson_date >= $2
        ORDER BY lesson_date ASC, start_time ASC
        "#,
    )
    .bind(student_id)
    .bind(from)
    .fetch_all(executor)
    .await?;

    Ok(lessons)
}

/// Returns whether a lesson was deleted
pub async fn delete_lesson<'e, E>(executor: E, id: Uuid) -> Result<bool>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        DELETE FROM lessons
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}
