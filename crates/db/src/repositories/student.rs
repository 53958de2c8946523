use crate::models::DbStudent;
use chrono::Utc;
use eyre::Result;
use lessonbook_core::models::student::StudentPricing;
use sqlx::PgExecutor;
use uuid::Uuid;

pub async fn create_student<'e, E>(
    executor: E,
    name: &str,
    alias: Option<&str>,
    pricing: StudentPricing,
) -> Result<DbStudent>
where
    E: PgExecutor<'e>,
{
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating student: id={}, name={}", id, name);

    let student = sqlx::query_as::<_, DbStudent>(
        r#"
        INSERT INTO students (id, name, alias, usual_cost, high_cost, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, alias, usual_cost, high_cost, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(alias)
    .bind(pricing.usual_cost)
    .bind(pricing.high_cost)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(student)
}

pub async fn get_student_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<DbStudent>>
where
    E: PgExecutor<'e>,
{
    let student = sqlx::query_as::<_, DbStudent>(
        r#"
        SELECT id, name, alias, usual_cost, high_cost, created_at
        FROM students
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    if student.is_none() {
        tracing::debug!("Student not found: id={}", id);
    }

    Ok(student)
}

pub async fn list_students<'e, E>(executor: E) -> Result<Vec<DbStudent>>
where
    E: PgExecutor<'e>,
{
    let students = sqlx::query_as::<_, DbStudent>(
        r#"
        SELECT id, name, alias, usual_cost, high_cost, created_at
        FROM students
        ORDER BY alias ASC NULLS LAST, name ASC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(students)
}

/// Replaces both price overrides; `None` clears an override
pub async fn update_student_pricing<'e, E>(
    executor: E,
    id: Uuid,
    pricing: StudentPricing,
) -> Result<Option<DbStudent>>
where
    E: PgExecutor<'e>,
{
    let student = sqlx::query_as::<_, DbStudent>(
        r#"
        UPDATE students
        SET usual_cost = $2, high_cost = $3
        WHERE id = $1
        RETURNING id, name, alias, usual_cost, high_cost, created_at
        "#,
    )
    .bind(id)
    .bind(pricing.usual_cost)
    .bind(pricing.high_cost)
    .fetch_optional(executor)
    .await?;

    Ok(student)
}
