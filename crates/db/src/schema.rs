use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

const INDEXES: [&str; 4] = [
    "CREATE INDEX IF NOT EXISTS idx_lessons_student_id ON lessons(student_id)",
    "CREATE INDEX IF NOT EXISTS idx_lessons_date_time ON lessons(lesson_date, start_time)",
    "CREATE INDEX IF NOT EXISTS idx_blocked_ranges_date_start ON blocked_ranges(block_date, start_time)",
    "CREATE INDEX IF NOT EXISTS idx_students_alias_name ON students(alias, name)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create students table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            alias VARCHAR(50) NULL,
            usual_cost INTEGER NULL,
            high_cost INTEGER NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create lessons table; one lesson per slot system-wide
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS lessons (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            student_id UUID NOT NULL REFERENCES students(id) ON DELETE CASCADE,
            lesson_date DATE NOT NULL,
            start_time TIME NOT NULL,
            price INTEGER NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT lessons_slot_unique UNIQUE (lesson_date, start_time),
            CONSTRAINT lessons_on_the_hour CHECK (
                EXTRACT(MINUTE FROM start_time) = 0 AND EXTRACT(SECOND FROM start_time) = 0
            )
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create blocked_ranges table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS blocked_ranges (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            block_date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_block_range CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    for statement in INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
