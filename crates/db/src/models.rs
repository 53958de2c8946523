use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use lessonbook_core::models::{
    blocked_range::BlockedRange,
    lesson::Lesson,
    student::{Student, StudentPricing},
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStudent {
    pub id: Uuid,
    pub name: String,
    pub alias: Option<String>,
    pub usual_cost: Option<i32>,
    pub high_cost: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLesson {
    pub id: Uuid,
    pub student_id: Uuid,
    pub lesson_date: NaiveDate,
    pub start_time: NaiveTime,
    pub price: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBlockedRange {
    pub id: Uuid,
    pub block_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
}

impl DbStudent {
    pub fn pricing(&self) -> StudentPricing {
        StudentPricing {
            usual_cost: self.usual_cost,
            high_cost: self.high_cost,
        }
    }
}

impl From<DbStudent> for Student {
    fn from(row: DbStudent) -> Self {
        let pricing = row.pricing();
        Self {
            id: row.id,
            name: row.name,
            alias: row.alias,
            pricing,
            created_at: row.created_at,
        }
    }
}

impl From<DbLesson> for Lesson {
    fn from(row: DbLesson) -> Self {
        Self {
            id: row.id,
            student_id: row.student_id,
            date: row.lesson_date,
            time: row.start_time,
            price: row.price,
            created_at: row.created_at,
        }
    }
}

impl From<DbBlockedRange> for BlockedRange {
    fn from(row: DbBlockedRange) -> Self {
        Self {
            id: row.id,
            date: row.block_date,
            start_time: row.start_time,
            end_time: row.end_time,
        }
    }
}
