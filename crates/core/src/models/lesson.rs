use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::pricing::Markup;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub price: i32,
    pub created_at: DateTime<Utc>,
}

impl Lesson {
    /// Chronological ordering key used by the availability merger
    pub fn sort_key(&self) -> (NaiveDate, NaiveTime) {
        (self.date, self.time)
    }
}

/// Booking submitted by a student for themselves.
///
/// `time` is kept raw so that format errors are reported by the validator
/// like every other rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLessonRequest {
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub time: String,
}

/// Booking submitted by the administrator on behalf of a student
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCreateLessonRequest {
    pub student_id: Option<Uuid>,
    pub date: NaiveDate,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub price: i32,
}

impl From<Lesson> for LessonResponse {
    fn from(lesson: Lesson) -> Self {
        Self {
            id: lesson.id,
            student_id: lesson.student_id,
            date: lesson.date,
            time: lesson.time,
            price: lesson.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLessonResponse {
    pub lesson: LessonResponse,
    /// Markup rules that raised the price, empty for a common-price lesson
    pub markups: Vec<Markup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteLessonResponse {
    pub id: Uuid,
    pub deleted: bool,
}
