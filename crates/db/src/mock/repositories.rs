use chrono::{NaiveDate, NaiveTime};
use lessonbook_core::models::student::StudentPricing;
use mockall::mock;
use uuid::Uuid;

use crate::models::{DbBlockedRange, DbLesson, DbStudent};

// Mock repositories for testing
mock! {
    pub LessonRepo {
        pub async fn create_lesson(
            &self,
            student_id: Uuid,
            date: NaiveDate,
            time: NaiveTime,
            price: i32,
        ) -> eyre::Result<DbLesson>;

        pub async fn get_lesson_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbLesson>>;

        pub async fn get_lessons_by_date(
            &self,
            date: NaiveDate,
        ) -> eyre::Result<Vec<DbLesson>>;

        pub async fn get_lessons_in_range(
            &self,
            from: NaiveDate,
            to: NaiveDate,
        ) -> eyre::Result<Vec<DbLesson>>;

        pub async fn delete_lesson(
            &self,
            id: Uuid,
        ) -> eyre::Result<bool>;
    }
}

mock! {
    pub BlockedRangeRepo {
        pub async fn create_blocked_range(
            &self,
            date: NaiveDate,
            start_time: NaiveTime,
            end_time: NaiveTime,
        ) -> eyre::Result<DbBlockedRange>;

        pub async fn get_blocked_ranges_by_date(
            &self,
            date: NaiveDate,
        ) -> eyre::Result<Vec<DbBlockedRange>>;

        pub async fn get_blocked_ranges_in_range(
            &self,
            from: NaiveDate,
            to: NaiveDate,
        ) -> eyre::Result<Vec<DbBlockedRange>>;

        pub async fn delete_blocked_range(
            &self,
            id: Uuid,
        ) -> eyre::Result<bool>;
    }
}

mock! {
    pub StudentRepo {
        pub async fn create_student(
            &self,
            name: &'static str,
            alias: Option<&'static str>,
            pricing: StudentPricing,
        ) -> eyre::Result<DbStudent>;

        pub async fn get_student_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbStudent>>;

        pub async fn update_student_pricing(
            &self,
            id: Uuid,
            pricing: StudentPricing,
        ) -> eyre::Result<Option<DbStudent>>;
    }
}
