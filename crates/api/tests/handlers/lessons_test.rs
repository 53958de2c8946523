use chrono::{NaiveDate, Utc};
use fake::{Fake, faker::name::en::Name};
use lessonbook_api::middleware::error_handling::AppError;
use lessonbook_core::{
    config::hour_to_time,
    engine::{
        booking::parse_hour, pricing::Markup, quote_price, validate_admin_booking,
        validate_booking,
    },
    errors::BookingError,
    models::{
        blocked_range::BlockedRange,
        lesson::{
            AdminCreateLessonRequest, CreateLessonRequest, CreateLessonResponse,
            DeleteLessonResponse, Lesson, LessonResponse,
        },
    },
    rejection::{HoursBound, Rejection},
};
use lessonbook_db::models::DbLesson;
use mockall::predicate;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::{TestContext, at, db_block, db_lesson, db_student, fixed_now};

fn tomorrow() -> NaiveDate {
    fixed_now().date().succ_opt().unwrap()
}

// Mirrors handlers::lessons::book_lesson with the repositories mocked out
async fn test_book_lesson_wrapper(
    ctx: &mut TestContext,
    student_id: Uuid,
    date: NaiveDate,
    validate: impl FnOnce(&[Lesson], &[BlockedRange]) -> Result<u32, Rejection>,
) -> Result<CreateLessonResponse, AppError> {
    let student = ctx
        .student_repo
        .get_student_by_id(student_id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Student with ID {} not found", student_id)))?;

    let lessons: Vec<Lesson> = ctx
        .lesson_repo
        .get_lessons_by_date(date)
        .await?
        .into_iter()
        .map(Lesson::from)
        .collect();
    let blocks: Vec<BlockedRange> = ctx
        .blocked_range_repo
        .get_blocked_ranges_by_date(date)
        .await?
        .into_iter()
        .map(BlockedRange::from)
        .collect();

    let hour = validate(&lessons, &blocks)?;
    let quote = quote_price(hour, lessons.len(), &student.pricing(), &ctx.engine);

    let created = ctx
        .lesson_repo
        .create_lesson(student.id, date, hour_to_time(hour).unwrap(), quote.price)
        .await?;

    Ok(CreateLessonResponse {
        lesson: LessonResponse::from(Lesson::from(created)),
        markups: quote.markups,
    })
}

async fn test_create_lesson_wrapper(
    ctx: &mut TestContext,
    request: CreateLessonRequest,
) -> Result<CreateLessonResponse, AppError> {
    let now = fixed_now();
    let engine = ctx.engine.clone();

    test_book_lesson_wrapper(ctx, request.student_id, request.date, |lessons, blocks| {
        validate_booking(request.date, &request.time, now, lessons, blocks, &engine)
    })
    .await
}

async fn test_admin_create_lesson_wrapper(
    ctx: &mut TestContext,
    request: AdminCreateLessonRequest,
) -> Result<CreateLessonResponse, AppError> {
    let now = fixed_now();
    let engine = ctx.engine.clone();

    parse_hour(&request.time)?;
    let student_id = request.student_id.ok_or(Rejection::MissingStudent)?;

    test_book_lesson_wrapper(ctx, student_id, request.date, |lessons, blocks| {
        validate_admin_booking(
            request.date,
            &request.time,
            Some(student_id),
            now,
            lessons,
            blocks,
            &engine,
        )
    })
    .await
}

async fn test_delete_own_lesson_wrapper(
    ctx: &mut TestContext,
    id: Uuid,
    student_id: Uuid,
) -> Result<DeleteLessonResponse, AppError> {
    let existing = ctx
        .lesson_repo
        .get_lesson_by_id(id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Lesson with ID {} not found", id)))?;

    if existing.student_id != student_id {
        return Err(AppError(BookingError::Authorization(
            "You can only delete your own lessons".into(),
        )));
    }

    let deleted = ctx.lesson_repo.delete_lesson(id).await?;
    Ok(DeleteLessonResponse { id, deleted })
}

fn expect_student(ctx: &mut TestContext, id: Uuid, usual_cost: Option<i32>, high_cost: Option<i32>) {
    let name: String = Name().fake();
    ctx.student_repo
        .expect_get_student_by_id()
        .with(predicate::eq(id))
        .times(1)
        .returning(move |id| Ok(Some(db_student(id, &name, usual_cost, high_cost))));
}

fn expect_day(ctx: &mut TestContext, date: NaiveDate, lessons: Vec<DbLesson>, blocks: Vec<(u32, u32)>) {
    ctx.lesson_repo
        .expect_get_lessons_by_date()
        .with(predicate::eq(date))
        .times(1)
        .returning(move |_| Ok(lessons.clone()));
    ctx.blocked_range_repo
        .expect_get_blocked_ranges_by_date()
        .with(predicate::eq(date))
        .times(1)
        .returning(move |date| {
            Ok(blocks
                .iter()
                .map(|(start, end)| db_block(date, *start, *end))
                .collect())
        });
}

fn expect_insert(ctx: &mut TestContext, student_id: Uuid, date: NaiveDate, hour: u32, price: i32) {
    ctx.lesson_repo
        .expect_create_lesson()
        .with(
            predicate::eq(student_id),
            predicate::eq(date),
            predicate::eq(at(hour)),
            predicate::eq(price),
        )
        .times(1)
        .returning(move |student_id, date, time, price| {
            Ok(DbLesson {
                id: Uuid::new_v4(),
                student_id,
                lesson_date: date,
                start_time: time,
                price,
                created_at: Utc::now(),
            })
        });
}

#[test_log::test(tokio::test)]
async fn test_create_lesson_at_common_price() {
    let mut ctx = TestContext::new();
    let student_id = Uuid::new_v4();
    let date = tomorrow();

    expect_student(&mut ctx, student_id, None, None);
    expect_day(&mut ctx, date, vec![], vec![]);
    expect_insert(&mut ctx, student_id, date, 18, 1000);

    let request = CreateLessonRequest {
        student_id,
        date,
        time: "18".to_string(),
    };
    let response = test_create_lesson_wrapper(&mut ctx, request).await.unwrap();

    assert_eq!(response.lesson.student_id, student_id);
    assert_eq!(response.lesson.date, date);
    assert_eq!(response.lesson.time, at(18));
    assert_eq!(response.lesson.price, 1000);
    assert!(response.markups.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_create_lesson_minutes_are_dropped() {
    let mut ctx = TestContext::new();
    let student_id = Uuid::new_v4();
    let date = tomorrow();

    expect_student(&mut ctx, student_id, None, None);
    expect_day(&mut ctx, date, vec![], vec![]);
    expect_insert(&mut ctx, student_id, date, 15, 1000);

    let request = CreateLessonRequest {
        student_id,
        date,
        time: "15:45".to_string(),
    };
    let response = test_create_lesson_wrapper(&mut ctx, request).await.unwrap();

    assert_eq!(response.lesson.time, at(15));
}

#[tokio::test]
async fn test_create_lesson_early_morning_uses_student_high_cost() {
    let mut ctx = TestContext::new();
    let student_id = Uuid::new_v4();
    let date = tomorrow();

    expect_student(&mut ctx, student_id, Some(900), Some(2000));
    expect_day(&mut ctx, date, vec![], vec![]);
    expect_insert(&mut ctx, student_id, date, 8, 2000);

    let request = CreateLessonRequest {
        student_id,
        date,
        time: "08:00".to_string(),
    };
    let response = test_create_lesson_wrapper(&mut ctx, request).await.unwrap();

    assert_eq!(response.lesson.price, 2000);
    assert_eq!(response.markups, vec![Markup::EarlyMorning]);
}

#[tokio::test]
async fn test_create_lesson_on_busy_day_is_marked_up() {
    let mut ctx = TestContext::new();
    let student_id = Uuid::new_v4();
    let other = Uuid::new_v4();
    let date = tomorrow();

    let booked = [11, 12, 13, 14]
        .into_iter()
        .map(|hour| db_lesson(other, date, hour, 1000))
        .collect();

    expect_student(&mut ctx, student_id, None, None);
    expect_day(&mut ctx, date, booked, vec![]);
    expect_insert(&mut ctx, student_id, date, 16, 1300);

    let request = CreateLessonRequest {
        student_id,
        date,
        time: "16".to_string(),
    };
    let response = test_create_lesson_wrapper(&mut ctx, request).await.unwrap();

    assert_eq!(response.lesson.price, 1300);
    assert_eq!(response.markups, vec![Markup::BusyDay]);
}

#[tokio::test]
async fn test_create_lesson_slot_taken() {
    let mut ctx = TestContext::new();
    let student_id = Uuid::new_v4();
    let date = tomorrow();

    expect_student(&mut ctx, student_id, None, None);
    expect_day(&mut ctx, date, vec![db_lesson(Uuid::new_v4(), date, 15, 1000)], vec![]);
    ctx.lesson_repo.expect_create_lesson().never();

    let request = CreateLessonRequest {
        student_id,
        date,
        time: "15:30".to_string(),
    };
    let result = test_create_lesson_wrapper(&mut ctx, request).await;

    match result.unwrap_err().0 {
        BookingError::Rejected(Rejection::SlotTaken { existing }) => assert_eq!(existing, at(15)),
        e => panic!("Expected SlotTaken rejection, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_create_lesson_blocked_day() {
    let mut ctx = TestContext::new();
    let student_id = Uuid::new_v4();
    let date = tomorrow().succ_opt().unwrap();

    expect_student(&mut ctx, student_id, None, None);
    expect_day(&mut ctx, date, vec![], vec![(8, 23)]);
    ctx.lesson_repo.expect_create_lesson().never();

    let request = CreateLessonRequest {
        student_id,
        date,
        time: "12".to_string(),
    };
    let result = test_create_lesson_wrapper(&mut ctx, request).await;

    match result.unwrap_err().0 {
        BookingError::Rejected(Rejection::SlotBlocked) => {}
        e => panic!("Expected SlotBlocked rejection, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_create_lesson_outside_business_hours() {
    let mut ctx = TestContext::new();
    let student_id = Uuid::new_v4();
    let date = tomorrow();

    expect_student(&mut ctx, student_id, None, None);
    expect_day(&mut ctx, date, vec![], vec![]);
    ctx.lesson_repo.expect_create_lesson().never();

    let request = CreateLessonRequest {
        student_id,
        date,
        time: "7".to_string(),
    };
    let result = test_create_lesson_wrapper(&mut ctx, request).await;

    match result.unwrap_err().0 {
        BookingError::Rejected(Rejection::OutsideBusinessHours { hour, bound }) => {
            assert_eq!(hour, 7);
            assert_eq!(bound, HoursBound::TooEarly);
        }
        e => panic!("Expected OutsideBusinessHours rejection, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_create_lesson_unknown_student() {
    let mut ctx = TestContext::new();
    let student_id = Uuid::new_v4();

    ctx.student_repo
        .expect_get_student_by_id()
        .with(predicate::eq(student_id))
        .returning(|_| Ok(None));
    ctx.lesson_repo.expect_get_lessons_by_date().never();

    let request = CreateLessonRequest {
        student_id,
        date: tomorrow(),
        time: "18".to_string(),
    };
    let result = test_create_lesson_wrapper(&mut ctx, request).await;

    match result.unwrap_err().0 {
        BookingError::NotFound(message) => assert!(message.contains(&student_id.to_string())),
        e => panic!("Expected NotFound error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_create_lesson_database_failure() {
    let mut ctx = TestContext::new();
    let student_id = Uuid::new_v4();

    ctx.student_repo
        .expect_get_student_by_id()
        .returning(|_| Err(eyre::eyre!("connection refused")));

    let request = CreateLessonRequest {
        student_id,
        date: tomorrow(),
        time: "18".to_string(),
    };
    let result = test_create_lesson_wrapper(&mut ctx, request).await;

    assert!(matches!(result.unwrap_err().0, BookingError::Database(_)));
}

#[tokio::test]
async fn test_admin_create_lesson_for_student() {
    let mut ctx = TestContext::new();
    let student_id = Uuid::new_v4();
    let date = tomorrow();

    expect_student(&mut ctx, student_id, Some(800), None);
    expect_day(&mut ctx, date, vec![], vec![]);
    expect_insert(&mut ctx, student_id, date, 23, 1300);

    let request = AdminCreateLessonRequest {
        student_id: Some(student_id),
        date,
        time: "23".to_string(),
    };
    let response = test_admin_create_lesson_wrapper(&mut ctx, request).await.unwrap();

    assert_eq!(response.lesson.price, 1300);
    assert_eq!(response.markups, vec![Markup::LateEvening]);
}

#[tokio::test]
async fn test_admin_create_lesson_without_student() {
    let mut ctx = TestContext::new();
    ctx.student_repo.expect_get_student_by_id().never();

    let request = AdminCreateLessonRequest {
        student_id: None,
        date: tomorrow(),
        time: "12".to_string(),
    };
    let result = test_admin_create_lesson_wrapper(&mut ctx, request).await;

    match result.unwrap_err().0 {
        BookingError::Rejected(Rejection::MissingStudent) => {}
        e => panic!("Expected MissingStudent rejection, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_delete_own_lesson() {
    let mut ctx = TestContext::new();
    let student_id = Uuid::new_v4();
    let lesson = db_lesson(student_id, tomorrow(), 12, 1000);
    let id = lesson.id;

    ctx.lesson_repo
        .expect_get_lesson_by_id()
        .with(predicate::eq(id))
        .returning(move |_| Ok(Some(lesson.clone())));
    ctx.lesson_repo
        .expect_delete_lesson()
        .with(predicate::eq(id))
        .times(1)
        .returning(|_| Ok(true));

    let response = test_delete_own_lesson_wrapper(&mut ctx, id, student_id).await.unwrap();

    assert_eq!(response.id, id);
    assert!(response.deleted);
}

#[tokio::test]
async fn test_delete_someone_elses_lesson() {
    let mut ctx = TestContext::new();
    let lesson = db_lesson(Uuid::new_v4(), tomorrow(), 12, 1000);
    let id = lesson.id;

    ctx.lesson_repo
        .expect_get_lesson_by_id()
        .returning(move |_| Ok(Some(lesson.clone())));
    ctx.lesson_repo.expect_delete_lesson().never();

    let result = test_delete_own_lesson_wrapper(&mut ctx, id, Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err().0, BookingError::Authorization(_)));
}
