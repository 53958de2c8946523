pub mod blocked_range;
pub mod calendar;
pub mod lesson;
pub mod student;
