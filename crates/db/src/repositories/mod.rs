pub mod blocked_range;
pub mod lesson;
pub mod student;
