pub mod blocks;
pub mod calendar;
pub mod health;
pub mod lessons;
pub mod pricing;
pub mod students;
