//! # Lessonbook Core
//!
//! Domain types and the slot-availability and pricing engine shared by the
//! database and API crates.
//!
//! The engine is a set of pure functions that take every input explicitly,
//! including the current time and an [`EngineConfig`]:
//!
//! - [`engine::calendar`]: the window of bookable dates
//! - [`engine::availability`]: per-day timeline of lessons and blocks
//! - [`engine::booking`]: whether a `(date, hour)` slot may be booked
//! - [`engine::pricing`]: the price of a new lesson
//! - [`engine::blocking`]: whether an administrator block may be created

pub mod config;
pub mod engine;
pub mod errors;
pub mod models;
pub mod rejection;

pub use config::{ConfigError, EngineConfig};
pub use rejection::Rejection;
