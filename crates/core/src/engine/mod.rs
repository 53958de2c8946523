//! The slot-availability and pricing engine.
//!
//! Every function here is pure: no clock reads, no storage access. Callers
//! pass "now", the day's lessons and blocks, and the [`EngineConfig`].
//!
//! [`EngineConfig`]: crate::config::EngineConfig

pub mod availability;
pub mod blocking;
pub mod booking;
pub mod calendar;
pub mod merge;
pub mod pricing;

pub use availability::merge_availability;
pub use blocking::validate_block;
pub use booking::{validate_admin_booking, validate_booking};
pub use calendar::{calendar_days, calendar_window};
pub use pricing::{compute_price, quote_price, resolve_cost};
