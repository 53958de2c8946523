//! mockall doubles of the repositories, for handler tests that don't have
//! a database at hand.

pub mod repositories;
