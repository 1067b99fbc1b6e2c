//! Billing calculation and configuration engine for hostel messes.
//!
//! Everything here is free of database drivers. Persistence is reached
//! through the traits in [`gateway`], implemented by `messbill-db`.

pub mod bill_config;
pub mod billing;
pub mod cache;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod period;
pub mod roster;
pub mod settings;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;
