//! Health scoring, scan history and repair verification for OBD2 fault
//! codes.
//!
//! The scanner, VIN decoder and insight service are traits with offline
//! implementations; the scoring and comparison engines are pure functions.

pub mod catalog;
pub mod comparison;
pub mod config;
pub mod connection;
pub mod diagnostic;
pub mod error;
pub mod history;
pub mod i18n;
pub mod insight;
pub mod reporter;
pub mod scoring;
pub mod session;
pub mod vin;
