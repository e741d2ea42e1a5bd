//! Test fixtures for visit-planner.
//!
//! Provides realistic test data including:
//! - Relatives spread over Seoul districts (approximate real coordinates)
//! - The usual city transport modes

pub mod seoul_relatives;

pub use seoul_relatives::*;
