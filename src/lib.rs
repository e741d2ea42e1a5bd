//! visit-planner core
//!
//! Builds a weekly schedule of visits to relatives under per-day time
//! windows, visit caps and travel costs, keeping the best of many
//! randomized greedy attempts.

pub mod error;
pub mod time;
pub mod model;
pub mod traits;
pub mod haversine;
pub mod graph;
pub mod schedule;
pub mod scoring;
pub mod solver;
pub mod loader;
pub mod report;
