//! Weekly time-block planner: phrase parsing and week grid layout.

pub mod config;
pub mod logging;
pub mod schedule;
