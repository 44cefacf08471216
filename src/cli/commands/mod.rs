//! Command implementations for the pulsetrack CLI.
//!
//! Argument parsing lives in cli/mod.rs; the bodies live here.

pub mod config;
pub mod dashboard;
pub mod fetch;
