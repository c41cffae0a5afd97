//! Command implementations for the CLI
//!
//! - start: Start the booking site
//! - test: Run pricing checks and validate configuration
//! - config: Configuration display and validation

pub mod config;
pub mod start;
