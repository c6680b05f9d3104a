//! lambda-layer - AWS Lambda layer packaging CLI
//!
//! This library packages third-party language-runtime dependencies
//! (npm packages, pip packages, wheel files) into zip archives that
//! follow the Lambda layer layout, and publishes them as layer
//! versions.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Business logic (wheel tags, platform resolution,
//!   arbitration, validation, staging, archiving)
//! - [`infra`] - Infrastructure layer (pip, npm, AWS CLI subprocesses)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;
