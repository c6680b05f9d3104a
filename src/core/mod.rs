//! Business logic
//!
//! Pure decision logic for layer builds: specifier sanitization, wheel
//! tag parsing, platform resolution, constraint arbitration, Lambda
//! compatibility validation, and archive staging/naming. Everything in
//! here is synchronous and free of shared mutable state; the only I/O
//! is reading wheel metadata and writing the archive.

pub mod arbiter;
pub mod archive;
pub mod compat;
pub mod layer;
pub mod platform;
pub mod sanitize;
pub mod wheel;
