//! Infrastructure layer
//!
//! External collaborators reached through subprocesses: pip and npm for
//! package installation, the AWS CLI for layer publishing. Argument
//! construction is kept in pure functions so it stays testable without
//! the tools installed.

pub mod aws;
pub mod npm;
pub mod pip;
