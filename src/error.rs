//! Error types for lambda-layer
//!
//! Domain-specific error types using thiserror. The taxonomy follows the
//! failure classes of the tool: input validation, constraint conflicts,
//! Lambda compatibility, metadata reads, assembly, and publishing. None
//! of these are transient, so nothing here is retried.

use std::path::PathBuf;
use thiserror::Error;

/// Package specifier and user input validation errors
#[derive(Error, Debug, PartialEq)]
pub enum SpecifierError {
    /// Version string does not match the accepted format
    #[error("Invalid version '{value}': expected digits and dots (e.g. 3.12 or 3.12.1)")]
    InvalidVersionFormat { value: String },

    /// Architecture alias not recognized
    #[error("Unknown architecture '{value}': expected one of x86_64, amd64, aarch64, arm64")]
    UnknownArchitecture { value: String },

    /// Every requested specifier was dropped during sanitization
    #[error("No valid package specifiers remain after sanitization")]
    AllSpecifiersDropped,

    /// No packages or wheels were requested at all
    #[error("Nothing to package: provide at least one package specifier or wheel file")]
    NothingRequested,
}

/// Wheel filename parsing errors
#[derive(Error, Debug, PartialEq)]
pub enum WheelError {
    /// File does not carry the .whl extension
    #[error("'{name}' is not a wheel file (missing .whl extension)")]
    NotAWheel { name: String },

    /// Wheel file missing on disk
    #[error("Wheel file not found: {path}")]
    FileNotFound { path: PathBuf },
}

/// Errors reading the embedded WHEEL metadata member
///
/// These are recoverable: the caller falls back to a filename-only parse
/// with an explicit warning, since old wheels may lack the metadata file.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// Wheel archive could not be opened
    #[error("Failed to open wheel archive '{path}': {error}")]
    OpenArchive { path: PathBuf, error: String },

    /// No *.dist-info/WHEEL member present
    #[error("No .dist-info/WHEEL metadata member in '{path}'")]
    MissingWheelMember { path: PathBuf },

    /// WHEEL member present but carried no Tag: lines
    #[error("WHEEL metadata in '{path}' declares no compatibility tags")]
    NoTags { path: PathBuf },

    /// WHEEL member unreadable
    #[error("Failed to read WHEEL metadata from '{path}': {error}")]
    ReadMember { path: PathBuf, error: String },
}

/// User-declared constraints contradict wheel-declared constraints
///
/// These are fail-fast: the remedy is for the user to drop or fix the
/// redundant flag, never for the tool to silently prefer one side.
#[derive(Error, Debug, PartialEq)]
pub enum ConflictError {
    /// Wheel targets a different Python version than requested
    #[error("Wheel is for Python {wheel}, but {requested} was requested")]
    PythonVersion { wheel: String, requested: String },

    /// Wheel targets a different architecture than requested
    #[error("Wheel is for {wheel}, but {requested} was requested")]
    Architecture { wheel: String, requested: String },
}

/// Wheel cannot run in the Lambda execution environment
#[derive(Error, Debug, PartialEq)]
pub enum CompatibilityError {
    /// No Linux-family platform tag present
    #[error("Wheel is not built for Linux (platform tags: {})", platform_tags.join(", "))]
    OsIncompatible { platform_tags: Vec<String> },

    /// No platform tag matches the target architecture
    #[error("Wheel does not support {target} (platform tags: {})", platform_tags.join(", "))]
    ArchitectureMismatch {
        target: String,
        platform_tags: Vec<String>,
    },
}

/// Layer assembly errors
#[derive(Error, Debug)]
pub enum AssembleError {
    /// Required external installer missing from PATH
    #[error("'{tool}' not found on PATH. Install it to build {ecosystem} layers.")]
    InstallerNotFound { tool: String, ecosystem: String },

    /// Installer subprocess exited non-zero
    #[error("{tool} failed (exit code {code}):\n{stderr}")]
    InstallerFailed {
        tool: String,
        code: i32,
        stderr: String,
    },

    /// IO error during staging
    #[error("IO error for '{path}': {error}")]
    Io { path: PathBuf, error: String },

    /// Archive writing failed
    #[error("Failed to write archive '{path}': {error}")]
    Archive { path: PathBuf, error: String },

    /// Staging directory produced no files
    #[error("Installation produced no files to package")]
    EmptyStaging,
}

/// Layer publishing errors
#[derive(Error, Debug)]
pub enum PublishError {
    /// AWS CLI missing from PATH
    #[error("'aws' CLI not found on PATH. Install the AWS CLI to publish layers.")]
    AwsCliNotFound,

    /// publish-layer-version call failed
    #[error("aws lambda publish-layer-version failed (exit code {code}):\n{stderr}")]
    CommandFailed { code: i32, stderr: String },

    /// Response from the AWS CLI was not the expected JSON shape
    #[error("Unexpected response from AWS CLI: {reason}")]
    BadResponse { reason: String },
}

/// Top-level lambda-layer error type
#[derive(Error, Debug)]
pub enum LayerError {
    /// Specifier error
    #[error(transparent)]
    Specifier(#[from] SpecifierError),

    /// Wheel filename error
    #[error(transparent)]
    Wheel(#[from] WheelError),

    /// Conflict error
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// Compatibility error, naming the offending wheel
    #[error("Wheel '{path}' cannot run on the target")]
    Compatibility {
        path: PathBuf,
        source: CompatibilityError,
    },

    /// Assembly error
    #[error(transparent)]
    Assemble(#[from] AssembleError),

    /// Publish error
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// IO error
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON output serialization error
    #[error("Failed to serialize output: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Generic error
    #[error("{0}")]
    Generic(String),
}
