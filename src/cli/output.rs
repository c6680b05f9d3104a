//! Output formatting and progress indicators
//!
//! Utilities for displaying progress spinners, status lines, and
//! warnings. Honors the global `--quiet` and `--json` flags: JSON mode
//! keeps stdout machine-readable, so human chatter is suppressed.

use std::sync::OnceLock;

use indicatif::{ProgressBar, ProgressStyle};

/// Status message prefixes
pub mod status {
    /// Success prefix
    pub const SUCCESS: &str = "✓";

    /// Error prefix
    pub const ERROR: &str = "✗";

    /// Warning prefix
    pub const WARNING: &str = "⚠";
}

/// Global output configuration derived from CLI flags
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Suppress all output except errors
    pub quiet: bool,
    /// Emit machine-readable JSON on stdout
    pub json: bool,
    /// Verbosity level (-v, -vv)
    pub verbose: u8,
}

static CONFIG: OnceLock<OutputConfig> = OnceLock::new();

impl OutputConfig {
    /// Create a configuration from CLI flags
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self {
            quiet,
            json,
            verbose,
        }
    }

    /// Install as the process-wide configuration
    pub fn apply_global(self) {
        let _ = CONFIG.set(self);
    }

    /// Current process-wide configuration
    pub fn global() -> Self {
        CONFIG.get().copied().unwrap_or_default()
    }
}

/// Whether human-facing stdout chatter is suppressed
pub fn is_silent() -> bool {
    let config = OutputConfig::global();
    config.quiet || config.json
}

/// Whether JSON output mode is active
pub fn is_json() -> bool {
    OutputConfig::global().json
}

/// Print a status line unless output is suppressed
pub fn status_line(message: &str) {
    if !is_silent() {
        println!("{message}");
    }
}

/// Print a warning to stderr (shown even in quiet mode)
pub fn warn(message: &str) {
    eprintln!("{} {message}", status::WARNING);
}

/// Display a fatal error before exiting
pub fn display_error(error: &anyhow::Error) {
    if is_json() {
        let payload = serde_json::json!({ "error": format!("{error:#}") });
        eprintln!("{payload}");
    } else {
        eprintln!("{} Error: {error:#}", status::ERROR);
    }
}

/// Create a spinner for operations with unknown duration
///
/// Hidden entirely in quiet/JSON mode.
pub fn create_spinner(message: &str) -> ProgressBar {
    if is_silent() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
