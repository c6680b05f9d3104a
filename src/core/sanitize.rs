//! Package specifier and filename sanitization
//!
//! User-supplied specifiers end up on installer command lines and in
//! output filenames, so everything is whitelisted per ecosystem before
//! use. Sanitization never mutates silently: callers receive the
//! original alongside the cleaned value and must surface a warning when
//! they differ.

use regex::Regex;
use std::sync::OnceLock;

/// Package ecosystem a specifier belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ecosystem {
    /// Python / pip packages
    Python,
    /// Node.js / npm packages
    Node,
}

impl Ecosystem {
    /// Folder name Lambda expects at the top of the layer archive
    pub fn layer_dir(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Node => "nodejs",
        }
    }

    /// Whether a character is allowed in a specifier for this ecosystem
    fn allows(self, c: char) -> bool {
        if c.is_ascii_alphanumeric() {
            return true;
        }
        match self {
            Self::Python => matches!(c, '.' | '_' | '-' | '=' | '>' | '<' | '~' | '!' | '+'),
            Self::Node => {
                matches!(c, '.' | '_' | '-' | '@' | '/' | '~' | '^' | '>' | '<' | '=')
            }
        }
    }
}

/// A sanitized string that remembers what it was cleaned from
///
/// Callers must warn the user whenever `was_modified()` is true; silent
/// mutation of a specifier is a correctness and security bug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    /// Cleaned value
    pub value: String,
    /// Raw input the value was derived from
    pub original: String,
}

impl Sanitized {
    /// Whether sanitization changed the input
    pub fn was_modified(&self) -> bool {
        self.value != self.original
    }

    /// Whether sanitization removed every character
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Sanitize a package specifier against the ecosystem whitelist
pub fn sanitize_spec(raw: &str, ecosystem: Ecosystem) -> Sanitized {
    let value: String = raw.chars().filter(|&c| ecosystem.allows(c)).collect();
    Sanitized {
        value,
        original: raw.to_string(),
    }
}

/// Characters stripped from output filenames
const FILENAME_META: &[char] = &[
    '/', '\\', ':', '|', '<', '>', '?', '*', '"', '\'', '`', '$', '(', ')', '{', '}', ';', '&', '!',
];

/// Sanitize a string for use as an output filename
///
/// Strips shell-meta characters, trims leading/trailing dots and
/// hyphens, and truncates to [`crate::config::defaults::MAX_FILENAME_LEN`].
pub fn sanitize_file_name(raw: &str) -> Sanitized {
    let stripped: String = raw
        .chars()
        .filter(|c| !FILENAME_META.contains(c) && !c.is_control() && !c.is_whitespace())
        .collect();
    let trimmed = stripped.trim_matches(|c| c == '.' || c == '-');
    let value: String = trimmed
        .chars()
        .take(crate::config::defaults::MAX_FILENAME_LEN)
        .collect();
    Sanitized {
        value,
        original: raw.to_string(),
    }
}

/// Separators that start a Python version constraint
const PYTHON_CONSTRAINT_CHARS: &[char] = &['=', '<', '>', '!', '~'];

/// Extract the package name from a specifier
///
/// Python splits at the first constraint operator. Node splits at `@`,
/// but scoped packages start with `@`, so a leading `@` shifts the
/// split point to the last `@` (one `@` means no version at all).
pub fn extract_name(spec: &str, ecosystem: Ecosystem) -> &str {
    match ecosystem {
        Ecosystem::Python => match spec.find(PYTHON_CONSTRAINT_CHARS) {
            Some(idx) => &spec[..idx],
            None => spec,
        },
        Ecosystem::Node => {
            if let Some(rest) = spec.strip_prefix('@') {
                // Scoped package: a second '@' introduces the version
                match rest.rfind('@') {
                    Some(idx) => &spec[..idx + 1],
                    None => spec,
                }
            } else {
                match spec.find('@') {
                    Some(idx) => &spec[..idx],
                    None => spec,
                }
            }
        }
    }
}

/// Extract the version constraint from a specifier, separator included
///
/// Returns `""` when the specifier carries no constraint. Including the
/// separator keeps `extract_name(name + constraint)` equal to `name`.
pub fn extract_version_constraint(spec: &str, ecosystem: Ecosystem) -> &str {
    let name = extract_name(spec, ecosystem);
    &spec[name.len()..]
}

/// Extract an exactly pinned version, if the specifier has one
///
/// `numpy==1.26.0` and `left-pad@1.3.0` pin a version; range
/// constraints (`>=`, `~=`, `^`) do not.
pub fn pinned_version(spec: &str, ecosystem: Ecosystem) -> Option<&str> {
    let constraint = extract_version_constraint(spec, ecosystem);
    let version = match ecosystem {
        Ecosystem::Python => constraint.strip_prefix("==")?,
        Ecosystem::Node => constraint.strip_prefix('@')?,
    };
    if !version.is_empty() && is_valid_version(version) {
        Some(version)
    } else {
        None
    }
}

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+\.[0-9]+(\.[0-9]+)?$").expect("valid version regex"))
}

/// Whether a string is a plain dotted version (digits and dots only)
pub fn is_valid_version(value: &str) -> bool {
    version_regex().is_match(value)
}
