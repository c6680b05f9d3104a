//! Lambda compatibility validation
//!
//! Checks a wheel's declared platform tags against the Lambda execution
//! environment before anything is installed. The OS check runs first
//! and independently of the architecture check, so a macOS wheel for
//! the right CPU is still rejected as OS-incompatible. Because the tags
//! normally come from embedded metadata, renaming a wheel to look like
//! a manylinux build does not get it past this check.

use crate::core::platform::Architecture;
use crate::core::wheel::WheelTag;
use crate::error::CompatibilityError;

/// Result of validating a wheel against a target architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompatibilityVerdict {
    /// Wheel can run in the Lambda environment
    Compatible,
    /// No Linux-family platform tag present
    OsIncompatible,
    /// No platform tag matches the target architecture
    ArchitectureMismatch,
}

/// Substrings that mark a platform tag as Linux-family
const LINUX_MARKERS: &[&str] = &["manylinux", "linux"];

/// Validate a wheel tag set against a target architecture
pub fn validate(wheel: &WheelTag, target: Architecture) -> CompatibilityVerdict {
    let os_ok = wheel
        .platform_tags
        .iter()
        .any(|tag| tag == "any" || LINUX_MARKERS.iter().any(|marker| tag.contains(marker)));
    if !os_ok {
        return CompatibilityVerdict::OsIncompatible;
    }

    // "any" is matched only by exact equality; substring search against
    // the architecture terms must never be satisfied by a wildcard tag
    let arch_ok = wheel.platform_tags.iter().any(|tag| {
        tag == "any"
            || target
                .tag_substrings()
                .iter()
                .any(|sub| tag.contains(sub))
    });
    if !arch_ok {
        return CompatibilityVerdict::ArchitectureMismatch;
    }

    CompatibilityVerdict::Compatible
}

/// Validate and convert a non-compatible verdict into a fatal error
///
/// Error values carry the full detected platform-tag set so the user
/// can diagnose which wheel variant they actually need.
pub fn ensure_compatible(wheel: &WheelTag, target: Architecture) -> Result<(), CompatibilityError> {
    match validate(wheel, target) {
        CompatibilityVerdict::Compatible => Ok(()),
        CompatibilityVerdict::OsIncompatible => Err(CompatibilityError::OsIncompatible {
            platform_tags: wheel.platform_tags.clone(),
        }),
        CompatibilityVerdict::ArchitectureMismatch => {
            Err(CompatibilityError::ArchitectureMismatch {
                target: target.pip_name().to_string(),
                platform_tags: wheel.platform_tags.clone(),
            })
        }
    }
}
