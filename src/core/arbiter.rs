//! Compatibility arbitration
//!
//! Reconciles user-declared constraints (`--python-version`,
//! `--architecture`) with wheel-declared constraints into one concrete
//! build target. Disagreement is a hard conflict, not a warning:
//! publishing an incompatible layer wastes an AWS round-trip and
//! produces a function that only breaks at invoke time. The most
//! specific known-correct source wins, which is the wheel's own
//! metadata when present.

use crate::config::defaults;
use crate::core::platform::{resolve_platform, Architecture, PythonVersion};
use crate::core::wheel::{WheelArchitecture, WheelTag};
use crate::error::ConflictError;

/// Fully resolved build target
///
/// Every field is concrete by construction; arbitration either resolves
/// all ambiguity or fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDescriptor {
    /// Effective Python version
    pub python_version: PythonVersion,
    /// Effective CPU architecture
    pub architecture: Architecture,
    /// pip `--platform` value, e.g. `manylinux_2_28_x86_64`; may be
    /// dot-separated when adopted from a multi-tag wheel
    pub platform_tag: String,
    /// pip `--abi` value, e.g. `cp312`
    pub abi_tag: String,
}

/// Unify user flags and an optional wheel tag into a build target
///
/// Wheel-pinned facets take precedence but must agree with any explicit
/// user flag; unset facets fall back to the user flag, then to the
/// configured default. When the wheel declares a concrete platform tag
/// set, that set is adopted verbatim: it is more specific than a
/// generically resolved tag (it may encode several acceptable manylinux
/// generations).
pub fn arbitrate(
    user_python: Option<PythonVersion>,
    user_arch: Option<Architecture>,
    wheel: Option<&WheelTag>,
) -> Result<TargetDescriptor, ConflictError> {
    let wheel_python = wheel.and_then(WheelTag::python_version);
    let python_version = match (wheel_python, user_python) {
        (Some(from_wheel), Some(requested)) if from_wheel != requested => {
            return Err(ConflictError::PythonVersion {
                wheel: from_wheel.to_string(),
                requested: requested.to_string(),
            });
        }
        (Some(from_wheel), _) => from_wheel,
        (None, Some(requested)) => requested,
        (None, None) => defaults::DEFAULT_PYTHON_VERSION,
    };

    let wheel_arch = match wheel.map(WheelTag::architecture) {
        Some(WheelArchitecture::Known(arch)) => Some(arch),
        // Any and Unknown both leave the choice to the user; Unknown
        // wheels are rejected later by the compatibility validator
        _ => None,
    };
    let architecture = match (wheel_arch, user_arch) {
        (Some(from_wheel), Some(requested)) if from_wheel != requested => {
            return Err(ConflictError::Architecture {
                wheel: from_wheel.pip_name().to_string(),
                requested: requested.pip_name().to_string(),
            });
        }
        (Some(from_wheel), _) => from_wheel,
        (None, Some(requested)) => requested,
        (None, None) => defaults::DEFAULT_ARCHITECTURE,
    };

    let resolved = resolve_platform(python_version, architecture);
    let platform_tag = match wheel {
        Some(tag) if tag.has_concrete_platform() => tag.platform_spec(),
        _ => resolved.platform_tag,
    };

    Ok(TargetDescriptor {
        python_version,
        architecture,
        platform_tag,
        abi_tag: resolved.abi_tag,
    })
}
