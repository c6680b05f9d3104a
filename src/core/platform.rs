//! Target platform resolution
//!
//! Maps a (Python version, CPU architecture) pair to the manylinux
//! platform tag and ABI tag pip needs, applying the Amazon Linux
//! generation rule: python3.12 and later run on AL2023 (glibc 2.28),
//! earlier runtimes on Amazon Linux 2 (glibc 2.17).
//!
//! Architectures carry two spellings that must never be swapped: pip
//! only understands `x86_64`/`aarch64`, the Lambda API only understands
//! `x86_64`/`arm64`. Both are derived from one [`Architecture`] value.

use std::fmt;
use std::str::FromStr;

use crate::config::defaults;
use crate::error::SpecifierError;

/// CPU architecture of a Lambda execution environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    /// 64-bit x86
    X86_64,
    /// 64-bit ARM (Graviton)
    Aarch64,
}

impl Architecture {
    /// Name pip understands (`--platform` suffix, wheel tags)
    pub fn pip_name(self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Aarch64 => "aarch64",
        }
    }

    /// Name the Lambda API understands (`CompatibleArchitectures`)
    pub fn aws_name(self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Aarch64 => "arm64",
        }
    }

    /// Substrings that identify this architecture in a platform tag
    pub fn tag_substrings(self) -> &'static [&'static str] {
        match self {
            Self::X86_64 => &["x86_64", "amd64"],
            Self::Aarch64 => &["aarch64", "arm64"],
        }
    }

    /// Parse any accepted alias (pip-facing or AWS-facing)
    pub fn from_alias(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "x86_64" | "amd64" => Some(Self::X86_64),
            "aarch64" | "arm64" => Some(Self::Aarch64),
            _ => None,
        }
    }
}

impl FromStr for Architecture {
    type Err = SpecifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_alias(s).ok_or_else(|| SpecifierError::UnknownArchitecture {
            value: s.to_string(),
        })
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pip_name())
    }
}

/// A CPython major.minor version
///
/// The patch component of user input is accepted and discarded: runtime
/// selection and ABI tags only depend on major.minor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PythonVersion {
    /// Major version (3 for every supported runtime)
    pub major: u8,
    /// Minor version
    pub minor: u8,
}

impl PythonVersion {
    /// Create a version from its components
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// ABI tag, e.g. `cp312` for 3.12 and `cp39` for 3.9 (no padding)
    pub fn abi_tag(self) -> String {
        format!("cp{}{}", self.major, self.minor)
    }

    /// Lambda runtime identifier, e.g. `python3.12`
    pub fn runtime(self) -> String {
        format!("python{}.{}", self.major, self.minor)
    }

    /// Whether this version runs on Amazon Linux 2023
    pub fn is_al2023(self) -> bool {
        self.major == 3 && self.minor >= defaults::AL2023_PYTHON_MINOR
    }
}

impl FromStr for PythonVersion {
    type Err = SpecifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SpecifierError::InvalidVersionFormat {
            value: s.to_string(),
        };
        if !crate::core::sanitize::is_valid_version(s) {
            return Err(invalid());
        }
        let mut parts = s.split('.');
        let major = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        let minor = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        Ok(Self { major, minor })
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Result of platform resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPlatform {
    /// manylinux platform tag, e.g. `manylinux_2_28_x86_64`
    pub platform_tag: String,
    /// ABI tag, e.g. `cp312`
    pub abi_tag: String,
}

/// Compute the installation platform tag and ABI tag for a target
///
/// Pure function of its inputs; the Amazon Linux generation is chosen
/// from the Python version alone.
pub fn resolve_platform(python: PythonVersion, arch: Architecture) -> ResolvedPlatform {
    let prefix = if python.is_al2023() {
        defaults::AL2023_PLATFORM_PREFIX
    } else {
        defaults::AL2_PLATFORM_PREFIX
    };
    ResolvedPlatform {
        platform_tag: format!("{prefix}_{}", arch.pip_name()),
        abi_tag: python.abi_tag(),
    }
}
