//! Default configuration values

use crate::core::platform::{Architecture, PythonVersion};

/// Default Python version for layer builds
pub const DEFAULT_PYTHON_VERSION: PythonVersion = PythonVersion::new(3, 12);

/// Default target architecture for layer builds
pub const DEFAULT_ARCHITECTURE: Architecture = Architecture::X86_64;

/// Default Node.js major version for layer builds
pub const DEFAULT_NODE_VERSION: &str = "20";

/// First CPython minor version that runs on Amazon Linux 2023
///
/// Lambda runtimes python3.12 and later use AL2023 (glibc 2.28+);
/// earlier runtimes use Amazon Linux 2 (glibc 2.17).
pub const AL2023_PYTHON_MINOR: u8 = 12;

/// manylinux platform prefix for Amazon Linux 2023 runtimes
pub const AL2023_PLATFORM_PREFIX: &str = "manylinux_2_28";

/// manylinux platform prefix for Amazon Linux 2 runtimes
pub const AL2_PLATFORM_PREFIX: &str = "manylinux2014";

/// Maximum length of a sanitized output filename
pub const MAX_FILENAME_LEN: usize = 100;

/// Lambda limit on unzipped layer contents (warn only)
pub const LAYER_UNZIPPED_LIMIT_BYTES: u64 = 262_144_000; // 250 MB

/// Default description attached to published layer versions
pub const DEFAULT_LAYER_DESCRIPTION: &str = "Published with lambda-layer";
