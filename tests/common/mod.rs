//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Test project context
///
/// Creates a temporary directory for test scenarios and provides
/// utilities for building fixture files.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

#[allow(dead_code)]
impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Build a minimal but real wheel archive at `file_name`
    ///
    /// The wheel carries one module file and, when `wheel_metadata` is
    /// given, a `pkg-1.0.dist-info/WHEEL` member with that content.
    /// Passing `None` produces a legacy wheel without the metadata
    /// member, which forces filename-based tag parsing.
    pub fn write_wheel(&self, file_name: &str, wheel_metadata: Option<&str>) -> PathBuf {
        let path = self.dir.path().join(file_name);
        let file = File::create(&path).expect("Failed to create wheel file");
        let mut writer = ZipWriter::new(file);
        let options = FileOptions::default().compression_method(CompressionMethod::Stored);

        writer
            .start_file("pkg/__init__.py", options)
            .expect("Failed to start module member");
        writer
            .write_all(b"version = '1.0'\n")
            .expect("Failed to write module member");

        if let Some(metadata) = wheel_metadata {
            writer
                .start_file("pkg-1.0.dist-info/WHEEL", options)
                .expect("Failed to start WHEEL member");
            writer
                .write_all(metadata.as_bytes())
                .expect("Failed to write WHEEL member");
        }

        writer.finish().expect("Failed to finish wheel archive");
        path
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// WHEEL metadata for a manylinux x86_64 CPython 3.12 build
#[allow(dead_code)]
pub const MANYLINUX_X86_64_METADATA: &str = "Wheel-Version: 1.0\n\
Generator: bdist_wheel\n\
Root-Is-Purelib: false\n\
Tag: cp312-cp312-manylinux_2_28_x86_64\n";

/// WHEEL metadata for a pure (any-platform) wheel
#[allow(dead_code)]
pub const PURE_WHEEL_METADATA: &str = "Wheel-Version: 1.0\n\
Generator: bdist_wheel\n\
Root-Is-Purelib: true\n\
Tag: py3-none-any\n";

/// WHEEL metadata for a macOS build
#[allow(dead_code)]
pub const MACOS_METADATA: &str = "Wheel-Version: 1.0\n\
Generator: bdist_wheel\n\
Root-Is-Purelib: false\n\
Tag: cp312-cp312-macosx_11_0_arm64\n";
