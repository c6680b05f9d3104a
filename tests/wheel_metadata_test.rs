//! Integration tests for wheel tag loading
//!
//! These tests build real wheel archives on disk and verify that tag
//! loading prefers the embedded WHEEL metadata over the filename, and
//! that compatibility verdicts are based on what the archive actually
//! declares rather than what its name claims.

mod common;

use common::{TestProject, MACOS_METADATA, MANYLINUX_X86_64_METADATA, PURE_WHEEL_METADATA};

use lambda_layer::core::compat::{validate, CompatibilityVerdict};
use lambda_layer::core::platform::Architecture;
use lambda_layer::core::wheel::{load_wheel_tag, TagSource};
use lambda_layer::error::WheelError;

#[test]
fn test_metadata_tags_are_preferred() {
    let project = TestProject::new();
    let path = project.write_wheel(
        "pkg-1.0-cp312-cp312-manylinux_2_28_x86_64.whl",
        Some(MANYLINUX_X86_64_METADATA),
    );

    let (tag, source) = load_wheel_tag(&path).unwrap();
    assert_eq!(source, TagSource::Metadata);
    assert_eq!(tag.python_tag, "cp312");
    assert_eq!(tag.abi_tag, "cp312");
    assert_eq!(tag.platform_tags, vec!["manylinux_2_28_x86_64"]);
}

#[test]
fn test_renamed_wheel_does_not_pass_compatibility() {
    // A macOS wheel renamed to look like a manylinux build: the
    // embedded metadata wins and the wheel is rejected as OS-incompatible
    let project = TestProject::new();
    let path = project.write_wheel(
        "pkg-1.0-cp312-cp312-manylinux_2_28_x86_64.whl",
        Some(MACOS_METADATA),
    );

    let (tag, source) = load_wheel_tag(&path).unwrap();
    assert_eq!(source, TagSource::Metadata);
    assert_eq!(tag.platform_tags, vec!["macosx_11_0_arm64"]);
    assert_eq!(
        validate(&tag, Architecture::X86_64),
        CompatibilityVerdict::OsIncompatible
    );
    assert_eq!(
        validate(&tag, Architecture::Aarch64),
        CompatibilityVerdict::OsIncompatible
    );
}

#[test]
fn test_legacy_wheel_falls_back_to_filename() {
    // No WHEEL member at all; the filename parse is the only source
    let project = TestProject::new();
    let path = project.write_wheel("pkg-1.0-cp311-cp311-manylinux2014_aarch64.whl", None);

    let (tag, source) = load_wheel_tag(&path).unwrap();
    assert_eq!(source, TagSource::Filename);
    assert_eq!(tag.python_tag, "cp311");
    assert_eq!(tag.platform_tags, vec!["manylinux2014_aarch64"]);
}

#[test]
fn test_metadata_without_tags_falls_back_to_filename() {
    let project = TestProject::new();
    let path = project.write_wheel(
        "pkg-1.0-py3-none-any.whl",
        Some("Wheel-Version: 1.0\nGenerator: bdist_wheel\n"),
    );

    let (tag, source) = load_wheel_tag(&path).unwrap();
    assert_eq!(source, TagSource::Filename);
    assert_eq!(tag.platform_tags, vec!["any"]);
}

#[test]
fn test_pure_wheel_is_compatible_everywhere() {
    let project = TestProject::new();
    let path = project.write_wheel("pkg-1.0-py3-none-any.whl", Some(PURE_WHEEL_METADATA));

    let (tag, _) = load_wheel_tag(&path).unwrap();
    assert_eq!(
        validate(&tag, Architecture::X86_64),
        CompatibilityVerdict::Compatible
    );
    assert_eq!(
        validate(&tag, Architecture::Aarch64),
        CompatibilityVerdict::Compatible
    );
}

#[test]
fn test_missing_wheel_file_is_an_error() {
    let project = TestProject::new();
    let path = project.path().join("ghost-1.0-py3-none-any.whl");

    let err = load_wheel_tag(&path).unwrap_err();
    assert!(matches!(err, WheelError::FileNotFound { .. }));
}

#[test]
fn test_non_wheel_extension_is_an_error() {
    let project = TestProject::new();
    project.create_file("pkg-1.0.tar.gz", "not a wheel");
    let path = project.path().join("pkg-1.0.tar.gz");

    let err = load_wheel_tag(&path).unwrap_err();
    assert!(matches!(err, WheelError::NotAWheel { .. }));
}

#[test]
fn test_corrupt_archive_falls_back_to_filename() {
    // A .whl that is not a valid zip degrades to the filename parse
    let project = TestProject::new();
    project.create_file("pkg-1.0-cp312-cp312-manylinux_2_28_x86_64.whl", "garbage");
    let path = project
        .path()
        .join("pkg-1.0-cp312-cp312-manylinux_2_28_x86_64.whl");

    let (tag, source) = load_wheel_tag(&path).unwrap();
    assert_eq!(source, TagSource::Filename);
    assert_eq!(tag.platform_tags, vec!["manylinux_2_28_x86_64"]);
}
