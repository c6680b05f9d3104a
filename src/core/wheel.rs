//! Wheel compatibility tag parsing
//!
//! A wheel's compatibility is declared twice: in its filename
//! (`{name}-{version}-{python}-{abi}-{platform}.whl`) and in the
//! `Tag:` lines of its embedded `*.dist-info/WHEEL` metadata member.
//! The metadata is authoritative: a wheel can be renamed to spoof its
//! filename, so compatibility verdicts must be based on what the
//! archive actually declares. The filename parse is only a fallback
//! for old wheels that lack the metadata member.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use zip::ZipArchive;

use crate::core::platform::{Architecture, PythonVersion};
use crate::error::{MetadataError, WheelError};

/// Architecture facet derived from a wheel's platform tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelArchitecture {
    /// A recognized concrete architecture
    Known(Architecture),
    /// Pure wheel, runs anywhere (`any` platform tag)
    Any,
    /// Platform tags name no recognized architecture; the wheel is
    /// treated as incompatible with every concrete architecture
    Unknown,
}

/// Parsed wheel compatibility tag set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelTag {
    /// Python tag, e.g. `cp313` or `py3` (`any` when unparseable)
    pub python_tag: String,
    /// ABI tag, e.g. `cp313` or `none`
    pub abi_tag: String,
    /// One or more platform tags, e.g.
    /// `["manylinux_2_17_x86_64", "manylinux2014_x86_64"]`
    pub platform_tags: Vec<String>,
}

impl WheelTag {
    /// Parse a tag set from a wheel filename
    ///
    /// The format is ambiguous for dashed names, so parsing anchors on
    /// the tail: the last three dash-separated components of the stem
    /// are always python-abi-platform. Fewer than five components
    /// degrade to the fully wildcard tag.
    pub fn from_filename(file_name: &str) -> Result<Self, WheelError> {
        let stem = file_name
            .strip_suffix(".whl")
            .ok_or_else(|| WheelError::NotAWheel {
                name: file_name.to_string(),
            })?;

        let parts: Vec<&str> = stem.split('-').collect();
        if parts.len() < 5 {
            return Ok(Self {
                python_tag: "any".to_string(),
                abi_tag: "none".to_string(),
                platform_tags: vec!["any".to_string()],
            });
        }

        let platform = parts[parts.len() - 1];
        Ok(Self {
            python_tag: parts[parts.len() - 3].to_string(),
            abi_tag: parts[parts.len() - 2].to_string(),
            platform_tags: platform.split('.').map(str::to_string).collect(),
        })
    }

    /// Architecture facet of the platform tags
    ///
    /// A bare `any` tag is matched only by exact equality; substring
    /// search must not let `any` satisfy a concrete architecture.
    pub fn architecture(&self) -> WheelArchitecture {
        for arch in [Architecture::X86_64, Architecture::Aarch64] {
            if self
                .platform_tags
                .iter()
                .any(|tag| arch.tag_substrings().iter().any(|sub| tag.contains(sub)))
            {
                return WheelArchitecture::Known(arch);
            }
        }
        if self.platform_tags.iter().any(|tag| tag == "any") {
            WheelArchitecture::Any
        } else {
            WheelArchitecture::Unknown
        }
    }

    /// Python version facet, `None` meaning "any"
    ///
    /// Only CPython tags (`cp` + digits) pin a version: `cp39` is 3.9,
    /// `cp312` is 3.12 (first digit is the major, the rest the minor).
    pub fn python_version(&self) -> Option<PythonVersion> {
        let digits = self.python_tag.strip_prefix("cp")?;
        if digits.len() < 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let major: u8 = digits[..1].parse().ok()?;
        let minor: u8 = digits[1..].parse().ok()?;
        Some(PythonVersion::new(major, minor))
    }

    /// Whether the wheel declares a concrete (non-`any`) platform
    pub fn has_concrete_platform(&self) -> bool {
        self.platform_tags.iter().any(|tag| tag != "any")
    }

    /// Platform tags joined back into pip's dot-separated form
    pub fn platform_spec(&self) -> String {
        self.platform_tags.join(".")
    }
}

/// Distribution name and version from a wheel filename
///
/// Wheel filenames normalize dashes in names to underscores, so the
/// first two stem components are unambiguous when the file follows the
/// format. Returns `None` for stems too short to carry both.
pub fn name_and_version(file_name: &str) -> Option<(&str, &str)> {
    let stem = file_name.strip_suffix(".whl")?;
    let mut parts = stem.split('-');
    let name = parts.next()?;
    let version = parts.next()?;
    if name.is_empty() || version.is_empty() {
        return None;
    }
    Some((name, version))
}

/// Where a wheel's tags were read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSource {
    /// Authoritative `*.dist-info/WHEEL` metadata
    Metadata,
    /// Filename fallback (lower confidence)
    Filename,
}

/// Read the authoritative tag set from a wheel's WHEEL metadata member
pub fn read_wheel_tag(path: &Path) -> Result<WheelTag, MetadataError> {
    let file = File::open(path).map_err(|e| MetadataError::OpenArchive {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    let mut archive = ZipArchive::new(file).map_err(|e| MetadataError::OpenArchive {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    // The WHEEL member lives directly inside {name}-{version}.dist-info/
    let member = archive
        .file_names()
        .find(|name| name.ends_with(".dist-info/WHEEL") && name.matches('/').count() == 1)
        .map(str::to_string)
        .ok_or_else(|| MetadataError::MissingWheelMember {
            path: path.to_path_buf(),
        })?;

    let mut contents = String::new();
    archive
        .by_name(&member)
        .map_err(|e| MetadataError::ReadMember {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?
        .read_to_string(&mut contents)
        .map_err(|e| MetadataError::ReadMember {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

    parse_wheel_metadata(&contents).ok_or_else(|| MetadataError::NoTags {
        path: path.to_path_buf(),
    })
}

/// Parse the `Tag:` lines of a WHEEL metadata document
///
/// A wheel may declare several tags (`Tag:` line per combination, and
/// dot-separated platform components inside each); all platform tags
/// are collected.
fn parse_wheel_metadata(contents: &str) -> Option<WheelTag> {
    let mut python_tags: Vec<String> = Vec::new();
    let mut abi_tags: Vec<String> = Vec::new();
    let mut platform_tags: Vec<String> = Vec::new();

    for line in contents.lines() {
        let Some(value) = line.strip_prefix("Tag:") else {
            continue;
        };
        let mut fields = value.trim().splitn(3, '-');
        let (Some(python), Some(abi), Some(platform)) =
            (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };
        push_unique(&mut python_tags, python);
        push_unique(&mut abi_tags, abi);
        for tag in platform.split('.') {
            push_unique(&mut platform_tags, tag);
        }
    }

    if platform_tags.is_empty() {
        return None;
    }
    Some(WheelTag {
        python_tag: python_tags.join("."),
        abi_tag: abi_tags.join("."),
        platform_tags,
    })
}

fn push_unique(tags: &mut Vec<String>, tag: &str) {
    if !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_string());
    }
}

/// Load a wheel's tag set, preferring metadata over the filename
///
/// Metadata read failures degrade to the filename parse with an
/// explicit warning instead of hard-failing, since old wheels may lack
/// the WHEEL member entirely.
pub fn load_wheel_tag(path: &Path) -> Result<(WheelTag, TagSource), WheelError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| WheelError::NotAWheel {
            name: path.display().to_string(),
        })?;
    if !file_name.ends_with(".whl") {
        return Err(WheelError::NotAWheel {
            name: file_name.to_string(),
        });
    }
    if !path.is_file() {
        return Err(WheelError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    match read_wheel_tag(path) {
        Ok(tag) => Ok((tag, TagSource::Metadata)),
        Err(e) => {
            tracing::warn!(
                "{e}; falling back to filename-based compatibility check for '{file_name}'"
            );
            let tag = WheelTag::from_filename(file_name)?;
            Ok((tag, TagSource::Filename))
        }
    }
}
