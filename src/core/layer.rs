//! Layer staging and naming
//!
//! A Lambda layer archive must carry its contents under a runtime
//! folder at the top level (`python/` or `nodejs/`); everything else
//! is invisible to the runtime. Staging happens in a temporary
//! directory shaped that way, and the archive name follows the
//! convention `{package}-{version}-{runtime-label}.zip` for a single
//! package or `{runtime}-{date}-{runtime-label}.zip` for several.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use time::OffsetDateTime;

use crate::config::defaults;
use crate::core::sanitize::{sanitize_file_name, Ecosystem, Sanitized};
use crate::error::AssembleError;

/// One requested package, reduced to what naming needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerItem {
    /// Package name (base name for wheels)
    pub name: String,
    /// Exactly pinned version, when one was requested
    pub version: Option<String>,
}

impl LayerItem {
    /// Create an item from a name and optional pinned version
    pub fn new(name: impl Into<String>, version: Option<String>) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

/// Compute the output archive filename for a set of requested packages
///
/// The result passes through the filename sanitizer; callers must warn
/// when the sanitized value differs from the raw one.
pub fn layer_file_name(
    items: &[LayerItem],
    ecosystem: Ecosystem,
    runtime_label: &str,
) -> Sanitized {
    let raw = match items {
        [single] => match &single.version {
            Some(version) => format!("{}-{}-{}.zip", single.name, version, runtime_label),
            None => format!("{}-{}.zip", single.name, runtime_label),
        },
        _ => {
            let date = OffsetDateTime::now_utc().date();
            format!(
                "{}-{:04}-{:02}-{:02}-{}.zip",
                ecosystem.layer_dir(),
                date.year(),
                u8::from(date.month()),
                date.day(),
                runtime_label
            )
        }
    };
    sanitize_file_name(&raw)
}

/// Temporary staging area shaped like a layer archive
///
/// The directory is removed on drop; only the written archive survives
/// a build.
#[derive(Debug)]
pub struct Staging {
    temp: TempDir,
    content: PathBuf,
}

impl Staging {
    /// Create a staging area with the runtime folder for `ecosystem`
    pub fn create(ecosystem: Ecosystem) -> Result<Self, AssembleError> {
        let temp = TempDir::new().map_err(|e| AssembleError::Io {
            path: std::env::temp_dir(),
            error: e.to_string(),
        })?;
        let content = temp.path().join(ecosystem.layer_dir());
        std::fs::create_dir(&content).map_err(|e| AssembleError::Io {
            path: content.clone(),
            error: e.to_string(),
        })?;
        Ok(Self { temp, content })
    }

    /// Root of the staging tree (what gets zipped)
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// The runtime folder installers write into
    pub fn content_dir(&self) -> &Path {
        &self.content
    }

    /// Total size of all staged files in bytes
    pub fn total_size(&self) -> u64 {
        walkdir::WalkDir::new(self.root())
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| entry.metadata().ok())
            .map(|meta| meta.len())
            .sum()
    }

    /// Whether installation produced any files at all
    pub fn is_empty(&self) -> bool {
        walkdir::WalkDir::new(self.root())
            .into_iter()
            .filter_map(Result::ok)
            .all(|entry| !entry.file_type().is_file())
    }

    /// Warn when the staged contents exceed the Lambda unzipped limit
    pub fn warn_if_oversized(&self) {
        let size = self.total_size();
        if size > defaults::LAYER_UNZIPPED_LIMIT_BYTES {
            tracing::warn!(
                "Staged contents are {} bytes, above the Lambda unzipped layer limit of {} bytes; \
                 the layer may be rejected at publish time",
                size,
                defaults::LAYER_UNZIPPED_LIMIT_BYTES
            );
        }
    }
}
