//! Layer archive writing
//!
//! Zips a staging tree into the layer archive with paths relative to
//! the staging root, so the runtime folder stays at the top level of
//! the archive as Lambda requires.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use walkdir::WalkDir;
use zip::{write::FileOptions, CompressionMethod, ZipWriter};

use crate::error::AssembleError;

/// Facts about a written archive, for the build summary
#[derive(Debug, Clone, serde::Serialize)]
pub struct ArchiveSummary {
    /// Path of the archive on disk
    pub path: PathBuf,
    /// Number of files stored
    pub files: usize,
    /// Size of the archive in bytes
    pub zipped_bytes: u64,
    /// Total size of the stored files before compression
    pub unzipped_bytes: u64,
    /// SHA-256 digest of the archive
    pub sha256: String,
}

/// Write a deflate-compressed zip of `staging_root` to `output`
pub fn write_archive(staging_root: &Path, output: &Path) -> Result<ArchiveSummary, AssembleError> {
    let archive_err = |e: &dyn std::fmt::Display| AssembleError::Archive {
        path: output.to_path_buf(),
        error: e.to_string(),
    };

    let file = File::create(output).map_err(|e| archive_err(&e))?;
    let mut writer = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut files = 0usize;
    let mut unzipped_bytes = 0u64;

    for entry in WalkDir::new(staging_root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path == staging_root {
            continue;
        }
        let relative = path
            .strip_prefix(staging_root)
            .map_err(|e| archive_err(&e))?;
        let name = relative.to_string_lossy().replace('\\', "/");

        if entry.file_type().is_dir() {
            writer
                .add_directory(format!("{name}/"), options)
                .map_err(|e| archive_err(&e))?;
        } else if entry.file_type().is_file() {
            writer
                .start_file(name.as_str(), options)
                .map_err(|e| archive_err(&e))?;
            let mut source = File::open(path).map_err(|e| archive_err(&e))?;
            unzipped_bytes += io::copy(&mut source, &mut writer).map_err(|e| archive_err(&e))?;
            files += 1;
        }
    }

    writer.finish().map_err(|e| archive_err(&e))?;

    let zipped_bytes = std::fs::metadata(output)
        .map(|m| m.len())
        .map_err(|e| archive_err(&e))?;
    let sha256 = file_sha256(output).map_err(|e| archive_err(&e))?;

    Ok(ArchiveSummary {
        path: output.to_path_buf(),
        files,
        zipped_bytes,
        unzipped_bytes,
        sha256,
    })
}

/// SHA-256 digest of a file, hex-encoded
pub fn file_sha256(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn stage_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let pkg = dir.path().join("python").join("numpy");
        std::fs::create_dir_all(&pkg).unwrap();
        std::fs::write(pkg.join("__init__.py"), b"version = '1.26.0'\n").unwrap();
        std::fs::write(dir.path().join("python").join("six.py"), b"# six\n").unwrap();
        dir
    }

    #[test]
    fn test_write_archive_keeps_runtime_folder_at_top() {
        let staging = stage_tree();
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("layer.zip");

        let summary = write_archive(staging.path(), &output).unwrap();
        assert_eq!(summary.files, 2);
        assert!(summary.zipped_bytes > 0);

        let mut archive = ZipArchive::new(File::open(&output).unwrap()).unwrap();
        let names: Vec<String> = archive.file_names().map(String::from).collect();
        assert!(
            names.iter().all(|n| n.starts_with("python/")),
            "all entries must live under python/: {names:?}"
        );
        assert!(names.contains(&"python/numpy/__init__.py".to_string()));

        // Stored content round-trips
        let mut member = archive.by_name("python/six.py").unwrap();
        let mut contents = String::new();
        use std::io::Read;
        member.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "# six\n");
    }

    #[test]
    fn test_summary_digest_matches_file() {
        let staging = stage_tree();
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("layer.zip");

        let summary = write_archive(staging.path(), &output).unwrap();
        assert_eq!(summary.sha256, file_sha256(&output).unwrap());
        assert_eq!(summary.sha256.len(), 64);
    }

    #[test]
    fn test_unzipped_bytes_counts_sources() {
        let staging = stage_tree();
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("layer.zip");

        let summary = write_archive(staging.path(), &output).unwrap();
        assert_eq!(summary.unzipped_bytes, 19 + 6);
    }
}
