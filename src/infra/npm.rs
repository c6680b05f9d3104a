//! npm invocation
//!
//! Installs Node.js packages into the staging directory. npm with
//! `--prefix` creates `node_modules` under the given directory, which
//! is exactly the `nodejs/node_modules` layout Lambda resolves.

use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::error::AssembleError;

/// Wrapper around a discovered npm executable
#[derive(Debug)]
pub struct NpmInstaller {
    npm: PathBuf,
}

impl NpmInstaller {
    /// Locate npm on PATH
    pub fn discover() -> Result<Self, AssembleError> {
        let npm = which::which("npm").map_err(|_| AssembleError::InstallerNotFound {
            tool: "npm".to_string(),
            ecosystem: "Node.js".to_string(),
        })?;
        Ok(Self { npm })
    }

    /// Install package specifiers into `prefix/node_modules`
    pub async fn install(&self, specs: &[String], prefix: &Path) -> Result<(), AssembleError> {
        let args = install_args(specs, prefix);
        tracing::debug!("Running {} {}", self.npm.display(), args.join(" "));
        let output = Command::new(&self.npm)
            .args(&args)
            .output()
            .await
            .map_err(|e| AssembleError::Io {
                path: self.npm.clone(),
                error: e.to_string(),
            })?;
        if !output.status.success() {
            return Err(AssembleError::InstallerFailed {
                tool: "npm".to_string(),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Arguments for an npm install into a prefix directory
pub fn install_args(specs: &[String], prefix: &Path) -> Vec<String> {
    let mut args = vec![
        "install".to_string(),
        "--prefix".to_string(),
        prefix.display().to_string(),
        "--no-fund".to_string(),
        "--no-audit".to_string(),
    ];
    args.extend(specs.iter().cloned());
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_args_use_prefix() {
        let args = install_args(
            &["@aws-sdk/client-s3@3.600.0".to_string()],
            Path::new("/tmp/stage/nodejs"),
        );
        let joined = args.join(" ");
        assert!(joined.starts_with("install --prefix /tmp/stage/nodejs"));
        assert!(joined.ends_with("@aws-sdk/client-s3@3.600.0"));
    }
}
