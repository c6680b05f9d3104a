//! pip invocation
//!
//! Installs packages into the staging directory with the target's
//! platform constraints. Installation is sequenced strictly after
//! arbitration and validation succeed; nothing speculative runs while
//! conflicts are still possible.

use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::core::arbiter::TargetDescriptor;
use crate::error::AssembleError;

/// Wrapper around a discovered pip executable
#[derive(Debug)]
pub struct PipInstaller {
    pip: PathBuf,
}

impl PipInstaller {
    /// Locate pip on PATH (`pip3` preferred over `pip`)
    pub fn discover() -> Result<Self, AssembleError> {
        let pip = which::which("pip3")
            .or_else(|_| which::which("pip"))
            .map_err(|_| AssembleError::InstallerNotFound {
                tool: "pip".to_string(),
                ecosystem: "Python".to_string(),
            })?;
        Ok(Self { pip })
    }

    /// Install package specifiers cross-platform into `dest`
    pub async fn install_packages(
        &self,
        specs: &[String],
        target: &TargetDescriptor,
        dest: &Path,
    ) -> Result<(), AssembleError> {
        self.run(&package_install_args(specs, target, dest)).await
    }

    /// Install a local, already-validated wheel file into `dest`
    ///
    /// Dependencies are deliberately excluded: they would be resolved
    /// for the host platform, not the Lambda target.
    pub async fn install_wheel(&self, wheel: &Path, dest: &Path) -> Result<(), AssembleError> {
        self.run(&wheel_install_args(wheel, dest)).await
    }

    async fn run(&self, args: &[String]) -> Result<(), AssembleError> {
        tracing::debug!("Running {} {}", self.pip.display(), args.join(" "));
        let output = Command::new(&self.pip)
            .args(args)
            .output()
            .await
            .map_err(|e| AssembleError::Io {
                path: self.pip.clone(),
                error: e.to_string(),
            })?;
        if !output.status.success() {
            return Err(AssembleError::InstallerFailed {
                tool: "pip".to_string(),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Arguments for a cross-platform package installation
pub fn package_install_args(
    specs: &[String],
    target: &TargetDescriptor,
    dest: &Path,
) -> Vec<String> {
    let mut args = vec![
        "install".to_string(),
        "--target".to_string(),
        dest.display().to_string(),
    ];
    // A target adopted from a multi-tag wheel carries several
    // acceptable platforms; pip expects one --platform flag per tag
    for tag in target.platform_tag.split('.') {
        args.push("--platform".to_string());
        args.push(tag.to_string());
    }
    args.extend([
        "--implementation".to_string(),
        "cp".to_string(),
        "--python-version".to_string(),
        target.python_version.to_string(),
        "--abi".to_string(),
        target.abi_tag.clone(),
        "--only-binary=:all:".to_string(),
    ]);
    args.extend(specs.iter().cloned());
    args
}

/// Arguments for installing a local wheel file
pub fn wheel_install_args(wheel: &Path, dest: &Path) -> Vec<String> {
    vec![
        "install".to_string(),
        wheel.display().to_string(),
        "--target".to_string(),
        dest.display().to_string(),
        "--no-deps".to_string(),
    ]
}
