//! Python layer build command
//!
//! Drives the full pipeline: sanitize specifiers, parse wheel tags,
//! arbitrate constraints, validate Lambda compatibility, install with
//! pip into a staged `python/` tree, zip, and optionally publish.
//! Installation never starts while a conflict is still possible.

use std::path::{Path, PathBuf};

use crate::cli::commands::{publish_archive, sanitize_specs, PublishFlags};
use crate::cli::output;
use crate::core::arbiter::{arbitrate, TargetDescriptor};
use crate::core::archive::write_archive;
use crate::core::compat::ensure_compatible;
use crate::core::layer::{layer_file_name, LayerItem, Staging};
use crate::core::platform::{Architecture, PythonVersion};
use crate::core::sanitize::{self, Ecosystem};
use crate::core::wheel::{self, load_wheel_tag, TagSource, WheelArchitecture, WheelTag};
use crate::error::{AssembleError, LayerError, SpecifierError};
use crate::infra::pip::PipInstaller;

/// Python build options
pub struct PythonOptions {
    /// Package specifiers and/or wheel file paths
    pub specs: Vec<String>,
    /// Target Python version (`--python-version`)
    pub python_version: Option<String>,
    /// Target architecture alias (`--architecture`)
    pub architecture: Option<String>,
    /// Output archive path
    pub output: Option<PathBuf>,
    /// Publish the archive after building
    pub publish: PublishFlags,
}

/// Execute the python command
pub async fn execute(options: PythonOptions) -> Result<(), LayerError> {
    let ecosystem = Ecosystem::Python;

    // Wheel paths and registry specifiers travel through different
    // install paths
    let (wheel_paths, raw_specs): (Vec<String>, Vec<String>) = options
        .specs
        .iter()
        .cloned()
        .partition(|s| s.ends_with(".whl"));

    if wheel_paths.is_empty() && raw_specs.is_empty() {
        return Err(SpecifierError::NothingRequested.into());
    }

    let specs = sanitize_specs(&raw_specs, ecosystem);
    if specs.is_empty() && wheel_paths.is_empty() {
        return Err(SpecifierError::AllSpecifiersDropped.into());
    }

    let user_python: Option<PythonVersion> = options
        .python_version
        .as_deref()
        .map(str::parse)
        .transpose()?;
    let user_arch: Option<Architecture> = options
        .architecture
        .as_deref()
        .map(str::parse)
        .transpose()?;

    // Read tags up front and arbitrate before anything is installed;
    // facets pinned by earlier wheels constrain later ones
    let mut wheels: Vec<(PathBuf, WheelTag)> = Vec::new();
    for raw in &wheel_paths {
        let path = PathBuf::from(raw);
        let (tag, source) = load_wheel_tag(&path)?;
        if source == TagSource::Filename {
            tracing::debug!("Using filename tags for {}", path.display());
        }
        wheels.push((path, tag));
    }

    let target = resolve_target(user_python, user_arch, &wheels)?;
    for (path, tag) in &wheels {
        ensure_compatible(tag, target.architecture).map_err(|source| {
            LayerError::Compatibility {
                path: path.clone(),
                source,
            }
        })?;
    }

    tracing::info!(
        "Building layer for {} on {} (platform {}, abi {})",
        target.python_version.runtime(),
        target.architecture,
        target.platform_tag,
        target.abi_tag
    );

    let staging = Staging::create(ecosystem)?;
    let pip = PipInstaller::discover()?;

    let spinner = output::create_spinner("Installing packages with pip...");
    for (path, _) in &wheels {
        pip.install_wheel(path, staging.content_dir()).await?;
    }
    if !specs.is_empty() {
        pip.install_packages(&specs, &target, staging.content_dir())
            .await?;
    }
    spinner.finish_and_clear();

    if staging.is_empty() {
        return Err(AssembleError::EmptyStaging.into());
    }
    staging.warn_if_oversized();

    let items = layer_items(&specs, &wheel_paths, ecosystem);
    let runtime_label = target.python_version.runtime();
    let output_path = resolve_output_path(options.output, &items, ecosystem, &runtime_label)?;

    let summary = write_archive(staging.root(), &output_path)?;

    if output::is_json() {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        output::status_line(&format!(
            "{} Layer archive written: {}",
            output::status::SUCCESS,
            summary.path.display()
        ));
        output::status_line(&format!(
            "  Runtime: {} ({})",
            runtime_label,
            target.architecture.aws_name()
        ));
        output::status_line(&format!(
            "  Files: {}, size: {} bytes, sha256: {}",
            summary.files, summary.zipped_bytes, summary.sha256
        ));
    }

    publish_archive(
        &options.publish,
        &summary.path,
        vec![runtime_label],
        vec![target.architecture.aws_name().to_string()],
    )
    .await
}

/// Fold user flags and wheel tags into one concrete target
///
/// Facets pinned by a wheel constrain every other wheel, so disagreeing
/// wheels conflict regardless of order; defaults are applied only at
/// the end and never count as declared constraints. The platform tag
/// set is adopted from the first wheel declaring a concrete one; pure
/// wheels never displace it.
fn resolve_target(
    user_python: Option<PythonVersion>,
    user_arch: Option<Architecture>,
    wheels: &[(PathBuf, WheelTag)],
) -> Result<TargetDescriptor, LayerError> {
    let mut effective_python = user_python;
    let mut effective_arch = user_arch;
    let mut wheel_platform = None;
    for (_, tag) in wheels {
        arbitrate(effective_python, effective_arch, Some(tag))?;
        if let Some(pinned) = tag.python_version() {
            effective_python = Some(pinned);
        }
        if let WheelArchitecture::Known(pinned) = tag.architecture() {
            effective_arch = Some(pinned);
        }
        if wheel_platform.is_none() && tag.has_concrete_platform() {
            wheel_platform = Some(tag.platform_spec());
        }
    }
    let mut target = arbitrate(effective_python, effective_arch, None)?;
    if let Some(platform_tag) = wheel_platform {
        target.platform_tag = platform_tag;
    }
    Ok(target)
}

/// Reduce requested specs and wheels to naming inputs
fn layer_items(specs: &[String], wheel_paths: &[String], ecosystem: Ecosystem) -> Vec<LayerItem> {
    let mut items: Vec<LayerItem> = specs
        .iter()
        .map(|spec| {
            LayerItem::new(
                sanitize::extract_name(spec, ecosystem),
                sanitize::pinned_version(spec, ecosystem).map(str::to_string),
            )
        })
        .collect();
    for raw in wheel_paths {
        let file_name = Path::new(raw)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(raw);
        match wheel::name_and_version(file_name) {
            Some((name, version)) => {
                items.push(LayerItem::new(name, Some(version.to_string())));
            }
            None => items.push(LayerItem::new(file_name.trim_end_matches(".whl"), None)),
        }
    }
    items
}

/// Pick the archive path: explicit `--output`, or the naming convention
/// in the current directory
pub fn resolve_output_path(
    output: Option<PathBuf>,
    items: &[LayerItem],
    ecosystem: Ecosystem,
    runtime_label: &str,
) -> Result<PathBuf, LayerError> {
    if let Some(path) = output {
        return Ok(path);
    }
    let name = layer_file_name(items, ecosystem, runtime_label);
    if name.was_modified() {
        output::warn(&format!(
            "Sanitized archive name '{}' to '{}'",
            name.original, name.value
        ));
    }
    Ok(std::env::current_dir()?.join(name.value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_target_defaults() {
        let target = resolve_target(None, None, &[]).unwrap();
        assert_eq!(target.python_version, PythonVersion::new(3, 12));
        assert_eq!(target.architecture, Architecture::X86_64);
    }

    #[test]
    fn test_resolve_target_disagreeing_wheels_conflict() {
        let cp312 = WheelTag::from_filename("a-1-cp312-cp312-manylinux_2_28_x86_64.whl").unwrap();
        let cp39 = WheelTag::from_filename("b-1-cp39-cp39-manylinux2014_x86_64.whl").unwrap();
        let wheels = vec![
            (PathBuf::from("a.whl"), cp312),
            (PathBuf::from("b.whl"), cp39),
        ];
        assert!(resolve_target(None, None, &wheels).is_err());
    }

    #[test]
    fn test_resolve_target_concrete_platform_survives_later_pure_wheel() {
        let concrete = WheelTag::from_filename(
            "a-1.0-cp39-cp39-manylinux_2_17_x86_64.manylinux2014_x86_64.whl",
        )
        .unwrap();
        let pure = WheelTag::from_filename("b-1.0-py3-none-any.whl").unwrap();
        let wheels = vec![
            (PathBuf::from("a.whl"), concrete),
            (PathBuf::from("b.whl"), pure),
        ];
        let target = resolve_target(None, None, &wheels).unwrap();
        assert_eq!(
            target.platform_tag,
            "manylinux_2_17_x86_64.manylinux2014_x86_64"
        );
    }

    #[test]
    fn test_resolve_target_platform_independent_of_wheel_order() {
        let concrete = WheelTag::from_filename(
            "a-1.0-cp39-cp39-manylinux_2_17_x86_64.manylinux2014_x86_64.whl",
        )
        .unwrap();
        let pure = WheelTag::from_filename("b-1.0-py3-none-any.whl").unwrap();
        let wheels = vec![
            (PathBuf::from("b.whl"), pure),
            (PathBuf::from("a.whl"), concrete),
        ];
        let target = resolve_target(None, None, &wheels).unwrap();
        assert_eq!(
            target.platform_tag,
            "manylinux_2_17_x86_64.manylinux2014_x86_64"
        );
    }

    #[test]
    fn test_resolve_target_adopts_wheel_facets() {
        let tag = WheelTag::from_filename("a-1-cp313-cp313-manylinux_2_28_aarch64.whl").unwrap();
        let wheels = vec![(PathBuf::from("a.whl"), tag)];
        let target = resolve_target(None, None, &wheels).unwrap();
        assert_eq!(target.python_version, PythonVersion::new(3, 13));
        assert_eq!(target.architecture, Architecture::Aarch64);
    }

    #[test]
    fn test_layer_items_from_specs_and_wheels() {
        let items = layer_items(
            &["numpy==1.26.0".to_string(), "requests".to_string()],
            &["dist/pandas-2.2.0-cp312-cp312-manylinux_2_28_x86_64.whl".to_string()],
            Ecosystem::Python,
        );
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], LayerItem::new("numpy", Some("1.26.0".to_string())));
        assert_eq!(items[1], LayerItem::new("requests", None));
        assert_eq!(items[2], LayerItem::new("pandas", Some("2.2.0".to_string())));
    }
}
