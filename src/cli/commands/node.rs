//! Node.js layer build command
//!
//! Simpler than the Python pipeline: npm packages are
//! architecture-independent at install time, so no platform
//! arbitration is needed. The architecture flag only feeds the publish
//! metadata.

use std::path::PathBuf;

use crate::cli::commands::{publish_archive, sanitize_specs, PublishFlags};
use crate::cli::output;
use crate::config::defaults;
use crate::core::archive::write_archive;
use crate::core::layer::{LayerItem, Staging};
use crate::core::platform::Architecture;
use crate::core::sanitize::{self, Ecosystem};
use crate::error::{AssembleError, LayerError, SpecifierError};
use crate::infra::npm::NpmInstaller;

/// Node build options
pub struct NodeOptions {
    /// Package specifiers
    pub specs: Vec<String>,
    /// Target Node.js major version (`--node-version`)
    pub node_version: Option<String>,
    /// Target architecture alias, publish metadata only
    pub architecture: Option<String>,
    /// Output archive path
    pub output: Option<PathBuf>,
    /// Publish the archive after building
    pub publish: PublishFlags,
}

/// Execute the node command
pub async fn execute(options: NodeOptions) -> Result<(), LayerError> {
    let ecosystem = Ecosystem::Node;

    if options.specs.is_empty() {
        return Err(SpecifierError::NothingRequested.into());
    }
    let specs = sanitize_specs(&options.specs, ecosystem);
    if specs.is_empty() {
        return Err(SpecifierError::AllSpecifiersDropped.into());
    }

    let node_version = validate_node_version(
        options
            .node_version
            .as_deref()
            .unwrap_or(defaults::DEFAULT_NODE_VERSION),
    )?;
    let architecture: Architecture = match options.architecture.as_deref() {
        Some(alias) => alias.parse()?,
        None => defaults::DEFAULT_ARCHITECTURE,
    };

    let runtime = format!("nodejs{node_version}.x");
    let runtime_label = format!("nodejs{node_version}");
    tracing::info!("Building layer for {runtime} on {architecture}");

    let staging = Staging::create(ecosystem)?;
    let npm = NpmInstaller::discover()?;

    let spinner = output::create_spinner("Installing packages with npm...");
    npm.install(&specs, staging.content_dir()).await?;
    spinner.finish_and_clear();

    if staging.is_empty() {
        return Err(AssembleError::EmptyStaging.into());
    }
    staging.warn_if_oversized();

    let items: Vec<LayerItem> = specs
        .iter()
        .map(|spec| {
            LayerItem::new(
                sanitize::extract_name(spec, ecosystem),
                sanitize::pinned_version(spec, ecosystem).map(str::to_string),
            )
        })
        .collect();
    let output_path = super::python::resolve_output_path(
        options.output,
        &items,
        ecosystem,
        &runtime_label,
    )?;

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
            runtime,
            architecture.aws_name()
        ));
        output::status_line(&format!(
            "  Files: {}, size: {} bytes, sha256: {}",
            summary.files, summary.zipped_bytes, summary.sha256
        ));
    }

    publish_archive(
        &options.publish,
        &summary.path,
        vec![runtime],
        vec![architecture.aws_name().to_string()],
    )
    .await
}

/// Validate a Node.js major version flag (digits only)
fn validate_node_version(value: &str) -> Result<&str, SpecifierError> {
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(value)
    } else {
        Err(SpecifierError::InvalidVersionFormat {
            value: value.to_string(),
        })
    }
}
