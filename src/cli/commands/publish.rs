//! Standalone publish command
//!
//! Publishes an already-built layer archive as a new layer version.

use std::path::PathBuf;

use crate::cli::output;
use crate::config::defaults;
use crate::core::platform::Architecture;
use crate::error::LayerError;
use crate::infra::aws::{publish_layer, PublishRequest};

/// Publish options
pub struct PublishOptions {
    /// Archive to upload
    pub zip: PathBuf,
    /// Layer name to publish under
    pub layer_name: String,
    /// Compatible runtime identifiers
    pub runtimes: Vec<String>,
    /// Target architecture alias
    pub architecture: Option<String>,
    /// AWS region
    pub region: Option<String>,
    /// Layer version description
    pub description: Option<String>,
}

/// Execute the publish command
pub async fn execute(options: PublishOptions) -> Result<(), LayerError> {
    if !options.zip.is_file() {
        return Err(LayerError::Generic(format!(
            "Archive not found: {}",
            options.zip.display()
        )));
    }

    let compatible_architectures = match options.architecture.as_deref() {
        Some(alias) => {
            let arch: Architecture = alias.parse()?;
            vec![arch.aws_name().to_string()]
        }
        None => Vec::new(),
    };

    let request = PublishRequest {
        layer_name: options.layer_name,
        description: options
            .description
            .unwrap_or_else(|| defaults::DEFAULT_LAYER_DESCRIPTION.to_string()),
        zip_path: options.zip,
        compatible_runtimes: options.runtimes,
        compatible_architectures,
        region: options.region,
    };

    let spinner = output::create_spinner("Publishing layer version...");
    let published = publish_layer(&request).await?;
    spinner.finish_and_clear();

    if output::is_json() {
        println!("{}", serde_json::to_string_pretty(&published)?);
    } else {
        output::status_line(&format!(
            "{} Published layer version {}: {}",
            output::status::SUCCESS,
            published.version,
            published.layer_version_arn
        ));
    }
    Ok(())
}
