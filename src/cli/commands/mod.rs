//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod node;
pub mod publish;
pub mod python;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::output;
use crate::config::defaults;
use crate::core::sanitize::{self, Ecosystem};
use crate::error::LayerError;
use crate::infra::aws::{publish_layer, PublishRequest};

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a Lambda layer from pip packages and/or wheel files
    Python {
        /// Package specifiers (e.g. numpy==1.26.0) or wheel file paths
        specs: Vec<String>,

        /// Target Python version (e.g. 3.12)
        #[arg(long)]
        python_version: Option<String>,

        /// Target architecture (x86_64, amd64, aarch64, arm64)
        #[arg(short, long)]
        architecture: Option<String>,

        /// Output archive path
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        publish: PublishFlags,
    },

    /// Build a Lambda layer from npm packages
    Node {
        /// Package specifiers (e.g. left-pad@1.3.0, @scope/pkg)
        specs: Vec<String>,

        /// Target Node.js major version (e.g. 20)
        #[arg(long)]
        node_version: Option<String>,

        /// Target architecture (x86_64, amd64, aarch64, arm64)
        #[arg(short, long)]
        architecture: Option<String>,

        /// Output archive path
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        publish: PublishFlags,
    },

    /// Publish an existing layer archive
    Publish {
        /// Path to the layer zip archive
        zip: PathBuf,

        /// Layer name to publish under
        #[arg(long)]
        layer_name: String,

        /// Compatible runtime identifier (e.g. python3.12, nodejs20.x)
        #[arg(long)]
        runtime: Vec<String>,

        /// Compatible architecture (x86_64, amd64, aarch64, arm64)
        #[arg(short, long)]
        architecture: Option<String>,

        /// AWS region
        #[arg(long)]
        region: Option<String>,

        /// Layer version description
        #[arg(long)]
        description: Option<String>,
    },
}

/// Publishing flags shared by the build commands
#[derive(Args, Debug, Default)]
pub struct PublishFlags {
    /// Publish the archive as a layer version after building
    #[arg(long)]
    pub publish: bool,

    /// Layer name (defaults to the archive name)
    #[arg(long, requires = "publish")]
    pub layer_name: Option<String>,

    /// AWS region
    #[arg(long, requires = "publish")]
    pub region: Option<String>,

    /// Layer version description
    #[arg(long, requires = "publish")]
    pub description: Option<String>,
}

impl Commands {
    /// Execute the command
    ///
    /// Domain errors roll up through [`LayerError`]; this is the
    /// boundary where they become `anyhow` for display and exit code.
    pub async fn run(self) -> Result<()> {
        match self {
            Self::Python {
                specs,
                python_version,
                architecture,
                output,
                publish,
            } => {
                python::execute(python::PythonOptions {
                    specs,
                    python_version,
                    architecture,
                    output,
                    publish,
                })
                .await?;
            }
            Self::Node {
                specs,
                node_version,
                architecture,
                output,
                publish,
            } => {
                node::execute(node::NodeOptions {
                    specs,
                    node_version,
                    architecture,
                    output,
                    publish,
                })
                .await?;
            }
            Self::Publish {
                zip,
                layer_name,
                runtime,
                architecture,
                region,
                description,
            } => {
                publish::execute(publish::PublishOptions {
                    zip,
                    layer_name,
                    runtimes: runtime,
                    architecture,
                    region,
                    description,
                })
                .await?;
            }
        }
        Ok(())
    }
}

/// Sanitize specifiers, warning on every mutation or drop
pub fn sanitize_specs(raw_specs: &[String], ecosystem: Ecosystem) -> Vec<String> {
    let mut specs = Vec::new();
    for raw in raw_specs {
        let sanitized = sanitize::sanitize_spec(raw, ecosystem);
        if sanitized.is_empty() {
            output::warn(&format!(
                "Dropping specifier '{}': empty after sanitization",
                sanitized.original
            ));
            continue;
        }
        if sanitized.was_modified() {
            output::warn(&format!(
                "Sanitized specifier '{}' to '{}'",
                sanitized.original, sanitized.value
            ));
        }
        specs.push(sanitized.value);
    }
    if specs.is_empty() && !raw_specs.is_empty() {
        tracing::warn!("All {} specifier(s) were dropped", raw_specs.len());
    }
    specs
}

/// Publish a freshly built archive when `--publish` was requested
pub async fn publish_archive(
    flags: &PublishFlags,
    zip_path: &Path,
    compatible_runtimes: Vec<String>,
    compatible_architectures: Vec<String>,
) -> Result<(), LayerError> {
    if !flags.publish {
        return Ok(());
    }

    let layer_name = flags.layer_name.clone().unwrap_or_else(|| {
        zip_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "lambda-layer".to_string())
    });

    let request = PublishRequest {
        layer_name,
        description: flags
            .description
            .clone()
            .unwrap_or_else(|| defaults::DEFAULT_LAYER_DESCRIPTION.to_string()),
        zip_path: zip_path.to_path_buf(),
        compatible_runtimes,
        compatible_architectures,
        region: flags.region.clone(),
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
