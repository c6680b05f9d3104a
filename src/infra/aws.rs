//! Layer publishing through the AWS CLI
//!
//! Calls `aws lambda publish-layer-version` and parses the JSON
//! response. The architecture string here is the AWS-facing alias
//! (`arm64`, never `aarch64`); callers derive it from the same
//! [`crate::core::platform::Architecture`] value pip saw.

use std::path::PathBuf;

use tokio::process::Command;

use crate::error::PublishError;

/// A publish-layer-version request
#[derive(Debug, Clone)]
pub struct PublishRequest {
    /// Layer name to publish under
    pub layer_name: String,
    /// Layer version description
    pub description: String,
    /// Archive to upload
    pub zip_path: PathBuf,
    /// CompatibleRuntimes values, e.g. `["python3.12"]`
    pub compatible_runtimes: Vec<String>,
    /// CompatibleArchitectures values (AWS aliases), e.g. `["arm64"]`
    pub compatible_architectures: Vec<String>,
    /// Optional region override
    pub region: Option<String>,
}

/// Response facts worth reporting to the user
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PublishedLayer {
    /// Full ARN of the published layer version
    pub layer_version_arn: String,
    /// Version number assigned by Lambda
    pub version: i64,
}

/// Publish an archive as a new layer version
pub async fn publish_layer(request: &PublishRequest) -> Result<PublishedLayer, PublishError> {
    let aws = which::which("aws").map_err(|_| PublishError::AwsCliNotFound)?;

    let args = cli_args(request);
    tracing::debug!("Running {} {}", aws.display(), args.join(" "));
    let output = Command::new(&aws)
        .args(&args)
        .output()
        .await
        .map_err(|e| PublishError::BadResponse {
            reason: format!("failed to run aws CLI: {e}"),
        })?;

    if !output.status.success() {
        return Err(PublishError::CommandFailed {
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    parse_response(&String::from_utf8_lossy(&output.stdout))
}

/// Build the AWS CLI argument list for a request
pub fn cli_args(request: &PublishRequest) -> Vec<String> {
    let mut args = vec![
        "lambda".to_string(),
        "publish-layer-version".to_string(),
        "--layer-name".to_string(),
        request.layer_name.clone(),
        "--description".to_string(),
        request.description.clone(),
        "--zip-file".to_string(),
        format!("fileb://{}", request.zip_path.display()),
    ];
    if !request.compatible_runtimes.is_empty() {
        args.push("--compatible-runtimes".to_string());
        args.extend(request.compatible_runtimes.iter().cloned());
    }
    if !request.compatible_architectures.is_empty() {
        args.push("--compatible-architectures".to_string());
        args.extend(request.compatible_architectures.iter().cloned());
    }
    if let Some(region) = &request.region {
        args.push("--region".to_string());
        args.push(region.clone());
    }
    args.push("--output".to_string());
    args.push("json".to_string());
    args
}

/// Parse the publish-layer-version JSON response
pub fn parse_response(stdout: &str) -> Result<PublishedLayer, PublishError> {
    let json: serde_json::Value =
        serde_json::from_str(stdout).map_err(|e| PublishError::BadResponse {
            reason: format!("response is not JSON: {e}"),
        })?;
    let layer_version_arn = json
        .get("LayerVersionArn")
        .and_then(|v| v.as_str())
        .ok_or_else(|| PublishError::BadResponse {
            reason: "missing LayerVersionArn".to_string(),
        })?
        .to_string();
    let version = json
        .get("Version")
        .and_then(serde_json::Value::as_i64)
        .ok_or_else(|| PublishError::BadResponse {
            reason: "missing Version".to_string(),
        })?;
    Ok(PublishedLayer {
        layer_version_arn,
        version,
    })
}
