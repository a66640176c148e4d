//! Capture step: drives the external scan tool (or a simulated copy) and
//! writes the resulting image into the output directory.
//!
//! The exact command line is configuration, not behavior: `scanimage` with
//! `--format`, `--resolution` and an optional `--mode` by default, plus any
//! free-form `extra_args`. The artifact filename is derived from the capture
//! timestamp at second granularity; two captures in the same second produce
//! the same name and the later write wins.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use tokio::process::Command;

/// Output image format for captures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    /// File extension for artifact filenames
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }

    /// Format name as the capture tool expects it
    pub fn tool_name(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
        }
    }
}

/// How the capture step produces image bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    /// Invoke the external capture tool
    Scanner,
    /// Copy a configured source image instead of touching hardware
    Simulated,
}

/// Capture tool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CaptureConfig {
    /// Capture mode
    #[serde(default = "default_mode")]
    pub mode: CaptureMode,

    /// Capture tool executable
    #[serde(default = "default_command")]
    pub command: String,

    /// Scan resolution in DPI
    #[serde(default = "default_resolution")]
    pub resolution: u32,

    /// Output image format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Color mode passed as `--mode`, omitted when unset
    #[serde(default = "default_color_mode")]
    pub color_mode: Option<String>,

    /// Additional arguments appended verbatim
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// Source image copied in simulated mode
    #[serde(default = "default_simulated_source")]
    pub simulated_source: PathBuf,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            command: default_command(),
            resolution: default_resolution(),
            format: default_format(),
            color_mode: default_color_mode(),
            extra_args: Vec::new(),
            simulated_source: default_simulated_source(),
        }
    }
}

fn default_mode() -> CaptureMode {
    CaptureMode::Scanner
}

fn default_command() -> String {
    "scanimage".to_string()
}

fn default_resolution() -> u32 {
    300
}

fn default_format() -> OutputFormat {
    OutputFormat::Jpeg
}

fn default_color_mode() -> Option<String> {
    Some("Color".to_string())
}

fn default_simulated_source() -> PathBuf {
    PathBuf::from("scans/test_scan.jpg")
}

/// A single image produced by one trigger request
#[derive(Debug, Clone)]
pub struct ScanArtifact {
    /// Filename within the output directory
    pub filename: String,
    /// Full path of the stored artifact
    pub path: PathBuf,
}

/// Errors from the capture step.
///
/// Process failure, missing simulation input, and filesystem failure are
/// separate kinds so callers can report hardware problems differently from
/// local ones.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to launch capture tool `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("capture tool exited with {status}: {stderr}")]
    Process { status: ExitStatus, stderr: String },

    #[error("simulated scan source missing: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("failed to store scan artifact: {0}")]
    Io(#[from] std::io::Error),
}

impl CaptureError {
    /// True for failures of the scanner process itself, as opposed to local
    /// filesystem or setup problems
    pub fn is_hardware_failure(&self) -> bool {
        matches!(
            self,
            CaptureError::Spawn { .. } | CaptureError::Process { .. }
        )
    }
}

/// Generate a timestamp-derived artifact filename, e.g. `scan_20240101_120000.jpg`
pub fn artifact_filename(format: OutputFormat) -> String {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    format!("scan_{timestamp}.{}", format.extension())
}

/// Build the capture tool argument list from configuration
fn build_args(config: &CaptureConfig) -> Vec<String> {
    let mut args = vec![
        format!("--format={}", config.format.tool_name()),
        "--resolution".to_string(),
        config.resolution.to_string(),
    ];

    if let Some(mode) = &config.color_mode {
        args.push("--mode".to_string());
        args.push(mode.clone());
    }

    args.extend(config.extra_args.iter().cloned());
    args
}

/// Run one capture and store the result under a fresh timestamped name.
///
/// Single attempt, no retry: the caller blocks until the capture tool exits
/// or the simulated copy completes.
pub async fn run_capture(
    config: &CaptureConfig,
    output_dir: &Path,
) -> Result<ScanArtifact, CaptureError> {
    let filename = artifact_filename(config.format);
    let path = output_dir.join(&filename);

    match config.mode {
        CaptureMode::Scanner => capture_from_scanner(config, &path).await?,
        CaptureMode::Simulated => copy_simulated(config, &path).await?,
    }

    tracing::info!(filename = %filename, "Scan artifact stored");
    Ok(ScanArtifact { filename, path })
}

/// Invoke the capture tool and write its stdout to the artifact path.
///
/// Stdout is collected before writing so a failed capture never leaves a
/// partial artifact behind.
async fn capture_from_scanner(config: &CaptureConfig, path: &Path) -> Result<(), CaptureError> {
    let args = build_args(config);
    tracing::debug!(command = %config.command, ?args, "Invoking capture tool");

    let output = Command::new(&config.command)
        .args(&args)
        .output()
        .await
        .map_err(|source| CaptureError::Spawn {
            command: config.command.clone(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(CaptureError::Process {
            status: output.status,
            stderr,
        });
    }

    tokio::fs::write(path, &output.stdout).await?;
    Ok(())
}

/// Copy the configured source image in place of a hardware capture
async fn copy_simulated(config: &CaptureConfig, path: &Path) -> Result<(), CaptureError> {
    match tokio::fs::copy(&config.simulated_source, path).await {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(CaptureError::MissingSource(config.simulated_source.clone()))
        }
        Err(err) => Err(CaptureError::Io(err)),
    }
}
