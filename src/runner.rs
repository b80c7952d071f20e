//! # Decryption Runner
//!
//! Runs qpdf once per input file:
//!
//! ```text
//! qpdf --password=<password> --decrypt <input> <output_dir>/<basename(input)>
//! ```
//!
//! Failures never escape this module as errors. A tool that cannot be
//! launched, or that exits non-zero, produces a failed [`RunRecord`] and the
//! caller moves on to the next file.

use crate::audit::AUDIT_TARGET;
use secrecy::{ExposeSecret, SecretString};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

/// One input file and the output path derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl FileTask {
    /// Derive `output_dir/basename(input)`; `None` if the input has no file name
    pub fn new(input: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Option<Self> {
        let input = input.as_ref();
        let name = input.file_name()?;

        Some(Self {
            input: input.to_path_buf(),
            output: output_dir.as_ref().join(name),
        })
    }
}

/// Outcome of processing one file
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub input: PathBuf,
    pub output: PathBuf,
    pub success: bool,
    pub error: Option<String>,
    pub duration: Duration,
}

impl RunRecord {
    /// Write this record to the audit log
    pub fn log(&self) {
        match &self.error {
            None => tracing::info!(
                target: AUDIT_TARGET,
                "SUCCESS: {} → {} (duration: {:?})",
                self.input.display(),
                self.output.display(),
                self.duration
            ),
            Some(detail) => tracing::error!(
                target: AUDIT_TARGET,
                "ERROR: {} → {}: {} (duration: {:?})",
                self.input.display(),
                self.output.display(),
                detail,
                self.duration
            ),
        }
    }

    /// Record for an input that cannot be turned into a [`FileTask`]
    pub fn invalid_input(input: &Path, output_dir: &Path) -> Self {
        Self::failed(
            input,
            output_dir,
            "input path has no file name".to_string(),
            Duration::ZERO,
        )
    }

    fn failed(input: &Path, output: &Path, error: String, duration: Duration) -> Self {
        Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            success: false,
            error: Some(error),
            duration,
        }
    }
}

/// Build the qpdf command line for a task
pub fn command(tool: &Path, password: &SecretString, task: &FileTask) -> Command {
    let mut cmd = Command::new(tool);
    cmd.arg(format!("--password={}", password.expose_secret()))
        .arg("--decrypt")
        .arg(&task.input)
        .arg(&task.output);
    cmd
}

/// Decrypt one file with the provisioned tool
pub fn run(tool: &Path, password: &SecretString, task: &FileTask) -> RunRecord {
    let start = Instant::now();
    let output = command(tool, password, task).output();
    let duration = start.elapsed();

    match output {
        Ok(output) if output.status.success() => RunRecord {
            input: task.input.clone(),
            output: task.output.clone(),
            success: true,
            error: None,
            duration,
        },
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            let detail = if stderr.is_empty() {
                output.status.to_string()
            } else {
                format!("{}: {}", output.status, stderr)
            };
            RunRecord::failed(&task.input, &task.output, detail, duration)
        }
        Err(e) => RunRecord::failed(
            &task.input,
            &task.output,
            format!("failed to launch {}: {}", tool.display(), e),
            duration,
        ),
    }
}
