//! # Configuration
//!
//! Settings come from three places, in order of precedence:
//!
//! 1. Command-line flags (`--password`, `--file`, `--dry-run`)
//! 2. Process environment variables
//! 3. A local `.env` file, loaded into the environment without overriding
//!    anything already set
//!
//! | Variable       | Default    | Effect                                   |
//! |----------------|------------|------------------------------------------|
//! | `PDF_PASSWORD` |            | Password, when `--password` is not given |
//! | `PDF_SRC_DIR`  | `.`        | Directory searched for `*.pdf`           |
//! | `PDF_OUT_DIR`  | `dercipts` | Directory receiving decrypted files      |
//! | `PDF_QPDF_BIN` |            | Existing qpdf to use instead of the embedded one |
//!
//! Empty values are treated the same as unset ones.

use crate::error::{PdfDecryptError, Result};
use secrecy::SecretString;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_FILE: &str = ".env";

pub const PASSWORD_VAR: &str = "PDF_PASSWORD";
pub const SRC_DIR_VAR: &str = "PDF_SRC_DIR";
pub const OUT_DIR_VAR: &str = "PDF_OUT_DIR";
pub const TOOL_VAR: &str = "PDF_QPDF_BIN";

pub const DEFAULT_SRC_DIR: &str = ".";
pub const DEFAULT_OUT_DIR: &str = "dercipts";

/// Values taken from the command line
#[derive(Debug, Default, Clone)]
pub struct Flags {
    pub password: Option<String>,
    pub file: Option<PathBuf>,
    pub dry_run: bool,
}

/// Effective configuration for one run
#[derive(Debug)]
pub struct Config {
    pub password: SecretString,
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub file: Option<PathBuf>,
    pub dry_run: bool,
    pub tool: Option<PathBuf>,
}

impl Config {
    /// Resolve flags against the process environment
    pub fn from_env(flags: Flags) -> Result<Self> {
        Self::resolve(flags, |key| std::env::var(key).ok())
    }

    /// Resolve flags against an arbitrary variable lookup
    pub fn resolve<F>(flags: Flags, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let password = flags
            .password
            .filter(|p| !p.is_empty())
            .or_else(|| var(PASSWORD_VAR))
            .ok_or(PdfDecryptError::MissingPassword)?;

        let source_dir = var(SRC_DIR_VAR).unwrap_or_else(|| DEFAULT_SRC_DIR.to_string());
        let output_dir = var(OUT_DIR_VAR).unwrap_or_else(|| DEFAULT_OUT_DIR.to_string());

        Ok(Self {
            password: SecretString::from(password),
            source_dir: PathBuf::from(source_dir),
            output_dir: PathBuf::from(output_dir),
            file: flags.file,
            dry_run: flags.dry_run,
            tool: var(TOOL_VAR).map(PathBuf::from),
        })
    }

    /// Create the output directory (and parents) if it does not exist yet
    pub fn ensure_output_dir(&self) -> Result<()> {
        if self.output_dir.is_dir() {
            return Ok(());
        }

        fs::create_dir_all(&self.output_dir).map_err(|source| PdfDecryptError::OutputDir {
            path: self.output_dir.clone(),
            source,
        })
    }
}

/// Load `KEY=VALUE` pairs from an optional env file.
///
/// Variables already present in the environment win. A missing or unreadable
/// file is reported through tracing and otherwise ignored.
pub fn load_env_file(path: impl AsRef<Path>) {
    let path = path.as_ref();

    match dotenvy::from_path(path) {
        Ok(()) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => tracing::info!(
            "No {} file found, using environment variables and flags",
            path.display()
        ),
        Err(e) => tracing::warn!("Ignoring {}: {}", path.display(), e),
    }
}
