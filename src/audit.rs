//! # Audit Log
//!
//! Every run appends to `decrypt.log` in the working directory. Each line
//! carries a timestamp and level, for example:
//!
//! ```text
//! 2026-10-16T09:12:44.120871Z  INFO Run started: 2 file(s) → dercipts (qpdf for linux/x86_64)
//! 2026-10-16T09:12:44.301220Z  INFO SUCCESS: ./a.pdf → dercipts/a.pdf (duration: 180.2ms)
//! 2026-10-16T09:12:44.377013Z ERROR ERROR: ./b.pdf → dercipts/b.pdf: exit status: 2: invalid password (duration: 75.7ms)
//! ```
//!
//! Only events with target [`AUDIT_TARGET`] reach the file. Everything else
//! goes to stderr at `info` and above.
//!
//! The subscriber is installed for the current thread only and is torn down
//! together with the file handle when the returned [`AuditGuard`] is dropped.

use crate::error::{PdfDecryptError, Result};
use std::fs::{File, OpenOptions};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;
use tracing::subscriber::DefaultGuard;
use tracing::Level;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer;

pub const LOG_FILE: &str = "decrypt.log";

/// Target routing events to the audit file.
///
/// `Targets` matches by prefix, so this must not be a module path.
pub const AUDIT_TARGET: &str = "pdfdecrypt_audit";

/// Keeps the audit subscriber (and its open log file) alive
pub struct AuditGuard {
    _guard: DefaultGuard,
}

/// Open `path` for appending and route audit events into it
pub fn init(path: impl AsRef<Path>) -> Result<AuditGuard> {
    let path = path.as_ref();
    let file = open_log(path)?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_filter(Targets::new().with_target(AUDIT_TARGET, Level::TRACE));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .with_filter(
            Targets::new()
                .with_default(Level::INFO)
                .with_target(AUDIT_TARGET, LevelFilter::OFF),
        );

    let subscriber = tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer);

    Ok(AuditGuard {
        _guard: tracing::subscriber::set_default(subscriber),
    })
}

fn open_log(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| PdfDecryptError::LogFile {
            path: path.to_path_buf(),
            source,
        })
}
