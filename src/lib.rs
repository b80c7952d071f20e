//! # pdfdecrypt
//!
//! Batch-decrypt password-protected PDF files with an embedded copy of
//! [qpdf](https://qpdf.readthedocs.io/).
//!
//! pdfdecrypt does no PDF or cryptographic work of its own. It extracts the
//! qpdf executable matching the current platform and runs it once per file:
//!
//! ```text
//! qpdf --password=<password> --decrypt <input> <output>
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Decrypt every *.pdf in the current directory into ./dercipts
//! pdfdecrypt --password=secret
//!
//! # Read settings from the environment (or a .env file)
//! export PDF_PASSWORD=secret
//! export PDF_SRC_DIR=~/statements
//! export PDF_OUT_DIR=~/statements/plain
//! pdfdecrypt
//!
//! # One file only
//! pdfdecrypt --password=secret --file=statement-2024-03.pdf
//!
//! # See what would be processed
//! pdfdecrypt --dry-run
//! ```
//!
//! ## Run Flow
//!
//! 1. Parse flags (`--help` / `--version` exit immediately)
//! 2. Open `decrypt.log` and load `.env`
//! 3. Resolve the configuration; a missing password is fatal
//! 4. Provision qpdf for the running OS/architecture
//! 5. Discover input files
//! 6. Dry-run: print the list and stop
//! 7. Decrypt each file in turn, logging one line per file
//!
//! A file that fails to decrypt is reported and skipped; the rest of the batch
//! still runs.
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0    | Success, help, version or dry-run |
//! | 1    | Fatal error (configuration, provisioning, log file, output directory) |
//! | 2    | Batch completed but at least one file failed |
//!
//! ## Module Overview
//!
//! - [`config`] - Flags, environment and `.env` resolution
//! - [`platform`] - Embedded qpdf table and extraction
//! - [`discovery`] - Input file listing
//! - [`runner`] - Per-file qpdf invocation
//! - [`audit`] - Append-only `decrypt.log`
//! - [`commands`] - Dry-run listing and the batch loop
//! - [`error`] - Error types
//!
//! ## Testing
//!
//! ```bash
//! cargo test
//! ```
//!
//! Integration tests in `tests/` drive the binary against a fake qpdf shell
//! script supplied through `PDF_QPDF_BIN`, so they only run on Unix.

pub mod audit;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod error;
pub mod platform;
pub mod runner;

pub use config::{Config, Flags};
pub use error::{PdfDecryptError, Result};
pub use platform::ProvisionedBinary;
pub use runner::{FileTask, RunRecord};
