use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfDecryptError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF password not provided (use --password or PDF_PASSWORD)")]
    MissingPassword,

    #[error("Unsupported platform: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    #[error(
        "qpdf is not bundled in this build for {os}/{arch}. \
         Rebuild with --features bundled or set PDF_QPDF_BIN"
    )]
    NotBundled { os: String, arch: String },

    #[error("qpdf executable not found: {}", .0.display())]
    ToolNotFound(PathBuf),

    #[error("Failed to write qpdf binary to {}: {source}", path.display())]
    Provision {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unable to open {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read source directory {}: {source}", path.display())]
    Discovery {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PdfDecryptError>;
