//! # Binary Provisioning
//!
//! pdfdecrypt ships `qpdf` inside its own executable and writes it out to the
//! system temp directory at startup.
//!
//! ## Supported Platforms
//!
//! | OS        | Architecture | File        |
//! |-----------|--------------|-------------|
//! | `macos`   | `aarch64`    | `qpdf`      |
//! | `linux`   | `x86_64`     | `qpdf`      |
//! | `windows` | `x86_64`     | `qpdf.exe`  |
//!
//! Any other pair is rejected at startup. There is no fallback and no download.
//!
//! ## Bundling
//!
//! Payloads are only embedded when the `bundled` feature is enabled, which
//! expects the executables under `binaries/`:
//!
//! ```bash
//! cargo build --release --features bundled
//! ```
//!
//! Without it the table is still consulted, but provisioning fails with a
//! message pointing at `PDF_QPDF_BIN`.
//!
//! ## Known Limitation
//!
//! The extracted file has a fixed name, so two runs on the same machine share
//! it. The payload is staged under a per-process name and renamed into place,
//! so a reader never observes a partial write. On Windows the rename fails
//! while another run is still executing `qpdf.exe`, which makes that overlap
//! a fatal provisioning error there.

use crate::error::{PdfDecryptError, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// An `(OS, architecture)` pair as reported by `std::env::consts`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub os: &'static str,
    pub arch: &'static str,
}

impl Platform {
    pub const fn new(os: &'static str, arch: &'static str) -> Self {
        Self { os, arch }
    }

    /// The platform this process is running on
    pub fn current() -> Self {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

/// One row of the embedded-binary table
#[derive(Debug)]
pub struct PlatformEntry {
    pub platform: Platform,
    pub file_name: &'static str,
    pub payload: &'static [u8],
}

#[cfg(feature = "bundled")]
mod payload {
    pub const DARWIN_ARM64: &[u8] = include_bytes!("../binaries/qpdf-darwin-arm64");
    pub const LINUX_AMD64: &[u8] = include_bytes!("../binaries/qpdf-linux-amd64");
    pub const WINDOWS_AMD64: &[u8] = include_bytes!("../binaries/qpdf-windows-amd64.exe");
}

#[cfg(not(feature = "bundled"))]
mod payload {
    pub const DARWIN_ARM64: &[u8] = &[];
    pub const LINUX_AMD64: &[u8] = &[];
    pub const WINDOWS_AMD64: &[u8] = &[];
}

pub static PLATFORMS: &[PlatformEntry] = &[
    PlatformEntry {
        platform: Platform::new("macos", "aarch64"),
        file_name: "qpdf",
        payload: payload::DARWIN_ARM64,
    },
    PlatformEntry {
        platform: Platform::new("linux", "x86_64"),
        file_name: "qpdf",
        payload: payload::LINUX_AMD64,
    },
    PlatformEntry {
        platform: Platform::new("windows", "x86_64"),
        file_name: "qpdf.exe",
        payload: payload::WINDOWS_AMD64,
    },
];

/// An extracted (or externally supplied) qpdf ready to be invoked
#[derive(Debug, Clone)]
pub struct ProvisionedBinary {
    pub path: PathBuf,
    pub platform: Platform,
}

impl ProvisionedBinary {
    /// Use an already installed executable instead of the embedded one
    pub fn external(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(PdfDecryptError::ToolNotFound(path.to_path_buf()));
        }

        Ok(Self {
            path: path.to_path_buf(),
            platform: Platform::current(),
        })
    }
}

/// Find the table entry for a platform
pub fn lookup(platform: Platform) -> Result<&'static PlatformEntry> {
    lookup_in(PLATFORMS, platform)
}

fn lookup_in(table: &[PlatformEntry], platform: Platform) -> Result<&PlatformEntry> {
    table
        .iter()
        .find(|entry| entry.platform == platform)
        .ok_or_else(|| PdfDecryptError::UnsupportedPlatform {
            os: platform.os.to_string(),
            arch: platform.arch.to_string(),
        })
}

/// Write an entry's payload to `dir/file_name` as an executable file
pub fn extract(entry: &PlatformEntry, dir: impl AsRef<Path>) -> Result<PathBuf> {
    let target = dir.as_ref().join(entry.file_name);
    let staging = dir
        .as_ref()
        .join(format!(".{}.{}.tmp", entry.file_name, std::process::id()));

    let provision_err = |source| PdfDecryptError::Provision {
        path: target.clone(),
        source,
    };

    fs::write(&staging, entry.payload).map_err(provision_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&staging, fs::Permissions::from_mode(0o755))
            .map_err(provision_err)?;
    }

    if let Err(e) = fs::rename(&staging, &target) {
        let _ = fs::remove_file(&staging);
        return Err(provision_err(e));
    }

    Ok(target)
}

/// Extract the qpdf matching the running platform into the temp directory
pub fn provision() -> Result<ProvisionedBinary> {
    provision_into(PLATFORMS, Platform::current(), std::env::temp_dir())
}

fn provision_into(
    table: &[PlatformEntry],
    platform: Platform,
    dir: impl AsRef<Path>,
) -> Result<ProvisionedBinary> {
    let entry = lookup_in(table, platform)?;

    if entry.payload.is_empty() {
        return Err(PdfDecryptError::NotBundled {
            os: platform.os.to_string(),
            arch: platform.arch.to_string(),
        });
    }

    let path = extract(entry, dir)?;
    tracing::debug!("Extracted qpdf for {} to {}", platform, path.display());

    Ok(ProvisionedBinary { path, platform })
}
