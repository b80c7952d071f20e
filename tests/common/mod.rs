#![allow(dead_code)]

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Variables the binary reads; cleared so the host environment cannot leak in.
const PDF_VARS: &[&str] = &["PDF_PASSWORD", "PDF_SRC_DIR", "PDF_OUT_DIR", "PDF_QPDF_BIN"];

/// A scratch working directory with an `in/` folder of fake PDFs and a fake qpdf.
pub struct Workspace {
    pub temp: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("failed to create temp dir");
        fs::create_dir(temp.path().join("in")).expect("failed to create input dir");
        Self { temp }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn input_dir(&self) -> PathBuf {
        self.path().join("in")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.path().join("out")
    }

    pub fn log_file(&self) -> PathBuf {
        self.path().join("decrypt.log")
    }

    /// Marker the fake qpdf appends to on every invocation
    pub fn invocations(&self) -> PathBuf {
        self.path().join("invocations")
    }

    pub fn add_pdf(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.input_dir().join(name);
        fs::write(&path, content).expect("failed to write input pdf");
        path
    }

    /// Install a fake qpdf that checks the password and copies input to output.
    ///
    /// Files named `bad*.pdf` fail with exit status 2.
    #[cfg(unix)]
    pub fn fake_qpdf(&self, password: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.path().join("fake-qpdf");
        let script = format!(
            r#"#!/bin/sh
echo "$3" >> "{marker}"
[ "$1" = "--password={password}" ] || {{ echo "invalid password" >&2; exit 2; }}
[ "$2" = "--decrypt" ] || exit 2
case "$(basename "$3")" in bad*) echo "file is damaged" >&2; exit 2;; esac
cp "$3" "$4"
"#,
            marker = self.invocations().display(),
        );
        fs::write(&path, script).expect("failed to write fake qpdf");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("failed to chmod fake qpdf");
        path
    }

    /// The binary, run inside this workspace with a clean PDF_* environment.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("pdfdecrypt");
        cmd.current_dir(self.path());
        for var in PDF_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// [`Workspace::cmd`] pointed at `in/`, `out/` and the fake qpdf.
    #[cfg(unix)]
    pub fn configured_cmd(&self, password: &str) -> Command {
        let mut cmd = self.cmd();
        cmd.env("PDF_SRC_DIR", self.input_dir())
            .env("PDF_OUT_DIR", self.output_dir())
            .env("PDF_QPDF_BIN", self.fake_qpdf(password));
        cmd
    }

    pub fn log_content(&self) -> String {
        fs::read_to_string(self.log_file()).unwrap_or_default()
    }
}
