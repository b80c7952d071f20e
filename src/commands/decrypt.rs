use crate::audit::AUDIT_TARGET;
use crate::config::Config;
use crate::error::Result;
use crate::platform::ProvisionedBinary;
use crate::runner::{self, FileTask, RunRecord};
use std::path::PathBuf;

/// Outcome of a whole batch
#[derive(Debug, Default)]
pub struct RunSummary {
    pub records: Vec<RunRecord>,
}

impl RunSummary {
    pub fn attempted(&self) -> usize {
        self.records.len()
    }

    pub fn succeeded(&self) -> usize {
        self.records.iter().filter(|r| r.success).count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }
}

/// Decrypt every file in turn. A failing file never stops the batch.
pub fn decrypt(
    tool: &ProvisionedBinary,
    config: &Config,
    files: &[PathBuf],
) -> Result<RunSummary> {
    config.ensure_output_dir()?;

    tracing::info!(
        target: AUDIT_TARGET,
        "Run started: {} file(s) → {} (qpdf for {})",
        files.len(),
        config.output_dir.display(),
        tool.platform
    );

    let mut summary = RunSummary::default();

    for input in files {
        let record = match FileTask::new(input, &config.output_dir) {
            Some(task) => {
                println!("Decrypting {} → {}", task.input.display(), task.output.display());
                runner::run(&tool.path, &config.password, &task)
            }
            None => RunRecord::invalid_input(input, &config.output_dir),
        };

        if let Some(detail) = &record.error {
            println!(
                "ERROR: {} → {}: {} (duration: {:?})",
                record.input.display(),
                record.output.display(),
                detail,
                record.duration
            );
        }
        record.log();

        summary.records.push(record);
    }

    tracing::info!(
        target: AUDIT_TARGET,
        "Run finished: {} succeeded, {} failed",
        summary.succeeded(),
        summary.failed()
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Flags, OUT_DIR_VAR, SRC_DIR_VAR};
    use std::time::Duration;

    fn record(success: bool) -> RunRecord {
        RunRecord {
            input: PathBuf::from("in/a.pdf"),
            output: PathBuf::from("out/a.pdf"),
            success,
            error: (!success).then(|| "exit status: 2".to_string()),
            duration: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_summary_counts() {
        let summary = RunSummary {
            records: vec![record(true), record(false), record(true)],
        };

        assert_eq!(summary.attempted(), 3);
        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.failed(), 1);
        assert!(!summary.all_succeeded());
    }

    #[test]
    fn test_empty_summary_succeeds() {
        assert!(RunSummary::default().all_succeeded());
    }

    #[cfg(unix)]
    mod with_fake_tool {
        use super::*;
        use serial_test::serial;
        use std::fs;
        use std::path::Path;
        use tempfile::TempDir;

        /// Copies input to output, except for files named `bad*.pdf`
        fn fake_tool(dir: &Path) -> ProvisionedBinary {
            use std::os::unix::fs::PermissionsExt;

            let path = dir.join("qpdf");
            let script = concat!(
                "#!/bin/sh\n",
                "case \"$(basename \"$3\")\" in bad*) echo 'invalid password' >&2; exit 2;; esac\n",
                "cp \"$3\" \"$4\"\n",
            );
            fs::write(&path, script).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            ProvisionedBinary::external(path).unwrap()
        }

        fn config(src: &Path, out: &Path) -> Config {
            let src = src.to_str().unwrap().to_string();
            let out = out.to_str().unwrap().to_string();
            Config::resolve(
                Flags {
                    password: Some("secret".into()),
                    ..Default::default()
                },
                move |key| match key {
                    SRC_DIR_VAR => Some(src.clone()),
                    OUT_DIR_VAR => Some(out.clone()),
                    _ => None,
                },
            )
            .unwrap()
        }

        #[test]
        #[serial]
        fn test_decrypt_two_files() {
            let temp = TempDir::new().unwrap();
            let input_dir = temp.path().join("in");
            let out = temp.path().join("out");
            fs::create_dir(&input_dir).unwrap();
            fs::write(input_dir.join("a.pdf"), b"A").unwrap();
            fs::write(input_dir.join("b.pdf"), b"B").unwrap();

            let tool = fake_tool(temp.path());
            let config = config(&input_dir, &out);
            let files = vec![input_dir.join("a.pdf"), input_dir.join("b.pdf")];

            let summary = decrypt(&tool, &config, &files).unwrap();

            assert_eq!(summary.attempted(), 2);
            assert!(summary.all_succeeded());
            assert_eq!(summary.records[0].output, out.join("a.pdf"));
            assert_eq!(summary.records[1].output, out.join("b.pdf"));
            assert_eq!(fs::read(out.join("a.pdf")).unwrap(), b"A");
            assert_eq!(fs::read(out.join("b.pdf")).unwrap(), b"B");
        }

        #[test]
        #[serial]
        fn test_failure_does_not_stop_batch() {
            let temp = TempDir::new().unwrap();
            let input_dir = temp.path().join("in");
            let out = temp.path().join("out");
            fs::create_dir(&input_dir).unwrap();
            fs::write(input_dir.join("bad.pdf"), b"X").unwrap();
            fs::write(input_dir.join("good.pdf"), b"G").unwrap();

            let tool = fake_tool(temp.path());
            let config = config(&input_dir, &out);
            let files = vec![
                input_dir.join("bad.pdf"),
                input_dir.join("missing.pdf"),
                input_dir.join("good.pdf"),
            ];

            let summary = decrypt(&tool, &config, &files).unwrap();

            assert_eq!(summary.attempted(), 3);
            assert_eq!(summary.succeeded(), 1);
            assert!(summary.records[0]
                .error
                .as_deref()
                .unwrap()
                .contains("invalid password"));
            assert!(!summary.records[1].success);
            assert!(summary.records[2].success);
            assert!(out.join("good.pdf").exists());
        }

        #[test]
        #[serial]
        fn test_output_dir_created() {
            let temp = TempDir::new().unwrap();
            let out = temp.path().join("nested").join("out");

            let tool = fake_tool(temp.path());
            let config = config(temp.path(), &out);

            let summary = decrypt(&tool, &config, &[]).unwrap();

            assert_eq!(summary.attempted(), 0);
            assert!(out.is_dir());
        }
    }
}
