use clap::Parser;
use pdfdecrypt::audit::{self, AUDIT_TARGET};
use pdfdecrypt::config::{self, Config, Flags};
use pdfdecrypt::{commands, discovery, platform, ProvisionedBinary, Result};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pdfdecrypt")]
#[command(version)]
#[command(about = "Batch-decrypt password-protected PDF files", long_about = None)]
#[command(after_help = "Environment:\n  \
    PDF_PASSWORD   Password when --password is not given (also read from .env)\n  \
    PDF_SRC_DIR    Directory searched for *.pdf [default: .]\n  \
    PDF_OUT_DIR    Directory for decrypted files [default: dercipts]\n  \
    PDF_QPDF_BIN   Use this qpdf instead of the embedded one")]
struct Cli {
    /// PDF password (or PDF_PASSWORD)
    #[arg(long, value_name = "PASS")]
    password: Option<String>,

    /// Decrypt only this file instead of searching PDF_SRC_DIR
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// List the files without decrypting them
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let outcome = {
        let _log = match audit::init(audit::LOG_FILE) {
            Ok(guard) => guard,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(1);
            }
        };

        run(cli).inspect_err(|e| tracing::error!(target: AUDIT_TARGET, "{}", e))
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Returns whether every file was decrypted
fn run(cli: Cli) -> Result<bool> {
    config::load_env_file(config::ENV_FILE);

    let config = Config::from_env(Flags {
        password: cli.password,
        file: cli.file,
        dry_run: cli.dry_run,
    })?;

    let tool = match &config.tool {
        Some(path) => ProvisionedBinary::external(path)?,
        None => platform::provision()?,
    };

    let files = discovery::discover(config.file.as_deref(), &config.source_dir)?;

    if config.dry_run {
        commands::list(&files, &mut std::io::stdout().lock())?;
        return Ok(true);
    }

    let summary = commands::decrypt(&tool, &config, &files)?;

    if !summary.all_succeeded() {
        println!(
            "{} of {} file(s) failed, see {}",
            summary.failed(),
            summary.attempted(),
            audit::LOG_FILE
        );
    }

    Ok(summary.all_succeeded())
}
