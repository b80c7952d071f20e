use std::io::{self, Write};
use std::path::PathBuf;

/// Dry-run: print the files that would be decrypted and nothing else
pub fn list(files: &[PathBuf], out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Dry-run mode: files that would be decrypted:")?;
    for file in files {
        writeln!(out, " - {}", file.display())?;
    }
    Ok(())
}
