//! GitHub Actions output writing.

use std::fs::OpenOptions;
use std::io::Write;

use anyhow::{Context, Result};

/// Publish a step output.
///
/// Appends to the file named by `$GITHUB_OUTPUT` when running inside an
/// action, falls back to stdout otherwise.
pub fn set_output(name: &str, value: &str) -> Result<()> {
    match std::env::var("GITHUB_OUTPUT") {
        Ok(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open output file {path}"))?;
            write_output(file, name, value)
        }
        Err(_) => write_output(std::io::stdout().lock(), name, value),
    }
}

/// Write one `name=value` record, using the heredoc form for multiline
/// values so the workflow runner parses them intact.
fn write_output(mut w: impl Write, name: &str, value: &str) -> Result<()> {
    if value.contains('\n') {
        writeln!(w, "{name}<<CHASSY_EOF")?;
        writeln!(w, "{value}")?;
        writeln!(w, "CHASSY_EOF")?;
    } else {
        writeln!(w, "{name}={value}")?;
    }
    Ok(())
}
