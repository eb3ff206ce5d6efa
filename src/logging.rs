//! File-backed logging setup.
//!
//! The TUI owns the terminal, so tracing output goes to a log file inside
//! the data directory instead of stderr.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber, appending to `path`.
///
/// `FOCUSDIAL_LOG` overrides the default `info` filter (same syntax as
/// `RUST_LOG`). Safe to call once per process; a second call fails.
pub fn init(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env("FOCUSDIAL_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("focusdial.log");
        // First init in the test process wins; either way the file must exist.
        let _ = init(&path);
        assert!(path.exists() || init(&path).is_err());
    }
}
