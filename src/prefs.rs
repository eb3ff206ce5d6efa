//! Persisted settings and data-directory paths.
//!
//! Settings live in `settings.json` inside the data directory
//! (`$FOCUSDIAL_DIR`, or `~/.focusdial`). The same directory holds the
//! inbound spool file, the outbound event log, and the tracing log.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{DEFAULT_TIMER_MIN, MAX_TIMER_MIN, MIN_TIMER_MIN};

/// Resolve the data directory: `$FOCUSDIAL_DIR` wins, else `~/.focusdial`.
pub fn focusdial_dir() -> Result<PathBuf> {
    if let Ok(dir) = env::var("FOCUSDIAL_DIR") {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".focusdial"))
}

/// Ensure the data directory exists.
pub fn ensure_focusdial_dir() -> Result<PathBuf> {
    let dir = focusdial_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

pub fn settings_file() -> Result<PathBuf> {
    Ok(focusdial_dir()?.join("settings.json"))
}

/// Where the gateway watches for freshly pushed catalog payloads.
pub fn spool_file() -> Result<PathBuf> {
    Ok(focusdial_dir()?.join("tasks.json"))
}

/// Where delivered event payloads are appended, one JSON object per line.
pub fn events_file() -> Result<PathBuf> {
    Ok(focusdial_dir()?.join("events.jsonl"))
}

pub fn log_file() -> Result<PathBuf> {
    Ok(focusdial_dir()?.join("focusdial.log"))
}

/// User-tunable state surviving restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Default session length started from Idle.
    pub default_duration_min: u32,
    /// Network provisioning has completed.
    #[serde(default)]
    pub provisioned: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_duration_min: DEFAULT_TIMER_MIN,
            provisioned: false,
        }
    }
}

impl Settings {
    /// Clamp the stored duration into the legal range (stale files may carry
    /// out-of-range values).
    pub fn clamped_duration(&self) -> u32 {
        self.default_duration_min.clamp(MIN_TIMER_MIN, MAX_TIMER_MIN)
    }
}

/// Load settings; a missing file yields defaults.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = fs::read_to_string(path)?;
    let settings: Settings = serde_json::from_str(&content)?;
    Ok(settings)
}

/// Save settings via write-then-rename so a crash never truncates the file.
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(settings)?;
    atomic_write(path, &json)
}

/// Write `content` to a sibling temp file, sync, then rename over `path`.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .context("File path has no parent directory")?;
    let tmp = dir.join(format!(
        ".{}.tmp",
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("focusdial")
    ));

    fs::write(&tmp, content)
        .with_context(|| format!("Failed to write temporary file: {}", tmp.display()))?;
    let file = fs::File::open(&tmp)?;
    file.sync_all().context("Failed to sync temporary file")?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to move temporary file into place: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_settings_yields_defaults() {
        let dir = tempdir().unwrap();
        let settings = load_settings(dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.default_duration_min, 25);
        assert!(!settings.provisioned);
    }

    #[test]
    fn test_settings_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let settings = Settings {
            default_duration_min: 45,
            provisioned: true,
        };
        save_settings(&path, &settings).unwrap();

        let loaded = load_settings(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_clamped_duration() {
        let mut settings = Settings::default();
        settings.default_duration_min = 2;
        assert_eq!(settings.clamped_duration(), 5);
        settings.default_duration_min = 999;
        assert_eq!(settings.clamped_duration(), 240);
        settings.default_duration_min = 30;
        assert_eq!(settings.clamped_duration(), 30);
    }

    #[test]
    fn test_atomic_write_replaces_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        atomic_write(&path, "old").unwrap();
        atomic_write(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }
}
