//! Configuration for the reminder scheduler.

use crate::error::{ReminderError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Scheduler timing configuration.
///
/// All fields have conservative defaults; a missing or partial config file
/// yields a fully usable configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Seconds between evaluation cycles. Also the width of the due window:
    /// an occurrence is eligible for exactly one cycle after its instant.
    pub cycle_secs: u64,
    /// Hours a ledger entry is retained before eviction.
    pub retention_hours: u64,
    /// Seconds a reminder stays flagged "active" in the UI after firing.
    pub dwell_secs: u64,
    /// Max dispatch-history entries kept in memory.
    pub history_limit: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            cycle_secs: 60,
            retention_hours: 24,
            dwell_secs: 60,
            history_limit: 100,
        }
    }
}

impl SchedulerConfig {
    /// Width of the due window / tick period as a [`Duration`].
    pub fn cycle_interval(&self) -> Duration {
        Duration::from_secs(self.cycle_secs)
    }

    /// Ledger retention window as a [`chrono::Duration`].
    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::try_from(self.retention_hours).unwrap_or(i64::MAX))
    }

    /// UI dwell time as a [`Duration`].
    pub fn dwell(&self) -> Duration {
        Duration::from_secs(self.dwell_secs)
    }

    /// Load configuration from a TOML file.
    ///
    /// A missing file yields the defaults; a present but malformed file is a
    /// [`ReminderError::Config`].
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: Self = toml::from_str(&contents)
            .map_err(|e| ReminderError::Config(format!("cannot parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would break the window semantics.
    pub fn validate(&self) -> Result<()> {
        if self.cycle_secs == 0 {
            return Err(ReminderError::Config(
                "cycle_secs must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// Default path for the scheduler config file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("clinic-reminders").join("scheduler.toml"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn defaults_match_documented_windows() {
        let config = SchedulerConfig::default();
        assert_eq!(config.cycle_secs, 60);
        assert_eq!(config.retention_hours, 24);
        assert_eq!(config.dwell_secs, 60);
        assert_eq!(config.history_limit, 100);
        assert_eq!(config.cycle_interval(), Duration::from_secs(60));
        assert_eq!(config.retention(), chrono::Duration::hours(24));
    }

    #[test]
    fn load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = SchedulerConfig::load(&dir.path().join("absent.toml")).expect("load");
        assert_eq!(config.cycle_secs, 60);
    }

    #[test]
    fn load_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scheduler.toml");
        std::fs::write(&path, "cycle_secs = 30\n").expect("write");

        let config = SchedulerConfig::load(&path).expect("load");
        assert_eq!(config.cycle_secs, 30);
        assert_eq!(config.retention_hours, 24);
    }

    #[test]
    fn load_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scheduler.toml");
        std::fs::write(&path, "cycle_secs = \"soon\"\n").expect("write");

        let err = SchedulerConfig::load(&path).unwrap_err();
        assert!(matches!(err, ReminderError::Config(_)));
    }

    #[test]
    fn zero_cycle_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scheduler.toml");
        std::fs::write(&path, "cycle_secs = 0\n").expect("write");

        let err = SchedulerConfig::load(&path).unwrap_err();
        assert!(matches!(err, ReminderError::Config(_)));
    }
}
