//! Referee configuration
//!
//! Loads [`RefereeConfig`] from a JSON file. Every field has a default, so a
//! partial file (or none at all) is fine.
//!
//! # File Location
//!
//! Lookup order:
//! 1. A path passed explicitly (`--config`); failures here are errors
//! 2. `config.json` in the user's configuration directory
//! 3. Built-in defaults
//!
//! A broken file in the user directory is logged and skipped rather than
//! refusing to start.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uci_evaluator::ScorePolicy;

use crate::error::{RefereeError, RefereeResult};

/// Config filename inside the user configuration directory
const CONFIG_FILENAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefereeConfig {
    /// UCI engine binary used by `score`
    pub engine_path: Option<PathBuf>,
    /// Search time per evaluation
    pub movetime_ms: u64,
    /// Centipawn value that maps to a score of 0 or 1
    pub score_bound: i32,
    /// Batch worker threads
    pub workers: usize,
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for RefereeConfig {
    fn default() -> Self {
        RefereeConfig {
            engine_path: None,
            movetime_ms: 100,
            score_bound: ScorePolicy::default().bound,
            workers: std::thread::available_parallelism().map_or(1, |n| n.get()),
            log_level: "info".to_string(),
        }
    }
}

impl RefereeConfig {
    /// Resolve the configuration, preferring `explicit` when given
    ///
    /// Nothing is logged here; call [`ConfigOrigin::log`] once a subscriber is
    /// installed, since the log level itself comes from the config.
    pub fn load(explicit: Option<&Path>) -> RefereeResult<(Self, ConfigOrigin)> {
        Self::load_from(explicit, default_config_path())
    }

    fn load_from(explicit: Option<&Path>, user_path: Option<PathBuf>) -> RefereeResult<(Self, ConfigOrigin)> {
        if let Some(path) = explicit {
            let config = Self::from_file(path)?;
            return Ok((config, ConfigOrigin::File(path.to_path_buf())));
        }

        let Some(path) = user_path else {
            return Ok((Self::default(), ConfigOrigin::NoConfigDir));
        };
        if !path.exists() {
            return Ok((Self::default(), ConfigOrigin::Missing(path)));
        }

        match Self::from_file(&path) {
            Ok(config) => Ok((config, ConfigOrigin::File(path))),
            Err(e) => Ok((
                Self::default(),
                ConfigOrigin::Fallback {
                    path,
                    reason: e.to_string(),
                },
            )),
        }
    }

    /// Read one config file
    pub fn from_file(path: &Path) -> RefereeResult<Self> {
        let contents = fs::read_to_string(path).map_err(|source| RefereeError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| RefereeError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.movetime_ms)
    }

    pub fn score_policy(&self) -> ScorePolicy {
        ScorePolicy {
            bound: self.score_bound,
        }
    }
}

/// Where a loaded [`RefereeConfig`] came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    /// No file at the user path; defaults apply
    Missing(PathBuf),
    /// The user path held a broken file; defaults apply
    Fallback { path: PathBuf, reason: String },
    NoConfigDir,
}

impl ConfigOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, ConfigOrigin::Fallback { .. })
    }

    pub fn log(&self) {
        match self {
            ConfigOrigin::File(path) => info!("[CONFIG] Loaded config from {:?}", path),
            ConfigOrigin::Missing(path) => info!("[CONFIG] No config file found at {:?}. Using defaults.", path),
            ConfigOrigin::Fallback { path, reason } => {
                warn!("[CONFIG] Ignoring {:?}: {}. Using defaults.", path, reason)
            }
            ConfigOrigin::NoConfigDir => info!("[CONFIG] No user config directory. Using defaults."),
        }
    }
}

/// `config.json` in the user's configuration directory
///
/// E.g. `~/.config/san-referee/config.json` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "san-referee", "san-referee")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("san-referee-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = scratch_file("partial.json", r#"{ "movetime_ms": 250, "score_bound": 600 }"#);
        let (config, origin) = RefereeConfig::load(Some(&path)).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.movetime_ms, 250);
        assert_eq!(config.time_budget(), Duration::from_millis(250));
        assert_eq!(config.score_policy(), ScorePolicy { bound: 600 });
        assert_eq!(config.engine_path, None, "unset fields fall back to defaults");
        assert_eq!(config.log_level, "info");
        assert_eq!(origin, ConfigOrigin::File(path));
    }

    #[test]
    fn test_broken_user_file_falls_back_with_reason() {
        let path = scratch_file("user-broken.json", "{ not json");
        let (config, origin) = RefereeConfig::load_from(None, Some(path.clone())).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config, RefereeConfig::default());
        assert!(origin.is_fallback());
        let ConfigOrigin::Fallback { path: reported, reason } = origin else {
            unreachable!()
        };
        assert_eq!(reported, path);
        assert!(!reason.is_empty());

        let missing = std::env::temp_dir().join("san-referee-no-user-config.json");
        let (_, origin) = RefereeConfig::load_from(None, Some(missing.clone())).unwrap();
        assert_eq!(origin, ConfigOrigin::Missing(missing));
    }

    #[test]
    fn test_explicit_path_errors_are_reported() {
        let missing = std::env::temp_dir().join("san-referee-does-not-exist.json");
        assert!(matches!(
            RefereeConfig::load(Some(&missing)),
            Err(RefereeError::ConfigIo { .. })
        ));

        let path = scratch_file("broken.json", "{ not json");
        let result = RefereeConfig::load(Some(&path));
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(RefereeError::ConfigParse { .. })));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = RefereeConfig {
            engine_path: Some(PathBuf::from("/usr/local/bin/stockfish")),
            workers: 3,
            ..RefereeConfig::default()
        };
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: RefereeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
